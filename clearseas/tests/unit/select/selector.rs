use serde_json::json;

use super::*;

fn neutral(src: &str) -> AssetDescriptor {
    AssetDescriptor::new(src).unwrap()
}

fn tagged(src: &str, palettes: &[&str]) -> AssetDescriptor {
    neutral(src).with_palettes(palettes.iter().copied())
}

fn three_neutral() -> Vec<AssetDescriptor> {
    vec![neutral("a"), neutral("b"), neutral("c")]
}

#[test]
fn empty_candidates_select_nothing() {
    assert!(select_asset(&SelectionRequest::new(&[])).is_none());
    assert!(select_from_value(&json!({ "assets": [] })).is_none());
    assert!(select_from_value(&json!({ "assets": null })).is_none());
    assert!(select_from_value(&json!({})).is_none());
    assert!(select_from_value(&json!({ "assets": [null, ""] })).is_none());
}

#[test]
fn order_values_wrap_into_range() {
    assert_eq!(visiting_order(Some(&[-1, 5, 1]), 3), [2, 2, 1]);
    assert_eq!(visiting_order(Some(&[-4, 3, 7]), 3), [2, 0, 1]);
    assert_eq!(visiting_order(Some(&[]), 3), [0, 1, 2]);
    assert_eq!(visiting_order(None, 2), [0, 1]);
}

#[test]
fn explicit_order_drives_the_rotation() {
    let assets = three_neutral();
    let order = [-1, 5, 1];

    let first = select_asset(&SelectionRequest::new(&assets).order(&order)).unwrap();
    assert_eq!(first.index, 2);
    assert_eq!(first.asset.src(), "c");

    // Rotation by two puts index 1 at the head; every candidate is neutral, so it wins.
    let third = select_asset(&SelectionRequest::new(&assets).order(&order).offset(2)).unwrap();
    assert_eq!(third.index, 1);
}

#[test]
fn offsets_round_robin_before_repeating() {
    let assets = three_neutral();
    let picks: Vec<usize> = (0..4)
        .map(|offset| {
            select_asset(&SelectionRequest::new(&assets).offset(offset))
                .unwrap()
                .index
        })
        .collect();
    assert_eq!(picks, [0, 1, 2, 0]);
}

#[test]
fn negative_seed_wraps_like_order_values() {
    let assets = three_neutral();
    let pick = select_asset(&SelectionRequest::new(&assets).seed(-1)).unwrap();
    assert_eq!(pick.index, 2);

    let pick = select_asset(&SelectionRequest::new(&assets).seed(i64::MAX).offset(i64::MAX));
    assert!(pick.is_some());
}

#[test]
fn palette_match_beats_neutral_and_rotation() {
    let assets = vec![
        tagged("a", &["x"]),
        tagged("b", &[]),
        tagged("c", &["y", "*"]),
    ];
    for offset in 0..3 {
        let pick = select_asset(&SelectionRequest::new(&assets).palette("y").offset(offset))
            .unwrap();
        assert_eq!(pick.asset.src(), "c");
        assert_eq!(pick.index, 2);
    }
}

#[test]
fn wildcard_matches_any_palette() {
    let assets = vec![tagged("a", &["x"]), tagged("w", &["*"])];
    let pick = select_asset(&SelectionRequest::new(&assets).palette("anything")).unwrap();
    assert_eq!(pick.asset.src(), "w");
}

#[test]
fn first_palette_match_in_rotation_wins() {
    let assets = vec![tagged("a", &["x"]), tagged("b", &["x"]), tagged("c", &["x"])];
    let pick = select_asset(&SelectionRequest::new(&assets).palette("x").seed(1)).unwrap();
    assert_eq!(pick.index, 1);
}

#[test]
fn unmatched_palette_falls_back_to_neutral() {
    let assets = vec![tagged("a", &["x"]), tagged("b", &[]), tagged("c", &["y"])];
    let pick = select_asset(&SelectionRequest::new(&assets).palette("z")).unwrap();
    assert_eq!(pick.asset.src(), "b");

    let pick = select_asset(
        &SelectionRequest::new(&assets)
            .palette("z")
            .prefer_neutral(false),
    )
    .unwrap();
    assert_eq!(pick.asset.src(), "a");
}

#[test]
fn without_neutrals_both_fallbacks_agree() {
    let assets = vec![tagged("a", &["x"]), tagged("b", &["x"]), tagged("c", &["y"])];
    for offset in 0..3 {
        let base = SelectionRequest::new(&assets).palette("z").offset(offset);
        let preferring = select_asset(&base).unwrap();
        let not_preferring = select_asset(&base.prefer_neutral(false)).unwrap();
        assert_eq!(preferring, not_preferring);
        assert_eq!(preferring.index, offset as usize);
    }
}

#[test]
fn empty_palette_requests_nothing_specific() {
    let assets = vec![tagged("a", &["*"]), tagged("b", &[])];
    let pick = select_asset(&SelectionRequest::new(&assets).palette("")).unwrap();
    assert_eq!(pick.asset.src(), "b");
}

#[test]
fn single_candidate_always_wins() {
    let assets = vec![tagged("only", &["x"])];
    let order = [7, -3];
    let pick = select_asset(
        &SelectionRequest::new(&assets)
            .order(&order)
            .seed(41)
            .offset(-9)
            .palette("nope"),
    )
    .unwrap();
    assert_eq!(pick.index, 0);
    assert_eq!(pick.asset.src(), "only");
}

#[test]
fn loose_requests_follow_the_same_rules() {
    let request = json!({
        "assets": [
            { "src": "a", "palettes": ["x"] },
            { "src": "b", "palettes": [] },
            { "src": "c", "palettes": ["y", "*"] }
        ],
        "order": [0, "junk", 2, 1],
        "seed": 1,
        "palette": "y",
        "preferNeutral": false
    });
    let pick = select_from_value(&request).unwrap();
    assert_eq!(pick.asset.src(), "c");

    let value = serde_json::to_value(&pick).unwrap();
    assert_eq!(value["__index"], json!(2));
    assert_eq!(value["src"], json!("c"));
}

#[test]
fn resolved_index_does_not_collide_with_pass_through_fields() {
    let pick = select_from_value(&json!({
        "assets": [
            "a.png",
            { "src": "b.png", "palettes": ["x"], "index": "hero-slot", "__index": 7 }
        ],
        "palette": "x"
    }))
    .unwrap();
    assert_eq!(pick.index, 1);
    assert_eq!(pick.asset.extra().get("index"), Some(&json!("hero-slot")));
    assert!(pick.asset.extra().get(SELECTION_INDEX_KEY).is_none());

    let encoded = serde_json::to_string(&pick).unwrap();
    assert_eq!(encoded.matches("\"__index\"").count(), 1);

    let value: Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(value[SELECTION_INDEX_KEY], json!(1));
    assert_eq!(value["index"], json!("hero-slot"));
    assert_eq!(value["src"], json!("b.png"));
}

#[test]
fn params_deserialize_with_defaults() {
    let params: SelectionParams = serde_json::from_value(json!({ "seed": 3 })).unwrap();
    assert_eq!(params.seed, 3);
    assert!(params.prefer_neutral);
    assert_eq!(params.order, None);

    let assets = three_neutral();
    let pick = select_asset(&SelectionRequest::with_params(&assets, &params)).unwrap();
    assert_eq!(pick.index, 0);
}
