use serde_json::json;

use super::*;

#[test]
fn builtin_has_expected_shape() {
    let m = BrandManifest::builtin();
    assert_eq!(m.images.len(), 9);
    assert_eq!(m.videos.len(), 7);
    assert!(m.videos.iter().all(|v| v.playback().is_some()));
    assert!(m.images.iter().all(|i| i.tilt_bias().is_some()));
    assert_eq!(m.images[0].id(), Some("glacial-orbit-panorama"));
    assert_eq!(m.assets(AssetKind::Videos)[4].src(), "1746496560073.mp4");
}

#[test]
fn builtin_sources_are_unique() {
    let m = BrandManifest::builtin();
    for kind in AssetKind::ALL {
        let mut seen = std::collections::HashSet::new();
        for a in m.assets(kind) {
            assert!(seen.insert(a.src()), "duplicate src {}", a.src());
        }
    }
}

#[test]
fn lenient_parse_drops_garbage() {
    let raw = r#"{ "images": ["a.png", null, { "path": "b.png" }], "videos": "nope" }"#;
    let m = BrandManifest::from_reader(raw.as_bytes()).unwrap();
    assert_eq!(m.images.len(), 2);
    assert!(m.videos.is_empty());

    let m: BrandManifest = serde_json::from_value(json!({ "images": [{}, "c.png"] })).unwrap();
    assert_eq!(m.images.len(), 1);
    assert!(m.videos.is_empty());
}

#[test]
fn non_object_json_gives_empty_manifest() {
    assert!(BrandManifest::from_value(&json!([1, 2])).is_empty());
    assert!(BrandManifest::from_reader("not json".as_bytes()).is_err());
}

#[test]
fn merge_is_idempotent() {
    let mut once = BrandManifest::default();
    once.merge(&BrandManifest::builtin());
    let mut twice = once.clone();
    twice.merge(&BrandManifest::builtin());
    assert_eq!(once, twice);
    assert_eq!(once, BrandManifest::builtin());
}

#[test]
fn kind_parses_both_spellings() {
    assert_eq!("images".parse::<AssetKind>().unwrap(), AssetKind::Images);
    assert_eq!(" Video ".parse::<AssetKind>().unwrap(), AssetKind::Videos);
    assert!("audio".parse::<AssetKind>().is_err());
    assert_eq!(AssetKind::Videos.singular(), "video");
    assert_eq!(AssetKind::Images.to_string(), "images");
}

#[test]
fn json_round_trip_keeps_camel_case_fields() {
    let json = BrandManifest::builtin().to_json_pretty().unwrap();
    assert!(json.contains("\"tiltBias\""));
    assert!(!json.contains("tilt_bias"));
    let back = BrandManifest::from_reader(json.as_bytes()).unwrap();
    assert_eq!(back, BrandManifest::builtin());
}
