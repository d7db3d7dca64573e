use serde_json::json;

use super::*;

#[test]
fn builtin_parserator_inherits_default() {
    let registry = SiteRegistry::builtin();
    let resolved = registry.resolve("Parserator ");
    assert_eq!(resolved.key, "parserator");
    assert_eq!(resolved.images.len(), 9);
    assert_eq!(resolved.videos.len(), 7);
    assert_eq!(resolved.images, registry.resolve("default").images);
}

#[test]
fn unknown_and_blank_codes_resolve_to_default() {
    let registry = SiteRegistry::builtin();
    assert_eq!(registry.resolve("nope").key, DEFAULT_SITE_KEY);
    assert_eq!(registry.resolve("   ").key, DEFAULT_SITE_KEY);
    assert_eq!(registry.resolve("").videos.len(), 7);
}

#[test]
fn path_lists_accept_arrays_and_delimited_strings() {
    assert_eq!(
        normalize_path_list(&json!([" a.png ", "", 4, "b.png"])),
        ["a.png", "b.png"]
    );
    assert_eq!(
        normalize_path_list(&json!("a.png, b.png\n\nc.png,")),
        ["a.png", "b.png", "c.png"]
    );
    assert!(normalize_path_list(&json!({ "a": 1 })).is_empty());
    assert!(normalize_path_list(&Value::Null).is_empty());
}

#[test]
fn source_shapes_all_merge() {
    let mut registry = SiteRegistry::new();
    registry.merge_source(&json!([
        { "siteCode": "Alpha", "images": ["a.png"] },
        { "beta": { "videos": "b.mp4", "extends": "alpha" }, "ignored": 3 },
        "not an entry"
    ]));
    let keys: Vec<&str> = registry.keys().collect();
    assert_eq!(keys, ["alpha", "beta"]);
    assert_eq!(registry.get("BETA").unwrap().extends.as_deref(), Some("alpha"));
}

#[test]
fn explicit_key_field_outranks_map_key() {
    let mut registry = SiteRegistry::new();
    registry.merge_source(&json!({ "outer": { "key": "inner", "images": ["x.png"] } }));
    assert!(registry.get("outer").is_none());
    assert_eq!(registry.get("inner").unwrap().images, ["x.png"]);

    registry.merge_source(&json!({ "outer": { "siteCode": "other", "images": ["y.png"] } }));
    assert_eq!(registry.get("outer").unwrap().images, ["y.png"]);
}

#[test]
fn partial_merge_keeps_absent_fields() {
    let mut registry = SiteRegistry::new();
    registry.merge_source(&json!({ "key": "s", "images": ["a.png"], "videos": ["a.mp4"] }));
    registry.merge_source(&json!({ "key": "s", "videos": ["b.mp4"] }));
    let entry = registry.get("s").unwrap();
    assert_eq!(entry.images, ["a.png"]);
    assert_eq!(entry.videos, ["b.mp4"]);
}

#[test]
fn self_extension_is_cleared() {
    let mut registry = SiteRegistry::new();
    registry.merge_source(&json!({ "key": "loop", "extends": "LOOP" }));
    assert_eq!(registry.get("loop").unwrap().extends, None);
}

#[test]
fn most_distant_ancestor_list_wins() {
    let mut registry = SiteRegistry::new();
    registry.merge_source(&json!({
        "default": { "images": ["d.png"], "videos": ["d.mp4"] },
        "parent": { "images": ["p.png"], "extends": "grand" },
        "child": { "images": ["c.png"], "videos": ["c.mp4"], "extends": "parent" }
    }));
    let resolved = registry.resolve("child");
    assert_eq!(resolved.key, "child");
    // `grand` is unknown, so the chain ends in `default`, whose lists are non-empty.
    assert_eq!(resolved.images, ["d.png"]);
    assert_eq!(resolved.videos, ["d.mp4"]);
}

#[test]
fn ancestor_lists_fill_in_when_default_is_empty() {
    let mut registry = SiteRegistry::new();
    registry.merge_source(&json!({
        "parent": { "images": ["p.png"] },
        "child": { "videos": ["c.mp4"], "extends": "parent" }
    }));
    let resolved = registry.resolve("child");
    assert_eq!(resolved.images, ["p.png"]);
    assert_eq!(resolved.videos, ["c.mp4"]);
}

#[test]
fn extends_cycles_terminate() {
    let mut registry = SiteRegistry::new();
    registry.merge_source(&json!({
        "a": { "extends": "b", "images": ["a.png"] },
        "b": { "extends": "a" }
    }));
    let resolved = registry.resolve("a");
    assert_eq!(resolved.key, "a");
    assert_eq!(resolved.images, ["a.png"]);
    assert!(resolved.videos.is_empty());
}

#[test]
fn meta_is_kept_and_malformed_meta_ignored() {
    let mut registry = SiteRegistry::new();
    registry.merge_source(&json!({
        "key": "s",
        "images": ["a.png"],
        "meta": { "images": { "a.png": { "siteCodes": ["s"] } } }
    }));
    let meta = registry.get("s").unwrap().meta.get(AssetKind::Images, "a.png");
    assert_eq!(meta.unwrap().site_codes, ["s"]);

    registry.merge_source(&json!({ "key": "s", "meta": "bad" }));
    assert!(registry.get("s").unwrap().meta.is_empty());
}

#[test]
fn snapshot_is_a_detached_copy() {
    let mut registry = SiteRegistry::builtin();
    let before = registry.snapshot();
    registry.merge_source(&json!({ "key": "new", "images": ["n.png"] }));
    assert_eq!(before.len(), 2);
    assert_eq!(registry.snapshot().len(), 3);
}
