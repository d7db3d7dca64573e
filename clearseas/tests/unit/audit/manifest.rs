use serde_json::json;
use std::path::PathBuf;

use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "clearseas_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn missing_files_fail_the_audit() {
    let tmp = temp_dir("audit_missing");
    std::fs::create_dir_all(tmp.join("assets")).unwrap();
    std::fs::write(tmp.join("assets/here.png"), b"png").unwrap();

    let mut sites = SiteRegistry::new();
    sites.merge_source(&json!({ "default": { "images": ["assets/here.png", "assets/gone.png"] } }));

    let report = audit_site_registry(&sites, &tmp).unwrap();
    assert!(!report.is_ok());
    assert_eq!(report.missing_files.len(), 1);
    assert_eq!(report.missing_files[0].src, "assets/gone.png");
    assert_eq!(report.missing_files[0].kind, AssetKind::Images);
    assert!(report.untagged_site_assets.is_empty());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn site_tags_are_checked() {
    let tmp = temp_dir("audit_tags");
    std::fs::create_dir_all(&tmp).unwrap();
    for name in ["a.mp4", "b.mp4", "c.mp4"] {
        std::fs::write(tmp.join(name), b"mp4").unwrap();
    }

    let mut sites = SiteRegistry::new();
    sites.merge_source(&json!({
        "key": "Promo",
        "videos": ["a.mp4", "b.mp4", "c.mp4"],
        "meta": { "videos": {
            "a.mp4": { "siteCodes": ["promo"] },
            "b.mp4": { "siteCodes": ["promo", "mystery", "CSS-Web-Master"] }
        } }
    }));

    let report = audit_site_registry(&sites, &tmp).unwrap();
    assert!(report.is_ok());
    assert!(!report.is_clean());

    let untagged: Vec<&str> = report
        .untagged_site_assets
        .iter()
        .map(|i| i.src.as_str())
        .collect();
    assert_eq!(untagged, ["c.mp4"]);

    assert_eq!(report.unknown_site_codes.len(), 1);
    assert_eq!(report.unknown_site_codes[0].code.as_deref(), Some("mystery"));
    assert_eq!(report.unknown_site_codes[0].key, "promo");

    let text = report.render_text();
    assert!(text.contains("[promo] video → c.mp4"));
    assert!(text.contains("(tagged as \"mystery\")"));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn brand_manifest_audit_reports_every_missing_source() {
    let tmp = temp_dir("audit_brand");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(tmp.join("1746496560073.mp4"), b"mp4").unwrap();

    let report = audit_brand_manifest(&BrandManifest::builtin(), &tmp).unwrap();
    assert_eq!(report.missing_files.len(), 9 + 6);
    assert!(
        report
            .missing_files
            .iter()
            .all(|i| i.key == BRAND_MANIFEST_KEY && i.src != "1746496560073.mp4")
    );

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn clean_report_renders_success_line() {
    let report = AuditReport::default();
    assert!(report.is_clean());
    assert!(report.render_text().starts_with("✅"));

    let mut merged = AuditReport::default();
    merged.extend(AuditReport {
        missing_files: vec![AssetIssue {
            key: "k".into(),
            kind: AssetKind::Images,
            src: "x.png".into(),
            code: None,
        }],
        ..AuditReport::default()
    });
    assert!(!merged.is_ok());
    let value = serde_json::to_value(&merged).unwrap();
    assert_eq!(value["missingFiles"][0]["kind"], json!("images"));
}
