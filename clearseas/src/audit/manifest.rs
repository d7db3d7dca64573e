use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

use crate::foundation::error::{ClearSeasError, ClearSeasResult};
use crate::manifest::document::{AssetKind, BrandManifest};
use crate::site::registry::{DEFAULT_SITE_KEY, SiteRegistry, normalize_key};

/// Site codes that are valid in `siteCodes` tags without having a registry entry.
pub const EXTRA_SITE_CODES: &[&str] = &["css-web-master"];

/// Pseudo site key used when auditing the brand manifest.
pub const BRAND_MANIFEST_KEY: &str = "brand";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One audit finding.
pub struct AssetIssue {
    /// Site key the asset was listed under.
    pub key: String,
    /// Collection the asset belongs to.
    pub kind: AssetKind,
    /// Asset path as listed.
    pub src: String,
    /// Offending site code, for unknown-code findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Findings of a manifest audit.
pub struct AuditReport {
    /// Listed assets with no file on disk.
    pub missing_files: Vec<AssetIssue>,
    /// Site-specific assets whose `siteCodes` do not include their own site.
    pub untagged_site_assets: Vec<AssetIssue>,
    /// `siteCodes` values that name no known site.
    pub unknown_site_codes: Vec<AssetIssue>,
}

impl AuditReport {
    /// Only missing files fail an audit; the tagging findings are warnings.
    pub fn is_ok(&self) -> bool {
        self.missing_files.is_empty()
    }

    /// True when there are no findings at all.
    pub fn is_clean(&self) -> bool {
        self.missing_files.is_empty()
            && self.untagged_site_assets.is_empty()
            && self.unknown_site_codes.is_empty()
    }

    /// Append another report's findings.
    pub fn extend(&mut self, other: AuditReport) {
        self.missing_files.extend(other.missing_files);
        self.untagged_site_assets.extend(other.untagged_site_assets);
        self.unknown_site_codes.extend(other.unknown_site_codes);
    }

    /// Human-readable summary, one finding per line.
    pub fn render_text(&self) -> String {
        if self.is_clean() {
            return "✅ Asset manifest looks good: all files exist and site tags are aligned.\n"
                .to_owned();
        }

        let mut out = String::new();
        let mut section = |title: &str, issues: &[AssetIssue]| {
            if issues.is_empty() {
                return;
            }
            out.push_str(&format!("\n{title}\n"));
            for issue in issues {
                out.push_str(&format!(
                    "  • [{}] {} → {}",
                    issue.key,
                    issue.kind.singular(),
                    issue.src
                ));
                if let Some(code) = &issue.code {
                    out.push_str(&format!(" (tagged as \"{code}\")"));
                }
                out.push('\n');
            }
        };
        section("❌ Missing asset files:", &self.missing_files);
        section(
            "⚠️ Site-specific entries without matching siteCodes:",
            &self.untagged_site_assets,
        );
        section(
            "⚠️ Unknown site codes referenced in metadata:",
            &self.unknown_site_codes,
        );
        out
    }
}

/// Audit every site entry against files under `root`.
#[tracing::instrument(skip_all, fields(root = %root.display()))]
pub fn audit_site_registry(sites: &SiteRegistry, root: &Path) -> ClearSeasResult<AuditReport> {
    let mut known: BTreeSet<String> = sites.keys().map(normalize_key).collect();
    known.insert(DEFAULT_SITE_KEY.to_owned());
    known.extend(EXTRA_SITE_CODES.iter().map(|c| normalize_key(c)));

    let mut report = AuditReport::default();
    for (key, entry) in sites.snapshot() {
        let site_key = normalize_key(&key);
        for kind in AssetKind::ALL {
            let assets = entry.assets(kind);
            for src in assets.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
                let issue = || AssetIssue {
                    key: key.clone(),
                    kind,
                    src: src.to_owned(),
                    code: None,
                };
                if !asset_exists(root, src)? {
                    report.missing_files.push(issue());
                }

                let codes = entry
                    .meta
                    .get(kind, src)
                    .map(|m| m.site_codes.as_slice())
                    .unwrap_or_default();
                if site_key != DEFAULT_SITE_KEY
                    && !codes.iter().any(|code| normalize_key(code) == site_key)
                {
                    report.untagged_site_assets.push(issue());
                }
                for code in codes {
                    let normalized = normalize_key(code);
                    if !normalized.is_empty() && !known.contains(&normalized) {
                        report.unknown_site_codes.push(AssetIssue {
                            code: Some(code.clone()),
                            ..issue()
                        });
                    }
                }
            }
        }
    }

    tracing::debug!(
        missing = report.missing_files.len(),
        untagged = report.untagged_site_assets.len(),
        unknown = report.unknown_site_codes.len(),
        "site registry audited"
    );
    Ok(report)
}

/// Check that every descriptor in `manifest` names a file under `root`.
#[tracing::instrument(skip_all, fields(root = %root.display()))]
pub fn audit_brand_manifest(manifest: &BrandManifest, root: &Path) -> ClearSeasResult<AuditReport> {
    let mut report = AuditReport::default();
    for kind in AssetKind::ALL {
        for asset in manifest.assets(kind) {
            if !asset_exists(root, asset.src())? {
                report.missing_files.push(AssetIssue {
                    key: BRAND_MANIFEST_KEY.to_owned(),
                    kind,
                    src: asset.src().to_owned(),
                    code: None,
                });
            }
        }
    }
    Ok(report)
}

fn asset_exists(root: &Path, src: &str) -> ClearSeasResult<bool> {
    let path = root.join(src);
    path.try_exists()
        .map_err(|e| ClearSeasError::io(format!("stat asset '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/audit/manifest.rs"]
mod tests;
