use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::foundation::error::{ClearSeasError, ClearSeasResult};

/// Attributes whose values are treated as asset references.
pub const ASSET_ATTRIBUTES: &[&str] = &["src", "href", "poster", "data-src", "data-video"];

const SKIP_DIRS: &[&str] = &[".git", "node_modules", ".github"];

const SKIP_PREFIXES: &[&str] = &["mailto:", "tel:", "data:", "javascript:"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// An asset reference as written and as resolved against the scan root.
pub struct AssetRef {
    /// Attribute value as found in the markup.
    pub raw: String,
    /// Path relative to the scan root (or root-absolute as written), `/`-separated.
    pub normalized: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Reference check for one HTML file.
pub struct HtmlFileReport {
    /// File path relative to the scan root.
    pub file: String,
    /// Distinct local references found.
    pub total_assets: usize,
    /// References that do not resolve to a file.
    pub missing_count: usize,
    /// References that resolve.
    pub present_count: usize,
    /// The unresolved references.
    pub missing: Vec<AssetRef>,
    /// The resolved references.
    #[serde(skip)]
    pub present: Vec<AssetRef>,
}

impl HtmlFileReport {
    /// True when every reference resolved.
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Pulls quoted asset attribute values out of HTML text.
#[derive(Clone, Debug)]
pub struct AssetRefExtractor {
    double_quoted: Regex,
    single_quoted: Regex,
}

impl AssetRefExtractor {
    /// Compile the attribute patterns.
    pub fn new() -> ClearSeasResult<Self> {
        let attrs = ASSET_ATTRIBUTES.join("|");
        let compile = |pattern: String| {
            Regex::new(&pattern)
                .map_err(|e| ClearSeasError::scan(format!("compile attribute pattern: {e}")))
        };
        Ok(Self {
            double_quoted: compile(format!(r#"(?i)(?:{attrs})\s*=\s*"([^"]+)""#))?,
            single_quoted: compile(format!(r#"(?i)(?:{attrs})\s*=\s*'([^']+)'"#))?,
        })
    }

    /// Attribute values in document order, double-quoted matches first.
    pub fn extract(&self, html: &str) -> Vec<String> {
        [&self.double_quoted, &self.single_quoted]
            .into_iter()
            .flat_map(|re| re.captures_iter(html))
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_owned()))
            .collect()
    }
}

/// Clean an attribute value into a local asset path.
///
/// Drops the query and fragment, then rejects remote URLs, non-file schemes, template
/// placeholders and bare words that contain neither `.` nor `/`.
pub fn normalize_asset_path(raw: &str) -> Option<String> {
    let cleaned = raw.split('?').next().unwrap_or_default();
    let cleaned = cleaned.split('#').next().unwrap_or_default().trim();
    if cleaned.is_empty() {
        return None;
    }

    let lowered = cleaned.to_ascii_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") || cleaned.starts_with("//")
    {
        return None;
    }
    if SKIP_PREFIXES.iter().any(|p| lowered.starts_with(p)) || cleaned.starts_with("about:") {
        return None;
    }
    if cleaned.contains("${") || cleaned.contains("{{") {
        return None;
    }
    if !cleaned.contains('.') && !cleaned.contains('/') {
        return None;
    }
    Some(cleaned.to_owned())
}

/// Scans a site tree for HTML files and checks their local asset references.
#[derive(Clone, Debug)]
pub struct HtmlScanner {
    root: PathBuf,
    extractor: AssetRefExtractor,
}

impl HtmlScanner {
    /// Scanner rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> ClearSeasResult<Self> {
        let mut root = lexical_normalize(root.as_ref());
        if root.as_os_str().is_empty() {
            root = PathBuf::from(".");
        }
        Ok(Self {
            root,
            extractor: AssetRefExtractor::new()?,
        })
    }

    /// Scan root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every `.html` file under the root, sorted. Dot-directories, dot-files and
    /// `node_modules` are skipped. Walk failures keep the underlying I/O error as their source.
    pub fn collect_html_files(&self) -> ClearSeasResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped(e));
        for entry in walker {
            let entry = entry.map_err(|e| {
                ClearSeasError::from(
                    anyhow::Error::new(e)
                        .context(format!("walk site tree '{}'", self.root.display())),
                )
            })?;
            let is_html = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.to_ascii_lowercase().ends_with(".html"));
            if entry.file_type().is_file() && is_html {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Scan every HTML file under the root.
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    pub fn scan(&self) -> ClearSeasResult<Vec<HtmlFileReport>> {
        let files = self.collect_html_files()?;
        tracing::debug!(files = files.len(), "collected html files");
        files.iter().map(|f| self.scan_file(f)).collect()
    }

    /// Check the references of one HTML file.
    pub fn scan_file(&self, path: &Path) -> ClearSeasResult<HtmlFileReport> {
        let bytes = std::fs::read(path)
            .map_err(|e| ClearSeasError::io(format!("read html '{}': {e}", path.display())))?;
        let html = String::from_utf8_lossy(&bytes);
        let base_dir = path.parent().unwrap_or(&self.root);

        let mut seen = HashSet::<String>::new();
        let mut refs = Vec::<(String, String)>::new();
        for raw in self.extractor.extract(&html) {
            let Some(normalized) = normalize_asset_path(&raw) else {
                continue;
            };
            if seen.insert(normalized.clone()) {
                refs.push((raw, normalized));
            }
        }

        let mut missing = Vec::new();
        let mut present = Vec::new();
        for (raw, normalized) in refs {
            let abs = self.resolve(base_dir, &normalized);
            let shown = if normalized.starts_with('/') {
                normalized
            } else {
                slash_path(abs.strip_prefix(&self.root).unwrap_or(&abs))
            };
            let asset = AssetRef {
                raw,
                normalized: shown,
            };
            if abs.exists() {
                present.push(asset);
            } else {
                missing.push(asset);
            }
        }

        let file = slash_path(path.strip_prefix(&self.root).unwrap_or(path));
        if !missing.is_empty() {
            tracing::warn!(file = %file, missing = missing.len(), "unresolved asset references");
        }
        Ok(HtmlFileReport {
            file,
            total_assets: missing.len() + present.len(),
            missing_count: missing.len(),
            present_count: present.len(),
            missing,
            present,
        })
    }

    /// Root-absolute references resolve against the scan root, others against the HTML file's
    /// directory.
    pub fn resolve(&self, base_dir: &Path, normalized: &str) -> PathBuf {
        let joined = match normalized.strip_prefix('/') {
            Some(rooted) => self.root.join(rooted),
            None => base_dir.join(normalized),
        };
        lexical_normalize(&joined)
    }
}

/// Markdown rendering of a scan, one section per file.
pub fn render_markdown(reports: &[HtmlFileReport]) -> String {
    let mut lines = vec![
        "# HTML Smoke Test Report".to_owned(),
        String::new(),
        "This report captures local asset resolution checks for every HTML build in the repository."
            .to_owned(),
        "Remote resources (http/https), inline data URIs, and anchor hashes are ignored.".to_owned(),
        String::new(),
    ];

    for report in reports {
        if report.is_ok() {
            lines.push(format!("## ✅ {}", report.file));
            lines.push(String::new());
            lines.push("All local assets resolved.".to_owned());
        } else {
            lines.push(format!("## ❌ {}", report.file));
            lines.push(String::new());
            lines.push("Missing local assets:".to_owned());
            lines.push(String::new());
            for asset in &report.missing {
                lines.push(format!("- `{}` → `{}`", asset.raw, asset.normalized));
            }
        }
        lines.push(String::new());
    }

    let mut out = lines.join("\n").trim_end().to_owned();
    out.push('\n');
    out
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.') || SKIP_DIRS.contains(&name))
}

fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

// Resolve `.` and `..` without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scan/html.rs"]
mod tests;
