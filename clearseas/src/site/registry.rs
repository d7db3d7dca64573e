use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{ClearSeasError, ClearSeasResult};
use crate::manifest::builtin::{builtin_image_sources, builtin_video_sources};
use crate::manifest::document::AssetKind;

/// Key every lookup falls back to.
pub const DEFAULT_SITE_KEY: &str = "default";

const KEY_FIELDS: [&str; 4] = ["key", "siteCode", "id", "name"];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Per-asset metadata attached to a site entry.
pub struct AssetMeta {
    /// Site codes the asset is meant for.
    #[serde(rename = "siteCodes", default)]
    pub site_codes: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Metadata for a site entry's assets, keyed by source path.
pub struct SiteMeta {
    /// Image metadata.
    #[serde(default)]
    pub images: BTreeMap<String, AssetMeta>,
    /// Video metadata.
    #[serde(default)]
    pub videos: BTreeMap<String, AssetMeta>,
}

impl SiteMeta {
    /// True when no asset carries metadata.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.videos.is_empty()
    }

    /// Metadata for `src` in the `kind` collection.
    pub fn get(&self, kind: AssetKind, src: &str) -> Option<&AssetMeta> {
        match kind {
            AssetKind::Images => self.images.get(src),
            AssetKind::Videos => self.videos.get(src),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Asset lists for one site.
pub struct SiteEntry {
    /// Image paths.
    pub images: Vec<String>,
    /// Video paths.
    pub videos: Vec<String>,
    /// Parent site key.
    pub extends: Option<String>,
    /// Optional per-asset tagging.
    #[serde(default, skip_serializing_if = "SiteMeta::is_empty")]
    pub meta: SiteMeta,
}

impl SiteEntry {
    /// Paths of one kind.
    pub fn assets(&self, kind: AssetKind) -> &[String] {
        match kind {
            AssetKind::Images => &self.images,
            AssetKind::Videos => &self.videos,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Asset lists resolved for a site code.
pub struct ResolvedSiteAssets {
    /// Key the request resolved to.
    pub key: String,
    /// Image paths.
    pub images: Vec<String>,
    /// Video paths.
    pub videos: Vec<String>,
}

/// Site-keyed asset registry with `extends` inheritance.
#[derive(Clone, Debug, Default)]
pub struct SiteRegistry {
    entries: BTreeMap<String, SiteEntry>,
}

impl SiteRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the site's own lists: `default` holds every bundled asset and
    /// `parserator` inherits from it.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        let images: Vec<&str> = builtin_image_sources().collect();
        let videos: Vec<&str> = builtin_video_sources().collect();
        registry.merge_source(&json!({
            "default": { "images": images, "videos": videos },
            "parserator": { "extends": "default" }
        }));
        registry
    }

    /// Merge site definitions from a JSON file on disk.
    pub fn merge_path(&mut self, path: impl AsRef<Path>) -> ClearSeasResult<()> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ClearSeasError::manifest(format!("open site manifest '{}': {e}", path.display()))
        })?;
        let value: Value = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            ClearSeasError::manifest(format!("parse site manifest '{}': {e}", path.display()))
        })?;
        self.merge_source(&value);
        Ok(())
    }

    /// Merge site definitions.
    ///
    /// Accepts an array of sources, a single entry carrying `key`/`siteCode`/`id`/`name`, or a map
    /// of key to entry. Anything else is ignored. Fields present in an entry overwrite the stored
    /// ones; absent fields are left alone.
    pub fn merge_source(&mut self, source: &Value) {
        match source {
            Value::Array(items) => items.iter().for_each(|item| self.merge_source(item)),
            Value::Object(fields) if KEY_FIELDS.iter().any(|k| fields.contains_key(*k)) => {
                self.merge_entry(fields, None);
            }
            Value::Object(fields) => {
                for (key, value) in fields {
                    if let Value::Object(entry) = value {
                        self.merge_entry(entry, Some(key.as_str()));
                    }
                }
            }
            _ => {}
        }
    }

    fn merge_entry(&mut self, fields: &Map<String, Value>, map_key: Option<&str>) {
        // An explicit `key` field outranks the map key; other identifying fields do not.
        let mut candidates = fields
            .get("key")
            .and_then(key_string)
            .into_iter()
            .chain(map_key.map(str::to_owned))
            .chain(
                KEY_FIELDS[1..]
                    .iter()
                    .filter_map(|k| fields.get(*k).and_then(key_string)),
            );
        let key = candidates.next().map(|k| normalize_key(&k)).unwrap_or_default();
        if key.is_empty() {
            return;
        }

        let mut next = self.entries.get(&key).cloned().unwrap_or_default();
        if let Some(parent) = fields.get("extends") {
            let parent = key_string(parent)
                .map(|p| normalize_key(&p))
                .unwrap_or_default();
            next.extends = (!parent.is_empty() && parent != key).then_some(parent);
        }
        if let Some(images) = fields.get("images") {
            next.images = normalize_path_list(images);
        }
        if let Some(videos) = fields.get("videos") {
            next.videos = normalize_path_list(videos);
        }
        if let Some(meta) = fields.get("meta") {
            next.meta = serde_json::from_value(meta.clone()).unwrap_or_else(|e| {
                tracing::warn!(site = %key, error = %e, "ignoring malformed site meta");
                SiteMeta::default()
            });
        }

        tracing::debug!(
            site = %key,
            images = next.images.len(),
            videos = next.videos.len(),
            "merged site entry"
        );
        self.entries.insert(key, next);
    }

    /// Resolve the asset lists for `site_code`.
    ///
    /// Unknown or blank codes resolve to [`DEFAULT_SITE_KEY`]. The `extends` chain is followed
    /// (unknown parents fall back to the default entry, cycles stop the walk). Each list is taken
    /// from the most distant ancestor that has a non-empty one, then from the default entry.
    pub fn resolve(&self, site_code: &str) -> ResolvedSiteAssets {
        let empty = SiteEntry::default();

        let mut token = normalize_key(site_code);
        if token.is_empty() || !self.entries.contains_key(&token) {
            token = DEFAULT_SITE_KEY.to_owned();
        }

        let mut visited = BTreeSet::<String>::new();
        let mut chain = Vec::<(String, &SiteEntry)>::new();
        let mut current = token;
        let mut entry = self
            .entries
            .get(&current)
            .or_else(|| self.entries.get(DEFAULT_SITE_KEY))
            .or(Some(&empty));

        while let Some(layer) = entry {
            if !visited.insert(current.clone()) {
                break;
            }
            chain.push((current.clone(), layer));

            let next = layer.extends.as_deref().map(normalize_key).unwrap_or_default();
            if next.is_empty() || next == current {
                break;
            }
            current = if self.entries.contains_key(&next) {
                next
            } else {
                DEFAULT_SITE_KEY.to_owned()
            };
            entry = self.entries.get(&current);
        }

        let default_entry = self.entries.get(DEFAULT_SITE_KEY).unwrap_or(&empty);
        let pick = |kind: AssetKind| -> Vec<String> {
            chain
                .iter()
                .rev()
                .map(|(_, layer)| layer.assets(kind))
                .find(|list| !list.is_empty())
                .unwrap_or_else(|| default_entry.assets(kind))
                .to_vec()
        };

        ResolvedSiteAssets {
            key: chain
                .first()
                .map(|(token, _)| token.clone())
                .unwrap_or_else(|| DEFAULT_SITE_KEY.to_owned()),
            images: pick(AssetKind::Images),
            videos: pick(AssetKind::Videos),
        }
    }

    /// Entry stored under `key` (normalized first).
    pub fn get(&self, key: &str) -> Option<&SiteEntry> {
        self.entries.get(&normalize_key(key))
    }

    /// Normalized keys of every entry.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Copy of every entry, ordered by key.
    pub fn snapshot(&self) -> BTreeMap<String, SiteEntry> {
        self.entries.clone()
    }
}

/// Trim and lowercase a site key.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Normalize a path list: arrays keep trimmed non-empty strings, a single string is split on
/// newlines and commas, anything else is empty.
pub fn normalize_path_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect(),
        Value::String(s) => s
            .split(['\n', ','])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}

fn key_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/site/registry.rs"]
mod tests;
