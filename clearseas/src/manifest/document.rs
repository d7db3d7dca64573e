use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use crate::foundation::error::{ClearSeasError, ClearSeasResult};
use crate::manifest::builtin::{builtin_images, builtin_videos};
use crate::manifest::descriptor::AssetDescriptor;
use crate::manifest::entry::normalize_list;
use crate::manifest::merge::merge_descriptors;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Which collection of a manifest an asset lives in.
pub enum AssetKind {
    /// Still images.
    Images,
    /// Video loops.
    Videos,
}

impl AssetKind {
    /// Both kinds, images first.
    pub const ALL: [AssetKind; 2] = [AssetKind::Images, AssetKind::Videos];

    /// Collection name (`images` / `videos`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Videos => "videos",
        }
    }

    /// Name of a single item (`image` / `video`).
    pub fn singular(self) -> &'static str {
        match self {
            Self::Images => "image",
            Self::Videos => "video",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = ClearSeasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "images" | "image" => Ok(Self::Images),
            "videos" | "video" => Ok(Self::Videos),
            other => Err(ClearSeasError::validation(format!(
                "unknown asset kind '{other}' (expected images or videos)"
            ))),
        }
    }
}

/// Brand asset manifest: an `images` and a `videos` collection of canonical descriptors.
///
/// Deserialization is lenient in the same way as [`normalize_list`]: a missing, null or non-array
/// collection becomes empty and unusable entries are dropped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandManifest {
    /// Image descriptors.
    #[serde(default, deserialize_with = "lenient_asset_list")]
    pub images: Vec<AssetDescriptor>,
    /// Video descriptors.
    #[serde(default, deserialize_with = "lenient_asset_list")]
    pub videos: Vec<AssetDescriptor>,
}

fn lenient_asset_list<'de, D>(deserializer: D) -> Result<Vec<AssetDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(normalize_list(&value))
}

impl BrandManifest {
    /// The manifest bundled with the site.
    pub fn builtin() -> Self {
        Self {
            images: builtin_images(),
            videos: builtin_videos(),
        }
    }

    /// Build from an arbitrary JSON value. Non-objects give an empty manifest.
    pub fn from_value(value: &Value) -> Self {
        Self {
            images: value.get("images").map(normalize_list).unwrap_or_default(),
            videos: value.get("videos").map(normalize_list).unwrap_or_default(),
        }
    }

    /// Parse a manifest from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ClearSeasResult<Self> {
        let value: Value = serde_json::from_reader(r)
            .map_err(|e| ClearSeasError::manifest(format!("parse manifest JSON: {e}")))?;
        Ok(Self::from_value(&value))
    }

    /// Parse a manifest from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ClearSeasResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ClearSeasError::manifest(format!("open manifest JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Descriptors of one kind.
    pub fn assets(&self, kind: AssetKind) -> &[AssetDescriptor] {
        match kind {
            AssetKind::Images => &self.images,
            AssetKind::Videos => &self.videos,
        }
    }

    /// Merge `incoming` into this manifest, collection by collection, keyed by `src`.
    pub fn merge(&mut self, incoming: &BrandManifest) {
        self.images = merge_descriptors(
            std::mem::take(&mut self.images),
            incoming.images.iter().cloned(),
        );
        self.videos = merge_descriptors(
            std::mem::take(&mut self.videos),
            incoming.videos.iter().cloned(),
        );
    }

    /// Total number of descriptors.
    pub fn len(&self) -> usize {
        self.images.len() + self.videos.len()
    }

    /// True when both collections are empty.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.videos.is_empty()
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> ClearSeasResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ClearSeasError::serde(format!("encode manifest JSON: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/document.rs"]
mod tests;
