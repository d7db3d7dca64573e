use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::foundation::error::ClearSeasError;
use crate::manifest::entry::normalize_entry;

/// Palette tag that matches every requested palette.
pub const WILDCARD_PALETTE: &str = "*";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
/// Playback-speed range for video assets. `min <= max` always holds.
pub struct PlaybackRange {
    /// Slowest playback rate.
    pub min: f64,
    /// Fastest playback rate.
    pub max: f64,
}

impl PlaybackRange {
    /// Build a range from two finite bounds given in either order.
    pub fn new(a: f64, b: f64) -> Option<Self> {
        if !a.is_finite() || !b.is_finite() {
            return None;
        }
        Some(Self {
            min: a.min(b),
            max: a.max(b),
        })
    }
}

/// Canonical asset descriptor.
///
/// `src` is the dedup key and is never empty. Everything besides `src` and `palettes` is
/// presentation data handed to the renderer as-is. Fields of a hand-authored object entry that
/// have no dedicated slot are kept in [`AssetDescriptor::extra`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct AssetDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,
    pub(crate) src: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) palettes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) blend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) depth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) rotate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) tilt_bias: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) playback: Option<PlaybackRange>,
    #[serde(flatten)]
    pub(crate) extra: BTreeMap<String, Value>,
}

impl AssetDescriptor {
    /// Create a neutral descriptor for `src`. Returns `None` when `src` is empty.
    pub fn new(src: impl Into<String>) -> Option<Self> {
        let src = src.into();
        if src.is_empty() {
            return None;
        }
        Some(Self {
            id: None,
            src,
            palettes: Vec::new(),
            accent: None,
            blend: None,
            depth: None,
            rotate: None,
            tilt_bias: None,
            playback: None,
            extra: BTreeMap::new(),
        })
    }

    /// Set the stable identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Replace the palette tags.
    pub fn with_palettes<I, S>(mut self, palettes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palettes = palettes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the accent color.
    pub fn with_accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = Some(accent.into());
        self
    }

    /// Set the CSS blend mode keyword.
    pub fn with_blend(mut self, blend: impl Into<String>) -> Self {
        self.blend = Some(blend.into());
        self
    }

    /// Set the depth (CSS length).
    pub fn with_depth(mut self, depth: impl Into<String>) -> Self {
        self.depth = Some(depth.into());
        self
    }

    /// Set the rotation (CSS angle).
    pub fn with_rotate(mut self, rotate: impl Into<String>) -> Self {
        self.rotate = Some(rotate.into());
        self
    }

    /// Set the tilt bias scalar.
    pub fn with_tilt_bias(mut self, tilt_bias: f64) -> Self {
        self.tilt_bias = Some(tilt_bias);
        self
    }

    /// Set the playback-speed range.
    pub fn with_playback(mut self, playback: PlaybackRange) -> Self {
        self.playback = Some(playback);
        self
    }

    /// Stable identifier, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Source path, relative to the site root.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Palette tags in declaration order.
    pub fn palettes(&self) -> &[String] {
        &self.palettes
    }

    /// Accent color.
    pub fn accent(&self) -> Option<&str> {
        self.accent.as_deref()
    }

    /// Blend mode keyword.
    pub fn blend(&self) -> Option<&str> {
        self.blend.as_deref()
    }

    /// Depth (CSS length).
    pub fn depth(&self) -> Option<&str> {
        self.depth.as_deref()
    }

    /// Rotation (CSS angle).
    pub fn rotate(&self) -> Option<&str> {
        self.rotate.as_deref()
    }

    /// Tilt bias scalar.
    pub fn tilt_bias(&self) -> Option<f64> {
        self.tilt_bias
    }

    /// Playback-speed range.
    pub fn playback(&self) -> Option<PlaybackRange> {
        self.playback
    }

    /// Fields carried through from the source entry without interpretation.
    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// A descriptor without palette tags fits any slot as a fallback.
    pub fn is_neutral(&self) -> bool {
        self.palettes.is_empty()
    }

    /// True when `palette` is non-empty and listed in the tags, or the tags hold the wildcard.
    pub fn matches_palette(&self, palette: &str) -> bool {
        if palette.is_empty() || self.palettes.is_empty() {
            return false;
        }
        self.palettes
            .iter()
            .any(|tag| tag == palette || tag == WILDCARD_PALETTE)
    }
}

impl TryFrom<Value> for AssetDescriptor {
    type Error = ClearSeasError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        normalize_entry(&value)
            .ok_or_else(|| ClearSeasError::validation("asset entry has no usable src"))
    }
}
