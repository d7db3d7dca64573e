use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::manifest::descriptor::{AssetDescriptor, PlaybackRange};

/// Loosely-structured manifest entry as written by hand in site data.
///
/// Resolved once into an [`AssetDescriptor`] by [`AssetEntry::normalize`]; nothing downstream of
/// normalization sees this type.
#[derive(Clone, Debug, PartialEq)]
pub enum AssetEntry {
    /// Bare path string, e.g. `"assets/hero.png"`.
    Path(String),
    /// Object with `src` (or `path`) plus presentation hints.
    Object(Map<String, Value>),
    /// Anything else (`null`, numbers, arrays, ...).
    Invalid,
}

impl AssetEntry {
    /// Resolve to a canonical descriptor, or `None` when no usable `src` exists.
    pub fn normalize(&self) -> Option<AssetDescriptor> {
        match self {
            Self::Path(src) => AssetDescriptor::new(src.as_str()),
            Self::Object(fields) => descriptor_from_object(fields),
            Self::Invalid => None,
        }
    }
}

impl From<&Value> for AssetEntry {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Path(s.clone()),
            Value::Object(fields) => Self::Object(fields.clone()),
            _ => Self::Invalid,
        }
    }
}

impl From<Value> for AssetEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Path(s),
            Value::Object(fields) => Self::Object(fields),
            _ => Self::Invalid,
        }
    }
}

impl From<&str> for AssetEntry {
    fn from(src: &str) -> Self {
        Self::Path(src.to_owned())
    }
}

/// Normalize one loosely-typed entry.
pub fn normalize_entry(value: &Value) -> Option<AssetDescriptor> {
    AssetEntry::from(value).normalize()
}

/// Normalize a loosely-typed list. Non-arrays yield an empty list; invalid entries are dropped
/// and the remaining ones keep their order.
pub fn normalize_list(value: &Value) -> Vec<AssetDescriptor> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items.iter().filter_map(normalize_entry).collect()
}

fn descriptor_from_object(fields: &Map<String, Value>) -> Option<AssetDescriptor> {
    let src = fields
        .get("src")
        .and_then(truthy_src)
        .or_else(|| fields.get("path").and_then(truthy_src))?;
    let mut out = AssetDescriptor::new(src)?;

    let mut extra = BTreeMap::new();
    for (key, value) in fields {
        match key.as_str() {
            "src" => {}
            "id" => out.id = scalar_string(value),
            "palettes" => out.palettes = palette_tags(value),
            "accent" => out.accent = scalar_string(value),
            "blend" => out.blend = scalar_string(value),
            "depth" => out.depth = scalar_string(value),
            "rotate" => out.rotate = scalar_string(value),
            "tiltBias" => out.tilt_bias = value.as_f64(),
            "playback" => out.playback = playback_range(value),
            _ => {
                extra.insert(key.clone(), value.clone());
            }
        }
    }
    out.extra = extra;
    Some(out)
}

// Empty strings, zero, false and null never name a file.
fn truthy_src(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn palette_tags(value: &Value) -> Vec<String> {
    let Value::Array(tags) = value else {
        return Vec::new();
    };
    tags.iter()
        .filter_map(|tag| tag.as_str().map(str::to_owned))
        .collect()
}

fn playback_range(value: &Value) -> Option<PlaybackRange> {
    let min = value.get("min")?.as_f64()?;
    let max = value.get("max")?.as_f64()?;
    PlaybackRange::new(min, max)
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/entry.rs"]
mod tests;
