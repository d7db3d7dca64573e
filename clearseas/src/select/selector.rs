use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::manifest::descriptor::AssetDescriptor;
use crate::manifest::entry::normalize_list;

/// Owned selection knobs, as read from JSON or the command line.
///
/// Field names follow the site's JSON (`preferNeutral`). Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionParams {
    /// Explicit visiting order; values are wrapped into range.
    pub order: Option<Vec<i64>>,
    /// Rotation seed.
    pub seed: i64,
    /// Added to `seed`; step it to round-robin through the candidates.
    pub offset: i64,
    /// Palette the slot asks for.
    pub palette: Option<String>,
    /// Fall back to a neutral asset before the rotation head when no palette matches.
    pub prefer_neutral: bool,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            order: None,
            seed: 0,
            offset: 0,
            palette: None,
            prefer_neutral: true,
        }
    }
}

/// One selection over a borrowed candidate list.
#[derive(Clone, Copy, Debug)]
pub struct SelectionRequest<'a> {
    assets: &'a [AssetDescriptor],
    order: Option<&'a [i64]>,
    seed: i64,
    offset: i64,
    palette: Option<&'a str>,
    prefer_neutral: bool,
}

impl<'a> SelectionRequest<'a> {
    /// Request with default knobs: natural order, seed 0, offset 0, no palette, prefer neutral.
    pub fn new(assets: &'a [AssetDescriptor]) -> Self {
        Self {
            assets,
            order: None,
            seed: 0,
            offset: 0,
            palette: None,
            prefer_neutral: true,
        }
    }

    /// Request driven by owned params.
    pub fn with_params(assets: &'a [AssetDescriptor], params: &'a SelectionParams) -> Self {
        Self {
            assets,
            order: params.order.as_deref(),
            seed: params.seed,
            offset: params.offset,
            palette: params.palette.as_deref(),
            prefer_neutral: params.prefer_neutral,
        }
    }

    /// Visit candidates in this order instead of `0..len`.
    pub fn order(mut self, order: &'a [i64]) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the seed.
    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the offset.
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    /// Ask for a palette.
    pub fn palette(mut self, palette: &'a str) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Toggle the neutral fallback.
    pub fn prefer_neutral(mut self, prefer_neutral: bool) -> Self {
        self.prefer_neutral = prefer_neutral;
        self
    }
}

/// Key the resolved index is written under when a result is serialized next to the
/// descriptor's own fields.
pub const SELECTION_INDEX_KEY: &str = "__index";

/// The chosen descriptor and its index in the candidate list as given (before rotation).
///
/// Serializes flat: the descriptor's fields plus `__index`. A pass-through `__index` field on the
/// descriptor is dropped from the copy so the resolved index always wins.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SelectionResult {
    /// Position in the candidate list.
    #[serde(rename = "__index")]
    pub index: usize,
    /// Copy of the chosen descriptor.
    #[serde(flatten)]
    pub asset: AssetDescriptor,
}

/// Deterministically pick one asset.
///
/// The visiting order is rotated left by `(seed + offset) mod len`. The first palette match in
/// that rotation wins; failing that, the first neutral asset (when `prefer_neutral`); failing
/// that, the rotation head. Returns `None` only when there are no candidates.
pub fn select_asset(request: &SelectionRequest<'_>) -> Option<SelectionResult> {
    let assets = request.assets;
    let total = assets.len();
    if total == 0 {
        return None;
    }

    let mut order = visiting_order(request.order, total);
    if order.is_empty() {
        return None;
    }
    let start = cycle_start(request.seed, request.offset, order.len());
    order.rotate_left(start);

    let palette_match = || {
        let palette = request.palette.filter(|p| !p.is_empty())?;
        order
            .iter()
            .copied()
            .find(|&i| assets[i].matches_palette(palette))
    };
    let neutral_match = || {
        if !request.prefer_neutral {
            return None;
        }
        order.iter().copied().find(|&i| assets[i].is_neutral())
    };
    let rotation_head = || order.first().copied();

    let index = palette_match()
        .or_else(neutral_match)
        .or_else(rotation_head)?;

    let mut asset = assets[index].clone();
    asset.extra.remove(SELECTION_INDEX_KEY);
    Some(SelectionResult { index, asset })
}

/// Select from a loosely-typed JSON request
/// (`{assets, order, seed, offset, palette, preferNeutral}`).
///
/// Mirrors the page-level binding: non-array `assets` or `order` count as empty, non-integer
/// order values are skipped and missing knobs take their defaults.
pub fn select_from_value(request: &Value) -> Option<SelectionResult> {
    let assets = normalize_list(request.get("assets").unwrap_or(&Value::Null));
    let order: Option<Vec<i64>> = request
        .get("order")
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(Value::as_i64).collect());

    let params = SelectionParams {
        order,
        seed: request.get("seed").and_then(Value::as_i64).unwrap_or(0),
        offset: request.get("offset").and_then(Value::as_i64).unwrap_or(0),
        palette: request
            .get("palette")
            .and_then(Value::as_str)
            .map(str::to_owned),
        prefer_neutral: request
            .get("preferNeutral")
            .and_then(Value::as_bool)
            .unwrap_or(true),
    };
    select_asset(&SelectionRequest::with_params(&assets, &params))
}

fn visiting_order(order: Option<&[i64]>, total: usize) -> Vec<usize> {
    match order {
        Some(values) if !values.is_empty() => {
            let modulus = total as i64;
            values
                .iter()
                .map(|&v| v.rem_euclid(modulus) as usize)
                .collect()
        }
        _ => (0..total).collect(),
    }
}

// Euclidean remainder so negative seeds wrap the same way order values do. The sum is taken in
// i128 so extreme seeds cannot overflow.
fn cycle_start(seed: i64, offset: i64, len: usize) -> usize {
    (i128::from(seed) + i128::from(offset)).rem_euclid(len as i128) as usize
}

#[cfg(test)]
#[path = "../../tests/unit/select/selector.rs"]
mod tests;
