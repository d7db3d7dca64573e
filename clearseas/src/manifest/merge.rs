use serde_json::Value;
use std::collections::HashMap;

use crate::manifest::descriptor::AssetDescriptor;
use crate::manifest::entry::normalize_list;

/// Merge canonical descriptors keyed by `src`.
///
/// Base entries are laid down first, then incoming ones. A repeated `src` replaces the stored
/// descriptor wholesale but keeps the slot where that `src` first appeared, so overlay updates do
/// not reshuffle the deck. New sources append.
pub fn merge_descriptors<B, I>(base: B, incoming: I) -> Vec<AssetDescriptor>
where
    B: IntoIterator<Item = AssetDescriptor>,
    I: IntoIterator<Item = AssetDescriptor>,
{
    let mut out = Vec::<AssetDescriptor>::new();
    let mut slot_by_src = HashMap::<String, usize>::new();

    for asset in base.into_iter().chain(incoming) {
        match slot_by_src.get(asset.src()) {
            Some(&slot) => out[slot] = asset,
            None => {
                slot_by_src.insert(asset.src.clone(), out.len());
                out.push(asset);
            }
        }
    }

    out
}

/// Normalize two loosely-typed lists and merge them (see [`merge_descriptors`]).
pub fn merge_asset_lists(base: &Value, incoming: &Value) -> Vec<AssetDescriptor> {
    merge_descriptors(normalize_list(base), normalize_list(incoming))
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/merge.rs"]
mod tests;
