use std::sync::{OnceLock, PoisonError, RwLock};

use crate::manifest::descriptor::AssetDescriptor;
use crate::manifest::document::{AssetKind, BrandManifest};

/// Shared, mergeable brand asset registry.
///
/// Holds the live merged collections plus the last manifest handed to [`ManifestStore::register`]
/// (kept as an informational snapshot, never merged). Merging is the only mutation; the store
/// never shrinks. Writers are serialized by the inner lock.
#[derive(Debug, Default)]
pub struct ManifestStore {
    assets: RwLock<BrandManifest>,
    last_registered: RwLock<Option<BrandManifest>>,
}

impl ManifestStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the built-in manifest already registered.
    pub fn with_builtin() -> Self {
        let store = Self::new();
        store.register(&BrandManifest::builtin());
        store
    }

    /// Process-wide store, seeded with the built-in manifest on first use.
    pub fn global() -> &'static ManifestStore {
        static GLOBAL: OnceLock<ManifestStore> = OnceLock::new();
        GLOBAL.get_or_init(ManifestStore::with_builtin)
    }

    /// Merge `incoming` into the live collections and return the updated contents.
    pub fn merge(&self, incoming: &BrandManifest) -> BrandManifest {
        let mut assets = self.assets.write().unwrap_or_else(PoisonError::into_inner);
        assets.merge(incoming);
        tracing::debug!(
            images = assets.images.len(),
            videos = assets.videos.len(),
            "merged brand assets"
        );
        assets.clone()
    }

    /// Merge `manifest` and remember it as the last registered manifest.
    pub fn register(&self, manifest: &BrandManifest) -> BrandManifest {
        let merged = self.merge(manifest);
        *self
            .last_registered
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(manifest.clone());
        merged
    }

    /// Copy of the live collections.
    pub fn snapshot(&self) -> BrandManifest {
        self.assets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Copy of one live collection.
    pub fn assets(&self, kind: AssetKind) -> Vec<AssetDescriptor> {
        self.assets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .assets(kind)
            .to_vec()
    }

    /// The manifest most recently passed to [`ManifestStore::register`].
    pub fn last_registered(&self) -> Option<BrandManifest> {
        self.last_registered
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Register a manifest with a host store.
///
/// `manifest` defaults to [`BrandManifest::builtin`]. With a host, the manifest is merged and
/// recorded and the updated store contents are returned. Without one nothing is published and
/// the manifest comes back unchanged.
pub fn register_brand_assets(
    host: Option<&ManifestStore>,
    manifest: Option<BrandManifest>,
) -> BrandManifest {
    let manifest = manifest.unwrap_or_else(BrandManifest::builtin);
    match host {
        Some(store) => store.register(&manifest),
        None => manifest,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/store.rs"]
mod tests;
