//! Brand asset tooling for the Clear Seas sites.
//!
//! - A manifest of decorative images and videos, with loose-input normalization and a
//!   `src`-keyed merge ([`BrandManifest`], [`ManifestStore`])
//! - Deterministic per-slot asset selection with palette matching and a neutral fallback
//!   ([`select_asset`])
//! - Site-keyed asset lists with `extends` inheritance ([`SiteRegistry`])
//! - Build-time checks: manifest audit and HTML asset-reference scanning
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod audit;
mod foundation;
mod manifest;
mod scan;
mod select;
mod site;

pub use crate::foundation::error::{ClearSeasError, ClearSeasResult};

pub use crate::manifest::builtin::{builtin_images, builtin_videos};
pub use crate::manifest::descriptor::{AssetDescriptor, PlaybackRange, WILDCARD_PALETTE};
pub use crate::manifest::document::{AssetKind, BrandManifest};
pub use crate::manifest::entry::{AssetEntry, normalize_entry, normalize_list};
pub use crate::manifest::merge::{merge_asset_lists, merge_descriptors};
pub use crate::manifest::store::{ManifestStore, register_brand_assets};

pub use crate::select::selector::{
    SELECTION_INDEX_KEY, SelectionParams, SelectionRequest, SelectionResult, select_asset,
    select_from_value,
};

pub use crate::site::registry::{
    AssetMeta, DEFAULT_SITE_KEY, ResolvedSiteAssets, SiteEntry, SiteMeta, SiteRegistry,
    normalize_key, normalize_path_list,
};

pub use crate::audit::manifest::{
    AssetIssue, AuditReport, BRAND_MANIFEST_KEY, EXTRA_SITE_CODES, audit_brand_manifest,
    audit_site_registry,
};

pub use crate::scan::html::{
    ASSET_ATTRIBUTES, AssetRef, AssetRefExtractor, HtmlFileReport, HtmlScanner,
    normalize_asset_path, render_markdown,
};
