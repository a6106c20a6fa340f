//! Modkit Storage - project and asset storage layout
//!
//! Owns the on-disk layout the build pipeline reads from: project source
//! trees, per-project texture and audio asset directories, sidecar
//! metadata, and the optional project manifest.

mod asset;
mod layout;
mod manifest;
mod metadata;

pub use asset::{import_asset, AssetKind, AssetRecord};
pub use layout::StorageLayout;
pub use manifest::{ProjectManifest, MANIFEST_FILE};
pub use metadata::{is_sidecar, load_sidecar, save_metadata, sidecar_path, METADATA_EXTENSION};
