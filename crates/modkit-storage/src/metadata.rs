//! Sidecar metadata files
//!
//! An asset `track.ogg` may carry a `track.ogg.json` beside it. Sidecars
//! are plain JSON objects and travel with the asset when it is packaged.

use modkit_core::Result;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension appended to the full asset file name
pub const METADATA_EXTENSION: &str = "json";

/// Path of the sidecar belonging to an asset file
pub fn sidecar_path(asset: &Path) -> PathBuf {
    let mut name = asset
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push('.');
    name.push_str(METADATA_EXTENSION);
    asset.with_file_name(name)
}

/// True when a path is itself a sidecar metadata file
pub fn is_sidecar(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(METADATA_EXTENSION))
        .unwrap_or(false)
}

/// Load the sidecar for an asset, empty when none exists
pub fn load_sidecar(asset: &Path) -> Result<Map<String, Value>> {
    let path = sidecar_path(asset);
    if !path.exists() {
        return Ok(Map::new());
    }
    let content = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write a metadata object as pretty-printed JSON
pub fn save_metadata(path: &Path, metadata: &Map<String, Value>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(metadata)?;
    fs::write(path, content)?;
    Ok(())
}
