//! Asset import
//!
//! Uploaded assets are validated against a per-kind extension allow-list,
//! copied into the project's asset directory, and optionally paired with a
//! sidecar metadata file.

use crate::metadata::{save_metadata, sidecar_path};
use crate::StorageLayout;
use modkit_core::{ModkitError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::Path;

/// The kind of asset being imported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Texture,
    Audio,
}

impl AssetKind {
    /// Extensions accepted for this kind, lowercase without the dot
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            AssetKind::Texture => &["dds", "png", "tga", "jpg", "jpeg"],
            AssetKind::Audio => &["ogg", "wav"],
        }
    }

    /// Whether the file extension is acceptable for this kind
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let ext = e.to_ascii_lowercase();
                self.allowed_extensions().contains(&ext.as_str())
            })
            .unwrap_or(false)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Texture => write!(f, "texture"),
            AssetKind::Audio => write!(f, "audio"),
        }
    }
}

/// Snapshot of an imported asset
#[derive(Debug, Clone, Serialize)]
pub struct AssetRecord {
    pub project_id: String,
    pub filename: String,
    pub kind: AssetKind,
    pub metadata: Map<String, Value>,
}

/// Copy an asset file into a project's asset directory.
///
/// Rejects files whose extension is not in the kind's allow-list. A
/// non-empty metadata object is written as a sidecar beside the copy.
pub fn import_asset(
    layout: &StorageLayout,
    project_id: &str,
    kind: AssetKind,
    source: &Path,
    metadata: Map<String, Value>,
) -> Result<AssetRecord> {
    let described = source
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_else(|| {
            // Extensionless files are reported by name
            source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
    if !kind.accepts(source) {
        return Err(match kind {
            AssetKind::Texture => ModkitError::UnsupportedTextureFormat(described),
            AssetKind::Audio => ModkitError::UnsupportedAudioFormat(described),
        });
    }

    let filename = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ModkitError::StorageError(format!("Not a file: {}", source.display())))?;

    let dest_dir = layout.ensure_asset_dir(project_id, kind)?;
    let destination = dest_dir.join(&filename);
    fs::copy(source, &destination)?;

    if !metadata.is_empty() {
        save_metadata(&sidecar_path(&destination), &metadata)?;
    }

    Ok(AssetRecord {
        project_id: project_id.to_string(),
        filename,
        kind,
        metadata,
    })
}
