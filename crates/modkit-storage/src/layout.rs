//! On-disk storage layout
//!
//! Everything modkit persists lives under a single base directory:
//! `projects/<id>` for project sources, `assets/textures/<id>` and
//! `assets/audio/<id>` for uploaded assets, and `workshop/` for published
//! artifacts.

use modkit_core::{ModkitError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Resolves every storage path from a configurable base directory
#[derive(Debug, Clone)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    /// Create a layout rooted at the given base directory
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Create the base directory structure if it does not exist yet
    pub fn ensure(&self) -> Result<()> {
        for dir in [
            self.root.clone(),
            self.projects_root(),
            self.textures_root(),
            self.audio_assets_root(),
            self.workshop_root(),
        ] {
            fs::create_dir_all(&dir)?;
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn projects_root(&self) -> PathBuf {
        self.root.join("projects")
    }

    fn textures_root(&self) -> PathBuf {
        self.root.join("assets").join("textures")
    }

    fn audio_assets_root(&self) -> PathBuf {
        self.root.join("assets").join("audio")
    }

    pub fn workshop_root(&self) -> PathBuf {
        self.root.join("workshop")
    }

    /// Directory holding a project's source files
    pub fn project_dir(&self, project_id: &str) -> PathBuf {
        self.projects_root().join(project_id)
    }

    /// Create a project's source directory and return it
    pub fn ensure_project(&self, project_id: &str) -> Result<PathBuf> {
        let dir = self.project_dir(project_id);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Texture asset directory for a project, `None` when the project has
    /// no texture assets
    pub fn texture_root(&self, project_id: &str) -> Option<PathBuf> {
        let dir = self.textures_root().join(project_id);
        dir.is_dir().then_some(dir)
    }

    /// Audio asset directory for a project, `None` when the project has
    /// no audio assets
    pub fn audio_root(&self, project_id: &str) -> Option<PathBuf> {
        let dir = self.audio_assets_root().join(project_id);
        dir.is_dir().then_some(dir)
    }

    /// Create the asset directory for a project and kind
    pub fn ensure_asset_dir(&self, project_id: &str, kind: crate::AssetKind) -> Result<PathBuf> {
        let dir = match kind {
            crate::AssetKind::Texture => self.textures_root().join(project_id),
            crate::AssetKind::Audio => self.audio_assets_root().join(project_id),
        };
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// All regular files under the project's source directory, recursive,
    /// sorted by path for deterministic iteration
    pub fn project_files(&self, project_id: &str) -> Result<Vec<PathBuf>> {
        let root = self.project_dir(project_id);
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry =
                entry.map_err(|e| ModkitError::StorageError(format!("Failed to walk project: {}", e)))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}
