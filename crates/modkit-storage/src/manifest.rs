//! Project manifest
//!
//! Optional `project.json` at the project root. Every field is optional;
//! the descriptor stage substitutes defaults for anything missing.

use crate::StorageLayout;
use modkit_core::{ModkitError, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// File name of the manifest inside a project directory
pub const MANIFEST_FILE: &str = "project.json";

/// Optional metadata describing a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub supported_version: Option<String>,
}

impl StorageLayout {
    /// Load a project's manifest, `None` when the file does not exist
    pub fn load_manifest(&self, project_id: &str) -> Result<Option<ProjectManifest>> {
        let path = self.project_dir(project_id).join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let manifest = serde_json::from_str(&content)
            .map_err(|e| ModkitError::ManifestError(format!("Invalid {}: {}", MANIFEST_FILE, e)))?;
        Ok(Some(manifest))
    }

    /// Write a project's manifest
    pub fn save_manifest(&self, project_id: &str, manifest: &ProjectManifest) -> Result<()> {
        let dir = self.ensure_project(project_id)?;
        let content = serde_json::to_string_pretty(manifest)?;
        fs::write(dir.join(MANIFEST_FILE), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("modkit_manifest_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_manifest_is_none() {
        let root = temp_dir();
        let layout = StorageLayout::new(&root);
        layout.ensure_project("p1").unwrap();

        assert!(layout.load_manifest("p1").unwrap().is_none());

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_manifest_roundtrip() {
        let root = temp_dir();
        let layout = StorageLayout::new(&root);

        let manifest = ProjectManifest {
            name: Some("Expanded Holdings".to_string()),
            version: Some("0.3".to_string()),
            tags: vec!["flavor".to_string(), "ui".to_string()],
            supported_version: None,
        };
        layout.save_manifest("p1", &manifest).unwrap();

        let loaded = layout.load_manifest("p1").unwrap().unwrap();
        assert_eq!(loaded.name.as_deref(), Some("Expanded Holdings"));
        assert_eq!(loaded.tags, vec!["flavor", "ui"]);
        assert!(loaded.supported_version.is_none());

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_partial_manifest_fills_defaults() {
        let root = temp_dir();
        let layout = StorageLayout::new(&root);
        let dir = layout.ensure_project("p1").unwrap();
        fs::write(dir.join(MANIFEST_FILE), r#"{"name": "Just a name"}"#).unwrap();

        let loaded = layout.load_manifest("p1").unwrap().unwrap();
        assert_eq!(loaded.name.as_deref(), Some("Just a name"));
        assert!(loaded.version.is_none());
        assert!(loaded.tags.is_empty());

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_invalid_manifest_is_an_error() {
        let root = temp_dir();
        let layout = StorageLayout::new(&root);
        let dir = layout.ensure_project("p1").unwrap();
        fs::write(dir.join(MANIFEST_FILE), "not json").unwrap();

        assert!(layout.load_manifest("p1").is_err());

        fs::remove_dir_all(&root).ok();
    }
}
