//! Descriptor stage: render the mod descriptor into the working directory

use crate::stages::BuildStage;
use modkit_core::{Progress, Result};
use modkit_storage::{ProjectManifest, StorageLayout};
use std::fs;
use std::path::Path;

/// File name of the rendered descriptor
pub const DESCRIPTOR_FILE: &str = "descriptor.mod";

const DEFAULT_VERSION: &str = "1.0";
const DEFAULT_SUPPORTED_VERSION: &str = "1.11.*";

/// Writes `descriptor.mod` from the project manifest, defaulting any
/// missing field
pub struct WriteDescriptor {
    layout: StorageLayout,
}

impl WriteDescriptor {
    pub fn new(layout: StorageLayout) -> Self {
        Self { layout }
    }
}

impl BuildStage for WriteDescriptor {
    fn name(&self) -> &'static str {
        "descriptor"
    }

    fn run(&self, project_id: &str, work_dir: &Path, progress: &dyn Progress) -> Result<()> {
        let manifest = self.layout.load_manifest(project_id)?.unwrap_or_default();
        let descriptor = render_descriptor(project_id, &manifest);
        fs::write(work_dir.join(DESCRIPTOR_FILE), descriptor)?;
        progress.report(self.name(), 1.0, "Descriptor generated");
        Ok(())
    }
}

/// Render the flat key/value descriptor text.
///
/// The `tags` statement is omitted entirely when there are no tags.
pub fn render_descriptor(project_id: &str, manifest: &ProjectManifest) -> String {
    let name = manifest
        .name
        .clone()
        .unwrap_or_else(|| format!("Modkit {}", project_id));
    let version = manifest.version.as_deref().unwrap_or(DEFAULT_VERSION);
    let supported_version = manifest
        .supported_version
        .as_deref()
        .unwrap_or(DEFAULT_SUPPORTED_VERSION);

    let mut lines = vec![
        format!("version=\"{}\"", version),
        format!("name=\"{}\"", name),
        format!("supported_version=\"{}\"", supported_version),
    ];
    if !manifest.tags.is_empty() {
        lines.push(format!("tags={{ {} }}", manifest.tags.join(",")));
    }
    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use modkit_core::NoProgress;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("modkit_descriptor_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_defaults_without_manifest() {
        let rendered = render_descriptor("abc", &ProjectManifest::default());
        assert_eq!(
            rendered,
            "version=\"1.0\"\nname=\"Modkit abc\"\nsupported_version=\"1.11.*\"\n"
        );
        assert!(!rendered.contains("tags"));
    }

    #[test]
    fn test_tags_rendered_comma_separated() {
        let manifest = ProjectManifest {
            tags: vec!["flavor".to_string(), "ui".to_string()],
            ..Default::default()
        };
        let rendered = render_descriptor("abc", &manifest);
        assert!(rendered.contains("tags={ flavor,ui }\n"));
    }

    #[test]
    fn test_manifest_values_win_over_defaults() {
        let manifest = ProjectManifest {
            name: Some("Expanded Holdings".to_string()),
            version: Some("2.1".to_string()),
            tags: Vec::new(),
            supported_version: Some("1.12.*".to_string()),
        };
        let rendered = render_descriptor("abc", &manifest);
        assert!(rendered.contains("name=\"Expanded Holdings\""));
        assert!(rendered.contains("version=\"2.1\""));
        assert!(rendered.contains("supported_version=\"1.12.*\""));
    }

    #[test]
    fn test_stage_writes_descriptor_and_completes() {
        let root = temp_dir();
        let layout = StorageLayout::new(&root);
        layout.ensure_project("abc").unwrap();
        let work = root.join("work");
        fs::create_dir_all(&work).unwrap();

        let stage = WriteDescriptor::new(layout);
        stage.run("abc", &work, &NoProgress).unwrap();

        let content = fs::read_to_string(work.join(DESCRIPTOR_FILE)).unwrap();
        assert!(content.contains("name=\"Modkit abc\""));

        fs::remove_dir_all(&root).ok();
    }
}
