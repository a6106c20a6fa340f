//! Collect stage: copy the project's source tree into the working directory

use crate::stages::BuildStage;
use modkit_core::{ModkitError, Progress, Result};
use modkit_storage::StorageLayout;
use std::fs;
use std::path::Path;

/// Copies every project source file, preserving relative paths
pub struct CollectFiles {
    layout: StorageLayout,
}

impl CollectFiles {
    pub fn new(layout: StorageLayout) -> Self {
        Self { layout }
    }
}

impl BuildStage for CollectFiles {
    fn name(&self) -> &'static str {
        "collect"
    }

    fn run(&self, project_id: &str, work_dir: &Path, progress: &dyn Progress) -> Result<()> {
        let project_dir = self.layout.project_dir(project_id);
        let files = self.layout.project_files(project_id)?;

        if files.is_empty() {
            progress.report(self.name(), 1.0, "No project files to copy");
            return Ok(());
        }

        let total = files.len().max(1) as f64;
        for (index, file) in files.iter().enumerate() {
            let rel = file.strip_prefix(&project_dir).map_err(|_| {
                ModkitError::StorageError(format!(
                    "File outside project directory: {}",
                    file.display()
                ))
            })?;
            let target = work_dir.join(rel);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(file, &target)?;
            progress.report(
                self.name(),
                (index + 1) as f64 / total,
                &format!("Copied {}", rel.display()),
            );
        }
        Ok(())
    }
}
