//! Build pipeline orchestration
//!
//! Runs the stages strictly in order against a scratch working directory,
//! maps each stage's sub-progress into an overall `[0, 1]` span, and
//! archives the result. With `n` stages every stage owns a span of
//! `1/(n+1)`; the final span is reserved for archiving, so overall
//! progress reaches exactly 1.0 only when the artifact exists.

use crate::archive::archive_directory;
use crate::converter::TextureConverter;
use crate::stages::{default_stages, BuildStage};
use modkit_core::{Progress, Result};
use modkit_storage::StorageLayout;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Transforms a stored project into a packaged archive
pub struct BuildPipeline {
    stages: Vec<Box<dyn BuildStage>>,
    build_root: PathBuf,
}

impl BuildPipeline {
    /// Pipeline with the standard packaging stages
    pub fn new(
        layout: StorageLayout,
        build_root: PathBuf,
        converter: Arc<dyn TextureConverter>,
    ) -> Self {
        Self {
            stages: default_stages(layout, converter),
            build_root,
        }
    }

    /// Pipeline over a custom stage list
    pub fn with_stages(stages: Vec<Box<dyn BuildStage>>, build_root: PathBuf) -> Self {
        Self { stages, build_root }
    }

    /// Run every stage, archive the working directory, and return the
    /// artifact path. The working directory is deleted on all exit paths.
    pub fn build(&self, project_id: &str, progress: &dyn Progress) -> Result<PathBuf> {
        let scratch = tempfile::Builder::new()
            .prefix(&format!("modkit-{}-", project_id))
            .tempdir()?;
        let work_dir = scratch.path().join("pkg");
        fs::create_dir_all(&work_dir)?;

        let span = 1.0 / (self.stages.len() + 1) as f64;
        for (index, stage) in self.stages.iter().enumerate() {
            let base = index as f64 * span;
            debug!(stage = stage.name(), project = project_id, "running stage");
            progress.report(stage.name(), base, &format!("Running {} stage", stage.name()));

            let mapped = |stage_name: &str, ratio: f64, message: &str| {
                progress.report(stage_name, base + ratio * span, message);
            };
            stage.run(project_id, &work_dir, &mapped)?;
        }

        progress.report(
            "archive",
            self.stages.len() as f64 * span,
            "Creating archive",
        );
        let artifact = self.archive(project_id, &work_dir)?;
        progress.report("archive", 1.0, "Build complete");
        Ok(artifact)
    }

    /// Archive names combine project id and a one-second timestamp; a
    /// counter suffix keeps rapid rebuilds of the same project distinct.
    fn archive(&self, project_id: &str, work_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(&self.build_root)?;
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let mut destination = self.build_root.join(format!("{}-{}.zip", project_id, stamp));
        let mut attempt = 1;
        while destination.exists() {
            destination = self
                .build_root
                .join(format!("{}-{}-{}.zip", project_id, stamp, attempt));
            attempt += 1;
        }

        archive_directory(work_dir, &destination)?;
        Ok(destination)
    }
}
