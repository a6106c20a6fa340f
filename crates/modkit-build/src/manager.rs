//! Asynchronous build execution
//!
//! Each job runs on its own dedicated thread, dispatched fire-and-forget
//! at creation time; the number of concurrent jobs is not bounded. The
//! thread owns all blocking work (file I/O, external converters) and
//! touches shared state only through the registry's guarded operations.
//! Pipeline errors terminate the job; they never reach the caller of
//! `start_build`, who observes outcomes by polling.

use crate::job::BuildJob;
use crate::pipeline::BuildPipeline;
use crate::publish::publish_artifact;
use crate::registry::JobRegistry;
use modkit_core::{ModkitError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

/// Creates build jobs and dispatches them to worker threads
pub struct BuildManager {
    pipeline: Arc<BuildPipeline>,
    registry: Arc<JobRegistry>,
}

impl BuildManager {
    pub fn new(pipeline: BuildPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            registry: Arc::new(JobRegistry::new()),
        }
    }

    /// Create a job, dispatch it on its own thread, and return the
    /// queued snapshot immediately
    pub fn start_build(&self, project_id: &str) -> BuildJob {
        let job = BuildJob::new(project_id);
        let snapshot = job.clone();
        self.registry.insert(job);

        info!(job = %snapshot.id, project = project_id, "build dispatched");
        let pipeline = Arc::clone(&self.pipeline);
        let registry = Arc::clone(&self.registry);
        let job_id = snapshot.id.clone();
        let project_id = project_id.to_string();
        thread::spawn(move || run_job(&pipeline, &registry, &job_id, &project_id));

        snapshot
    }

    /// Snapshot of one job
    pub fn get_job(&self, job_id: &str) -> Option<BuildJob> {
        self.registry.get(job_id)
    }

    /// Snapshot of every job, in creation order
    pub fn list_jobs(&self) -> Vec<BuildJob> {
        self.registry.list()
    }

    /// Publish a completed job's artifact into the workshop directory
    pub fn publish(
        &self,
        job_id: &str,
        workshop_root: &Path,
        visibility: &str,
    ) -> Result<PathBuf> {
        let job = self
            .registry
            .get(job_id)
            .ok_or_else(|| ModkitError::JobNotFound(job_id.to_string()))?;
        let published = publish_artifact(&job, workshop_root, visibility)?;
        info!(job = job_id, path = %published.display(), "artifact published");
        Ok(published)
    }
}

fn run_job(pipeline: &BuildPipeline, registry: &JobRegistry, job_id: &str, project_id: &str) {
    registry.mark_running(job_id);

    let progress = |_stage: &str, ratio: f64, message: &str| {
        registry.update_progress(job_id, ratio, message);
    };

    match pipeline.build(project_id, &progress) {
        Ok(artifact) => {
            info!(job = job_id, artifact = %artifact.display(), "build completed");
            registry.complete(job_id, artifact);
        }
        Err(err) => {
            warn!(job = job_id, error = %err, "build failed");
            registry.fail(job_id, &err.to_string());
        }
    }
}
