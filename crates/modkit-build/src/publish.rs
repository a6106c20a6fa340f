//! Workshop publishing
//!
//! A completed build's artifact can be copied into the layout's
//! `workshop/` directory. The copy gets a sidecar recording which job
//! produced it and the requested visibility. Only completed jobs with an
//! artifact are publishable.

use crate::job::{BuildJob, JobStatus};
use modkit_core::{ModkitError, Result};
use modkit_storage::{save_metadata, sidecar_path};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Visibility applied when none is requested
pub const DEFAULT_VISIBILITY: &str = "private";

/// Copy a completed job's artifact into the workshop directory.
///
/// The artifact keeps its file name; metadata travels as a sidecar
/// beside the copy.
pub fn publish_artifact(job: &BuildJob, workshop_root: &Path, visibility: &str) -> Result<PathBuf> {
    if job.status != JobStatus::Completed {
        return Err(ModkitError::StorageError(format!(
            "Build {} is {}; only completed builds can be published",
            job.id, job.status
        )));
    }
    let artifact = job.artifact_path.as_deref().ok_or_else(|| {
        ModkitError::StorageError(format!("Build {} has no artifact", job.id))
    })?;
    let name = artifact.file_name().ok_or_else(|| {
        ModkitError::StorageError(format!("Not a file: {}", artifact.display()))
    })?;

    fs::create_dir_all(workshop_root)?;
    let destination = workshop_root.join(name);
    fs::copy(artifact, &destination)?;

    let mut metadata = Map::new();
    metadata.insert("job_id".to_string(), Value::String(job.id.clone()));
    metadata.insert(
        "project_id".to_string(),
        Value::String(job.project_id.clone()),
    );
    metadata.insert(
        "visibility".to_string(),
        Value::String(visibility.to_string()),
    );
    save_metadata(&sidecar_path(&destination), &metadata)?;

    Ok(destination)
}
