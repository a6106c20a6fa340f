//! Build job records
//!
//! A job tracks one execution of the pipeline. Records live only inside
//! the registry; everything handed to callers is a value snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Lifecycle of a build job.
///
/// `queued -> running -> completed | failed`; the last two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "queued"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One tracked execution of the build pipeline for a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildJob {
    /// Unique job id, assigned at creation
    pub id: String,
    /// Project the build reads from
    pub project_id: String,
    pub status: JobStatus,
    /// Overall progress in `[0.0, 1.0]`, non-decreasing until terminal
    pub progress: f64,
    /// Current step description, or the terminal error text
    pub message: String,
    /// Set exactly once, when the job completes
    pub artifact_path: Option<PathBuf>,
    /// Epoch seconds
    pub created_at: f64,
    /// Epoch seconds, refreshed on every mutation
    pub updated_at: f64,
}

impl BuildJob {
    /// Fresh queued job with a generated id
    pub fn new(project_id: &str) -> Self {
        let now = epoch_seconds();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            project_id: project_id.to_string(),
            status: JobStatus::Queued,
            progress: 0.0,
            message: "Queued".to_string(),
            artifact_path: None,
            created_at: now,
            updated_at: now,
        }
    }
}

pub(crate) fn epoch_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
