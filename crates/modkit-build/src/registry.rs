//! Concurrency-safe store of job records
//!
//! The registry exclusively owns every `BuildJob`. A single mutex guards
//! the table; critical sections are field assignment only, and callers
//! always receive clones. Terminal records are never mutated again.

use crate::job::{epoch_seconds, BuildJob, JobStatus};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Default)]
struct JobTable {
    jobs: HashMap<String, BuildJob>,
    /// Insertion order, for stable `list` snapshots
    order: Vec<String>,
}

/// In-memory job store shared between the executor and observers
#[derive(Default)]
pub struct JobRegistry {
    table: Mutex<JobTable>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly created job
    pub fn insert(&self, job: BuildJob) {
        let mut table = self.lock();
        table.order.push(job.id.clone());
        table.jobs.insert(job.id.clone(), job);
    }

    /// Snapshot of one job
    pub fn get(&self, job_id: &str) -> Option<BuildJob> {
        self.lock().jobs.get(job_id).cloned()
    }

    /// Snapshot of every job, in insertion order
    pub fn list(&self) -> Vec<BuildJob> {
        let table = self.lock();
        table
            .order
            .iter()
            .filter_map(|id| table.jobs.get(id).cloned())
            .collect()
    }

    /// Mark a job running with its initial message
    pub fn mark_running(&self, job_id: &str) {
        self.mutate(job_id, |job| {
            job.status = JobStatus::Running;
            job.message = "Starting build".to_string();
        });
    }

    /// Record stage progress for a running job
    pub fn update_progress(&self, job_id: &str, ratio: f64, message: &str) {
        self.mutate(job_id, |job| {
            job.status = JobStatus::Running;
            job.progress = ratio;
            job.message = message.to_string();
        });
    }

    /// Transition a job to its successful terminal state
    pub fn complete(&self, job_id: &str, artifact_path: PathBuf) {
        self.mutate(job_id, |job| {
            job.status = JobStatus::Completed;
            job.progress = 1.0;
            job.message = "Build completed".to_string();
            job.artifact_path = Some(artifact_path);
        });
    }

    /// Transition a job to its failed terminal state
    pub fn fail(&self, job_id: &str, message: &str) {
        self.mutate(job_id, |job| {
            job.status = JobStatus::Failed;
            job.message = message.to_string();
        });
    }

    /// Apply a mutation under the lock, skipping unknown or terminal jobs
    fn mutate<F: FnOnce(&mut BuildJob)>(&self, job_id: &str, apply: F) {
        let mut table = self.lock();
        if let Some(job) = table.jobs.get_mut(job_id) {
            if job.status.is_terminal() {
                return;
            }
            apply(job);
            job.updated_at = epoch_seconds();
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, JobTable> {
        // A panicking writer cannot leave a half-applied record; recover
        // the table instead of propagating the poison
        self.table.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_get_returns_snapshots() {
        let registry = JobRegistry::new();
        let job = BuildJob::new("p1");
        let id = job.id.clone();
        registry.insert(job);

        let mut snapshot = registry.get(&id).unwrap();
        snapshot.message = "mutated locally".to_string();
        assert_eq!(registry.get(&id).unwrap().message, "Queued");
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let registry = JobRegistry::new();
        let first = BuildJob::new("a");
        let second = BuildJob::new("b");
        let (id_a, id_b) = (first.id.clone(), second.id.clone());
        registry.insert(first);
        registry.insert(second);

        let ids: Vec<String> = registry.list().into_iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![id_a, id_b]);
    }

    #[test]
    fn test_update_progress_marks_running_and_bumps_updated_at() {
        let registry = JobRegistry::new();
        let job = BuildJob::new("p1");
        let id = job.id.clone();
        let created = job.updated_at;
        registry.insert(job);

        registry.update_progress(&id, 0.4, "Copied file");
        let job = registry.get(&id).unwrap();
        assert_eq!(job.status, JobStatus::Running);
        assert_eq!(job.progress, 0.4);
        assert_eq!(job.message, "Copied file");
        assert!(job.updated_at >= created);
    }

    #[test]
    fn test_terminal_states_are_immutable() {
        let registry = JobRegistry::new();
        let job = BuildJob::new("p1");
        let id = job.id.clone();
        registry.insert(job);

        registry.fail(&id, "stage exploded");
        registry.update_progress(&id, 0.9, "late progress");
        registry.complete(&id, PathBuf::from("/tmp/out.zip"));

        let job = registry.get(&id).unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.message, "stage exploded");
        assert!(job.artifact_path.is_none());
    }

    #[test]
    fn test_complete_sets_artifact_and_full_progress() {
        let registry = JobRegistry::new();
        let job = BuildJob::new("p1");
        let id = job.id.clone();
        registry.insert(job);

        registry.complete(&id, PathBuf::from("/tmp/p1.zip"));
        let job = registry.get(&id).unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.progress, 1.0);
        assert_eq!(job.artifact_path.as_deref(), Some(std::path::Path::new("/tmp/p1.zip")));
    }

    #[test]
    fn test_concurrent_inserts_lose_nothing() {
        let registry = Arc::new(JobRegistry::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let registry = Arc::clone(&registry);
            handles.push(std::thread::spawn(move || {
                let job = BuildJob::new("p1");
                let id = job.id.clone();
                registry.insert(job);
                id
            }));
        }

        let mut ids: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
        assert_eq!(registry.list().len(), 16);
    }
}
