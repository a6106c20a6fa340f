//! Build command: dispatch jobs and poll them to completion

use anyhow::{bail, Result};
use modkit_build::{BuildManager, BuildPipeline, JobStatus, ModkitConfig, SystemConverter};
use modkit_storage::StorageLayout;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub fn run(project_ids: &[String], json: bool, publish: Option<&str>) -> Result<()> {
    let config = ModkitConfig::load()?;
    let layout = StorageLayout::new(&config.storage_root);
    layout.ensure()?;

    let pipeline = BuildPipeline::new(
        layout.clone(),
        config.build_output.clone(),
        Arc::new(SystemConverter::detect()),
    );
    let manager = BuildManager::new(pipeline);

    for project_id in project_ids {
        let job = manager.start_build(project_id);
        println!("Started build {} for project '{}'", job.id, job.project_id);
    }

    // Poll the registry until every job is terminal, echoing progress
    // changes as they appear
    let mut last_seen: HashMap<String, (f64, String)> = HashMap::new();
    loop {
        let jobs = manager.list_jobs();
        for job in &jobs {
            let changed = last_seen
                .get(&job.id)
                .map(|(progress, message)| *progress != job.progress || *message != job.message)
                .unwrap_or(true);
            if changed {
                println!(
                    "[{}] {:>3.0}% {}",
                    job.project_id,
                    job.progress * 100.0,
                    job.message
                );
                last_seen.insert(job.id.clone(), (job.progress, job.message.clone()));
            }
        }
        if jobs.iter().all(|job| job.status.is_terminal()) {
            break;
        }
        thread::sleep(Duration::from_millis(100));
    }

    let jobs = manager.list_jobs();
    if json {
        println!("{}", serde_json::to_string_pretty(&jobs)?);
    } else {
        for job in &jobs {
            match job.status {
                JobStatus::Completed => {
                    let artifact = job
                        .artifact_path
                        .as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default();
                    println!("{}: completed -> {}", job.project_id, artifact);
                }
                JobStatus::Failed => println!("{}: failed: {}", job.project_id, job.message),
                _ => {}
            }
        }
    }

    if let Some(visibility) = publish {
        for job in jobs.iter().filter(|j| j.status == JobStatus::Completed) {
            let published = manager.publish(&job.id, &layout.workshop_root(), visibility)?;
            println!(
                "{}: published ({}) -> {}",
                job.project_id,
                visibility,
                published.display()
            );
        }
    }

    if jobs.iter().any(|job| job.status == JobStatus::Failed) {
        bail!("One or more builds failed");
    }
    Ok(())
}
