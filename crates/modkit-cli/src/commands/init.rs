//! Project initialization command

use anyhow::{bail, Result};
use modkit_build::ModkitConfig;
use modkit_storage::{ProjectManifest, StorageLayout, MANIFEST_FILE};

pub fn run(project_id: &str, name: Option<&str>) -> Result<()> {
    let config = ModkitConfig::load()?;
    let layout = StorageLayout::new(&config.storage_root);
    layout.ensure()?;

    let dir = layout.ensure_project(project_id)?;
    if dir.join(MANIFEST_FILE).exists() {
        bail!("Project '{}' already has a {}", project_id, MANIFEST_FILE);
    }

    let manifest = ProjectManifest {
        name: Some(
            name.map(str::to_string)
                .unwrap_or_else(|| format!("Modkit {}", project_id)),
        ),
        version: Some("1.0".to_string()),
        tags: Vec::new(),
        supported_version: Some("1.11.*".to_string()),
    };
    layout.save_manifest(project_id, &manifest)?;

    println!("Initialized project '{}' at {}", project_id, dir.display());
    Ok(())
}
