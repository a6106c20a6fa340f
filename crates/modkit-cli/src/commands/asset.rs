//! Asset management commands

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use modkit_build::ModkitConfig;
use modkit_storage::{import_asset, AssetKind, StorageLayout};
use serde_json::{Map, Value};
use std::path::Path;

#[derive(Subcommand)]
pub enum AssetCommands {
    /// Import an asset file into a project
    Add {
        /// Path to the asset file
        path: String,

        /// Project identifier
        #[arg(long)]
        project: String,

        /// Asset kind (texture or audio)
        #[arg(long)]
        kind: String,

        /// Inline JSON object written as the asset's sidecar metadata
        #[arg(long)]
        metadata: Option<String>,
    },
}

pub fn run(cmd: AssetCommands) -> Result<()> {
    match cmd {
        AssetCommands::Add {
            path,
            project,
            kind,
            metadata,
        } => add(&path, &project, &kind, metadata.as_deref()),
    }
}

fn add(path: &str, project: &str, kind: &str, metadata: Option<&str>) -> Result<()> {
    let kind = parse_kind(kind)?;
    let metadata = parse_metadata(kind, metadata)?;

    let config = ModkitConfig::load()?;
    let layout = StorageLayout::new(&config.storage_root);
    layout.ensure()?;

    let record = import_asset(&layout, project, kind, Path::new(path), metadata)?;
    println!(
        "Imported {} asset '{}' into project '{}'",
        record.kind, record.filename, record.project_id
    );
    Ok(())
}

fn parse_kind(kind: &str) -> Result<AssetKind> {
    match kind {
        "texture" => Ok(AssetKind::Texture),
        "audio" => Ok(AssetKind::Audio),
        other => bail!("Unknown asset kind '{}'; expected texture or audio", other),
    }
}

/// Parse and validate sidecar metadata. Each kind has fields the
/// packaging format expects to be present.
fn parse_metadata(kind: AssetKind, raw: Option<&str>) -> Result<Map<String, Value>> {
    let map = match raw {
        Some(raw) => {
            let value: Value =
                serde_json::from_str(raw).context("Metadata is not valid JSON")?;
            match value {
                Value::Object(map) => map,
                _ => bail!("Metadata must be a JSON object"),
            }
        }
        None => Map::new(),
    };

    let required: &[&str] = match kind {
        AssetKind::Texture => &["usage"],
        AssetKind::Audio => &["title", "composer"],
    };
    for field in required {
        if !map.contains_key(*field) {
            bail!("{} metadata must include '{}'", kind, field);
        }
    }
    Ok(map)
}
