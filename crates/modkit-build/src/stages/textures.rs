//! Texture stage: produce DDS files in the working directory's `gfx/`

use crate::converter::TextureConverter;
use crate::stages::{asset_files, BuildStage};
use modkit_core::{Progress, Result};
use modkit_storage::StorageLayout;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Converts every texture asset to DDS, copying sources that already are
pub struct ConvertTextures {
    layout: StorageLayout,
    converter: Arc<dyn TextureConverter>,
}

impl ConvertTextures {
    pub fn new(layout: StorageLayout, converter: Arc<dyn TextureConverter>) -> Self {
        Self { layout, converter }
    }
}

impl BuildStage for ConvertTextures {
    fn name(&self) -> &'static str {
        "textures"
    }

    fn run(&self, project_id: &str, work_dir: &Path, progress: &dyn Progress) -> Result<()> {
        let Some(source_root) = self.layout.texture_root(project_id) else {
            progress.report(self.name(), 1.0, "No texture assets");
            return Ok(());
        };

        let gfx_dir = work_dir.join("gfx");
        fs::create_dir_all(&gfx_dir)?;

        let files = asset_files(&source_root)?;
        if files.is_empty() {
            progress.report(self.name(), 1.0, "No texture assets");
            return Ok(());
        }

        let total = files.len().max(1) as f64;
        for (index, file) in files.iter().enumerate() {
            let stem = file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let target = gfx_dir.join(format!("{}.dds", stem));

            let already_dds = file
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("dds"))
                .unwrap_or(false);
            if already_dds {
                fs::copy(file, &target)?;
            } else {
                self.converter.convert(file, &target)?;
            }

            let name = file.file_name().map(|n| n.to_string_lossy().into_owned());
            progress.report(
                self.name(),
                (index + 1) as f64 / total,
                &format!("Processed {}", name.unwrap_or_default()),
            );
        }
        Ok(())
    }
}
