//! Build pipeline stages
//!
//! Each stage consumes the project's stored sources and emits files into
//! the working directory, reporting its own `[0, 1]` sub-progress.

pub mod audio;
pub mod collect;
pub mod descriptor;
pub mod textures;

pub use audio::PackageAudio;
pub use collect::CollectFiles;
pub use descriptor::WriteDescriptor;
pub use textures::ConvertTextures;

use crate::converter::TextureConverter;
use modkit_core::{Progress, Result};
use modkit_storage::StorageLayout;
use std::path::Path;
use std::sync::Arc;

/// One ordered unit of pipeline work.
///
/// Stages are stateless between runs: everything they need arrives as
/// arguments, and failure is an ordinary `Err` the pipeline propagates
/// unchanged.
pub trait BuildStage: Send + Sync {
    /// Short name used in progress events
    fn name(&self) -> &'static str;

    /// Execute against the working directory
    fn run(&self, project_id: &str, work_dir: &Path, progress: &dyn Progress) -> Result<()>;
}

/// Regular files directly under an asset directory, sidecar metadata
/// excluded, sorted for deterministic iteration
pub(crate) fn asset_files(root: &Path) -> Result<Vec<std::path::PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && !modkit_storage::is_sidecar(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// The standard packaging stages in execution order
pub fn default_stages(
    layout: StorageLayout,
    converter: Arc<dyn TextureConverter>,
) -> Vec<Box<dyn BuildStage>> {
    vec![
        Box::new(CollectFiles::new(layout.clone())),
        Box::new(ConvertTextures::new(layout.clone(), converter)),
        Box::new(PackageAudio::new(layout.clone())),
        Box::new(WriteDescriptor::new(layout)),
    ]
}
