//! Zip archiving of the assembled working directory

use modkit_core::{ModkitError, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Compress `work_dir` into a zip archive at `destination`.
///
/// Entry names mirror the directory layout relative to `work_dir`, with
/// forward slashes on every platform.
pub fn archive_directory(work_dir: &Path, destination: &Path) -> Result<()> {
    let file = File::create(destination)?;
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(work_dir).sort_by_file_name() {
        let entry = entry
            .map_err(|e| ModkitError::ArchiveError(format!("Failed to walk build dir: {}", e)))?;
        let rel = entry
            .path()
            .strip_prefix(work_dir)
            .map_err(|e| ModkitError::ArchiveError(e.to_string()))?;
        if rel.as_os_str().is_empty() {
            continue;
        }
        let name = rel.to_string_lossy().replace('\\', "/");

        if entry.file_type().is_dir() {
            writer
                .add_directory(name.as_str(), options)
                .map_err(|e| ModkitError::ArchiveError(format!("Failed to add {}: {}", name, e)))?;
        } else {
            writer
                .start_file(name.as_str(), options)
                .map_err(|e| ModkitError::ArchiveError(format!("Failed to add {}: {}", name, e)))?;
            let mut source = File::open(entry.path())?;
            std::io::copy(&mut source, &mut writer)?;
        }
    }

    writer
        .finish()
        .map_err(|e| ModkitError::ArchiveError(format!("Failed to finish archive: {}", e)))?;
    Ok(())
}
