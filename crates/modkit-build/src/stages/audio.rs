//! Audio stage: validate and package audio tracks into `sound/`

use crate::stages::{asset_files, BuildStage};
use modkit_core::{ModkitError, Progress, Result};
use modkit_storage::{load_sidecar, save_metadata, sidecar_path, AssetKind, StorageLayout};
use std::fs;
use std::path::Path;

/// Copies audio tracks and their sidecar metadata into the working directory
pub struct PackageAudio {
    layout: StorageLayout,
}

impl PackageAudio {
    pub fn new(layout: StorageLayout) -> Self {
        Self { layout }
    }
}

impl BuildStage for PackageAudio {
    fn name(&self) -> &'static str {
        "audio"
    }

    fn run(&self, project_id: &str, work_dir: &Path, progress: &dyn Progress) -> Result<()> {
        let Some(source_root) = self.layout.audio_root(project_id) else {
            progress.report(self.name(), 1.0, "No audio assets");
            return Ok(());
        };

        let sound_dir = work_dir.join("sound");
        fs::create_dir_all(&sound_dir)?;

        let files = asset_files(&source_root)?;
        if files.is_empty() {
            progress.report(self.name(), 1.0, "No audio assets");
            return Ok(());
        }

        let total = files.len().max(1) as f64;
        for (index, file) in files.iter().enumerate() {
            // Validate before copying anything for this file
            if !AssetKind::Audio.accepts(file) {
                let described = file
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| format!(".{}", e))
                    .unwrap_or_else(|| {
                        // Extensionless files are reported by name
                        file.file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default()
                    });
                return Err(ModkitError::UnsupportedAudioFormat(described));
            }

            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let target = sound_dir.join(&name);
            fs::copy(file, &target)?;

            let metadata = load_sidecar(file)?;
            if !metadata.is_empty() {
                save_metadata(&sidecar_path(&target), &metadata)?;
            }

            progress.report(
                self.name(),
                (index + 1) as f64 / total,
                &format!("Packaged {}", name),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modkit_core::NoProgress;
    use std::path::PathBuf;
    use std::sync::Mutex;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("modkit_audio_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn setup(root: &Path) -> (StorageLayout, PathBuf, PathBuf) {
        let layout = StorageLayout::new(root);
        let assets = layout.ensure_asset_dir("p1", AssetKind::Audio).unwrap();
        let work = root.join("work");
        fs::create_dir_all(&work).unwrap();
        (layout, assets, work)
    }

    #[test]
    fn test_packages_allowed_formats_with_sidecars() {
        let root = temp_dir();
        let (layout, assets, work) = setup(&root);
        fs::write(assets.join("theme.ogg"), b"OggS").unwrap();
        fs::write(assets.join("theme.ogg.json"), r#"{"title": "Theme"}"#).unwrap();
        fs::write(assets.join("sting.wav"), b"RIFF").unwrap();

        let stage = PackageAudio::new(layout);
        stage.run("p1", &work, &NoProgress).unwrap();

        let sound = work.join("sound");
        assert!(sound.join("theme.ogg").exists());
        assert!(sound.join("theme.ogg.json").exists());
        assert!(sound.join("sting.wav").exists());
        assert!(!sound.join("sting.wav.json").exists());

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_rejects_unsupported_format() {
        let root = temp_dir();
        let (layout, assets, work) = setup(&root);
        fs::write(assets.join("track.mp3"), b"ID3").unwrap();

        let stage = PackageAudio::new(layout);
        let err = stage.run("p1", &work, &NoProgress).unwrap_err();
        assert!(matches!(err, ModkitError::UnsupportedAudioFormat(_)));
        assert!(err.to_string().contains(".mp3"));

        // The offending file was not partially copied
        assert!(!work.join("sound").join("track.mp3").exists());

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_rejects_extensionless_file_by_name() {
        let root = temp_dir();
        let (layout, assets, work) = setup(&root);
        fs::write(assets.join("readme"), b"not audio").unwrap();

        let stage = PackageAudio::new(layout);
        let err = stage.run("p1", &work, &NoProgress).unwrap_err();
        assert!(matches!(err, ModkitError::UnsupportedAudioFormat(_)));
        assert!(err.to_string().contains("readme"));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_no_audio_root_is_a_noop_that_completes() {
        let root = temp_dir();
        let layout = StorageLayout::new(&root);
        layout.ensure().unwrap();
        let work = root.join("work");
        fs::create_dir_all(&work).unwrap();

        let events = Mutex::new(Vec::new());
        let sink = |_: &str, ratio: f64, _: &str| {
            events.lock().unwrap().push(ratio);
        };
        let stage = PackageAudio::new(layout);
        stage.run("p1", &work, &sink).unwrap();

        assert_eq!(*events.lock().unwrap(), vec![1.0]);

        fs::remove_dir_all(&root).ok();
    }
}
