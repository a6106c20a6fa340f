//! Tool configuration
//!
//! Read from `modkit.toml` in the working directory when present, with
//! `MODKIT_STORAGE` and `MODKIT_BUILD_OUTPUT` environment overrides on
//! top. Everything has a default, so no config file is required.

use modkit_core::{ModkitError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name
pub const CONFIG_FILE: &str = "modkit.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModkitConfig {
    /// Base directory for projects and uploaded assets
    #[serde(default = "default_storage_root")]
    pub storage_root: PathBuf,
    /// Directory receiving build artifacts
    #[serde(default = "default_build_output")]
    pub build_output: PathBuf,
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("storage")
}

fn default_build_output() -> PathBuf {
    PathBuf::from("storage").join("builds")
}

impl Default for ModkitConfig {
    fn default() -> Self {
        Self {
            storage_root: default_storage_root(),
            build_output: default_build_output(),
        }
    }
}

impl ModkitConfig {
    /// Load `modkit.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if Path::new(CONFIG_FILE).exists() {
            Self::load_file(Path::new(CONFIG_FILE))?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse a config file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ModkitError::ConfigError(format!("Invalid {}: {}", path.display(), e)))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(root) = std::env::var("MODKIT_STORAGE") {
            self.storage_root = PathBuf::from(root);
        }
        if let Ok(output) = std::env::var("MODKIT_BUILD_OUTPUT") {
            self.build_output = PathBuf::from(output);
        }
    }
}
