//! Texture converter discovery and invocation
//!
//! DDS conversion is delegated to whatever external tool is installed.
//! General raster converters (ImageMagick) are probed before the
//! game-specific `texconv` so the common case wins.

use modkit_core::{ModkitError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// External tools that can produce DDS textures, in probe order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    Magick,
    Convert,
    Texconv,
}

impl Converter {
    pub const PROBE_ORDER: [Converter; 3] =
        [Converter::Magick, Converter::Convert, Converter::Texconv];

    /// Binary name looked up on the execution path
    pub fn binary(&self) -> &'static str {
        match self {
            Converter::Magick => "magick",
            Converter::Convert => "convert",
            Converter::Texconv => "texconv",
        }
    }

    /// Parse a converter name, e.g. from configuration
    pub fn from_name(name: &str) -> Result<Converter> {
        match name {
            "magick" => Ok(Converter::Magick),
            "convert" => Ok(Converter::Convert),
            "texconv" => Ok(Converter::Texconv),
            other => Err(ModkitError::UnsupportedConverter(other.to_string())),
        }
    }

    /// First converter found on the execution path, or `None`
    pub fn resolve() -> Option<Converter> {
        Self::PROBE_ORDER
            .iter()
            .copied()
            .find(|c| find_in_path(c.binary()).is_some())
    }

    /// Build the conversion command for `source` -> `destination`
    pub fn command(&self, source: &Path, destination: &Path) -> Command {
        match self {
            Converter::Texconv => {
                let out_dir = destination.parent().unwrap_or_else(|| Path::new("."));
                let mut cmd = Command::new(self.binary());
                cmd.args(["-f", "BC7_UNORM", "-y", "-o"])
                    .arg(out_dir)
                    .arg(source);
                cmd
            }
            Converter::Magick | Converter::Convert => {
                let mut cmd = Command::new(self.binary());
                cmd.arg(source).arg(destination);
                cmd
            }
        }
    }
}

fn find_in_path(binary: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path) {
        let candidate = dir.join(binary);
        if candidate.is_file() {
            return Some(candidate);
        }
        #[cfg(windows)]
        {
            let candidate = dir.join(format!("{}.exe", binary));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Seam between the texture stage and whatever produces DDS files.
///
/// Tests substitute a fake; production uses `SystemConverter`.
pub trait TextureConverter: Send + Sync {
    /// Produce `destination` from `source`, which is not already DDS
    fn convert(&self, source: &Path, destination: &Path) -> Result<()>;
}

/// Converter selection made once, at pipeline construction time
pub struct SystemConverter {
    converter: Option<Converter>,
}

impl SystemConverter {
    /// Probe the execution path for an installed converter
    pub fn detect() -> Self {
        Self {
            converter: Converter::resolve(),
        }
    }

    /// Use a fixed converter choice (or none)
    pub fn with(converter: Option<Converter>) -> Self {
        Self { converter }
    }

    pub fn converter(&self) -> Option<Converter> {
        self.converter
    }
}

impl TextureConverter for SystemConverter {
    fn convert(&self, source: &Path, destination: &Path) -> Result<()> {
        let Some(converter) = self.converter else {
            return Err(ModkitError::ConversionFailed(
                "no converter available (install ImageMagick or texconv)".to_string(),
            ));
        };

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        let output = converter.command(source, destination).output()?;
        if !output.status.success() {
            let diagnostics = String::from_utf8_lossy(&output.stderr);
            return Err(ModkitError::ConversionFailed(format!(
                "{} exited with {} converting {}: {}",
                converter.binary(),
                output.status,
                source.display(),
                diagnostics.trim()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_order_prefers_raster_converters() {
        assert_eq!(
            Converter::PROBE_ORDER,
            [Converter::Magick, Converter::Convert, Converter::Texconv]
        );
    }

    #[test]
    fn test_from_name_rejects_unknown() {
        assert_eq!(Converter::from_name("magick").unwrap(), Converter::Magick);
        let err = Converter::from_name("nvcompress").unwrap_err();
        assert!(matches!(err, ModkitError::UnsupportedConverter(_)));
    }

    #[test]
    fn test_magick_command_shape() {
        let cmd = Converter::Magick.command(Path::new("in.png"), Path::new("out/gfx/in.dds"));
        assert_eq!(cmd.get_program(), "magick");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_os_string()).collect();
        assert_eq!(args, ["in.png", "out/gfx/in.dds"]);
    }

    #[test]
    fn test_texconv_command_shape() {
        let cmd = Converter::Texconv.command(Path::new("in.png"), Path::new("out/gfx/in.dds"));
        assert_eq!(cmd.get_program(), "texconv");
        let args: Vec<_> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args, ["-f", "BC7_UNORM", "-y", "-o", "out/gfx", "in.png"]);
    }

    #[test]
    fn test_missing_converter_fails_conversion() {
        let converter = SystemConverter::with(None);
        let err = converter
            .convert(Path::new("a.png"), Path::new("b.dds"))
            .unwrap_err();
        assert!(matches!(err, ModkitError::ConversionFailed(_)));
        assert!(err.to_string().contains("no converter available"));
    }
}
