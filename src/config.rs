//! Output defaults loaded from a TOML file.
//!
//! ```toml
//! compression = "zstd"
//! level = 9
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StreamError};
use crate::stream::{CompressionType, DEFAULT_LEVEL};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Codec used when the output name does not imply one
    pub compression: CompressionType,
    pub level: u32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::None,
            level: DEFAULT_LEVEL,
        }
    }
}

impl StreamConfig {
    /// `<config dir>/streamhandle/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("streamhandle").join("config.toml"))
    }

    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| StreamError::ReadError {
            type_name: std::any::type_name::<Self>(),
            file: origin.display().to_string(),
            reason: e.to_string(),
        })?;
        config.compression.validate_level(config.level)?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| StreamError::cannot_read(path, e))?;
        Self::from_toml_str(&text, path)
    }

    /// Load from [`default_path`](Self::default_path), falling back to defaults
    /// when no file is present.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }
}
