use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, Result};

/// Main configuration for the Overlay-Compositor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// External renderer settings
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string(),
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.render.validate()
    }
}

/// External renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Renderer binary name or path
    pub binary: String,

    /// Video codec for encoded output
    pub codec: String,

    /// Output quality (0-100, mapped onto the codec's CRF range)
    pub quality: u8,

    /// Output pixel format
    pub pixel_format: String,

    /// Overwrite existing destination files
    pub overwrite: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            binary: "ffmpeg".to_string(),
            codec: "libx264".to_string(),
            quality: 75,
            pixel_format: "yuv420p".to_string(),
            overwrite: true,
        }
    }
}

impl RenderConfig {
    /// Map the 0-100 quality scale onto the codec's 51-0 CRF scale
    pub fn crf(&self) -> u8 {
        (51 - ((self.quality as f32 / 100.0) * 51.0) as u8).clamp(0, 51)
    }

    fn validate(&self) -> Result<()> {
        if self.binary.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "render.binary".to_string(),
                value: "<empty>".to_string(),
            }
            .into());
        }

        if self.codec.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "render.codec".to_string(),
                value: "<empty>".to_string(),
            }
            .into());
        }

        if self.quality > 100 {
            return Err(ConfigError::InvalidValue {
                key: "render.quality".to_string(),
                value: self.quality.to_string(),
            }
            .into());
        }

        Ok(())
    }
}
