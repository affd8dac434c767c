use thiserror::Error;

/// Main error type for the Overlay-Compositor library
#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Style resolution and lookup errors
///
/// These all surface synchronously, before any render dispatch. The single
/// exception to fail-fast styling is anchor names: an unrecognized anchor
/// degrades to the family default instead of erroring (see `position`).
#[derive(Error, Debug)]
pub enum StyleError {
    #[error("Style family not found: {name}")]
    NotFound { name: String },

    #[error("Preset not found: {family}/{name}")]
    PresetNotFound { family: String, name: String },

    #[error("Style configuration invalid: {details}")]
    InvalidConfig { details: String },
}

/// External renderer errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// The renderer reported a failure; the diagnostic text is passed
    /// through verbatim.
    #[error("Renderer failed: {reason}")]
    Failure { reason: String },

    #[error("Renderer binary not available: {binary}")]
    Unavailable { binary: String },
}

/// Source media acquisition errors, reported by the collaborator layer and
/// only propagated by this crate
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Unsupported quality selector: {quality}")]
    UnsupportedQuality { quality: String },

    #[error("Source unavailable: {url} - {reason}")]
    Unavailable { url: String, reason: String },
}

/// Configuration-file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using OverlayError
pub type Result<T> = std::result::Result<T, OverlayError>;

impl OverlayError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Style(StyleError::NotFound { name }) => {
                format!("Style '{}' not found. Available styles: neon, glass, glitch, holo, retro", name)
            }
            Self::Style(StyleError::PresetNotFound { family, name }) => {
                format!("Style '{}' has no preset named '{}'.", family, name)
            }
            Self::Render(RenderError::Unavailable { binary }) => {
                format!("'{}' was not found on PATH. Please install FFmpeg.", binary)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
