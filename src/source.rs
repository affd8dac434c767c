//! # Source Media Acquisition
//!
//! The seam to the external collaborator that materializes remote content
//! locally. The engine only ever consumes a local file path; everything
//! network-shaped lives behind [`MediaSource`], and this crate ships the
//! vocabulary but no implementation.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SourceError};

/// Quality selector understood by acquisition collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Standard,
    Hd,
}

impl FromStr for Quality {
    type Err = crate::error::OverlayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "sd" => Ok(Quality::Standard),
            "hd" => Ok(Quality::Hd),
            other => Err(SourceError::UnsupportedQuality {
                quality: other.to_string(),
            }
            .into()),
        }
    }
}

/// A locally materialized source plus its descriptive metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMedia {
    /// Local path the engine can hand to the renderer
    pub path: PathBuf,

    /// Content title as reported by the platform
    pub title: String,

    /// Content author as reported by the platform
    pub author: String,

    /// Duration in seconds for videos
    pub duration_secs: Option<f64>,

    /// Item count for multi-image content
    pub item_count: Option<u32>,
}

/// Acquisition collaborator contract
///
/// Implementations are assumed reliable and fully external; failures arrive
/// as [`SourceError`] values and are propagated untouched.
pub trait MediaSource: Send + Sync {
    fn fetch(&self, url: &str, quality: Quality) -> Result<SourceMedia>;
}
