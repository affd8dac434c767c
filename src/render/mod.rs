//! # Render Boundary
//!
//! Serialization of typed pipelines into the external renderer's filter
//! syntax, and the process plumbing that runs it.

pub mod filter;
pub mod renderer;

pub use filter::{serialize, FilterGraph};
pub use renderer::{FfmpegRenderer, ProgressCallback, RenderProgress};
