//! # Overlay-Compositor
//!
//! Declarative text-overlay effects for video and images, rendered through
//! an external FFmpeg process.
//!
//! Given a style family (neon, glass, glitch, holo, retro) and a set of
//! overrides, the engine resolves an immutable configuration, builds an
//! ordered pipeline of drawing operations with symbolic positions and
//! time-parameterized opacity expressions, serializes it into a filter
//! graph, and hands it to the renderer. The engine never touches pixels.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use overlay_compositor::{
//!     composition::OverlayEngine,
//!     config::Config,
//!     styles::{bundle, StyleRegistry},
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> overlay_compositor::Result<()> {
//! let config = Config::default();
//! let registry = StyleRegistry::new();
//! let neon = registry.get_style("neon").unwrap();
//!
//! let engine = OverlayEngine::new(config, neon);
//! engine
//!     .apply_to_video(
//!         "clip.mp4",
//!         "styled.mp4",
//!         &bundle(&[("text", "LATE NIGHT".into()), ("glow_intensity", 8.into())]),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`styles`] - Style families, configuration resolution, layer composition
//! - [`expr`] - Time-parameterized animation expressions
//! - [`position`] - Anchor resolution and symbolic coordinates
//! - [`pipeline`] - The renderer-agnostic draw-operation model
//! - [`render`] - Filter-graph serialization and FFmpeg invocation
//! - [`composition`] - The per-style engine facade
//! - [`config`] - Configuration management
//!
//! ## Creating Custom Styles
//!
//! Custom families implement the [`Style`](styles::Style) trait:
//!
//! ```rust,no_run
//! use overlay_compositor::expr::Expr;
//! use overlay_compositor::pipeline::{Pipeline, TextOp};
//! use overlay_compositor::position::anchored_text_position;
//! use overlay_compositor::styles::{LayerStack, Style, StyleConfig};
//! use overlay_compositor::Result;
//!
//! struct PlainStyle;
//!
//! impl Style for PlainStyle {
//!     fn name(&self) -> &str {
//!         "plain"
//!     }
//!
//!     fn description(&self) -> &str {
//!         "Unadorned text"
//!     }
//!
//!     fn default_config(&self) -> StyleConfig {
//!         StyleConfig::default()
//!     }
//!
//!     fn build_pipeline(&self, config: &StyleConfig) -> Result<Pipeline> {
//!         let pos = anchored_text_position(config.anchor, config.offset_x, config.offset_y);
//!         let main = TextOp::new(
//!             &config.text,
//!             &config.font,
//!             config.font_size,
//!             &config.primary_color,
//!             Expr::num(config.opacity as f64),
//!             pos,
//!         );
//!         Ok(LayerStack::new().finish(main))
//!     }
//! }
//! ```

pub mod composition;
pub mod config;
pub mod error;
pub mod expr;
pub mod pipeline;
pub mod position;
pub mod render;
pub mod source;
pub mod styles;

// Re-export commonly used types for convenience
pub use crate::{
    composition::OverlayEngine,
    config::Config,
    error::{OverlayError, Result},
    position::Anchor,
    styles::{OverrideBundle, Style, StyleConfig, StyleRegistry},
};
