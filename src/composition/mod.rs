//! # Overlay Engine
//!
//! The per-style facade that turns a configuration into a rendered file:
//! resolve config, build the pipeline, serialize it, hand it to the
//! external renderer.

pub mod engine;

// Re-exports for convenience
pub use engine::{OverlayEngine, Variation, VariationOutcome};
