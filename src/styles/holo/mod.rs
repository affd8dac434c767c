//! # Holographic Style Implementation
//!
//! Layered holographic shimmer: one duplicate per configured color, each
//! with phase-offset cycling opacity so the hues peak in turn, under a
//! crisp silvery main layer.

mod effect;

pub use effect::HoloStyle;

// Holo-specific parameter constants
pub const CYCLE_SPEED: &str = "cycle_speed";
pub const PHASE_STEP: &str = "phase_step";
pub const LAYER_OFFSET: &str = "layer_offset";
pub const LAYER_OPACITY: &str = "layer_opacity";
