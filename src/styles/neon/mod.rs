//! # Neon Style Implementation
//!
//! Glowing-tube signage: stacked glow halos behind a crisp core, with
//! optional breathing (pulse) and failing-sign flicker animation.

mod effect;

pub use effect::NeonStyle;

// Neon-specific parameter constants
pub const GLOW: &str = "glow";
pub const GLOW_INTENSITY: &str = "glow_intensity";
pub const HALO_OPACITY: &str = "halo_opacity";
pub const PULSE: &str = "pulse";
pub const PULSE_SPEED: &str = "pulse_speed";
pub const FLICKER: &str = "flicker";
pub const FLICKER_SPEED: &str = "flicker_speed";
pub const OUTLINE_WIDTH: &str = "outline_width";
