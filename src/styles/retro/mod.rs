//! # Retro Style Implementation
//!
//! Aged print look: a tone pre-pass over the whole frame, an embossed
//! depth duplicate and patina tint beneath the main glyphs, and an optional
//! full-frame border. Hosts the aged-film and stamp presets.

mod effect;

pub use effect::RetroStyle;

// Retro-specific parameter constants
pub const TONE: &str = "tone";
pub const GRAIN: &str = "grain";
pub const SHADOW: &str = "shadow";
pub const SHADOW_DEPTH: &str = "shadow_depth";
pub const PATINA: &str = "patina";
pub const BORDER: &str = "border";
pub const BORDER_THICKNESS: &str = "border_thickness";
pub const BORDER_INSET: &str = "border_inset";
pub const FADE_IN_RATE: &str = "fade_in_rate";
