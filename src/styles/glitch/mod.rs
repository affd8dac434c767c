//! # Glitch Style Implementation
//!
//! Broken-signal text: chromatic-aberration triad under the main glyphs and
//! a jittering, flickering interrupt layer above them.

mod effect;

pub use effect::GlitchStyle;

// Glitch-specific parameter constants
pub const CHROMA_OFFSET: &str = "chroma_offset";
pub const CHROMA_OPACITY: &str = "chroma_opacity";
pub const JITTER_AMPLITUDE: &str = "jitter_amplitude";
pub const JITTER_SPEED: &str = "jitter_speed";
pub const FLICKER: &str = "flicker";
pub const FLICKER_SPEED: &str = "flicker_speed";
