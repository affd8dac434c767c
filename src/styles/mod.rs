//! # Overlay Style System
//!
//! The extensible style system mapping family names to pipeline builders.
//! Each family is self-contained: defaults, presets and layer assembly all
//! live with the family, behind the common [`Style`] trait.
//!
//! ## Built-in Families
//!
//! - **Neon**: layered glow halos, breathing pulse, failing-sign flicker
//! - **Glass**: frosted panel over a blurred backdrop, hairline border, shimmer
//! - **Glitch**: RGB channel splits, positional jitter, dropout flicker
//! - **Holo**: phase-cycled multi-color shimmer layers
//! - **Retro**: sepia tone, embossed depth, patina tint, vintage frame
//!
//! ## Usage
//!
//! ```rust,no_run
//! use overlay_compositor::styles::{StyleRegistry, StyleConfig};
//!
//! let registry = StyleRegistry::new();
//! let neon = registry.get_style("neon").unwrap();
//!
//! let config = neon.default_config();
//! let pipeline = neon.build_pipeline(&config).unwrap();
//! ```

pub mod compositor;
pub mod registry;
pub mod traits;

// Style implementations
pub mod glass;
pub mod glitch;
pub mod holo;
pub mod neon;
pub mod retro;

// Re-exports for convenience
pub use compositor::LayerStack;
pub use registry::StyleRegistry;
pub use traits::{bundle, ConfigValue, OverrideBundle, Preset, Style, StyleConfig, StyleInfo};

// Re-export all built-in styles
pub use glass::GlassStyle;
pub use glitch::GlitchStyle;
pub use holo::HoloStyle;
pub use neon::NeonStyle;
pub use retro::RetroStyle;
