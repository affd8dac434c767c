//! # Glass Style Implementation
//!
//! Frosted-glass information panel: the destination region is cropped,
//! blurred and composited back before a translucent panel, border and text
//! are drawn over it. The only family using named intermediate buffers.

mod effect;

pub use effect::GlassStyle;

// Glass-specific parameter constants
pub const BLUR_RADIUS: &str = "blur_radius";
pub const PANEL_OPACITY: &str = "panel_opacity";
pub const PAD_X: &str = "pad_x";
pub const PAD_Y: &str = "pad_y";
pub const BORDER: &str = "border";
pub const BORDER_THICKNESS: &str = "border_thickness";
pub const SHIMMER: &str = "shimmer";
pub const SHIMMER_SPEED: &str = "shimmer_speed";
pub const SHIMMER_OPACITY: &str = "shimmer_opacity";
