//! # Anchors and Positions
//!
//! Maps named anchors plus pixel offsets onto symbolic coordinate pairs. The
//! formulas reference frame and text dimensions that only the renderer knows,
//! so both coordinates are [`Expr`] values rather than numbers.
//!
//! Unknown anchor names never error: they degrade to the style family's
//! documented default so a batch job keeps going when a caller typos
//! "botom-right".

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::expr::Expr;

/// Named logical position of an overlay within the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
    TopCenter,
    BottomCenter,
}

impl Anchor {
    /// Parse an anchor name; accepts kebab-case and snake_case
    pub fn parse(name: &str) -> Option<Anchor> {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "top-left" => Some(Anchor::TopLeft),
            "top-right" => Some(Anchor::TopRight),
            "bottom-left" => Some(Anchor::BottomLeft),
            "bottom-right" => Some(Anchor::BottomRight),
            "center" | "centre" => Some(Anchor::Center),
            "top-center" | "top-centre" => Some(Anchor::TopCenter),
            "bottom-center" | "bottom-centre" => Some(Anchor::BottomCenter),
            _ => None,
        }
    }

    /// Parse with fallback to a family default; the fallback is logged,
    /// never raised
    pub fn parse_or(name: &str, default: Anchor) -> Anchor {
        Anchor::parse(name).unwrap_or_else(|| {
            debug!(anchor = name, fallback = default.name(), "unknown anchor, using family default");
            default
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::TopRight => "top-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomRight => "bottom-right",
            Anchor::Center => "center",
            Anchor::TopCenter => "top-center",
            Anchor::BottomCenter => "bottom-center",
        }
    }
}

/// A coordinate pair; each axis is symbolic until the renderer draws it
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub x: Expr,
    pub y: Expr,
}

impl Position {
    pub fn new(x: Expr, y: Expr) -> Self {
        Self { x, y }
    }

    /// Shift both axes by fixed pixel deltas (negative values move up/left)
    pub fn shifted(&self, dx: f64, dy: f64) -> Position {
        let apply = |axis: &Expr, delta: f64| {
            if delta == 0.0 {
                axis.clone()
            } else if delta < 0.0 {
                axis.clone().sub(-delta)
            } else {
                axis.clone().add(delta)
            }
        };
        Position {
            x: apply(&self.x, dx),
            y: apply(&self.y, dy),
        }
    }
}

/// Resolve a text anchor into its symbolic coordinate formula
pub fn anchored_text_position(anchor: Anchor, offset_x: u32, offset_y: u32) -> Position {
    let dx = offset_x as f64;
    let dy = offset_y as f64;
    let free_w = || Expr::frame_w().sub(Expr::text_w());
    let free_h = || Expr::frame_h().sub(Expr::text_h());

    match anchor {
        Anchor::TopLeft => Position::new(Expr::num(dx), Expr::num(dy)),
        Anchor::TopRight => Position::new(free_w().sub(dx), Expr::num(dy)),
        Anchor::BottomLeft => Position::new(Expr::num(dx), free_h().sub(dy)),
        Anchor::BottomRight => Position::new(free_w().sub(dx), free_h().sub(dy)),
        Anchor::Center => Position::new(free_w().div(2.0), free_h().div(2.0)),
        Anchor::TopCenter => Position::new(free_w().div(2.0), Expr::num(dy)),
        Anchor::BottomCenter => Position::new(free_w().div(2.0), free_h().sub(dy)),
    }
}

/// String entry point implementing the fallback-without-error policy
pub fn named_text_position(name: &str, default: Anchor, offset_x: u32, offset_y: u32) -> Position {
    anchored_text_position(Anchor::parse_or(name, default), offset_x, offset_y)
}

/// Estimated panel geometry for panel-based families
///
/// Panel dimensions are numeric estimates from text length and padding (the
/// renderer has no "panel_w" placeholder), while the panel origin stays
/// symbolic in frame dimensions. The text is pinned to the panel origin plus
/// padding rather than re-anchored, so it always lands inside the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    pub panel: Position,
    pub width: f64,
    pub height: f64,
    pub text: Position,
}

// Glyph metrics for the width/height estimate. Tuned for the default fonts;
// an over-estimate only makes the panel roomier.
const GLYPH_WIDTH_FACTOR: f64 = 0.60;
const LINE_HEIGHT_FACTOR: f64 = 1.25;

impl PanelLayout {
    pub fn estimate(
        text: &str,
        font_size: u32,
        anchor: Anchor,
        offset_x: u32,
        offset_y: u32,
        pad_x: f64,
        pad_y: f64,
    ) -> PanelLayout {
        let glyphs = text.chars().count().max(1) as f64;
        let width = glyphs * font_size as f64 * GLYPH_WIDTH_FACTOR + 2.0 * pad_x;
        let height = font_size as f64 * LINE_HEIGHT_FACTOR + 2.0 * pad_y;
        let panel = anchored_panel_position(anchor, width, height, offset_x, offset_y);
        let text_pos = panel.shifted(pad_x, pad_y);

        PanelLayout {
            panel,
            width,
            height,
            text: text_pos,
        }
    }
}

/// Same anchor formulas with a numeric panel size in place of text size
fn anchored_panel_position(anchor: Anchor, width: f64, height: f64, offset_x: u32, offset_y: u32) -> Position {
    let dx = offset_x as f64;
    let dy = offset_y as f64;
    let free_w = || Expr::frame_w().sub(width);
    let free_h = || Expr::frame_h().sub(height);

    match anchor {
        Anchor::TopLeft => Position::new(Expr::num(dx), Expr::num(dy)),
        Anchor::TopRight => Position::new(free_w().sub(dx), Expr::num(dy)),
        Anchor::BottomLeft => Position::new(Expr::num(dx), free_h().sub(dy)),
        Anchor::BottomRight => Position::new(free_w().sub(dx), free_h().sub(dy)),
        Anchor::Center => Position::new(free_w().div(2.0), free_h().div(2.0)),
        Anchor::TopCenter => Position::new(free_w().div(2.0), Expr::num(dy)),
        Anchor::BottomCenter => Position::new(free_w().div(2.0), free_h().sub(dy)),
    }
}
