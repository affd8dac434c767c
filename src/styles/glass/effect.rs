use crate::{
    error::Result,
    expr::Expr,
    pipeline::{BlurCropOp, BorderOp, PanelOp, Pipeline, TextOp},
    position::{Anchor, PanelLayout},
    styles::compositor::LayerStack,
    styles::{bundle, Preset, Style, StyleConfig},
};

use super::{
    BLUR_RADIUS, BORDER, BORDER_THICKNESS, PAD_X, PAD_Y, PANEL_OPACITY, SHIMMER, SHIMMER_OPACITY,
    SHIMMER_SPEED,
};

/// Frosted-glass panel effect
pub struct GlassStyle;

impl GlassStyle {
    pub fn new() -> Self {
        Self
    }

    /// Highlight bar sweeping the panel width; a block glyph is the one
    /// drawing primitive whose x-position accepts a time expression
    fn shimmer_bar(config: &StyleConfig, layout: &PanelLayout, base: f64) -> TextOp {
        let speed = config.get_f32_or(SHIMMER_SPEED, 90.0) as f64;
        let opacity = config.get_f32_or(SHIMMER_OPACITY, 0.22) as f64 * base;
        let bar_size = (layout.height * 0.8) as u32;
        let span = (layout.width - bar_size as f64 * 0.6).max(1.0);

        let x = layout.panel.x.clone().add(Expr::time().mul(speed).modulo(span));
        let y = layout.panel.y.clone().add(layout.height * 0.1);

        TextOp::new(
            "\u{2588}",
            &config.font,
            bar_size,
            "white",
            Expr::num(opacity),
            crate::position::Position::new(x, y),
        )
    }
}

impl Style for GlassStyle {
    fn name(&self) -> &str {
        "glass"
    }

    fn description(&self) -> &str {
        "Frosted-glass panel behind the text, with blurred backdrop, hairline border and optional moving shimmer"
    }

    fn default_config(&self) -> StyleConfig {
        StyleConfig {
            font: "Sans".to_string(),
            font_size: 42,
            primary_color: "white".to_string(),
            secondary_color: Some("white".to_string()),
            accent_color: Some("white".to_string()),
            anchor: self.default_anchor(),
            offset_y: 60,
            ..StyleConfig::default()
        }
        .set(BLUR_RADIUS, 12)
        .set(PANEL_OPACITY, 0.18f32)
        .set(PAD_X, 28)
        .set(PAD_Y, 16)
        .set(BORDER, true)
        .set(BORDER_THICKNESS, 2)
        .set(SHIMMER, false)
        .set(SHIMMER_SPEED, 90.0f32)
        .set(SHIMMER_OPACITY, 0.22f32)
    }

    fn default_anchor(&self) -> Anchor {
        Anchor::BottomCenter
    }

    fn presets(&self) -> Vec<Preset> {
        vec![
            Preset::new("frosted", bundle(&[])),
            Preset::new(
                "dark",
                bundle(&[
                    ("secondary_color", "black".into()),
                    (PANEL_OPACITY, 0.38f32.into()),
                    (BLUR_RADIUS, 8.into()),
                ]),
            ),
            Preset::new(
                "hud",
                bundle(&[
                    (BLUR_RADIUS, 0.into()),
                    (PANEL_OPACITY, 0.10f32.into()),
                    (BORDER_THICKNESS, 1.into()),
                    ("color", "0xB8FFE8".into()),
                ]),
            ),
            Preset::new("shimmer", bundle(&[(SHIMMER, true.into())])),
        ]
    }

    fn build_pipeline(&self, config: &StyleConfig) -> Result<Pipeline> {
        let base = config.opacity as f64;
        let pad_x = config.get_f32_or(PAD_X, 28.0) as f64;
        let pad_y = config.get_f32_or(PAD_Y, 16.0) as f64;
        let layout = PanelLayout::estimate(
            &config.text,
            config.font_size,
            config.anchor,
            config.offset_x,
            config.offset_y,
            pad_x,
            pad_y,
        );

        let mut stack = LayerStack::new();

        let radius = config.get_f32_or(BLUR_RADIUS, 12.0).max(0.0) as u32;
        if radius > 0 {
            stack.backdrop_blur(BlurCropOp {
                pos: layout.panel.clone(),
                width: layout.width,
                height: layout.height,
                radius,
            });
        }

        let panel_color = config.secondary_color.as_deref().unwrap_or("white");
        stack.panel(PanelOp {
            pos: layout.panel.clone(),
            width: layout.width,
            height: layout.height,
            color: panel_color.to_string(),
            alpha: Expr::num(config.get_f32_or(PANEL_OPACITY, 0.18) as f64 * base),
        });

        if config.get_bool_or(BORDER, true) {
            let border_color = config.accent_color.as_deref().unwrap_or(panel_color);
            stack.border(BorderOp {
                pos: layout.panel.clone(),
                width: Expr::num(layout.width),
                height: Expr::num(layout.height),
                color: border_color.to_string(),
                alpha: Expr::num(0.4 * base),
                thickness: config.get_f32_or(BORDER_THICKNESS, 2.0) as u32,
            });
        }

        if config.get_bool_or(SHIMMER, false) {
            stack.shimmer(Self::shimmer_bar(config, &layout, base));
        }

        let main = TextOp::new(
            &config.text,
            &config.font,
            config.font_size,
            &config.primary_color,
            Expr::num(base),
            layout.text.clone(),
        );

        Ok(stack.finish(main))
    }
}
