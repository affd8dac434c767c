use crate::{
    error::Result,
    expr::{self, Expr},
    pipeline::{BorderOp, Pipeline, TextOp},
    position::{anchored_text_position, Anchor, Position},
    styles::compositor::LayerStack,
    styles::{bundle, Preset, Style, StyleConfig},
};

use super::{
    BORDER, BORDER_INSET, BORDER_THICKNESS, FADE_IN_RATE, GRAIN, PATINA, SHADOW, SHADOW_DEPTH, TONE,
};

// Standard sepia transform matrix
const SEPIA_PASS: &str =
    "colorchannelmixer=.393:.769:.189:0:.349:.686:.168:0:.272:.534:.131:0";
const FADED_PASS: &str = "eq=saturation=0.55:brightness=0.03";
const GRAIN_PASS: &str = "noise=alls=12:allf=t";

/// Aged-print text effect
pub struct RetroStyle;

impl RetroStyle {
    pub fn new() -> Self {
        Self
    }

    fn tone_pass(config: &StyleConfig) -> Option<&'static str> {
        match config.get_string(TONE).unwrap_or("sepia") {
            "sepia" => Some(SEPIA_PASS),
            "faded" => Some(FADED_PASS),
            _ => None,
        }
    }

    fn frame_border(config: &StyleConfig, base: f64) -> BorderOp {
        let inset = config.get_f32_or(BORDER_INSET, 24.0) as f64;
        let color = config.accent_color.as_deref().unwrap_or("0xC8B89A");
        BorderOp {
            pos: Position::new(Expr::num(inset), Expr::num(inset)),
            width: Expr::frame_w().sub(2.0 * inset),
            height: Expr::frame_h().sub(2.0 * inset),
            color: color.to_string(),
            alpha: Expr::num(0.75 * base),
            thickness: config.get_f32_or(BORDER_THICKNESS, 3.0) as u32,
        }
    }
}

impl Style for RetroStyle {
    fn name(&self) -> &str {
        "retro"
    }

    fn description(&self) -> &str {
        "Aged-print text with sepia tone, embossed depth, patina tint and a vintage frame"
    }

    fn default_config(&self) -> StyleConfig {
        StyleConfig {
            font: "Serif".to_string(),
            font_size: 54,
            primary_color: "0xF2E6C8".to_string(),
            secondary_color: Some("0x6B4F2A".to_string()),
            accent_color: Some("0xC8B89A".to_string()),
            anchor: self.default_anchor(),
            offset_y: 0,
            ..StyleConfig::default()
        }
        .set(TONE, "sepia")
        .set(GRAIN, false)
        .set(SHADOW, true)
        .set(SHADOW_DEPTH, 3)
        .set(PATINA, true)
        .set(BORDER, true)
        .set(BORDER_THICKNESS, 3)
        .set(BORDER_INSET, 24)
        .set(FADE_IN_RATE, 0.0f32)
    }

    fn default_anchor(&self) -> Anchor {
        Anchor::Center
    }

    fn presets(&self) -> Vec<Preset> {
        vec![
            Preset::new(
                "aged-film",
                bundle(&[
                    (GRAIN, true.into()),
                    ("opacity", 0.88f32.into()),
                    (FADE_IN_RATE, 0.6f32.into()),
                ]),
            ),
            Preset::new(
                "stamp",
                bundle(&[
                    ("color", "0x9B1B1B".into()),
                    ("rotation", (-4.0f32).into()),
                    (TONE, "none".into()),
                    (SHADOW, false.into()),
                    (PATINA, false.into()),
                    (BORDER_THICKNESS, 6.into()),
                    (BORDER_INSET, 60.into()),
                ]),
            ),
            Preset::new(
                "postcard",
                bundle(&[(TONE, "faded".into()), (BORDER_THICKNESS, 2.into())]),
            ),
        ]
    }

    fn build_pipeline(&self, config: &StyleConfig) -> Result<Pipeline> {
        let base = config.opacity as f64;
        let pos = anchored_text_position(config.anchor, config.offset_x, config.offset_y);
        let mut stack = LayerStack::new();

        if let Some(pass) = Self::tone_pass(config) {
            stack.pre_pass(pass);
        }
        if config.get_bool_or(GRAIN, false) {
            stack.pre_pass(GRAIN_PASS);
        }

        if config.get_bool_or(BORDER, true) {
            stack.border(Self::frame_border(config, base));
        }

        if config.get_bool_or(SHADOW, true) {
            let depth = config.get_f32_or(SHADOW_DEPTH, 3.0) as f64;
            stack.shadow(TextOp::new(
                &config.text,
                &config.font,
                config.font_size,
                "black",
                Expr::num(0.5 * base),
                pos.shifted(depth, depth),
            ));
        }

        if config.get_bool_or(PATINA, true) {
            let tint = config.secondary_color.as_deref().unwrap_or("0x6B4F2A");
            stack.patina(TextOp::new(
                &config.text,
                &config.font,
                config.font_size,
                tint,
                Expr::num(0.35 * base),
                pos.shifted(-1.0, -1.0),
            ));
        }

        let fade_rate = config.get_f32_or(FADE_IN_RATE, 0.0) as f64;
        let main_alpha = if fade_rate > 0.0 {
            expr::reveal(fade_rate, base)
        } else {
            Expr::num(base)
        };
        let main = TextOp::new(
            &config.text,
            &config.font,
            config.font_size,
            &config.primary_color,
            main_alpha,
            pos,
        );

        if config.rotation != 0.0 {
            // whole-frame tilt; intended for stills (see stamp preset)
            stack.post_pass(format!("rotate={}*PI/180:fillcolor=black@0", config.rotation));
        }

        Ok(stack.finish(main))
    }
}
