use crate::{
    error::Result,
    expr::{self, Expr, Waveform},
    pipeline::{Pipeline, TextOp},
    position::{anchored_text_position, Anchor, Position},
    styles::compositor::LayerStack,
    styles::{bundle, Preset, Style, StyleConfig},
};

use super::{CHROMA_OFFSET, CHROMA_OPACITY, FLICKER, FLICKER_SPEED, JITTER_AMPLITUDE, JITTER_SPEED};

// Distinct per-axis frequency multipliers; equal values would make the
// jitter move on a diagonal line
const JITTER_FREQ_X: f64 = 1.0;
const JITTER_FREQ_Y: f64 = 1.7;

/// Digital-glitch text effect
pub struct GlitchStyle;

impl GlitchStyle {
    pub fn new() -> Self {
        Self
    }

    fn chroma_triad(config: &StyleConfig, pos: &Position, base: f64) -> Vec<TextOp> {
        let offset = config.get_f32_or(CHROMA_OFFSET, 3.0) as f64;
        let alpha = config.get_f32_or(CHROMA_OPACITY, 0.5) as f64 * base;

        // red left, green centered, blue right - symmetric lens fringing
        [("red", -offset), ("green", 0.0), ("blue", offset)]
            .into_iter()
            .map(|(color, dx)| {
                TextOp::new(
                    &config.text,
                    &config.font,
                    config.font_size,
                    color,
                    Expr::num(alpha),
                    pos.shifted(dx, 0.0),
                )
            })
            .collect()
    }

    fn interrupt_layer(config: &StyleConfig, pos: &Position, base: f64) -> TextOp {
        let amplitude = config.get_f32_or(JITTER_AMPLITUDE, 2.5) as f64;
        let speed = config.get_f32_or(JITTER_SPEED, 9.0) as f64;
        let flicker_speed = config.get_f32_or(FLICKER_SPEED, 4.0) as f64;
        let color = config.accent_color.as_deref().unwrap_or("white");

        let jittered = Position::new(
            expr::jitter(pos.x.clone(), amplitude, speed, JITTER_FREQ_X, Waveform::Sin),
            expr::jitter(pos.y.clone(), amplitude * 0.6, speed, JITTER_FREQ_Y, Waveform::Cos),
        );
        // fully dark on its off ticks so the interruption reads as dropout
        let alpha = expr::blink(0.8 * base, 0.0, flicker_speed, 3.0, 4.0);

        TextOp::new(&config.text, &config.font, config.font_size, color, alpha, jittered)
    }
}

impl Style for GlitchStyle {
    fn name(&self) -> &str {
        "glitch"
    }

    fn description(&self) -> &str {
        "Corrupted-signal text with RGB channel splits, positional jitter and dropout flicker"
    }

    fn default_config(&self) -> StyleConfig {
        StyleConfig {
            font: "Mono".to_string(),
            font_size: 48,
            primary_color: "white".to_string(),
            accent_color: Some("0x00FFC8".to_string()),
            anchor: self.default_anchor(),
            offset_y: 80,
            ..StyleConfig::default()
        }
        .set(CHROMA_OFFSET, 3)
        .set(CHROMA_OPACITY, 0.5f32)
        .set(JITTER_AMPLITUDE, 2.5f32)
        .set(JITTER_SPEED, 9.0f32)
        .set(FLICKER, true)
        .set(FLICKER_SPEED, 4.0f32)
    }

    fn default_anchor(&self) -> Anchor {
        Anchor::Center
    }

    fn presets(&self) -> Vec<Preset> {
        vec![
            Preset::new(
                "subtle",
                bundle(&[
                    (CHROMA_OFFSET, 2.into()),
                    (JITTER_AMPLITUDE, 1.2f32.into()),
                    (FLICKER, false.into()),
                ]),
            ),
            Preset::new(
                "heavy",
                bundle(&[
                    (CHROMA_OFFSET, 6.into()),
                    (JITTER_AMPLITUDE, 5.0f32.into()),
                    (FLICKER_SPEED, 6.5f32.into()),
                ]),
            ),
            Preset::new(
                "matrix",
                bundle(&[
                    ("color", "0x00FF41".into()),
                    ("accent_color", "0x008F11".into()),
                    ("font", "Mono".into()),
                    (CHROMA_OFFSET, 0.into()),
                    (JITTER_AMPLITUDE, 1.5f32.into()),
                    (FLICKER_SPEED, 7.0f32.into()),
                ]),
            ),
        ]
    }

    fn build_pipeline(&self, config: &StyleConfig) -> Result<Pipeline> {
        let base = config.opacity as f64;
        let pos = anchored_text_position(config.anchor, config.offset_x, config.offset_y);
        let mut stack = LayerStack::new();

        if config.get_f32_or(CHROMA_OFFSET, 3.0) > 0.0 {
            for op in Self::chroma_triad(config, &pos, base) {
                stack.chroma_split(op);
            }
        }

        if config.get_bool_or(FLICKER, true) {
            stack.glitch(Self::interrupt_layer(config, &pos, base));
        }

        let main = TextOp::new(
            &config.text,
            &config.font,
            config.font_size,
            &config.primary_color,
            Expr::num(base),
            pos,
        );

        Ok(stack.finish(main))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::EvalEnv;
    use crate::styles::OverrideBundle;

    fn build(overrides: OverrideBundle) -> Pipeline {
        let style = GlitchStyle::new();
        let config = StyleConfig::resolve(&style.default_config(), &overrides).unwrap();
        style.build_pipeline(&config).unwrap()
    }

    #[test]
    fn test_chroma_triad_symmetric_offsets() {
        let pipeline = build(bundle(&[("text", "ERR".into()), (CHROMA_OFFSET, 4.into())]));
        let texts = pipeline.text_ops();
        let env = EvalEnv::at(0.0);

        let center = texts.last().unwrap().pos.x.eval(&env);
        let colors: Vec<&str> = texts[..3].iter().map(|t| t.color.as_str()).collect();
        assert_eq!(colors, vec!["red", "green", "blue"]);
        assert_eq!(texts[0].pos.x.eval(&env), center - 4.0);
        assert_eq!(texts[1].pos.x.eval(&env), center);
        assert_eq!(texts[2].pos.x.eval(&env), center + 4.0);
    }

    #[test]
    fn test_interrupt_layer_below_main_only() {
        let pipeline = build(bundle(&[("text", "ERR".into())]));
        let texts = pipeline.text_ops();
        // triad + interrupt + main
        assert_eq!(texts.len(), 5);
        let interrupt = texts[3];
        assert!(interrupt.pos.x.is_animated());
        assert!(interrupt.alpha.is_animated());
        let main = texts[4];
        assert_eq!(main.text, "ERR");
        assert!(!main.pos.x.is_animated());
    }

    #[test]
    fn test_jitter_axes_not_synchronized() {
        let pipeline = build(bundle(&[("text", "X".into())]));
        let interrupt = pipeline.text_ops()[3].clone();
        // sample displacement on both axes; identical sequences would mean
        // visually synchronized motion
        let env0 = EvalEnv::at(0.0);
        let dx: Vec<f64> = (0..20)
            .map(|i| interrupt.pos.x.eval(&EvalEnv::at(i as f64 * 0.11)) - interrupt.pos.x.eval(&env0))
            .collect();
        let dy: Vec<f64> = (0..20)
            .map(|i| interrupt.pos.y.eval(&EvalEnv::at(i as f64 * 0.11)) - interrupt.pos.y.eval(&env0))
            .collect();
        assert_ne!(dx, dy);
    }

    #[test]
    fn test_all_effects_off_is_single_text() {
        let pipeline = build(bundle(&[
            ("text", "CLEAN".into()),
            (CHROMA_OFFSET, 0.into()),
            (FLICKER, false.into()),
        ]));
        assert_eq!(pipeline.text_ops().len(), 1);
        assert_eq!(pipeline.text_ops()[0].text, "CLEAN");
    }
}
