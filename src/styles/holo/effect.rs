use std::f64::consts::PI;

use crate::{
    error::Result,
    expr::{self, Expr},
    pipeline::{Pipeline, TextOp},
    position::{anchored_text_position, Anchor},
    styles::compositor::LayerStack,
    styles::{bundle, Preset, Style, StyleConfig},
};

use super::{CYCLE_SPEED, LAYER_OFFSET, LAYER_OPACITY, PHASE_STEP};

/// Holographic shimmer text effect
pub struct HoloStyle;

impl HoloStyle {
    pub fn new() -> Self {
        Self
    }

    /// Cycle colors in configured order; absent slots shrink the set
    fn cycle_colors(config: &StyleConfig) -> Vec<String> {
        [
            config.secondary_color.as_deref(),
            config.tertiary_color.as_deref(),
            config.accent_color.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(String::from)
        .collect()
    }
}

impl Style for HoloStyle {
    fn name(&self) -> &str {
        "holo"
    }

    fn description(&self) -> &str {
        "Holographic multi-color shimmer with phase-cycled layer opacity"
    }

    fn default_config(&self) -> StyleConfig {
        StyleConfig {
            font: "Sans".to_string(),
            font_size: 48,
            primary_color: "0xEAEAF2".to_string(),
            secondary_color: Some("0xFF4FD8".to_string()),
            tertiary_color: Some("0x4FC3FF".to_string()),
            accent_color: Some("0x7CFF4F".to_string()),
            anchor: self.default_anchor(),
            offset_y: 80,
            ..StyleConfig::default()
        }
        .set(CYCLE_SPEED, 1.5f32)
        .set(LAYER_OFFSET, 2)
        .set(LAYER_OPACITY, 0.85f32)
    }

    fn default_anchor(&self) -> Anchor {
        Anchor::Center
    }

    fn presets(&self) -> Vec<Preset> {
        vec![
            Preset::new("rainbow", bundle(&[])),
            Preset::new(
                "prism",
                bundle(&[(LAYER_OFFSET, 4.into()), (CYCLE_SPEED, 2.4f32.into())]),
            ),
            Preset::new(
                "chrome",
                bundle(&[
                    ("secondary_color", "0xC9D4E0".into()),
                    ("tertiary_color", "0x8FA3B8".into()),
                    ("accent_color", "0xE8F0F8".into()),
                    (CYCLE_SPEED, 0.8f32.into()),
                    (LAYER_OFFSET, 1.into()),
                ]),
            ),
        ]
    }

    fn build_pipeline(&self, config: &StyleConfig) -> Result<Pipeline> {
        let base = config.opacity as f64;
        let pos = anchored_text_position(config.anchor, config.offset_x, config.offset_y);
        let mut stack = LayerStack::new();

        let colors = Self::cycle_colors(config);
        if !colors.is_empty() {
            let speed = config.get_f32_or(CYCLE_SPEED, 1.5) as f64;
            let layer_base = config.get_f32_or(LAYER_OPACITY, 0.85) as f64 * base;
            let offset = config.get_f32_or(LAYER_OFFSET, 2.0) as f64;
            // |sin| has period pi, so pi/n spreads the peaks evenly
            let phase_step = config
                .get_f32(PHASE_STEP)
                .map(|v| v as f64)
                .unwrap_or(PI / colors.len() as f64);

            for (i, color) in colors.iter().enumerate() {
                let shift = (i + 1) as f64 * offset;
                stack.color_phase(TextOp::new(
                    &config.text,
                    &config.font,
                    config.font_size,
                    color,
                    expr::phase_cycled(layer_base, speed, i, phase_step),
                    pos.shifted(shift, shift),
                ));
            }
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
        let style = HoloStyle::new();
        let config = StyleConfig::resolve(&style.default_config(), &overrides).unwrap();
        style.build_pipeline(&config).unwrap()
    }

    #[test]
    fn test_one_layer_per_configured_color() {
        let pipeline = build(bundle(&[("text", "HOLO".into())]));
        // three cycle colors + main
        assert_eq!(pipeline.text_ops().len(), 4);
    }

    #[test]
    fn test_layers_offset_proportional_to_index() {
        let pipeline = build(bundle(&[("text", "HOLO".into()), (LAYER_OFFSET, 3.into())]));
        let texts = pipeline.text_ops();
        let env = EvalEnv::at(0.0);
        let main_x = texts.last().unwrap().pos.x.eval(&env);
        for (i, layer) in texts[..3].iter().enumerate() {
            assert_eq!(layer.pos.x.eval(&env), main_x + (i + 1) as f64 * 3.0);
        }
    }

    #[test]
    fn test_layers_peak_at_distinct_times() {
        let pipeline = build(bundle(&[("text", "HOLO".into())]));
        let texts = pipeline.text_ops();
        // find each layer's first alpha peak on a fine time grid
        let peak_time = |op: &TextOp| -> usize {
            (0..400)
                .max_by(|&a, &b| {
                    let va = op.alpha.eval(&EvalEnv::at(a as f64 * 0.01));
                    let vb = op.alpha.eval(&EvalEnv::at(b as f64 * 0.01));
                    va.partial_cmp(&vb).unwrap()
                })
                .unwrap()
        };
        let peaks: Vec<usize> = texts[..3].iter().map(|t| peak_time(t)).collect();
        assert_ne!(peaks[0], peaks[1]);
        assert_ne!(peaks[1], peaks[2]);
    }

    #[test]
    fn test_dropping_colors_shrinks_layers() {
        let style = HoloStyle::new();
        let mut config = style.default_config();
        config.text = "X".into();
        config.tertiary_color = None;
        config.accent_color = None;
        let pipeline = style.build_pipeline(&config).unwrap();
        assert_eq!(pipeline.text_ops().len(), 2);
    }

    #[test]
    fn test_main_layer_static_and_last() {
        let pipeline = build(bundle(&[("text", "HOLO".into())]));
        let main = *pipeline.text_ops().last().unwrap();
        assert_eq!(main.color, "0xEAEAF2");
        assert!(!main.alpha.is_animated());
    }
}
