use crate::{
    error::Result,
    expr::{self, Expr},
    pipeline::{Pipeline, TextOp},
    position::{anchored_text_position, Anchor},
    styles::compositor::LayerStack,
    styles::{bundle, Preset, Style, StyleConfig},
};

use super::{
    FLICKER, FLICKER_SPEED, GLOW, GLOW_INTENSITY, HALO_OPACITY, OUTLINE_WIDTH, PULSE, PULSE_SPEED,
};

// Halo opacity ladder, applied largest-halo first so opacity falls off
// strictly toward the main layer
const HALO_FALLOFF: [f64; 3] = [1.0, 0.55, 0.3];

/// Neon-sign text effect
pub struct NeonStyle;

impl NeonStyle {
    pub fn new() -> Self {
        Self
    }

    /// Halo font sizes, widest first: base + 2i, base + i, base + 2
    fn halo_sizes(base: u32, intensity: u32) -> [u32; 3] {
        [base + 2 * intensity, base + intensity, base + 2]
    }
}

impl Style for NeonStyle {
    fn name(&self) -> &str {
        "neon"
    }

    fn description(&self) -> &str {
        "Glowing neon-tube text with layered halos, optional breathing pulse and sign flicker"
    }

    fn default_config(&self) -> StyleConfig {
        StyleConfig {
            font: "Sans".to_string(),
            font_size: 48,
            primary_color: "0x39FF14".to_string(),
            anchor: self.default_anchor(),
            offset_y: 80,
            ..StyleConfig::default()
        }
        .set(GLOW, true)
        .set(GLOW_INTENSITY, 8)
        .set(HALO_OPACITY, 0.45f32)
        .set(PULSE, false)
        .set(PULSE_SPEED, 1.6f32)
        .set(FLICKER, false)
        .set(FLICKER_SPEED, 2.2f32)
        .set(OUTLINE_WIDTH, 0)
    }

    fn default_anchor(&self) -> Anchor {
        Anchor::BottomCenter
    }

    fn presets(&self) -> Vec<Preset> {
        vec![
            Preset::new("classic", bundle(&[])),
            Preset::new(
                "breathing",
                bundle(&[(PULSE, true.into()), (PULSE_SPEED, 1.2f32.into())]),
            ),
            Preset::new(
                "sign",
                bundle(&[(FLICKER, true.into()), (FLICKER_SPEED, 2.8f32.into())]),
            ),
            Preset::new(
                "magenta",
                bundle(&[("color", "0xFF2BD6".into()), (HALO_OPACITY, 0.55f32.into())]),
            ),
        ]
    }

    fn build_pipeline(&self, config: &StyleConfig) -> Result<Pipeline> {
        let base = config.opacity as f64;
        let pos = anchored_text_position(config.anchor, config.offset_x, config.offset_y);
        let mut stack = LayerStack::new();

        if config.get_bool_or(GLOW, true) {
            let intensity = config.get_f32_or(GLOW_INTENSITY, 8.0).max(0.0) as u32;
            let halo_base = config.get_f32_or(HALO_OPACITY, 0.45) as f64 * base;
            let pulse_on = config.get_bool_or(PULSE, false);
            let speed = config.get_f32_or(PULSE_SPEED, 1.6) as f64;

            let sizes = Self::halo_sizes(config.font_size, intensity);
            for (i, size) in sizes.into_iter().enumerate() {
                let level = halo_base * HALO_FALLOFF[i];
                let alpha = if pulse_on {
                    // staggered phases keep the halos from breathing in unison
                    expr::pulse(level, 0.6, 0.4, speed, i as f64 * 0.7)
                } else {
                    Expr::num(level)
                };
                stack.glow_halo(TextOp::new(
                    &config.text,
                    &config.font,
                    size,
                    &config.primary_color,
                    alpha,
                    pos.clone(),
                ));
            }
        }

        let main_alpha = if config.get_bool_or(FLICKER, false) {
            let speed = config.get_f32_or(FLICKER_SPEED, 2.2) as f64;
            // one dark tick in five reads as a failing tube
            expr::blink(base, 0.12, speed, 2.0, 5.0)
        } else {
            Expr::num(base)
        };

        let mut main = TextOp::new(
            &config.text,
            &config.font,
            config.font_size,
            &config.primary_color,
            main_alpha,
            pos,
        );
        let outline = config.get_f32_or(OUTLINE_WIDTH, 0.0) as u32;
        if outline > 0 {
            main = main.with_outline(outline, "white");
        }

        Ok(stack.finish(main))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::OverrideBundle;

    fn build(overrides: OverrideBundle) -> Pipeline {
        let style = NeonStyle::new();
        let config = StyleConfig::resolve(&style.default_config(), &overrides).unwrap();
        style.build_pipeline(&config).unwrap()
    }

    #[test]
    fn test_glow_layer_sizes_and_order() {
        // 52pt base with intensity 8 gives halos at 68, 60, 54, then main
        let pipeline = build(bundle(&[
            ("text", "NEON".into()),
            ("font_size", 52.into()),
            (GLOW_INTENSITY, 8.into()),
        ]));

        let texts = pipeline.text_ops();
        assert_eq!(texts.len(), 4);
        let sizes: Vec<u32> = texts.iter().map(|t| t.font_size).collect();
        assert_eq!(sizes, vec![68, 60, 54, 52]);
        assert_eq!(texts.last().unwrap().text, "NEON");
    }

    #[test]
    fn test_halo_opacity_strictly_decreasing_toward_main() {
        let pipeline = build(bundle(&[("text", "GLOW".into())]));
        let texts = pipeline.text_ops();
        assert!(texts.len() >= 3, "glow needs at least two halos before main");

        let halos = &texts[..texts.len() - 1];
        let alphas: Vec<f64> = halos.iter().map(|t| t.alpha.as_num().unwrap()).collect();
        for pair in alphas.windows(2) {
            assert!(pair[0] > pair[1], "halo opacity must fall toward the main layer");
        }
    }

    #[test]
    fn test_glow_disabled_leaves_only_main() {
        let pipeline = build(bundle(&[("text", "PLAIN".into()), (GLOW, false.into())]));
        assert_eq!(pipeline.text_ops().len(), 1);
    }

    #[test]
    fn test_pulse_animates_halos_only() {
        let pipeline = build(bundle(&[("text", "X".into()), (PULSE, true.into())]));
        let texts = pipeline.text_ops();
        let (main, halos) = texts.split_last().unwrap();
        assert!(halos.iter().all(|t| t.alpha.is_animated()));
        assert!(!main.alpha.is_animated());
    }

    #[test]
    fn test_flicker_animates_main() {
        let pipeline = build(bundle(&[("text", "X".into()), (FLICKER, true.into())]));
        assert!(pipeline.text_ops().last().unwrap().alpha.is_animated());
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = build(bundle(&[("text", "SAME".into()), (PULSE, true.into())]));
        let b = build(bundle(&[("text", "SAME".into()), (PULSE, true.into())]));
        assert_eq!(a, b);
    }
}
