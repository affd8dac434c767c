//! # Layer Compositor
//!
//! Assembles draw operations into a correctly ordered pipeline. Families
//! declare *which* layers they want; the stack owns *where* each layer sits,
//! so the z-order contract holds no matter what order a family pushes in:
//! least-visually-prominent first, the crisp main text as the last text
//! layer, and the shimmer highlight strictly after the text it overlays.
//!
//! The main text is a parameter of [`LayerStack::finish`] rather than a slot,
//! so a pipeline without it cannot be constructed.

use crate::pipeline::{
    BlurCropOp, BorderOp, CompositeOp, DrawOp, PanelOp, Pipeline, Stage, TextOp,
};

/// Ordered collector for one overlay composition
#[derive(Debug, Default)]
pub struct LayerStack {
    pre_passes: Vec<String>,
    backdrop: Option<BlurCropOp>,
    panel: Option<PanelOp>,
    border: Option<BorderOp>,
    shadow: Option<TextOp>,
    patina: Option<TextOp>,
    glow: Vec<TextOp>,
    chroma: Vec<TextOp>,
    phases: Vec<TextOp>,
    glitch: Option<TextOp>,
    shimmer: Option<TextOp>,
    post_passes: Vec<String>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer-level tone pass applied before any drawing
    pub fn pre_pass(&mut self, filter: impl Into<String>) -> &mut Self {
        self.pre_passes.push(filter.into());
        self
    }

    /// Blurred backdrop region feeding the panel (frosted-glass look);
    /// forces the multi-stage buffer form
    pub fn backdrop_blur(&mut self, op: BlurCropOp) -> &mut Self {
        self.backdrop = Some(op);
        self
    }

    /// Background panel, lowest drawn element
    pub fn panel(&mut self, op: PanelOp) -> &mut Self {
        self.panel = Some(op);
        self
    }

    /// Decorative frame above the panel
    pub fn border(&mut self, op: BorderOp) -> &mut Self {
        self.border = Some(op);
        self
    }

    /// Depth/emboss duplicate beneath the main glyphs
    pub fn shadow(&mut self, op: TextOp) -> &mut Self {
        self.shadow = Some(op);
        self
    }

    /// Aging/secondary-tint duplicate between shadow and main text
    pub fn patina(&mut self, op: TextOp) -> &mut Self {
        self.patina = Some(op);
        self
    }

    /// One glow halo; push largest and faintest first
    pub fn glow_halo(&mut self, op: TextOp) -> &mut Self {
        self.glow.push(op);
        self
    }

    /// One leg of the chromatic-aberration triad
    pub fn chroma_split(&mut self, op: TextOp) -> &mut Self {
        self.chroma.push(op);
        self
    }

    /// One phase-cycled color duplicate
    pub fn color_phase(&mut self, op: TextOp) -> &mut Self {
        self.phases.push(op);
        self
    }

    /// Glitch/flicker duplicate near the top of the stack
    pub fn glitch(&mut self, op: TextOp) -> &mut Self {
        self.glitch = Some(op);
        self
    }

    /// Moving highlight bar drawn over the finished text (panel families)
    pub fn shimmer(&mut self, op: TextOp) -> &mut Self {
        self.shimmer = Some(op);
        self
    }

    /// Renderer-level pass applied after all drawing (rotation)
    pub fn post_pass(&mut self, filter: impl Into<String>) -> &mut Self {
        self.post_passes.push(filter.into());
        self
    }

    /// Emit the pipeline; `main` is the crisp top text layer and is always
    /// the last text operation regardless of enabled effects
    pub fn finish(self, main: TextOp) -> Pipeline {
        let mut draw_ops: Vec<DrawOp> = Vec::new();

        if let Some(op) = self.panel {
            draw_ops.push(DrawOp::Panel(op));
        }
        if let Some(op) = self.border {
            draw_ops.push(DrawOp::Border(op));
        }
        if let Some(op) = self.shadow {
            draw_ops.push(DrawOp::Text(op));
        }
        if let Some(op) = self.patina {
            draw_ops.push(DrawOp::Text(op));
        }
        draw_ops.extend(self.glow.into_iter().map(DrawOp::Text));
        draw_ops.extend(self.chroma.into_iter().map(DrawOp::Text));
        draw_ops.extend(self.phases.into_iter().map(DrawOp::Text));
        if let Some(op) = self.glitch {
            draw_ops.push(DrawOp::Text(op));
        }
        draw_ops.push(DrawOp::Text(main));
        if let Some(op) = self.shimmer {
            draw_ops.push(DrawOp::Highlight(op));
        }
        draw_ops.extend(self.post_passes.into_iter().map(DrawOp::PrePass));

        match self.backdrop {
            None => {
                let mut ops: Vec<DrawOp> =
                    self.pre_passes.into_iter().map(DrawOp::PrePass).collect();
                ops.extend(draw_ops);
                Pipeline::linear(ops)
            }
            Some(blur) => {
                // split -> blurred crop -> composite back -> draw; producers
                // stay ahead of consumers so the renderer sees a valid DAG
                let composite_pos = blur.pos.clone();
                let mut split_ops: Vec<DrawOp> =
                    self.pre_passes.into_iter().map(DrawOp::PrePass).collect();
                split_ops.push(DrawOp::Split(2));

                Pipeline::staged(vec![
                    Stage::labeled(vec!["0:v"], vec!["bg", "panelsrc"], split_ops),
                    Stage::labeled(
                        vec!["panelsrc"],
                        vec!["panelblur"],
                        vec![DrawOp::BlurCrop(blur)],
                    ),
                    Stage::labeled(
                        vec!["bg", "panelblur"],
                        vec!["glassed"],
                        vec![DrawOp::Composite(CompositeOp { pos: composite_pos })],
                    ),
                    Stage::labeled(vec!["glassed"], vec!["out"], draw_ops),
                ])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;
    use crate::position::{anchored_text_position, Anchor, Position};

    fn text(label: &str, alpha: f64) -> TextOp {
        TextOp::new(
            label,
            "Sans",
            40,
            "white",
            Expr::num(alpha),
            anchored_text_position(Anchor::Center, 0, 0),
        )
    }

    fn panel() -> PanelOp {
        PanelOp {
            pos: anchored_text_position(Anchor::Center, 0, 0),
            width: 300.0,
            height: 80.0,
            color: "white".into(),
            alpha: Expr::num(0.2),
        }
    }

    #[test]
    fn test_main_text_is_last_text_op() {
        let mut stack = LayerStack::new();
        stack
            .glitch(text("glitch", 0.8))
            .glow_halo(text("halo", 0.3))
            .shadow(text("shadow", 0.4));
        let pipeline = stack.finish(text("main", 1.0));

        // every optional effect precedes the main layer
        let texts = pipeline.text_ops();
        assert_eq!(texts.last().unwrap().text, "main");
    }

    #[test]
    fn test_shimmer_drawn_after_main() {
        let mut stack = LayerStack::new();
        stack.panel(panel()).shimmer(text("shimmer", 0.25));
        let pipeline = stack.finish(text("main", 1.0));

        // the highlight follows the main layer, but the main layer stays
        // the last text operation
        assert!(matches!(
            pipeline.ops().last().unwrap(),
            DrawOp::Highlight(op) if op.text == "shimmer"
        ));
        assert_eq!(pipeline.text_ops().last().unwrap().text, "main");
    }

    #[test]
    fn test_slot_order_independent_of_push_order() {
        let mut a = LayerStack::new();
        a.glitch(text("g", 0.5)).shadow(text("s", 0.4));
        let mut b = LayerStack::new();
        b.shadow(text("s", 0.4)).glitch(text("g", 0.5));
        assert_eq!(a.finish(text("m", 1.0)), b.finish(text("m", 1.0)));
    }

    #[test]
    fn test_bare_stack_still_draws_main() {
        let pipeline = LayerStack::new().finish(text("main", 1.0));
        assert!(pipeline.is_linear());
        assert_eq!(pipeline.text_ops().len(), 1);
    }

    #[test]
    fn test_backdrop_produces_dependency_ordered_stages() {
        let mut stack = LayerStack::new();
        stack.backdrop_blur(BlurCropOp {
            pos: Position::new(Expr::num(100.0), Expr::num(100.0)),
            width: 400.0,
            height: 120.0,
            radius: 12,
        });
        stack.panel(panel());
        let pipeline = stack.finish(text("main", 1.0));

        assert!(!pipeline.is_linear());
        assert_eq!(pipeline.stages.len(), 4);
        // each stage's inputs were produced by an earlier stage (or the source)
        let mut known = vec!["0:v".to_string()];
        for stage in &pipeline.stages {
            for input in &stage.inputs {
                assert!(known.contains(input), "consumer before producer: {input}");
            }
            known.extend(stage.outputs.iter().cloned());
        }
    }

    #[test]
    fn test_pre_pass_leads_post_pass_trails() {
        let mut stack = LayerStack::new();
        stack.pre_pass("eq=saturation=0.7");
        stack.post_pass("rotate=0.05");
        let pipeline = stack.finish(text("main", 1.0));

        let ops: Vec<&DrawOp> = pipeline.ops().collect();
        assert!(matches!(ops.first().unwrap(), DrawOp::PrePass(f) if f.starts_with("eq=")));
        assert!(matches!(ops.last().unwrap(), DrawOp::PrePass(f) if f.starts_with("rotate=")));
    }
}
