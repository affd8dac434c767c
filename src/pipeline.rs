//! # Draw Pipelines
//!
//! The render-engine-agnostic description of a composed overlay: an ordered
//! sequence of drawing operations, composited back-to-front, optionally split
//! across named intermediate buffers for multi-stage effects. Serialization
//! into the renderer's filter-graph syntax lives at the render boundary
//! (`render::filter`), never here.

use crate::expr::Expr;
use crate::position::Position;

/// Outline stroke around text glyphs
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub width: u32,
    pub color: String,
}

/// Hard drop shadow behind text glyphs
#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    pub dx: i32,
    pub dy: i32,
    pub color: String,
}

/// A single text layer
#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    pub text: String,
    pub font: String,
    pub font_size: u32,
    pub color: String,
    /// Modulated opacity; constant or time-varying
    pub alpha: Expr,
    pub pos: Position,
    pub outline: Option<Outline>,
    pub shadow: Option<Shadow>,
}

impl TextOp {
    pub fn new(text: impl Into<String>, font: impl Into<String>, font_size: u32, color: impl Into<String>, alpha: Expr, pos: Position) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            font_size,
            color: color.into(),
            alpha,
            pos,
            outline: None,
            shadow: None,
        }
    }

    pub fn with_outline(mut self, width: u32, color: impl Into<String>) -> Self {
        self.outline = Some(Outline { width, color: color.into() });
        self
    }

    pub fn with_shadow(mut self, dx: i32, dy: i32, color: impl Into<String>) -> Self {
        self.shadow = Some(Shadow { dx, dy, color: color.into() });
        self
    }
}

/// A filled rectangle (background panel)
#[derive(Debug, Clone, PartialEq)]
pub struct PanelOp {
    pub pos: Position,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub alpha: Expr,
}

/// A rectangle outline (decorative frame)
///
/// Dimensions are expressions: panel borders use the estimated panel size,
/// full-canvas frames reference the symbolic frame size.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderOp {
    pub pos: Position,
    pub width: Expr,
    pub height: Expr,
    pub color: String,
    pub alpha: Expr,
    pub thickness: u32,
}

/// Crop a region and blur it, producing the backdrop for a frosted panel
#[derive(Debug, Clone, PartialEq)]
pub struct BlurCropOp {
    pub pos: Position,
    pub width: f64,
    pub height: f64,
    pub radius: u32,
}

/// Composite the stage's second input over its first at the given position
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeOp {
    pub pos: Position,
}

/// One compositing primitive
///
/// Order within a pipeline is significant: operations are applied
/// back-to-front, so position in the list encodes visual stacking.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Opaque renderer-level pass (tone curves, grain, rotation); the engine
    /// treats the content as a black box
    PrePass(String),
    /// Structural fan-out of a buffer into `n` identical copies
    Split(usize),
    BlurCrop(BlurCropOp),
    Composite(CompositeOp),
    Panel(PanelOp),
    Border(BorderOp),
    Text(TextOp),
    /// Moving highlight over a finished panel; drawn with the glyph
    /// machinery but not a text layer, so it may follow the main text
    Highlight(TextOp),
}

/// A labeled segment of the pipeline
///
/// Stages with no labels chain implicitly; labeled stages form a small
/// producers-before-consumers DAG (two or three stages at most for current
/// families, so no cycle handling is required).
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub ops: Vec<DrawOp>,
}

impl Stage {
    pub fn linear(ops: Vec<DrawOp>) -> Self {
        Self {
            inputs: Vec::new(),
            outputs: Vec::new(),
            ops,
        }
    }

    pub fn labeled(inputs: Vec<&str>, outputs: Vec<&str>, ops: Vec<DrawOp>) -> Self {
        Self {
            inputs: inputs.into_iter().map(String::from).collect(),
            outputs: outputs.into_iter().map(String::from).collect(),
            ops,
        }
    }
}

/// An ordered sequence of stages describing one composed overlay
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub stages: Vec<Stage>,
}

impl Pipeline {
    /// A single-stage pipeline with implicit input and output
    pub fn linear(ops: Vec<DrawOp>) -> Self {
        Self {
            stages: vec![Stage::linear(ops)],
        }
    }

    pub fn staged(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// True when the pipeline is a single unlabeled chain
    pub fn is_linear(&self) -> bool {
        self.stages.len() == 1
            && self.stages[0].inputs.is_empty()
            && self.stages[0].outputs.is_empty()
    }

    /// All operations across stages, in emission order
    pub fn ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.stages.iter().flat_map(|s| s.ops.iter())
    }

    /// Text operations only, in emission order
    pub fn text_ops(&self) -> Vec<&TextOp> {
        self.ops()
            .filter_map(|op| match op {
                DrawOp::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;
    use crate::position::{anchored_text_position, Anchor};

    fn text_op(label: &str) -> TextOp {
        TextOp::new(
            label,
            "Sans",
            40,
            "white",
            Expr::num(1.0),
            anchored_text_position(Anchor::Center, 0, 0),
        )
    }

    #[test]
    fn test_linear_pipeline_shape() {
        let p = Pipeline::linear(vec![
            DrawOp::PrePass("eq=saturation=0.8".into()),
            DrawOp::Text(text_op("a")),
        ]);
        assert!(p.is_linear());
        assert_eq!(p.ops().count(), 2);
        assert_eq!(p.text_ops().len(), 1);
    }

    #[test]
    fn test_staged_pipeline_not_linear() {
        let p = Pipeline::staged(vec![
            Stage::labeled(vec!["0:v"], vec!["bg", "src"], vec![DrawOp::Split(2)]),
            Stage::labeled(vec!["src"], vec!["out"], vec![DrawOp::Text(text_op("b"))]),
        ]);
        assert!(!p.is_linear());
    }

    #[test]
    fn test_ops_preserve_stage_order() {
        let p = Pipeline::staged(vec![
            Stage::labeled(vec!["0:v"], vec!["x"], vec![DrawOp::Text(text_op("first"))]),
            Stage::labeled(vec!["x"], vec!["out"], vec![DrawOp::Text(text_op("second"))]),
        ]);
        let texts: Vec<&str> = p.text_ops().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }
}
