//! # Filter-Graph Serialization
//!
//! The one place where typed pipelines become the renderer's textual
//! filter-graph syntax. Linear pipelines serialize to a flat comma-joined
//! chain (`-vf` form); staged pipelines become a semicolon-joined labeled
//! graph with `[input]op[output]` tags (`-filter_complex` form).
//!
//! FFmpeg names the same symbolic quantity differently per filter (drawtext
//! sees the frame as `w`/`h`, drawbox and crop as `iw`/`ih`, overlay as
//! `W`/`H`), so expression rendering is parameterized by a per-filter
//! variable table.

use crate::expr::{BinaryOp, Expr, Func, Var};
use crate::pipeline::{
    BlurCropOp, BorderOp, CompositeOp, DrawOp, PanelOp, Pipeline, Stage, TextOp,
};

/// A serialized filter graph plus the flag deciding `-vf` vs `-filter_complex`
#[derive(Debug, Clone, PartialEq)]
pub struct FilterGraph {
    pub graph: String,
    pub labeled: bool,
}

/// Per-filter variable naming table
#[derive(Debug, Clone, Copy)]
struct VarNames {
    frame_w: &'static str,
    frame_h: &'static str,
    text_w: &'static str,
    text_h: &'static str,
}

const DRAWTEXT_VARS: VarNames = VarNames {
    frame_w: "w",
    frame_h: "h",
    text_w: "text_w",
    text_h: "text_h",
};

// drawbox/crop have no text geometry; text vars should never reach them
const BOX_VARS: VarNames = VarNames {
    frame_w: "iw",
    frame_h: "ih",
    text_w: "0",
    text_h: "0",
};

const OVERLAY_VARS: VarNames = VarNames {
    frame_w: "W",
    frame_h: "H",
    text_w: "w",
    text_h: "h",
};

/// Serialize a pipeline into the renderer's filter-graph string
pub fn serialize(pipeline: &Pipeline) -> FilterGraph {
    if pipeline.is_linear() {
        FilterGraph {
            graph: render_ops(&pipeline.stages[0].ops),
            labeled: false,
        }
    } else {
        let graph = pipeline
            .stages
            .iter()
            .map(render_stage)
            .collect::<Vec<_>>()
            .join(";");
        FilterGraph { graph, labeled: true }
    }
}

fn render_stage(stage: &Stage) -> String {
    let inputs: String = stage.inputs.iter().map(|l| format!("[{l}]")).collect();
    let outputs: String = stage.outputs.iter().map(|l| format!("[{l}]")).collect();
    format!("{}{}{}", inputs, render_ops(&stage.ops), outputs)
}

fn render_ops(ops: &[DrawOp]) -> String {
    ops.iter().map(render_op).collect::<Vec<_>>().join(",")
}

fn render_op(op: &DrawOp) -> String {
    match op {
        DrawOp::PrePass(raw) => raw.clone(),
        DrawOp::Split(n) => format!("split={n}"),
        DrawOp::BlurCrop(op) => render_blur_crop(op),
        DrawOp::Composite(op) => render_composite(op),
        DrawOp::Panel(op) => render_panel(op),
        DrawOp::Border(op) => render_border(op),
        DrawOp::Text(op) => render_text(op),
        DrawOp::Highlight(op) => render_text(op),
    }
}

fn render_text(op: &TextOp) -> String {
    let mut parts = vec![format!("text='{}'", escape_text(&op.text))];

    // a path means a font file; anything else goes through fontconfig
    if op.font.contains('/') || op.font.contains('.') {
        parts.push(format!("fontfile='{}'", op.font));
    } else {
        parts.push(format!("font='{}'", op.font));
    }
    parts.push(format!("fontsize={}", op.font_size));

    match op.alpha.as_num() {
        Some(a) if (a - 1.0).abs() < f64::EPSILON => {
            parts.push(format!("fontcolor={}", op.color));
        }
        Some(a) => {
            parts.push(format!("fontcolor={}@{}", op.color, fmt_num(a)));
        }
        None => {
            parts.push(format!("fontcolor={}", op.color));
            parts.push(format!("alpha='{}'", render_expr(&op.alpha, &DRAWTEXT_VARS)));
        }
    }

    parts.push(format!("x={}", coord(&op.pos.x, &DRAWTEXT_VARS)));
    parts.push(format!("y={}", coord(&op.pos.y, &DRAWTEXT_VARS)));

    if let Some(outline) = &op.outline {
        parts.push(format!("borderw={}", outline.width));
        parts.push(format!("bordercolor={}", outline.color));
    }
    if let Some(shadow) = &op.shadow {
        parts.push(format!("shadowx={}", shadow.dx));
        parts.push(format!("shadowy={}", shadow.dy));
        parts.push(format!("shadowcolor={}", shadow.color));
    }

    format!("drawtext={}", parts.join(":"))
}

fn render_panel(op: &PanelOp) -> String {
    format!(
        "drawbox=x={}:y={}:w={}:h={}:color={}@{}:t=fill",
        coord(&op.pos.x, &BOX_VARS),
        coord(&op.pos.y, &BOX_VARS),
        fmt_num(op.width),
        fmt_num(op.height),
        op.color,
        fmt_num(op.alpha.as_num().unwrap_or(1.0)),
    )
}

fn render_border(op: &BorderOp) -> String {
    format!(
        "drawbox=x={}:y={}:w={}:h={}:color={}@{}:t={}",
        coord(&op.pos.x, &BOX_VARS),
        coord(&op.pos.y, &BOX_VARS),
        coord(&op.width, &BOX_VARS),
        coord(&op.height, &BOX_VARS),
        op.color,
        fmt_num(op.alpha.as_num().unwrap_or(1.0)),
        op.thickness,
    )
}

fn render_blur_crop(op: &BlurCropOp) -> String {
    format!(
        "crop={}:{}:{}:{},boxblur={}:{}",
        fmt_num(op.width),
        fmt_num(op.height),
        coord(&op.pos.x, &BOX_VARS),
        coord(&op.pos.y, &BOX_VARS),
        op.radius,
        op.radius,
    )
}

fn render_composite(op: &CompositeOp) -> String {
    format!(
        "overlay=x={}:y={}",
        coord(&op.pos.x, &OVERLAY_VARS),
        coord(&op.pos.y, &OVERLAY_VARS),
    )
}

/// Numbers go bare, symbolic formulas get quoted
fn coord(expr: &Expr, vars: &VarNames) -> String {
    match expr.as_num() {
        Some(n) => fmt_num(n),
        None => format!("'{}'", render_expr(expr, vars)),
    }
}

fn render_expr(expr: &Expr, vars: &VarNames) -> String {
    match expr {
        Expr::Num(n) => fmt_num(*n),
        Expr::Var(Var::Time) => "t".to_string(),
        Expr::Var(Var::FrameW) => vars.frame_w.to_string(),
        Expr::Var(Var::FrameH) => vars.frame_h.to_string(),
        Expr::Var(Var::TextW) => vars.text_w.to_string(),
        Expr::Var(Var::TextH) => vars.text_h.to_string(),
        Expr::Neg(e) => format!("-({})", render_expr(e, vars)),
        Expr::Binary { op, left, right } => {
            let symbol = match op {
                BinaryOp::Add => "+",
                BinaryOp::Sub => "-",
                BinaryOp::Mul => "*",
                BinaryOp::Div => "/",
            };
            format!("({}{}{})", render_expr(left, vars), symbol, render_expr(right, vars))
        }
        Expr::Call { func, args } => {
            let name = match func {
                Func::Sin => "sin",
                Func::Cos => "cos",
                Func::Abs => "abs",
                Func::Floor => "floor",
                Func::Min => "min",
                Func::Max => "max",
                Func::Mod => "mod",
                Func::Eq => "eq",
                Func::If => "if",
            };
            let rendered: Vec<String> = args.iter().map(|a| render_call_arg(a, vars)).collect();
            format!("{}({})", name, rendered.join(","))
        }
    }
}

/// Call arguments are already delimited by the call's own parentheses, so a
/// top-level binary expression can shed its redundant outer pair
fn render_call_arg(expr: &Expr, vars: &VarNames) -> String {
    match expr {
        Expr::Binary { .. } => {
            let wrapped = render_expr(expr, vars);
            wrapped[1..wrapped.len() - 1].to_string()
        }
        _ => render_expr(expr, vars),
    }
}

/// Shortest clean decimal form; avoids "68.000000" noise in graphs
fn fmt_num(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e12 {
        format!("{}", n as i64)
    } else {
        let s = format!("{:.4}", n);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Escape drawtext content against both the drawtext parser and the
/// filter-graph parser
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            ':' => out.push_str("\\:"),
            '%' => out.push_str("\\%"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '[' => out.push_str("\\["),
            ']' => out.push_str("\\]"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{anchored_text_position, Anchor, Position};

    fn plain_text(text: &str) -> TextOp {
        TextOp::new(
            text,
            "Sans",
            48,
            "white",
            Expr::num(1.0),
            anchored_text_position(Anchor::TopLeft, 30, 30),
        )
    }

    #[test]
    fn test_flat_chain_comma_joined() {
        let pipeline = Pipeline::linear(vec![
            DrawOp::PrePass("eq=saturation=0.55:brightness=0.03".into()),
            DrawOp::Text(plain_text("HELLO")),
        ]);
        let fg = serialize(&pipeline);
        assert!(!fg.labeled);
        assert_eq!(fg.graph.matches(',').count(), 1);
        assert!(fg.graph.starts_with("eq=saturation"));
        assert!(fg.graph.contains("drawtext=text='HELLO'"));
    }

    #[test]
    fn test_static_text_op_form() {
        let fg = serialize(&Pipeline::linear(vec![DrawOp::Text(plain_text("HI"))]));
        assert_eq!(
            fg.graph,
            "drawtext=text='HI':font='Sans':fontsize=48:fontcolor=white:x=30:y=30"
        );
    }

    #[test]
    fn test_symbolic_position_quoted() {
        let op = TextOp::new(
            "X",
            "Sans",
            48,
            "white",
            Expr::num(1.0),
            anchored_text_position(Anchor::BottomRight, 30, 30),
        );
        let fg = serialize(&Pipeline::linear(vec![DrawOp::Text(op)]));
        assert!(fg.graph.contains("x='((w-text_w)-30)'"));
        assert!(fg.graph.contains("y='((h-text_h)-30)'"));
    }

    #[test]
    fn test_animated_alpha_rendered_as_expression() {
        let mut op = plain_text("X");
        op.alpha = crate::expr::pulse(0.8, 0.6, 0.4, 2.0, 0.0);
        let fg = serialize(&Pipeline::linear(vec![DrawOp::Text(op)]));
        assert!(fg.graph.contains("alpha='(0.8*(0.6+(0.4*sin((t*2)+0))))'"));
    }

    #[test]
    fn test_constant_alpha_folded_into_fontcolor() {
        let mut op = plain_text("X");
        op.alpha = Expr::num(0.45);
        let fg = serialize(&Pipeline::linear(vec![DrawOp::Text(op)]));
        assert!(fg.graph.contains("fontcolor=white@0.45"));
        assert!(!fg.graph.contains("alpha="));
    }

    #[test]
    fn test_labeled_graph_semicolon_joined() {
        let pipeline = Pipeline::staged(vec![
            Stage::labeled(vec!["0:v"], vec!["bg", "src"], vec![DrawOp::Split(2)]),
            Stage::labeled(
                vec!["src"],
                vec!["blur"],
                vec![DrawOp::BlurCrop(BlurCropOp {
                    pos: Position::new(Expr::num(100.0), Expr::num(200.0)),
                    width: 400.0,
                    height: 120.0,
                    radius: 12,
                })],
            ),
            Stage::labeled(
                vec!["bg", "blur"],
                vec!["out"],
                vec![DrawOp::Composite(CompositeOp {
                    pos: Position::new(Expr::num(100.0), Expr::num(200.0)),
                })],
            ),
        ]);
        let fg = serialize(&pipeline);
        assert!(fg.labeled);
        let stages: Vec<&str> = fg.graph.split(';').collect();
        assert_eq!(stages[0], "[0:v]split=2[bg][src]");
        assert_eq!(stages[1], "[src]crop=400:120:100:200,boxblur=12:12[blur]");
        assert_eq!(stages[2], "[bg][blur]overlay=x=100:y=200[out]");
    }

    #[test]
    fn test_panel_and_border_forms() {
        let pos = Position::new(Expr::num(50.0), Expr::num(60.0));
        let panel = PanelOp {
            pos: pos.clone(),
            width: 300.0,
            height: 90.0,
            color: "white".into(),
            alpha: Expr::num(0.18),
        };
        let border = BorderOp {
            pos,
            width: Expr::num(300.0),
            height: Expr::num(90.0),
            color: "white".into(),
            alpha: Expr::num(0.4),
            thickness: 2,
        };
        let fg = serialize(&Pipeline::linear(vec![
            DrawOp::Panel(panel),
            DrawOp::Border(border),
        ]));
        assert!(fg
            .graph
            .contains("drawbox=x=50:y=60:w=300:h=90:color=white@0.18:t=fill"));
        assert!(fg.graph.contains("drawbox=x=50:y=60:w=300:h=90:color=white@0.4:t=2"));
    }

    #[test]
    fn test_border_with_symbolic_size_uses_box_vars() {
        let border = BorderOp {
            pos: Position::new(Expr::num(24.0), Expr::num(24.0)),
            width: Expr::frame_w().sub(48.0),
            height: Expr::frame_h().sub(48.0),
            color: "white".into(),
            alpha: Expr::num(1.0),
            thickness: 3,
        };
        let fg = serialize(&Pipeline::linear(vec![DrawOp::Border(border)]));
        assert!(fg.graph.contains("w='(iw-48)'"));
        assert!(fg.graph.contains("h='(ih-48)'"));
    }

    #[test]
    fn test_text_escaping() {
        let fg = serialize(&Pipeline::linear(vec![DrawOp::Text(plain_text(
            "100%: it's done, really; [ok]",
        ))]));
        assert!(fg
            .graph
            .contains("text='100\\%\\: it\\'s done\\, really\\; \\[ok\\]'"));
    }

    #[test]
    fn test_serialization_deterministic() {
        let p = Pipeline::linear(vec![DrawOp::Text(plain_text("SAME"))]);
        assert_eq!(serialize(&p), serialize(&p));
    }
}
