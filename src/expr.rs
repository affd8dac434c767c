//! # Time Expressions
//!
//! Typed expression trees over a single free variable, elapsed time, plus the
//! symbolic frame/text geometry the renderer substitutes per frame. Animated
//! parameters (opacity pulses, jitter displacement, color phase cycling) are
//! built here as plain data and only serialized into the renderer's textual
//! mini-language at the render boundary.
//!
//! Every builder is a pure function of its arguments: identical inputs always
//! produce identical trees, which keeps generated pipelines reproducible.

/// Symbolic variables available to an expression
///
/// Frame and text dimensions are placeholders resolved by the renderer at
/// draw time; they are never numeric inside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Var {
    /// Elapsed time in seconds
    Time,
    /// Frame width in pixels
    FrameW,
    /// Frame height in pixels
    FrameH,
    /// Rendered text width in pixels
    TextW,
    /// Rendered text height in pixels
    TextH,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Functions understood by the renderer's expression evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Abs,
    Floor,
    Min,
    Max,
    Mod,
    Eq,
    /// `if(cond, then, else)` - cond is any nonzero value
    If,
}

/// A closed-form expression over [`Var`]s
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    Var(Var),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        func: Func,
        args: Vec<Expr>,
    },
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Num(value)
    }
}

impl From<u32> for Expr {
    fn from(value: u32) -> Self {
        Expr::Num(value as f64)
    }
}

impl Expr {
    pub fn num(value: f64) -> Self {
        Expr::Num(value)
    }

    pub fn time() -> Self {
        Expr::Var(Var::Time)
    }

    pub fn frame_w() -> Self {
        Expr::Var(Var::FrameW)
    }

    pub fn frame_h() -> Self {
        Expr::Var(Var::FrameH)
    }

    pub fn text_w() -> Self {
        Expr::Var(Var::TextW)
    }

    pub fn text_h() -> Self {
        Expr::Var(Var::TextH)
    }

    fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn add(self, rhs: impl Into<Expr>) -> Self {
        Expr::binary(BinaryOp::Add, self, rhs.into())
    }

    pub fn sub(self, rhs: impl Into<Expr>) -> Self {
        Expr::binary(BinaryOp::Sub, self, rhs.into())
    }

    pub fn mul(self, rhs: impl Into<Expr>) -> Self {
        Expr::binary(BinaryOp::Mul, self, rhs.into())
    }

    pub fn div(self, rhs: impl Into<Expr>) -> Self {
        Expr::binary(BinaryOp::Div, self, rhs.into())
    }

    pub fn neg(self) -> Self {
        Expr::Neg(Box::new(self))
    }

    pub fn sin(self) -> Self {
        Expr::Call { func: Func::Sin, args: vec![self] }
    }

    pub fn cos(self) -> Self {
        Expr::Call { func: Func::Cos, args: vec![self] }
    }

    pub fn abs(self) -> Self {
        Expr::Call { func: Func::Abs, args: vec![self] }
    }

    pub fn floor(self) -> Self {
        Expr::Call { func: Func::Floor, args: vec![self] }
    }

    pub fn min(self, rhs: impl Into<Expr>) -> Self {
        Expr::Call { func: Func::Min, args: vec![self, rhs.into()] }
    }

    pub fn max(self, rhs: impl Into<Expr>) -> Self {
        Expr::Call { func: Func::Max, args: vec![self, rhs.into()] }
    }

    pub fn modulo(self, rhs: impl Into<Expr>) -> Self {
        Expr::Call { func: Func::Mod, args: vec![self, rhs.into()] }
    }

    pub fn eq(self, rhs: impl Into<Expr>) -> Self {
        Expr::Call { func: Func::Eq, args: vec![self, rhs.into()] }
    }

    /// `if(self, then, otherwise)`
    pub fn branch(self, then: impl Into<Expr>, otherwise: impl Into<Expr>) -> Self {
        Expr::Call {
            func: Func::If,
            args: vec![self, then.into(), otherwise.into()],
        }
    }

    /// The literal value, if this expression is a plain number
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Expr::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether the expression references elapsed time anywhere
    pub fn is_animated(&self) -> bool {
        match self {
            Expr::Num(_) => false,
            Expr::Var(v) => *v == Var::Time,
            Expr::Neg(e) => e.is_animated(),
            Expr::Binary { left, right, .. } => left.is_animated() || right.is_animated(),
            Expr::Call { args, .. } => args.iter().any(Expr::is_animated),
        }
    }

    /// Evaluate against a concrete environment
    ///
    /// The renderer owns evaluation in production; this exists so tests can
    /// check animation envelopes numerically without a renderer.
    pub fn eval(&self, env: &EvalEnv) -> f64 {
        match self {
            Expr::Num(n) => *n,
            Expr::Var(Var::Time) => env.t,
            Expr::Var(Var::FrameW) => env.frame_w,
            Expr::Var(Var::FrameH) => env.frame_h,
            Expr::Var(Var::TextW) => env.text_w,
            Expr::Var(Var::TextH) => env.text_h,
            Expr::Neg(e) => -e.eval(env),
            Expr::Binary { op, left, right } => {
                let l = left.eval(env);
                let r = right.eval(env);
                match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => l / r,
                }
            }
            Expr::Call { func, args } => {
                let v = |i: usize| args[i].eval(env);
                match func {
                    Func::Sin => v(0).sin(),
                    Func::Cos => v(0).cos(),
                    Func::Abs => v(0).abs(),
                    Func::Floor => v(0).floor(),
                    Func::Min => v(0).min(v(1)),
                    Func::Max => v(0).max(v(1)),
                    Func::Mod => v(0) % v(1),
                    Func::Eq => {
                        if v(0) == v(1) {
                            1.0
                        } else {
                            0.0
                        }
                    }
                    Func::If => {
                        if v(0) != 0.0 {
                            v(1)
                        } else {
                            v(2)
                        }
                    }
                }
            }
        }
    }
}

/// Concrete variable bindings for [`Expr::eval`]
#[derive(Debug, Clone, Copy)]
pub struct EvalEnv {
    pub t: f64,
    pub frame_w: f64,
    pub frame_h: f64,
    pub text_w: f64,
    pub text_h: f64,
}

impl EvalEnv {
    /// A 1920x1080 frame with a nominal text box, at the given time
    pub fn at(t: f64) -> Self {
        Self {
            t,
            frame_w: 1920.0,
            frame_h: 1080.0,
            text_w: 400.0,
            text_h: 60.0,
        }
    }
}

/// Trig waveform selector for jitter displacement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sin,
    Cos,
}

/// Breathing/glow intensity: `base * (floor_frac + swing_frac * sin(t*speed + phase))`
///
/// Callers keep `floor_frac + swing_frac <= 1` so the result stays within
/// `[0, base]`; the value is passed to the renderer unclamped.
pub fn pulse(base: f64, floor_frac: f64, swing_frac: f64, speed: f64, phase: f64) -> Expr {
    Expr::num(base).mul(
        Expr::num(floor_frac).add(Expr::num(swing_frac).mul(Expr::time().mul(speed).add(phase).sin())),
    )
}

/// Hard on/off toggle: `base` while `floor(t*speed*granularity) mod duty != 0`,
/// `base*dim` on the remaining ticks
pub fn blink(base: f64, dim: f64, speed: f64, granularity: f64, duty: f64) -> Expr {
    Expr::time()
        .mul(speed)
        .mul(granularity)
        .floor()
        .modulo(duty)
        .eq(0.0)
        .branch(base * dim, base)
}

/// Oscillating displacement around a center coordinate
///
/// Axes get distinct `freq_mult` values so x and y never move in lockstep.
pub fn jitter(center: Expr, amplitude: f64, speed: f64, freq_mult: f64, waveform: Waveform) -> Expr {
    let angle = Expr::time().mul(speed).mul(freq_mult);
    let wave = match waveform {
        Waveform::Sin => angle.sin(),
        Waveform::Cos => angle.cos(),
    };
    center.add(Expr::num(amplitude).mul(wave))
}

/// Phase-offset opacity for color layer `index` of a cycling set:
/// `base * |sin(t*speed + index*phase_step)|`
pub fn phase_cycled(base: f64, speed: f64, index: usize, phase_step: f64) -> Expr {
    Expr::num(base).mul(Expr::time().mul(speed).add(index as f64 * phase_step).sin().abs())
}

/// Monotone fade-in reaching `target` exactly at `t = target/rate`:
/// `min(t*rate, target)`
pub fn reveal(rate: f64, target: f64) -> Expr {
    Expr::time().mul(rate).min(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_arithmetic() {
        let e = Expr::frame_w().sub(Expr::text_w()).div(2.0);
        let env = EvalEnv::at(0.0);
        assert_eq!(e.eval(&env), (1920.0 - 400.0) / 2.0);
    }

    #[test]
    fn test_pulse_deterministic() {
        let a = pulse(0.8, 0.6, 0.4, 2.0, 0.5);
        let b = pulse(0.8, 0.6, 0.4, 2.0, 0.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_pulse_envelope() {
        // floor_frac + swing_frac == 1.0 keeps the pulse inside [0, base]
        let e = pulse(0.8, 0.6, 0.4, 3.0, 0.0);
        for i in 0..200 {
            let v = e.eval(&EvalEnv::at(i as f64 * 0.05));
            assert!(v >= 0.0 && v <= 0.8 + 1e-9, "pulse escaped envelope: {v}");
        }
    }

    #[test]
    fn test_blink_two_levels() {
        let e = blink(1.0, 0.2, 2.0, 3.0, 4.0);
        let mut seen = std::collections::BTreeSet::new();
        for i in 0..100 {
            let v = e.eval(&EvalEnv::at(i as f64 * 0.1));
            seen.insert((v * 1000.0) as i64);
        }
        // a step function only ever produces the bright and the dim value
        assert_eq!(seen.len(), 2);
        assert!(seen.contains(&1000));
        assert!(seen.contains(&200));
    }

    #[test]
    fn test_jitter_centered() {
        let e = jitter(Expr::num(100.0), 4.0, 5.0, 1.3, Waveform::Sin);
        for i in 0..100 {
            let v = e.eval(&EvalEnv::at(i as f64 * 0.07));
            assert!((96.0..=104.0).contains(&v));
        }
    }

    #[test]
    fn test_jitter_axes_differ() {
        let x = jitter(Expr::num(0.0), 2.0, 5.0, 1.0, Waveform::Sin);
        let y = jitter(Expr::num(0.0), 2.0, 5.0, 1.7, Waveform::Cos);
        assert_ne!(x, y);
    }

    #[test]
    fn test_phase_cycled_peaks_offset() {
        // layers peak at different times when the phase step is nonzero
        let step = std::f64::consts::PI / 3.0;
        let l0 = phase_cycled(1.0, 1.0, 0, step);
        let l1 = phase_cycled(1.0, 1.0, 1, step);
        let t_peak0 = std::f64::consts::FRAC_PI_2;
        let v0 = l0.eval(&EvalEnv::at(t_peak0));
        let v1 = l1.eval(&EvalEnv::at(t_peak0));
        assert!((v0 - 1.0).abs() < 1e-9);
        assert!(v1 < 1.0 - 1e-3);
    }

    #[test]
    fn test_reveal_monotone_and_clamped() {
        let e = reveal(0.5, 0.9);
        let mut prev = -1.0;
        for i in 0..=40 {
            let v = e.eval(&EvalEnv::at(i as f64 * 0.1));
            assert!(v >= prev, "reveal must be non-decreasing");
            assert!(v <= 0.9 + 1e-12);
            prev = v;
        }
        // reaches the target exactly once t >= target/rate
        assert_eq!(e.eval(&EvalEnv::at(0.9 / 0.5)), 0.9);
        assert_eq!(e.eval(&EvalEnv::at(10.0)), 0.9);
    }

    #[test]
    fn test_is_animated() {
        assert!(pulse(1.0, 0.5, 0.5, 1.0, 0.0).is_animated());
        assert!(!Expr::frame_w().sub(Expr::text_w()).is_animated());
        assert!(!Expr::num(30.0).is_animated());
    }
}
