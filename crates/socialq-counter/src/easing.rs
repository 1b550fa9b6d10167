//! Easing curves for counter runs.
//!
//! Every curve maps linear time progress in `[0, 1]` onto visual progress in
//! `[0, 1]`, is monotonically non-decreasing and keeps both endpoints fixed,
//! so a run always starts on its start value and lands exactly on its target.

/// Interpolation curve applied to a run's linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// `1 - (1 - p)^3`: quick start, settles into place.
    CubicOut,
    /// `1 - (1 - p)^4`: quicker start and a longer settle than cubic.
    #[default]
    QuarticOut,
}

impl Easing {
    pub const ALL: [Easing; 3] = [Easing::Linear, Easing::CubicOut, Easing::QuarticOut];

    /// Apply the easing function to a linear fraction; input is clamped to `[0, 1]`.
    pub fn transform(&self, fraction: f64) -> f64 {
        let p = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        match self {
            Easing::Linear => p,
            Easing::CubicOut => 1.0 - (1.0 - p).powi(3),
            Easing::QuarticOut => 1.0 - (1.0 - p).powi(4),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::CubicOut => "cubic-out",
            Easing::QuarticOut => "quartic-out",
        }
    }
}

#[cfg(test)]
#[path = "tests/easing_tests.rs"]
mod tests;
