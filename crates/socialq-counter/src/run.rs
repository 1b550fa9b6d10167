//! A single counter animation, evaluated purely from elapsed time.

use crate::easing::Easing;
use crate::error::CounterError;

const NANOS_PER_MILLI: u64 = 1_000_000;

/// How long a run lasts and which curve it follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSpec {
    duration_millis: u64,
    easing: Easing,
}

impl CounterSpec {
    pub fn new(duration_millis: u64, easing: Easing) -> Result<Self, CounterError> {
        if duration_millis == 0 {
            return Err(CounterError::InvalidDuration {
                millis: duration_millis,
            });
        }
        Ok(Self {
            duration_millis,
            easing,
        })
    }

    /// Count-up shown the first time the counter scrolls into view.
    pub const fn intro() -> Self {
        Self {
            duration_millis: 2_000,
            easing: Easing::QuarticOut,
        }
    }

    /// Shorter glide used when a refreshed target arrives.
    pub const fn update() -> Self {
        Self {
            duration_millis: 1_000,
            easing: Easing::CubicOut,
        }
    }

    pub fn duration_millis(&self) -> u64 {
        self.duration_millis
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl Default for CounterSpec {
    fn default() -> Self {
        Self::intro()
    }
}

/// An in-flight transition from `start_value` to `target_value`.
///
/// The displayed value is recomputed from elapsed time on every sample, never
/// accumulated, so dropped or irregular frames cannot drift the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationRun {
    pub start_value: i64,
    pub target_value: i64,
    pub duration_millis: u64,
    pub start_nanos: u64,
    pub easing: Easing,
}

impl AnimationRun {
    pub fn new(start_value: i64, target_value: i64, spec: CounterSpec, start_nanos: u64) -> Self {
        Self {
            start_value,
            target_value,
            duration_millis: spec.duration_millis,
            start_nanos,
            easing: spec.easing,
        }
    }

    fn duration_nanos(&self) -> u64 {
        self.duration_millis
            .saturating_mul(NANOS_PER_MILLI)
            .max(1)
    }

    /// Linear progress in `[0, 1]`; times before the start count as `0`.
    pub fn progress_at(&self, now_nanos: u64) -> f64 {
        let elapsed = now_nanos.saturating_sub(self.start_nanos);
        (elapsed as f64 / self.duration_nanos() as f64).clamp(0.0, 1.0)
    }

    pub fn is_finished_at(&self, now_nanos: u64) -> bool {
        self.start_value == self.target_value
            || now_nanos.saturating_sub(self.start_nanos) >= self.duration_nanos()
    }

    /// Value to display at `now_nanos`.
    ///
    /// Fractions are truncated toward the start value, so an ascending run
    /// floors and a descending one ceils; the target is only shown once the
    /// duration has fully elapsed.
    pub fn value_at(&self, now_nanos: u64) -> i64 {
        if self.is_finished_at(now_nanos) {
            return self.target_value;
        }
        let eased = self.easing.transform(self.progress_at(now_nanos));
        let span = i128::from(self.target_value) - i128::from(self.start_value);
        let raw = span as f64 * eased;
        let truncated = if span >= 0 { raw.floor() } else { raw.ceil() };
        let offset = truncated as i128;
        let offset = if span >= 0 {
            offset.clamp(0, span)
        } else {
            offset.clamp(span, 0)
        };
        // In range: the offset never leaves [0, span].
        (i128::from(self.start_value) + offset) as i64
    }
}

#[cfg(test)]
#[path = "tests/run_tests.rs"]
mod tests;
