//! Growth models: where a periodically refreshed counter heads next.
//!
//! [`RateBased`] extrapolates from a recorded sample and is a pure function of
//! the current time, so sampling it twice at the same instant gives the same
//! target. [`IncrementalRandom`] adds a random bump per call and therefore
//! must be driven by exactly one timer.

use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::CounterError;

/// Posts analysed when the live page's sample was recorded.
pub const DEFAULT_BASE_VALUE: i64 = 29_171_793;
/// Approximate posts analysed per hour on the live page.
pub const DEFAULT_GROWTH_PER_HOUR: f64 = 25_000.0;
pub const DEFAULT_MIN_INCREMENT: u64 = 500;
pub const DEFAULT_MAX_INCREMENT: u64 = 1_500;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Computes the next target for a periodically refreshed counter.
pub trait GrowthModel {
    fn next_target(&mut self, now: DateTime<Utc>) -> i64;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

/// `floor(base_value + growth_per_hour * hours_since(base_timestamp))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateBased {
    base_value: i64,
    base_timestamp: DateTime<Utc>,
    growth_per_hour: f64,
}

impl RateBased {
    /// Fails unless `growth_per_hour` is finite and not negative.
    pub fn new(
        base_value: i64,
        base_timestamp: DateTime<Utc>,
        growth_per_hour: f64,
    ) -> Result<Self, CounterError> {
        if !growth_per_hour.is_finite() || growth_per_hour < 0.0 {
            return Err(CounterError::InvalidGrowthRate { per_hour: growth_per_hour });
        }
        Ok(Self {
            base_value,
            base_timestamp,
            growth_per_hour,
        })
    }

    /// Midnight UTC on 2024-06-01, when the page's base sample was taken.
    pub fn default_base_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    pub fn base_value(&self) -> i64 {
        self.base_value
    }

    pub fn base_timestamp(&self) -> DateTime<Utc> {
        self.base_timestamp
    }

    pub fn growth_per_hour(&self) -> f64 {
        self.growth_per_hour
    }

    pub fn hours_elapsed(&self, now: DateTime<Utc>) -> f64 {
        (now - self.base_timestamp).num_milliseconds() as f64 / MILLIS_PER_HOUR
    }

    /// Target at `now`; does not depend on any earlier call.
    pub fn target_at(&self, now: DateTime<Utc>) -> i64 {
        let value = self.base_value as f64 + self.growth_per_hour * self.hours_elapsed(now);
        // `as` saturates at the i64 bounds.
        value.floor() as i64
    }
}

impl Default for RateBased {
    fn default() -> Self {
        Self {
            base_value: DEFAULT_BASE_VALUE,
            base_timestamp: Self::default_base_timestamp(),
            growth_per_hour: DEFAULT_GROWTH_PER_HOUR,
        }
    }
}

impl GrowthModel for RateBased {
    fn next_target(&mut self, now: DateTime<Utc>) -> i64 {
        self.target_at(now)
    }

    fn name(&self) -> &'static str {
        "rate"
    }
}

/// `previous + uniform(min_increment..=max_increment)` per call.
#[derive(Debug, Clone)]
pub struct IncrementalRandom<R = StdRng> {
    previous: i64,
    min_increment: u64,
    max_increment: u64,
    rng: R,
}

impl IncrementalRandom<StdRng> {
    pub fn new(start: i64, min_increment: u64, max_increment: u64) -> Result<Self, CounterError> {
        Self::with_rng(start, min_increment, max_increment, StdRng::from_entropy())
    }
}

impl<R: Rng> IncrementalRandom<R> {
    pub fn with_rng(
        start: i64,
        min_increment: u64,
        max_increment: u64,
        rng: R,
    ) -> Result<Self, CounterError> {
        if min_increment > max_increment {
            return Err(CounterError::InvalidIncrementRange {
                min: min_increment,
                max: max_increment,
            });
        }
        Ok(Self {
            previous: start,
            min_increment,
            max_increment,
            rng,
        })
    }

    pub fn previous(&self) -> i64 {
        self.previous
    }
}

impl<R: Rng> GrowthModel for IncrementalRandom<R> {
    fn next_target(&mut self, _now: DateTime<Utc>) -> i64 {
        let step = self.rng.gen_range(self.min_increment..=self.max_increment);
        let step = i64::try_from(step).unwrap_or(i64::MAX);
        self.previous = self.previous.saturating_add(step);
        self.previous
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

impl<G: GrowthModel + ?Sized> GrowthModel for Box<G> {
    fn next_target(&mut self, now: DateTime<Utc>) -> i64 {
        (**self).next_target(now)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[cfg(test)]
#[path = "tests/growth_tests.rs"]
mod tests;
