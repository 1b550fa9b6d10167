//! Counter configuration.
//!
//! Defaults reproduce the live landing page. Hosts may override a few knobs
//! through `SOCIALQ_*` environment variables; unparsable values are logged
//! and ignored rather than failing start-up.

use crate::error::CounterError;
use crate::format::NumberFormat;
use crate::growth::{
    GrowthModel, IncrementalRandom, RateBased, DEFAULT_BASE_VALUE, DEFAULT_MAX_INCREMENT,
    DEFAULT_MIN_INCREMENT,
};
use crate::run::CounterSpec;

pub const ENV_LOCALE: &str = "SOCIALQ_LOCALE";
pub const ENV_REFRESH_SECS: &str = "SOCIALQ_REFRESH_SECS";
pub const ENV_GROWTH: &str = "SOCIALQ_GROWTH";

/// Rate-based counters refresh every minute.
pub const RATE_REFRESH_MILLIS: u64 = 60_000;
/// Random-increment counters refresh every hour.
pub const RANDOM_REFRESH_MILLIS: u64 = 3_600_000;

/// Which growth model a periodic counter uses. One per counter, never mixed.
#[derive(Debug, Clone, PartialEq)]
pub enum GrowthPolicy {
    Rate(RateBased),
    Random {
        start: i64,
        min_increment: u64,
        max_increment: u64,
    },
}

impl GrowthPolicy {
    pub fn random() -> Self {
        GrowthPolicy::Random {
            start: DEFAULT_BASE_VALUE,
            min_increment: DEFAULT_MIN_INCREMENT,
            max_increment: DEFAULT_MAX_INCREMENT,
        }
    }

    pub fn default_refresh_millis(&self) -> u64 {
        match self {
            GrowthPolicy::Rate(_) => RATE_REFRESH_MILLIS,
            GrowthPolicy::Random { .. } => RANDOM_REFRESH_MILLIS,
        }
    }

    pub fn build(&self) -> Result<Box<dyn GrowthModel>, CounterError> {
        let model: Box<dyn GrowthModel> = match self {
            GrowthPolicy::Rate(model) => Box::new(*model),
            GrowthPolicy::Random {
                start,
                min_increment,
                max_increment,
            } => Box::new(IncrementalRandom::new(
                *start,
                *min_increment,
                *max_increment,
            )?),
        };
        Ok(model)
    }

    fn parse(value: &str) -> Result<Self, CounterError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rate" => Ok(GrowthPolicy::Rate(RateBased::default())),
            "random" => Ok(GrowthPolicy::random()),
            _ => Err(CounterError::InvalidSetting {
                key: ENV_GROWTH,
                value: value.to_string(),
            }),
        }
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        GrowthPolicy::Rate(RateBased::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CounterConfig {
    pub locale: String,
    pub intro: CounterSpec,
    pub update: CounterSpec,
    pub visibility_threshold: f32,
    pub refresh_interval_millis: u64,
    pub growth: GrowthPolicy,
}

impl CounterConfig {
    pub fn number_format(&self) -> NumberFormat {
        NumberFormat::for_locale(&self.locale)
    }

    /// Defaults overridden from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden from `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(locale) = lookup(ENV_LOCALE).filter(|value| !value.trim().is_empty()) {
            config.locale = locale.trim().to_string();
        }

        if let Some(value) = lookup(ENV_GROWTH) {
            match GrowthPolicy::parse(&value) {
                Ok(policy) => {
                    config.refresh_interval_millis = policy.default_refresh_millis();
                    config.growth = policy;
                }
                Err(err) => log::warn!("ignoring {err}"),
            }
        }

        if let Some(value) = lookup(ENV_REFRESH_SECS) {
            match parse_refresh_secs(&value) {
                Ok(millis) => config.refresh_interval_millis = millis,
                Err(err) => log::warn!("ignoring {err}"),
            }
        }

        config
    }
}

fn parse_refresh_secs(value: &str) -> Result<u64, CounterError> {
    let invalid = || CounterError::InvalidSetting {
        key: ENV_REFRESH_SECS,
        value: value.to_string(),
    };
    let secs: u64 = value.trim().parse().map_err(|_| invalid())?;
    match secs.checked_mul(1_000) {
        Some(millis) if millis > 0 => Ok(millis),
        _ => Err(invalid()),
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            intro: CounterSpec::intro(),
            update: CounterSpec::update(),
            visibility_threshold: socialq_core::DEFAULT_VISIBILITY_THRESHOLD,
            refresh_interval_millis: RATE_REFRESH_MILLIS,
            growth: GrowthPolicy::default(),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
