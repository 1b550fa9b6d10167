use std::fmt;

/// Rejected counter parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum CounterError {
    InvalidDuration { millis: u64 },
    InvalidInterval { millis: u64 },
    InvalidIncrementRange { min: u64, max: u64 },
    InvalidGrowthRate { per_hour: f64 },
    InvalidSetting { key: &'static str, value: String },
}

impl fmt::Display for CounterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterError::InvalidDuration { millis } => {
                write!(f, "animation duration must be positive, got {millis} ms")
            }
            CounterError::InvalidInterval { millis } => {
                write!(f, "refresh interval must be positive, got {millis} ms")
            }
            CounterError::InvalidIncrementRange { min, max } => {
                write!(f, "increment range {min}..={max} is empty")
            }
            CounterError::InvalidGrowthRate { per_hour } => {
                write!(f, "growth rate must be finite and non-negative, got {per_hour} per hour")
            }
            CounterError::InvalidSetting { key, value } => {
                write!(f, "invalid value {value:?} for {key}")
            }
        }
    }
}

impl std::error::Error for CounterError {}
