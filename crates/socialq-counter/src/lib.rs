//! Animated numeric displays for the SocialQ landing page.
//!
//! An [`AnimatedNumber`] owns one display surface and eases the shown value
//! toward a target over a fixed duration, sampling once per frame from the
//! host's [`socialq_core::FrameClock`]. Two trigger policies sit on top:
//! [`VisibilityTrigger`] counts up once when the element scrolls into view,
//! and [`PeriodicRecompute`] glides to a freshly computed target on a timer.

pub mod animated;
pub mod config;
pub mod easing;
pub mod error;
pub mod format;
pub mod growth;
pub mod run;
pub mod trigger;

pub use animated::AnimatedNumber;
pub use config::{CounterConfig, GrowthPolicy};
pub use easing::Easing;
pub use error::CounterError;
pub use format::NumberFormat;
pub use growth::{GrowthModel, IncrementalRandom, RateBased};
pub use run::{AnimationRun, CounterSpec};
pub use trigger::{IntervalTimer, PeriodicRecompute, VisibilityTrigger};

pub mod prelude {
    pub use crate::{
        AnimatedNumber, AnimationRun, CounterConfig, CounterSpec, Easing, GrowthModel,
        GrowthPolicy, NumberFormat, PeriodicRecompute, RateBased, VisibilityTrigger,
    };
}
