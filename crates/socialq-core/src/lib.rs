#![doc = r"Host abstraction for SocialQ counters: frame clock, display surfaces and visibility."]

pub mod frame_clock;
pub mod platform;
pub mod runtime;
pub mod surface;
pub mod visibility;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{Clock, RuntimeScheduler, WallClock};
pub use runtime::{Runtime, RuntimeHandle};
pub use surface::DisplaySurface;
pub use visibility::{ElementId, VisibilityObserver, DEFAULT_VISIBILITY_THRESHOLD};

pub type FrameCallbackId = u64;
