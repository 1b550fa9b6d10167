//! Platform abstraction traits for the counter runtime.
//!
//! These traits let the runtime delegate frame scheduling and time keeping
//! to the host, so the same counters run in a browser shell, a native
//! window or a headless test harness.

/// Schedules work for the runtime.
///
/// Implementations are responsible for triggering frame processing on
/// behalf of the runtime. They must be safe to use from multiple threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Monotonic clock used to stamp frames and animation runs.
pub trait Clock: Send + Sync {
    /// Nanoseconds since an arbitrary, fixed origin. Never decreases.
    fn now_nanos(&self) -> u64;
}

/// Calendar clock for growth models that extrapolate from a fixed date.
///
/// Unlike [`Clock`] this may jump (NTP, manual changes), so it is only
/// consulted for computing targets, never for driving frames.
pub trait WallClock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_unix_millis(&self) -> i64;
}
