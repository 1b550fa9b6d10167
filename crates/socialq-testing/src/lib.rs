//! Testing utilities and harness for SocialQ counters.
//!
//! [`TestHost`] wires a [`Runtime`] to a [`ManualClock`] so tests decide
//! exactly when frames happen and what time they carry.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicI64, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use socialq_core::{Clock, DisplaySurface, Runtime, RuntimeHandle, RuntimeScheduler, WallClock};

pub mod prelude {
    pub use crate::{FixedWallClock, ManualClock, RecordingSurface, TestHost, TestScheduler};
}

const NANOS_PER_MILLI: u64 = 1_000_000;

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_millis(&self, millis: u64) {
        self.nanos
            .fetch_add(millis * NANOS_PER_MILLI, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_nanos(&self) -> u64 {
        self.nanos.load(Ordering::SeqCst)
    }
}

/// Calendar clock pinned to a settable instant.
#[derive(Debug)]
pub struct FixedWallClock {
    unix_millis: AtomicI64,
}

impl FixedWallClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            unix_millis: AtomicI64::new(instant.timestamp_millis()),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.unix_millis
            .store(instant.timestamp_millis(), Ordering::SeqCst);
    }

    pub fn advance_millis(&self, millis: i64) {
        self.unix_millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl WallClock for FixedWallClock {
    fn now_unix_millis(&self) -> i64 {
        self.unix_millis.load(Ordering::SeqCst)
    }
}

/// Scheduler that counts frame requests.
#[derive(Debug, Default)]
pub struct TestScheduler {
    requests: AtomicUsize,
}

impl TestScheduler {
    pub fn frame_requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl RuntimeScheduler for TestScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

/// Display surface that remembers every text it was given.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    history: RefCell<Vec<String>>,
    initial: String,
    detached: Cell<bool>,
}

impl RecordingSurface {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Surface that already shows `text`, like server-rendered markup.
    pub fn with_text(text: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            initial: text.into(),
            ..Self::default()
        })
    }

    pub fn detach(&self) {
        self.detached.set(true);
    }

    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }

    pub fn writes(&self) -> usize {
        self.history.borrow().len()
    }

    pub fn last(&self) -> Option<String> {
        self.history.borrow().last().cloned()
    }
}

impl DisplaySurface for RecordingSurface {
    fn is_alive(&self) -> bool {
        !self.detached.get()
    }

    fn text(&self) -> String {
        self.last().unwrap_or_else(|| self.initial.clone())
    }

    fn set_text(&self, text: &str) {
        self.history.borrow_mut().push(text.to_owned());
    }
}

/// Headless host: a runtime, its manual clock and a frame pump.
pub struct TestHost {
    runtime: Runtime,
    clock: Arc<ManualClock>,
    scheduler: Arc<TestScheduler>,
}

impl TestHost {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new());
        let scheduler = Arc::new(TestScheduler::default());
        let runtime = Runtime::new(scheduler.clone(), clock.clone());
        Self {
            runtime,
            clock,
            scheduler,
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn clock(&self) -> Arc<ManualClock> {
        Arc::clone(&self.clock)
    }

    pub fn scheduler(&self) -> Arc<TestScheduler> {
        Arc::clone(&self.scheduler)
    }

    /// Runs one frame at the current clock reading. Returns callbacks run.
    pub fn frame(&self) -> usize {
        self.runtime
            .handle()
            .drain_frame_callbacks(self.clock.now_nanos())
    }

    /// Advances the clock by `millis` and runs one frame.
    pub fn advance_frame(&self, millis: u64) -> usize {
        self.clock.advance_millis(millis);
        self.frame()
    }

    /// Runs frames `step_millis` apart until nothing asks for another one.
    ///
    /// Returns the number of frames run; gives up after `max_frames`.
    pub fn run_until_idle(&self, step_millis: u64, max_frames: usize) -> usize {
        let mut frames = 0;
        while self.runtime.handle().has_frame_callbacks() && frames < max_frames {
            self.advance_frame(step_millis);
            frames += 1;
        }
        frames
    }
}

impl Default for TestHost {
    fn default() -> Self {
        Self::new()
    }
}
