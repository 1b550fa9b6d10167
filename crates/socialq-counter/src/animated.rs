//! The animated numeric display.
//!
//! One [`AnimatedNumber`] owns one display surface. Starting a run while
//! another is in flight supersedes it: the pending frame callback is
//! cancelled, the generation counter moves on so an already-dequeued
//! callback of the old run becomes a no-op, and the new run starts from
//! whatever value is currently shown.

use std::cell::RefCell;
use std::rc::Rc;

use socialq_core::{DisplaySurface, FrameCallbackRegistration, RuntimeHandle};

use crate::format::NumberFormat;
use crate::run::{AnimationRun, CounterSpec};

/// Integer display that glides between values instead of jumping.
pub struct AnimatedNumber {
    inner: Rc<RefCell<AnimatedInner>>,
}

struct AnimatedInner {
    runtime: RuntimeHandle,
    surface: Rc<dyn DisplaySurface>,
    format: NumberFormat,
    current: i64,
    run: Option<AnimationRun>,
    generation: u64,
    registration: Option<FrameCallbackRegistration>,
}

/// Text to write once the inner borrow has been released.
type PendingWrite = Option<(Rc<dyn DisplaySurface>, String)>;

impl AnimatedInner {
    fn show(&mut self, value: i64) -> PendingWrite {
        self.current = value;
        Some((self.surface.clone(), self.format.format(value)))
    }

    fn stop(&mut self) {
        self.run = None;
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
    }
}

fn flush(write: PendingWrite) {
    if let Some((surface, text)) = write {
        surface.set_text(&text);
    }
}

impl AnimatedNumber {
    /// Binds a counter to `surface`.
    ///
    /// The starting value is whatever number the surface already shows, or
    /// zero when its text is not a number in `format`.
    pub fn new(
        runtime: RuntimeHandle,
        surface: Rc<dyn DisplaySurface>,
        format: NumberFormat,
    ) -> Self {
        let current = format.parse(&surface.text()).unwrap_or(0);
        let inner = AnimatedInner {
            runtime,
            surface,
            format,
            current,
            run: None,
            generation: 0,
            registration: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Currently displayed value.
    pub fn value(&self) -> i64 {
        self.inner.borrow().current
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().run.is_some()
    }

    /// The active run, if any.
    pub fn run(&self) -> Option<AnimationRun> {
        self.inner.borrow().run
    }

    pub fn format(&self) -> NumberFormat {
        self.inner.borrow().format
    }

    /// Animates from the displayed value to `target`.
    pub fn start(&self, target: i64, spec: CounterSpec) {
        let current = self.value();
        self.start_from(current, target, spec);
    }

    /// Animates from `start` to `target`, superseding any active run.
    pub fn start_from(&self, start: i64, target: i64, spec: CounterSpec) {
        let (write, schedule) = {
            let mut inner = self.inner.borrow_mut();
            if let Some(previous) = inner.run {
                log::trace!(
                    "counter: superseding run toward {} at {}",
                    previous.target_value,
                    inner.current
                );
            }
            inner.stop();
            inner.generation = inner.generation.wrapping_add(1);

            if !inner.surface.is_alive() {
                log::debug!("counter: surface detached; ignoring start toward {target}");
                return;
            }

            let now = inner.runtime.now_nanos();
            let run = AnimationRun::new(start, target, spec, now);
            let write = inner.show(start);
            if run.is_finished_at(now) {
                log::debug!("counter: already at {target}");
                (write, false)
            } else {
                log::debug!(
                    "counter: {start} -> {target} over {} ms ({})",
                    spec.duration_millis(),
                    spec.easing().name()
                );
                inner.run = Some(run);
                (write, true)
            }
        };
        flush(write);
        if schedule {
            Self::schedule_frame(&self.inner);
        }
    }

    /// Applies the active run at `now_nanos`.
    ///
    /// Returns whether the run is still in progress. A detached surface ends
    /// the run silently.
    pub fn sample(&self, now_nanos: u64) -> bool {
        Self::sample_inner(&self.inner, now_nanos)
    }

    /// Jumps straight to `value`, cancelling any run.
    pub fn snap_to(&self, value: i64) {
        let write = {
            let mut inner = self.inner.borrow_mut();
            inner.stop();
            inner.generation = inner.generation.wrapping_add(1);
            if !inner.surface.is_alive() {
                return;
            }
            inner.show(value)
        };
        flush(write);
    }

    /// Stops the active run, leaving the last shown value in place.
    pub fn cancel(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.stop();
        inner.generation = inner.generation.wrapping_add(1);
    }

    fn sample_inner(this: &Rc<RefCell<AnimatedInner>>, now_nanos: u64) -> bool {
        let (write, active) = {
            let mut inner = this.borrow_mut();
            let Some(run) = inner.run else {
                return false;
            };
            if !inner.surface.is_alive() {
                log::debug!("counter: surface detached mid-run; stopping");
                inner.stop();
                return false;
            }
            let value = run.value_at(now_nanos);
            let write = if value != inner.current {
                inner.show(value)
            } else {
                None
            };
            let active = !run.is_finished_at(now_nanos);
            if !active {
                log::debug!("counter: settled at {}", run.target_value);
                inner.stop();
            }
            (write, active)
        };
        flush(write);
        active
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatedInner>>) {
        let (runtime, generation) = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            (inner.runtime.clone(), inner.generation)
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, generation, time);
            }
        });
        if !registration.is_active() {
            log::debug!("counter: runtime dropped; frames will not be delivered");
        }
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatedInner>>, generation: u64, frame_time_nanos: u64) {
        {
            let mut inner = this.borrow_mut();
            if inner.generation != generation {
                return;
            }
            inner.registration = None;
        }
        if Self::sample_inner(this, frame_time_nanos) {
            Self::schedule_frame(this);
        }
    }
}

impl Clone for AnimatedNumber {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animated_tests.rs"]
mod tests;
