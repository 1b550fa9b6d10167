//! Trigger policies: when a counter starts a new run.
//!
//! Both policies sit on top of [`AnimatedNumber::start_from`] and
//! [`AnimatedNumber::start`]; pick one per counter.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use socialq_core::{ElementId, RuntimeHandle, VisibilityObserver, WallClock};

use crate::animated::AnimatedNumber;
use crate::error::CounterError;
use crate::growth::GrowthModel;
use crate::run::CounterSpec;

const NANOS_PER_MILLI: u64 = 1_000_000;

/// Counts up from zero the first time its element scrolls into view.
///
/// The trigger keeps the counter alive. Dropping it before the element is
/// seen unregisters it; dropping it mid-run stops the run.
pub struct VisibilityTrigger {
    observer: VisibilityObserver,
    element: ElementId,
    number: AnimatedNumber,
    fired: Rc<Cell<bool>>,
}

impl VisibilityTrigger {
    pub fn attach(
        observer: &VisibilityObserver,
        element: ElementId,
        number: AnimatedNumber,
        final_value: i64,
        spec: CounterSpec,
    ) -> Self {
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let target = number.clone();
        observer.observe(element, move |element| {
            if flag.replace(true) {
                return;
            }
            log::debug!("counter {element:?} visible; counting up to {final_value}");
            target.start_from(0, final_value, spec);
        });
        Self {
            observer: observer.clone(),
            element,
            number,
            fired,
        }
    }

    pub fn number(&self) -> &AnimatedNumber {
        &self.number
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }

    /// Stops waiting for visibility. Returns `false` if it already fired.
    pub fn detach(&self) -> bool {
        self.observer.unobserve(self.element)
    }
}

impl Drop for VisibilityTrigger {
    fn drop(&mut self) {
        if !self.fired.get() {
            self.observer.unobserve(self.element);
        }
    }
}

/// Coarse repeating timer polled from the host loop.
///
/// Fires at most once per poll however many intervals were missed, so a
/// host that was suspended for an hour does not replay every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    interval_nanos: u64,
    next_due: Option<u64>,
}

impl IntervalTimer {
    pub fn new(interval_millis: u64) -> Result<Self, CounterError> {
        if interval_millis == 0 {
            return Err(CounterError::InvalidInterval {
                millis: interval_millis,
            });
        }
        Ok(Self {
            interval_nanos: interval_millis.saturating_mul(NANOS_PER_MILLI),
            next_due: None,
        })
    }

    pub fn interval_millis(&self) -> u64 {
        self.interval_nanos / NANOS_PER_MILLI
    }

    pub fn next_due(&self) -> Option<u64> {
        self.next_due
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Schedules the first tick one interval after `now_nanos`.
    pub fn arm(&mut self, now_nanos: u64) {
        self.next_due = Some(now_nanos.saturating_add(self.interval_nanos));
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    /// `true` if a tick is due at `now_nanos`; the next tick is then the
    /// first interval boundary after `now_nanos`.
    pub fn poll(&mut self, now_nanos: u64) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now_nanos < due {
            return false;
        }
        let missed = (now_nanos - due) / self.interval_nanos;
        if missed > 0 {
            log::debug!("interval timer: coalesced {missed} missed ticks");
        }
        let advance = self.interval_nanos.saturating_mul(missed + 1);
        self.next_due = Some(due.saturating_add(advance));
        true
    }
}

/// Refreshes its target on a fixed interval and glides to it.
///
/// The counter, the growth model and the timer are owned here and nowhere
/// else, so a target can only be advanced by this instance's own timer.
pub struct PeriodicRecompute<G: GrowthModel> {
    number: AnimatedNumber,
    growth: G,
    spec: CounterSpec,
    timer: IntervalTimer,
    runtime: RuntimeHandle,
    wall_clock: Arc<dyn WallClock>,
    last_target: Option<i64>,
}

impl<G: GrowthModel> PeriodicRecompute<G> {
    pub fn new(
        runtime: RuntimeHandle,
        number: AnimatedNumber,
        growth: G,
        spec: CounterSpec,
        interval_millis: u64,
        wall_clock: Arc<dyn WallClock>,
    ) -> Result<Self, CounterError> {
        Ok(Self {
            number,
            growth,
            spec,
            timer: IntervalTimer::new(interval_millis)?,
            runtime,
            wall_clock,
            last_target: None,
        })
    }

    pub fn number(&self) -> &AnimatedNumber {
        &self.number
    }

    pub fn growth(&self) -> &G {
        &self.growth
    }

    pub fn timer(&self) -> &IntervalTimer {
        &self.timer
    }

    pub fn last_target(&self) -> Option<i64> {
        self.last_target
    }

    /// Refreshes once right away and arms the interval timer.
    pub fn start(&mut self) -> i64 {
        let target = self.refresh();
        self.timer.arm(self.runtime.now_nanos());
        target
    }

    pub fn stop(&mut self) {
        self.timer.disarm();
    }

    /// Computes a new target and starts a run toward it from the shown value.
    ///
    /// Targets never go below the previous one, even if the wall clock is
    /// moved backwards.
    pub fn refresh(&mut self) -> i64 {
        let now = self.wall_now();
        let computed = self.growth.next_target(now);
        let target = match self.last_target {
            Some(previous) if computed < previous => {
                log::debug!(
                    "counter: {} target {computed} below {previous}; holding",
                    self.growth.name()
                );
                previous
            }
            _ => computed,
        };
        self.last_target = Some(target);
        log::trace!("counter: {} refresh -> {target}", self.growth.name());
        self.number.start(target, self.spec);
        target
    }

    /// Refreshes if the interval has elapsed at `now_nanos`.
    pub fn poll(&mut self, now_nanos: u64) -> Option<i64> {
        if self.timer.poll(now_nanos) {
            Some(self.refresh())
        } else {
            None
        }
    }

    /// [`poll`](Self::poll) using the runtime's clock.
    pub fn poll_now(&mut self) -> Option<i64> {
        let now = self.runtime.now_nanos();
        self.poll(now)
    }

    fn wall_now(&self) -> DateTime<Utc> {
        let millis = self.wall_clock.now_unix_millis();
        DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_else(|| {
            log::warn!("wall clock reading {millis} ms out of range; using epoch");
            DateTime::<Utc>::UNIX_EPOCH
        })
    }
}

#[cfg(test)]
#[path = "tests/trigger_tests.rs"]
mod tests;
