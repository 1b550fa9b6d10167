use super::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

#[derive(Default)]
struct CountingScheduler {
    requests: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct StepClock {
    nanos: AtomicU64,
}

impl Clock for StepClock {
    fn now_nanos(&self) -> u64 {
        self.nanos.load(Ordering::SeqCst)
    }
}

fn runtime() -> (Runtime, Arc<CountingScheduler>, Arc<StepClock>) {
    let scheduler = Arc::new(CountingScheduler::default());
    let clock = Arc::new(StepClock::default());
    let runtime = Runtime::new(scheduler.clone(), clock.clone());
    (runtime, scheduler, clock)
}

#[test]
fn register_requests_frame_and_drain_runs_once() {
    let (runtime, scheduler, _clock) = runtime();
    let handle = runtime.handle();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let log = seen.clone();
    handle.register_frame_callback(move |time| log.borrow_mut().push(time));
    assert!(runtime.needs_frame());
    assert_eq!(scheduler.requests.load(Ordering::SeqCst), 1);

    assert_eq!(handle.drain_frame_callbacks(16_000_000), 1);
    assert_eq!(handle.drain_frame_callbacks(32_000_000), 0);
    assert_eq!(*seen.borrow(), vec![16_000_000]);
    assert!(!runtime.needs_frame());
}

#[test]
fn cancelled_callback_never_runs() {
    let (runtime, _scheduler, _clock) = runtime();
    let handle = runtime.handle();
    let hits = Rc::new(RefCell::new(0));

    let counter = hits.clone();
    let id = handle
        .register_frame_callback(move |_| *counter.borrow_mut() += 1)
        .expect("runtime alive");
    handle.cancel_frame_callback(id);

    handle.drain_frame_callbacks(1);
    assert_eq!(*hits.borrow(), 0);
    assert!(!handle.has_frame_callbacks());
}

#[test]
fn callbacks_registered_while_draining_wait_for_next_frame() {
    let (runtime, _scheduler, _clock) = runtime();
    let handle = runtime.handle();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let inner_handle = handle.clone();
    let log = seen.clone();
    handle.register_frame_callback(move |time| {
        log.borrow_mut().push(("outer", time));
        let log = log.clone();
        inner_handle.register_frame_callback(move |time| log.borrow_mut().push(("inner", time)));
    });

    handle.drain_frame_callbacks(10);
    assert_eq!(*seen.borrow(), vec![("outer", 10)]);
    assert!(handle.has_frame_callbacks());

    handle.drain_frame_callbacks(20);
    assert_eq!(*seen.borrow(), vec![("outer", 10), ("inner", 20)]);
}

#[test]
fn frame_clock_registration_drop_unregisters() {
    let (runtime, _scheduler, _clock) = runtime();
    let hits = Rc::new(RefCell::new(0));

    let counter = hits.clone();
    let registration = runtime
        .handle()
        .frame_clock()
        .with_frame_nanos(move |_| *counter.borrow_mut() += 1);
    assert!(registration.is_active());
    drop(registration);

    runtime.handle().drain_frame_callbacks(1);
    assert_eq!(*hits.borrow(), 0);
}

#[test]
fn handle_reads_runtime_clock() {
    let (runtime, _scheduler, clock) = runtime();
    clock.nanos.store(42_000_000, Ordering::SeqCst);
    assert_eq!(runtime.handle().now_nanos(), 42_000_000);
}

#[test]
fn dropped_runtime_makes_handle_inert() {
    let (runtime, _scheduler, _clock) = runtime();
    let handle = runtime.handle();
    drop(runtime);

    assert!(handle.register_frame_callback(|_| {}).is_none());
    assert_eq!(handle.drain_frame_callbacks(1), 0);
    assert_eq!(handle.now_nanos(), 0);

    let registration = handle.frame_clock().with_frame_nanos(|_| {});
    assert!(!registration.is_active());
}
