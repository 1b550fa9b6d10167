use super::*;
use crate::easing::Easing;
use socialq_testing::{RecordingSurface, TestHost};

fn counter(host: &TestHost, surface: &Rc<RecordingSurface>) -> AnimatedNumber {
    AnimatedNumber::new(host.handle(), surface.clone(), NumberFormat::en_us())
}

fn spec(duration_millis: u64, easing: Easing) -> CounterSpec {
    CounterSpec::new(duration_millis, easing).expect("valid spec")
}

#[test]
fn count_up_from_zero_renders_endpoints_and_midpoint() {
    let host = TestHost::new();
    let surface = RecordingSurface::new();
    let number = counter(&host, &surface);

    number.start_from(0, 29_171_793, spec(1_000, Easing::QuarticOut));
    assert_eq!(surface.last().as_deref(), Some("0"));
    assert_eq!(host.scheduler().frame_requests(), 1);

    host.advance_frame(500);
    assert_eq!(surface.last().as_deref(), Some("27,348,555"));
    assert!(number.is_running());

    host.advance_frame(500);
    assert_eq!(surface.last().as_deref(), Some("29,171,793"));
    assert_eq!(number.value(), 29_171_793);
    assert!(!number.is_running());
    assert!(!host.handle().has_frame_callbacks());
}

#[test]
fn frame_loop_stops_after_target() {
    let host = TestHost::new();
    let surface = RecordingSurface::new();
    let number = counter(&host, &surface);

    number.start_from(0, 1_000, spec(2_000, Easing::CubicOut));
    let frames = host.run_until_idle(16, 1_000);

    assert!(frames >= 2_000 / 16, "ran {frames} frames");
    assert!(frames <= 2_000 / 16 + 2, "ran {frames} frames");
    assert_eq!(surface.last().as_deref(), Some("1,000"));
    assert_eq!(host.advance_frame(16), 0);
}

#[test]
fn start_uses_displayed_value_parsed_from_surface() {
    let host = TestHost::new();
    let surface = RecordingSurface::with_text("29,171,793");
    let number = counter(&host, &surface);
    assert_eq!(number.value(), 29_171_793);

    number.start(29_172_793, spec(1_000, Easing::CubicOut));
    assert_eq!(number.run().map(|run| run.start_value), Some(29_171_793));
}

#[test]
fn unreadable_surface_text_starts_from_zero() {
    let host = TestHost::new();
    let surface = RecordingSurface::with_text("—");
    let number = counter(&host, &surface);
    assert_eq!(number.value(), 0);
}

#[test]
fn equal_target_renders_once_without_frames() {
    let host = TestHost::new();
    let surface = RecordingSurface::new();
    let number = counter(&host, &surface);

    number.start_from(42, 42, spec(1_000, Easing::Linear));

    assert_eq!(surface.history(), vec!["42".to_string()]);
    assert_eq!(host.scheduler().frame_requests(), 0);
    assert!(!number.is_running());
    assert!(!host.handle().has_frame_callbacks());
}

#[test]
fn new_run_supersedes_active_run_from_shown_value() {
    let host = TestHost::new();
    let surface = RecordingSurface::new();
    let number = counter(&host, &surface);

    number.start_from(0, 1_000, spec(1_000, Easing::Linear));
    host.advance_frame(250);
    assert_eq!(number.value(), 250);

    number.start(0, spec(1_000, Easing::Linear));
    let run = number.run().expect("new run active");
    assert_eq!(run.start_value, 250);
    assert_eq!(run.target_value, 0);
    assert_eq!(run.start_nanos, 250 * 1_000_000);

    host.advance_frame(500);
    assert_eq!(number.value(), 125);
    assert_eq!(host.handle().has_frame_callbacks(), number.is_running());

    host.run_until_idle(100, 100);
    assert_eq!(surface.last().as_deref(), Some("0"));
}

#[test]
fn only_one_frame_callback_is_outstanding() {
    let host = TestHost::new();
    let surface = RecordingSurface::new();
    let number = counter(&host, &surface);

    for target in [100, 200, 300] {
        number.start_from(0, target, spec(1_000, Easing::Linear));
    }
    assert_eq!(host.frame(), 1);
}

#[test]
fn stale_callback_from_same_frame_is_ignored() {
    let host = TestHost::new();
    let surface = RecordingSurface::new();
    let number = counter(&host, &surface);

    // A callback queued ahead of the counter restarts it mid-drain, after the
    // counter's own callback has already been dequeued.
    let restarter = number.clone();
    host.handle().register_frame_callback(move |_| {
        restarter.start_from(5_000, 6_000, CounterSpec::update());
    });
    number.start_from(0, 1_000, spec(1_000, Easing::Linear));

    host.advance_frame(500);

    assert_eq!(number.value(), 5_000);
    assert_eq!(number.run().map(|run| run.target_value), Some(6_000));
    assert!(!surface.history().contains(&"500".to_string()));
    assert_eq!(host.frame(), 1);
}

#[test]
fn detached_surface_ends_run_silently() {
    let host = TestHost::new();
    let surface = RecordingSurface::new();
    let number = counter(&host, &surface);

    number.start_from(0, 1_000, spec(1_000, Easing::Linear));
    host.advance_frame(100);
    let writes = surface.writes();

    surface.detach();
    host.advance_frame(100);

    assert_eq!(surface.writes(), writes);
    assert!(!number.is_running());
    assert!(!host.handle().has_frame_callbacks());

    number.start_from(0, 10, spec(1_000, Easing::Linear));
    assert_eq!(surface.writes(), writes);
}

#[test]
fn dropping_the_counter_cancels_its_frames() {
    let host = TestHost::new();
    let surface = RecordingSurface::new();
    let number = counter(&host, &surface);

    number.start_from(0, 1_000, spec(1_000, Easing::Linear));
    drop(number);

    assert!(!host.handle().has_frame_callbacks());
    assert_eq!(host.advance_frame(100), 0);
    assert_eq!(surface.writes(), 1);
}

#[test]
fn snap_and_cancel() {
    let host = TestHost::new();
    let surface = RecordingSurface::new();
    let number = counter(&host, &surface);

    number.start_from(0, 1_000, spec(1_000, Easing::Linear));
    host.advance_frame(300);
    number.cancel();
    assert_eq!(number.value(), 300);
    assert_eq!(host.advance_frame(300), 0);

    number.snap_to(1_234_567);
    assert_eq!(surface.last().as_deref(), Some("1,234,567"));
    assert!(!number.is_running());
}

#[test]
fn explicit_sampling_is_stateless_in_time() {
    let host = TestHost::new();
    let surface = RecordingSurface::new();
    let number = counter(&host, &surface);

    number.start_from(0, 100, spec(1_000, Easing::Linear));
    let start = number.run().expect("running").start_nanos;

    assert!(number.sample(start + 750_000_000));
    assert_eq!(number.value(), 75);
    assert!(number.sample(start + 250_000_000));
    assert_eq!(number.value(), 25);
    assert!(!number.sample(start + 1_000_000_000));
    assert_eq!(number.value(), 100);
    assert!(!number.sample(start + 2_000_000_000));
}

#[test]
fn unchanged_values_are_not_rewritten() {
    let host = TestHost::new();
    let surface = RecordingSurface::new();
    let number = counter(&host, &surface);

    number.start_from(0, 2, spec(1_000, Easing::Linear));
    for _ in 0..10 {
        host.advance_frame(10);
    }
    assert_eq!(surface.history(), vec!["0".to_string()]);
}
