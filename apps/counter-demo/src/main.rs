use std::cell::RefCell;
use std::error::Error;
use std::io::Write;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use socialq_core::{DisplaySurface, ElementId, VisibilityObserver};
use socialq_counter::{AnimatedNumber, CounterConfig, PeriodicRecompute, VisibilityTrigger};
use socialq_runtime_std::StdRuntime;

const FRAME: Duration = Duration::from_millis(16);
const IDLE_POLL: Duration = Duration::from_millis(250);
const HERO_ELEMENT: ElementId = ElementId(1);
const HERO_TARGET: i64 = 29_171_793;

/// Terminal line standing in for a page element.
struct TerminalLine {
    label: &'static str,
    text: RefCell<String>,
}

impl TerminalLine {
    fn new(label: &'static str) -> Rc<Self> {
        Rc::new(Self {
            label,
            text: RefCell::new(String::new()),
        })
    }
}

impl DisplaySurface for TerminalLine {
    fn is_alive(&self) -> bool {
        true
    }

    fn text(&self) -> String {
        self.text.borrow().clone()
    }

    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_owned();
        let mut stdout = std::io::stdout().lock();
        // A closed stdout only loses the demo output.
        let _ = write!(stdout, "\r{:>14} {:>16}", self.label, text);
        let _ = stdout.flush();
    }
}

fn run_frames(runtime: &StdRuntime) {
    while runtime.pump_frame() {
        thread::sleep(FRAME);
    }
    println!();
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = CounterConfig::from_env();
    log::info!(
        "locale {}, refresh every {} ms, growth {:?}",
        config.locale,
        config.refresh_interval_millis,
        config.growth
    );

    let runtime = StdRuntime::new();
    let format = config.number_format();

    println!("=== SocialQ counter demo ===");

    let observer = VisibilityObserver::new(config.visibility_threshold);
    let hero_line: Rc<dyn DisplaySurface> = TerminalLine::new("analysed");
    let hero = VisibilityTrigger::attach(
        &observer,
        HERO_ELEMENT,
        AnimatedNumber::new(runtime.runtime_handle(), hero_line, format),
        HERO_TARGET,
        config.intro,
    );
    // The terminal is always "in view".
    observer.report(HERO_ELEMENT, 1.0);
    run_frames(&runtime);
    log::debug!("hero settled at {}", hero.number().value());

    let live_line: Rc<dyn DisplaySurface> = TerminalLine::new("live");
    let mut live = PeriodicRecompute::new(
        runtime.runtime_handle(),
        AnimatedNumber::new(runtime.runtime_handle(), live_line, format),
        config.growth.build()?,
        config.update,
        config.refresh_interval_millis,
        runtime.wall_clock(),
    )?;
    live.start();
    run_frames(&runtime);

    let refreshes: Option<usize> = std::env::args().nth(1).and_then(|arg| arg.parse().ok());
    let mut done = 0usize;
    loop {
        if refreshes.is_some_and(|limit| done >= limit) {
            break;
        }
        if live.poll_now().is_some() {
            done += 1;
            run_frames(&runtime);
        } else {
            thread::sleep(IDLE_POLL);
        }
    }

    Ok(())
}
