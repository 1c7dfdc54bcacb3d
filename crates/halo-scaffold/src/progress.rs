//! Install progress indicator
//!
//! The spinner is a guard: dropping it stops the steady tick and clears the
//! line, so no exit path (success, error, panic) leaves a ticker running.
//!
//! While a spinner is active it is registered here, and [`suspend`] lets any
//! other writer (the CLI's tracing writer) hide it for the duration of a write
//! so log lines and redraws never interleave on the terminal.

use halo_core::types::ProgressConfig;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Spinner currently drawing, if any, keyed by its guard id
static ACTIVE: Mutex<Option<(u64, ProgressBar)>> = Mutex::new(None);

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Frame shown once the spinner finishes (cleared immediately after)
const FINISHED_FRAME: &str = " ";

/// Running spinner; stops when dropped
#[derive(Debug)]
pub struct Spinner {
    id: u64,
    bar: ProgressBar,
}

impl Spinner {
    /// Start a spinner on stderr, or a hidden one when progress is disabled
    pub fn start(message: &str, config: &ProgressConfig) -> Self {
        let target = if config.enabled {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        Self::start_with_target(message, config, target)
    }

    /// Start a spinner drawing to `target`
    pub fn start_with_target(
        message: &str,
        config: &ProgressConfig,
        target: ProgressDrawTarget,
    ) -> Self {
        let bar = ProgressBar::with_draw_target(None, target);
        bar.set_style(spinner_style(&config.frames));
        bar.set_message(message.to_string());
        bar.enable_steady_tick(config.interval());

        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        register(id, &bar);
        Self { id, bar }
    }

    /// Handle to the underlying bar (shares state with the guard)
    pub fn handle(&self) -> ProgressBar {
        self.bar.clone()
    }

    /// Stop the spinner now
    pub fn finish(self) {
        drop(self);
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
        unregister(self.id);
    }
}

/// Spinner style cycling through `frames` in order
fn spinner_style(frames: &[String]) -> ProgressStyle {
    let mut ticks: Vec<&str> = frames.iter().map(String::as_str).collect();
    // indicatif uses the last tick string as the finished frame
    ticks.push(FINISHED_FRAME);

    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&ticks)
}

fn register(id: u64, bar: &ProgressBar) {
    let mut active = ACTIVE.lock().unwrap_or_else(|e| e.into_inner());
    *active = Some((id, bar.clone()));
}

fn unregister(id: u64) {
    let mut active = ACTIVE.lock().unwrap_or_else(|e| e.into_inner());
    if active.as_ref().is_some_and(|(current, _)| *current == id) {
        *active = None;
    }
}

/// Spinner currently drawing, if any
pub fn active() -> Option<ProgressBar> {
    ACTIVE
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .as_ref()
        .map(|(_, bar)| bar.clone())
}

/// Run `f` with the active spinner hidden
pub fn suspend<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    match active() {
        Some(bar) => bar.suspend(f),
        None => f(),
    }
}
