//! Lightweight performance instrumentation.
//!
//! Timing scopes are free when disabled. When enabled they report through
//! `tracing` at target `elmo::perf`, so they land wherever the subscriber
//! writes (stderr, or the `--log-file`).

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(target: "elmo::perf", scope = self.name, elapsed_ms, "perf");
    }
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Record a named event with free-form detail.
pub fn log_event(name: &str, detail: impl AsRef<str>) {
    tracing::debug!(target: "elmo::perf", event = name, detail = detail.as_ref());
}
