//! Timing scopes and the log filter that lets them through.
//!
//! `--perf` turns scope timings on and opens the filter for the perf and UI
//! event targets, so `--perf --log-file session.log` records a trace of a
//! whole editing session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::{Directive, LevelFilter};

/// Target of scope timings.
pub const PERF_TARGET: &str = "reverie::perf";
/// Target of UI events seen by the event loop (messages, resizes, startup).
pub const EVENT_TARGET: &str = "reverie::events";

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Times the enclosing block and reports on drop while enabled.
#[derive(Debug)]
#[must_use]
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
        tracing::info!(target: PERF_TARGET, scope = self.name, elapsed_ms, "scope finished");
    }
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// `RUST_LOG` if set, WARN otherwise. With `perf` the perf target is let
/// through at info and UI events at debug, whatever `RUST_LOG` says.
pub fn log_filter(perf: bool) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    if !perf {
        return filter;
    }
    [(PERF_TARGET, "info"), (EVENT_TARGET, "debug")]
        .into_iter()
        .filter_map(|(target, level)| format!("{target}={level}").parse::<Directive>().ok())
        .fold(filter, |filter, directive| filter.add_directive(directive))
}
