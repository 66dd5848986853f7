//! Console logging.
//!
//! Two levels are used across the crate:
//! - `failure!()` reports a failed user action (backend, clipboard). These are
//!   always written to stderr, the same way the page logged to its console.
//! - `verbose!()` traces requests, state changes and dropped responses. Only
//!   printed after `set_verbose(true)` (the CLI wires this to `--verbose`).

use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);
static QUIET_FAILURES: AtomicBool = AtomicBool::new(false);

/// Enable or disable verbose logging
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::SeqCst);
}

/// Check if verbose logging is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Suppress `failure!()` output (used by `--quiet` and by tests that provoke failures)
pub fn set_quiet_failures(quiet: bool) {
    QUIET_FAILURES.store(quiet, Ordering::SeqCst);
}

pub fn failures_enabled() -> bool {
    !QUIET_FAILURES.load(Ordering::SeqCst)
}

/// Log a formatted message if verbose mode is enabled
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::verbose::is_verbose() {
            eprintln!("[verbose] {}", format!($($arg)*));
        }
    };
}

/// Log a failed action with its error
#[macro_export]
macro_rules! failure {
    ($action:expr, $err:expr) => {
        if $crate::verbose::failures_enabled() {
            eprintln!("[error] {}: {}", $action, $err);
        }
    };
}
