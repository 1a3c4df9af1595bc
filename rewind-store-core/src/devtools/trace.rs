//! Diagnostic stack-trace capture for action reports

use std::backtrace::{Backtrace, BacktraceStatus};

/// Captures a human-readable call-stack string at the dispatch site.
///
/// Injectable so embedders can swap in a cheaper or richer capture. The
/// capture is a best-effort diagnostic: it must never fail the report path,
/// so unsupported platforms degrade to the empty string.
pub type TraceCapture = fn() -> String;

/// Default capture backed by `std::backtrace`.
///
/// Captures unconditionally (ignoring the `RUST_BACKTRACE` environment
/// toggles) so the inspector annotation does not depend on process
/// configuration. Returns the empty string where capture is unsupported.
pub fn capture_stack_trace() -> String {
    let backtrace = Backtrace::force_capture();
    match backtrace.status() {
        BacktraceStatus::Captured => backtrace.to_string(),
        _ => String::new(),
    }
}

/// Capture that always yields the empty string.
///
/// For embedders that want action reports without the cost of walking the
/// stack on every dispatch.
pub fn no_trace() -> String {
    String::new()
}
