//! Blocking-reason taxonomy
//!
//! The inspected runtime reports why a task was not running as a numeric
//! index into a fixed positional table. The table is process-wide immutable
//! data, initialized at compile time and never mutated; lookups past the end
//! resolve to a defined fallback label instead of reading out of bounds.

/// Label returned for any code outside the table
pub const UNKNOWN_WAIT_REASON: &str = "unknown wait reason";

/// Positional blocking-reason labels. Index 0 is the empty "running or
/// unknown" default.
pub const WAIT_REASONS: [&str; 27] = [
    "",
    "GC assist marking",
    "IO wait",
    "chan receive (nil chan)",
    "chan send (nil chan)",
    "dumping heap",
    "garbage collection",
    "garbage collection scan",
    "panicwait",
    "select",
    "select (no cases)",
    "GC assist wait",
    "GC sweep wait",
    "GC scavenge wait",
    "chan receive",
    "chan send",
    "finalizer wait",
    "force gc (idle)",
    "semacquire",
    "sleep",
    "sync.Cond.Wait",
    "timer goroutine (idle)",
    "trace reader (blocked)",
    "wait for GC cycle",
    "GC worker (idle)",
    "preempted",
    "debug call",
];

/// Look up the label for a blocking-reason code.
pub fn wait_reason_label(code: u64) -> &'static str {
    usize::try_from(code)
        .ok()
        .and_then(|ix| WAIT_REASONS.get(ix).copied())
        .unwrap_or(UNKNOWN_WAIT_REASON)
}
