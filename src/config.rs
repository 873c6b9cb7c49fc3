//! Global configuration for bedq parsing behavior.
//!
//! Holds parse-time switches that are set once at startup and read by
//! the record parser. Tables themselves are never global; they are passed
//! explicitly between the reader and the query operations.

use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for strict single-base mode.
///
/// When enabled, the parser rejects any record whose width is not exactly
/// one base (`end != start + 1`). By default wider records are accepted and
/// only their start coordinate takes part in queries and merges.
static STRICT_WIDTH: AtomicBool = AtomicBool::new(false);

/// Enable or disable strict single-base mode.
///
/// # Example
///
/// ```
/// use bedq::config;
///
/// config::set_strict_width(true);
/// assert!(config::is_strict_width());
/// config::set_strict_width(false);
/// ```
#[inline]
pub fn set_strict_width(enabled: bool) {
    STRICT_WIDTH.store(enabled, Ordering::Release);
}

/// Check if strict single-base mode is enabled.
#[inline]
pub fn is_strict_width() -> bool {
    STRICT_WIDTH.load(Ordering::Acquire)
}

/// Check a parsed `[start, end)` pair against the width policy.
///
/// Returns `false` only when strict mode is on and the record is not a
/// single base wide. Called once per parsed record, never in query loops.
#[inline]
pub fn width_allowed(start: u64, end: u64) -> bool {
    !is_strict_width() || end == start + 1
}
