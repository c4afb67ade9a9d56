//! Game timer.
//!
//! Remaining time is a pure function of the start instant and the instant of
//! observation; nothing ticks in the background.

use std::time::Instant;

/// Whole seconds left: `duration - floor(elapsed)`, clamped at zero.
/// A `now` earlier than `started_at` counts as no time elapsed.
pub fn remaining_secs(started_at: Instant, now: Instant, duration_secs: u64) -> u64 {
    let elapsed = now.saturating_duration_since(started_at);
    duration_secs.saturating_sub(elapsed.as_secs())
}
