//! Human-readable durations for log messages

use std::time::{Duration, Instant};

/// Format the time elapsed since `start`
pub fn elapsed_since(start: Instant) -> String {
    human_readable_delta(start.elapsed())
}

/// Format a duration as `850ms`, `3.2s`, `2m 05s` or `1h 02m`
pub fn human_readable_delta(delta: Duration) -> String {
    let millis = delta.as_millis();
    if millis < 1_000 {
        return format!("{}ms", millis);
    }

    let secs = delta.as_secs();
    if secs < 60 {
        return format!("{:.1}s", delta.as_secs_f64());
    }
    if secs < 3_600 {
        return format!("{}m {:02}s", secs / 60, secs % 60);
    }
    format!("{}h {:02}m", secs / 3_600, (secs % 3_600) / 60)
}
