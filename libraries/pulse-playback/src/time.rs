//! Time display helpers

/// Format seconds as `m:ss`
///
/// Minutes are not padded; negative or non-finite input renders `0:00`.
pub fn format_time(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };

    format!("{}:{:02}", total / 60, total % 60)
}

/// Position as a fraction of duration, in `[0, 1]`
///
/// Returns 0 while the duration is unknown.
pub fn progress_fraction(position: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !position.is_finite() {
        return 0.0;
    }

    (position / duration).clamp(0.0, 1.0)
}

/// Position as a percentage of duration, in `[0, 100]`
pub fn progress_percent(position: f64, duration: f64) -> f64 {
    progress_fraction(position, duration) * 100.0
}
