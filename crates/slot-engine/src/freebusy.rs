//! Compute free windows from busy intervals.
//!
//! Merges the busy set, clips it to a window, then walks the gaps between
//! merged periods.

use chrono::{DateTime, Utc};

use crate::interval::{merge_busy_intervals, FreeWindow, TimeInterval};

/// Find the free windows inside `[window_start, window_end)`.
///
/// Busy intervals may overlap, touch, or lie partly outside the window; they
/// are merged and clipped before the gaps are computed. Returns windows sorted
/// by start. An inverted or empty window yields no free windows.
pub fn derive_free_windows(
    busy: &[TimeInterval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<FreeWindow> {
    if window_start >= window_end {
        return Vec::new();
    }

    let clamped: Vec<TimeInterval> = merge_busy_intervals(busy)
        .iter()
        .filter_map(|iv| iv.clamp(window_start, window_end))
        .collect();

    let mut free = Vec::new();
    let mut cursor = window_start;

    for interval in &clamped {
        if interval.start() > cursor {
            free.extend(FreeWindow::new(cursor, interval.start()).ok());
        }
        cursor = cursor.max(interval.end());
    }

    // Trailing gap after the last busy period.
    if cursor < window_end {
        free.extend(FreeWindow::new(cursor, window_end).ok());
    }

    free
}

/// Find the earliest free window of at least `min_duration_minutes`.
pub fn find_first_free_window(
    busy: &[TimeInterval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    min_duration_minutes: i64,
) -> Option<FreeWindow> {
    derive_free_windows(busy, window_start, window_end)
        .into_iter()
        .find(|w| w.duration_minutes() >= min_duration_minutes)
}
