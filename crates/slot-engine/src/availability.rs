//! Per-day availability summary across attendees, with privacy control.
//!
//! Where reconciliation answers "when is everyone free?", this module answers
//! "why is nobody free?": it returns the merged busy blocks of a working day
//! alongside the free windows, optionally with how many attendees are behind
//! each block.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::config::WorkWindow;
use crate::error::Result;
use crate::freebusy::derive_free_windows;
use crate::interval::{merge_busy_intervals, FreeWindow, TimeInterval};
use crate::schedule::AttendeeSchedule;

/// Privacy level for availability output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PrivacyLevel {
    /// Show time ranges and attendee count per busy block.
    Full,
    /// Show only busy/free time ranges. `attendee_count` is 0 on every block.
    #[default]
    Opaque,
}

/// A merged busy block inside the work window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusyBlock {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Attendees with at least one busy interval overlapping this block.
    /// Always 0 under [`PrivacyLevel::Opaque`]; 0 for a block made only of
    /// the excluded span.
    pub attendee_count: usize,
}

/// One day's combined availability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    /// Sorted, non-overlapping; together with `free` they tile the window.
    pub busy: Vec<BusyBlock>,
    pub free: Vec<FreeWindow>,
    pub privacy: PrivacyLevel,
}

/// Summarize `date` for every schedule in `schedules`.
pub fn summarize_day(
    schedules: &[AttendeeSchedule],
    date: NaiveDate,
    work_window: &WorkWindow,
    tz: Tz,
    privacy: PrivacyLevel,
) -> Result<DayAvailability> {
    let (window_start, window_end) = work_window.bounds_on(date, tz)?;

    let mut pool: Vec<TimeInterval> = schedules
        .iter()
        .flat_map(|s| s.busy_on(date).cloned())
        .collect();
    if let Some(excluded) = work_window.excluded_on(date, tz)? {
        pool.push(excluded);
    }

    let busy = merge_busy_intervals(&pool)
        .iter()
        .filter_map(|iv| iv.clamp(window_start, window_end))
        .map(|block| BusyBlock {
            start: block.start(),
            end: block.end(),
            attendee_count: match privacy {
                PrivacyLevel::Full => count_attendees(schedules, date, &block),
                PrivacyLevel::Opaque => 0,
            },
        })
        .collect();

    let free = derive_free_windows(&pool, window_start, window_end);

    Ok(DayAvailability {
        date,
        window_start,
        window_end,
        busy,
        free,
        privacy,
    })
}

fn count_attendees(schedules: &[AttendeeSchedule], date: NaiveDate, block: &TimeInterval) -> usize {
    schedules
        .iter()
        .filter(|s| s.busy_on(date).any(|iv| iv.overlaps(block)))
        .count()
}
