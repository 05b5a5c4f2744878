//! Re-verify a proposed meeting against attendee calendars.
//!
//! Calendars can change between proposing an option and booking it. This
//! module reports every busy interval that now overlaps the proposal.
//! Adjacent intervals (one ends exactly when the other starts) are NOT
//! conflicts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::interval::TimeInterval;
use crate::schedule::AttendeeSchedule;

/// One attendee's busy interval colliding with a proposal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendeeConflict {
    pub attendee_id: String,
    pub busy: TimeInterval,
    pub overlap_minutes: i64,
}

/// Find every busy interval overlapping `[start, end)`.
///
/// Two ranges overlap when `a.start < b.end && b.start < a.end`. The overlap
/// is `min(a.end, b.end) - max(a.start, b.start)`. Results follow schedule
/// order, then day order, then interval order.
pub fn find_attendee_conflicts(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    schedules: &[AttendeeSchedule],
) -> Vec<AttendeeConflict> {
    let mut conflicts = Vec::new();

    for schedule in schedules {
        for busy in schedule.all_busy() {
            if busy.start() < end && start < busy.end() {
                let overlap_start = busy.start().max(start);
                let overlap_end = busy.end().min(end);
                conflicts.push(AttendeeConflict {
                    attendee_id: schedule.attendee_id.clone(),
                    busy: busy.clone(),
                    overlap_minutes: (overlap_end - overlap_start).num_minutes(),
                });
            }
        }
    }

    conflicts
}
