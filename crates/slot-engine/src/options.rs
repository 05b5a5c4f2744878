//! Meeting-option synthesis: pair ranked free windows with rooms.

use chrono::{DateTime, Duration, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

use crate::config::OptionScoring;
use crate::conflict::{find_attendee_conflicts, AttendeeConflict};
use crate::error::{Result, SlotError};
use crate::interval::FreeWindow;
use crate::ranking::is_desirable_hour;
use crate::room::{Facility, Room, RoomCandidate};
use crate::schedule::{Attendee, AttendeeSchedule};

/// A concrete, bookable proposal: a time, a room, and who attends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingOption {
    id: usize,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    duration_minutes: u32,
    room: Room,
    attendees: Vec<Attendee>,
    score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl MeetingOption {
    /// 1-based position in the proposal list.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn attendees(&self) -> &[Attendee] {
        &self.attendees
    }

    /// Informational score for display; options are not sorted by it.
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Attach a free-form remark for the person choosing between options.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Busy intervals in `schedules` that collide with this option.
    pub fn conflicts_with(&self, schedules: &[AttendeeSchedule]) -> Vec<AttendeeConflict> {
        find_attendee_conflicts(self.start, self.end, schedules)
    }
}

/// Score an option from its local start hour and its room.
pub fn option_score(start_hour: u32, room: &Room, scoring: &OptionScoring) -> f64 {
    let mut score = scoring.base;

    if is_desirable_hour(start_hour) {
        score += scoring.desirable_hour_bonus;
    }

    if room.capacity <= scoring.small_room_capacity {
        score += scoring.small_room_bonus;
    } else if room.capacity <= scoring.medium_room_capacity {
        score += scoring.medium_room_bonus;
    }

    if room.has(&Facility::VideoConference) {
        score += scoring.video_conference_bonus;
    }
    if room.has(&Facility::Whiteboard) {
        score += scoring.whiteboard_bonus;
    }

    score
}

/// Build up to `max_options` proposals from windows in their given order.
///
/// Each window contributes at most one option: the first available room whose
/// availability covers `[window.start, window.start + duration)`. Windows with
/// no fitting room are skipped.
///
/// A window shorter than the meeting is skipped even when a room would cover
/// the whole meeting. Room coverage alone is not enough here: a meeting that
/// outlasts its free window runs into someone's busy time. This is stricter
/// than pairing on room coverage only.
pub fn create_meeting_options(
    free_windows: &[FreeWindow],
    room_candidates: &[RoomCandidate],
    attendees: &[Attendee],
    duration_minutes: u32,
    max_options: usize,
    tz: Tz,
    scoring: &OptionScoring,
) -> Result<Vec<MeetingOption>> {
    if duration_minutes == 0 {
        return Err(SlotError::InvalidDuration(duration_minutes));
    }

    let duration = Duration::minutes(i64::from(duration_minutes));
    let mut options = Vec::new();

    for window in free_windows {
        if options.len() >= max_options {
            break;
        }
        if !window.fits(duration_minutes) {
            continue;
        }

        let start = window.start();
        let end = start + duration;
        let Some(candidate) = room_candidates.iter().find(|c| c.can_host(start, end)) else {
            continue;
        };

        let hour = start.with_timezone(&tz).hour();
        options.push(MeetingOption {
            id: options.len() + 1,
            start,
            end,
            duration_minutes,
            room: candidate.room.clone(),
            attendees: attendees.to_vec(),
            score: option_score(hour, &candidate.room, scoring),
            note: None,
        });
    }

    debug!(
        windows = free_windows.len(),
        rooms = room_candidates.len(),
        options = options.len(),
        "synthesized meeting options"
    );

    Ok(options)
}
