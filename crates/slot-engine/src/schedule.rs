//! Attendee schedules as supplied by the calendar collaborator.
//!
//! The engine never fetches calendars itself. Callers implement
//! [`CalendarSource`] (or deserialize a JSON response with
//! [`parse_schedules`]) and hand the resulting snapshots to the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interval::TimeInterval;

/// A meeting participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Attendee {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: None,
            email: None,
        }
    }
}

/// One attendee's intervals for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub attendee_id: String,
    #[serde(default)]
    pub busy: Vec<TimeInterval>,
}

impl DaySchedule {
    pub fn new(attendee_id: impl Into<String>, date: NaiveDate, busy: Vec<TimeInterval>) -> Self {
        Self {
            date,
            attendee_id: attendee_id.into(),
            busy,
        }
    }

    /// Intervals that actually block time. Entries flagged not busy are
    /// informational only.
    pub fn blocking(&self) -> impl Iterator<Item = &TimeInterval> {
        self.busy.iter().filter(|iv| iv.is_busy())
    }
}

/// The calendar collaborator's response for one attendee over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendeeSchedule {
    pub attendee_id: String,
    #[serde(default)]
    pub attendee_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub days: Vec<DaySchedule>,
}

impl AttendeeSchedule {
    pub fn new(
        attendee_id: impl Into<String>,
        attendee_name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            attendee_id: attendee_id.into(),
            attendee_name: attendee_name.into(),
            start_date,
            end_date,
            days: Vec::new(),
        }
    }

    /// Append a day, stamping it with this attendee's id.
    pub fn with_day(mut self, date: NaiveDate, busy: Vec<TimeInterval>) -> Self {
        let day = DaySchedule::new(self.attendee_id.clone(), date, busy);
        self.days.push(day);
        self
    }

    /// Blocking intervals recorded for `date`.
    pub fn busy_on(&self, date: NaiveDate) -> impl Iterator<Item = &TimeInterval> {
        self.days
            .iter()
            .filter(move |day| day.date == date)
            .flat_map(|day| day.blocking())
    }

    /// Blocking intervals across every recorded day.
    pub fn all_busy(&self) -> impl Iterator<Item = &TimeInterval> {
        self.days.iter().flat_map(|day| day.blocking())
    }
}

/// Calendar lookup contract. Implementations own transport, retries and
/// backoff; the engine only sees the returned snapshots.
pub trait CalendarSource {
    fn get_schedules(
        &self,
        attendee_ids: &[String],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<AttendeeSchedule>>;
}

/// Deserialize a JSON array of [`AttendeeSchedule`]. Intervals are validated
/// while parsing, so an inverted range fails the whole payload.
pub fn parse_schedules(json: &str) -> Result<Vec<AttendeeSchedule>> {
    Ok(serde_json::from_str(json)?)
}
