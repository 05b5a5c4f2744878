//! Multi-attendee, multi-day free-time reconciliation.
//!
//! "Everyone is free" is the complement of "anyone is busy": for each working
//! day the busy intervals of all attendees are pooled, merged, and
//! complemented within the work window. No pairwise intersection of free time
//! is ever computed.

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::availability::{self, DayAvailability, PrivacyLevel};
use crate::config::EngineConfig;
use crate::error::{Result, SlotError};
use crate::freebusy::derive_free_windows;
use crate::interval::{FreeWindow, TimeInterval};
use crate::options::{self, MeetingOption};
use crate::preference::{filter_by_preference, TimePreference};
use crate::ranking::{rank_windows, RankedWindow};
use crate::room::{RoomCandidate, RoomDirectory, RoomQuery};
use crate::schedule::{Attendee, AttendeeSchedule, CalendarSource};

/// Saturday and Sunday are never scheduled. Holidays are not considered.
pub fn is_workday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Everything [`SlotFinder::plan`] needs to go from attendees to options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingRequest {
    pub attendees: Vec<Attendee>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_minutes: u32,
    #[serde(default)]
    pub preferred_time: Option<TimePreference>,
    #[serde(default)]
    pub room_query: RoomQuery,
    #[serde(default)]
    pub max_options: Option<usize>,
}

/// The reconciliation engine, bound to one configuration.
///
/// Holds no mutable state; a single instance can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct SlotFinder {
    config: EngineConfig,
    reference_date: Option<NaiveDate>,
}

impl SlotFinder {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            reference_date: None,
        }
    }

    /// Pin "today" for recency scoring instead of reading the clock.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The date recency is measured from, in the configured timezone.
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Utc::now().with_timezone(&self.config.timezone).date_naive())
    }

    /// Free windows of `date` shared by every schedule, at least
    /// `duration_minutes` long. Whole windows are returned, not sub-slices.
    pub fn find_common_free_slots_for_day(
        &self,
        schedules: &[AttendeeSchedule],
        date: NaiveDate,
        duration_minutes: u32,
    ) -> Result<Vec<FreeWindow>> {
        let tz = self.config.timezone;
        let work_window = &self.config.work_window;
        let (window_start, window_end) = work_window.bounds_on(date, tz)?;

        let mut pool: Vec<TimeInterval> = schedules
            .iter()
            .flat_map(|s| s.busy_on(date).cloned())
            .collect();
        if let Some(excluded) = work_window.excluded_on(date, tz)? {
            pool.push(excluded);
        }

        let windows: Vec<FreeWindow> = derive_free_windows(&pool, window_start, window_end)
            .into_iter()
            .filter(|w| w.duration_minutes() >= i64::from(duration_minutes))
            .collect();

        trace!(
            %date,
            busy = pool.len(),
            qualifying = windows.len(),
            "reconciled day"
        );

        Ok(windows)
    }

    /// Common free windows across `[start_date, end_date]`, filtered by
    /// preference and ranked best first.
    ///
    /// An empty result means no availability; it is not an error.
    pub fn find_common_free_slots(
        &self,
        schedules: &[AttendeeSchedule],
        start_date: NaiveDate,
        end_date: NaiveDate,
        duration_minutes: u32,
        preferred_time: Option<TimePreference>,
    ) -> Result<Vec<FreeWindow>> {
        Ok(self
            .rank_common_free_slots(schedules, start_date, end_date, duration_minutes, preferred_time)?
            .into_iter()
            .map(|ranked| ranked.window)
            .collect())
    }

    /// Same as [`find_common_free_slots`](Self::find_common_free_slots), but
    /// keeps the ranking score of each window.
    pub fn rank_common_free_slots(
        &self,
        schedules: &[AttendeeSchedule],
        start_date: NaiveDate,
        end_date: NaiveDate,
        duration_minutes: u32,
        preferred_time: Option<TimePreference>,
    ) -> Result<Vec<RankedWindow>> {
        if end_date < start_date {
            return Err(SlotError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        if duration_minutes == 0 {
            return Err(SlotError::InvalidDuration(duration_minutes));
        }
        if schedules.is_empty() {
            return Ok(Vec::new());
        }

        let mut candidates = Vec::new();
        let mut days_scanned = 0usize;
        for date in start_date.iter_days().take_while(|d| *d <= end_date) {
            if !is_workday(date) {
                continue;
            }
            days_scanned += 1;
            candidates.extend(self.find_common_free_slots_for_day(
                schedules,
                date,
                duration_minutes,
            )?);
        }

        let tz = self.config.timezone;
        let filtered = filter_by_preference(candidates, preferred_time, tz);
        let ranked = rank_windows(
            filtered,
            preferred_time,
            self.today(),
            tz,
            &self.config.scoring,
        );

        debug!(
            attendees = schedules.len(),
            days_scanned,
            windows = ranked.len(),
            duration_minutes,
            "found common free slots"
        );

        Ok(ranked)
    }

    /// Pair ranked windows with rooms. `max_options` defaults to the
    /// configured cap.
    pub fn create_meeting_options(
        &self,
        free_windows: &[FreeWindow],
        room_candidates: &[RoomCandidate],
        attendees: &[Attendee],
        duration_minutes: u32,
        max_options: Option<usize>,
    ) -> Result<Vec<MeetingOption>> {
        options::create_meeting_options(
            free_windows,
            room_candidates,
            attendees,
            duration_minutes,
            max_options.unwrap_or(self.config.max_options),
            self.config.timezone,
            &self.config.option_scoring,
        )
    }

    /// Like [`create_meeting_options`](Self::create_meeting_options), but only
    /// rooms matching `query` are considered.
    pub fn create_meeting_options_matching(
        &self,
        free_windows: &[FreeWindow],
        room_candidates: &[RoomCandidate],
        query: &RoomQuery,
        attendees: &[Attendee],
        duration_minutes: u32,
        max_options: Option<usize>,
    ) -> Result<Vec<MeetingOption>> {
        let matching: Vec<RoomCandidate> = room_candidates
            .iter()
            .filter(|c| query.matches(&c.room))
            .cloned()
            .collect();
        self.create_meeting_options(
            free_windows,
            &matching,
            attendees,
            duration_minutes,
            max_options,
        )
    }

    /// Busy blocks and free windows of one day across all schedules.
    pub fn summarize_day(
        &self,
        schedules: &[AttendeeSchedule],
        date: NaiveDate,
        privacy: PrivacyLevel,
    ) -> Result<DayAvailability> {
        availability::summarize_day(
            schedules,
            date,
            &self.config.work_window,
            self.config.timezone,
            privacy,
        )
    }

    /// Fetch schedules and rooms through the collaborators and return ranked
    /// options for `request`.
    ///
    /// Rooms are queried per candidate window, in rank order, for exactly the
    /// meeting's time range, and querying stops once enough windows have a
    /// room.
    pub fn plan(
        &self,
        calendar: &impl CalendarSource,
        rooms: &impl RoomDirectory,
        request: &MeetingRequest,
    ) -> Result<Vec<MeetingOption>> {
        let max_options = request.max_options.unwrap_or(self.config.max_options);
        let attendee_ids: Vec<String> = request.attendees.iter().map(|a| a.id.clone()).collect();

        let schedules =
            calendar.get_schedules(&attendee_ids, request.start_date, request.end_date)?;
        let windows = self.find_common_free_slots(
            &schedules,
            request.start_date,
            request.end_date,
            request.duration_minutes,
            request.preferred_time,
        )?;

        let duration = Duration::minutes(i64::from(request.duration_minutes));
        let mut pool: Vec<RoomCandidate> = Vec::new();
        let mut hosted = 0usize;
        for window in &windows {
            if hosted >= max_options {
                break;
            }
            let start = window.start();
            let end = start + duration;
            let candidates = rooms.search_available_rooms(start, end, &request.room_query)?;
            if candidates
                .iter()
                .any(|c| request.room_query.matches(&c.room) && c.can_host(start, end))
            {
                hosted += 1;
            }
            pool.extend(candidates);
        }

        self.create_meeting_options_matching(
            &windows,
            &pool,
            &request.room_query,
            &request.attendees,
            request.duration_minutes,
            Some(max_options),
        )
    }
}
