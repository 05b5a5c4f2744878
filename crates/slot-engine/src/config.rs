//! Engine configuration: working hours, lunch exclusion, timezone, and the
//! tunable scoring constants.
//!
//! Configuration is plain data passed to [`SlotFinder`](crate::SlotFinder)
//! explicitly. It can be built in code or loaded from TOML:
//!
//! ```toml
//! timezone = "Asia/Seoul"
//! max_options = 5
//!
//! [work_window]
//! start = "09:00:00"
//! end = "18:00:00"
//! exclude_lunch = true
//! lunch_start = "12:00:00"
//! lunch_end = "13:00:00"
//!
//! [scoring]
//! preference_bonus = 10.0
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::TimeInterval;

/// The bounded working period of a day, with an optional excluded span
/// (lunch by default).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWorkWindow", into = "RawWorkWindow")]
pub struct WorkWindow {
    start: NaiveTime,
    end: NaiveTime,
    excluded: Option<(NaiveTime, NaiveTime)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct RawWorkWindow {
    start: NaiveTime,
    end: NaiveTime,
    exclude_lunch: bool,
    lunch_start: NaiveTime,
    lunch_end: NaiveTime,
}

impl Default for RawWorkWindow {
    fn default() -> Self {
        Self {
            start: hm(9, 0),
            end: hm(18, 0),
            exclude_lunch: true,
            lunch_start: hm(12, 0),
            lunch_end: hm(13, 0),
        }
    }
}

impl TryFrom<RawWorkWindow> for WorkWindow {
    type Error = SlotError;

    fn try_from(raw: RawWorkWindow) -> Result<Self> {
        let window = WorkWindow::new(raw.start, raw.end)?;
        if raw.exclude_lunch {
            window.with_excluded(raw.lunch_start, raw.lunch_end)
        } else {
            Ok(window)
        }
    }
}

impl From<WorkWindow> for RawWorkWindow {
    fn from(window: WorkWindow) -> Self {
        let defaults = RawWorkWindow::default();
        let (lunch_start, lunch_end) = window
            .excluded
            .unwrap_or((defaults.lunch_start, defaults.lunch_end));
        Self {
            start: window.start,
            end: window.end,
            exclude_lunch: window.excluded.is_some(),
            lunch_start,
            lunch_end,
        }
    }
}

impl Default for WorkWindow {
    /// 09:00-18:00 with 12:00-13:00 excluded.
    fn default() -> Self {
        Self {
            start: hm(9, 0),
            end: hm(18, 0),
            excluded: Some((hm(12, 0), hm(13, 0))),
        }
    }
}

impl WorkWindow {
    /// A work window with no excluded span.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(SlotError::InvalidWorkWindow(format!(
                "start {} is not before end {}",
                start, end
            )));
        }
        Ok(Self {
            start,
            end,
            excluded: None,
        })
    }

    /// Exclude `[start, end)` from every day (e.g. lunch).
    pub fn with_excluded(mut self, start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(SlotError::InvalidWorkWindow(format!(
                "excluded span start {} is not before end {}",
                start, end
            )));
        }
        self.excluded = Some((start, end));
        Ok(self)
    }

    pub fn without_excluded(mut self) -> Self {
        self.excluded = None;
        self
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn excluded(&self) -> Option<(NaiveTime, NaiveTime)> {
        self.excluded
    }

    /// The work window of `date` in `tz`, as UTC instants.
    pub fn bounds_on(&self, date: NaiveDate, tz: Tz) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        Ok((
            local_instant(tz, date, self.start)?,
            local_instant(tz, date, self.end)?,
        ))
    }

    /// The excluded span of `date` as a synthetic busy interval.
    pub fn excluded_on(&self, date: NaiveDate, tz: Tz) -> Result<Option<TimeInterval>> {
        match self.excluded {
            Some((start, end)) => {
                let interval = TimeInterval::busy(
                    local_instant(tz, date, start)?,
                    local_instant(tz, date, end)?,
                )?
                .with_label("lunch");
                Ok(Some(interval))
            }
            None => Ok(None),
        }
    }
}

/// Ranking constants for free windows. Only relative order matters:
/// preference outweighs general desirability, which outweighs recency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// Added when the window starts inside the requested preference band.
    pub preference_bonus: f64,
    /// Added when the window starts at a generally desirable hour.
    pub desirable_bonus: f64,
    /// Subtracted per day between the reference date and the window's date.
    pub recency_decay_per_day: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            preference_bonus: 10.0,
            desirable_bonus: 5.0,
            recency_decay_per_day: 0.5,
        }
    }
}

/// Informational score constants for synthesized meeting options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionScoring {
    pub base: f64,
    pub desirable_hour_bonus: f64,
    pub small_room_capacity: u32,
    pub small_room_bonus: f64,
    pub medium_room_capacity: u32,
    pub medium_room_bonus: f64,
    pub video_conference_bonus: f64,
    pub whiteboard_bonus: f64,
}

impl Default for OptionScoring {
    fn default() -> Self {
        Self {
            base: 50.0,
            desirable_hour_bonus: 10.0,
            small_room_capacity: 6,
            small_room_bonus: 5.0,
            medium_room_capacity: 10,
            medium_room_bonus: 3.0,
            video_conference_bonus: 2.0,
            whiteboard_bonus: 1.0,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// IANA timezone all local hours and dates are evaluated in.
    pub timezone: Tz,
    /// Default cap on synthesized options.
    pub max_options: usize,
    pub work_window: WorkWindow,
    pub scoring: ScoringPolicy,
    pub option_scoring: OptionScoring,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Asia::Seoul,
            max_options: 5,
            work_window: WorkWindow::default(),
            scoring: ScoringPolicy::default(),
            option_scoring: OptionScoring::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(source).map_err(|e| SlotError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            SlotError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&source)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| SlotError::Config(e.to_string()))
    }

    /// Reject scoring constants that would make ordering meaningless.
    pub fn validate(&self) -> Result<()> {
        let constants = [
            ("scoring.preference_bonus", self.scoring.preference_bonus),
            ("scoring.desirable_bonus", self.scoring.desirable_bonus),
            ("scoring.recency_decay_per_day", self.scoring.recency_decay_per_day),
            ("option_scoring.base", self.option_scoring.base),
            (
                "option_scoring.desirable_hour_bonus",
                self.option_scoring.desirable_hour_bonus,
            ),
            ("option_scoring.small_room_bonus", self.option_scoring.small_room_bonus),
            ("option_scoring.medium_room_bonus", self.option_scoring.medium_room_bonus),
            (
                "option_scoring.video_conference_bonus",
                self.option_scoring.video_conference_bonus,
            ),
            ("option_scoring.whiteboard_bonus", self.option_scoring.whiteboard_bonus),
        ];
        if let Some((name, value)) = constants.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SlotError::Config(format!("{} must be finite, got {}", name, value)));
        }
        Ok(())
    }
}

/// Resolve a local wall-clock time on `date` in `tz` to a UTC instant.
///
/// Fails for times skipped or repeated by a DST transition.
pub(crate) fn local_instant(tz: Tz, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Utc>> {
    let local = date.and_time(time);
    tz.from_local_datetime(&local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| SlotError::InvalidLocalTime(format!("{} ({})", local, tz)))
}

// Only called with literal defaults.
fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid wall-clock constant")
}
