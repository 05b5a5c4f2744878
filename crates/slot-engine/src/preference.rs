//! Time-of-day preference and the fallback filter.

use std::fmt;
use std::str::FromStr;

use chrono::Timelike;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SlotError;
use crate::interval::FreeWindow;

/// A caller's soft preference for when a meeting should start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePreference {
    /// Local start hour before noon.
    Morning,
    /// Local start hour at or after 13:00.
    Afternoon,
    #[default]
    Any,
}

impl TimePreference {
    /// Whether a window starting at local `hour` passes the filter.
    pub fn admits(self, hour: u32) -> bool {
        match self {
            TimePreference::Morning => hour < 12,
            TimePreference::Afternoon => hour >= 13,
            TimePreference::Any => true,
        }
    }

    /// Whether local `hour` falls in the band that earns the ranking bonus.
    ///
    /// Narrower than [`admits`](Self::admits): morning is 9-11, afternoon 13-17.
    pub fn in_band(self, hour: u32) -> bool {
        match self {
            TimePreference::Morning => (9..=11).contains(&hour),
            TimePreference::Afternoon => (13..=17).contains(&hour),
            TimePreference::Any => false,
        }
    }
}

impl FromStr for TimePreference {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(TimePreference::Morning),
            "afternoon" => Ok(TimePreference::Afternoon),
            "any" | "" => Ok(TimePreference::Any),
            _ => Err(SlotError::InvalidPreference(s.to_string())),
        }
    }
}

impl fmt::Display for TimePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimePreference::Morning => "morning",
            TimePreference::Afternoon => "afternoon",
            TimePreference::Any => "any",
        };
        f.write_str(name)
    }
}

/// Keep windows whose local start hour matches `preference`.
///
/// If nothing matches, the input is returned unchanged: a soft preference must
/// never hide the only availability there is.
pub fn filter_by_preference(
    windows: Vec<FreeWindow>,
    preference: Option<TimePreference>,
    tz: Tz,
) -> Vec<FreeWindow> {
    let preference = match preference {
        Some(p) if p != TimePreference::Any => p,
        _ => return windows,
    };

    let matching: Vec<FreeWindow> = windows
        .iter()
        .filter(|w| preference.admits(w.start().with_timezone(&tz).hour()))
        .cloned()
        .collect();

    if matching.is_empty() && !windows.is_empty() {
        warn!(
            %preference,
            candidates = windows.len(),
            "no window matches preference, keeping unfiltered set"
        );
        return windows;
    }

    matching
}
