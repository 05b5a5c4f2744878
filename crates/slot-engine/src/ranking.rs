//! Score and order free windows.
//!
//! Scores are additive and unnormalized; they only mean something relative to
//! other windows ranked in the same call.

use std::cmp::Ordering;

use chrono::{NaiveDate, Timelike};
use chrono_tz::Tz;
use serde::Serialize;

use crate::config::ScoringPolicy;
use crate::interval::FreeWindow;
use crate::preference::TimePreference;

/// Local start hours that are generally convenient regardless of preference.
pub const DESIRABLE_HOURS: [u32; 5] = [10, 11, 14, 15, 16];

pub fn is_desirable_hour(hour: u32) -> bool {
    DESIRABLE_HOURS.contains(&hour)
}

/// A free window with the score it was ranked by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedWindow {
    pub window: FreeWindow,
    pub score: f64,
}

/// Score one window against a preference and a reference date.
pub fn score_window(
    window: &FreeWindow,
    preference: Option<TimePreference>,
    today: NaiveDate,
    tz: Tz,
    policy: &ScoringPolicy,
) -> f64 {
    let local = window.start().with_timezone(&tz);
    let hour = local.hour();
    let mut score = 0.0;

    if preference.is_some_and(|p| p.in_band(hour)) {
        score += policy.preference_bonus;
    }
    if is_desirable_hour(hour) {
        score += policy.desirable_bonus;
    }

    let days_out = (local.date_naive() - today).num_days();
    score -= days_out as f64 * policy.recency_decay_per_day;

    score
}

/// Score every window and sort by score, highest first.
///
/// The sort is stable: windows with equal scores keep their input order.
pub fn rank_windows(
    windows: Vec<FreeWindow>,
    preference: Option<TimePreference>,
    today: NaiveDate,
    tz: Tz,
    policy: &ScoringPolicy,
) -> Vec<RankedWindow> {
    let mut ranked: Vec<RankedWindow> = windows
        .into_iter()
        .map(|window| {
            let score = score_window(&window, preference, today, tz, policy);
            RankedWindow { window, score }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked
}
