//! Tests for time-of-day preference parsing and filtering.

mod common;

use chrono_tz::Asia::Seoul;
use common::kst;
use slot_engine::{filter_by_preference, FreeWindow, SlotError, TimePreference};

fn window(start_hour: u32, end_hour: u32) -> FreeWindow {
    FreeWindow::new(kst(2026, 3, 16, start_hour, 0), kst(2026, 3, 16, end_hour, 0)).unwrap()
}

#[test]
fn parses_known_preferences_case_insensitively() {
    assert_eq!("morning".parse::<TimePreference>().unwrap(), TimePreference::Morning);
    assert_eq!("Afternoon".parse::<TimePreference>().unwrap(), TimePreference::Afternoon);
    assert_eq!(" ANY ".parse::<TimePreference>().unwrap(), TimePreference::Any);
}

#[test]
fn rejects_unknown_preference() {
    let err = "evening".parse::<TimePreference>().unwrap_err();
    assert!(matches!(err, SlotError::InvalidPreference(ref s) if s == "evening"));
}

#[test]
fn preference_round_trips_through_serde() {
    let json = serde_json::to_string(&TimePreference::Afternoon).unwrap();
    assert_eq!(json, "\"afternoon\"");
    let back: TimePreference = serde_json::from_str(&json).unwrap();
    assert_eq!(back, TimePreference::Afternoon);
}

#[test]
fn morning_keeps_windows_starting_before_noon() {
    let windows = vec![window(9, 10), window(11, 12), window(13, 14), window(16, 18)];
    let kept = filter_by_preference(windows, Some(TimePreference::Morning), Seoul);

    let starts: Vec<_> = kept.iter().map(|w| w.start()).collect();
    assert_eq!(starts, vec![kst(2026, 3, 16, 9, 0), kst(2026, 3, 16, 11, 0)]);
}

#[test]
fn afternoon_keeps_windows_starting_at_or_after_one() {
    let windows = vec![window(9, 10), window(12, 13), window(13, 14), window(16, 18)];
    let kept = filter_by_preference(windows, Some(TimePreference::Afternoon), Seoul);

    let starts: Vec<_> = kept.iter().map(|w| w.start()).collect();
    assert_eq!(starts, vec![kst(2026, 3, 16, 13, 0), kst(2026, 3, 16, 16, 0)]);
}

#[test]
fn any_and_absent_preferences_keep_everything() {
    let windows = vec![window(9, 10), window(13, 14)];
    assert_eq!(
        filter_by_preference(windows.clone(), Some(TimePreference::Any), Seoul),
        windows
    );
    assert_eq!(filter_by_preference(windows.clone(), None, Seoul), windows);
}

#[test]
fn filter_falls_back_to_unfiltered_set_when_nothing_matches() {
    let windows = vec![window(13, 14), window(16, 18)];
    let kept = filter_by_preference(windows.clone(), Some(TimePreference::Morning), Seoul);
    assert_eq!(kept, windows, "a soft preference must not hide availability");
}

#[test]
fn filter_of_empty_set_is_empty() {
    assert!(filter_by_preference(Vec::new(), Some(TimePreference::Morning), Seoul).is_empty());
}

#[test]
fn hours_are_evaluated_in_the_given_timezone() {
    // 13:00 in Seoul is 04:00 UTC: afternoon in Seoul, morning in UTC.
    let windows = vec![window(13, 14), window(9, 10)];
    let seoul = filter_by_preference(windows.clone(), Some(TimePreference::Afternoon), Seoul);
    assert_eq!(seoul.len(), 1);

    let utc = filter_by_preference(windows, Some(TimePreference::Afternoon), chrono_tz::UTC);
    assert_eq!(utc.len(), 2, "nothing is afternoon in UTC, so the filter falls back");
}
