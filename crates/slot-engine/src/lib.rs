//! # slot-engine
//!
//! Deterministic free-time reconciliation for AI meeting-scheduling agents.
//!
//! Given N attendees' busy intervals over a date range, the engine computes the
//! windows in which everyone is free, filters them by duration and time-of-day
//! preference, ranks them, and pairs them with available rooms into concrete
//! meeting options. It is a pure computation over supplied snapshots: calendars
//! and rooms are fetched by the caller (see [`CalendarSource`] and
//! [`RoomDirectory`]).
//!
//! ## Modules
//!
//! - [`interval`] - Validated `[start, end)` intervals and busy-interval merging
//! - [`freebusy`] - Free windows from a busy set within a bounded window
//! - [`reconcile`] - Multi-attendee, multi-day reconciliation ([`SlotFinder`])
//! - [`preference`] - Morning/afternoon preference with empty-result fallback
//! - [`ranking`] - Window scoring and stable ordering
//! - [`options`] - Slot x room pairing into meeting options
//! - [`availability`] - Per-day busy/free summary with privacy control
//! - [`conflict`] - Re-verify a proposal against attendee calendars
//! - [`schedule`] / [`room`] - Collaborator data and contracts
//! - [`config`] - Work hours, timezone and scoring constants (TOML)
//! - [`error`] - Error types

pub mod availability;
pub mod config;
pub mod conflict;
pub mod error;
pub mod freebusy;
pub mod interval;
pub mod options;
pub mod preference;
pub mod ranking;
pub mod reconcile;
pub mod room;
pub mod schedule;

pub use availability::{summarize_day, BusyBlock, DayAvailability, PrivacyLevel};
pub use config::{EngineConfig, OptionScoring, ScoringPolicy, WorkWindow};
pub use conflict::{find_attendee_conflicts, AttendeeConflict};
pub use error::SlotError;
pub use freebusy::{derive_free_windows, find_first_free_window};
pub use interval::{merge_busy_intervals, FreeWindow, TimeInterval};
pub use options::{create_meeting_options, MeetingOption};
pub use preference::{filter_by_preference, TimePreference};
pub use ranking::{rank_windows, RankedWindow};
pub use reconcile::{is_workday, MeetingRequest, SlotFinder};
pub use room::{Facility, Room, RoomCandidate, RoomDirectory, RoomQuery};
pub use schedule::{Attendee, AttendeeSchedule, CalendarSource, DaySchedule};
