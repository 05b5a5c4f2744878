//! Error types for slot-engine operations.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid date range: end date {end} is before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid duration: {0} minutes (must be positive)")]
    InvalidDuration(u32),

    #[error("Invalid time preference: {0} (expected morning, afternoon or any)")]
    InvalidPreference(String),

    #[error("Invalid work window: {0}")]
    InvalidWorkWindow(String),

    #[error("Local time {0} does not map to a single instant in the configured timezone")]
    InvalidLocalTime(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Collaborator error: {0}")]
    Collaborator(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
