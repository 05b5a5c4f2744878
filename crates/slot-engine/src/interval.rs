//! Half-open time intervals and busy-interval merging.
//!
//! Every interval is `[start, end)` in UTC. Local-time questions (which hour a
//! window starts in, which calendar date it belongs to) are answered by the
//! caller through the configured timezone, never stored on the value.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// A validated `[start, end)` time range.
///
/// Construction enforces `start < end`; the value is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    is_busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    #[serde(default = "default_busy")]
    is_busy: bool,
    #[serde(default)]
    label: Option<String>,
}

fn default_busy() -> bool {
    true
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = SlotError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        let interval = TimeInterval::new(raw.start, raw.end, raw.is_busy)?;
        Ok(match raw.label {
            Some(label) => interval.with_label(label),
            None => interval,
        })
    }
}

impl TimeInterval {
    /// Create an interval, rejecting empty or inverted ranges.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, is_busy: bool) -> Result<Self> {
        if start >= end {
            return Err(SlotError::InvalidInterval { start, end });
        }
        Ok(Self {
            start,
            end,
            is_busy,
            label: None,
        })
    }

    /// Shorthand for a busy interval.
    pub fn busy(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        Self::new(start, end, true)
    }

    /// Shorthand for a non-blocking interval, such as a room's open span.
    pub fn free(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        Self::new(start, end, false)
    }

    pub(crate) fn into_free(mut self) -> Self {
        self.is_busy = false;
        self
    }

    /// Attach a human-readable label (e.g. the event title).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn is_busy(&self) -> bool {
        self.is_busy
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// True when the two ranges share at least one instant.
    ///
    /// Adjacent intervals (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `[start, end)` lies entirely inside this interval.
    pub fn contains_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start <= start && end <= self.end
    }

    /// Clip to `[window_start, window_end)`, or `None` if nothing remains.
    pub fn clamp(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Option<TimeInterval> {
        let start = self.start.max(window_start);
        let end = self.end.min(window_end);
        (start < end).then(|| TimeInterval {
            start,
            end,
            is_busy: self.is_busy,
            label: self.label.clone(),
        })
    }
}

/// A free span derived from a busy set, with its length precomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct FreeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    duration_minutes: i64,
}

#[derive(Deserialize)]
struct RawWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawWindow> for FreeWindow {
    type Error = SlotError;

    fn try_from(raw: RawWindow) -> Result<Self> {
        FreeWindow::new(raw.start, raw.end)
    }
}

impl FreeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(SlotError::InvalidInterval { start, end });
        }
        Ok(Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    /// True when a meeting of `minutes` starting at the window start fits.
    pub fn fits(&self, minutes: u32) -> bool {
        self.start + Duration::minutes(i64::from(minutes)) <= self.end
    }
}

/// Merge busy intervals into the minimal sorted, non-overlapping cover.
///
/// Intervals flagged not busy are informational and are dropped. Intervals
/// that overlap or touch (`next.start <= current.end`) collapse into one.
/// Input order does not matter. A merged interval keeps its label only if it
/// absorbed nothing.
pub fn merge_busy_intervals(intervals: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut sorted: Vec<&TimeInterval> = intervals.iter().filter(|iv| iv.is_busy).collect();
    sorted.sort_by_key(|iv| (iv.start, iv.end));

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(sorted.len());
    for iv in sorted {
        if let Some(last) = merged.last_mut() {
            if iv.start <= last.end {
                last.end = last.end.max(iv.end);
                last.label = None;
                continue;
            }
        }
        merged.push(TimeInterval {
            start: iv.start,
            end: iv.end,
            is_busy: true,
            label: iv.label.clone(),
        });
    }

    merged
}
