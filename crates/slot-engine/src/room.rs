//! Rooms and room availability as supplied by the room collaborator.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interval::TimeInterval;

/// Equipment a room may offer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Facility {
    VideoConference,
    Whiteboard,
    Projector,
    Microphone,
    Other(String),
}

impl From<String> for Facility {
    fn from(name: String) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "video_conference" | "video conference" | "video" | "화상회의" => {
                Facility::VideoConference
            }
            "whiteboard" | "화이트보드" => Facility::Whiteboard,
            "projector" | "프로젝터" => Facility::Projector,
            "microphone" | "mic" | "마이크" => Facility::Microphone,
            _ => Facility::Other(name),
        }
    }
}

impl From<Facility> for String {
    fn from(facility: Facility) -> Self {
        facility.to_string()
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facility::VideoConference => f.write_str("video_conference"),
            Facility::Whiteboard => f.write_str("whiteboard"),
            Facility::Projector => f.write_str("projector"),
            Facility::Microphone => f.write_str("microphone"),
            Facility::Other(name) => f.write_str(name),
        }
    }
}

/// A bookable meeting room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub floor: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    pub capacity: u32,
    #[serde(default)]
    pub facilities: Vec<Facility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Room {
    pub fn has(&self, facility: &Facility) -> bool {
        self.facilities.contains(facility)
    }

    /// "Main 4F" style location, or just the floor when no building is known.
    pub fn location_description(&self) -> String {
        match &self.building {
            Some(building) => format!("{} {}F", building, self.floor),
            None => format!("{}F", self.floor),
        }
    }
}

/// A room's availability for the time range the caller queried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomCandidate {
    pub room: Room,
    pub availability: TimeInterval,
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_reason: Option<String>,
}

impl RoomCandidate {
    /// The availability span is stored as non-blocking whatever its flag.
    pub fn available(room: Room, availability: TimeInterval) -> Self {
        Self {
            room,
            availability: availability.into_free(),
            is_available: true,
            conflict_reason: None,
        }
    }

    pub fn unavailable(room: Room, availability: TimeInterval, reason: impl Into<String>) -> Self {
        Self {
            room,
            availability: availability.into_free(),
            is_available: false,
            conflict_reason: Some(reason.into()),
        }
    }

    /// True when the room is free for all of `[start, end)`.
    pub fn can_host(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.is_available && self.availability.contains_range(start, end)
    }
}

/// Search constraints understood by the room collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomQuery {
    pub min_capacity: Option<u32>,
    pub facilities: Vec<Facility>,
    pub floor: Option<i32>,
}

impl RoomQuery {
    pub fn min_capacity(mut self, capacity: u32) -> Self {
        self.min_capacity = Some(capacity);
        self
    }

    pub fn requiring(mut self, facility: Facility) -> Self {
        self.facilities.push(facility);
        self
    }

    pub fn on_floor(mut self, floor: i32) -> Self {
        self.floor = Some(floor);
        self
    }

    pub fn matches(&self, room: &Room) -> bool {
        self.min_capacity.is_none_or(|min| room.capacity >= min)
            && self.floor.is_none_or(|floor| room.floor == floor)
            && self.facilities.iter().all(|f| room.has(f))
    }
}

/// Room lookup contract. Implementations perform the actual I/O.
pub trait RoomDirectory {
    fn search_available_rooms(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        query: &RoomQuery,
    ) -> Result<Vec<RoomCandidate>>;
}

/// Deserialize a JSON array of [`RoomCandidate`].
pub fn parse_room_candidates(json: &str) -> Result<Vec<RoomCandidate>> {
    Ok(serde_json::from_str(json)?)
}
