//! Shared fixtures for slot-engine integration tests.
//!
//! All wall-clock times are Asia/Seoul, the engine's default timezone.

#![allow(dead_code)]

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::Asia::Seoul;
use slot_engine::error::Result;
use slot_engine::{
    Attendee, AttendeeSchedule, CalendarSource, Facility, Room, RoomCandidate, RoomDirectory,
    RoomQuery, TimeInterval,
};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A Seoul wall-clock time as a UTC instant.
pub fn kst(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Seoul
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
        .with_timezone(&Utc)
}

/// A busy interval on `day` between two Seoul wall-clock times.
pub fn busy(day: NaiveDate, start: (u32, u32), end: (u32, u32)) -> TimeInterval {
    TimeInterval::busy(
        kst(day.year(), day.month(), day.day(), start.0, start.1),
        kst(day.year(), day.month(), day.day(), end.0, end.1),
    )
    .unwrap()
}

/// A single-day schedule for one attendee.
pub fn schedule(id: &str, day: NaiveDate, busy: Vec<TimeInterval>) -> AttendeeSchedule {
    AttendeeSchedule::new(id, id, day, day).with_day(day, busy)
}

pub fn attendees(ids: &[&str]) -> Vec<Attendee> {
    ids.iter().map(|id| Attendee::new(*id, *id)).collect()
}

fn room(id: &str, name: &str, floor: i32, capacity: u32, facilities: &[Facility]) -> Room {
    Room {
        id: id.to_string(),
        name: name.to_string(),
        floor,
        building: Some("Main".to_string()),
        capacity,
        facilities: facilities.to_vec(),
        description: None,
    }
}

/// The office room catalogue.
pub fn rooms() -> Vec<Room> {
    use Facility::*;
    vec![
        room("room_001", "Room A", 4, 6, &[Whiteboard, Projector]),
        room("room_002", "Room B", 4, 10, &[Whiteboard, Projector, VideoConference]),
        room(
            "room_003",
            "Auditorium",
            5,
            20,
            &[Whiteboard, Projector, VideoConference, Microphone],
        ),
        room("room_004", "Small Talk", 3, 4, &[Whiteboard]),
        room("room_005", "Creative Room", 2, 8, &[Whiteboard, Projector, VideoConference]),
    ]
}

pub fn room_by_id(id: &str) -> Room {
    rooms().into_iter().find(|r| r.id == id).unwrap()
}

/// A non-blocking span on `day` between two Seoul wall-clock times.
pub fn open(day: NaiveDate, start: (u32, u32), end: (u32, u32)) -> TimeInterval {
    TimeInterval::free(
        kst(day.year(), day.month(), day.day(), start.0, start.1),
        kst(day.year(), day.month(), day.day(), end.0, end.1),
    )
    .unwrap()
}

/// A candidate available across the whole of `day`'s working hours.
pub fn all_day_candidate(room: Room, day: NaiveDate) -> RoomCandidate {
    RoomCandidate::available(room, open(day, (9, 0), (18, 0)))
}

/// Deterministic pseudo-random busy pattern for an attendee on a weekday.
///
/// Five patterns keyed by a hash of the attendee and date: a morning meeting,
/// an afternoon meeting, both, one right after lunch, or nothing.
pub fn generated_busy(attendee_id: &str, day: NaiveDate) -> Vec<TimeInterval> {
    let mut hasher = DefaultHasher::new();
    (attendee_id, day).hash(&mut hasher);
    match hasher.finish() % 5 {
        0 => vec![busy(day, (10, 0), (11, 0)).with_label("team sync")],
        1 => vec![busy(day, (14, 0), (15, 30)).with_label("project review")],
        2 => vec![
            busy(day, (9, 30), (10, 30)).with_label("standup"),
            busy(day, (15, 0), (16, 0)).with_label("code review"),
        ],
        3 => vec![busy(day, (13, 0), (14, 0)).with_label("1:1")],
        _ => Vec::new(),
    }
}

/// A calendar collaborator backed by [`generated_busy`], optionally with
/// extra fixed intervals.
#[derive(Default)]
pub struct FixtureCalendar {
    pub extra: Vec<(String, TimeInterval)>,
    pub fail: bool,
}

impl CalendarSource for FixtureCalendar {
    fn get_schedules(
        &self,
        attendee_ids: &[String],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<AttendeeSchedule>> {
        if self.fail {
            return Err(slot_engine::SlotError::Collaborator(
                "calendar service unavailable".to_string(),
            ));
        }
        Ok(attendee_ids
            .iter()
            .map(|id| {
                let mut schedule =
                    AttendeeSchedule::new(id.clone(), id.clone(), start_date, end_date);
                for day in start_date.iter_days().take_while(|d| *d <= end_date) {
                    let mut busy = generated_busy(id, day);
                    busy.extend(
                        self.extra
                            .iter()
                            .filter(|(owner, iv)| {
                                owner == id && iv.start().with_timezone(&Seoul).date_naive() == day
                            })
                            .map(|(_, iv)| iv.clone()),
                    );
                    schedule = schedule.with_day(day, busy);
                }
                schedule
            })
            .collect())
    }
}

/// A room collaborator where every catalogue room is free except the ones
/// listed as booked.
#[derive(Default)]
pub struct FixtureRooms {
    pub booked: Vec<(String, TimeInterval)>,
}

impl RoomDirectory for FixtureRooms {
    fn search_available_rooms(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        query: &RoomQuery,
    ) -> Result<Vec<RoomCandidate>> {
        let requested = TimeInterval::free(start, end)?;
        Ok(rooms()
            .into_iter()
            .filter(|room| query.matches(room))
            .map(|room| {
                let clash = self
                    .booked
                    .iter()
                    .any(|(id, iv)| *id == room.id && iv.overlaps(&requested));
                if clash {
                    RoomCandidate::unavailable(room, requested.clone(), "already booked")
                } else {
                    RoomCandidate::available(room, requested.clone())
                }
            })
            .collect())
    }
}
