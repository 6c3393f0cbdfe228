use crate::shared::entity::ID;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Key under which the single `ScheduleSnapshot` is stored locally
pub const SCHEDULE_SNAPSHOT_KEY: &str = "user-schedule";

/// Wall clock start time of a `ClassRecord` in the user's local timezone
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ClassTime {
    pub hours: u32,
    pub minutes: u32,
}

impl ClassTime {
    pub fn new(hours: u32, minutes: u32) -> Option<Self> {
        if hours >= 24 || minutes >= 60 {
            return None;
        }
        Some(Self { hours, minutes })
    }
}

impl std::fmt::Display for ClassTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

#[derive(Error, Debug)]
pub enum InvalidClassTimeError {
    #[error("Class time: {0} is malformed, expected HH:MM")]
    Malformed(String),
}

impl FromStr for ClassTime {
    type Err = InvalidClassTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InvalidClassTimeError::Malformed(s.to_string());
        let mut parts = s.split(':');
        let hours = parts
            .next()
            .and_then(|h| h.parse::<u32>().ok())
            .ok_or_else(malformed)?;
        let minutes = parts
            .next()
            .and_then(|m| m.parse::<u32>().ok())
            .ok_or_else(malformed)?;
        if parts.next().is_some() {
            return Err(malformed());
        }
        ClassTime::new(hours, minutes).ok_or_else(malformed)
    }
}

/// A class meeting recurring weekly on a set of weekdays.
/// Owned by the remote document store and cached read-only locally.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub id: ID,
    pub name: String,
    pub days: Vec<Weekday>,
    /// Classes without a recorded start time produce no reminders
    pub start_time: Option<ClassTime>,
}

/// A task with an absolute due instant.
/// Owned by the remote document store and cached read-only locally.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: ID,
    pub name: String,
    /// Due timestamp in millis. Tasks whose due date could not be
    /// parsed from the remote record carry `None` and produce no
    /// reminders.
    pub due_ts: Option<i64>,
}

/// The authoritative local snapshot of a user's classes and tasks,
/// overwritten wholesale on each refresh
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSnapshot {
    pub user_id: String,
    pub classes: Vec<ClassRecord>,
    pub tasks: Vec<TaskRecord>,
    /// Timestamp in millis of the last refresh from the remote store
    pub last_updated: i64,
}

impl ScheduleSnapshot {
    pub fn new(user_id: String, classes: Vec<ClassRecord>, tasks: Vec<TaskRecord>, now: i64) -> Self {
        Self {
            user_id,
            classes,
            tasks,
            last_updated: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_class_time() {
        let time = "09:05".parse::<ClassTime>().expect("Valid class time");
        assert_eq!(time, ClassTime { hours: 9, minutes: 5 });
        assert_eq!(time.to_string(), "09:05");
    }

    #[test]
    fn rejects_malformed_class_times() {
        for s in ["", "9", "24:00", "12:60", "a:b", "10:15:30"] {
            assert!(s.parse::<ClassTime>().is_err(), "Expected {} to be rejected", s);
        }
    }
}
