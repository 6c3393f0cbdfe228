use crate::schedule::{ClassRecord, TaskRecord};
use crate::shared::entity::ID;
use chrono::{DateTime, Datelike, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Reminders further in the future than this are not materialized.
/// They will be recomputed by a later evaluation cycle once inside
/// the horizon.
pub const LOOK_AHEAD_HORIZON_MILLIS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ReminderKind {
    Class,
    Task,
}

impl ReminderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Task => "task",
        }
    }
}

impl std::fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReminderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" => Ok(Self::Class),
            "task" => Ok(Self::Task),
            _ => Err(format!("Unknown reminder kind: {}", s)),
        }
    }
}

/// How far before the class start or task due instant a reminder fires
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalLabel {
    #[serde(rename = "5min")]
    FiveMin,
    #[serde(rename = "30min")]
    ThirtyMin,
    #[serde(rename = "24hour")]
    TwentyFourHour,
}

impl IntervalLabel {
    pub fn minutes(&self) -> i64 {
        match self {
            Self::FiveMin => 5,
            Self::ThirtyMin => 30,
            Self::TwentyFourHour => 24 * 60,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FiveMin => "5min",
            Self::ThirtyMin => "30min",
            Self::TwentyFourHour => "24hour",
        }
    }
}

impl std::fmt::Display for IntervalLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IntervalLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5min" => Ok(Self::FiveMin),
            "30min" => Ok(Self::ThirtyMin),
            "24hour" => Ok(Self::TwentyFourHour),
            _ => Err(format!("Unknown interval label: {}", s)),
        }
    }
}

/// A computed, not yet delivered notification with a target fire time.
/// Transient: recomputed fresh on every evaluation cycle.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderEvent {
    pub kind: ReminderKind,
    pub source_id: ID,
    pub source_name: String,
    /// Timestamp in millis at which the notification should surface
    pub fire_at: i64,
    pub interval: IntervalLabel,
}

impl ReminderEvent {
    /// Stable key preventing duplicate scheduling of the same logical
    /// reminder across evaluation cycles. Also used as the platform
    /// notification tag so racing deliveries coalesce.
    pub fn dedup_key(&self) -> String {
        format!("{}-{}-{}", self.kind, self.source_id, self.interval)
    }
}

/// A `ReminderEvent` that has been scheduled but not yet delivered,
/// persisted so reminders survive process suspension
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PendingReminder {
    pub key: String,
    pub kind: ReminderKind,
    pub source_id: ID,
    pub source_name: String,
    pub fire_at: i64,
    pub interval: IntervalLabel,
    /// Timestamp in millis of the evaluation cycle that produced this
    pub computed_at: i64,
}

impl PendingReminder {
    pub fn from_event(event: &ReminderEvent, computed_at: i64) -> Self {
        Self {
            key: event.dedup_key(),
            kind: event.kind,
            source_id: event.source_id.clone(),
            source_name: event.source_name.clone(),
            fire_at: event.fire_at,
            interval: event.interval,
            computed_at,
        }
    }

    pub fn to_event(&self) -> ReminderEvent {
        ReminderEvent {
            kind: self.kind,
            source_id: self.source_id.clone(),
            source_name: self.source_name.clone(),
            fire_at: self.fire_at,
            interval: self.interval,
        }
    }

    pub fn is_due(&self, now: i64) -> bool {
        self.fire_at <= now
    }
}

fn within_horizon(fire_at: i64, now: i64) -> bool {
    fire_at > now && fire_at <= now + LOOK_AHEAD_HORIZON_MILLIS
}

/// Computes the reminders a class meeting produces for today.
///
/// Classes only remind on weekdays in their recurrence set and the
/// computation never rolls forward to the next occurrence: it relies
/// on being re-invoked at least daily.
pub fn class_reminders(class: &ClassRecord, now: &DateTime<Tz>) -> Vec<ReminderEvent> {
    let start_time = match class.start_time {
        Some(time) => time,
        None => return Vec::new(),
    };
    if !class.days.contains(&now.weekday()) {
        return Vec::new();
    }

    let start_today = now
        .date_naive()
        .and_hms_opt(start_time.hours, start_time.minutes, 0)
        .and_then(|dt| now.timezone().from_local_datetime(&dt).single());
    let start_millis = match start_today {
        Some(start) => start.timestamp_millis(),
        // Start time does not exist on the local calendar today (DST gap)
        None => return Vec::new(),
    };

    let now_millis = now.timestamp_millis();
    [IntervalLabel::ThirtyMin, IntervalLabel::FiveMin]
        .iter()
        .filter_map(|interval| {
            let fire_at = start_millis - interval.minutes() * 60 * 1000;
            if !within_horizon(fire_at, now_millis) {
                return None;
            }
            Some(ReminderEvent {
                kind: ReminderKind::Class,
                source_id: class.id.clone(),
                source_name: class.name.clone(),
                fire_at,
                interval: *interval,
            })
        })
        .collect()
}

/// Computes the single 24-hours-before reminder for a task, if its
/// fire time lies inside the look-ahead horizon
pub fn task_reminder(task: &TaskRecord, now: i64) -> Option<ReminderEvent> {
    let due_ts = task.due_ts?;
    let fire_at = due_ts - IntervalLabel::TwentyFourHour.minutes() * 60 * 1000;
    if !within_horizon(fire_at, now) {
        return None;
    }
    Some(ReminderEvent {
        kind: ReminderKind::Task,
        source_id: task.id.clone(),
        source_name: task.name.clone(),
        fire_at,
        interval: IntervalLabel::TwentyFourHour,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ClassTime;
    use chrono::{TimeZone, Weekday};
    use chrono_tz::UTC;

    fn algebra_on(days: Vec<Weekday>) -> ClassRecord {
        ClassRecord {
            id: Default::default(),
            name: "Algebra".into(),
            days,
            start_time: ClassTime::new(9, 0),
        }
    }

    // 2021-02-22 is a Monday
    fn monday_at(hours: u32, minutes: u32) -> DateTime<Tz> {
        UTC.with_ymd_and_hms(2021, 2, 22, hours, minutes, 0)
            .single()
            .expect("Valid timestamp")
    }

    #[test]
    fn class_produces_both_intervals_before_start() {
        let class = algebra_on(vec![Weekday::Mon, Weekday::Wed]);
        let now = monday_at(8, 25);

        let events = class_reminders(&class, &now);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].interval, IntervalLabel::ThirtyMin);
        assert_eq!(events[0].fire_at, monday_at(8, 30).timestamp_millis());
        assert_eq!(events[1].interval, IntervalLabel::FiveMin);
        assert_eq!(events[1].fire_at, monday_at(8, 55).timestamp_millis());
    }

    #[test]
    fn class_skips_elapsed_interval() {
        let class = algebra_on(vec![Weekday::Mon]);
        let now = monday_at(8, 40);

        let events = class_reminders(&class, &now);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].interval, IntervalLabel::FiveMin);
    }

    #[test]
    fn class_not_meeting_today_produces_nothing() {
        let class = algebra_on(vec![Weekday::Tue, Weekday::Thu]);
        let now = monday_at(8, 0);
        assert!(class_reminders(&class, &now).is_empty());
    }

    #[test]
    fn class_already_started_produces_nothing() {
        let class = algebra_on(vec![Weekday::Mon]);
        let now = monday_at(9, 30);
        assert!(class_reminders(&class, &now).is_empty());
    }

    #[test]
    fn class_without_start_time_produces_nothing() {
        let mut class = algebra_on(vec![Weekday::Mon]);
        class.start_time = None;
        let now = monday_at(8, 0);
        assert!(class_reminders(&class, &now).is_empty());
    }

    fn essay_due(due_ts: Option<i64>) -> TaskRecord {
        TaskRecord {
            id: Default::default(),
            name: "Essay".into(),
            due_ts,
        }
    }

    #[test]
    fn task_reminds_24_hours_before_due() {
        // Due Wednesday 23:59, now Tuesday 23:00
        let due = UTC
            .with_ymd_and_hms(2021, 2, 24, 23, 59, 0)
            .single()
            .expect("Valid timestamp")
            .timestamp_millis();
        let now = UTC
            .with_ymd_and_hms(2021, 2, 23, 23, 0, 0)
            .single()
            .expect("Valid timestamp")
            .timestamp_millis();

        let event = task_reminder(&essay_due(Some(due)), now).expect("One reminder");
        assert_eq!(event.fire_at, due - LOOK_AHEAD_HORIZON_MILLIS);
        assert_eq!(event.interval, IntervalLabel::TwentyFourHour);
        assert_eq!(event.kind, ReminderKind::Task);
    }

    #[test]
    fn task_due_in_the_past_produces_nothing() {
        let now = monday_at(12, 0).timestamp_millis();
        let due = now - 1000;
        assert!(task_reminder(&essay_due(Some(due)), now).is_none());
    }

    #[test]
    fn task_outside_look_ahead_horizon_produces_nothing() {
        let now = monday_at(12, 0).timestamp_millis();
        // Due in 3 days, so the fire time is 2 days out
        let due = now + 3 * LOOK_AHEAD_HORIZON_MILLIS;
        assert!(task_reminder(&essay_due(Some(due)), now).is_none());
    }

    #[test]
    fn task_without_due_date_produces_nothing() {
        let now = monday_at(12, 0).timestamp_millis();
        assert!(task_reminder(&essay_due(None), now).is_none());
    }

    #[test]
    fn dedup_key_is_stable_per_kind_source_and_interval() {
        let class = algebra_on(vec![Weekday::Mon]);
        let first = class_reminders(&class, &monday_at(8, 25));
        let second = class_reminders(&class, &monday_at(8, 26));
        assert_eq!(first[0].dedup_key(), second[0].dedup_key());
        assert_ne!(first[0].dedup_key(), first[1].dedup_key());
    }
}
