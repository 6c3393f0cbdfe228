use crate::reminder::{IntervalLabel, ReminderEvent, ReminderKind};
use chrono::TimeZone;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Extra payload attached to a surfaced notification so the client
/// can navigate to the relevant item
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    pub item_id: String,
    pub interval: IntervalLabel,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}

/// A platform notification ready for delivery through any channel.
/// The `tag` equals the reminder dedup key so the notification surface
/// coalesces duplicate delivery attempts.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub vibrate: Vec<u32>,
    pub data: NotificationData,
    pub actions: Vec<NotificationAction>,
    pub require_interaction: bool,
    pub tag: String,
}

const NOTIFICATION_ICON: &str = "/image/logo1.png";
const HOME_URL: &str = "/html/home.html";

/// Formats a millis timestamp on the local calendar. A timestamp the
/// calendar cannot represent (stored rows are not revalidated) falls
/// back to the raw millis rather than panicking.
fn format_local(ts: i64, timezone: &Tz, fmt: &str) -> String {
    match timezone.timestamp_millis_opt(ts) {
        chrono::LocalResult::Single(dt) => dt.format(fmt).to_string(),
        _ => ts.to_string(),
    }
}

impl NotificationPayload {
    /// Builds the user-facing notification for a reminder, with titles
    /// and bodies depending on the reminder kind and interval
    pub fn for_reminder(event: &ReminderEvent, timezone: &Tz) -> Self {
        let event_at = event.fire_at.saturating_add(event.interval.minutes() * 60 * 1000);
        let (title, body) = match (event.kind, event.interval) {
            (ReminderKind::Class, IntervalLabel::ThirtyMin) => (
                format!("Class Reminder: {} (30 minutes)", event.source_name),
                format!(
                    "Your {} class starts in 30 minutes at {}",
                    event.source_name,
                    format_local(event_at, timezone, "%H:%M")
                ),
            ),
            (ReminderKind::Class, _) => (
                format!("Class Reminder: {} (5 minutes)", event.source_name),
                format!(
                    "Your {} class starts in 5 minutes at {}",
                    event.source_name,
                    format_local(event_at, timezone, "%H:%M")
                ),
            ),
            (ReminderKind::Task, _) => (
                format!("Task Due Soon: {}", event.source_name),
                format!(
                    "Your task \"{}\" is due {}",
                    event.source_name,
                    format_local(event_at, timezone, "%Y-%m-%d")
                ),
            ),
        };

        Self {
            title,
            body,
            icon: NOTIFICATION_ICON.into(),
            badge: NOTIFICATION_ICON.into(),
            vibrate: vec![200, 100, 200],
            data: NotificationData {
                url: HOME_URL.into(),
                kind: event.kind,
                item_id: event.source_id.as_string(),
                interval: event.interval,
            },
            actions: vec![
                NotificationAction {
                    action: "view".into(),
                    title: "View Details".into(),
                },
                NotificationAction {
                    action: "dismiss".into(),
                    title: "Dismiss".into(),
                },
            ],
            require_interaction: true,
            tag: event.dedup_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::entity::ID;
    use chrono_tz::UTC;

    fn class_event(interval: IntervalLabel) -> ReminderEvent {
        ReminderEvent {
            kind: ReminderKind::Class,
            source_id: ID::new(),
            source_name: "Algebra".into(),
            // 2021-02-22 08:30 UTC
            fire_at: 1613982600000,
            interval,
        }
    }

    #[test]
    fn class_payload_names_interval_and_start_time() {
        let event = class_event(IntervalLabel::ThirtyMin);
        let payload = NotificationPayload::for_reminder(&event, &UTC);
        assert_eq!(payload.title, "Class Reminder: Algebra (30 minutes)");
        assert_eq!(payload.body, "Your Algebra class starts in 30 minutes at 09:00");
        assert_eq!(payload.tag, event.dedup_key());
        assert!(payload.require_interaction);
    }

    #[test]
    fn task_payload_names_due_date() {
        let event = ReminderEvent {
            kind: ReminderKind::Task,
            source_id: ID::new(),
            source_name: "Essay".into(),
            // Due 24 hours later: 2021-02-23 08:30 UTC
            fire_at: 1613982600000,
            interval: IntervalLabel::TwentyFourHour,
        };
        let payload = NotificationPayload::for_reminder(&event, &UTC);
        assert_eq!(payload.title, "Task Due Soon: Essay");
        assert!(payload.body.contains("2021-02-23"));
    }

    #[test]
    fn unrepresentable_fire_time_falls_back_to_raw_millis() {
        let mut event = class_event(IntervalLabel::FiveMin);
        // Beyond what the calendar can represent, as a stored row
        // could carry after corruption
        event.fire_at = i64::MAX;
        let payload = NotificationPayload::for_reminder(&event, &UTC);
        assert!(payload.body.contains(&i64::MAX.to_string()));
    }
}
