use serde::{Deserialize, Serialize};
use study_planner_domain::{IntervalLabel, PendingReminder, ReminderKind, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PendingReminderDTO {
    pub key: String,
    pub kind: ReminderKind,
    pub source_id: ID,
    pub source_name: String,
    pub fire_at: i64,
    pub interval: IntervalLabel,
}

impl PendingReminderDTO {
    pub fn new(reminder: PendingReminder) -> Self {
        Self {
            key: reminder.key,
            kind: reminder.kind,
            source_id: reminder.source_id,
            source_name: reminder.source_name,
            fire_at: reminder.fire_at,
            interval: reminder.interval,
        }
    }
}
