mod capabilities;
mod notification;
mod reminder;
mod schedule;
mod shared;

pub use capabilities::PlatformCapabilities;
pub use notification::{NotificationAction, NotificationData, NotificationPayload};
pub use reminder::{
    class_reminders, task_reminder, IntervalLabel, PendingReminder, ReminderEvent, ReminderKind,
    LOOK_AHEAD_HORIZON_MILLIS,
};
pub use schedule::{ClassRecord, ClassTime, ScheduleSnapshot, TaskRecord, SCHEDULE_SNAPSHOT_KEY};
pub use shared::entity::ID;
