mod inmemory;
mod postgres;

pub use inmemory::InMemoryPendingReminderRepo;
pub use postgres::PostgresPendingReminderRepo;
use study_planner_domain::PendingReminder;

/// Durable record of reminders computed but not yet delivered.
///
/// At most one record exists per dedup key; `upsert` on an existing
/// key is last-writer-wins so a newer computation supersedes an older
/// one for the same logical reminder.
#[async_trait::async_trait]
pub trait IPendingReminderRepo: Send + Sync {
    async fn upsert(&self, reminder: &PendingReminder) -> anyhow::Result<()>;
    async fn find(&self, key: &str) -> Option<PendingReminder>;
    async fn find_all(&self) -> Vec<PendingReminder>;
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
    /// Deletes every record due at or before the given timestamp and
    /// returns them, so the caller can deliver exactly what was removed
    async fn delete_all_before(&self, before: i64) -> Vec<PendingReminder>;
}
