mod pending_reminder;
mod schedule_snapshot;

pub use pending_reminder::IPendingReminderRepo;
pub(crate) use pending_reminder::InMemoryPendingReminderRepo;
use pending_reminder::PostgresPendingReminderRepo;
pub use schedule_snapshot::IScheduleSnapshotRepo;
use schedule_snapshot::{InMemoryScheduleSnapshotRepo, PostgresScheduleSnapshotRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub schedule_snapshots: Arc<dyn IScheduleSnapshotRepo>,
    pub pending_reminders: Arc<dyn IPendingReminderRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        sqlx::migrate!().run(&pool).await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            schedule_snapshots: Arc::new(PostgresScheduleSnapshotRepo::new(pool.clone())),
            pending_reminders: Arc::new(PostgresPendingReminderRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            schedule_snapshots: Arc::new(InMemoryScheduleSnapshotRepo::new()),
            pending_reminders: Arc::new(InMemoryPendingReminderRepo::new()),
        }
    }
}
