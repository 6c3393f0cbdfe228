use super::IScheduleSnapshotRepo;
use sqlx::{types::Json, FromRow, PgPool};
use study_planner_domain::{ScheduleSnapshot, SCHEDULE_SNAPSHOT_KEY};
use tracing::error;

pub struct PostgresScheduleSnapshotRepo {
    pool: PgPool,
}

impl PostgresScheduleSnapshotRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ScheduleSnapshotRaw {
    snapshot: Json<ScheduleSnapshot>,
}

impl From<ScheduleSnapshotRaw> for ScheduleSnapshot {
    fn from(raw: ScheduleSnapshotRaw) -> Self {
        raw.snapshot.0
    }
}

#[async_trait::async_trait]
impl IScheduleSnapshotRepo for PostgresScheduleSnapshotRepo {
    async fn set(&self, snapshot: &ScheduleSnapshot) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO schedule_snapshots (id, user_id, snapshot, last_updated)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id)
            DO UPDATE SET user_id = $2, snapshot = $3, last_updated = $4
            "#,
        )
        .bind(SCHEDULE_SNAPSHOT_KEY)
        .bind(&snapshot.user_id)
        .bind(Json(snapshot))
        .bind(snapshot.last_updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self) -> Option<ScheduleSnapshot> {
        sqlx::query_as::<_, ScheduleSnapshotRaw>(
            r#"
            SELECT snapshot FROM schedule_snapshots
            WHERE id = $1
            "#,
        )
        .bind(SCHEDULE_SNAPSHOT_KEY)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Unable to read schedule snapshot: {:?}", e);
            e
        })
        .ok()
        .flatten()
        .map(|raw| raw.into())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM schedule_snapshots
            WHERE id = $1
            "#,
        )
        .bind(SCHEDULE_SNAPSHOT_KEY)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
