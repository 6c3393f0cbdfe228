use super::IPendingReminderRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use std::str::FromStr;
use study_planner_domain::{IntervalLabel, PendingReminder, ReminderKind};
use tracing::error;

pub struct PostgresPendingReminderRepo {
    pool: PgPool,
}

impl PostgresPendingReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PendingReminderRaw {
    dedup_key: String,
    kind: String,
    source_uid: Uuid,
    source_name: String,
    fire_at: i64,
    interval_label: String,
    computed_at: i64,
}

impl PendingReminderRaw {
    fn into_domain(self) -> Option<PendingReminder> {
        let kind = ReminderKind::from_str(&self.kind)
            .map_err(|e| error!("Corrupt pending reminder row: {}", e))
            .ok()?;
        let interval = IntervalLabel::from_str(&self.interval_label)
            .map_err(|e| error!("Corrupt pending reminder row: {}", e))
            .ok()?;
        Some(PendingReminder {
            key: self.dedup_key,
            kind,
            source_id: self.source_uid.into(),
            source_name: self.source_name,
            fire_at: self.fire_at,
            interval,
            computed_at: self.computed_at,
        })
    }
}

#[async_trait::async_trait]
impl IPendingReminderRepo for PostgresPendingReminderRepo {
    async fn upsert(&self, reminder: &PendingReminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO pending_reminders
            (dedup_key, kind, source_uid, source_name, fire_at, interval_label, computed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (dedup_key)
            DO UPDATE SET kind = $2, source_uid = $3, source_name = $4,
                          fire_at = $5, interval_label = $6, computed_at = $7
            "#,
        )
        .bind(&reminder.key)
        .bind(reminder.kind.as_str())
        .bind(reminder.source_id.inner_ref())
        .bind(&reminder.source_name)
        .bind(reminder.fire_at)
        .bind(reminder.interval.as_str())
        .bind(reminder.computed_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, key: &str) -> Option<PendingReminder> {
        sqlx::query_as::<_, PendingReminderRaw>(
            r#"
            SELECT * FROM pending_reminders
            WHERE dedup_key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Unable to read pending reminder: {:?}", e);
            e
        })
        .ok()
        .flatten()
        .and_then(|raw| raw.into_domain())
    }

    async fn find_all(&self) -> Vec<PendingReminder> {
        sqlx::query_as::<_, PendingReminderRaw>(
            r#"
            SELECT * FROM pending_reminders
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Unable to read pending reminders: {:?}", e);
            e
        })
        .unwrap_or_default()
        .into_iter()
        .filter_map(|raw| raw.into_domain())
        .collect()
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM pending_reminders
            WHERE dedup_key = $1
            "#,
        )
        .bind(key)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_all_before(&self, before: i64) -> Vec<PendingReminder> {
        sqlx::query_as::<_, PendingReminderRaw>(
            r#"
            DELETE FROM pending_reminders AS r
            WHERE r.fire_at <= $1
            RETURNING *
            "#,
        )
        .bind(before)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Unable to delete due pending reminders: {:?}", e);
            e
        })
        .unwrap_or_default()
        .into_iter()
        .filter_map(|raw| raw.into_domain())
        .collect()
    }
}
