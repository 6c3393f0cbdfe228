use crate::shared::usecase::UseCase;
use chrono::TimeZone;
use study_planner_domain::{class_reminders, task_reminder, PendingReminder, ReminderEvent};
use study_planner_infra::PlannerContext;
use tracing::error;

/// Recomputes upcoming reminders from the cached schedule snapshot and
/// hands the new ones to the dispatcher.
///
/// Evaluation is idempotent: a reminder already pending with the same
/// fire time is left untouched, so running this on every wake-up or
/// interval tick never duplicates notifications.
#[derive(Debug)]
pub struct EvaluateRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidClock,
}

#[async_trait::async_trait(?Send)]
impl UseCase for EvaluateRemindersUseCase {
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "EvaluateReminders";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let snapshot = match ctx.repos.schedule_snapshots.get().await {
            Some(snapshot) => snapshot,
            // Nothing synced yet, nothing to remind about
            None => return Ok(0),
        };

        let now = ctx.sys.get_timestamp_millis();
        let now_local = ctx
            .config
            .timezone
            .timestamp_millis_opt(now)
            .single()
            .ok_or(UseCaseError::InvalidClock)?;

        let mut events: Vec<ReminderEvent> = Vec::new();
        for class in &snapshot.classes {
            events.extend(class_reminders(class, &now_local));
        }
        for task in &snapshot.tasks {
            if let Some(event) = task_reminder(task, now) {
                events.push(event);
            }
        }

        let mut scheduled = 0;
        for event in events {
            let key = event.dedup_key();
            if let Some(existing) = ctx.repos.pending_reminders.find(&key).await {
                if existing.fire_at == event.fire_at {
                    continue;
                }
            }
            if let Err(e) = ctx
                .repos
                .pending_reminders
                .upsert(&PendingReminder::from_event(&event, now))
                .await
            {
                // One broken record must not starve the others
                error!("Unable to persist pending reminder {}: {:?}", key, e);
                continue;
            }
            ctx.dispatcher.clone().schedule(event).await;
            scheduled += 1;
        }

        Ok(scheduled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use chrono::Weekday;
    use chrono_tz::UTC;
    use std::sync::Arc;
    use study_planner_domain::{
        ClassRecord, ClassTime, PlatformCapabilities, ScheduleSnapshot, TaskRecord, ID,
    };
    use study_planner_infra::{Config, ISys, PlannerContext, Repos, Services};

    struct StaticSys {
        now: i64,
    }

    impl ISys for StaticSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.now
        }
    }

    // 2021-02-22 08:00 UTC, a Monday
    const MONDAY_8AM: i64 = 1613980800000;

    fn context_at(now: i64) -> PlannerContext {
        let mut config = Config::new();
        config.timezone = UTC;
        PlannerContext::new(
            Repos::create_inmemory(),
            Services::noop(),
            PlatformCapabilities::polling_only(),
            config,
            Arc::new(StaticSys { now }),
        )
    }

    async fn store_snapshot(ctx: &PlannerContext) {
        let snapshot = ScheduleSnapshot::new(
            "alice".into(),
            vec![ClassRecord {
                id: ID::new(),
                name: "Algebra".into(),
                days: vec![Weekday::Mon],
                start_time: ClassTime::new(9, 0),
            }],
            vec![TaskRecord {
                id: ID::new(),
                name: "Essay".into(),
                // Due 23 hours from now, so the fire time just passed
                due_ts: Some(MONDAY_8AM + 23 * 60 * 60 * 1000),
            }],
            MONDAY_8AM,
        );
        ctx.repos
            .schedule_snapshots
            .set(&snapshot)
            .await
            .expect("To store snapshot");
    }

    #[tokio::test]
    async fn no_snapshot_is_a_no_op() {
        let ctx = context_at(MONDAY_8AM);
        let scheduled = execute(EvaluateRemindersUseCase {}, &ctx).await.expect("Count");
        assert_eq!(scheduled, 0);
        assert!(ctx.repos.pending_reminders.find_all().await.is_empty());
    }

    #[tokio::test]
    async fn schedules_class_reminders_inside_the_horizon() {
        let ctx = context_at(MONDAY_8AM);
        store_snapshot(&ctx).await;

        let scheduled = execute(EvaluateRemindersUseCase {}, &ctx).await.expect("Count");
        // 30min and 5min class reminders, the task fire time is past
        assert_eq!(scheduled, 2);

        let pending = ctx.repos.pending_reminders.find_all().await;
        assert_eq!(pending.len(), 2);
        assert!(pending.iter().all(|r| r.fire_at > MONDAY_8AM));
    }

    #[tokio::test]
    async fn reevaluation_is_idempotent() {
        let ctx = context_at(MONDAY_8AM);
        store_snapshot(&ctx).await;

        let first = execute(EvaluateRemindersUseCase {}, &ctx).await.expect("Count");
        let second = execute(EvaluateRemindersUseCase {}, &ctx).await.expect("Count");
        assert_eq!(first, 2);
        assert_eq!(second, 0);
        assert_eq!(ctx.repos.pending_reminders.find_all().await.len(), 2);
    }
}
