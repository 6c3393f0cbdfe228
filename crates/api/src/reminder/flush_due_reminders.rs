use crate::shared::usecase::UseCase;
use study_planner_infra::PlannerContext;

/// Delivers every pending reminder whose fire time has passed.
///
/// This is the recovery path for reminders whose in-process timers
/// were lost to a restart or suspension: it runs once at startup and
/// at the head of every evaluation tick.
#[derive(Debug)]
pub struct FlushDueRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for FlushDueRemindersUseCase {
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "FlushDueReminders";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let due = ctx.repos.pending_reminders.delete_all_before(now).await;
        let delivered = due.len();
        for reminder in due {
            ctx.dispatcher.fire_now(&reminder.to_event()).await;
        }
        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use std::sync::Arc;
    use study_planner_domain::{
        IntervalLabel, PendingReminder, PlatformCapabilities, ReminderKind, ID,
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

    fn pending(key: &str, fire_at: i64) -> PendingReminder {
        PendingReminder {
            key: key.into(),
            kind: ReminderKind::Class,
            source_id: ID::new(),
            source_name: "Algebra".into(),
            fire_at,
            interval: IntervalLabel::FiveMin,
            computed_at: 0,
        }
    }

    #[tokio::test]
    async fn delivers_overdue_reminders_exactly_once() {
        let ctx = PlannerContext::new(
            Repos::create_inmemory(),
            Services::noop(),
            PlatformCapabilities::polling_only(),
            Config::new(),
            Arc::new(StaticSys { now: 1_000 }),
        );
        ctx.repos
            .pending_reminders
            .upsert(&pending("class-1-5min", 500))
            .await
            .expect("To upsert");
        ctx.repos
            .pending_reminders
            .upsert(&pending("class-1-30min", 2_000))
            .await
            .expect("To upsert");

        let delivered = execute(FlushDueRemindersUseCase {}, &ctx).await.expect("Count");
        assert_eq!(delivered, 1);

        // A second flush finds nothing left to deliver
        let delivered = execute(FlushDueRemindersUseCase {}, &ctx).await.expect("Count");
        assert_eq!(delivered, 0);

        let remaining = ctx.repos.pending_reminders.find_all().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].key, "class-1-30min");
    }
}
