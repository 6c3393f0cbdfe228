mod inmemory;
mod postgres;

pub use inmemory::InMemoryScheduleSnapshotRepo;
pub use postgres::PostgresScheduleSnapshotRepo;
use study_planner_domain::ScheduleSnapshot;

/// Local durable store for the single schedule snapshot, overwritten
/// wholesale on every refresh
#[async_trait::async_trait]
pub trait IScheduleSnapshotRepo: Send + Sync {
    async fn set(&self, snapshot: &ScheduleSnapshot) -> anyhow::Result<()>;
    async fn get(&self) -> Option<ScheduleSnapshot>;
    async fn clear(&self) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use crate::PlannerContext;
    use study_planner_domain::ScheduleSnapshot;

    #[tokio::test]
    async fn overwrites_snapshot_wholesale() {
        let ctx = PlannerContext::create_inmemory();

        assert!(ctx.repos.schedule_snapshots.get().await.is_none());

        let first = ScheduleSnapshot::new("alice".into(), Vec::new(), Vec::new(), 100);
        ctx.repos
            .schedule_snapshots
            .set(&first)
            .await
            .expect("To store snapshot");
        assert_eq!(ctx.repos.schedule_snapshots.get().await, Some(first));

        let second = ScheduleSnapshot::new("bob".into(), Vec::new(), Vec::new(), 200);
        ctx.repos
            .schedule_snapshots
            .set(&second)
            .await
            .expect("To store snapshot");
        assert_eq!(ctx.repos.schedule_snapshots.get().await, Some(second));

        ctx.repos
            .schedule_snapshots
            .clear()
            .await
            .expect("To clear snapshot");
        assert!(ctx.repos.schedule_snapshots.get().await.is_none());
    }
}
