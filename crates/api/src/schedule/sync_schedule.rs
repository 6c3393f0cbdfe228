use crate::error::PlannerError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use study_planner_api_structs::sync_schedule::*;
use study_planner_domain::ScheduleSnapshot;
use study_planner_infra::PlannerContext;

pub async fn sync_schedule_controller(
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    execute(SyncScheduleUseCase {}, &ctx)
        .await
        .map(|snapshot| HttpResponse::Ok().json(APIResponse::new(snapshot)))
        .map_err(PlannerError::from)
}

/// Refreshes the local snapshot from the remote schedule store,
/// replacing whatever was cached before
#[derive(Debug)]
pub struct SyncScheduleUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    NoUserConfigured,
    NoScheduleSource,
    FetchFailed,
    StorageError,
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NoUserConfigured => {
                Self::BadClientData("No user is configured for this device".into())
            }
            UseCaseError::NoScheduleSource => {
                Self::ServiceUnavailable("No remote schedule store is configured".into())
            }
            UseCaseError::FetchFailed => {
                Self::ServiceUnavailable("The remote schedule store could not be reached".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SyncScheduleUseCase {
    type Response = ScheduleSnapshot;

    type Error = UseCaseError;

    const NAME: &'static str = "SyncSchedule";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let user_id = ctx
            .config
            .user_id
            .clone()
            .ok_or(UseCaseError::NoUserConfigured)?;
        let source = ctx
            .services
            .schedule_source
            .as_ref()
            .ok_or(UseCaseError::NoScheduleSource)?;

        let (classes, tasks) = source
            .fetch(&user_id)
            .await
            .map_err(|_| UseCaseError::FetchFailed)?;

        let snapshot = ScheduleSnapshot::new(
            user_id,
            classes,
            tasks,
            ctx.sys.get_timestamp_millis(),
        );
        ctx.repos
            .schedule_snapshots
            .set(&snapshot)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use study_planner_domain::{ClassRecord, ClassTime, TaskRecord, ID};
    use study_planner_infra::IScheduleSource;

    struct StaticScheduleSource {
        classes: Vec<ClassRecord>,
        tasks: Vec<TaskRecord>,
    }

    #[async_trait::async_trait]
    impl IScheduleSource for StaticScheduleSource {
        async fn fetch(
            &self,
            _user_id: &str,
        ) -> anyhow::Result<(Vec<ClassRecord>, Vec<TaskRecord>)> {
            Ok((self.classes.clone(), self.tasks.clone()))
        }
    }

    #[tokio::test]
    async fn replaces_the_cached_snapshot() {
        let mut ctx = PlannerContext::create_inmemory();
        ctx.config.user_id = Some("alice".into());
        ctx.services.schedule_source = Some(Arc::new(StaticScheduleSource {
            classes: vec![ClassRecord {
                id: ID::new(),
                name: "Algebra".into(),
                days: vec![chrono::Weekday::Mon],
                start_time: ClassTime::new(9, 0),
            }],
            tasks: vec![TaskRecord {
                id: ID::new(),
                name: "Essay".into(),
                due_ts: Some(1_000),
            }],
        }));

        let stale = ScheduleSnapshot::new("alice".into(), Vec::new(), Vec::new(), 0);
        ctx.repos
            .schedule_snapshots
            .set(&stale)
            .await
            .expect("To store snapshot");

        let synced = execute(SyncScheduleUseCase {}, &ctx).await.expect("Snapshot");
        assert_eq!(synced.classes.len(), 1);
        assert_eq!(synced.tasks.len(), 1);
        assert_eq!(ctx.repos.schedule_snapshots.get().await, Some(synced));
    }

    #[tokio::test]
    async fn missing_user_is_a_client_error() {
        let mut ctx = PlannerContext::create_inmemory();
        ctx.config.user_id = None;
        assert!(matches!(
            execute(SyncScheduleUseCase {}, &ctx).await,
            Err(UseCaseError::NoUserConfigured)
        ));
    }

    #[tokio::test]
    async fn missing_source_is_reported_unavailable() {
        let mut ctx = PlannerContext::create_inmemory();
        ctx.config.user_id = Some("alice".into());
        assert!(matches!(
            execute(SyncScheduleUseCase {}, &ctx).await,
            Err(UseCaseError::NoScheduleSource)
        ));
    }
}
