use crate::error::PlannerError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use study_planner_api_structs::get_schedule::*;
use study_planner_domain::ScheduleSnapshot;
use study_planner_infra::PlannerContext;

pub async fn get_schedule_controller(
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    execute(GetScheduleUseCase {}, &ctx)
        .await
        .map(|snapshot| HttpResponse::Ok().json(APIResponse::new(snapshot)))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct GetScheduleUseCase {}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotSynced,
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotSynced => {
                Self::NotFound("No schedule has been synced to this device yet".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetScheduleUseCase {
    type Response = ScheduleSnapshot;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSchedule";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .schedule_snapshots
            .get()
            .await
            .ok_or(UseCaseError::NotSynced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unsynced_device_has_no_schedule() {
        let ctx = PlannerContext::create_inmemory();
        assert_eq!(
            execute(GetScheduleUseCase {}, &ctx).await,
            Err(UseCaseError::NotSynced)
        );
    }

    #[tokio::test]
    async fn returns_the_stored_snapshot() {
        let ctx = PlannerContext::create_inmemory();
        let snapshot = ScheduleSnapshot::new("alice".into(), Vec::new(), Vec::new(), 42);
        ctx.repos
            .schedule_snapshots
            .set(&snapshot)
            .await
            .expect("To store snapshot");

        let found = execute(GetScheduleUseCase {}, &ctx).await.expect("Snapshot");
        assert_eq!(found, snapshot);
    }
}
