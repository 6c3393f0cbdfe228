use crate::error::PlannerError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use study_planner_api_structs::dtos::PendingReminderDTO;
use study_planner_api_structs::get_pending_reminders::*;
use study_planner_domain::PendingReminder;
use study_planner_infra::PlannerContext;

pub async fn get_pending_reminders_controller(
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    execute(GetPendingRemindersUseCase {}, &ctx)
        .await
        .map(|reminders| {
            HttpResponse::Ok().json(APIResponse {
                reminders: reminders.into_iter().map(PendingReminderDTO::new).collect(),
            })
        })
        .map_err(|_| PlannerError::InternalError)
}

#[derive(Debug)]
pub struct GetPendingRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for GetPendingRemindersUseCase {
    type Response = Vec<PendingReminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetPendingReminders";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let mut reminders = ctx.repos.pending_reminders.find_all().await;
        reminders.sort_by_key(|r| r.fire_at);
        Ok(reminders)
    }
}
