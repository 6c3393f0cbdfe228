use super::evaluate_reminders::EvaluateRemindersUseCase;
use super::flush_due_reminders::FlushDueRemindersUseCase;
use crate::error::PlannerError;
use crate::shared::usecase::execute;
use actix_web::{web, HttpResponse};
use study_planner_api_structs::check_reminders::*;
use study_planner_infra::PlannerContext;

/// Manual trigger for the same flush and evaluation pass the interval
/// jobs run, used by clients when they regain foreground or focus
pub async fn check_reminders_controller(
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let delivered = execute(FlushDueRemindersUseCase {}, &ctx)
        .await
        .map_err(|_| PlannerError::InternalError)?;
    let scheduled = execute(EvaluateRemindersUseCase {}, &ctx)
        .await
        .map_err(|_| PlannerError::InternalError)?;

    Ok(HttpResponse::Ok().json(APIResponse {
        delivered,
        scheduled,
    }))
}
