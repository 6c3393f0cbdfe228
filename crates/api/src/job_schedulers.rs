use crate::reminder::evaluate_reminders::EvaluateRemindersUseCase;
use crate::reminder::flush_due_reminders::FlushDueRemindersUseCase;
use crate::schedule::sync_schedule::SyncScheduleUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep_until, Instant};
use std::time::Duration;
use study_planner_infra::PlannerContext;
use tracing::info;

/// Evaluation period when the host wakes the process in the
/// background anyway
const EVALUATE_INTERVAL_RELAXED_SECS: u64 = 15 * 60;
/// Evaluation period when everything rides on this process polling
const EVALUATE_INTERVAL_SECS: u64 = 5 * 60;
const SYNC_INTERVAL_SECS: u64 = 5 * 60;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

fn evaluation_period(ctx: &PlannerContext) -> Duration {
    let secs = ctx.config.evaluate_interval_secs.unwrap_or({
        if ctx.capabilities.supports_background_wake {
            EVALUATE_INTERVAL_RELAXED_SECS
        } else {
            EVALUATE_INTERVAL_SECS
        }
    });
    Duration::from_secs(secs)
}

async fn run_reminder_pass(ctx: &PlannerContext) {
    let _ = execute(FlushDueRemindersUseCase {}, ctx).await;
    let _ = execute(EvaluateRemindersUseCase {}, ctx).await;
}

pub fn start_reminder_evaluation_job(ctx: PlannerContext) {
    let period = evaluation_period(&ctx);
    actix_web::rt::spawn(async move {
        // Recover reminders that came due while the process was down
        run_reminder_pass(&ctx).await;

        // Align the recurring passes to a minute boundary so fire
        // times are checked on round minutes
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        sleep_until(Instant::now() + Duration::from_secs(secs_to_next_run as u64)).await;

        let mut interval = interval(period);
        loop {
            interval.tick().await;
            run_reminder_pass(&ctx).await;
        }
    });
}

pub fn start_schedule_sync_job(ctx: PlannerContext) {
    if ctx.config.user_id.is_none() || ctx.services.schedule_source.is_none() {
        info!("No user or remote schedule store configured. Schedule sync job disabled.");
        return;
    }

    let period = Duration::from_secs(ctx.config.sync_interval_secs.unwrap_or(SYNC_INTERVAL_SECS));
    actix_web::rt::spawn(async move {
        let mut interval = interval(period);
        loop {
            interval.tick().await;
            let _ = execute(SyncScheduleUseCase {}, &ctx).await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }
}
