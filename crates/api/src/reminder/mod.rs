mod check_reminders;
pub mod evaluate_reminders;
pub mod flush_due_reminders;
mod get_pending_reminders;

use actix_web::web;
use check_reminders::check_reminders_controller;
use get_pending_reminders::get_pending_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders/check", web::post().to(check_reminders_controller));
    cfg.route(
        "/reminders/pending",
        web::get().to(get_pending_reminders_controller),
    );
}
