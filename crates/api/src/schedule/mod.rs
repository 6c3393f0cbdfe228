pub mod get_schedule;
pub mod sync_schedule;

use actix_web::web;
use get_schedule::get_schedule_controller;
use sync_schedule::sync_schedule_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/schedule", web::get().to(get_schedule_controller));
    cfg.route("/schedule/sync", web::post().to(sync_schedule_controller));
}
