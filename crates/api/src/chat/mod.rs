pub mod send_chat_message;

use actix_web::web;
use send_chat_message::send_chat_message_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/chat/message",
        web::post().to(send_chat_message_controller),
    );
}
