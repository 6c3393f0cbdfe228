mod chat;
mod reminder;
mod schedule;
mod status;

pub mod dtos {
    pub use crate::reminder::dtos::*;
    pub use crate::schedule::dtos::*;
}

pub use crate::chat::api::*;
pub use crate::reminder::api::*;
pub use crate::schedule::api::*;
pub use crate::status::api::*;
