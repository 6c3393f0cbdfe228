use crate::dtos::PendingReminderDTO;
use serde::{Deserialize, Serialize};

pub mod check_reminders {
    use super::*;

    /// Summary of one flush + evaluation pass
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// Overdue reminders delivered by the recovery path
        pub delivered: usize,
        /// Reminders newly scheduled by this evaluation
        pub scheduled: usize,
    }
}

pub mod get_pending_reminders {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<PendingReminderDTO>,
    }
}
