use serde::{Deserialize, Serialize};

pub mod send_chat_message {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub message: String,
        #[serde(default)]
        pub session_id: Option<String>,
    }

    /// Replies are ordered: clients render them one bubble at a time
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub replies: Vec<String>,
    }

    impl APIResponse {
        pub fn new(replies: Vec<String>) -> Self {
            Self { replies }
        }
    }
}
