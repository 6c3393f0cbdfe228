use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{error, warn};

/// How a chat backend call failed, deciding the caller's recovery:
/// `Unavailable` falls back to the alternate backend, `RetryLater` is
/// surfaced to the user as a try-again message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatBackendError {
    Unavailable,
    RetryLater,
}

#[async_trait::async_trait]
pub trait IChatBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ChatBackendError>;
}

#[async_trait::async_trait]
pub trait IDialogueBackend: Send + Sync {
    async fn reply(&self, message: &str, session_id: &str) -> Result<String, ChatBackendError>;
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const RETRY_ATTEMPTS: u32 = 3;
const RETRY_BASE_DELAY_MILLIS: u64 = 500;

#[derive(Debug, Serialize)]
struct LlmRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct LlmResponse {
    #[serde(default)]
    reply: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Hosted LLM endpoint for free-form conversation
pub struct LlmChatApi {
    client: Client,
    url: String,
    /// Quota exhaustion is terminal for the session: once seen, every
    /// further call short-circuits instead of burning slow requests
    quota_exhausted: AtomicBool,
}

impl LlmChatApi {
    pub fn new(url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            url,
            quota_exhausted: AtomicBool::new(false),
        }
    }
}

#[async_trait::async_trait]
impl IChatBackend for LlmChatApi {
    async fn generate(&self, prompt: &str) -> Result<String, ChatBackendError> {
        if self.quota_exhausted.load(Ordering::Relaxed) {
            return Err(ChatBackendError::RetryLater);
        }

        for attempt in 0..RETRY_ATTEMPTS {
            let res = match self
                .client
                .post(&self.url)
                .json(&LlmRequest { prompt })
                .send()
                .await
            {
                Ok(res) => res,
                Err(e) => {
                    error!("[Network Error] LLM chat API error. Error message: {:?}", e);
                    return Err(ChatBackendError::Unavailable);
                }
            };

            if res.status() == StatusCode::TOO_MANY_REQUESTS {
                // Transient rate limit: exponential backoff and retry
                warn!("LLM chat API rate limited, attempt: {}", attempt + 1);
                tokio::time::sleep(Duration::from_millis(
                    RETRY_BASE_DELAY_MILLIS * 2u64.pow(attempt),
                ))
                .await;
                continue;
            }

            if !res.status().is_success() {
                error!("LLM chat API returned status: {}", res.status());
                return Err(ChatBackendError::Unavailable);
            }

            let body = res.json::<LlmResponse>().await.map_err(|e| {
                error!(
                    "[Unexpected Response] LLM chat API error. Error message: {:?}",
                    e
                );
                ChatBackendError::Unavailable
            })?;

            if let Some(error) = body.error {
                if error.to_lowercase().contains("quota") {
                    warn!("LLM chat API quota exhausted, disabling for this session");
                    self.quota_exhausted.store(true, Ordering::Relaxed);
                    return Err(ChatBackendError::RetryLater);
                }
                error!("LLM chat API returned error: {}", error);
                return Err(ChatBackendError::Unavailable);
            }

            return match body.reply {
                Some(reply) if !reply.is_empty() => Ok(reply),
                _ => Err(ChatBackendError::Unavailable),
            };
        }

        Err(ChatBackendError::RetryLater)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DialogueRequest<'a> {
    message: &'a str,
    session_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct DialogueResponse {
    #[serde(default)]
    reply: Option<String>,
}

/// Dialogue-management endpoint handling the structured slash
/// commands (add/list/delete of classes and tasks)
pub struct DialogueApi {
    client: Client,
    url: String,
}

impl DialogueApi {
    pub fn new(url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, url }
    }
}

#[async_trait::async_trait]
impl IDialogueBackend for DialogueApi {
    async fn reply(&self, message: &str, session_id: &str) -> Result<String, ChatBackendError> {
        let res = self
            .client
            .post(&self.url)
            .json(&DialogueRequest { message, session_id })
            .send()
            .await
            .map_err(|e| {
                error!(
                    "[Network Error] Dialogue API error. Error message: {:?}",
                    e
                );
                ChatBackendError::Unavailable
            })?;

        if !res.status().is_success() {
            error!("Dialogue API returned status: {}", res.status());
            return Err(ChatBackendError::Unavailable);
        }

        let body = res.json::<DialogueResponse>().await.map_err(|e| {
            error!(
                "[Unexpected Response] Dialogue API error. Error message: {:?}",
                e
            );
            ChatBackendError::Unavailable
        })?;

        match body.reply {
            Some(reply) if !reply.is_empty() => Ok(reply),
            _ => Err(ChatBackendError::Unavailable),
        }
    }
}
