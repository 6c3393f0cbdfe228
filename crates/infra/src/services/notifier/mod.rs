use reqwest::Client;
use study_planner_domain::NotificationPayload;
use tracing::{debug, error};

/// The local notification surface: wherever a reminder lands when it
/// fires while this process is alive
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn notify(&self, payload: &NotificationPayload) -> anyhow::Result<()>;
}

const WEBHOOK_KEY_HEADER: &str = "study-planner-webhook-key";

/// Posts fired reminders to a configured webhook so a companion client
/// can surface them
pub struct WebhookNotifier {
    client: Client,
    url: String,
    key: String,
}

impl WebhookNotifier {
    pub fn new(url: String, key: String) -> Self {
        Self {
            client: Client::new(),
            url,
            key,
        }
    }
}

#[async_trait::async_trait]
impl INotifier for WebhookNotifier {
    async fn notify(&self, payload: &NotificationPayload) -> anyhow::Result<()> {
        let res = self
            .client
            .post(&self.url)
            .header(WEBHOOK_KEY_HEADER, &self.key)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("Error delivering notification to webhook: {:?}", e);
                anyhow::Error::new(e)
            })?;
        if !res.status().is_success() {
            anyhow::bail!("Notification webhook returned status: {}", res.status());
        }
        Ok(())
    }
}

/// Used when no notification surface is configured or permission to
/// notify was denied: reminders are dropped silently
pub struct NullNotifier {}

#[async_trait::async_trait]
impl INotifier for NullNotifier {
    async fn notify(&self, payload: &NotificationPayload) -> anyhow::Result<()> {
        debug!("Notification surface disabled, dropping: {}", payload.tag);
        Ok(())
    }
}
