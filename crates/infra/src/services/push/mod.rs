use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use study_planner_domain::{NotificationData, NotificationPayload};
use tracing::error;

/// Remote push service able to deliver a notification at a scheduled
/// time even when this process is no longer running
#[async_trait::async_trait]
pub trait IPushGateway: Send + Sync {
    async fn schedule_notification(
        &self,
        payload: &NotificationPayload,
        scheduled_at: i64,
    ) -> anyhow::Result<()>;
}

/// Bounded wait before the dispatcher demotes to the next channel
const PUSH_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const PUSH_API_KEY_HEADER: &str = "study-planner-push-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduledNotificationRequest<'a> {
    title: &'a str,
    body: &'a str,
    scheduled_at: i64,
    data: &'a NotificationData,
    tag: &'a str,
}

pub struct RestPushGateway {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl RestPushGateway {
    pub fn new(url: String, api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(PUSH_REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            url,
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl IPushGateway for RestPushGateway {
    async fn schedule_notification(
        &self,
        payload: &NotificationPayload,
        scheduled_at: i64,
    ) -> anyhow::Result<()> {
        let body = ScheduledNotificationRequest {
            title: &payload.title,
            body: &payload.body,
            scheduled_at,
            data: &payload.data,
            tag: &payload.tag,
        };

        let mut req = self
            .client
            .post(&format!("{}/notifications/schedule", self.url))
            .json(&body);
        if let Some(key) = &self.api_key {
            req = req.header(PUSH_API_KEY_HEADER, key);
        }

        let res = req.send().await.map_err(|e| {
            error!("[Network Error] Push gateway error. Error message: {:?}", e);
            anyhow::Error::new(e)
        })?;
        if !res.status().is_success() {
            anyhow::bail!("Push gateway returned status: {}", res.status());
        }
        Ok(())
    }
}
