mod capabilities;
mod chat;
mod notifier;
mod push;
mod schedule_source;

pub use capabilities::{EnvCapabilityDetector, ICapabilityDetector};
pub use chat::{
    ChatBackendError, DialogueApi, IChatBackend, IDialogueBackend, LlmChatApi,
};
pub use notifier::{INotifier, NullNotifier, WebhookNotifier};
pub use push::{IPushGateway, RestPushGateway};
pub use schedule_source::{IScheduleSource, RestScheduleSource};

use crate::config::Config;
use std::sync::Arc;

/// External collaborators resolved once at startup. Optional services
/// are typed absences: a `None` here means the capability is simply
/// not configured for this deployment.
#[derive(Clone)]
pub struct Services {
    pub schedule_source: Option<Arc<dyn IScheduleSource>>,
    pub llm_chat: Option<Arc<dyn IChatBackend>>,
    pub dialogue: Option<Arc<dyn IDialogueBackend>>,
    pub push: Option<Arc<dyn IPushGateway>>,
    pub notifier: Arc<dyn INotifier>,
}

impl Services {
    pub fn from_config(config: &Config) -> Self {
        let schedule_source = config
            .schedule_api_url
            .as_ref()
            .map(|url| Arc::new(RestScheduleSource::new(url.clone())) as Arc<dyn IScheduleSource>);
        let llm_chat = config
            .llm_api_url
            .as_ref()
            .map(|url| Arc::new(LlmChatApi::new(url.clone())) as Arc<dyn IChatBackend>);
        let dialogue = config
            .dialogue_api_url
            .as_ref()
            .map(|url| Arc::new(DialogueApi::new(url.clone())) as Arc<dyn IDialogueBackend>);
        let push = config.push_api_url.as_ref().map(|url| {
            Arc::new(RestPushGateway::new(url.clone(), config.push_api_key.clone()))
                as Arc<dyn IPushGateway>
        });
        let notifier: Arc<dyn INotifier> = match &config.notify_webhook_url {
            Some(url) => Arc::new(WebhookNotifier::new(
                url.clone(),
                config.notify_webhook_key.clone(),
            )),
            None => Arc::new(NullNotifier {}),
        };

        Self {
            schedule_source,
            llm_chat,
            dialogue,
            push,
            notifier,
        }
    }

    /// No external collaborators at all, used by tests and degraded
    /// deployments
    pub fn noop() -> Self {
        Self {
            schedule_source: None,
            llm_chat: None,
            dialogue: None,
            push: None,
            notifier: Arc::new(NullNotifier {}),
        }
    }
}
