use crate::error::PlannerError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use study_planner_api_structs::send_chat_message::*;
use study_planner_infra::{ChatBackendError, PlannerContext};

/// Messages longer than this are rejected before reaching any backend
const MAX_MESSAGE_LENGTH: usize = 4000;

pub async fn send_chat_message_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let body = body.0;
    let usecase = SendChatMessageUseCase {
        message: body.message,
        session_id: body.session_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|replies| HttpResponse::Ok().json(APIResponse::new(replies)))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct SendChatMessageUseCase {
    pub message: String,
    pub session_id: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyMessage,
    MessageTooLong(usize),
    BackendsUnavailable,
    RetryLater,
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyMessage => Self::BadClientData("The message is empty".into()),
            UseCaseError::MessageTooLong(len) => Self::BadClientData(format!(
                "The message is {} characters long, the maximum is {}",
                len, MAX_MESSAGE_LENGTH
            )),
            UseCaseError::BackendsUnavailable => {
                Self::ServiceUnavailable("No chat backend is able to answer right now".into())
            }
            UseCaseError::RetryLater => {
                Self::RetryLater("The chat backend is over its quota, try again later".into())
            }
        }
    }
}

/// The ordered replies for `/help`, answered locally without touching
/// any backend
fn help_replies() -> Vec<String> {
    [
        "📚 Available Slash Commands:",
        "• /add class [name] - Add a new class",
        "• /add task [name] - Add a new task",
        "• /list classes - View all your classes",
        "• /list tasks - View all your tasks",
        "• /delete class [name] - Delete a class",
        "• /delete task [name] - Delete a task",
        "You can also chat with me naturally! Just type your question or request.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendChatMessageUseCase {
    type Response = Vec<String>;

    type Error = UseCaseError;

    const NAME: &'static str = "SendChatMessage";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let message = self.message.trim();
        if message.is_empty() {
            return Err(UseCaseError::EmptyMessage);
        }
        if message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(UseCaseError::MessageTooLong(message.chars().count()));
        }

        if message.eq_ignore_ascii_case("/help") {
            return Ok(help_replies());
        }

        let session_id = self
            .session_id
            .clone()
            .or_else(|| ctx.config.user_id.clone())
            .unwrap_or_else(|| "guest".into());

        // Slash commands are structured schedule operations, routed
        // straight to the dialogue backend
        if message.starts_with('/') {
            let dialogue = ctx
                .services
                .dialogue
                .as_ref()
                .ok_or(UseCaseError::BackendsUnavailable)?;
            return match dialogue.reply(message, &session_id).await {
                Ok(reply) => Ok(vec![reply]),
                Err(_) => Err(UseCaseError::BackendsUnavailable),
            };
        }

        // Free text goes to the LLM first, falling back to the
        // dialogue backend when the LLM is unavailable
        if let Some(llm) = &ctx.services.llm_chat {
            match llm.generate(message).await {
                Ok(reply) => return Ok(vec![reply]),
                Err(ChatBackendError::RetryLater) => return Err(UseCaseError::RetryLater),
                Err(ChatBackendError::Unavailable) => (),
            }
        }
        let dialogue = ctx
            .services
            .dialogue
            .as_ref()
            .ok_or(UseCaseError::BackendsUnavailable)?;
        match dialogue.reply(message, &session_id).await {
            Ok(reply) => Ok(vec![reply]),
            Err(_) => Err(UseCaseError::BackendsUnavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use study_planner_infra::{IChatBackend, IDialogueBackend};

    struct StaticLlm {
        reply: Result<String, ChatBackendError>,
    }

    #[async_trait::async_trait]
    impl IChatBackend for StaticLlm {
        async fn generate(&self, _prompt: &str) -> Result<String, ChatBackendError> {
            self.reply.clone()
        }
    }

    struct EchoDialogue {}

    #[async_trait::async_trait]
    impl IDialogueBackend for EchoDialogue {
        async fn reply(
            &self,
            message: &str,
            _session_id: &str,
        ) -> Result<String, ChatBackendError> {
            Ok(format!("dialogue: {}", message))
        }
    }

    fn usecase(message: &str) -> SendChatMessageUseCase {
        SendChatMessageUseCase {
            message: message.into(),
            session_id: None,
        }
    }

    #[tokio::test]
    async fn help_is_answered_locally_in_order() {
        let ctx = PlannerContext::create_inmemory();
        let replies = execute(usecase("/help"), &ctx).await.expect("Replies");
        assert!(replies.len() > 2);
        assert_eq!(replies[0], "📚 Available Slash Commands:");
        assert!(replies[1].starts_with("• /add class"));
    }

    #[tokio::test]
    async fn rejects_empty_and_oversized_messages() {
        let ctx = PlannerContext::create_inmemory();
        assert_eq!(
            execute(usecase("   "), &ctx).await,
            Err(UseCaseError::EmptyMessage)
        );
        let oversized = "a".repeat(MAX_MESSAGE_LENGTH + 1);
        assert_eq!(
            execute(usecase(&oversized), &ctx).await,
            Err(UseCaseError::MessageTooLong(MAX_MESSAGE_LENGTH + 1))
        );
    }

    #[tokio::test]
    async fn slash_commands_go_to_the_dialogue_backend() {
        let mut ctx = PlannerContext::create_inmemory();
        ctx.services.dialogue = Some(Arc::new(EchoDialogue {}));

        let replies = execute(usecase("/list classes"), &ctx).await.expect("Replies");
        assert_eq!(replies, vec!["dialogue: /list classes".to_string()]);
    }

    #[tokio::test]
    async fn free_text_falls_back_to_dialogue_when_llm_is_down() {
        let mut ctx = PlannerContext::create_inmemory();
        ctx.services.llm_chat = Some(Arc::new(StaticLlm {
            reply: Err(ChatBackendError::Unavailable),
        }));
        ctx.services.dialogue = Some(Arc::new(EchoDialogue {}));

        let replies = execute(usecase("what is due tomorrow?"), &ctx)
            .await
            .expect("Replies");
        assert_eq!(replies, vec!["dialogue: what is due tomorrow?".to_string()]);
    }

    #[tokio::test]
    async fn quota_exhaustion_is_surfaced_as_retry_later() {
        let mut ctx = PlannerContext::create_inmemory();
        ctx.services.llm_chat = Some(Arc::new(StaticLlm {
            reply: Err(ChatBackendError::RetryLater),
        }));
        ctx.services.dialogue = Some(Arc::new(EchoDialogue {}));

        assert_eq!(
            execute(usecase("hello"), &ctx).await,
            Err(UseCaseError::RetryLater)
        );
    }

    #[tokio::test]
    async fn both_backends_down_is_an_error() {
        let ctx = PlannerContext::create_inmemory();
        assert_eq!(
            execute(usecase("hello"), &ctx).await,
            Err(UseCaseError::BackendsUnavailable)
        );
    }
}
