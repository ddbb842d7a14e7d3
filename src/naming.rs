//! Request orchestration for the two naming tasks.
//!
//! Both tasks run the same linear pipeline and differ only in validation
//! and prompt content:
//! validate, check configuration, build prompt, call gateway, extract text,
//! recover JSON.

use crate::ai::ChatService;
use crate::decode::{DecodeError, ResponseDecoder};
use crate::models::{ExplainRequest, GenerateRequest, NamingTask};
use crate::prompts::{self, ChatPrompt};
use crate::Error;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, Instrument};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum NamingError {
    #[error("missing required field: {0}")]
    Validation(&'static str),

    #[error("AI gateway credential is not configured")]
    MissingCredential,

    #[error("upstream returned status {status}")]
    Upstream { status: u16, body: String },

    #[error("request to the AI gateway failed: {0}")]
    Transport(String),

    #[error("model returned no usable content")]
    NoContent { choice: Value },

    #[error("model output could not be parsed as JSON")]
    Unparseable { raw: String },
}

impl From<Error> for NamingError {
    fn from(err: Error) -> Self {
        match err {
            Error::Upstream { status, body } => NamingError::Upstream { status, body },
            other => NamingError::Transport(other.to_string()),
        }
    }
}

impl From<DecodeError> for NamingError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::NoContent { choice } => NamingError::NoContent { choice },
            DecodeError::Unparseable { raw } => NamingError::Unparseable { raw },
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Runs naming requests against an optional gateway.
///
/// The gateway is `None` when no credential was configured; requests then
/// fail after validation without any network call.
#[derive(Clone)]
pub struct NameService {
    chat: Option<Arc<dyn ChatService>>,
    decoder: Arc<ResponseDecoder>,
}

impl NameService {
    pub fn new(chat: Option<Arc<dyn ChatService>>) -> Self {
        Self::with_decoder(chat, ResponseDecoder::default())
    }

    pub fn with_decoder(chat: Option<Arc<dyn ChatService>>, decoder: ResponseDecoder) -> Self {
        Self {
            chat,
            decoder: Arc::new(decoder),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.chat.is_some()
    }

    pub async fn generate(&self, request: &GenerateRequest) -> Result<Value, NamingError> {
        if is_blank(&request.surname) {
            return Err(NamingError::Validation("surname"));
        }
        if is_blank(&request.gender) {
            return Err(NamingError::Validation("gender"));
        }
        self.run(prompts::generate_prompt(request)).await
    }

    pub async fn explain(&self, request: &ExplainRequest) -> Result<Value, NamingError> {
        if is_blank(&request.name) {
            return Err(NamingError::Validation("name"));
        }
        self.run(prompts::explain_prompt(request)).await
    }

    async fn run(&self, prompt: ChatPrompt) -> Result<Value, NamingError> {
        let task = prompt.task;
        let span = tracing::info_span!("naming", task = task.as_str(), request_id = %Uuid::new_v4());

        async move {
            let chat = self.chat.as_ref().ok_or_else(|| {
                error!("OPENROUTER_API_KEY is not configured");
                NamingError::MissingCredential
            })?;

            let response = chat.complete(&prompt).await.map_err(|e| {
                error!("{} gateway call failed: {}", task.as_str(), e);
                NamingError::from(e)
            })?;

            let payload = self.decoder.decode(&response).map_err(|e| {
                log_decode_failure(task, &e);
                NamingError::from(e)
            })?;

            info!("{} request decoded successfully", task.as_str());
            Ok::<Value, NamingError>(payload)
        }
        .instrument(span)
        .await
    }
}

fn log_decode_failure(task: NamingTask, err: &DecodeError) {
    match err {
        DecodeError::NoContent { choice } => {
            let message = choice.get("message").unwrap_or(choice);
            error!(
                raw_choice = %choice,
                raw_message = %message,
                "{} missing content",
                task.as_str()
            );
        }
        DecodeError::Unparseable { raw } => {
            error!(raw_content = %raw, "{} parse failed", task.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockChatClient;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn service(mock: &MockChatClient) -> NameService {
        NameService::new(Some(Arc::new(mock.clone())))
    }

    fn generate_request() -> GenerateRequest {
        GenerateRequest {
            surname: Some("李".to_string()),
            gender: Some("female".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_generate_returns_payload_verbatim() {
        let payload = json!({
            "suggestions": [{"name": "李清和", "pinyin": "Lǐ Qīnghé", "meaning": "清澈和顺", "rationale": "音韵平顺"}],
            "analysis": {"phonetics": "p", "structure": "s", "culture": "c", "wuxing": "w"}
        });
        let mock = MockChatClient::new().with_content(&payload.to_string());

        let result = service(&mock).generate(&generate_request()).await.unwrap();

        assert_eq!(result, payload);
        assert_eq!(mock.get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_surname_skips_gateway() {
        let mock = MockChatClient::new();
        let request = GenerateRequest {
            surname: Some("   ".to_string()),
            ..generate_request()
        };

        let err = service(&mock).generate(&request).await.unwrap_err();

        assert!(matches!(err, NamingError::Validation("surname")));
        assert_eq!(mock.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_gender_is_validation_error() {
        let request = GenerateRequest {
            gender: None,
            ..generate_request()
        };
        let err = service(&MockChatClient::new()).generate(&request).await.unwrap_err();
        assert!(matches!(err, NamingError::Validation("gender")));
    }

    #[tokio::test]
    async fn test_unconfigured_gateway_fails_after_validation() {
        let service = NameService::new(None);
        assert!(!service.is_configured());

        let err = service.generate(&generate_request()).await.unwrap_err();
        assert!(matches!(err, NamingError::MissingCredential));

        let err = service.explain(&ExplainRequest::default()).await.unwrap_err();
        assert!(matches!(err, NamingError::Validation("name")));
    }

    #[tokio::test]
    async fn test_upstream_status_is_propagated() {
        let mock = MockChatClient::new().with_upstream_error(503, "overloaded");
        let request = ExplainRequest {
            name: Some("李白".to_string()),
            ..Default::default()
        };

        match service(&mock).explain(&request).await.unwrap_err() {
            NamingError::Upstream { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("expected Upstream, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_prose_reply_is_unparseable() {
        let mock = MockChatClient::new().with_content("这是一个好名字。");
        let request = ExplainRequest {
            name: Some("李白".to_string()),
            ..Default::default()
        };

        match service(&mock).explain(&request).await.unwrap_err() {
            NamingError::Unparseable { raw } => assert_eq!(raw, "这是一个好名字。"),
            other => panic!("expected Unparseable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reasoning_only_reply_recovers_payload() {
        let mock = MockChatClient::new().with_response(json!({
            "choices": [{"message": {"content": "", "reasoning": "思考… {\"name\":\"李白\"}"}}]
        }));
        let request = ExplainRequest {
            name: Some("李白".to_string()),
            ..Default::default()
        };

        let result = service(&mock).explain(&request).await.unwrap();
        assert_eq!(result, json!({"name": "李白"}));
    }

    #[tokio::test]
    async fn test_decoder_without_fallbacks_reports_no_content() {
        let mock = MockChatClient::new().with_response(json!({
            "choices": [{"message": {"content": "", "reasoning": "{\"name\":\"李白\"}"}}]
        }));
        let service =
            NameService::with_decoder(Some(Arc::new(mock.clone())), ResponseDecoder::new());
        let request = ExplainRequest {
            name: Some("李白".to_string()),
            ..Default::default()
        };

        let err = service.explain(&request).await.unwrap_err();
        assert!(matches!(err, NamingError::NoContent { .. }));
    }
}
