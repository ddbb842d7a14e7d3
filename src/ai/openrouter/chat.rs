use super::client::OpenRouterHttpClient;
use super::types::{ChatCompletionRequest, ChatMessage, ResponseFormat};
use crate::ai::ChatService;
use crate::config::GatewayConfig;
use crate::prompts::{ChatPrompt, STOP_SEQUENCES};
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

pub struct OpenRouterChatClient {
    http: OpenRouterHttpClient,
    model: String,
}

impl OpenRouterChatClient {
    pub fn new_with_client(api_key: String, config: &GatewayConfig, client: reqwest::Client) -> Self {
        Self {
            http: OpenRouterHttpClient::new_with_client(api_key, config, client),
            model: config.model.clone(),
        }
    }

    /// `None` when no API key is configured.
    pub fn from_config(config: &GatewayConfig, client: reqwest::Client) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self::new_with_client(api_key, config, client))
    }

    fn build_request(&self, prompt: &ChatPrompt) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(prompt.system.clone()),
                ChatMessage::user(prompt.user.clone()),
            ],
            temperature: prompt.temperature,
            max_tokens: prompt.max_tokens,
            response_format: ResponseFormat::json_object(),
            stop: STOP_SEQUENCES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[async_trait]
impl ChatService for OpenRouterChatClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<Value> {
        tracing::debug!(
            "Sending {} request to OpenRouter (model: {})",
            prompt.task.as_str(),
            self.model
        );
        let request = self.build_request(prompt);
        self.http.chat_completion(&request).await
    }
}
