use super::types::ChatCompletionRequest;
use crate::config::GatewayConfig;
use crate::{Error, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Thin REST client for OpenRouter's OpenAI-compatible API.
pub struct OpenRouterHttpClient {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    site_url: Option<String>,
    site_name: Option<String>,
}

impl OpenRouterHttpClient {
    pub fn new_with_client(api_key: String, config: &GatewayConfig, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            site_url: config.site_url.clone(),
            site_name: config.site_name.clone(),
        }
    }

    pub async fn post<Req: Serialize>(&self, path: &str, request: &Req) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request);
        if let Some(site_url) = &self.site_url {
            builder = builder.header("HTTP-Referer", site_url);
        }
        if let Some(site_name) = &self.site_name {
            builder = builder.header("X-Title", site_name);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Failed to send request to OpenRouter: {}", e);
            e
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenRouter API error (status {}): {}", status, error_text);
            return Err(Error::Upstream {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse OpenRouter response: {}\nBody: {}", e, body);
            Error::AiProvider(format!("Failed to parse OpenRouter response: {}", e))
        })
    }

    pub async fn chat_completion(&self, request: &ChatCompletionRequest) -> Result<Value> {
        self.post(CHAT_COMPLETIONS_PATH, request).await
    }
}
