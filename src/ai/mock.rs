use super::ChatService;
use crate::prompts::ChatPrompt;
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum MockReply {
    Response(Value),
    Upstream { status: u16, body: String },
}

/// In-memory [`ChatService`] that replays canned replies and records calls.
///
/// Clones share state, so a clone kept by a test can observe calls made
/// through the original.
#[derive(Clone)]
pub struct MockChatClient {
    replies: Arc<Mutex<Vec<MockReply>>>,
    prompts: Arc<Mutex<Vec<ChatPrompt>>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a raw chat-completion response body.
    pub fn with_response(self, response: Value) -> Self {
        self.replies.lock().unwrap().push(MockReply::Response(response));
        self
    }

    /// Queue a response whose first choice carries `content` as a string.
    pub fn with_content(self, content: &str) -> Self {
        self.with_response(json!({
            "choices": [{
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        }))
    }

    /// Queue an upstream failure with the given status and body.
    pub fn with_upstream_error(self, status: u16, body: &str) -> Self {
        self.replies.lock().unwrap().push(MockReply::Upstream {
            status,
            body: body.to_string(),
        });
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn recorded_prompts(&self) -> Vec<ChatPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<Value> {
        let count = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.clone());
            prompts.len()
        };

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Ok(json!({
                "choices": [{ "message": { "role": "assistant", "content": "{}" } }]
            }));
        }

        match &replies[(count - 1) % replies.len()] {
            MockReply::Response(value) => Ok(value.clone()),
            MockReply::Upstream { status, body } => Err(Error::Upstream {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NamingTask;

    fn prompt() -> ChatPrompt {
        ChatPrompt {
            task: NamingTask::Generate,
            system: String::new(),
            user: "姓氏: 李".to_string(),
            temperature: 0.6,
            max_tokens: 1500,
        }
    }

    #[tokio::test]
    async fn test_mock_cycles_through_replies() {
        let client = MockChatClient::new()
            .with_content("first")
            .with_upstream_error(500, "boom");

        let first = client.complete(&prompt()).await.unwrap();
        assert_eq!(first["choices"][0]["message"]["content"], "first");

        let err = client.complete(&prompt()).await.unwrap_err();
        assert!(matches!(err, Error::Upstream { status: 500, .. }));

        let again = client.complete(&prompt()).await.unwrap();
        assert_eq!(again["choices"][0]["message"]["content"], "first");
    }

    #[tokio::test]
    async fn test_mock_call_count_is_shared_between_clones() {
        let client = MockChatClient::new();
        let probe = client.clone();

        assert_eq!(probe.get_call_count(), 0);
        client.complete(&prompt()).await.unwrap();
        assert_eq!(probe.get_call_count(), 1);
        assert_eq!(probe.recorded_prompts()[0].user, "姓氏: 李");
    }
}
