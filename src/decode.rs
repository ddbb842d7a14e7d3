//! Tolerant decoding of chat-completion responses.
//!
//! Providers disagree on where the generated text lives: a plain string,
//! a list of typed parts, an object wrapping another `content`, or a
//! streaming-style `delta`. The decoder walks whatever arrives and then
//! recovers a JSON object from the text, even when the model wrapped it
//! in commentary.

use serde_json::Value;
use thiserror::Error;

/// The shapes a response node can take, as far as text extraction cares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseNode<'a> {
    Absent,
    Text(&'a str),
    /// An object with a string `text` field.
    TextField(&'a str),
    Sequence(&'a [Value]),
    /// An object whose `content` is a list of parts.
    ContentParts(&'a [Value]),
    /// An object whose `content` is a string.
    ContentText(&'a str),
    Opaque,
}

impl<'a> ResponseNode<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Null => ResponseNode::Absent,
            Value::String(s) => ResponseNode::Text(s),
            Value::Array(items) => ResponseNode::Sequence(items),
            Value::Object(map) => {
                if let Some(Value::String(text)) = map.get("text") {
                    return ResponseNode::TextField(text);
                }
                match map.get("content") {
                    Some(Value::Array(parts)) => ResponseNode::ContentParts(parts),
                    Some(Value::String(text)) => ResponseNode::ContentText(text),
                    _ => ResponseNode::Opaque,
                }
            }
            Value::Bool(_) | Value::Number(_) => ResponseNode::Opaque,
        }
    }
}

/// Flatten a node into text. Empty strings count as no content.
pub fn extract_text(value: &Value) -> Option<String> {
    match ResponseNode::classify(value) {
        ResponseNode::Absent | ResponseNode::Opaque => None,
        ResponseNode::Text(text) | ResponseNode::TextField(text) | ResponseNode::ContentText(text) => {
            non_empty(text)
        }
        ResponseNode::Sequence(items) | ResponseNode::ContentParts(items) => join_parts(items),
    }
}

fn join_parts(items: &[Value]) -> Option<String> {
    let parts: Vec<String> = items.iter().filter_map(extract_text).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Parse free-form text into JSON, tolerating commentary around an object.
///
/// Tries the whole string first, then the span from the first `{` to the
/// last `}`. A JSON `null` is treated the same as nothing found.
pub fn recover_json(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Some(value).filter(|v| !v.is_null());
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }

    serde_json::from_str::<Value>(&text[start..=end])
        .ok()
        .filter(|v| !v.is_null())
}

/// Last-resort extraction step run when the regular walk finds nothing.
pub trait ContentFallback: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, message: &Value) -> Option<String>;
}

/// Accepts a string `reasoning` field on the message.
///
/// Some models put their whole answer there when regular content is
/// suppressed by the stop sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReasoningFallback;

impl ContentFallback for ReasoningFallback {
    fn name(&self) -> &'static str {
        "reasoning"
    }

    fn extract(&self, message: &Value) -> Option<String> {
        message
            .get("reasoning")
            .and_then(Value::as_str)
            .and_then(non_empty)
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("model returned no usable content")]
    NoContent { choice: Value },

    #[error("model output is not valid JSON")]
    Unparseable { raw: String },
}

/// Shared decoding pipeline for every naming endpoint.
pub struct ResponseDecoder {
    fallbacks: Vec<Box<dyn ContentFallback>>,
}

impl Default for ResponseDecoder {
    fn default() -> Self {
        Self::new().with_fallback(ReasoningFallback)
    }
}

impl ResponseDecoder {
    /// A decoder with no fallback steps.
    pub fn new() -> Self {
        Self {
            fallbacks: Vec::new(),
        }
    }

    pub fn with_fallback<F: ContentFallback + 'static>(mut self, fallback: F) -> Self {
        self.fallbacks.push(Box::new(fallback));
        self
    }

    /// First choice of the response, and the message inside it (or the
    /// choice itself when it carries no `message`).
    pub fn select_message(response: &Value) -> (Value, Value) {
        let choice = response
            .get("choices")
            .and_then(|choices| choices.get(0))
            .cloned()
            .unwrap_or(Value::Null);
        let message = match choice.get("message") {
            Some(message) if !message.is_null() => message.clone(),
            _ => choice.clone(),
        };
        (choice, message)
    }

    /// Text of a message, trying the known wrapper locations in order.
    pub fn message_text(&self, message: &Value) -> Option<String> {
        if message.is_null() {
            return None;
        }

        let candidates = [
            Some(message),
            message.get("content"),
            message.get(0),
            message.get("message"),
            message.get("delta"),
        ];
        if let Some(text) = candidates.into_iter().flatten().find_map(extract_text) {
            return Some(text);
        }

        self.fallbacks.iter().find_map(|fallback| {
            let text = fallback.extract(message)?;
            tracing::debug!("Recovered content via {} fallback", fallback.name());
            Some(text)
        })
    }

    /// Full pipeline: pick the message, extract text, recover JSON.
    pub fn decode(&self, response: &Value) -> Result<Value, DecodeError> {
        let (choice, message) = Self::select_message(response);

        let Some(content) = self.message_text(&message) else {
            return Err(DecodeError::NoContent { choice });
        };

        recover_json(&content).ok_or(DecodeError::Unparseable { raw: content })
    }
}
