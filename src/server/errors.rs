use crate::models::{Locale, NamingTask};
use crate::naming::NamingError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Errors surfaced by the naming endpoints.
#[derive(Debug)]
pub enum AppError {
    /// The body was not JSON or had the wrong field types.
    InvalidBody {
        task: NamingTask,
        details: String,
    },
    Naming {
        task: NamingTask,
        locale: Locale,
        source: NamingError,
    },
}

impl AppError {
    pub fn naming(task: NamingTask, locale: Locale, source: NamingError) -> Self {
        AppError::Naming {
            task,
            locale,
            source,
        }
    }
}

fn validation_message(task: NamingTask, locale: Locale) -> &'static str {
    match (task, locale) {
        (NamingTask::Generate, Locale::Zh) => "姓氏与性别为必填项",
        (NamingTask::Generate, Locale::En) => "Surname and gender are required.",
        (NamingTask::Explain, Locale::Zh) => "请输入中文名",
        (NamingTask::Explain, Locale::En) => "Please enter a Chinese name.",
    }
}

fn upstream_message(task: NamingTask, locale: Locale) -> &'static str {
    match (task, locale) {
        (NamingTask::Generate, Locale::Zh) => "生成失败",
        (NamingTask::Generate, Locale::En) => "Name generation failed.",
        (NamingTask::Explain, Locale::Zh) => "解读失败",
        (NamingTask::Explain, Locale::En) => "Name explanation failed.",
    }
}

/// User-facing message for a failed naming request.
pub fn error_message(task: NamingTask, locale: Locale, err: &NamingError) -> &'static str {
    match (err, locale) {
        (NamingError::Validation(_), _) => validation_message(task, locale),
        (NamingError::MissingCredential, Locale::Zh) => "缺少 OPENROUTER_API_KEY",
        (NamingError::MissingCredential, Locale::En) => "Missing OPENROUTER_API_KEY.",
        (NamingError::Upstream { .. }, _) => upstream_message(task, locale),
        (NamingError::Transport(_), Locale::Zh) => "请求模型失败",
        (NamingError::Transport(_), Locale::En) => "Request to the model failed.",
        (NamingError::NoContent { .. }, Locale::Zh) => "未获取到模型输出",
        (NamingError::NoContent { .. }, Locale::En) => "The model returned no output.",
        (NamingError::Unparseable { .. }, Locale::Zh) => "解析模型输出失败",
        (NamingError::Unparseable { .. }, Locale::En) => "Failed to parse the model output.",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InvalidBody { task, details } => {
                error!("{} rejected malformed body: {}", task.as_str(), details);
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": validation_message(task, Locale::En),
                        "details": details,
                    }),
                )
            }
            AppError::Naming {
                task,
                locale,
                source,
            } => {
                error!("{} request failed: {}", task.as_str(), source);
                let message = error_message(task, locale, &source);
                match source {
                    NamingError::Validation(_) => {
                        (StatusCode::BAD_REQUEST, json!({ "error": message }))
                    }
                    NamingError::MissingCredential => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": message }),
                    ),
                    NamingError::Upstream { status, body } => (
                        StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                        json!({ "error": message, "details": body }),
                    ),
                    NamingError::Transport(details) => (
                        StatusCode::BAD_GATEWAY,
                        json!({ "error": message, "details": details }),
                    ),
                    NamingError::NoContent { choice } => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": message, "debug": { "choice": choice } }),
                    ),
                    NamingError::Unparseable { raw } => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": message, "raw": raw }),
                    ),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_follow_locale_and_task() {
        let err = NamingError::Validation("surname");
        assert_eq!(
            error_message(NamingTask::Generate, Locale::Zh, &err),
            "姓氏与性别为必填项"
        );
        assert_eq!(
            error_message(NamingTask::Explain, Locale::En, &NamingError::Validation("name")),
            "Please enter a Chinese name."
        );
    }

    #[test]
    fn test_upstream_status_becomes_response_status() {
        let response = AppError::naming(
            NamingTask::Generate,
            Locale::En,
            NamingError::Upstream {
                status: 429,
                body: "slow down".to_string(),
            },
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_transport_failure_is_bad_gateway() {
        let response = AppError::naming(
            NamingTask::Explain,
            Locale::Zh,
            NamingError::Transport("connection refused".to_string()),
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
