//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port so tests can drive it
//! over HTTP with `reqwest`.

#![allow(unused)]

use nameme::{
    ai::{ChatService, MockChatClient},
    auth::{AuthUser, IdentityProvider, MockIdentityProvider, Session},
    naming::NameService,
    server::{create_router, AppState},
};
use reqwest::{redirect::Policy, Client};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;

pub const TEST_SITE_URL: &str = "http://nameme.test";

pub struct TestApp {
    pub address: String,
    /// Does not follow redirects, so tests can inspect `Location`.
    pub client: Client,
}

impl TestApp {
    pub async fn spawn(app_state: AppState) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        let app = create_router(app_state);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder().redirect(Policy::none()).build().unwrap();
        Self { address, client }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

pub fn state_with(
    chat: Option<Arc<dyn ChatService>>,
    auth: Option<Arc<dyn IdentityProvider>>,
) -> AppState {
    AppState {
        naming: NameService::new(chat),
        auth,
        site_url: Some(TEST_SITE_URL.to_string()),
    }
}

pub fn mock_state(chat: &MockChatClient) -> AppState {
    state_with(Some(Arc::new(chat.clone())), None)
}

pub fn test_session() -> Session {
    Session {
        access_token: "access-123".to_string(),
        refresh_token: Some("refresh-456".to_string()),
        expires_in: Some(3600),
        user: Some(AuthUser {
            id: "user-1".to_string(),
            email: Some("li@example.com".to_string()),
            user_metadata: json!({ "full_name": "李白" }),
        }),
    }
}

/// Values of every `Set-Cookie` header on the response.
pub fn set_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

pub fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}
