//! # Application State
//!
//! The shared state handed to every handler. It is built once at start-up
//! and never mutated afterwards.

use crate::ai::{ChatService, OpenRouterChatClient};
use crate::auth::{IdentityProvider, SupabaseAuthClient};
use crate::config::Config;
use crate::naming::NameService;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub naming: NameService,
    /// `None` when Supabase is not configured.
    pub auth: Option<Arc<dyn IdentityProvider>>,
    /// Configured public origin, used when the request carries no `Origin`.
    pub site_url: Option<String>,
}

/// Builds the shared application state from the configuration.
///
/// One HTTP connection pool is shared by the gateway and auth clients.
pub fn build_app_state(config: &Config) -> AppState {
    let http_client = reqwest::Client::new();

    let chat = OpenRouterChatClient::from_config(&config.gateway, http_client.clone()).map(|c| {
        info!("Chat gateway: {} (model: {})", config.gateway.base_url, config.gateway.model);
        Arc::new(c) as Arc<dyn ChatService>
    });
    if chat.is_none() {
        warn!("OPENROUTER_API_KEY is not set; naming requests will fail");
    }

    let auth = config.auth.as_ref().map(|auth| {
        info!("Identity provider: {}", auth.supabase_url);
        Arc::new(SupabaseAuthClient::new_with_client(auth, http_client.clone()))
            as Arc<dyn IdentityProvider>
    });
    if auth.is_none() {
        warn!("Supabase is not configured; sign-in is disabled");
    }

    AppState {
        naming: NameService::new(chat),
        auth,
        site_url: config.site_url.clone(),
    }
}
