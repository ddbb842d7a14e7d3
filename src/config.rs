//! Runtime configuration
//!
//! Everything is read once at start-up and handed to the clients that need
//! it; nothing reads the environment at request time.

use crate::{Error, Result};

pub const DEFAULT_GATEWAY_BASE_URL: &str = "https://openrouter.ai/api";
pub const DEFAULT_GATEWAY_MODEL: &str = "deepseek/deepseek-v3.2-exp";
pub const DEFAULT_PORT: u16 = 3000;

/// Settings for the chat-completion gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Sent as `HTTP-Referer` when present.
    pub site_url: Option<String>,
    /// Sent as `X-Title` when present.
    pub site_name: Option<String>,
}

impl GatewayConfig {
    pub fn new(api_key: Option<String>, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            model: DEFAULT_GATEWAY_MODEL.to_string(),
            site_url: None,
            site_name: None,
        }
    }
}

/// Settings for the Supabase identity provider.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub supabase_url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gateway: GatewayConfig,
    /// `None` when either Supabase variable is missing; sign-in is then disabled.
    pub auth: Option<AuthConfig>,
    pub site_url: Option<String>,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let gateway = GatewayConfig {
            api_key: get("OPENROUTER_API_KEY"),
            base_url: get("OPENROUTER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GATEWAY_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: get("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_GATEWAY_MODEL.to_string()),
            site_url: get("OPENROUTER_SITE_URL"),
            site_name: get("OPENROUTER_SITE_NAME"),
        };

        let auth = match (get("SUPABASE_URL"), get("SUPABASE_ANON_KEY")) {
            (Some(supabase_url), Some(anon_key)) => Some(AuthConfig {
                supabase_url: supabase_url.trim_end_matches('/').to_string(),
                anon_key,
            }),
            _ => None,
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("PORT must be a port number, got '{}'", raw)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            gateway,
            auth,
            site_url: get("SITE_URL"),
            port,
        })
    }
}
