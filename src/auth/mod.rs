//! Identity-provider bridge for Google sign-in.
//!
//! The service never handles credentials itself: it asks the provider for
//! an authorization URL, trades the callback code for a session, and asks
//! the provider to revoke it on sign-out.

pub mod mock;
pub mod redirect;
pub mod supabase;

pub use mock::MockIdentityProvider;
pub use supabase::SupabaseAuthClient;

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where to send the browser, plus the PKCE verifier to keep until the
/// callback.
#[derive(Debug, Clone, PartialEq)]
pub struct SignInStart {
    pub url: String,
    pub code_verifier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Value,
}

impl AuthUser {
    /// Display label: full name, then name, then email, then "User".
    pub fn label(&self) -> String {
        ["full_name", "name"]
            .iter()
            .find_map(|key| {
                self.user_metadata
                    .get(*key)
                    .and_then(Value::as_str)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
            })
            .or_else(|| self.email.clone().filter(|e| !e.is_empty()))
            .unwrap_or_else(|| "User".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Start an OAuth sign-in that returns to `redirect_to`.
    async fn begin_sign_in(&self, redirect_to: &str) -> Result<SignInStart>;

    /// Exchange the callback code for a session.
    async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<Session>;

    /// Look up the user behind an access token. `None` if the token is no
    /// longer valid.
    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>>;

    async fn sign_out(&self, access_token: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label_prefers_full_name() {
        let user = AuthUser {
            id: "u1".to_string(),
            email: Some("li@example.com".to_string()),
            user_metadata: json!({"full_name": "李白", "name": "Li"}),
        };
        assert_eq!(user.label(), "李白");
    }

    #[test]
    fn test_label_falls_back_to_email_then_user() {
        let mut user = AuthUser {
            id: "u1".to_string(),
            email: Some("li@example.com".to_string()),
            user_metadata: json!({}),
        };
        assert_eq!(user.label(), "li@example.com");

        user.email = None;
        assert_eq!(user.label(), "User");
    }
}
