use super::{AuthUser, IdentityProvider, Session, SignInStart};
use crate::config::AuthConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::RngCore;
use reqwest::{Client, StatusCode};
use sha2::{Digest, Sha256};
use url::Url;

const OAUTH_PROVIDER: &str = "google";

/// Supabase Auth (GoTrue) REST client using the PKCE flow.
pub struct SupabaseAuthClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseAuthClient {
    pub fn new_with_client(config: &AuthConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }

    async fn error_from(context: &str, response: reqwest::Response) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Supabase {} failed (status {}): {}", context, status, body);
        Error::Auth(format!("{} failed (status {}): {}", context, status, body))
    }
}

fn new_code_verifier() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn code_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

#[async_trait]
impl IdentityProvider for SupabaseAuthClient {
    async fn begin_sign_in(&self, redirect_to: &str) -> Result<SignInStart> {
        let code_verifier = new_code_verifier();
        let mut url = Url::parse(&self.endpoint("/authorize"))?;
        url.query_pairs_mut()
            .append_pair("provider", OAUTH_PROVIDER)
            .append_pair("redirect_to", redirect_to)
            .append_pair("code_challenge", &code_challenge(&code_verifier))
            .append_pair("code_challenge_method", "s256");

        Ok(SignInStart {
            url: url.to_string(),
            code_verifier,
        })
    }

    async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<Session> {
        let response = self
            .client
            .post(self.endpoint("/token?grant_type=pkce"))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({
                "auth_code": code,
                "code_verifier": code_verifier,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from("code exchange", response).await);
        }
        Ok(response.json().await?)
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>> {
        let response = self
            .client
            .get(self.endpoint("/user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            _ => Err(Self::error_from("user lookup", response).await),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint("/logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from("sign-out", response).await);
        }
        Ok(())
    }
}
