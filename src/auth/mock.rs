use super::{AuthUser, IdentityProvider, Session, SignInStart};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory [`IdentityProvider`] for tests and local harnesses.
#[derive(Clone)]
pub struct MockIdentityProvider {
    authorize_base: String,
    session: Option<Session>,
    exchanges: Arc<Mutex<Vec<(String, String)>>>,
    sign_outs: Arc<Mutex<Vec<String>>>,
}

pub const MOCK_CODE_VERIFIER: &str = "mock-verifier";

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self {
            authorize_base: "https://auth.test/authorize".to_string(),
            session: None,
            exchanges: Arc::new(Mutex::new(Vec::new())),
            sign_outs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Session handed out on code exchange; without one, exchanges fail.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn exchanges(&self) -> Vec<(String, String)> {
        self.exchanges.lock().unwrap().clone()
    }

    pub fn sign_outs(&self) -> Vec<String> {
        self.sign_outs.lock().unwrap().clone()
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn begin_sign_in(&self, redirect_to: &str) -> Result<SignInStart> {
        let mut url = url::Url::parse(&self.authorize_base)?;
        url.query_pairs_mut().append_pair("redirect_to", redirect_to);
        Ok(SignInStart {
            url: url.to_string(),
            code_verifier: MOCK_CODE_VERIFIER.to_string(),
        })
    }

    async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<Session> {
        self.exchanges
            .lock()
            .unwrap()
            .push((code.to_string(), code_verifier.to_string()));
        self.session
            .clone()
            .ok_or_else(|| Error::Auth("mock exchange rejected".to_string()))
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>> {
        Ok(self
            .session
            .as_ref()
            .filter(|s| s.access_token == access_token)
            .and_then(|s| s.user.clone()))
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        self.sign_outs.lock().unwrap().push(access_token.to_string());
        Ok(())
    }
}
