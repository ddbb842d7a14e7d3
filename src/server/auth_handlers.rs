//! # Authentication Route Handlers
//!
//! Google sign-in through the configured identity provider. Every failure
//! ends in a redirect to the error page; nothing here returns a JSON error.

use super::state::AppState;
use crate::auth::redirect::{callback_url, return_path, sanitize_next, site_url, ERROR_PATH};
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Redirect,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

pub const CODE_VERIFIER_COOKIE: &str = "nameme-code-verifier";
pub const ACCESS_TOKEN_COOKIE: &str = "nameme-access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "nameme-refresh-token";

fn http_only_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}

fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(removal_cookie(ACCESS_TOKEN_COOKIE))
        .remove(removal_cookie(REFRESH_TOKEN_COOKIE))
        .remove(removal_cookie(CODE_VERIFIER_COOKIE))
}

/// Starts the Google sign-in and sends the browser to the provider.
pub async fn sign_in_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    let Some(auth) = app_state.auth.as_ref() else {
        error!("Missing Supabase configuration for sign-in");
        return (jar, Redirect::to(ERROR_PATH));
    };

    let site = site_url(&headers, app_state.site_url.as_deref());
    let next = return_path(&headers);
    let redirect_to = match callback_url(&site, &next) {
        Ok(url) => url,
        Err(e) => {
            error!("Invalid site URL '{}' for sign-in: {}", site, e);
            return (jar, Redirect::to(ERROR_PATH));
        }
    };

    match auth.begin_sign_in(&redirect_to).await {
        Ok(start) => {
            info!("Starting Google sign-in, returning to {}", next);
            let jar = jar.add(http_only_cookie(CODE_VERIFIER_COOKIE, start.code_verifier));
            (jar, Redirect::to(&start.url))
        }
        Err(e) => {
            error!("Failed to start Google sign-in: {}", e);
            (jar, Redirect::to(ERROR_PATH))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
    pub next: Option<String>,
}

/// Completes the OAuth round trip and stores the session tokens.
pub async fn callback_handler(
    State(app_state): State<AppState>,
    Query(params): Query<CallbackParams>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    let next = sanitize_next(params.next.as_deref());

    if let Some(reason) = params.error_description.or(params.error) {
        error!("Auth callback error: {}", reason);
        return (jar, Redirect::temporary(ERROR_PATH));
    }

    let Some(code) = params.code else {
        return (jar, Redirect::temporary(&next));
    };

    let Some(auth) = app_state.auth.as_ref() else {
        error!("Missing Supabase configuration for auth callback");
        return (jar, Redirect::temporary(ERROR_PATH));
    };

    let verifier = jar
        .get(CODE_VERIFIER_COOKIE)
        .map(|c| c.value().to_string())
        .unwrap_or_default();

    match auth.exchange_code(&code, &verifier).await {
        Ok(session) => {
            let mut jar = jar
                .remove(removal_cookie(CODE_VERIFIER_COOKIE))
                .add(http_only_cookie(ACCESS_TOKEN_COOKIE, session.access_token));
            if let Some(refresh) = session.refresh_token {
                jar = jar.add(http_only_cookie(REFRESH_TOKEN_COOKIE, refresh));
            }
            info!("Sign-in completed, redirecting to {}", next);
            (jar, Redirect::temporary(&next))
        }
        Err(e) => {
            error!("Error exchanging auth code: {}", e);
            (jar, Redirect::temporary(ERROR_PATH))
        }
    }
}

/// Revokes the session with the provider (best effort) and clears cookies.
pub async fn sign_out_handler(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    let token = jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_string());

    match (app_state.auth.as_ref(), token) {
        (Some(auth), Some(token)) => {
            if let Err(e) = auth.sign_out(&token).await {
                error!("Failed to sign out: {}", e);
            }
        }
        (None, _) => error!("Missing Supabase configuration for sign-out"),
        (Some(_), None) => {}
    }

    (clear_session(jar), Redirect::to("/"))
}

/// The signed-in user, or `null`.
pub async fn current_user_handler(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> Json<Value> {
    let token = jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_string());

    let user = match (app_state.auth.as_ref(), token) {
        (Some(auth), Some(token)) => match auth.get_user(&token).await {
            Ok(user) => user,
            Err(e) => {
                error!("Failed to look up current user: {}", e);
                None
            }
        },
        _ => None,
    };

    Json(match user {
        Some(user) => {
            let label = user.label();
            json!({ "user": { "id": user.id, "email": user.email, "label": label } })
        }
        None => json!({ "user": null }),
    })
}

pub async fn auth_error_page() -> &'static str {
    "Authentication error\n\
     Google 登录出错，请重试或稍后再试。We could not complete the Google sign-in request."
}
