//! Redirect-target helpers for the sign-in flow.

use axum::http::{header, HeaderMap};
use url::Url;

pub const FALLBACK_SITE_URL: &str = "http://localhost:3000";
pub const CALLBACK_PATH: &str = "/auth/callback";
pub const ERROR_PATH: &str = "/auth/error";

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Public origin of the site: `Origin` header, configured site URL,
/// forwarded/host headers, then localhost.
pub fn site_url(headers: &HeaderMap, configured: Option<&str>) -> String {
    if let Some(origin) = header_str(headers, header::ORIGIN.as_str()) {
        return origin.to_string();
    }
    if let Some(configured) = configured {
        return configured.to_string();
    }
    let protocol = header_str(headers, "x-forwarded-proto").unwrap_or("http");
    let host = header_str(headers, "x-forwarded-host")
        .or_else(|| header_str(headers, header::HOST.as_str()));
    match host {
        Some(host) => format!("{}://{}", protocol, host),
        None => FALLBACK_SITE_URL.to_string(),
    }
}

/// Path (with query) of the page the user signed in from.
///
/// Pages under `/auth` are never returned to.
pub fn return_path(headers: &HeaderMap) -> String {
    let Some(referer) = header_str(headers, header::REFERER.as_str()) else {
        return "/".to_string();
    };
    let Ok(url) = Url::parse(referer) else {
        return "/".to_string();
    };
    let path = match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    };
    if path.is_empty() || path.starts_with("/auth") {
        "/".to_string()
    } else {
        path
    }
}

/// Callback URL carrying the return path as `next`.
pub fn callback_url(site_url: &str, next: &str) -> crate::Result<String> {
    let mut url = Url::parse(site_url)?.join(CALLBACK_PATH)?;
    url.query_pairs_mut().append_pair("next", next);
    Ok(url.to_string())
}

/// Only same-site absolute paths are allowed as post-login targets.
///
/// The value is resolved the way a browser would resolve a `Location`
/// header, so backslashes and stripped control characters cannot smuggle in
/// another host. The result is percent-encoded path plus query.
pub fn sanitize_next(next: Option<&str>) -> String {
    let Some(next) = next.filter(|n| n.starts_with('/')) else {
        return "/".to_string();
    };
    let Ok(base) = Url::parse(FALLBACK_SITE_URL) else {
        return "/".to_string();
    };

    match base.join(next) {
        Ok(resolved) if resolved.origin() == base.origin() => match resolved.query() {
            Some(query) => format!("{}?{}", resolved.path(), query),
            None => resolved.path().to_string(),
        },
        _ => "/".to_string(),
    }
}
