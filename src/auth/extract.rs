use axum::http::{header, HeaderMap};

pub const AUTHORIZATION_PREFIX: &str = "Bearer ";
pub const DEFAULT_COOKIE_NAME: &str = "auth-token";

/// Pull the bearer credential from the request.
///
/// The `Authorization: Bearer <token>` header wins; otherwise a non-empty
/// cookie named `cookie_name` is used.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(AUTHORIZATION_PREFIX));

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    find_cookie(headers, cookie_name)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Look up a cookie by name across every `Cookie` header on the request.
fn find_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
}
