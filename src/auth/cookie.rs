//! Session cookie helpers shared by the auth handlers and the route gate.

use axum::http::{header, HeaderMap};

use super::jwt::SESSION_TTL;
use crate::config::CookieConfig;

/// `Set-Cookie` value carrying the session token: http-only, path `/`,
/// max-age equal to the token lifetime.
pub fn session_cookie(cfg: &CookieConfig, token: &str) -> String {
    let mut cookie = format!("{}={}", cfg.name, token);
    cookie.push_str("; HttpOnly");
    if cfg.secure {
        cookie.push_str("; Secure");
    }
    cookie.push_str("; SameSite=Lax; Path=/");
    cookie.push_str(&format!("; Max-Age={}", SESSION_TTL.whole_seconds()));
    cookie
}

/// Extract a cookie value from request headers.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn session_cookie_has_expected_attributes() {
        let cookie = session_cookie(&CookieConfig::default(), "abc.def.ghi");
        assert!(cookie.starts_with("token=abc.def.ghi"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn secure_flag_is_added_when_configured() {
        let cfg = CookieConfig {
            secure: true,
            ..CookieConfig::default()
        };
        assert!(session_cookie(&cfg, "t").contains("; Secure"));
    }

    #[test]
    fn extract_cookie_finds_named_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; token=abc123; other=xyz"),
        );

        assert_eq!(extract_cookie(&headers, "token"), Some("abc123".to_string()));
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn empty_cookie_value_counts_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("token="));
        assert_eq!(extract_cookie(&headers, "token"), None);
    }
}
