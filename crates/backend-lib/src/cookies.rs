// ============================
// crates/backend-lib/src/cookies.rs
// ============================
//! Admin session cookie handling.

use axum::http::{header, HeaderMap};

/// Cookie carrying the admin session token.
pub const ADMIN_SESSION_COOKIE: &str = "admin_session";

/// Cookie lifetime, matching the session TTL.
pub const ADMIN_SESSION_MAX_AGE_SECS: u64 = 86_400;

/// Build the `Set-Cookie` value for a freshly issued session token.
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{ADMIN_SESSION_COOKIE}={token}; HttpOnly; SameSite=Strict; \
         Max-Age={ADMIN_SESSION_MAX_AGE_SECS}; Path=/"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the `Set-Cookie` value that clears the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{ADMIN_SESSION_COOKIE}=; HttpOnly; SameSite=Strict; Max-Age=0; Path=/")
}

/// Extract the session token from the request's cookie headers, if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers.get_all(header::COOKIE).iter().find_map(|value| {
        let raw = value.to_str().ok()?;
        raw.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == ADMIN_SESSION_COOKIE).then(|| value.to_string())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn issue_cookie_flags() {
        let cookie = session_cookie("tok123", false);
        assert!(cookie.starts_with("admin_session=tok123;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(cookie.contains("Path=/"));
        assert!(!cookie.contains("Secure"));

        assert!(session_cookie("tok123", true).contains("; Secure"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie();
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.starts_with("admin_session=;"));
    }

    #[test]
    fn token_is_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; admin_session=tok123; lang=en"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("tok123"));
    }

    #[test]
    fn missing_cookie_yields_none() {
        assert!(session_token(&HeaderMap::new()).is_none());

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert!(session_token(&headers).is_none());
    }
}
