// ============================
// crates/backend-lib/src/client_ip.rs
// ============================
//! Client identifier derivation from proxy headers.

use axum::http::HeaderMap;

const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";
const FLY_CLIENT_IP: &str = "fly-client-ip";

/// Identifier used when no address header is present.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Derive a rate-limit bucketing key from the request's address headers.
///
/// Checks `x-forwarded-for` (first hop), then `x-real-ip`, then
/// `fly-client-ip`, falling back to `"unknown"`. All of these headers are
/// client-controllable, so this is a best-effort bucketing key, not an
/// identity proof: never use it for authentication.
pub fn derive_client_identifier(headers: &HeaderMap) -> String {
    first_hop(headers, FORWARDED_FOR)
        .or_else(|| first_hop(headers, REAL_IP))
        .or_else(|| first_hop(headers, FLY_CLIENT_IP))
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// First comma-separated value of a header, trimmed; `None` when the header
/// is absent, unreadable, or blank.
fn first_hop(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(name)?.to_str().ok()?;
    let first = raw.split(',').next()?.trim();
    (!first.is_empty()).then(|| first.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn forwarded_for_takes_the_first_hop() {
        let map = headers(&[("x-forwarded-for", "1.2.3.4, 5.6.7.8")]);
        assert_eq!(derive_client_identifier(&map), "1.2.3.4");
    }

    #[test]
    fn forwarded_for_is_trimmed() {
        let map = headers(&[("x-forwarded-for", "  1.2.3.4 , 5.6.7.8")]);
        assert_eq!(derive_client_identifier(&map), "1.2.3.4");
    }

    #[test]
    fn forwarded_for_wins_over_real_ip() {
        let map = headers(&[
            ("x-forwarded-for", "1.2.3.4"),
            ("x-real-ip", "9.9.9.9"),
        ]);
        assert_eq!(derive_client_identifier(&map), "1.2.3.4");
    }

    #[test]
    fn real_ip_wins_over_platform_header() {
        let map = headers(&[
            ("x-real-ip", "9.9.9.9"),
            ("fly-client-ip", "8.8.8.8"),
        ]);
        assert_eq!(derive_client_identifier(&map), "9.9.9.9");
    }

    #[test]
    fn platform_header_is_the_last_resort() {
        let map = headers(&[("fly-client-ip", "8.8.8.8, 7.7.7.7")]);
        assert_eq!(derive_client_identifier(&map), "8.8.8.8");
    }

    #[test]
    fn no_headers_means_unknown() {
        assert_eq!(derive_client_identifier(&HeaderMap::new()), UNKNOWN_CLIENT);
    }

    #[test]
    fn blank_header_falls_through() {
        let map = headers(&[
            ("x-forwarded-for", "   "),
            ("x-real-ip", "9.9.9.9"),
        ]);
        assert_eq!(derive_client_identifier(&map), "9.9.9.9");
    }
}
