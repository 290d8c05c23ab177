// ============================
// crates/backend-lib/src/auth/session.rs
// ============================
//! Stateless admin session handling.
//!
//! There is no session store and no per-user identity: "admin" is a single
//! role gated by one shared secret. A session is an opaque token that encodes
//! the role and its mint time; verification re-derives validity from the
//! token alone, so issued tokens survive a secret rotation until they expire.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use metrics::counter;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::metrics::SESSION_ISSUED;
use crate::unix_millis;

/// Session TTL (time to live)
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24); // 24 hours

/// The only role this backend issues or accepts.
const ADMIN_ROLE: &str = "admin";

/// Decoded contents of a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub role: String,
    pub issued_at_millis: u64,
}

/// Why a token failed to decode. Never crosses the component boundary:
/// `verify_session` maps every variant to a plain `false` so callers cannot
/// distinguish malformed from expired or wrong-role tokens.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token is not valid base64")]
    Encoding(#[from] base64::DecodeError),

    #[error("token is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("token has fewer than two fields")]
    MissingFields,

    #[error("token timestamp is not a number")]
    BadTimestamp,
}

/// Issues and verifies admin session tokens against the configured secret.
pub struct SessionAuthority {
    secret: Option<SecretString>,
}

impl SessionAuthority {
    /// Create an authority from the configured admin secret.
    ///
    /// An empty secret is treated as unconfigured: verification stays
    /// fail-closed rather than accepting a blank password.
    pub fn new(secret: Option<SecretString>) -> Self {
        let secret = secret.filter(|s| !s.expose_secret().is_empty());
        Self { secret }
    }

    /// Compare a candidate password to the configured secret.
    ///
    /// Returns `false` for every candidate when no secret is configured; the
    /// warning is for operators, end users only ever see a generic rejection.
    pub fn verify_password(&self, candidate: &str) -> bool {
        match &self.secret {
            Some(secret) => candidate == secret.expose_secret(),
            None => {
                warn!("admin password is not configured; rejecting all logins");
                false
            }
        }
    }

    /// Mint a session token for the admin role, stamped with the current time.
    pub fn issue_session(&self) -> String {
        counter!(SESSION_ISSUED).increment(1);
        encode_token(ADMIN_ROLE, unix_millis())
    }

    /// Check a token presented by a request.
    ///
    /// Fails on an absent token, a token that does not decode, a role other
    /// than admin, or a mint time more than [`SESSION_TTL`] in the past.
    pub fn verify_session(&self, token: Option<&str>) -> bool {
        verify_session_at(token, unix_millis())
    }
}

/// Token layout: `role:issued_at_millis:nonce`, base64 encoded. The nonce is
/// a random decimal fraction whose only job is to keep two tokens minted in
/// the same millisecond from being byte-identical; decoding ignores it.
fn encode_token(role: &str, issued_at_millis: u64) -> String {
    let nonce: f64 = rand::random();
    URL_SAFE_NO_PAD.encode(format!("{role}:{issued_at_millis}:{nonce}"))
}

/// Decode a token back into its claims.
pub fn decode_token(token: &str) -> Result<SessionClaims, TokenError> {
    let raw = String::from_utf8(URL_SAFE_NO_PAD.decode(token)?)?;
    let mut fields = raw.splitn(3, ':');
    let role = fields.next().ok_or(TokenError::MissingFields)?;
    let issued_at_millis = fields
        .next()
        .ok_or(TokenError::MissingFields)?
        .parse()
        .map_err(|_| TokenError::BadTimestamp)?;
    Ok(SessionClaims {
        role: role.to_string(),
        issued_at_millis,
    })
}

/// Verification against an explicit clock, split out so expiry is testable
/// without sleeping.
fn verify_session_at(token: Option<&str>, now_millis: u64) -> bool {
    let Some(token) = token else {
        return false;
    };
    let Ok(claims) = decode_token(token) else {
        return false;
    };
    claims.role == ADMIN_ROLE
        && now_millis.saturating_sub(claims.issued_at_millis) <= SESSION_TTL.as_millis() as u64
}
