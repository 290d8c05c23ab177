// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod session;

pub use session::{decode_token, SessionAuthority, SessionClaims, TokenError, SESSION_TTL};
