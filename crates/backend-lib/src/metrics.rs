// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const SESSION_ISSUED: &str = "auth.session.issued";
pub const LOGIN_REJECTED: &str = "auth.login.rejected";
pub const LEAD_ACCEPTED: &str = "lead.accepted";
pub const RATE_LIMIT_DENIED: &str = "rate_limit.denied";
pub const RATE_LIMIT_SWEPT: &str = "rate_limit.swept";
