// ============================
// crates/backend-lib/src/middleware/mod.rs
// ============================
//! Middleware for the Suburbsight backend.

pub mod require_admin;

pub use require_admin::{require_admin, LOGIN_PATH};
