// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Backend for the Suburbsight marketing and lead-generation site.
//!
//! The core is the access-control subsystem: a stateless admin session
//! authority and an in-memory fixed-window rate limiter, composed by the
//! HTTP handlers. Everything is process-local; there is no database.

pub mod auth;
pub mod client_ip;
pub mod config;
pub mod cookies;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod rate_limit;
pub mod router;
pub mod storage;
pub mod validation;

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::auth::SessionAuthority;
use crate::config::Settings;
use crate::rate_limit::RateLimiter;
use crate::storage::LeadStorage;

/// Application state shared across all handlers, always behind an [`Arc`].
pub struct AppState {
    /// Admin session authority
    pub authority: SessionAuthority,
    /// Budget for lead submissions
    pub rate_limiter: RateLimiter,
    /// Budget for login attempts
    pub login_limiter: RateLimiter,
    /// Lead storage backend
    pub storage: Arc<dyn LeadStorage>,
    /// Settings the server was started with
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state. The admin secret moves out of the
    /// settings and into the session authority; both limiter maps start
    /// empty and live for the process lifetime.
    pub fn new(mut settings: Settings, storage: Arc<dyn LeadStorage>) -> Self {
        let authority = SessionAuthority::new(settings.admin_password.take());
        let rate_limiter = RateLimiter::new(&settings.rate_limit);
        let login_limiter = RateLimiter::new(&settings.login_rate_limit);

        Self {
            authority,
            rate_limiter,
            login_limiter,
            storage,
            settings: Arc::new(settings),
        }
    }
}

/// Milliseconds since the Unix epoch.
pub(crate) fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
