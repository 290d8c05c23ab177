// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router assembly.
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::handlers::{admin, health, leads};
use crate::middleware::require_admin;
use crate::AppState;

/// Build the application router. The same shared state instance is handed to
/// every handler; nothing reaches into ambient globals.
pub fn create_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/api/admin/leads", get(admin::list_leads))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/admin/login", get(admin::login_page))
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/logout", post(admin::logout))
        .route("/api/admin/session", get(admin::session_status))
        .route("/api/leads", post(leads::submit_lead))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
