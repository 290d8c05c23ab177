// ============================
// crates/backend-lib/src/middleware/require_admin.rs
// ============================
//! Admin session gate for protected routes.
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::cookies::session_token;
use crate::error::AppError;
use crate::AppState;

/// Where browser traffic is sent when it has no valid session.
pub const LOGIN_PATH: &str = "/admin/login";

/// Reject requests without a valid admin session.
///
/// Browser-facing requests (those accepting HTML) are redirected to the login
/// page; everything else gets a bare 401. Protected content is never rendered
/// on the failure path.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let token = session_token(request.headers());
    if state.authority.verify_session(token.as_deref()) {
        return next.run(request).await;
    }

    if wants_html(request.headers()) {
        Redirect::to(LOGIN_PATH).into_response()
    } else {
        AppError::Unauthorized.into_response()
    }
}

fn wants_html(headers: &axum::http::HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|accept| accept.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}
