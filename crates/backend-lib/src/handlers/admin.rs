// ============================
// crates/backend-lib/src/handlers/admin.rs
// ============================
//! Admin login, logout and protected admin views.
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
    Json,
};
use metrics::counter;
use std::sync::Arc;
use suburbsight_common::{LoginRequest, SessionStatus};
use tracing::info;

use crate::client_ip::derive_client_identifier;
use crate::cookies::{clear_session_cookie, session_cookie, session_token};
use crate::error::AppError;
use crate::metrics::LOGIN_REJECTED;
use crate::storage::StoredLead;
use crate::AppState;

/// `POST /api/admin/login`
///
/// Login attempts are throttled per client identifier before the password is
/// even looked at. On success the session token travels in an HTTP-only
/// cookie; on failure the body is a generic 401 that does not reveal which
/// check rejected the attempt.
pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let client_id = derive_client_identifier(&headers);

    let decision = state.login_limiter.check_and_consume(&client_id);
    if !decision.allowed {
        info!(client = %client_id, "throttled admin login attempt");
        return Err(AppError::RateLimited {
            remaining: decision.remaining,
            reset_at_millis: decision.reset_at_millis,
        });
    }

    if !state.authority.verify_password(&body.password) {
        counter!(LOGIN_REJECTED).increment(1);
        info!(client = %client_id, "rejected admin login");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.authority.issue_session();
    let cookie = session_cookie(&token, state.settings.cookie_secure);
    info!(client = %client_id, "admin session issued");

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(SessionStatus {
            authenticated: true,
        }),
    )
        .into_response())
}

/// `POST /api/admin/logout` — clears the session cookie. The token itself
/// cannot be revoked server-side; it simply stops being presented.
pub async fn logout() -> Response {
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(SessionStatus {
            authenticated: false,
        }),
    )
        .into_response()
}

/// `GET /api/admin/session` — lets the frontend probe login state without
/// triggering a redirect.
pub async fn session_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<SessionStatus> {
    let token = session_token(&headers);
    Json(SessionStatus {
        authenticated: state.authority.verify_session(token.as_deref()),
    })
}

/// `GET /admin` — minimal server-rendered dashboard shell. Sits behind the
/// `require_admin` middleware.
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let lead_count = state.storage.read_leads().await?.len();
    Ok(Html(format!(
        "<!doctype html><html><head><title>Suburbsight admin</title></head>\
         <body><h1>Suburbsight admin</h1><p>{lead_count} leads collected.</p>\
         <p><a href=\"/api/admin/leads\">Download leads</a></p></body></html>"
    )))
}

/// `GET /api/admin/leads` — the collected leads, oldest first. Sits behind
/// the `require_admin` middleware.
pub async fn list_leads(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoredLead>>, AppError> {
    Ok(Json(state.storage.read_leads().await?))
}

/// `GET /admin/login` — the page unauthenticated admin traffic is redirected
/// to. Static shell; the real page chrome is rendered by the site frontend.
pub async fn login_page() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>Suburbsight admin login</title></head>\
         <body><h1>Admin login</h1>\
         <form method=\"post\" action=\"/api/admin/login\">\
         <input type=\"password\" name=\"password\" autofocus>\
         <button type=\"submit\">Log in</button></form></body></html>",
    )
}
