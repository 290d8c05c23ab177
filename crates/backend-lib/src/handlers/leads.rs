// ============================
// crates/backend-lib/src/handlers/leads.rs
// ============================
//! Rate-limited lead submission.
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use metrics::counter;
use std::sync::Arc;
use suburbsight_common::{LeadReceipt, LeadSubmission};
use tracing::info;

use crate::client_ip::derive_client_identifier;
use crate::error::AppError;
use crate::metrics::LEAD_ACCEPTED;
use crate::storage::StoredLead;
use crate::validation::validate_lead;
use crate::AppState;

/// `POST /api/leads`
///
/// The submission consumes rate-limit budget before anything else, so a
/// client hammering the form with garbage exhausts its window just the same.
pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(submission): Json<LeadSubmission>,
) -> Result<(StatusCode, Json<LeadReceipt>), AppError> {
    let client_id = derive_client_identifier(&headers);

    let decision = state.rate_limiter.check_and_consume(&client_id);
    if !decision.allowed {
        info!(
            client = %client_id,
            reset_at_millis = decision.reset_at_millis,
            "throttled lead submission"
        );
        return Err(AppError::RateLimited {
            remaining: decision.remaining,
            reset_at_millis: decision.reset_at_millis,
        });
    }

    validate_lead(&submission)?;

    let lead = StoredLead {
        submission,
        client_id: client_id.clone(),
        received_at: Utc::now(),
    };
    state.storage.append_lead(&lead).await?;

    counter!(LEAD_ACCEPTED).increment(1);
    info!(client = %client_id, "lead accepted");

    Ok((
        StatusCode::CREATED,
        Json(LeadReceipt {
            accepted: true,
            remaining: decision.remaining,
        }),
    ))
}
