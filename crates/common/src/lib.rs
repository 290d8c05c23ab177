// ================
// common/src/lib.rs
// ================
//! Wire types shared between the Suburbsight site frontend and the backend.
//! These are the JSON bodies of the public API endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/admin/login`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    /// Candidate admin password
    pub password: String,
}

/// Response of `GET /api/admin/session`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SessionStatus {
    /// Whether the request carried a valid admin session cookie
    pub authenticated: bool,
}

/// A lead submitted through the contact form.
///
/// # Fields
/// * `name` - Who to get back to
/// * `email` - Where to get back to them
/// * `phone` - Optional callback number
/// * `suburb` - Optional suburb the enquiry is about
/// * `message` - Free-text enquiry
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub suburb: Option<String>,
    pub message: String,
}

/// Response of a successful `POST /api/leads`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LeadReceipt {
    /// Always true on the success path
    pub accepted: bool,
    /// Submissions left in the caller's current rate-limit window
    pub remaining: u32,
}
