// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Lead submission validation.

use regex::Regex;
use std::sync::LazyLock;
use suburbsight_common::LeadSubmission;
use thiserror::Error;

// Common validation constants
const MAX_NAME_LENGTH: usize = 100;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit
const MAX_PHONE_LENGTH: usize = 30;
const MAX_SUBURB_LENGTH: usize = 100;
const MAX_MESSAGE_LENGTH: usize = 2000;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ()\-]{6,}$").unwrap());

/// Possible validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("Invalid suburb: {0}")]
    InvalidSuburb(String),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a whole lead submission
pub fn validate_lead(lead: &LeadSubmission) -> ValidationResult<()> {
    validate_name(&lead.name)?;
    validate_email(&lead.email)?;
    if let Some(phone) = &lead.phone {
        validate_phone(phone)?;
    }
    if let Some(suburb) = &lead.suburb {
        validate_suburb(suburb)?;
    }
    validate_message(&lead.message)?;
    Ok(())
}

/// Validate a contact name
pub fn validate_name(name: &str) -> ValidationResult<&str> {
    if name.trim().is_empty() {
        return Err(ValidationError::InvalidName(
            "Name must not be empty".to_string(),
        ));
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::InvalidName(format!(
            "Name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }

    Ok(name)
}

/// Validate an email address
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    if email.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "Email address cannot be empty".to_string(),
        ));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail(format!(
            "Email address cannot exceed {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail(
            "Invalid email address format".to_string(),
        ));
    }

    Ok(email)
}

/// Validate an optional callback number
pub fn validate_phone(phone: &str) -> ValidationResult<&str> {
    if phone.len() > MAX_PHONE_LENGTH {
        return Err(ValidationError::InvalidPhone(format!(
            "Phone number cannot exceed {MAX_PHONE_LENGTH} characters"
        )));
    }

    if !PHONE_REGEX.is_match(phone) {
        return Err(ValidationError::InvalidPhone(
            "Phone number contains invalid characters".to_string(),
        ));
    }

    Ok(phone)
}

/// Validate a suburb name
pub fn validate_suburb(suburb: &str) -> ValidationResult<&str> {
    if suburb.trim().is_empty() {
        return Err(ValidationError::InvalidSuburb(
            "Suburb must not be empty when present".to_string(),
        ));
    }

    if suburb.len() > MAX_SUBURB_LENGTH {
        return Err(ValidationError::InvalidSuburb(format!(
            "Suburb cannot exceed {MAX_SUBURB_LENGTH} characters"
        )));
    }

    Ok(suburb)
}

/// Validate the enquiry text
pub fn validate_message(message: &str) -> ValidationResult<&str> {
    if message.trim().is_empty() {
        return Err(ValidationError::InvalidMessage(
            "Message must not be empty".to_string(),
        ));
    }

    if message.len() > MAX_MESSAGE_LENGTH {
        return Err(ValidationError::InvalidMessage(format!(
            "Message cannot exceed {MAX_MESSAGE_LENGTH} characters"
        )));
    }

    Ok(message)
}
