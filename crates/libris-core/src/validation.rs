//! # Validation Module
//!
//! Input validation for book and user registration.
//!
//! ## Validation Strategy
//! Validation runs before any mutation is attempted: a rejected payload
//! leaves every store untouched. The store layer calls these rules from its
//! `add`/`update` operations; the API layer never has to duplicate them.

use crate::error::ValidationError;
use crate::{MAX_COPIES, MAX_TEXT_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Text Validators
// =============================================================================

/// Validates a required text field (title, author, isbn, name).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_TEXT_LEN`] characters
///
/// ## Example
/// ```rust
/// use libris_core::validation::validate_text;
///
/// assert!(validate_text("title", "The Great Gatsby").is_ok());
/// assert!(validate_text("title", "   ").is_err());
/// ```
pub fn validate_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(())
}

/// Validates an email address, syntactically.
///
/// ## Rules
/// - Must not be empty
/// - Exactly one `@`, with non-empty local part
/// - Domain must contain a dot that is neither leading nor trailing
///
/// This is deliberately a shape check, not RFC 5322; deliverability is not a
/// concern of this layer.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(invalid("must contain exactly one '@'")),
    };

    if local.is_empty() {
        return Err(invalid("missing local part before '@'"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must contain an interior dot"));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a total copy count for a catalog entry.
///
/// ## Rules
/// - Must be at least 1 (a catalog entry without copies is meaningless)
/// - Must not exceed [`MAX_COPIES`]
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_COPIES {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_COPIES,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
