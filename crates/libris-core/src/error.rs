//! # Error Types
//!
//! Domain-specific error types for libris-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  libris-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  API errors (apps/api)                                              │
//! │  └── ApiError         - What the frontend sees (serialized)         │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ids, counts)
//! 3. Errors are enum variants, never String
//! 4. Every failure leaves the stores exactly as before the call

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or internal-consistency
/// faults. They should be caught and translated to user-facing messages that
/// name the actual cause ("no copies available" vs. "book not found").
#[derive(Debug, Error)]
pub enum CoreError {
    /// Book cannot be found.
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// User cannot be found.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Loan cannot be found.
    #[error("Loan not found: {0}")]
    LoanNotFound(String),

    /// Borrow requested while every copy of the book is already on loan.
    ///
    /// ## When This Occurs
    /// - `available_quantity == 0` at the time of the borrow request
    /// - Two concurrent borrows raced for the last copy and this one lost
    ///
    /// This is a normal, expected business outcome, not a system fault.
    #[error("No copies of book {book_id} are available")]
    NoCopiesAvailable { book_id: String },

    /// Return requested for a loan that is already in its terminal state.
    ///
    /// A loan transitions BORROWED → RETURNED exactly once; there is no way
    /// back and no second return.
    #[error("Loan {loan_id} has already been returned")]
    AlreadyReturned { loan_id: String },

    /// Deletion blocked because outstanding loans still reference the entity.
    #[error("{entity} {id} still has {count} active loan(s)")]
    ActiveLoans {
        entity: &'static str,
        id: String,
        count: usize,
    },

    /// A quantity update would shrink the catalog entry below the number of
    /// copies currently out on loan.
    #[error(
        "Cannot set quantity of book {book_id} to {requested}: {on_loan} copies are on loan"
    )]
    QuantityBelowLoans {
        book_id: String,
        requested: i64,
        on_loan: i64,
    },

    /// An availability adjustment would leave `available_quantity` outside
    /// `[0, quantity]`.
    ///
    /// ## When This Occurs
    /// This signals prior data corruption, not a normal user error. It must
    /// be logged and surfaced, never silently clamped.
    #[error(
        "Availability of book {book_id} would become {attempted} (valid range 0..={quantity})"
    )]
    InvariantViolation {
        book_id: String,
        quantity: i64,
        attempted: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any mutation is attempted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email address).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
