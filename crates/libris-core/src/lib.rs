//! # libris-core: Pure Domain Logic for Libris
//!
//! This crate is the **heart** of the Libris library-management system. It
//! contains the domain model and its rules as pure data and pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Libris Architecture                          │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                   Frontend (React)                            │ │
//! │  │    Books tab ──► Users tab ──► Loans tab                      │ │
//! │  └───────────────────────────┬───────────────────────────────────┘ │
//! │                              │ HTTP/JSON                           │
//! │  ┌───────────────────────────▼───────────────────────────────────┐ │
//! │  │                   apps/api (axum)                             │ │
//! │  │    GET /books, POST /loans, ...                               │ │
//! │  └───────────────────────────┬───────────────────────────────────┘ │
//! │                              │                                     │
//! │  ┌───────────────────────────▼───────────────────────────────────┐ │
//! │  │                   libris-store                                │ │
//! │  │    Catalog • Membership • LoanLedger • CirculationDesk        │ │
//! │  └───────────────────────────┬───────────────────────────────────┘ │
//! │                              │                                     │
//! │  ┌───────────────────────────▼───────────────────────────────────┐ │
//! │  │              ★ libris-core (THIS CRATE) ★                     │ │
//! │  │                                                               │ │
//! │  │   ┌───────────┐      ┌───────────┐      ┌───────────┐         │ │
//! │  │   │   types   │      │   error   │      │ validation│         │ │
//! │  │   │ Book User │      │ CoreError │      │   rules   │         │ │
//! │  │   │   Loan    │      │Validation │      │  checks   │         │ │
//! │  │   └───────────┘      └───────────┘      └───────────┘         │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Book, User, Loan, LibrarySnapshot)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use libris_core::Book` instead of
// `use libris_core::types::Book`

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length accepted for book titles and author names.
pub const MAX_TEXT_LEN: usize = 200;

/// Maximum number of physical copies a single catalog entry may hold.
///
/// ## Business Reason
/// Prevents accidental over-registration (e.g., typing 5000 instead of 5).
pub const MAX_COPIES: i64 = 1000;
