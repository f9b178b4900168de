//! # Domain Types
//!
//! Core domain types used throughout Libris.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐    │
//! │  │      Book       │   │      User       │   │      Loan       │    │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │    │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │    │
//! │  │  title/author   │   │  name           │   │  book_id (FK)   │    │
//! │  │  isbn           │   │  email          │   │  user_id (FK)   │    │
//! │  │  quantity       │   │                 │   │  status         │    │
//! │  │  available_qty  │   │                 │   │  loan/return    │    │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘    │
//! │                                                                     │
//! │  LoanStatus: Borrowed ──return──► Returned (terminal)               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `0 <= available_quantity <= quantity` for every book, at all times
//! - The number of Borrowed loans referencing a book equals
//!   `quantity - available_quantity`
//!
//! Only the circulation controller in libris-store is allowed to write
//! `available_quantity` and `Loan::status`; these types carry the data but
//! never mutate it on their own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Book
// =============================================================================

/// A catalog entry: one title with a number of physical copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display title.
    pub title: String,

    /// Author name.
    pub author: String,

    /// ISBN - business identifier, kept as entered.
    pub isbn: String,

    /// Total owned copies (>= 1).
    pub quantity: i64,

    /// Copies not currently on loan (`0 <= available_quantity <= quantity`).
    pub available_quantity: i64,

    /// When the book was added to the catalog.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the record was last changed.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Number of copies currently out on loan.
    #[inline]
    pub fn on_loan(&self) -> i64 {
        self.quantity - self.available_quantity
    }

    /// Whether at least one copy can be borrowed right now.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.available_quantity > 0
    }
}

/// Payload for registering a new book.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub quantity: i64,
}

/// Payload for updating an existing book.
///
/// Quantity changes propagate to `available_quantity` by the same delta; the
/// store rejects updates that would shrink the entry below the number of
/// copies on loan.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdate {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub quantity: i64,
}

// =============================================================================
// User
// =============================================================================

/// A library member who can borrow books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Contact email address.
    pub email: String,

    /// When the user was registered.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Payload for registering a new user.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

// =============================================================================
// Loan Status
// =============================================================================

/// The lifecycle state of a loan.
///
/// State machine: `Borrowed --return--> Returned`. `Returned` is terminal;
/// no other transitions exist and loans are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    /// The copy is out with a user.
    Borrowed,
    /// The copy came back; terminal state.
    Returned,
}

// =============================================================================
// Loan
// =============================================================================

/// A single copy of a book out with (or returned by) a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The borrowed book.
    pub book_id: String,

    /// The borrowing user.
    pub user_id: String,

    /// Current lifecycle state.
    pub status: LoanStatus,

    /// When the loan was created.
    #[ts(as = "String")]
    pub loan_date: DateTime<Utc>,

    /// When the copy came back; set exactly once, on return.
    #[ts(as = "Option<String>")]
    pub return_date: Option<DateTime<Utc>>,
}

impl Loan {
    /// Whether this loan still holds a physical copy.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Borrowed
    }
}

// =============================================================================
// Library Snapshot
// =============================================================================

/// A full, mutually consistent view of all three stores.
///
/// This is the only read shape the presentation layer consumes: after every
/// mutation the caller re-fetches a snapshot instead of patching local state,
/// so it can never observe a loan without its availability adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySnapshot {
    pub books: Vec<Book>,
    pub users: Vec<User>,
    pub loans: Vec<Loan>,
}

// =============================================================================
// Unit Tests
// =============================================================================
