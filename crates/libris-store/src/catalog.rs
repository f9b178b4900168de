//! # Catalog Store
//!
//! Owns the book records and their quantity/availability counters.
//!
//! ## Key Operations
//! - Registration with validation (`add`)
//! - Update with quantity reconciliation (`update`)
//! - Availability bookkeeping (`adjust_availability`, crate-internal)
//!
//! The catalog owns identity and descriptive fields; `available_quantity` is
//! only ever written through [`Catalog::adjust_availability`] and the
//! quantity-diff path in [`Catalog::update`], both reachable solely from the
//! circulation desk.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use libris_core::validation::{validate_quantity, validate_text};
use libris_core::{Book, BookUpdate, CoreError, CoreResult, NewBook};

/// In-memory store for catalog entries, keyed by book id.
///
/// A `BTreeMap` keeps listing order deterministic, which makes snapshots
/// idempotent between mutations.
#[derive(Debug, Default)]
pub struct Catalog {
    books: BTreeMap<String, Book>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new book.
    ///
    /// Assigns a fresh UUID and sets `available_quantity = quantity`.
    ///
    /// ## Errors
    /// `ValidationError` if title, author or isbn is empty or
    /// `quantity < 1`. Nothing is stored on failure.
    pub(crate) fn add(&mut self, new: NewBook) -> CoreResult<Book> {
        validate_text("title", &new.title)?;
        validate_text("author", &new.author)?;
        validate_text("isbn", &new.isbn)?;
        validate_quantity(new.quantity)?;

        let now = Utc::now();
        let book = Book {
            id: Uuid::new_v4().to_string(),
            title: new.title.trim().to_string(),
            author: new.author.trim().to_string(),
            isbn: new.isbn.trim().to_string(),
            quantity: new.quantity,
            available_quantity: new.quantity,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %book.id, title = %book.title, quantity = book.quantity, "Adding book");

        self.books.insert(book.id.clone(), book.clone());
        Ok(book)
    }

    /// Updates descriptive fields and the total copy count.
    ///
    /// ## Quantity Reconciliation
    /// `available_quantity` moves by `new_quantity - old_quantity`, so copies
    /// currently on loan stay on loan. Shrinking below the on-loan count is
    /// rejected instead of clamped: clamping would silently break the
    /// loan-count invariant.
    pub(crate) fn update(&mut self, id: &str, update: BookUpdate) -> CoreResult<Book> {
        validate_text("title", &update.title)?;
        validate_text("author", &update.author)?;
        validate_text("isbn", &update.isbn)?;
        validate_quantity(update.quantity)?;

        let book = self
            .books
            .get_mut(id)
            .ok_or_else(|| CoreError::BookNotFound(id.to_string()))?;

        let on_loan = book.on_loan();
        if update.quantity < on_loan {
            return Err(CoreError::QuantityBelowLoans {
                book_id: id.to_string(),
                requested: update.quantity,
                on_loan,
            });
        }

        let delta = update.quantity - book.quantity;
        book.title = update.title.trim().to_string();
        book.author = update.author.trim().to_string();
        book.isbn = update.isbn.trim().to_string();
        book.quantity = update.quantity;
        book.available_quantity += delta;
        book.updated_at = Utc::now();

        debug!(id = %book.id, quantity = book.quantity, available = book.available_quantity, "Updated book");

        Ok(book.clone())
    }

    /// Removes a book record.
    ///
    /// The desk checks the loan ledger first; this method only knows about
    /// existence.
    pub(crate) fn remove(&mut self, id: &str) -> CoreResult<Book> {
        let book = self
            .books
            .remove(id)
            .ok_or_else(|| CoreError::BookNotFound(id.to_string()))?;

        debug!(id = %book.id, title = %book.title, "Removed book");
        Ok(book)
    }

    /// Moves `available_quantity` by `delta`.
    ///
    /// Internal-only: used exclusively by the circulation desk for borrow
    /// (-1) and return (+1).
    ///
    /// ## Errors
    /// `InvariantViolation` if the result would leave `[0, quantity]`; the
    /// counter is left untouched in that case.
    pub(crate) fn adjust_availability(&mut self, id: &str, delta: i64) -> CoreResult<Book> {
        let book = self
            .books
            .get_mut(id)
            .ok_or_else(|| CoreError::BookNotFound(id.to_string()))?;

        let attempted = book.available_quantity + delta;
        if attempted < 0 || attempted > book.quantity {
            return Err(CoreError::InvariantViolation {
                book_id: id.to_string(),
                quantity: book.quantity,
                attempted,
            });
        }

        book.available_quantity = attempted;
        book.updated_at = Utc::now();

        debug!(id = %book.id, delta, available = book.available_quantity, "Adjusted availability");

        Ok(book.clone())
    }

    /// Gets a book by id.
    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.get(id)
    }

    /// Lists all books in id order.
    pub fn list(&self) -> Vec<Book> {
        self.books.values().cloned().collect()
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
