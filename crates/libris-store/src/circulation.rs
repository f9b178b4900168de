//! # Circulation Desk
//!
//! The inventory-consistency controller: the only component allowed to
//! couple the catalog and the loan ledger.
//!
//! ## Borrow / Return Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  borrow(book_id, user_id)                                           │
//! │                                                                     │
//! │  book exists? ──no──► BookNotFound                                  │
//! │       │                                                             │
//! │  user exists? ──no──► UserNotFound                                  │
//! │       │                                                             │
//! │  available > 0? ──no──► NoCopiesAvailable                           │
//! │       │                                                             │
//! │  available -= 1  ┐                                                  │
//! │  ledger.create() ┘ one unit under &mut self                         │
//! │                                                                     │
//! │  return_loan(loan_id)                                               │
//! │                                                                     │
//! │  ledger BORROWED──►RETURNED (LoanNotFound / AlreadyReturned)        │
//! │       │                                                             │
//! │  available += 1 ──overflow──► reopen loan, log, InvariantViolation  │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every method takes `&mut self`, so once the facade hands a request to the
//! desk nothing can interleave: availability and loan status always move
//! together or not at all. A failed step compensates the earlier one
//! (apply-then-compensate) before the error propagates.

use tracing::{error, info};

use libris_core::{
    Book, BookUpdate, CoreError, CoreResult, LibrarySnapshot, Loan, NewBook, NewUser, User,
};

use crate::catalog::Catalog;
use crate::ledger::LoanLedger;
use crate::membership::Membership;

/// Owns the three stores and every cross-store mutation.
#[derive(Debug, Default)]
pub struct CirculationDesk {
    catalog: Catalog,
    membership: Membership,
    ledger: LoanLedger,
}

impl CirculationDesk {
    /// Creates a desk over empty stores.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Loan Operations (the core)
    // =========================================================================

    /// Lends one copy of `book_id` to `user_id`.
    ///
    /// ## Errors
    /// - `BookNotFound` / `UserNotFound` for dangling ids
    /// - `NoCopiesAvailable` when `available_quantity == 0` - a normal
    ///   business outcome, all state unchanged
    pub fn borrow(&mut self, book_id: &str, user_id: &str) -> CoreResult<Loan> {
        let book = self
            .catalog
            .get(book_id)
            .ok_or_else(|| CoreError::BookNotFound(book_id.to_string()))?;

        if self.membership.get(user_id).is_none() {
            return Err(CoreError::UserNotFound(user_id.to_string()));
        }

        if !book.is_available() {
            return Err(CoreError::NoCopiesAvailable {
                book_id: book_id.to_string(),
            });
        }

        // The availability check above makes this decrement infallible, and
        // ledger creation cannot fail, so the pair commits as one unit.
        self.catalog.adjust_availability(book_id, -1)?;
        let loan = self.ledger.create(book_id, user_id);

        info!(loan_id = %loan.id, book_id, user_id, "Book borrowed");

        Ok(loan)
    }

    /// Takes a copy back: flips the loan to `RETURNED` and frees one copy.
    ///
    /// ## Errors
    /// - `LoanNotFound` for an unknown id
    /// - `AlreadyReturned` for a second return, all state unchanged
    /// - `InvariantViolation` if the increment would exceed `quantity` -
    ///   prior data corruption; the loan flip is rolled back and the fault
    ///   logged, never clamped
    pub fn return_loan(&mut self, loan_id: &str) -> CoreResult<Loan> {
        let loan = self.ledger.mark_returned(loan_id)?;

        if let Err(err) = self.catalog.adjust_availability(&loan.book_id, 1) {
            // Compensate the status flip so both stores read as before the call.
            self.ledger.reopen(loan_id);
            error!(loan_id, book_id = %loan.book_id, %err, "Return rolled back: availability out of range");
            return Err(err);
        }

        info!(loan_id, book_id = %loan.book_id, "Book returned");

        Ok(loan)
    }

    // =========================================================================
    // Catalog Operations
    // =========================================================================

    /// Registers a new book.
    pub fn add_book(&mut self, new: NewBook) -> CoreResult<Book> {
        let book = self.catalog.add(new)?;
        info!(book_id = %book.id, title = %book.title, "Book added");
        Ok(book)
    }

    /// Updates a book, reconciling availability with the new copy count.
    pub fn update_book(&mut self, id: &str, update: BookUpdate) -> CoreResult<Book> {
        let book = self.catalog.update(id, update)?;
        info!(book_id = %book.id, "Book updated");
        Ok(book)
    }

    /// Deletes a book.
    ///
    /// ## Errors
    /// `ActiveLoans` while any `BORROWED` loan references the book: history
    /// stays intact and referential integrity holds without soft deletes.
    pub fn remove_book(&mut self, id: &str) -> CoreResult<Book> {
        if self.catalog.get(id).is_none() {
            return Err(CoreError::BookNotFound(id.to_string()));
        }

        let active = self.ledger.active_count_for_book(id);
        if active > 0 {
            return Err(CoreError::ActiveLoans {
                entity: "Book",
                id: id.to_string(),
                count: active,
            });
        }

        let book = self.catalog.remove(id)?;
        info!(book_id = %book.id, "Book deleted");
        Ok(book)
    }

    // =========================================================================
    // Membership Operations
    // =========================================================================

    /// Registers a new user.
    pub fn add_user(&mut self, new: NewUser) -> CoreResult<User> {
        let user = self.membership.add(new)?;
        info!(user_id = %user.id, "User added");
        Ok(user)
    }

    /// Deletes a user; refused while they still hold copies.
    pub fn remove_user(&mut self, id: &str) -> CoreResult<User> {
        if self.membership.get(id).is_none() {
            return Err(CoreError::UserNotFound(id.to_string()));
        }

        if self.ledger.has_active_for_user(id) {
            let count = self
                .ledger
                .list_by_user(id)
                .iter()
                .filter(|l| l.is_active())
                .count();
            return Err(CoreError::ActiveLoans {
                entity: "User",
                id: id.to_string(),
                count,
            });
        }

        let user = self.membership.remove(id)?;
        info!(user_id = %user.id, "User deleted");
        Ok(user)
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// Read-only view of the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Read-only view of the membership register.
    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    /// Read-only view of the loan ledger.
    pub fn ledger(&self) -> &LoanLedger {
        &self.ledger
    }

    /// One consistent view across all three stores.
    pub fn snapshot(&self) -> LibrarySnapshot {
        LibrarySnapshot {
            books: self.catalog.list(),
            users: self.membership.list(),
            loans: self.ledger.list_all(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::LoanStatus;

    fn desk_with(title: &str, quantity: i64) -> (CirculationDesk, Book, User) {
        let mut desk = CirculationDesk::new();
        let book = desk
            .add_book(NewBook {
                title: title.to_string(),
                author: "Y".to_string(),
                isbn: "123".to_string(),
                quantity,
            })
            .unwrap();
        let user = desk
            .add_user(NewUser {
                name: "A".to_string(),
                email: "a@x.com".to_string(),
            })
            .unwrap();
        (desk, book, user)
    }

    fn assert_invariant(desk: &CirculationDesk) {
        for book in desk.catalog().list() {
            assert!(book.available_quantity >= 0);
            assert!(book.available_quantity <= book.quantity);
            assert_eq!(
                desk.ledger().active_count_for_book(&book.id) as i64,
                book.on_loan(),
                "active loans must equal quantity - available for {}",
                book.id
            );
        }
    }

    #[test]
    fn test_borrow_decrements_and_records_loan() {
        let (mut desk, book, user) = desk_with("X", 2);

        let loan = desk.borrow(&book.id, &user.id).unwrap();

        assert_eq!(loan.status, LoanStatus::Borrowed);
        assert_eq!(desk.catalog().get(&book.id).unwrap().available_quantity, 1);
        assert_invariant(&desk);
    }

    #[test]
    fn test_borrow_unknown_book_or_user_changes_nothing() {
        let (mut desk, book, user) = desk_with("X", 2);

        assert!(matches!(
            desk.borrow("missing", &user.id),
            Err(CoreError::BookNotFound(_))
        ));
        assert!(matches!(
            desk.borrow(&book.id, "missing"),
            Err(CoreError::UserNotFound(_))
        ));

        assert_eq!(desk.catalog().get(&book.id).unwrap().available_quantity, 2);
        assert!(desk.ledger().is_empty());
    }

    #[test]
    fn test_borrow_exhausted_book_fails_cleanly() {
        let (mut desk, book, user) = desk_with("X", 1);
        desk.borrow(&book.id, &user.id).unwrap();

        let before = desk.snapshot();
        let result = desk.borrow(&book.id, &user.id);

        assert!(matches!(result, Err(CoreError::NoCopiesAvailable { .. })));
        assert_eq!(desk.snapshot(), before);
        assert_invariant(&desk);
    }

    #[test]
    fn test_borrow_then_return_round_trip() {
        let (mut desk, book, user) = desk_with("X", 3);

        let loan = desk.borrow(&book.id, &user.id).unwrap();
        assert_eq!(desk.catalog().get(&book.id).unwrap().available_quantity, 2);

        let returned = desk.return_loan(&loan.id).unwrap();

        assert_eq!(returned.status, LoanStatus::Returned);
        assert!(returned.return_date.is_some());
        assert_eq!(desk.catalog().get(&book.id).unwrap().available_quantity, 3);
        assert_eq!(desk.ledger().list_all().len(), 1);
        assert_invariant(&desk);
    }

    #[test]
    fn test_double_return_fails_without_side_effects() {
        let (mut desk, book, user) = desk_with("X", 1);
        let loan = desk.borrow(&book.id, &user.id).unwrap();
        desk.return_loan(&loan.id).unwrap();

        let before = desk.snapshot();
        assert!(matches!(
            desk.return_loan(&loan.id),
            Err(CoreError::AlreadyReturned { .. })
        ));
        assert_eq!(desk.snapshot(), before);
    }

    // A return whose availability increment would exceed `quantity` must
    // roll the status flip back, so both stores read as before the call.
    #[test]
    fn test_return_rolls_back_loan_on_availability_fault() {
        let (mut desk, book, user) = desk_with("X", 1);
        let loan = desk.borrow(&book.id, &user.id).unwrap();

        // Corrupt the counter behind the desk's back: available jumps back
        // to quantity while the loan is still out.
        desk.catalog.adjust_availability(&book.id, 1).unwrap();

        let result = desk.return_loan(&loan.id);

        assert!(matches!(result, Err(CoreError::InvariantViolation { .. })));

        let stored = desk.ledger().get(&loan.id).unwrap();
        assert_eq!(stored.status, LoanStatus::Borrowed);
        assert!(stored.return_date.is_none());
        assert_eq!(desk.catalog().get(&book.id).unwrap().available_quantity, 1);
    }

    #[test]
    fn test_delete_book_with_active_loan_refused() {
        let (mut desk, book, user) = desk_with("X", 1);
        let loan = desk.borrow(&book.id, &user.id).unwrap();

        assert!(matches!(
            desk.remove_book(&book.id),
            Err(CoreError::ActiveLoans { entity: "Book", count: 1, .. })
        ));

        // After return the delete goes through; history survives the book
        desk.return_loan(&loan.id).unwrap();
        desk.remove_book(&book.id).unwrap();
        assert_eq!(desk.ledger().list_all().len(), 1);
    }

    #[test]
    fn test_delete_user_with_active_loan_refused() {
        let (mut desk, book, user) = desk_with("X", 1);
        let loan = desk.borrow(&book.id, &user.id).unwrap();

        assert!(matches!(
            desk.remove_user(&user.id),
            Err(CoreError::ActiveLoans { entity: "User", .. })
        ));

        desk.return_loan(&loan.id).unwrap();
        desk.remove_user(&user.id).unwrap();
    }

    // The end-to-end flow: two copies, three borrowers, one return.
    #[test]
    fn test_full_circulation_scenario() {
        let mut desk = CirculationDesk::new();
        let book = desk
            .add_book(NewBook {
                title: "X".to_string(),
                author: "Y".to_string(),
                isbn: "123".to_string(),
                quantity: 2,
            })
            .unwrap();
        assert_eq!(book.available_quantity, 2);

        let users: Vec<User> = (1..=3)
            .map(|i| {
                desk.add_user(NewUser {
                    name: format!("Reader {i}"),
                    email: format!("reader{i}@x.com"),
                })
                .unwrap()
            })
            .collect();

        let first = desk.borrow(&book.id, &users[0].id).unwrap();
        assert_eq!(desk.catalog().get(&book.id).unwrap().available_quantity, 1);
        assert_eq!(first.status, LoanStatus::Borrowed);

        desk.borrow(&book.id, &users[1].id).unwrap();
        assert_eq!(desk.catalog().get(&book.id).unwrap().available_quantity, 0);

        assert!(matches!(
            desk.borrow(&book.id, &users[2].id),
            Err(CoreError::NoCopiesAvailable { .. })
        ));

        desk.return_loan(&first.id).unwrap();
        assert_eq!(desk.catalog().get(&book.id).unwrap().available_quantity, 1);
        assert_eq!(
            desk.ledger().get(&first.id).unwrap().status,
            LoanStatus::Returned
        );
        assert_invariant(&desk);
    }
}
