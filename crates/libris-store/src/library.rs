//! # Library Facade
//!
//! The boundary used by the presentation layer.
//!
//! ## Thread Safety
//! The desk is wrapped in `RwLock` because:
//! 1. Requests from the presentation layer arrive concurrently
//! 2. Conflicting mutations (two borrows racing for the last copy, two
//!    returns of the same loan) must serialize: exactly one wins, the other
//!    observes the post-mutation state and fails with the business error
//! 3. Snapshots take the read lock, so they can never observe a loan whose
//!    availability adjustment has not landed yet
//!
//! ## Contract
//! Each mutation entry point performs exactly one desk call. On success the
//! caller re-fetches [`Library::snapshot`] to observe the new consistent
//! state - full re-sync rather than incremental patching.

use std::sync::RwLock;

use libris_core::{
    Book, BookUpdate, CoreError, CoreResult, LibrarySnapshot, Loan, NewBook, NewUser, User,
};

use crate::circulation::CirculationDesk;

/// Shared, lock-guarded entry point over the circulation desk.
#[derive(Debug, Default)]
pub struct Library {
    desk: RwLock<CirculationDesk>,
}

impl Library {
    /// Creates a library over empty stores.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the desk.
    fn with_desk<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CirculationDesk) -> R,
    {
        let desk = self.desk.read().expect("library lock poisoned");
        f(&desk)
    }

    /// Executes a function with write access to the desk.
    fn with_desk_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CirculationDesk) -> R,
    {
        let mut desk = self.desk.write().expect("library lock poisoned");
        f(&mut desk)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// One mutually consistent view of books, users and loans.
    pub fn snapshot(&self) -> LibrarySnapshot {
        self.with_desk(|desk| desk.snapshot())
    }

    /// Single book lookup.
    pub fn book(&self, id: &str) -> CoreResult<Book> {
        self.with_desk(|desk| {
            desk.catalog()
                .get(id)
                .cloned()
                .ok_or_else(|| CoreError::BookNotFound(id.to_string()))
        })
    }

    /// Single user lookup.
    pub fn user(&self, id: &str) -> CoreResult<User> {
        self.with_desk(|desk| {
            desk.membership()
                .get(id)
                .cloned()
                .ok_or_else(|| CoreError::UserNotFound(id.to_string()))
        })
    }

    /// Single loan lookup.
    pub fn loan(&self, id: &str) -> CoreResult<Loan> {
        self.with_desk(|desk| {
            desk.ledger()
                .get(id)
                .cloned()
                .ok_or_else(|| CoreError::LoanNotFound(id.to_string()))
        })
    }

    // =========================================================================
    // Mutations - one desk call each
    // =========================================================================

    /// Registers a book.
    pub fn add_book(&self, new: NewBook) -> CoreResult<Book> {
        self.with_desk_mut(|desk| desk.add_book(new))
    }

    /// Updates a book.
    pub fn update_book(&self, id: &str, update: BookUpdate) -> CoreResult<Book> {
        self.with_desk_mut(|desk| desk.update_book(id, update))
    }

    /// Deletes a book (refused while copies are out).
    pub fn delete_book(&self, id: &str) -> CoreResult<Book> {
        self.with_desk_mut(|desk| desk.remove_book(id))
    }

    /// Registers a user.
    pub fn add_user(&self, new: NewUser) -> CoreResult<User> {
        self.with_desk_mut(|desk| desk.add_user(new))
    }

    /// Deletes a user (refused while they hold copies).
    pub fn delete_user(&self, id: &str) -> CoreResult<User> {
        self.with_desk_mut(|desk| desk.remove_user(id))
    }

    /// Lends a copy.
    pub fn borrow(&self, book_id: &str, user_id: &str) -> CoreResult<Loan> {
        self.with_desk_mut(|desk| desk.borrow(book_id, user_id))
    }

    /// Takes a copy back.
    pub fn return_loan(&self, loan_id: &str) -> CoreResult<Loan> {
        self.with_desk_mut(|desk| desk.return_loan(loan_id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::LoanStatus;
    use std::sync::{Arc, Barrier};
    use std::thread;

    fn seeded(quantity: i64) -> (Library, Book, User) {
        let library = Library::new();
        let book = library
            .add_book(NewBook {
                title: "X".to_string(),
                author: "Y".to_string(),
                isbn: "123".to_string(),
                quantity,
            })
            .unwrap();
        let user = library
            .add_user(NewUser {
                name: "A".to_string(),
                email: "a@x.com".to_string(),
            })
            .unwrap();
        (library, book, user)
    }

    #[test]
    fn test_snapshot_is_idempotent_between_mutations() {
        let (library, book, user) = seeded(2);
        library.borrow(&book.id, &user.id).unwrap();

        assert_eq!(library.snapshot(), library.snapshot());
    }

    #[test]
    fn test_snapshot_reflects_mutations() {
        let (library, book, user) = seeded(2);

        let loan = library.borrow(&book.id, &user.id).unwrap();
        let snap = library.snapshot();

        assert_eq!(snap.books[0].available_quantity, 1);
        assert_eq!(snap.loans.len(), 1);
        assert_eq!(snap.loans[0].id, loan.id);
        assert_eq!(snap.users.len(), 1);
    }

    #[test]
    fn test_single_entity_lookups() {
        let (library, book, user) = seeded(1);
        let loan = library.borrow(&book.id, &user.id).unwrap();

        assert_eq!(library.book(&book.id).unwrap().id, book.id);
        assert_eq!(library.user(&user.id).unwrap().id, user.id);
        assert_eq!(library.loan(&loan.id).unwrap().id, loan.id);
        assert!(matches!(
            library.book("missing"),
            Err(CoreError::BookNotFound(_))
        ));
    }

    // Two simultaneous borrows racing for the last copy: exactly one wins.
    #[test]
    fn test_concurrent_borrows_of_last_copy() {
        let (library, book, user) = seeded(1);
        let user2 = library
            .add_user(NewUser {
                name: "B".to_string(),
                email: "b@x.com".to_string(),
            })
            .unwrap();

        let library = Arc::new(library);
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = [user.id.clone(), user2.id.clone()]
            .into_iter()
            .map(|user_id| {
                let library = Arc::clone(&library);
                let barrier = Arc::clone(&barrier);
                let book_id = book.id.clone();
                thread::spawn(move || {
                    barrier.wait();
                    library.borrow(&book_id, &user_id)
                })
            })
            .collect();

        let results: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("borrow thread panicked"))
            .collect();

        let successes = results.iter().filter(|r| r.is_ok()).count();
        let unavailable = results
            .iter()
            .filter(|r| matches!(r, Err(CoreError::NoCopiesAvailable { .. })))
            .count();

        assert_eq!(successes, 1);
        assert_eq!(unavailable, 1);

        let snap = library.snapshot();
        assert_eq!(snap.books[0].available_quantity, 0);
        let active = snap.loans.iter().filter(|l| l.is_active()).count();
        assert_eq!(active, 1);
    }

    // Two simultaneous returns of the same loan: no double-return.
    #[test]
    fn test_concurrent_returns_of_same_loan() {
        let (library, book, user) = seeded(1);
        let loan = library.borrow(&book.id, &user.id).unwrap();

        let library = Arc::new(library);
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let library = Arc::clone(&library);
                let barrier = Arc::clone(&barrier);
                let loan_id = loan.id.clone();
                thread::spawn(move || {
                    barrier.wait();
                    library.return_loan(&loan_id)
                })
            })
            .collect();

        let results: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("return thread panicked"))
            .collect();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, Err(CoreError::AlreadyReturned { .. })))
                .count(),
            1
        );

        let snap = library.snapshot();
        assert_eq!(snap.books[0].available_quantity, 1);
        assert_eq!(snap.loans[0].status, LoanStatus::Returned);
    }
}
