//! # Loan Ledger
//!
//! Owns the loan records and the loan state machine.
//!
//! ## Loan Lifecycle
//! ```text
//! create() ──► BORROWED ──mark_returned()──► RETURNED (terminal)
//! ```
//!
//! Loans are never deleted; the ledger is an append-only history plus one
//! irreversible status flip per record. Creation performs no availability
//! validation - that is the circulation desk's job.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use libris_core::{CoreError, CoreResult, Loan, LoanStatus};

/// In-memory loan history, in chronological (insertion) order.
#[derive(Debug, Default)]
pub struct LoanLedger {
    loans: Vec<Loan>,
}

impl LoanLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new loan in state `BORROWED` with `loan_date = now`.
    ///
    /// Pure data creation: the caller (the desk) has already verified the
    /// book, the user and the availability.
    pub(crate) fn create(&mut self, book_id: &str, user_id: &str) -> Loan {
        let loan = Loan {
            id: Uuid::new_v4().to_string(),
            book_id: book_id.to_string(),
            user_id: user_id.to_string(),
            status: LoanStatus::Borrowed,
            loan_date: Utc::now(),
            return_date: None,
        };

        debug!(id = %loan.id, book_id = %loan.book_id, user_id = %loan.user_id, "Loan created");

        self.loans.push(loan.clone());
        loan
    }

    /// Flips a loan to `RETURNED` and stamps `return_date`.
    ///
    /// ## Errors
    /// - `LoanNotFound` if the id is unknown
    /// - `AlreadyReturned` if the loan is already in its terminal state;
    ///   the record is left untouched
    pub(crate) fn mark_returned(&mut self, id: &str) -> CoreResult<Loan> {
        let loan = self
            .loans
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| CoreError::LoanNotFound(id.to_string()))?;

        if loan.status == LoanStatus::Returned {
            return Err(CoreError::AlreadyReturned {
                loan_id: id.to_string(),
            });
        }

        loan.status = LoanStatus::Returned;
        loan.return_date = Some(Utc::now());

        debug!(id = %loan.id, book_id = %loan.book_id, "Loan returned");

        Ok(loan.clone())
    }

    /// Compensation hook: undoes a `mark_returned` whose paired availability
    /// increment failed. Only the desk's rollback path calls this.
    pub(crate) fn reopen(&mut self, id: &str) {
        if let Some(loan) = self.loans.iter_mut().find(|l| l.id == id) {
            loan.status = LoanStatus::Borrowed;
            loan.return_date = None;
        }
    }

    /// Gets a loan by id.
    pub fn get(&self, id: &str) -> Option<&Loan> {
        self.loans.iter().find(|l| l.id == id)
    }

    /// All loans, oldest first.
    pub fn list_all(&self) -> Vec<Loan> {
        self.loans.clone()
    }

    /// Loans still holding a copy (`status = BORROWED`).
    pub fn list_active(&self) -> Vec<Loan> {
        self.loans.iter().filter(|l| l.is_active()).cloned().collect()
    }

    /// Full history for one book, returned loans included.
    pub fn list_by_book(&self, book_id: &str) -> Vec<Loan> {
        self.loans
            .iter()
            .filter(|l| l.book_id == book_id)
            .cloned()
            .collect()
    }

    /// Full history for one user, returned loans included.
    pub fn list_by_user(&self, user_id: &str) -> Vec<Loan> {
        self.loans
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Number of copies of a book currently out on loan.
    pub fn active_count_for_book(&self, book_id: &str) -> usize {
        self.loans
            .iter()
            .filter(|l| l.book_id == book_id && l.is_active())
            .count()
    }

    /// Whether a user still holds at least one copy.
    pub fn has_active_for_user(&self, user_id: &str) -> bool {
        self.loans
            .iter()
            .any(|l| l.user_id == user_id && l.is_active())
    }

    /// Total number of loan records, returned ones included.
    pub fn len(&self) -> usize {
        self.loans.len()
    }

    /// Whether the ledger holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_starts_borrowed() {
        let mut ledger = LoanLedger::new();
        let loan = ledger.create("b-1", "u-1");

        assert_eq!(loan.status, LoanStatus::Borrowed);
        assert!(loan.return_date.is_none());
        assert_eq!(ledger.active_count_for_book("b-1"), 1);
    }

    #[test]
    fn test_return_is_terminal() {
        let mut ledger = LoanLedger::new();
        let loan = ledger.create("b-1", "u-1");

        let returned = ledger.mark_returned(&loan.id).unwrap();
        assert_eq!(returned.status, LoanStatus::Returned);
        assert!(returned.return_date.is_some());

        // Second return refused, record untouched
        assert!(matches!(
            ledger.mark_returned(&loan.id),
            Err(CoreError::AlreadyReturned { .. })
        ));
        let stored = ledger.get(&loan.id).unwrap();
        assert_eq!(stored.status, LoanStatus::Returned);
        assert_eq!(stored.return_date, returned.return_date);
    }

    #[test]
    fn test_return_unknown_loan() {
        let mut ledger = LoanLedger::new();
        assert!(matches!(
            ledger.mark_returned("missing"),
            Err(CoreError::LoanNotFound(_))
        ));
    }

    #[test]
    fn test_reopen_undoes_return() {
        let mut ledger = LoanLedger::new();
        let loan = ledger.create("b-1", "u-1");
        ledger.mark_returned(&loan.id).unwrap();

        ledger.reopen(&loan.id);

        let stored = ledger.get(&loan.id).unwrap();
        assert_eq!(stored.status, LoanStatus::Borrowed);
        assert!(stored.return_date.is_none());
    }

    #[test]
    fn test_queries_filter_by_book_user_and_status() {
        let mut ledger = LoanLedger::new();
        let l1 = ledger.create("b-1", "u-1");
        let _l2 = ledger.create("b-1", "u-2");
        let _l3 = ledger.create("b-2", "u-1");
        ledger.mark_returned(&l1.id).unwrap();

        assert_eq!(ledger.list_all().len(), 3);
        assert_eq!(ledger.list_active().len(), 2);
        assert_eq!(ledger.list_by_book("b-1").len(), 2);
        assert_eq!(ledger.list_by_user("u-1").len(), 2);
        assert_eq!(ledger.active_count_for_book("b-1"), 1);
        assert!(ledger.has_active_for_user("u-1"));
        assert!(!ledger.has_active_for_user("u-3"));
    }
}
