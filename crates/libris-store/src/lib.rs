//! # libris-store: Stores and Circulation Control
//!
//! In-memory state layer for Libris. Three stores each own one kind of
//! record; the circulation desk is the single component allowed to couple
//! the catalog and the loan ledger, so availability counters and loan
//! statuses can never diverge.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         libris-store                                │
//! │                                                                     │
//! │   presentation layer                                                │
//! │          │                                                          │
//! │          ▼                                                          │
//! │   ┌──────────────┐   one RwLock: writes serialize,                  │
//! │   │   Library    │   snapshots never see half a mutation            │
//! │   └──────┬───────┘                                                  │
//! │          ▼                                                          │
//! │   ┌──────────────────┐                                              │
//! │   │ CirculationDesk  │  borrow / return / guarded deletes           │
//! │   └───┬──────┬───┬───┘                                              │
//! │       ▼      ▼   ▼                                                  │
//! │  Catalog Membership LoanLedger                                      │
//! │  (books) (users)    (loans)                                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Store mutators are `pub(crate)`: from outside this crate the only way to
//! change anything is through [`Library`], which routes every mutation
//! through the desk.

pub mod catalog;
pub mod circulation;
pub mod ledger;
pub mod library;
pub mod membership;

pub use catalog::Catalog;
pub use circulation::CirculationDesk;
pub use ledger::LoanLedger;
pub use library::Library;
pub use membership::Membership;
