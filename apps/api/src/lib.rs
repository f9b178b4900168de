//! # Libris REST API
//!
//! HTTP surface for the library-management system.
//!
//! ## Endpoints
//! ```text
//! GET    /health          liveness probe
//! GET    /library         full consistent snapshot {books, users, loans}
//! GET    /books           list books
//! POST   /books           register a book {title, author, isbn, quantity}
//! GET    /books/{id}      single book
//! PUT    /books/{id}      update a book (quantity reconciliation applies)
//! DELETE /books/{id}      delete (refused while copies are on loan)
//! GET    /users           list users
//! POST   /users           register a user {name, email}
//! GET    /users/{id}      single user
//! DELETE /users/{id}      delete (refused while the user holds copies)
//! GET    /loans           full loan history
//! POST   /loans           {bookId, userId, type:"borrow"} or
//!                         {loanId, type:"return"}
//! ```
//!
//! Every error response carries `{code, message}` where the message names
//! the actual cause ("No copies of book ... are available", not a generic
//! failure). After a successful mutation clients re-fetch `/library` (or the
//! resource lists) rather than patching local state.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use libris_store::Library;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ErrorCode};

/// Shared application state: the locked library facade.
pub type SharedLibrary = Arc<Library>;

/// Builds the application router over a library instance.
pub fn app(library: SharedLibrary) -> Router {
    routes::router().with_state(library)
}
