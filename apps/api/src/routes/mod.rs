//! # Route Table
//!
//! Wires the three resources plus health and snapshot endpoints.

pub mod books;
pub mod loans;
pub mod users;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use libris_core::LibrarySnapshot;

use crate::SharedLibrary;

pub fn router() -> Router<SharedLibrary> {
    Router::new()
        .route("/health", get(health))
        .route("/library", get(snapshot))
        .route("/books", get(books::list).post(books::create))
        .route(
            "/books/{id}",
            get(books::get_by_id).put(books::update).delete(books::remove),
        )
        .route("/users", get(users::list).post(users::create))
        .route("/users/{id}", get(users::get_by_id).delete(users::remove))
        .route("/loans", get(loans::list).post(loans::act))
}

/// Liveness probe.
async fn health() -> &'static str {
    "OK"
}

/// Full consistent snapshot - the read path the frontend refreshes after
/// every mutation.
async fn snapshot(State(library): State<SharedLibrary>) -> Json<LibrarySnapshot> {
    Json(library.snapshot())
}
