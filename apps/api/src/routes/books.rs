//! # Book Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use libris_core::{Book, BookUpdate, NewBook};

use crate::error::ApiError;
use crate::SharedLibrary;

/// `GET /books`
pub async fn list(State(library): State<SharedLibrary>) -> Json<Vec<Book>> {
    Json(library.snapshot().books)
}

/// `GET /books/{id}`
pub async fn get_by_id(
    State(library): State<SharedLibrary>,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    Ok(Json(library.book(&id)?))
}

/// `POST /books`
pub async fn create(
    State(library): State<SharedLibrary>,
    Json(new): Json<NewBook>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    debug!(title = %new.title, "create book request");
    let book = library.add_book(new)?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// `PUT /books/{id}`
pub async fn update(
    State(library): State<SharedLibrary>,
    Path(id): Path<String>,
    Json(changes): Json<BookUpdate>,
) -> Result<Json<Book>, ApiError> {
    debug!(%id, "update book request");
    Ok(Json(library.update_book(&id, changes)?))
}

/// `DELETE /books/{id}`
pub async fn remove(
    State(library): State<SharedLibrary>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(%id, "delete book request");
    library.delete_book(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
