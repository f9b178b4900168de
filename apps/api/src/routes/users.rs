//! # User Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use libris_core::{NewUser, User};

use crate::error::ApiError;
use crate::SharedLibrary;

/// `GET /users`
pub async fn list(State(library): State<SharedLibrary>) -> Json<Vec<User>> {
    Json(library.snapshot().users)
}

/// `GET /users/{id}`
pub async fn get_by_id(
    State(library): State<SharedLibrary>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(library.user(&id)?))
}

/// `POST /users`
pub async fn create(
    State(library): State<SharedLibrary>,
    Json(new): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    debug!(name = %new.name, "create user request");
    let user = library.add_user(new)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `DELETE /users/{id}`
pub async fn remove(
    State(library): State<SharedLibrary>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(%id, "delete user request");
    library.delete_user(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
