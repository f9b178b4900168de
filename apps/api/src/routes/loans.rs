//! # Loan Handlers
//!
//! One mutation endpoint drives the whole loan workflow, mirroring the
//! frontend's single loan form:
//!
//! ```json
//! { "bookId": "...", "userId": "...", "type": "borrow" }
//! { "loanId": "...", "type": "return" }
//! ```

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use libris_core::Loan;

use crate::error::ApiError;
use crate::SharedLibrary;

/// Body of `POST /loans`, discriminated by the `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum LoanAction {
    #[serde(rename = "borrow", rename_all = "camelCase")]
    Borrow { book_id: String, user_id: String },

    #[serde(rename = "return", rename_all = "camelCase")]
    Return { loan_id: String },
}

/// `GET /loans` - full history, returned loans included.
pub async fn list(State(library): State<SharedLibrary>) -> Json<Vec<Loan>> {
    Json(library.snapshot().loans)
}

/// `POST /loans` - borrow or return.
pub async fn act(
    State(library): State<SharedLibrary>,
    Json(action): Json<LoanAction>,
) -> Result<(StatusCode, Json<Loan>), ApiError> {
    match action {
        LoanAction::Borrow { book_id, user_id } => {
            debug!(%book_id, %user_id, "borrow request");
            let loan = library.borrow(&book_id, &user_id)?;
            Ok((StatusCode::CREATED, Json(loan)))
        }
        LoanAction::Return { loan_id } => {
            debug!(%loan_id, "return request");
            let loan = library.return_loan(&loan_id)?;
            Ok((StatusCode::OK, Json(loan)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loan_action_wire_format() {
        let action: LoanAction =
            serde_json::from_str(r#"{"bookId":"b-1","userId":"u-1","type":"borrow"}"#).unwrap();
        assert!(matches!(action, LoanAction::Borrow { .. }));

        let action: LoanAction =
            serde_json::from_str(r#"{"loanId":"l-1","type":"return"}"#).unwrap();
        assert!(matches!(action, LoanAction::Return { .. }));
    }

    #[test]
    fn test_loan_action_rejects_missing_discriminator() {
        let result: Result<LoanAction, _> =
            serde_json::from_str(r#"{"bookId":"b-1","userId":"u-1"}"#);
        assert!(result.is_err());
    }
}
