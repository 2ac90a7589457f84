use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::storage::StoreError;
use crate::verifier::VerifierError;

/// Every failure a request can end in. All of them are terminal for the
/// current request; nothing is recovered locally.
#[derive(Error, Debug)]
pub enum AppError {
    // Request shape errors
    #[error("missing required field: {0}")]
    Validation(&'static str),

    // Challenge lifecycle errors
    #[error("challenge expired or never issued")]
    ChallengeExpired,

    // Credential lookup errors
    #[error("no credentials registered for this user")]
    NoCredentials,
    #[error("credential is not registered for this user")]
    CredentialNotFound,
    #[error("credential is already registered")]
    DuplicateCredential,

    // Verifier errors
    #[error("credential verification rejected")]
    Verification(#[source] VerifierError),
    #[error("verifier unavailable: {0}")]
    Upstream(String),

    // Storage errors
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
    #[error("stored record is malformed")]
    CorruptRecord(#[source] serde_json::Error),

    // Upstream call exceeded its deadline; safe to retry at the transport
    // layer only if no mutation was attempted.
    #[error("upstream call timed out")]
    Timeout,
}

impl From<VerifierError> for AppError {
    fn from(err: VerifierError) -> Self {
        match err {
            VerifierError::Rejected { .. } => AppError::Verification(err),
            VerifierError::Unavailable(msg) => AppError::Upstream(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_string = self.to_string();
        let (status, error_message) = match &self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Missing Required Field"),

            AppError::ChallengeExpired => (StatusCode::UNAUTHORIZED, "Challenge Expired"),

            AppError::NoCredentials => (StatusCode::NOT_FOUND, "No Credentials Found"),
            AppError::CredentialNotFound => (StatusCode::NOT_FOUND, "Unknown Credential"),
            AppError::DuplicateCredential => {
                (StatusCode::CONFLICT, "Credential Already Registered")
            }

            // The engine's reason stays in the server log. Clients only learn
            // that verification failed, not which check tripped.
            AppError::Verification(reason) => {
                tracing::warn!("verifier rejected the response: {}", reason);
                (StatusCode::UNAUTHORIZED, "Verification Failed")
            }
            AppError::Upstream(detail) => {
                tracing::error!("verifier unavailable: {}", detail);
                (StatusCode::BAD_GATEWAY, "Verifier Unavailable")
            }

            AppError::Storage(err) => {
                tracing::error!("storage backend failure: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage Error")
            }
            AppError::CorruptRecord(err) => {
                tracing::error!("failed to decode stored user record: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage Error")
            }

            AppError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "Upstream Timeout"),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "message": error_message,
            "error": error_string,
            "timestamp": chrono::Utc::now()
        }));

        (status, body).into_response()
    }
}
