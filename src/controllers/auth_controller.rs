use axum::{
    extract::{Extension, Json},
    response::IntoResponse,
};
use serde_json::json;
use tracing::warn;
use tracing_log::log::info;

use crate::config::startup::AppState;
use crate::dtos::requests::{ChallengeRequest, LoginVerifyRequest, RegisterVerifyRequest};
use crate::dtos::responses::LoginChallengeData;
use crate::error::AppError;
use crate::flows::{authentication, registration};

fn required<'a>(field: &'a Option<String>, name: &'static str) -> Result<&'a str, AppError> {
    field
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(AppError::Validation(name))
}

/// Issues a single-use registration challenge for the given username,
/// creating the user record if this is the user's first contact.
///
/// # Returns
/// The raw challenge token for the client-side authenticator to sign.
#[axum::debug_handler]
pub async fn register_challenge(
    Extension(state): Extension<AppState>,
    Json(body): Json<ChallengeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = required(&body.username, "username")?;
    info!("Registration challenge requested for {}", username);

    let token = registration::start_registration(&state, username).await?;
    Ok(token)
}

/// Completes a registration: checks the signed response against the pending
/// challenge and appends the new credential to the user record.
///
/// # Returns
/// `{"status": 200}` when the credential was stored.
pub async fn register_verify(
    Extension(state): Extension<AppState>,
    Json(body): Json<RegisterVerifyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = required(&body.username, "username")?;
    let registration = body
        .registration
        .as_ref()
        .ok_or(AppError::Validation("registration"))?;

    let entry = registration::finish_registration(&state, username, registration).await?;
    info!(
        "Registration completed for {} with credential {}",
        username, entry.credential_id
    );

    Ok(Json(json!({ "status": 200 })))
}

/// Issues a single-use login challenge and enumerates the user's registered
/// credential ids. Users without credentials cannot start a login flow.
pub async fn login_challenge(
    Extension(state): Extension<AppState>,
    Json(body): Json<ChallengeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = required(&body.username, "username")?;

    let (challenge, credential_ids) = authentication::start_authentication(&state, username)
        .await
        .inspect_err(|_| warn!("Login challenge refused for {}", username))?;

    Ok(Json(LoginChallengeData {
        challenge,
        credential_ids,
    }))
}

/// Completes a login: verifies the signed assertion against the pending
/// challenge and the stored credential it names.
///
/// # Returns
/// The parsed assertion result under `data`.
pub async fn login_verify(
    Extension(state): Extension<AppState>,
    Json(body): Json<LoginVerifyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = required(&body.username, "username")?;
    let assertion = body
        .authentication
        .as_ref()
        .ok_or(AppError::Validation("authentication"))?;

    let parsed = authentication::finish_authentication(&state, username, assertion).await?;
    info!("Login completed for {}", username);

    Ok(Json(json!({ "data": parsed })))
}

/// Catch-all for unrouted paths.
pub async fn hello() -> &'static str {
    "Hello World!"
}
