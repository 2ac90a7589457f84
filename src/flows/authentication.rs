//! Authentication half of the lifecycle: enumerate a user's credentials
//! behind a fresh challenge, then verify a signed assertion, persist the
//! authenticator's sign counter and consume the challenge in one write.

use base64::prelude::*;
use tokio::time::timeout;
use tracing::info;

use crate::config::startup::AppState;
use crate::error::AppError;
use crate::verifier::types::{
    AuthenticationExpectations, AuthenticationResponse, ParsedAssertion,
};

/// Issues a login challenge and lists the user's registered credential ids so
/// the client-side authenticator can pick one. A user with no credentials
/// cannot start a login flow.
pub async fn start_authentication(
    state: &AppState,
    username: &str,
) -> Result<(String, Vec<String>), AppError> {
    let _guard = state.users.lock_user(username).await;

    let mut record = state
        .users
        .load(username)
        .await?
        .filter(|r| !r.credentials.is_empty())
        .ok_or(AppError::NoCredentials)?;

    let token = record.issue_challenge();
    let credential_ids = record.credential_ids();
    state.users.save(&record).await?;

    info!("issued login challenge for user {}", username);
    Ok((token, credential_ids))
}

/// Verifies a signed assertion against the pending challenge and the
/// credential it names.
///
/// The engine checks the proof against the stored sign counter; on success
/// the updated counter and the consumed challenge land in a single record
/// write, so a lost write can never roll the clone-detection clock backwards
/// while leaving the challenge live.
pub async fn finish_authentication(
    state: &AppState,
    username: &str,
    assertion: &AuthenticationResponse,
) -> Result<ParsedAssertion, AppError> {
    // Credential ids are base64url; toss garbage before touching storage.
    if BASE64_URL_SAFE_NO_PAD
        .decode(assertion.credential_id.as_bytes())
        .is_err()
    {
        return Err(AppError::Validation("authentication.credentialId"));
    }

    let _guard = state.users.lock_user(username).await;

    let mut record = state
        .users
        .load(username)
        .await?
        .ok_or(AppError::ChallengeExpired)?;
    if record.credentials.is_empty() {
        return Err(AppError::ChallengeExpired);
    }
    let challenge = record
        .pending_challenge(state.challenge_ttl)
        .ok_or(AppError::ChallengeExpired)?
        .to_owned();

    let credential = record
        .find_credential(&assertion.credential_id)
        .cloned()
        .ok_or(AppError::CredentialNotFound)?;

    let expected = AuthenticationExpectations {
        challenge,
        origin: state.expected_origin.clone(),
        user_verified: true,
        counter: credential.sign_count,
    };
    let parsed = timeout(
        state.verify_timeout,
        state
            .verifier
            .verify_authentication(assertion, &credential, &expected),
    )
    .await
    .map_err(|_| AppError::Timeout)??;

    if let Some(entry) = record.find_credential_mut(&assertion.credential_id) {
        entry.sign_count = parsed.counter;
    }
    record.consume_challenge();
    state.users.save(&record).await?;

    info!("verified assertion for user {}", username);
    Ok(parsed)
}
