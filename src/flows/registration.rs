//! Registration half of the challenge/credential lifecycle: issue a
//! single-use challenge, then turn a verified registration response into a
//! stored credential while consuming that challenge.

use tokio::time::timeout;
use tracing::info;

use crate::config::startup::AppState;
use crate::error::AppError;
use crate::models::user_record::CredentialEntry;
use crate::verifier::types::{RegistrationExpectations, RegistrationResponse};

/// Issues a registration challenge for `username`, creating the record on
/// first contact. Any previously pending challenge becomes unusable.
pub async fn start_registration(state: &AppState, username: &str) -> Result<String, AppError> {
    let _guard = state.users.lock_user(username).await;

    let mut record = state.users.load_or_new(username).await?;
    let token = record.issue_challenge();
    state.users.save(&record).await?;

    info!("issued registration challenge for user {}", username);
    Ok(token)
}

/// Verifies a signed registration response against the pending challenge and
/// appends the resulting credential.
///
/// The challenge transitions to consumed in the same record write that adds
/// the credential, so replaying the response afterwards fails with
/// `ChallengeExpired` instead of duplicating the entry.
pub async fn finish_registration(
    state: &AppState,
    username: &str,
    registration: &RegistrationResponse,
) -> Result<CredentialEntry, AppError> {
    let _guard = state.users.lock_user(username).await;

    let mut record = state
        .users
        .load(username)
        .await?
        .ok_or(AppError::ChallengeExpired)?;
    let challenge = record
        .pending_challenge(state.challenge_ttl)
        .ok_or(AppError::ChallengeExpired)?
        .to_owned();

    let expected = RegistrationExpectations {
        challenge,
        origin: state.expected_origin.clone(),
    };
    let parsed = timeout(
        state.verify_timeout,
        state.verifier.verify_registration(registration, &expected),
    )
    .await
    .map_err(|_| AppError::Timeout)??;

    if record.find_credential(&parsed.credential.id).is_some() {
        return Err(AppError::DuplicateCredential);
    }

    let entry = CredentialEntry::from_parsed(&parsed);
    record.consume_challenge();
    record.credentials.push(entry.clone());
    state.users.save(&record).await?;

    info!(
        "registered credential {} for user {}",
        entry.credential_id, username
    );
    Ok(entry)
}
