use std::sync::Arc;
use std::time::Duration;

use crate::config::settings::Settings;
use crate::repositories::user_repository::UserRepository;
use crate::storage::KeyValueStore;
use crate::verifier::CredentialVerifier;

/// Shared application state: the user-record repository, the verification
/// engine, and the knobs the flows need. Cheap to clone, everything heavy is
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserRepository>,
    pub verifier: Arc<dyn CredentialVerifier>,
    pub expected_origin: String,
    pub challenge_ttl: Duration,
    pub verify_timeout: Duration,
}

impl AppState {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        verifier: Arc<dyn CredentialVerifier>,
        settings: &Settings,
    ) -> Self {
        Self {
            users: Arc::new(UserRepository::new(store, settings.storage_timeout)),
            verifier,
            expected_origin: settings.expected_origin.clone(),
            challenge_ttl: settings.challenge_ttl,
            verify_timeout: settings.verify_timeout,
        }
    }
}
