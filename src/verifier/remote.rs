use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::types::{
    AuthenticationExpectations, AuthenticationResponse, ParsedAssertion, ParsedCredential,
    RegistrationExpectations, RegistrationResponse,
};
use super::{CredentialVerifier, VerifierError};
use crate::models::user_record::CredentialEntry;

#[derive(Deserialize, Default)]
struct RejectionReply {
    error: String,
}

/// Adapter for a verification engine reached over HTTP. A 2xx reply carries
/// the parsed verdict, a 4xx reply carries the rejection reason, anything
/// else means the engine is unavailable.
pub struct RemoteVerifier {
    client: Client,
    base_url: String,
}

impl RemoteVerifier {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    async fn post_verdict<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, VerifierError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .map_err(|e| VerifierError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| VerifierError::Unavailable(format!("malformed verdict: {e}")))
        } else if status.is_client_error() {
            let reply: RejectionReply = response.json().await.unwrap_or_default();
            Err(VerifierError::Rejected {
                reason: reply.error,
            })
        } else {
            Err(VerifierError::Unavailable(format!(
                "engine returned {status}"
            )))
        }
    }
}

#[async_trait::async_trait]
impl CredentialVerifier for RemoteVerifier {
    async fn verify_registration(
        &self,
        registration: &RegistrationResponse,
        expected: &RegistrationExpectations,
    ) -> Result<ParsedCredential, VerifierError> {
        self.post_verdict(
            "/verify/registration",
            json!({
                "registration": registration,
                "expected": expected,
            }),
        )
        .await
    }

    async fn verify_authentication(
        &self,
        assertion: &AuthenticationResponse,
        credential: &CredentialEntry,
        expected: &AuthenticationExpectations,
    ) -> Result<ParsedAssertion, VerifierError> {
        self.post_verdict(
            "/verify/authentication",
            json!({
                "authentication": assertion,
                "credential": credential,
                "expected": expected,
            }),
        )
        .await
    }
}
