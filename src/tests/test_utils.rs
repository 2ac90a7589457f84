use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use base64::prelude::*;
use http_body_util::BodyExt;
use serde::Deserialize;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::app;
use crate::config::settings::Settings;
use crate::config::startup::AppState;
use crate::models::user_record::CredentialEntry;
use crate::storage::memory::MemoryStore;
use crate::verifier::types::{
    AuthenticationExpectations, AuthenticationResponse, AuthenticatorInfo, CredentialKey,
    ParsedAssertion, ParsedCredential, RegistrationExpectations, RegistrationResponse,
};
use crate::verifier::{CredentialVerifier, VerifierError};

pub const TEST_ORIGIN: &str = "app.example.test";

/// Scripted engine: decodes the stub payloads produced by the helpers below
/// and enforces challenge/origin binding, the user-verification flag and
/// counter monotonicity, without any cryptography.
pub struct StubVerifier;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StubClientData {
    challenge: String,
    origin: String,
    #[serde(default = "default_true")]
    user_verified: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
struct StubAuthenticatorData {
    counter: u32,
}

fn decode_payload<T: serde::de::DeserializeOwned>(encoded: &str) -> Result<T, VerifierError> {
    let bytes = BASE64_URL_SAFE_NO_PAD
        .decode(encoded.as_bytes())
        .map_err(|_| VerifierError::Rejected {
            reason: "payload is not base64url".into(),
        })?;
    serde_json::from_slice(&bytes).map_err(|_| VerifierError::Rejected {
        reason: "payload is not the expected JSON".into(),
    })
}

fn check_binding(
    client_data: &StubClientData,
    challenge: &str,
    origin: &str,
) -> Result<(), VerifierError> {
    if client_data.challenge != challenge {
        return Err(VerifierError::Rejected {
            reason: "challenge mismatch".into(),
        });
    }
    if client_data.origin != origin {
        return Err(VerifierError::Rejected {
            reason: "origin mismatch".into(),
        });
    }
    Ok(())
}

#[async_trait::async_trait]
impl CredentialVerifier for StubVerifier {
    async fn verify_registration(
        &self,
        registration: &RegistrationResponse,
        expected: &RegistrationExpectations,
    ) -> Result<ParsedCredential, VerifierError> {
        let client_data: StubClientData = decode_payload(&registration.client_data)?;
        check_binding(&client_data, &expected.challenge, &expected.origin)?;

        Ok(ParsedCredential {
            username: registration.username.clone(),
            credential: registration.credential.clone(),
            authenticator: AuthenticatorInfo {
                counter: 0,
                aaguid: Some("00000000-0000-0000-0000-000000000000".into()),
                name: Some("stub authenticator".into()),
            },
        })
    }

    async fn verify_authentication(
        &self,
        assertion: &AuthenticationResponse,
        _credential: &CredentialEntry,
        expected: &AuthenticationExpectations,
    ) -> Result<ParsedAssertion, VerifierError> {
        let client_data: StubClientData = decode_payload(&assertion.client_data)?;
        check_binding(&client_data, &expected.challenge, &expected.origin)?;

        if expected.user_verified && !client_data.user_verified {
            return Err(VerifierError::Rejected {
                reason: "user verification flag unmet".into(),
            });
        }

        let authenticator: StubAuthenticatorData = decode_payload(&assertion.authenticator_data)?;
        if expected.counter > 0 && authenticator.counter <= expected.counter {
            return Err(VerifierError::Rejected {
                reason: "counter regression".into(),
            });
        }

        Ok(ParsedAssertion {
            credential_id: assertion.credential_id.clone(),
            user_verified: client_data.user_verified,
            counter: authenticator.counter,
        })
    }
}

pub fn test_settings() -> Settings {
    Settings {
        bind_addr: "localhost:0".into(),
        expected_origin: TEST_ORIGIN.into(),
        verifier_url: "http://localhost:0".into(),
        mongo_uri: "mongodb://unused".into(),
        database_name: "unused".into(),
        challenge_ttl: Duration::from_secs(300),
        storage_timeout: Duration::from_secs(3),
        verify_timeout: Duration::from_secs(5),
    }
}

pub fn setup_test_state() -> AppState {
    AppState::new(
        Arc::new(MemoryStore::new()),
        Arc::new(StubVerifier),
        &test_settings(),
    )
}

pub fn setup_test_app() -> (Router, AppState) {
    let state = setup_test_state();
    (app::create_app(state.clone()), state)
}

fn encode_client_data(challenge: &str, origin: &str, user_verified: bool) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(
        json!({
            "challenge": challenge,
            "origin": origin,
            "userVerified": user_verified,
        })
        .to_string(),
    )
}

pub fn stub_registration(
    username: &str,
    credential_id: &str,
    challenge: &str,
) -> RegistrationResponse {
    RegistrationResponse {
        username: username.into(),
        credential: CredentialKey {
            id: credential_id.into(),
            public_key: "stub-public-key".into(),
            algorithm: "ES256".into(),
        },
        authenticator_data: BASE64_URL_SAFE_NO_PAD.encode("{}"),
        client_data: encode_client_data(challenge, TEST_ORIGIN, true),
        attestation_data: None,
    }
}

pub fn stub_assertion(
    credential_id: &str,
    challenge: &str,
    counter: u32,
) -> AuthenticationResponse {
    AuthenticationResponse {
        credential_id: credential_id.into(),
        authenticator_data: BASE64_URL_SAFE_NO_PAD
            .encode(json!({ "counter": counter }).to_string()),
        client_data: encode_client_data(challenge, TEST_ORIGIN, true),
        signature: "stub-signature".into(),
    }
}

pub fn stub_assertion_for_origin(
    credential_id: &str,
    challenge: &str,
    counter: u32,
    origin: &str,
) -> AuthenticationResponse {
    AuthenticationResponse {
        client_data: encode_client_data(challenge, origin, true),
        ..stub_assertion(credential_id, challenge, counter)
    }
}

pub async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn post_json_expecting_value(
    app: &Router,
    path: &str,
    body: Value,
) -> (StatusCode, Value) {
    let (status, text) = post_json(app, path, body).await;
    let value = serde_json::from_str(&text).unwrap_or(Value::Null);
    (status, value)
}

pub async fn get(app: &Router, path: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
