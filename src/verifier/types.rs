//! Wire and verdict types exchanged with the verification engine. The
//! encoded payloads are opaque base64url blobs produced by the client-side
//! authenticator; only the engine looks inside them.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialKey {
    pub id: String,
    pub public_key: String,
    pub algorithm: String,
}

/// Signed proof produced when a new credential is created.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub username: String,
    pub credential: CredentialKey,
    pub authenticator_data: String,
    pub client_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attestation_data: Option<String>,
}

/// Signed proof produced when an existing credential authenticates.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationResponse {
    pub credential_id: String,
    pub authenticator_data: String,
    pub client_data: String,
    pub signature: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatorInfo {
    pub counter: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aaguid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// What the engine hands back after a registration checks out.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCredential {
    pub username: String,
    pub credential: CredentialKey,
    pub authenticator: AuthenticatorInfo,
}

/// What the engine hands back after an assertion checks out.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAssertion {
    pub credential_id: String,
    pub user_verified: bool,
    pub counter: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationExpectations {
    pub challenge: String,
    pub origin: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationExpectations {
    pub challenge: String,
    pub origin: String,
    pub user_verified: bool,
    pub counter: u32,
}
