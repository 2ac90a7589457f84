use serde::Deserialize;

use crate::verifier::types::{AuthenticationResponse, RegistrationResponse};

// Fields are optional on purpose: a missing field is a Validation error with
// a field name, not a serde rejection.

#[derive(Deserialize, Clone)]
pub struct ChallengeRequest {
    pub username: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct RegisterVerifyRequest {
    pub username: Option<String>,
    pub registration: Option<RegistrationResponse>,
}

#[derive(Deserialize, Clone)]
pub struct LoginVerifyRequest {
    pub username: Option<String>,
    pub authentication: Option<AuthenticationResponse>,
}
