pub mod remote;
pub mod types;

use thiserror::Error;

use crate::models::user_record::CredentialEntry;
use types::{
    AuthenticationExpectations, AuthenticationResponse, ParsedAssertion, ParsedCredential,
    RegistrationExpectations, RegistrationResponse,
};

#[derive(Error, Debug)]
pub enum VerifierError {
    /// The engine examined the proof and turned it down (bad signature,
    /// challenge or origin mismatch, counter regression, user-verification
    /// flag unmet). The reason is for the server log only.
    #[error("rejected: {reason}")]
    Rejected { reason: String },

    /// The engine could not be reached or answered with something that is
    /// not a verdict.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

/// The cryptographic verification engine. The coordinator never inspects
/// signatures or wire encodings itself; it hands the encoded response and its
/// expectations to an implementation of this trait and acts on the verdict.
#[async_trait::async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify_registration(
        &self,
        registration: &RegistrationResponse,
        expected: &RegistrationExpectations,
    ) -> Result<ParsedCredential, VerifierError>;

    async fn verify_authentication(
        &self,
        assertion: &AuthenticationResponse,
        credential: &CredentialEntry,
        expected: &AuthenticationExpectations,
    ) -> Result<ParsedAssertion, VerifierError>;
}
