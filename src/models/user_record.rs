use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::verifier::types::ParsedCredential;

/// Lifecycle of a user's current challenge.
///
/// `Consumed` is stored explicitly so a replayed response is distinguishable
/// from "no challenge was ever issued" - both are rejected, but the record
/// keeps the true state.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChallengeState {
    #[default]
    None,
    Pending {
        token: String,
        issued_at: DateTime<Utc>,
    },
    Consumed {
        at: DateTime<Utc>,
    },
}

/// One registered public-key credential.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CredentialEntry {
    pub credential_id: String,
    pub public_key: String,
    pub algorithm: String,
    pub sign_count: u32,
    pub aaguid: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CredentialEntry {
    pub fn from_parsed(parsed: &ParsedCredential) -> Self {
        Self {
            credential_id: parsed.credential.id.clone(),
            public_key: parsed.credential.public_key.clone(),
            algorithm: parsed.credential.algorithm.clone(),
            sign_count: parsed.authenticator.counter,
            aaguid: parsed.authenticator.aaguid.clone(),
            created_at: Utc::now(),
        }
    }
}

/// Per-user record, one storage entry per username. Credentials keep their
/// registration order.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UserRecord {
    pub username: String,
    #[serde(default)]
    pub challenge: ChallengeState,
    #[serde(default)]
    pub credentials: Vec<CredentialEntry>,
}

impl UserRecord {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_owned(),
            challenge: ChallengeState::None,
            credentials: Vec::new(),
        }
    }

    /// Issues a fresh single-use challenge token, replacing whatever was
    /// pending before. Returns the new token.
    pub fn issue_challenge(&mut self) -> String {
        let token = Uuid::new_v4().to_string();
        self.challenge = ChallengeState::Pending {
            token: token.clone(),
            issued_at: Utc::now(),
        };
        token
    }

    /// The pending token, if one exists and is younger than `ttl`. A stale
    /// pending token behaves exactly like a consumed one.
    pub fn pending_challenge(&self, ttl: StdDuration) -> Option<&str> {
        match &self.challenge {
            ChallengeState::Pending { token, issued_at } => {
                let ttl = Duration::from_std(ttl).ok()?;
                (Utc::now() - *issued_at <= ttl).then_some(token.as_str())
            }
            _ => None,
        }
    }

    /// Marks the pending challenge as used up. Must happen in the same record
    /// write as the mutation the verification authorized.
    pub fn consume_challenge(&mut self) {
        self.challenge = ChallengeState::Consumed { at: Utc::now() };
    }

    pub fn find_credential(&self, credential_id: &str) -> Option<&CredentialEntry> {
        self.credentials
            .iter()
            .find(|c| c.credential_id == credential_id)
    }

    pub fn find_credential_mut(&mut self, credential_id: &str) -> Option<&mut CredentialEntry> {
        self.credentials
            .iter_mut()
            .find(|c| c.credential_id == credential_id)
    }

    pub fn credential_ids(&self) -> Vec<String> {
        self.credentials
            .iter()
            .map(|c| c.credential_id.clone())
            .collect()
    }
}
