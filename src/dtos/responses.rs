use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginChallengeData {
    pub challenge: String,
    pub credential_ids: Vec<String>,
}
