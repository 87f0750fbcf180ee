use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct VerificationTestRequest {
    /// Question id ("q1".."q5") -> chosen option, as stringified index.
    pub answers: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct VerificationTestResponse {
    pub passed: bool,
    pub score: i32,
}
