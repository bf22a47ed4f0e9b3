/*
[INPUT]:  Parasail API response bodies
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - response definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::models::NodeStats;

/// Response of `POST /user/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub token: String,
}

/// Response of `POST /v1/node/onboard`.
///
/// The body is not interpreted; an already-onboarded node still answers 2xx.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OnboardResponse(pub serde_json::Value);

/// Response of `POST /v1/node/check_in`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckInResponse(pub serde_json::Value);

/// Envelope of `GET /v1/node/node_stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeStatsResponse {
    pub data: NodeStats,
}
