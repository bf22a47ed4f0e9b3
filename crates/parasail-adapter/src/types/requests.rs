/*
[INPUT]:  Signed consent payloads and wallet addresses
[OUTPUT]: Typed request bodies for the Parasail API
[POS]:    Data layer - request definitions for API communication
[UPDATE]: When request bodies change
*/

use serde::{Deserialize, Serialize};

/// Body of `POST /user/verify`.
///
/// Produced fresh for every authentication attempt and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub address: String,
    pub msg: String,
    pub signature: String,
}

/// Body shared by the node endpoints (`onboard`, `check_in`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRequest {
    pub address: String,
}

impl AddressRequest {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}
