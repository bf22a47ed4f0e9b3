/*
[INPUT]:  Wallet address and bearer token
[OUTPUT]: Onboarding, check-in and node statistics results
[POS]:    HTTP layer - node endpoints (require bearer auth)
[UPDATE]: When adding node endpoints or changing request bodies
*/

use reqwest::Method;

use crate::http::{Credentials, ParasailClient, Result};
use crate::types::{AddressRequest, CheckInResponse, NodeStats, NodeStatsResponse, OnboardResponse};

impl ParasailClient {
    /// Register the wallet's node. Safe to repeat.
    ///
    /// POST /v1/node/onboard
    pub async fn onboard(&self, credentials: &Credentials) -> Result<OnboardResponse> {
        let body = AddressRequest::new(credentials.wallet_address.as_str());
        let builder = self
            .request_with_bearer(Method::POST, "/v1/node/onboard", credentials)?
            .json(&body);
        self.send_json(builder, "onboard").await
    }

    /// Daily check-in
    ///
    /// POST /v1/node/check_in
    pub async fn check_in(&self, credentials: &Credentials) -> Result<CheckInResponse> {
        let body = AddressRequest::new(credentials.wallet_address.as_str());
        let builder = self
            .request_with_bearer(Method::POST, "/v1/node/check_in", credentials)?
            .json(&body);
        self.send_json(builder, "check_in").await
    }

    /// Query node statistics
    ///
    /// GET /v1/node/node_stats?address={address}
    pub async fn node_stats(&self, credentials: &Credentials) -> Result<NodeStats> {
        let builder = self
            .request_with_bearer(Method::GET, "/v1/node/node_stats", credentials)?
            .query(&[("address", credentials.wallet_address.as_str())]);
        let response: NodeStatsResponse = self.send_json(builder, "node_stats").await?;
        Ok(response.data)
    }
}
