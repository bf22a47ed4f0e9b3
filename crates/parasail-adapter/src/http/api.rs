/*
[INPUT]:  Auth payloads and credentials
[OUTPUT]: Async abstraction over the four Parasail operations
[POS]:    HTTP layer - seam between the session manager and the transport
[UPDATE]: When adding operations the session manager drives
*/

use async_trait::async_trait;

use crate::http::{Credentials, ParasailClient, Result};
use crate::types::{AuthPayload, CheckInResponse, NodeStats, OnboardResponse, VerifyResponse};

/// Remote operations driven by [`crate::SessionManager`].
///
/// Implementations must report an expired token as
/// [`crate::ParasailError::Unauthorized`].
#[async_trait]
pub trait NodeApi: Send + Sync {
    async fn verify(&self, payload: &AuthPayload) -> Result<VerifyResponse>;

    async fn onboard(&self, credentials: &Credentials) -> Result<OnboardResponse>;

    async fn check_in(&self, credentials: &Credentials) -> Result<CheckInResponse>;

    async fn node_stats(&self, credentials: &Credentials) -> Result<NodeStats>;
}

#[async_trait]
impl NodeApi for ParasailClient {
    async fn verify(&self, payload: &AuthPayload) -> Result<VerifyResponse> {
        ParasailClient::verify(self, payload).await
    }

    async fn onboard(&self, credentials: &Credentials) -> Result<OnboardResponse> {
        ParasailClient::onboard(self, credentials).await
    }

    async fn check_in(&self, credentials: &Credentials) -> Result<CheckInResponse> {
        ParasailClient::check_in(self, credentials).await
    }

    async fn node_stats(&self, credentials: &Credentials) -> Result<NodeStats> {
        ParasailClient::node_stats(self, credentials).await
    }
}
