/*
[INPUT]:  Signed consent payload
[OUTPUT]: Bearer token for the node endpoints
[POS]:    HTTP layer - user endpoints (no auth required)
[UPDATE]: When the verify flow changes
*/

use reqwest::Method;

use crate::http::{ParasailClient, Result};
use crate::types::{AuthPayload, VerifyResponse};

impl ParasailClient {
    /// Exchange a signed consent message for a bearer token
    ///
    /// POST /user/verify
    pub async fn verify(&self, payload: &AuthPayload) -> Result<VerifyResponse> {
        let builder = self.request(Method::POST, "/user/verify")?.json(payload);
        self.send_json(builder, "verify").await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, ParasailClient, ParasailError};
    use crate::types::AuthPayload;
    use wiremock::matchers::{body_json, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload() -> AuthPayload {
        AuthPayload {
            address: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string(),
            msg: "consent".to_string(),
            signature: "0xsig".to_string(),
        }
    }

    #[tokio::test]
    async fn test_verify_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/verify"))
            .and(header_exists("accept"))
            .and(body_json(serde_json::json!({
                "address": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
                "msg": "consent",
                "signature": "0xsig",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "jwt-token",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            ParasailClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
                .expect("client init");

        let response = client.verify(&payload()).await.expect("verify failed");
        assert_eq!(response.token, "jwt-token");
    }

    #[tokio::test]
    async fn test_verify_rejection_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/verify"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid signature"))
            .mount(&server)
            .await;

        let client =
            ParasailClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
                .expect("client init");

        let err = client.verify(&payload()).await.unwrap_err();
        match err {
            ParasailError::Api { status, body, .. } => {
                assert_eq!(status, 400);
                assert_eq!(body, "invalid signature");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
