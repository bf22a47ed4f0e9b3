/*
[INPUT]:  HTTP configuration (base URL, timeouts) and per-request credentials
[OUTPUT]: Configured reqwest client and classified API responses
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing response classification
*/

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::http::{ParasailError, Result};

/// Base URL for the Parasail API
pub const DEFAULT_BASE_URL: &str = "https://www.parasail.network/api";

const ACCEPT_VALUE: &str = "application/json, text/plain, */*";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Credentials for one authenticated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub bearer_token: String,
    pub wallet_address: String,
}

/// HTTP client for the Parasail node API
#[derive(Debug, Clone)]
pub struct ParasailClient {
    http_client: Client,
    base_url: Url,
}

impl ParasailClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a new client against an explicit base URL
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for an endpoint relative to the base path
    fn url(&self, endpoint: &str) -> std::result::Result<Url, url::ParseError> {
        self.base_url.join(endpoint.trim_start_matches('/'))
    }

    /// Build an unauthenticated request
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        Ok(self
            .http_client
            .request(method, url)
            .header(ACCEPT, ACCEPT_VALUE))
    }

    /// Build a request carrying the bearer token
    pub(crate) fn request_with_bearer(
        &self,
        method: Method,
        endpoint: &str,
        credentials: &Credentials,
    ) -> Result<RequestBuilder> {
        Ok(self
            .request(method, endpoint)?
            .bearer_auth(&credentials.bearer_token))
    }

    /// Send a request and decode a JSON body.
    ///
    /// 401 is classified before any other status so callers can re-authenticate.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        operation: &'static str,
    ) -> Result<T> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(operation, error = %err, "no response received");
                return Err(ParasailError::Http(err));
            }
        };

        let status = response.status();
        let headers = render_headers(response.headers());
        let body = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            tracing::debug!(operation, body = %body, "request rejected as unauthorized");
            return Err(ParasailError::Unauthorized { body });
        }

        if !status.is_success() {
            tracing::warn!(
                operation,
                status = status.as_u16(),
                body = %body,
                headers = %headers,
                "request failed"
            );
            return Err(ParasailError::api_error(status, body, headers));
        }

        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(body).map_err(|err| {
            tracing::warn!(operation, error = %err, "response body could not be decoded");
            ParasailError::Serialization(err)
        })
    }
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    // Url::join drops the last path segment unless the base ends with '/'.
    let normalized = format!("{}/", base_url.trim_end_matches('/'));
    Ok(Url::parse(&normalized)?)
}

fn render_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value.to_str().unwrap_or("<binary>")))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls_keep_base_path() {
        let client = ParasailClient::new().unwrap();
        assert_eq!(
            client.url("/user/verify").unwrap().as_str(),
            "https://www.parasail.network/api/user/verify"
        );
        assert_eq!(
            client.url("v1/node/check_in").unwrap().as_str(),
            "https://www.parasail.network/api/v1/node/check_in"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = ParasailClient::with_config_and_base_url(
            ClientConfig::default(),
            "http://127.0.0.1:9000/api/",
        )
        .unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:9000/api/");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = ParasailClient::with_config_and_base_url(ClientConfig::default(), "not a url")
            .unwrap_err();
        assert!(matches!(err, ParasailError::UrlParse(_)));
    }
}
