/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod api;
pub mod client;
pub mod error;
pub mod node;
pub mod user;

pub use error::{ParasailError, Result};

pub use api::NodeApi;
pub use client::{ClientConfig, Credentials, DEFAULT_BASE_URL, ParasailClient};
