/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Parasail adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    CONSENT_MESSAGE,
    EvmWalletSigner,
    MemorySessionStore,
    MockWalletSigner,
    Session,
    SessionManager,
    SessionState,
    SessionStore,
    WalletSigner,
    build_auth_payload,
    sign_consent,
};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    Credentials,
    DEFAULT_BASE_URL,
    NodeApi,
    ParasailClient,
    ParasailError,
    Result,
};

// Re-export all types
pub use types::*;
