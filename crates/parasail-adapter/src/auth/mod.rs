/*
[INPUT]:  Wallet private key, persisted session, and API client
[OUTPUT]: Signed consent payloads and self-healing authenticated sessions
[POS]:    Auth layer - handles Parasail API authentication
[UPDATE]: When auth flow or signature methods change
*/

pub mod evm_wallet;
pub mod manager;
pub mod session;
pub mod signer;
pub mod wallet;

pub use evm_wallet::EvmWalletSigner;
pub use manager::SessionManager;
pub use session::{MemorySessionStore, Session, SessionState, SessionStore};
pub use signer::{CONSENT_MESSAGE, build_auth_payload, sign_consent};
pub use wallet::{MockWalletSigner, WalletSigner};
