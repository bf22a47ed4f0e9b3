/*
[INPUT]:  Consent message to sign
[OUTPUT]: EIP-191 signature and the address that produced it
[POS]:    Auth layer - signer seam used by consent signing
[UPDATE]: When adding signer backends or changing the signature encoding
*/

use std::sync::Mutex;

use async_trait::async_trait;

use crate::http::Result;

/// Produces the signature sent to `POST /user/verify`.
///
/// Async so that remote or hardware signers fit behind the same seam.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Checksummed address the signature recovers to
    fn address(&self) -> &str;

    /// Personal-sign `message`, returning `0x`-prefixed hex
    async fn sign_message(&self, message: &str) -> Result<String>;
}

/// Signer with a canned signature that remembers what it was asked to sign
#[derive(Debug)]
pub struct MockWalletSigner {
    address: String,
    signature: String,
    signed: Mutex<Vec<String>>,
}

impl MockWalletSigner {
    pub fn new(address: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            signature: signature.into(),
            signed: Mutex::new(Vec::new()),
        }
    }

    /// Messages signed so far, oldest first
    pub fn signed_messages(&self) -> Vec<String> {
        self.signed
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl WalletSigner for MockWalletSigner {
    fn address(&self) -> &str {
        &self.address
    }

    async fn sign_message(&self, message: &str) -> Result<String> {
        if let Ok(mut signed) = self.signed.lock() {
            signed.push(message.to_string());
        }
        Ok(self.signature.clone())
    }
}
