/*
[INPUT]:  EVM private key (hex string)
[OUTPUT]: Personal-sign signatures and checksummed wallet address
[POS]:    Auth layer - EVM wallet implementation
[UPDATE]: When signing logic or EVM address formatting changes
*/

use std::str::FromStr;

use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;

use crate::auth::WalletSigner;
use crate::http::{ParasailError, Result};

/// Signer for EVM wallets
pub struct EvmWalletSigner {
    signer: PrivateKeySigner,
    address: String,
}

impl EvmWalletSigner {
    /// Create a new EVM wallet signer from a hex-encoded private key
    ///
    /// Supports both "0x"-prefixed and non-prefixed hex strings.
    pub fn new(private_key_hex: &str) -> Result<Self> {
        let private_key_hex = private_key_hex.trim();
        let private_key_hex = private_key_hex
            .strip_prefix("0x")
            .or_else(|| private_key_hex.strip_prefix("0X"))
            .unwrap_or(private_key_hex);
        let signer = PrivateKeySigner::from_str(private_key_hex)
            .map_err(|e| ParasailError::Signing(format!("Invalid EVM private key: {e}")))?;

        let address = signer.address().to_checksum(None);

        Ok(Self { signer, address })
    }
}

impl std::fmt::Debug for EvmWalletSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmWalletSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WalletSigner for EvmWalletSigner {
    fn address(&self) -> &str {
        &self.address
    }

    async fn sign_message(&self, message: &str) -> Result<String> {
        let signature = self
            .signer
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| ParasailError::Signing(format!("Failed to sign EVM message: {e}")))?;

        // alloy's Signature as_bytes() returns [r, s, v]
        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known development key (anvil/hardhat account #0)
    const PK: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[tokio::test]
    async fn test_evm_wallet_signer() {
        let signer = EvmWalletSigner::new(PK).unwrap();

        assert_eq!(signer.address(), "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

        let signature = signer.sign_message("hello").await.unwrap();

        assert!(signature.starts_with("0x"));
        assert_eq!(signature.len(), 132); // 0x + 65 bytes * 2 = 132
    }

    #[tokio::test]
    async fn test_evm_signature_is_deterministic() {
        let signer = EvmWalletSigner::new(PK).unwrap();
        let first = signer.sign_message("hello").await.unwrap();
        let second = signer.sign_message("hello").await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_evm_wallet_signer_no_prefix() {
        let pk = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        let signer = EvmWalletSigner::new(pk).unwrap();
        assert_eq!(signer.address(), "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    }

    #[test]
    fn test_malformed_key_is_signing_error() {
        let err = EvmWalletSigner::new("0xnot-a-key").unwrap_err();
        assert!(matches!(err, ParasailError::Signing(_)));

        let err = EvmWalletSigner::new("").unwrap_err();
        assert!(matches!(err, ParasailError::Signing(_)));
    }
}
