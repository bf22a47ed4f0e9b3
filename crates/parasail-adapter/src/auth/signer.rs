/*
[INPUT]:  Wallet signer (or raw EVM private key)
[OUTPUT]: AuthPayload for POST /user/verify
[POS]:    Auth layer - consent message signing
[UPDATE]: When the server's terms-of-service message changes
*/

use crate::auth::{EvmWalletSigner, WalletSigner};
use crate::http::Result;
use crate::types::AuthPayload;

/// Terms-of-service message the server expects to be signed.
///
/// Must stay byte-identical to the server copy; any drift invalidates every signature.
pub const CONSENT_MESSAGE: &str = "By signing this message, you confirm that you agree to the Parasail Terms of Service.

Parasail (including the Website and Parasail Smart Contracts) is not intended for:
(a) access and/or use by Excluded Persons;
(b) access and/or use by any person or entity in, or accessing or using the Website from, an Excluded Jurisdiction.

Excluded Persons are prohibited from accessing and/or using Parasail (including the Website and Parasail Smart Contracts).

For full terms, refer to: https://parasail.network/Parasail_User_Terms.pdf";

/// Sign the consent message with an arbitrary wallet
pub async fn build_auth_payload(wallet: &dyn WalletSigner) -> Result<AuthPayload> {
    let signature = wallet.sign_message(CONSENT_MESSAGE).await?;
    Ok(AuthPayload {
        address: wallet.address().to_string(),
        msg: CONSENT_MESSAGE.to_string(),
        signature,
    })
}

/// Derive the EVM wallet from `private_key` and sign the consent message
pub async fn sign_consent(private_key: &str) -> Result<AuthPayload> {
    let wallet = EvmWalletSigner::new(private_key)?;
    build_auth_payload(&wallet).await
}
