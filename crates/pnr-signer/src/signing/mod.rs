mod signer;
mod personal;
mod ethereum_secp256k1;
mod recover;

use alloy_primitives::{Address, B256};

use crate::error::SignerError;

pub use signer::{DigestSigner, RecoverableSignature};
pub use personal::{PERSONAL_MESSAGE_PREFIX, personal_message_hash};
pub use ethereum_secp256k1::{EthereumSecp256k1Signer, address_of};
pub use recover::recover_signer;

/// A signature together with the address that can be recovered from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedDigest {
    pub signature: RecoverableSignature,
    pub signer: Address,
}

/// Sign `digest` with the configured identity.
///
/// Without an identity nothing is signed and `SigningUnavailable` is returned.
pub fn sign(digest: &B256, identity: Option<&dyn DigestSigner>) -> Result<SignedDigest, SignerError> {
    let identity = identity.ok_or(SignerError::SigningUnavailable)?;
    let signature = identity
        .sign_personal(digest)
        .map_err(|e| SignerError::InternalFailure(e.to_string()))?;
    Ok(SignedDigest {
        signature,
        signer: identity.address(),
    })
}
