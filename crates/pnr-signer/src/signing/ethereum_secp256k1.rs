use std::fmt;

use alloy_primitives::{Address, B256};
use anyhow::{Result, bail};
use k256::ecdsa::{SigningKey, VerifyingKey};

use super::personal::personal_message_hash;
use super::signer::{DigestSigner, RecoverableSignature};

/// ECDSA signer using the secp256k1 curve with Ethereum-compatible
/// recoverable signatures (65 bytes: r + s + v).
///
/// Nonces follow RFC 6979, so the same digest always yields the same
/// signature. `s` is normalized to the lower half of the curve order and
/// `v` is 27 or 28, which is what `ecrecover` expects.
pub struct EthereumSecp256k1Signer {
    signing_key: SigningKey,
    address: Address,
}

impl EthereumSecp256k1Signer {
    /// Load a 32-byte private key from hex, with or without a `0x` prefix.
    ///
    /// Errors never echo the input.
    pub fn from_hex(private_key: &str) -> Result<Self> {
        let trimmed = private_key.trim();
        let body = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if body.len() != 64 {
            bail!("operator private key must be 32 bytes of hex");
        }
        let mut bytes = [0u8; 32];
        if hex::decode_to_slice(body, &mut bytes).is_err() {
            bail!("operator private key is not valid hex");
        }
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let signing_key = SigningKey::from_slice(bytes)
            .map_err(|_| anyhow::anyhow!("operator private key is not a valid secp256k1 scalar"))?;
        let address = address_of(signing_key.verifying_key());
        Ok(Self { signing_key, address })
    }
}

impl DigestSigner for EthereumSecp256k1Signer {
    fn sign_personal(&self, digest: &B256) -> Result<RecoverableSignature> {
        let prehash = personal_message_hash(digest);
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(prehash.as_slice())
            .map_err(|e| anyhow::anyhow!("ethereum secp256k1 sign_prehash failed: {e}"))?;

        let mut sig_bytes = [0u8; 65];
        sig_bytes[..64].copy_from_slice(&signature.to_bytes());
        sig_bytes[64] = 27 + recovery_id.to_byte();
        Ok(sig_bytes)
    }

    fn address(&self) -> Address {
        self.address
    }
}

impl fmt::Debug for EthereumSecp256k1Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EthereumSecp256k1Signer")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Ethereum address of a public key: last 20 bytes of keccak256(X || Y).
pub fn address_of(verifying_key: &VerifyingKey) -> Address {
    let point = verifying_key.to_encoded_point(false);
    Address::from_raw_public_key(&point.as_bytes()[1..])
}
