use alloy_primitives::{Address, B256};
use anyhow::{Result, bail};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

use super::ethereum_secp256k1::address_of;
use super::personal::personal_message_hash;

/// Recover the address that produced `signature` over `digest` under the
/// personal-message convention.
///
/// Accepts `v` as either 27/28 or the raw 0/1 recovery id.
pub fn recover_signer(digest: &B256, signature: &[u8]) -> Result<Address> {
    if signature.len() != 65 {
        bail!("expected a 65-byte signature, got {} bytes", signature.len());
    }
    let v = match signature[64] {
        v @ (27 | 28) => v - 27,
        v @ (0 | 1) => v,
        other => bail!("unsupported recovery byte {other}"),
    };
    let recovery_id =
        RecoveryId::from_byte(v).ok_or_else(|| anyhow::anyhow!("invalid recovery id {v}"))?;
    let signature = Signature::from_slice(&signature[..64])
        .map_err(|e| anyhow::anyhow!("malformed signature: {e}"))?;

    let prehash = personal_message_hash(digest);
    let verifying_key =
        VerifyingKey::recover_from_prehash(prehash.as_slice(), &signature, recovery_id)
            .map_err(|e| anyhow::anyhow!("public key recovery failed: {e}"))?;
    Ok(address_of(&verifying_key))
}
