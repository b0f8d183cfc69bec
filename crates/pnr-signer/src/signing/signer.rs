use alloy_primitives::{Address, B256};

/// 65-byte recoverable signature: `r || s || v`, with `v` in `{27, 28}`.
pub type RecoverableSignature = [u8; 65];

/// Trait for signing authorization digests under the personal-message
/// convention.
///
/// Implementations are sync; signing is CPU-bound.
/// For async backends (e.g. KMS), use `spawn_blocking`.
pub trait DigestSigner: Send + Sync {
    /// Sign `keccak256("\x19Ethereum Signed Message:\n32" || digest)`.
    fn sign_personal(&self, digest: &B256) -> anyhow::Result<RecoverableSignature>;

    /// Account address derived from the public key.
    fn address(&self) -> Address;
}
