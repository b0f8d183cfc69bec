use alloy_primitives::{B256, keccak256};

/// EIP-191 version `0x45` prefix; the payload length follows in decimal.
pub const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Hash a 32-byte digest the way `personal_sign` / `signMessage(bytes)` does.
pub fn personal_message_hash(digest: &B256) -> B256 {
    let length = digest.len().to_string();
    let mut message =
        Vec::with_capacity(PERSONAL_MESSAGE_PREFIX.len() + length.len() + digest.len());
    message.extend_from_slice(PERSONAL_MESSAGE_PREFIX.as_bytes());
    message.extend_from_slice(length.as_bytes());
    message.extend_from_slice(digest.as_slice());
    keccak256(message)
}
