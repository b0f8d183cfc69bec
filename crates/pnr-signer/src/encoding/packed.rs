use alloy_primitives::{Address, B256, U256, keccak256};

/// Domain-separation literal leading every packed payload.
pub const DOMAIN_TAG: &str = "DreamPlayPNR:";

/// Field widths in packed order.
pub const CHAIN_ID_WIDTH: usize = 32;
pub const ADDRESS_WIDTH: usize = 20;
pub const DAY_ID_WIDTH: usize = 4;
pub const CONTENT_ID_WIDTH: usize = 32;
pub const EXPIRES_AT_WIDTH: usize = 8;

pub const PACKED_LEN: usize = DOMAIN_TAG.len()
    + CHAIN_ID_WIDTH
    + ADDRESS_WIDTH
    + ADDRESS_WIDTH
    + DAY_ID_WIDTH
    + CONTENT_ID_WIDTH
    + EXPIRES_AT_WIDTH;

/// The fields covered by an authorization digest.
///
/// Packs to the same bytes as Solidity
/// `abi.encodePacked(string, uint256, address, address, uint32, bytes32, uint64)`:
/// no length prefixes, no padding except the chain id which is a full
/// 32-byte word. Order and widths are shared with the on-chain verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationFields {
    pub chain_id: u64,
    pub contract: Address,
    pub user: Address,
    pub day_id: u32,
    pub content_id_hash: B256,
    pub expires_at: u64,
}

impl AuthorizationFields {
    pub fn encode_packed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PACKED_LEN);
        out.extend_from_slice(DOMAIN_TAG.as_bytes());
        out.extend_from_slice(&U256::from(self.chain_id).to_be_bytes::<CHAIN_ID_WIDTH>());
        out.extend_from_slice(self.contract.as_slice());
        out.extend_from_slice(self.user.as_slice());
        out.extend_from_slice(&self.day_id.to_be_bytes());
        out.extend_from_slice(self.content_id_hash.as_slice());
        out.extend_from_slice(&self.expires_at.to_be_bytes());
        debug_assert_eq!(out.len(), PACKED_LEN);
        out
    }

    /// keccak256 of the packed payload.
    pub fn digest(&self) -> B256 {
        keccak256(self.encode_packed())
    }
}

/// keccak256 of a content identifier's UTF-8 bytes.
pub fn content_id_hash(content_id: &str) -> B256 {
    keccak256(content_id.as_bytes())
}
