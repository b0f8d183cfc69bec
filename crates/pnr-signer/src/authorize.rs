use std::sync::Arc;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::config::DomainConfig;
use crate::digest::{DigestBuilder, SigningRequest};
use crate::error::SignerError;
use crate::signing::{self, DigestSigner};
use crate::window;

/// A signed authorization, in the shape clients and the contract expect.
///
/// Hashes and the signature are `0x`-prefixed lowercase hex; addresses are
/// EIP-55 checksummed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    pub day_id: u32,
    pub video_id_str: String,
    pub video_id_bytes32: String,
    pub expires_at: u64,
    pub digest: String,
    pub sig: String,
    pub signer: String,
    pub contract: String,
    pub chain_id: u64,
}

/// Builds digests and signs them with the operator identity.
///
/// The identity is fixed at construction and only read afterwards, so one
/// `Authorizer` can serve any number of concurrent requests.
pub struct Authorizer {
    builder: DigestBuilder,
    signer: Option<Arc<dyn DigestSigner>>,
}

impl Authorizer {
    pub fn new(domain: DomainConfig, signer: Option<Arc<dyn DigestSigner>>) -> Self {
        Self {
            builder: DigestBuilder::new(domain),
            signer,
        }
    }

    pub fn domain(&self) -> &DomainConfig {
        self.builder.domain()
    }

    pub fn signer_address(&self) -> Option<Address> {
        self.signer.as_ref().map(|signer| signer.address())
    }

    pub fn authorize(&self, request: &SigningRequest, now: u64) -> Result<Authorization, SignerError> {
        let identity = self.signer.as_deref().ok_or(SignerError::SigningUnavailable)?;

        let built = self.builder.build(request, now)?;
        if request.day_id.is_some() && u64::from(built.day_id) != window::day_id(now) {
            tracing::warn!(
                user = %built.user,
                day_id = built.day_id,
                current_day_id = window::day_id(now),
                "caller-supplied day id differs from current day"
            );
        }

        let signed = signing::sign(&built.digest, Some(identity))?;

        tracing::info!(
            user = %built.user,
            day_id = built.day_id,
            expires_at = built.expires_at,
            digest = %built.digest,
            "issued authorization"
        );

        let domain = self.builder.domain();
        Ok(Authorization {
            day_id: built.day_id,
            video_id_str: built.content_id,
            video_id_bytes32: to_prefixed_hex(built.content_id_hash),
            expires_at: built.expires_at,
            digest: to_prefixed_hex(built.digest),
            sig: to_prefixed_hex(signed.signature),
            signer: signed.signer.to_checksum(None),
            contract: domain.contract.to_checksum(None),
            chain_id: domain.chain_id,
        })
    }
}

fn to_prefixed_hex(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}
