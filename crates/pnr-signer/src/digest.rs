use alloy_primitives::{Address, B256};

use crate::address::parse_address;
use crate::config::{DayIdPolicy, DomainConfig};
use crate::encoding::{AuthorizationFields, content_id_hash};
use crate::error::SignerError;
use crate::window;

/// Prefix of the content identifier used when the caller names none.
pub const DEFAULT_CONTENT_PREFIX: &str = "PNR:";

/// A request for a time-boxed authorization, already coerced from the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SigningRequest {
    pub user: String,
    pub expires_in_sec: Option<u64>,
    pub day_id: Option<u64>,
    pub video_id: Option<String>,
}

/// Everything derived for one request, including the digest to sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltDigest {
    pub user: Address,
    pub day_id: u32,
    pub content_id: String,
    pub content_id_hash: B256,
    pub expires_at: u64,
    pub digest: B256,
}

/// Derives identifiers and the domain-separated digest for a request.
///
/// Pure: the output depends only on the request, `now`, and the domain
/// constants it was built with.
#[derive(Debug, Clone)]
pub struct DigestBuilder {
    domain: DomainConfig,
}

impl DigestBuilder {
    pub fn new(domain: DomainConfig) -> Self {
        Self { domain }
    }

    pub fn domain(&self) -> &DomainConfig {
        &self.domain
    }

    pub fn build(&self, request: &SigningRequest, now: u64) -> Result<BuiltDigest, SignerError> {
        let user = parse_address(&request.user)?;
        let day_id = self.resolve_day_id(request.day_id, now)?;

        let content_id = match request.video_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("{DEFAULT_CONTENT_PREFIX}{}", window::utc_date_label(now)?),
        };
        let content_id_hash = content_id_hash(&content_id);

        let expires_at = now
            .checked_add(window::clamp_expires_in(request.expires_in_sec))
            .ok_or_else(|| SignerError::InternalFailure("expiry overflows u64".to_string()))?;

        let fields = AuthorizationFields {
            chain_id: self.domain.chain_id,
            contract: self.domain.contract,
            user,
            day_id,
            content_id_hash,
            expires_at,
        };

        Ok(BuiltDigest {
            user,
            day_id,
            content_id,
            content_id_hash,
            expires_at,
            digest: fields.digest(),
        })
    }

    fn resolve_day_id(&self, supplied: Option<u64>, now: u64) -> Result<u32, SignerError> {
        let computed = window::day_id(now);
        let Some(supplied) = supplied else {
            return u32::try_from(computed).map_err(|_| {
                SignerError::InternalFailure(format!("day id {computed} exceeds uint32"))
            });
        };

        if self.domain.day_id_policy == DayIdPolicy::Reject && supplied != computed {
            return Err(SignerError::InvalidDayId(format!(
                "supplied day id {supplied} does not match current day {computed}"
            )));
        }

        u32::try_from(supplied)
            .map_err(|_| SignerError::InvalidDayId(format!("day id {supplied} exceeds uint32")))
    }
}
