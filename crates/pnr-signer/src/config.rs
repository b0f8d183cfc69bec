use alloy_primitives::{Address, address};
use clap::ValueEnum;

pub const DEFAULT_CHAIN_ID: u64 = 137;
pub const DEFAULT_CONTRACT: Address = address!("cB819189dD53FA65b5b15E979b5D6715752Acef9");

/// How a caller-supplied `dayId` is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DayIdPolicy {
    /// Use the supplied value verbatim.
    #[default]
    Trust,
    /// Accept the supplied value only when it equals the server's bucket.
    Reject,
}

/// Verifier-side constants baked into every digest. Never request-controlled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainConfig {
    pub chain_id: u64,
    pub contract: Address,
    pub day_id_policy: DayIdPolicy,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            contract: DEFAULT_CONTRACT,
            day_id_policy: DayIdPolicy::default(),
        }
    }
}
