use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use clap::Parser;
use pnr_signer::{
    AppState, Authorizer, DayIdPolicy, DigestSigner, DomainConfig, EthereumSecp256k1Signer,
    SystemClock, address::parse_address, config, run,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    #[clap(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,
    #[clap(long, env = "PORT", default_value = "3000")]
    port: u16,
    /// Hex-encoded secp256k1 key; signing requests fail until it is set.
    #[clap(long, env = "OPERATOR_PK", hide_env_values = true)]
    operator_private_key: Option<String>,
    #[clap(long, env = "PNR_CHAIN_ID", default_value_t = config::DEFAULT_CHAIN_ID)]
    chain_id: u64,
    #[clap(long, env = "PNR_CONTRACT", default_value = "0xcB819189dD53FA65b5b15E979b5D6715752Acef9")]
    contract_address: String,
    #[clap(long, env = "ORIGIN_ALLOW")]
    allowed_origin: Option<String>,
    #[clap(long, env = "PNR_DAY_ID_OVERRIDE", value_enum, default_value = "trust")]
    day_id_override: DayIdPolicy,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let contract = parse_address(&args.contract_address)
        .map_err(|e| anyhow::anyhow!("invalid verifying contract address: {e}"))?;
    let domain = DomainConfig {
        chain_id: args.chain_id,
        contract,
        day_id_policy: args.day_id_override,
    };

    let signer = match args.operator_private_key.as_deref() {
        Some(key) => {
            let signer: Arc<dyn DigestSigner> =
                Arc::new(EthereumSecp256k1Signer::from_hex(key).context("loading OPERATOR_PK")?);
            Some(signer)
        }
        None => {
            tracing::warn!("OPERATOR_PK is not set; signing requests will fail");
            None
        }
    };

    let allowed_origin = args
        .allowed_origin
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()
        .context("ORIGIN_ALLOW is not a valid header value")?;

    let authorizer = Authorizer::new(domain, signer);
    tracing::info!(
        signer = ?authorizer.signer_address(),
        chain_id = authorizer.domain().chain_id,
        contract = %authorizer.domain().contract,
        day_id_override = ?authorizer.domain().day_id_policy,
        "starting pnr signer"
    );

    let state = AppState {
        authorizer: Arc::new(authorizer),
        clock: Arc::new(SystemClock),
        allowed_origin,
    };
    run(args.host, args.port, state).await
}
