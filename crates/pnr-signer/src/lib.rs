pub mod address;
pub mod authorize;
pub mod config;
pub mod digest;
pub mod encoding;
pub mod error;
pub mod server;
pub mod signing;
pub mod window;

pub use authorize::{Authorization, Authorizer};
pub use config::{DayIdPolicy, DomainConfig};
pub use digest::{BuiltDigest, DigestBuilder, SigningRequest};
pub use error::SignerError;
pub use server::{AppState, router, run};
pub use signing::{DigestSigner, EthereumSecp256k1Signer, recover_signer};
pub use window::{Clock, FixedClock, SystemClock};
