//! Relayer configuration loaded from the environment.
//!
//! [`RelayerConfig::from_env`] reads the `OPTIONS_*` variables. The loaders
//! in this module treat an empty variable as unset.

mod env_utils;
pub use env_utils::{
    load_address, load_address_opt, load_string, load_string_opt, load_u64, load_u64_opt,
};

mod error;
pub use error::ConfigError;

use crate::signing::{OptionDomain, OrderDomain};
use lop_options_constants::{ChainConstants, KnownChains, LIMIT_ORDER_PROTOCOL_V4};
use std::time::Duration;

/// Known chain name.
pub const CHAIN: &str = "OPTIONS_CHAIN";
/// Chain id, used when [`CHAIN`] is unset.
pub const CHAIN_ID: &str = "OPTIONS_CHAIN_ID";
/// Limit order protocol address override.
pub const LOP_ADDRESS: &str = "OPTIONS_LOP_ADDRESS";
/// Options NFT verifier address.
pub const NFT_ADDRESS: &str = "OPTIONS_NFT_ADDRESS";
/// RPC endpoint.
pub const RPC_URL: &str = "OPTIONS_RPC_URL";
/// Salt search attempt budget.
pub const MAX_SALT_ATTEMPTS: &str = "OPTIONS_MAX_SALT_ATTEMPTS";
/// Per-call verifier timeout in milliseconds.
pub const VERIFIER_TIMEOUT_MS: &str = "OPTIONS_VERIFIER_TIMEOUT_MS";
/// Per-call signing timeout in milliseconds.
pub const SIGNING_TIMEOUT_MS: &str = "OPTIONS_SIGNING_TIMEOUT_MS";

/// Default salt search attempt budget.
pub const DEFAULT_MAX_SALT_ATTEMPTS: u32 = 10;
/// Default per-call verifier timeout.
pub const DEFAULT_VERIFIER_TIMEOUT: Duration = Duration::from_millis(5_000);
/// Default per-call signing timeout. Remote signers may need a human to
/// confirm.
pub const DEFAULT_SIGNING_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Relayer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayerConfig {
    /// Deployment constants.
    constants: ChainConstants,
    /// RPC endpoint for the verifier.
    rpc_url: Option<String>,
    /// Salt search attempt budget.
    max_salt_attempts: u32,
    /// Per-call verifier timeout.
    verifier_timeout: Duration,
    /// Per-call signing timeout.
    signing_timeout: Duration,
}

impl RelayerConfig {
    /// Configuration for `constants` with default limits and no RPC
    /// endpoint.
    pub const fn new(constants: ChainConstants) -> Self {
        Self {
            constants,
            rpc_url: None,
            max_salt_attempts: DEFAULT_MAX_SALT_ATTEMPTS,
            verifier_timeout: DEFAULT_VERIFIER_TIMEOUT,
            signing_timeout: DEFAULT_SIGNING_TIMEOUT,
        }
    }

    /// Load the configuration from the environment.
    ///
    /// `OPTIONS_NFT_ADDRESS` is always required. The chain comes from
    /// `OPTIONS_CHAIN` if set, otherwise from `OPTIONS_CHAIN_ID`, in which
    /// case the limit order protocol defaults to the canonical v4
    /// deployment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let options_nft = load_address(NFT_ADDRESS)?;

        let mut constants = match load_string_opt(CHAIN) {
            Some(name) => ChainConstants::for_known_chain(name.parse::<KnownChains>()?, options_nft),
            None => ChainConstants::new(load_u64(CHAIN_ID)?, LIMIT_ORDER_PROTOCOL_V4, options_nft),
        };
        if let Some(lop) = load_address_opt(LOP_ADDRESS)? {
            constants = constants.with_limit_order_protocol(lop);
        }

        let max_salt_attempts = match load_u64_opt(MAX_SALT_ATTEMPTS)? {
            Some(0) => {
                return Err(ConfigError::OutOfRange {
                    key: MAX_SALT_ATTEMPTS,
                    reason: "must be at least 1",
                })
            }
            Some(n) => u32::try_from(n).map_err(|_| ConfigError::OutOfRange {
                key: MAX_SALT_ATTEMPTS,
                reason: "must fit in 32 bits",
            })?,
            None => DEFAULT_MAX_SALT_ATTEMPTS,
        };

        let verifier_timeout = load_u64_opt(VERIFIER_TIMEOUT_MS)?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_VERIFIER_TIMEOUT);
        let signing_timeout = load_u64_opt(SIGNING_TIMEOUT_MS)?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SIGNING_TIMEOUT);

        Ok(Self {
            constants,
            rpc_url: load_string_opt(RPC_URL),
            max_salt_attempts,
            verifier_timeout,
            signing_timeout,
        })
    }

    /// Set the RPC endpoint.
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = Some(rpc_url.into());
        self
    }

    /// Set the salt search attempt budget.
    pub const fn with_max_salt_attempts(mut self, max_salt_attempts: u32) -> Self {
        self.max_salt_attempts = max_salt_attempts;
        self
    }

    /// Set the per-call verifier timeout.
    pub const fn with_verifier_timeout(mut self, verifier_timeout: Duration) -> Self {
        self.verifier_timeout = verifier_timeout;
        self
    }

    /// Set the per-call signing timeout.
    pub const fn with_signing_timeout(mut self, signing_timeout: Duration) -> Self {
        self.signing_timeout = signing_timeout;
        self
    }

    /// Get the deployment constants.
    pub const fn constants(&self) -> &ChainConstants {
        &self.constants
    }

    /// Get the RPC endpoint.
    pub fn rpc_url(&self) -> Option<&str> {
        self.rpc_url.as_deref()
    }

    /// Get the salt search attempt budget.
    pub const fn max_salt_attempts(&self) -> u32 {
        self.max_salt_attempts
    }

    /// Get the per-call verifier timeout.
    pub const fn verifier_timeout(&self) -> Duration {
        self.verifier_timeout
    }

    /// Get the per-call signing timeout.
    pub const fn signing_timeout(&self) -> Duration {
        self.signing_timeout
    }

    /// The limit order protocol's EIP-712 domain.
    pub fn order_domain(&self) -> OrderDomain {
        OrderDomain::from_constants(&self.constants)
    }

    /// The options NFT verifier's EIP-712 domain.
    pub fn option_domain(&self) -> OptionDomain {
        OptionDomain::from_constants(&self.constants)
    }
}
