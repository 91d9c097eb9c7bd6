use alloy::primitives::Address;
use std::str::FromStr;

/// The list of known chains as a string.
#[cfg(not(any(test, feature = "test-utils")))]
const KNOWN_CHAINS: &str = "ethereum, base";
#[cfg(any(test, feature = "test-utils"))]
const KNOWN_CHAINS: &str = "ethereum, base, test";

/// Error type for parsing struct from a chain name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseChainError {
    /// The chain name is not supported.
    #[error("chain name {0} is not parseable. supported chains: {KNOWN_CHAINS}")]
    ChainNotSupported(String),
}

/// Chains with a known limit order protocol deployment.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KnownChains {
    /// Ethereum mainnet.
    Ethereum,
    /// Base mainnet.
    Base,
    /// Local test chain.
    #[cfg(any(test, feature = "test-utils"))]
    Test,
}

impl KnownChains {
    /// Chain ID of the chain.
    pub const fn chain_id(self) -> u64 {
        match self {
            Self::Ethereum => crate::ethereum::CHAIN_ID,
            Self::Base => crate::base::CHAIN_ID,
            #[cfg(any(test, feature = "test-utils"))]
            Self::Test => crate::test_utils::CHAIN_ID,
        }
    }

    /// Limit order protocol deployment on the chain.
    pub const fn limit_order_protocol(self) -> Address {
        match self {
            Self::Ethereum => crate::ethereum::LIMIT_ORDER_PROTOCOL,
            Self::Base => crate::base::LIMIT_ORDER_PROTOCOL,
            #[cfg(any(test, feature = "test-utils"))]
            Self::Test => crate::test_utils::LIMIT_ORDER_PROTOCOL,
        }
    }
}

impl FromStr for KnownChains {
    type Err = ParseChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            #[cfg(any(test, feature = "test-utils"))]
            "test" => Ok(Self::Test),
            "ethereum" | "mainnet" => Ok(Self::Ethereum),
            "base" => Ok(Self::Base),
            _ => Err(ParseChainError::ChainNotSupported(s)),
        }
    }
}
