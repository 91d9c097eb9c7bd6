mod chains;
pub use chains::{KnownChains, ParseChainError};

use alloy::primitives::Address;

/// Deployment constants for a single chain.
///
/// Two contracts take part in an option fill: the limit order protocol, which
/// verifies the order signature and moves the premium, and the options NFT
/// verifier, which verifies the option signature from the taker interaction,
/// consumes the option digest and mints the position. Each contract is also
/// the `verifyingContract` of its own EIP-712 domain.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConstants {
    /// Chain ID.
    chain_id: u64,
    /// Limit order protocol address.
    limit_order_protocol: Address,
    /// Options NFT verifier address.
    options_nft: Address,
}

impl core::fmt::Display for ChainConstants {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{{ chainId: {}, limitOrderProtocol: {}, optionsNft: {} }}",
            self.chain_id, self.limit_order_protocol, self.options_nft
        )
    }
}

impl ChainConstants {
    /// Create a new set of constants.
    pub const fn new(chain_id: u64, limit_order_protocol: Address, options_nft: Address) -> Self {
        Self { chain_id, limit_order_protocol, options_nft }
    }

    /// Constants for a known chain, with the options NFT deployed at
    /// `options_nft`.
    pub const fn for_known_chain(chain: KnownChains, options_nft: Address) -> Self {
        Self::new(chain.chain_id(), chain.limit_order_protocol(), options_nft)
    }

    /// Get the hard-coded local test constants.
    #[cfg(any(test, feature = "test-utils"))]
    pub const fn test() -> Self {
        crate::chains::test_utils::TEST_CONSTANTS
    }

    /// Get the chain ID.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Get the limit order protocol address.
    pub const fn limit_order_protocol(&self) -> Address {
        self.limit_order_protocol
    }

    /// Get the options NFT verifier address.
    pub const fn options_nft(&self) -> Address {
        self.options_nft
    }

    /// Replace the options NFT verifier address.
    pub const fn with_options_nft(self, options_nft: Address) -> Self {
        Self { options_nft, ..self }
    }

    /// Replace the limit order protocol address.
    pub const fn with_limit_order_protocol(self, limit_order_protocol: Address) -> Self {
        Self { limit_order_protocol, ..self }
    }
}
