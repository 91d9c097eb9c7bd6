//! EIP-712 domains, hashing and signing for orders and option params.
//!
//! Orders are hashed under an [`OrderDomain`], option params under an
//! [`OptionDomain`]. Each signing function takes only its own domain type.

mod error;
pub use error::SigningError;

mod option;
pub use option::{option_digest, sign_option_params, SignedOptionParams};

mod order;
pub use order::{order_hash, sign_order, SignedOrderHash};

mod signature;
pub use signature::{CompactSignature, EcdsaSignature};

use alloy::primitives::{Address, B256, U256};
use alloy::sol_types::Eip712Domain;
use lop_options_constants::{
    ChainConstants, OPTION_DOMAIN_NAME, OPTION_DOMAIN_VERSION, ORDER_DOMAIN_NAME,
    ORDER_DOMAIN_VERSION,
};

/// Build an EIP-712 domain with a name, version, chain id and verifying
/// contract, and no salt.
pub fn build_domain(
    name: &'static str,
    version: &'static str,
    chain_id: u64,
    verifying_contract: Address,
) -> Eip712Domain {
    Eip712Domain {
        name: Some(name.into()),
        version: Some(version.into()),
        chain_id: Some(U256::from(chain_id)),
        verifying_contract: Some(verifying_contract),
        salt: None,
    }
}

/// The limit order protocol's EIP-712 domain. Orders are signed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDomain(Eip712Domain);

impl OrderDomain {
    /// Domain for the protocol deployed at `limit_order_protocol`.
    pub fn new(chain_id: u64, limit_order_protocol: Address) -> Self {
        Self(build_domain(ORDER_DOMAIN_NAME, ORDER_DOMAIN_VERSION, chain_id, limit_order_protocol))
    }

    /// Domain for the protocol in a set of chain constants.
    pub fn from_constants(constants: &ChainConstants) -> Self {
        Self::new(constants.chain_id(), constants.limit_order_protocol())
    }

    /// Get the underlying domain.
    pub const fn domain(&self) -> &Eip712Domain {
        &self.0
    }

    /// The domain separator.
    pub fn separator(&self) -> B256 {
        self.0.hash_struct()
    }
}

/// The options NFT verifier's EIP-712 domain. Option params are signed
/// under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDomain(Eip712Domain);

impl OptionDomain {
    /// Domain for the verifier deployed at `options_nft`.
    pub fn new(chain_id: u64, options_nft: Address) -> Self {
        Self(build_domain(OPTION_DOMAIN_NAME, OPTION_DOMAIN_VERSION, chain_id, options_nft))
    }

    /// Domain for the verifier in a set of chain constants.
    pub fn from_constants(constants: &ChainConstants) -> Self {
        Self::new(constants.chain_id(), constants.options_nft())
    }

    /// Get the underlying domain.
    pub const fn domain(&self) -> &Eip712Domain {
        &self.0
    }

    /// Address of the verifier.
    pub fn verifier(&self) -> Address {
        self.0.verifying_contract.unwrap_or_default()
    }

    /// The domain separator.
    pub fn separator(&self) -> B256 {
        self.0.hash_struct()
    }
}
