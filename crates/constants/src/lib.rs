//! Option order system constants.
//!
//! This crate contains the deployment addresses of the limit order protocol
//! and the options NFT verifier for each supported chain, and the EIP-712
//! domain names and versions both contracts hash under.
//!

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod chains;
pub use chains::{base, ethereum};

#[cfg(any(test, feature = "test-utils"))]
pub use chains::test_utils;

mod types;
pub use types::{ChainConstants, KnownChains, ParseChainError};

use alloy::primitives::{address, Address};

/// Canonical limit order protocol v4 deployment. The same address is used on
/// every chain the protocol is deployed to.
pub const LIMIT_ORDER_PROTOCOL_V4: Address = address!("0x111111125421cA6dc452d289314280a0f8842A65");

/// EIP-712 domain name of the limit order protocol.
pub const ORDER_DOMAIN_NAME: &str = "1inch Limit Order Protocol";

/// EIP-712 domain version of the limit order protocol.
pub const ORDER_DOMAIN_VERSION: &str = "4";

/// EIP-712 domain name of the options NFT verifier.
pub const OPTION_DOMAIN_NAME: &str = "OptionsNFT";

/// EIP-712 domain version of the options NFT verifier.
pub const OPTION_DOMAIN_VERSION: &str = "1";
