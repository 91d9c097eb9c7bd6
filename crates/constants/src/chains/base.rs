//! Constants for Base mainnet.

use alloy::primitives::Address;

/// Chain ID.
pub const CHAIN_ID: u64 = 8453;
/// Limit order protocol deployment.
pub const LIMIT_ORDER_PROTOCOL: Address = crate::LIMIT_ORDER_PROTOCOL_V4;
