//! Constants for local test chains.

use crate::ChainConstants;
use alloy::primitives::Address;

/// Test chain ID.
pub const CHAIN_ID: u64 = 31337;
/// Test address for the limit order protocol.
pub const LIMIT_ORDER_PROTOCOL: Address = Address::repeat_byte(0x11);
/// Test address for the options NFT verifier.
pub const OPTIONS_NFT: Address = Address::repeat_byte(0x22);

/// Test address for the underlying asset (18 decimals).
pub const WETH: Address = Address::repeat_byte(0x33);
/// Test address for the strike asset (6 decimals).
pub const USDC: Address = Address::repeat_byte(0x44);

/// Test constants.
pub const TEST_CONSTANTS: ChainConstants =
    ChainConstants::new(CHAIN_ID, LIMIT_ORDER_PROTOCOL, OPTIONS_NFT);
