/// Ethereum mainnet constants.
pub mod ethereum;

/// Base mainnet constants.
pub mod base;

/// Test utilities for chains.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
