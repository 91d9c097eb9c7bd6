//! Fixtures for option order tests.

use crate::{mocks::MockOptionVerifier, test_constants};
use alloy::{primitives::U256, signers::local::PrivateKeySigner};
use chrono::Utc;
use lop_options_constants::ChainConstants;
use lop_options_orders::{
    HashManagerOptions, KeccakSaltGenerator, OptionOrderBuilder, OrderHashManager, SaltGenerator,
};
use lop_options_types::{signing::OptionDomain, OptionTerms};
use std::time::Duration;

/// One day in seconds.
pub const DAY: u64 = 86_400;

/// The current unix time in seconds.
pub fn now() -> u64 {
    Utc::now().timestamp() as u64
}

/// A 2000 USDC strike call on 1 WETH for a 50 USDC premium, expiring at
/// `expiry`.
pub fn option_terms(expiry: u64) -> OptionTerms {
    OptionTerms {
        underlying_asset: test_constants::WETH,
        strike_asset: test_constants::USDC,
        strike_price: U256::from(2_000_000_000u64),
        option_amount: U256::from(10u64).pow(U256::from(18)),
        premium: U256::from(50_000_000u64),
        expiry,
    }
}

/// [`option_terms`] expiring a day from now.
pub fn fresh_terms() -> OptionTerms {
    option_terms(now() + DAY)
}

/// The test option domain.
pub fn option_domain() -> OptionDomain {
    OptionDomain::from_constants(&ChainConstants::test())
}

/// A verifier with nothing consumed, under the test domain.
pub fn verifier() -> MockOptionVerifier {
    MockOptionVerifier::new(option_domain())
}

/// Hash manager options for tests: no delay between attempts, short
/// timeout.
pub const fn test_options() -> HashManagerOptions {
    HashManagerOptions::new()
        .with_retry_delay(Duration::ZERO)
        .with_verifier_timeout(Duration::from_millis(200))
}

/// A hash manager over `verifier` with a custom salt generator.
pub fn hash_manager_with<G>(
    verifier: MockOptionVerifier,
    generator: G,
) -> OrderHashManager<MockOptionVerifier, G> {
    OrderHashManager::with_generator(verifier, generator, option_domain(), test_options())
}

/// A hash manager over `verifier` with the default salt generator.
pub fn hash_manager(
    verifier: MockOptionVerifier,
) -> OrderHashManager<MockOptionVerifier, KeccakSaltGenerator> {
    hash_manager_with(verifier, KeccakSaltGenerator::new())
}

/// A builder for `signer` on the test chain.
pub fn builder<G: SaltGenerator>(
    signer: PrivateKeySigner,
    hash_manager: OrderHashManager<MockOptionVerifier, G>,
) -> OptionOrderBuilder<PrivateKeySigner, MockOptionVerifier, G> {
    OptionOrderBuilder::new(signer, hash_manager, ChainConstants::test())
}
