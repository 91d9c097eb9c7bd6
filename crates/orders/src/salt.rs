use alloy::{
    primitives::{keccak256, Address, U256},
    sol_types::SolValue,
};
use chrono::Utc;
use lop_options_types::OptionTerms;

/// Proposes candidate option salts.
///
/// A salt is only a candidate. Whether its digest is unused is decided by
/// the verifier, see [`OrderHashManager::find_available_salt`].
///
/// [`OrderHashManager::find_available_salt`]: crate::OrderHashManager::find_available_salt
pub trait SaltGenerator {
    /// Propose a salt for the `attempt`-th try at an option.
    fn generate(&self, maker: Address, terms: &OptionTerms, attempt: u32) -> U256;

    /// Propose a single salt.
    fn generate_salt(&self, maker: Address, terms: &OptionTerms) -> U256 {
        self.generate(maker, terms, 0)
    }

    /// Propose `count` salts, varying the attempt counter. The result is not
    /// deduplicated.
    fn generate_multiple(&self, maker: Address, terms: &OptionTerms, count: u32) -> Vec<U256> {
        (0..count).map(|attempt| self.generate(maker, terms, attempt)).collect()
    }
}

/// Derives salts by hashing the option with the current time and random
/// entropy, keeping the first four bytes of the hash.
///
/// Salts fall in the `u32` range. Collisions are rare but possible, so
/// every salt must be checked against the verifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeccakSaltGenerator;

impl KeccakSaltGenerator {
    /// Instantiate a new generator.
    pub const fn new() -> Self {
        Self
    }
}

impl SaltGenerator for KeccakSaltGenerator {
    fn generate(&self, maker: Address, terms: &OptionTerms, attempt: u32) -> U256 {
        let millis = Utc::now().timestamp_millis().unsigned_abs();
        let entropy = rand::random::<u64>();

        let preimage = (
            maker,
            terms.underlying_asset,
            terms.strike_asset,
            terms.strike_price,
            U256::from(terms.expiry),
            terms.option_amount,
            U256::from(millis) + U256::from(attempt),
            U256::from(entropy),
        )
            .abi_encode();

        let hash = keccak256(preimage);
        let prefix = [hash[0], hash[1], hash[2], hash[3]];
        U256::from(u32::from_be_bytes(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn terms() -> OptionTerms {
        OptionTerms {
            underlying_asset: Address::repeat_byte(0x33),
            strike_asset: Address::repeat_byte(0x44),
            strike_price: U256::from(2_000_000_000u64),
            option_amount: U256::from(10u64).pow(U256::from(18)),
            premium: U256::from(50_000_000u64),
            expiry: 1_800_000_000,
        }
    }

    #[test]
    fn salts_fit_u32() {
        let generator = KeccakSaltGenerator::new();
        for salt in generator.generate_multiple(Address::repeat_byte(0xaa), &terms(), 64) {
            assert!(salt <= U256::from(u32::MAX));
        }
    }

    #[test]
    fn salts_vary() {
        let generator = KeccakSaltGenerator::new();
        let salts: HashSet<_> =
            generator.generate_multiple(Address::repeat_byte(0xaa), &terms(), 16).into_iter().collect();
        assert_eq!(salts.len(), 16);
    }
}
