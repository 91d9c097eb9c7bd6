use crate::utils::{decimal_u256, parse_decimal_u256};
use crate::CodecError;
use alloy::primitives::{Address, U256};
use lop_options_bindings::OptionParams;
use serde::{Deserialize, Serialize};

/// Reasons option parameters are rejected before any hashing or signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidParameter {
    /// An address field is the zero address.
    #[error("{field} must not be the zero address")]
    ZeroAddress {
        /// Name of the field.
        field: &'static str,
    },
    /// The strike price is zero.
    #[error("strike price must be positive")]
    NonPositiveStrikePrice,
    /// The option amount is zero.
    #[error("option amount must be positive")]
    NonPositiveAmount,
    /// The expiry is not in the future.
    #[error("expiry {expiry} is not after the current time {now}")]
    ExpiryPassed {
        /// The requested expiry.
        expiry: u64,
        /// The time of the check.
        now: u64,
    },
    /// The salt is negative.
    #[error("salt must not be negative")]
    NegativeSalt,
    /// The salt is not an unsigned integer.
    #[error("salt is not a decimal integer")]
    MalformedSalt,
    /// A sequential nonce does not fit the 40-bit maker traits nonce field.
    #[error("nonce {nonce} exceeds the maximum {max}")]
    NonceOutOfRange {
        /// The requested nonce.
        nonce: u64,
        /// The largest allowed nonce.
        max: u64,
    },
}

/// Parse a salt supplied as a decimal string.
pub fn parse_salt(input: &str) -> Result<U256, InvalidParameter> {
    parse_decimal_u256(input).map_err(|err| match err {
        CodecError::NegativeValue(_) => InvalidParameter::NegativeSalt,
        _ => InvalidParameter::MalformedSalt,
    })
}

/// The terms of an option offered by a maker.
///
/// These are the option fields a maker chooses. The maker address and the
/// replay-protection salt are bound in separately when the terms are turned
/// into [`OptionParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionTerms {
    /// Asset the option is written on.
    pub underlying_asset: Address,
    /// Asset the strike is paid in.
    pub strike_asset: Address,
    /// Strike price, in strike asset base units.
    #[serde(with = "decimal_u256")]
    pub strike_price: U256,
    /// Amount of the underlying covered by the option.
    #[serde(with = "decimal_u256")]
    pub option_amount: U256,
    /// Premium the taker pays, in strike asset base units.
    #[serde(with = "decimal_u256")]
    pub premium: U256,
    /// Expiry as a unix timestamp in seconds.
    pub expiry: u64,
}

impl OptionTerms {
    /// Bind the terms to a maker and salt.
    pub fn to_params(&self, maker: Address, salt: U256) -> OptionParams {
        OptionParams {
            underlyingAsset: self.underlying_asset,
            strikeAsset: self.strike_asset,
            maker,
            strikePrice: self.strike_price,
            expiry: U256::from(self.expiry),
            amount: self.option_amount,
            salt,
        }
    }

    /// True if the option has expired at `now`.
    pub const fn is_expired(&self, now: u64) -> bool {
        self.expiry <= now
    }

    /// Check the terms for a maker at time `now`. Returns the first failing
    /// check.
    pub fn validate(&self, maker: Address, now: u64) -> Result<(), InvalidParameter> {
        if maker.is_zero() {
            return Err(InvalidParameter::ZeroAddress { field: "maker" });
        }
        if self.underlying_asset.is_zero() {
            return Err(InvalidParameter::ZeroAddress { field: "underlyingAsset" });
        }
        if self.strike_asset.is_zero() {
            return Err(InvalidParameter::ZeroAddress { field: "strikeAsset" });
        }
        if self.strike_price.is_zero() {
            return Err(InvalidParameter::NonPositiveStrikePrice);
        }
        if self.is_expired(now) {
            return Err(InvalidParameter::ExpiryPassed { expiry: self.expiry, now });
        }
        if self.option_amount.is_zero() {
            return Err(InvalidParameter::NonPositiveAmount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lop_options_constants::test_utils::{USDC, WETH};

    fn terms() -> OptionTerms {
        OptionTerms {
            underlying_asset: WETH,
            strike_asset: USDC,
            strike_price: U256::from(2_000_000_000u64),
            option_amount: U256::from(10u64).pow(U256::from(18)),
            premium: U256::from(50_000_000u64),
            expiry: 1_800_000_000,
        }
    }

    #[test]
    fn validation_order() {
        let maker = Address::repeat_byte(0xaa);
        let now = 1_700_000_000;
        assert_eq!(terms().validate(maker, now), Ok(()));
        assert_eq!(
            terms().validate(Address::ZERO, now),
            Err(InvalidParameter::ZeroAddress { field: "maker" })
        );

        let t = OptionTerms { strike_price: U256::ZERO, expiry: 0, ..terms() };
        assert_eq!(t.validate(maker, now), Err(InvalidParameter::NonPositiveStrikePrice));

        let t = OptionTerms { expiry: now, option_amount: U256::ZERO, ..terms() };
        assert_eq!(t.validate(maker, now), Err(InvalidParameter::ExpiryPassed { expiry: now, now }));

        let t = OptionTerms { option_amount: U256::ZERO, ..terms() };
        assert_eq!(t.validate(maker, now), Err(InvalidParameter::NonPositiveAmount));
    }

    #[test]
    fn params_field_binding() {
        let maker = Address::repeat_byte(0xaa);
        let params = terms().to_params(maker, U256::from(42));
        assert_eq!(params.maker, maker);
        assert_eq!(params.underlyingAsset, WETH);
        assert_eq!(params.strikeAsset, USDC);
        assert_eq!(params.amount, terms().option_amount);
        assert_eq!(params.expiry, U256::from(1_800_000_000u64));
        assert_eq!(params.salt, U256::from(42));
    }

    #[test]
    fn salt_parsing() {
        assert_eq!(parse_salt("42"), Ok(U256::from(42)));
        assert_eq!(parse_salt("-1"), Err(InvalidParameter::NegativeSalt));
        assert_eq!(parse_salt("abc"), Err(InvalidParameter::MalformedSalt));
    }

    #[test]
    fn wire_format() {
        let json = serde_json::to_value(terms()).unwrap();
        assert_eq!(json["strikePrice"], "2000000000");
        assert_eq!(json["optionAmount"], "1000000000000000000");
        assert_eq!(json["expiry"], 1_800_000_000u64);
        assert_eq!(json["underlyingAsset"], format!("{WETH:#x}"));

        let back: OptionTerms = serde_json::from_value(json).unwrap();
        assert_eq!(back, terms());
    }

    #[test]
    fn wire_rejects_numbers_and_negatives() {
        let mut json = serde_json::to_value(terms()).unwrap();
        json["strikePrice"] = serde_json::json!(2000000000u64);
        assert!(serde_json::from_value::<OptionTerms>(json.clone()).is_err());

        json["strikePrice"] = serde_json::json!("-5");
        assert!(serde_json::from_value::<OptionTerms>(json).is_err());
    }
}
