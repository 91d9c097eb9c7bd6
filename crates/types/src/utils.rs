use crate::CodecError;
use alloy::primitives::U256;

/// Parse a base-10 unsigned integer string into a [`U256`].
///
/// Only ASCII digits are accepted. A leading `-` is reported as
/// [`CodecError::NegativeValue`] so callers can tell a negative amount apart
/// from garbage.
pub fn parse_decimal_u256(input: &str) -> Result<U256, CodecError> {
    if input.starts_with('-') {
        return Err(CodecError::NegativeValue(input.to_string()));
    }
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::InvalidDecimal(input.to_string()));
    }
    U256::from_str_radix(input, 10).map_err(|_| CodecError::InvalidDecimal(input.to_string()))
}

/// Serde adapter for [`U256`] amounts carried as decimal strings.
///
/// JSON numbers are rejected: they lose precision above 2^53 in most
/// clients.
pub mod decimal_u256 {
    use alloy::primitives::U256;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    /// Serialize as a decimal string.
    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    /// Deserialize from a decimal string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_decimal_u256(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_large_values() {
        let max = U256::MAX.to_string();
        assert_eq!(parse_decimal_u256(&max).unwrap(), U256::MAX);
        assert_eq!(parse_decimal_u256("2000000000").unwrap(), U256::from(2_000_000_000u64));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse_decimal_u256("-1"), Err(CodecError::NegativeValue(_))));
        assert!(matches!(parse_decimal_u256(""), Err(CodecError::InvalidDecimal(_))));
        assert!(matches!(parse_decimal_u256("0x10"), Err(CodecError::InvalidDecimal(_))));
        assert!(matches!(parse_decimal_u256("1.5"), Err(CodecError::InvalidDecimal(_))));

        let overflow = format!("{}0", U256::MAX);
        assert!(matches!(parse_decimal_u256(&overflow), Err(CodecError::InvalidDecimal(_))));
    }
}
