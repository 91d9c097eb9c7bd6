use alloy::primitives::U256;

const INTERACTION_LENGTH_OFFSET: usize = 200;
const EXTENSION_LENGTH_OFFSET: usize = 224;
const THRESHOLD_BITS: usize = 185;

/// Largest length the 24-bit argument length fields can hold.
pub const MAX_ARGS_LENGTH: usize = (1 << 24) - 1;

/// Errors packing taker traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TraitsError {
    /// A field is wider than its slot in the word.
    #[error("{field} does not fit in {bits} bits")]
    FieldOverflow {
        /// Name of the field.
        field: &'static str,
        /// Width of the slot.
        bits: usize,
    },
}

/// Fill-time options packed into the limit order protocol's `takerTraits`
/// word.
///
/// | bits        | field                         |
/// |-------------|-------------------------------|
/// | 255         | amount is the making amount   |
/// | 254         | unwrap WETH                   |
/// | 253         | skip order permit             |
/// | 252         | use permit2                   |
/// | 251         | args start with a target      |
/// | [224, 248)  | extension length in args      |
/// | [200, 224)  | interaction length in args    |
/// | [0, 185)    | threshold amount              |
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TakerTraits {
    /// The fill amount is denominated in the making asset.
    pub maker_amount: bool,
    /// Unwrap WETH before sending to the taker.
    pub unwrap_weth: bool,
    /// Skip the order permit.
    pub skip_order_permit: bool,
    /// Transfer taker funds through permit2.
    pub use_permit2: bool,
    /// The args start with a 20-byte target address.
    pub args_has_target: bool,
    /// Length of the extension carried in the args.
    pub extension_length: usize,
    /// Length of the interaction carried in the args.
    pub interaction_length: usize,
    /// Limit on the opposite amount.
    pub threshold: U256,
}

impl TakerTraits {
    /// Bit index of the maker-amount flag.
    pub const MAKER_AMOUNT_FLAG: usize = 255;
    /// Bit index of the unwrap-weth flag.
    pub const UNWRAP_WETH_FLAG: usize = 254;
    /// Bit index of the skip-order-permit flag.
    pub const SKIP_ORDER_PERMIT_FLAG: usize = 253;
    /// Bit index of the use-permit2 flag.
    pub const USE_PERMIT2_FLAG: usize = 252;
    /// Bit index of the args-has-target flag.
    pub const ARGS_HAS_TARGET_FLAG: usize = 251;

    /// Traits for a fill whose args are exactly `interaction`.
    pub fn for_interaction(interaction: &[u8]) -> Self {
        Self { interaction_length: interaction.len(), ..Default::default() }
    }

    /// Set the threshold.
    pub const fn with_threshold(mut self, threshold: U256) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the maker-amount flag.
    pub const fn with_maker_amount(mut self, value: bool) -> Self {
        self.maker_amount = value;
        self
    }

    /// Pack into the protocol word.
    pub fn encode(&self) -> Result<U256, TraitsError> {
        check_length("interaction length", self.interaction_length)?;
        check_length("extension length", self.extension_length)?;
        if self.threshold.bit_len() > THRESHOLD_BITS {
            return Err(TraitsError::FieldOverflow { field: "threshold", bits: THRESHOLD_BITS });
        }

        let mut word = self.threshold
            | (U256::from(self.interaction_length) << INTERACTION_LENGTH_OFFSET)
            | (U256::from(self.extension_length) << EXTENSION_LENGTH_OFFSET);
        word.set_bit(Self::MAKER_AMOUNT_FLAG, self.maker_amount);
        word.set_bit(Self::UNWRAP_WETH_FLAG, self.unwrap_weth);
        word.set_bit(Self::SKIP_ORDER_PERMIT_FLAG, self.skip_order_permit);
        word.set_bit(Self::USE_PERMIT2_FLAG, self.use_permit2);
        word.set_bit(Self::ARGS_HAS_TARGET_FLAG, self.args_has_target);
        Ok(word)
    }

    /// Unpack a protocol word.
    pub fn decode(word: U256) -> Self {
        let length = |offset: usize| -> usize {
            ((word >> offset) & U256::from(MAX_ARGS_LENGTH)).saturating_to()
        };
        let threshold_mask = (U256::from(1) << THRESHOLD_BITS) - U256::from(1);

        Self {
            maker_amount: word.bit(Self::MAKER_AMOUNT_FLAG),
            unwrap_weth: word.bit(Self::UNWRAP_WETH_FLAG),
            skip_order_permit: word.bit(Self::SKIP_ORDER_PERMIT_FLAG),
            use_permit2: word.bit(Self::USE_PERMIT2_FLAG),
            args_has_target: word.bit(Self::ARGS_HAS_TARGET_FLAG),
            extension_length: length(EXTENSION_LENGTH_OFFSET),
            interaction_length: length(INTERACTION_LENGTH_OFFSET),
            threshold: word & threshold_mask,
        }
    }
}

const fn check_length(field: &'static str, length: usize) -> Result<(), TraitsError> {
    if length > MAX_ARGS_LENGTH {
        return Err(TraitsError::FieldOverflow { field, bits: 24 });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_length_offset() {
        let traits = TakerTraits::for_interaction(&[0u8; 340]);
        assert_eq!(traits.encode().unwrap(), U256::from(340) << 200);
    }

    #[test]
    fn decode_recovers_fields() {
        let traits = TakerTraits {
            maker_amount: true,
            args_has_target: true,
            extension_length: 12,
            interaction_length: 340,
            threshold: U256::from(5_000_000u64),
            ..Default::default()
        };
        assert_eq!(TakerTraits::decode(traits.encode().unwrap()), traits);
    }

    #[test]
    fn overflow_rejected() {
        let traits = TakerTraits { interaction_length: MAX_ARGS_LENGTH + 1, ..Default::default() };
        assert_eq!(
            traits.encode(),
            Err(TraitsError::FieldOverflow { field: "interaction length", bits: 24 })
        );

        let traits = TakerTraits::default().with_threshold(U256::from(1) << 185);
        assert!(traits.encode().is_err());

        let traits = TakerTraits { interaction_length: MAX_ARGS_LENGTH, ..Default::default() };
        assert!(traits.encode().is_ok());
    }
}
