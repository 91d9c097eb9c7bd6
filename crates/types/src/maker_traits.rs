use alloy::primitives::{Address, U256};

const NONCE_OFFSET: usize = 120;
const EXPIRATION_OFFSET: usize = 80;
const SERIES_OFFSET: usize = 160;
const UINT40_MASK: u64 = (1 << 40) - 1;
const UINT80_MASK: u128 = (1 << 80) - 1;

/// Order-level flags and counters packed into the limit order protocol's
/// `makerTraits` word.
///
/// Layout of the word, high bits first:
///
/// | bits        | field                       |
/// |-------------|-----------------------------|
/// | 255         | no partial fills            |
/// | 254         | allow multiple fills        |
/// | 253         | unused                      |
/// | 252         | pre-interaction call        |
/// | 251         | post-interaction call       |
/// | 250         | need check epoch manager    |
/// | 249         | has extension               |
/// | 248         | use permit2                 |
/// | 247         | unwrap WETH                 |
/// | [160, 200)  | series (40 bits)            |
/// | [120, 160)  | nonce or epoch (40 bits)    |
/// | [80, 120)   | expiration (40 bits)        |
/// | [0, 80)     | low 80 bits of allowed sender |
///
/// Encoding masks each counter to its width and performs no other
/// validation. Flag bits and counter ranges never overlap, so any value
/// produced by [`MakerTraits::encode`] decodes back to itself once counters
/// are within range.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MakerTraits {
    /// Reject fills for less than the full making amount.
    pub no_partial_fills: bool,
    /// Allow the order to be filled more than once.
    pub allow_multiple_fills: bool,
    /// Call the maker pre-interaction.
    pub pre_interaction: bool,
    /// Call the maker post-interaction.
    pub post_interaction: bool,
    /// Check the epoch manager instead of the bit invalidator.
    pub need_check_epoch_manager: bool,
    /// The order carries an extension.
    pub has_extension: bool,
    /// Transfer maker funds through permit2.
    pub use_permit2: bool,
    /// Unwrap WETH before sending to the taker.
    pub unwrap_weth: bool,
    /// Legacy nonce, 40 bits.
    pub nonce: u64,
    /// Expiration timestamp, 40 bits. Zero means no expiration.
    pub expiration: u64,
    /// Epoch series, 40 bits.
    pub series: u64,
    /// Low 80 bits of the only address allowed to fill. Zero means anyone.
    pub allowed_sender: u128,
}

impl MakerTraits {
    /// Bit index of the no-partial-fills flag.
    pub const NO_PARTIAL_FILLS_FLAG: usize = 255;
    /// Bit index of the allow-multiple-fills flag.
    pub const ALLOW_MULTIPLE_FILLS_FLAG: usize = 254;
    /// Bit index of the pre-interaction flag.
    pub const PRE_INTERACTION_CALL_FLAG: usize = 252;
    /// Bit index of the post-interaction flag.
    pub const POST_INTERACTION_CALL_FLAG: usize = 251;
    /// Bit index of the need-check-epoch-manager flag.
    pub const NEED_CHECK_EPOCH_MANAGER_FLAG: usize = 250;
    /// Bit index of the has-extension flag.
    pub const HAS_EXTENSION_FLAG: usize = 249;
    /// Bit index of the use-permit2 flag.
    pub const USE_PERMIT2_FLAG: usize = 248;
    /// Bit index of the unwrap-weth flag.
    pub const UNWRAP_WETH_FLAG: usize = 247;

    /// Instantiate traits with no flags set and all counters zero.
    pub const fn new() -> Self {
        Self {
            no_partial_fills: false,
            allow_multiple_fills: false,
            pre_interaction: false,
            post_interaction: false,
            need_check_epoch_manager: false,
            has_extension: false,
            use_permit2: false,
            unwrap_weth: false,
            nonce: 0,
            expiration: 0,
            series: 0,
            allowed_sender: 0,
        }
    }

    /// Set the no-partial-fills flag.
    pub const fn with_no_partial_fills(mut self, value: bool) -> Self {
        self.no_partial_fills = value;
        self
    }

    /// Set the allow-multiple-fills flag.
    pub const fn with_allow_multiple_fills(mut self, value: bool) -> Self {
        self.allow_multiple_fills = value;
        self
    }

    /// Set the post-interaction flag.
    pub const fn with_post_interaction(mut self, value: bool) -> Self {
        self.post_interaction = value;
        self
    }

    /// Set the nonce. Only the low 40 bits are kept on encoding.
    pub const fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Set the expiration timestamp.
    pub const fn with_expiration(mut self, expiration: u64) -> Self {
        self.expiration = expiration;
        self
    }

    /// Restrict fills to `sender`. The protocol compares only the low 80
    /// bits of the address.
    pub fn with_allowed_sender(mut self, sender: Address) -> Self {
        let mut low = [0u8; 16];
        low[6..].copy_from_slice(&sender.as_slice()[10..]);
        self.allowed_sender = u128::from_be_bytes(low);
        self
    }

    /// Pack into the protocol word.
    pub fn encode(&self) -> U256 {
        let mut word = U256::from(self.allowed_sender & UINT80_MASK)
            | (U256::from(self.expiration & UINT40_MASK) << EXPIRATION_OFFSET)
            | (U256::from(self.nonce & UINT40_MASK) << NONCE_OFFSET)
            | (U256::from(self.series & UINT40_MASK) << SERIES_OFFSET);

        for (bit, set) in self.flags() {
            word.set_bit(bit, set);
        }
        word
    }

    /// Unpack a protocol word. Unused bits are ignored.
    pub fn decode(word: U256) -> Self {
        let field = |offset: usize| -> u64 {
            ((word >> offset) & U256::from(UINT40_MASK)).saturating_to()
        };

        Self {
            no_partial_fills: word.bit(Self::NO_PARTIAL_FILLS_FLAG),
            allow_multiple_fills: word.bit(Self::ALLOW_MULTIPLE_FILLS_FLAG),
            pre_interaction: word.bit(Self::PRE_INTERACTION_CALL_FLAG),
            post_interaction: word.bit(Self::POST_INTERACTION_CALL_FLAG),
            need_check_epoch_manager: word.bit(Self::NEED_CHECK_EPOCH_MANAGER_FLAG),
            has_extension: word.bit(Self::HAS_EXTENSION_FLAG),
            use_permit2: word.bit(Self::USE_PERMIT2_FLAG),
            unwrap_weth: word.bit(Self::UNWRAP_WETH_FLAG),
            nonce: field(NONCE_OFFSET),
            expiration: field(EXPIRATION_OFFSET),
            series: field(SERIES_OFFSET),
            allowed_sender: (word & U256::from(UINT80_MASK)).saturating_to(),
        }
    }

    const fn flags(&self) -> [(usize, bool); 8] {
        [
            (Self::NO_PARTIAL_FILLS_FLAG, self.no_partial_fills),
            (Self::ALLOW_MULTIPLE_FILLS_FLAG, self.allow_multiple_fills),
            (Self::PRE_INTERACTION_CALL_FLAG, self.pre_interaction),
            (Self::POST_INTERACTION_CALL_FLAG, self.post_interaction),
            (Self::NEED_CHECK_EPOCH_MANAGER_FLAG, self.need_check_epoch_manager),
            (Self::HAS_EXTENSION_FLAG, self.has_extension),
            (Self::USE_PERMIT2_FLAG, self.use_permit2),
            (Self::UNWRAP_WETH_FLAG, self.unwrap_weth),
        ]
    }
}

impl From<MakerTraits> for U256 {
    fn from(traits: MakerTraits) -> Self {
        traits.encode()
    }
}

impl From<U256> for MakerTraits {
    fn from(word: U256) -> Self {
        Self::decode(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, uint};
    use proptest::prelude::*;

    #[test]
    fn flag_positions() {
        let traits = MakerTraits::new().with_no_partial_fills(true);
        assert_eq!(traits.encode(), U256::from(1) << 255);

        let traits = MakerTraits::new().with_post_interaction(true);
        assert_eq!(traits.encode(), U256::from(1) << 251);

        let traits = MakerTraits { unwrap_weth: true, ..Default::default() };
        assert_eq!(traits.encode(), U256::from(1) << 247);
    }

    #[test]
    fn nonce_is_masked() {
        let traits = MakerTraits::new().with_nonce(u64::MAX);
        assert_eq!(traits.encode(), U256::from(UINT40_MASK) << 120);

        let traits = MakerTraits::new().with_nonce(1 << 40);
        assert_eq!(traits.encode(), U256::ZERO);
    }

    #[test]
    fn known_word() {
        let traits = MakerTraits::new()
            .with_no_partial_fills(true)
            .with_allow_multiple_fills(true)
            .with_nonce(7)
            .with_expiration(1_700_000_000);
        assert_eq!(
            traits.encode(),
            uint!(0xc000000000000000000000000000000007006553f10000000000000000000000_U256)
        );
    }

    #[test]
    fn allowed_sender_low_bits() {
        let sender = address!("0x00112233445566778899aabbccddeeff00112233");
        let traits = MakerTraits::new().with_allowed_sender(sender);
        assert_eq!(traits.allowed_sender, 0xaabbccddeeff00112233);
        assert_eq!(MakerTraits::decode(traits.encode()), traits);
    }

    fn any_traits() -> impl Strategy<Value = MakerTraits> {
        (
            any::<[bool; 8]>(),
            0..=UINT40_MASK,
            0..=UINT40_MASK,
            0..=UINT40_MASK,
            0..=UINT80_MASK,
        )
            .prop_map(|(f, nonce, expiration, series, allowed_sender)| MakerTraits {
                no_partial_fills: f[0],
                allow_multiple_fills: f[1],
                pre_interaction: f[2],
                post_interaction: f[3],
                need_check_epoch_manager: f[4],
                has_extension: f[5],
                use_permit2: f[6],
                unwrap_weth: f[7],
                nonce,
                expiration,
                series,
                allowed_sender,
            })
    }

    proptest! {
        #[test]
        fn round_trip(traits in any_traits()) {
            prop_assert_eq!(MakerTraits::decode(traits.encode()), traits);
        }

        #[test]
        fn nonce_never_touches_flags(nonce in any::<u64>()) {
            let word = MakerTraits::new().with_nonce(nonce).encode();
            prop_assert_eq!(word >> 160, U256::ZERO);
            prop_assert_eq!(word & ((U256::from(1) << 120) - U256::from(1)), U256::ZERO);
        }
    }
}
