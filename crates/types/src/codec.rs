use alloy::primitives::{Address, B256, U256};

/// Errors produced while parsing or decoding wire and calldata values.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The input is not 40 hex characters after an optional `0x` prefix.
    #[error("invalid address format: {0:?}, expected 40 hex characters")]
    InvalidAddressFormat(String),
    /// An address word has non-zero bytes above the low 20.
    #[error("address word has non-zero high bytes: {0}")]
    DirtyAddressWord(B256),
    /// The input is not a base-10 unsigned 256-bit integer.
    #[error("invalid decimal integer: {0:?}")]
    InvalidDecimal(String),
    /// The input is a negative number.
    #[error("negative value where an unsigned integer was expected: {0:?}")]
    NegativeValue(String),
    /// A signature `v` outside of `{27, 28}`.
    #[error("invalid signature recovery id {0}, expected 27 or 28")]
    InvalidRecoveryId(u8),
    /// The interaction payload has the wrong length.
    #[error("interaction payload is {actual} bytes, expected {expected}")]
    InteractionLength {
        /// The length the schema requires.
        expected: usize,
        /// The length received.
        actual: usize,
    },
    /// The interaction payload targets a different contract.
    #[error("interaction targets {actual}, expected {expected}")]
    InteractionTarget {
        /// The verifier address.
        expected: Address,
        /// The address found in the payload.
        actual: Address,
    },
    /// ABI decoding failed.
    #[error(transparent)]
    Abi(#[from] alloy::sol_types::Error),
}

/// Parse an address string strictly.
///
/// The input may carry a `0x` prefix and may use any letter case, but must
/// then be exactly 40 hex characters. Checksums are not enforced.
pub fn parse_address(input: &str) -> Result<Address, CodecError> {
    let hex = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")).unwrap_or(input);
    if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CodecError::InvalidAddressFormat(input.to_string()));
    }

    let mut bytes = [0u8; 20];
    alloy::hex::decode_to_slice(hex, &mut bytes)
        .map_err(|_| CodecError::InvalidAddressFormat(input.to_string()))?;
    Ok(Address::from(bytes))
}

/// Encode an address string into the left-padded 32-byte word the verifying
/// contracts use. Formatting the result with `{:x}` yields the lowercase,
/// 64-character hex form.
pub fn encode_address(input: &str) -> Result<B256, CodecError> {
    parse_address(input).map(|address| address.into_word())
}

/// Encode an address as a `uint256` word, as the limit order protocol's
/// `Address` type stores it.
pub fn encode_address_word(address: Address) -> U256 {
    U256::from_be_bytes(address.into_word().0)
}

/// Decode a left-padded word back into an address.
///
/// Fails if any of the 12 high bytes is set, since such a word does not come
/// from [`encode_address`].
pub fn decode_address(word: B256) -> Result<Address, CodecError> {
    if word[..12].iter().any(|b| *b != 0) {
        return Err(CodecError::DirtyAddressWord(word));
    }
    Ok(Address::from_word(word))
}
