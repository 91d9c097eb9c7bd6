use crate::{signing::SignedOptionParams, CodecError};
use alloy::{
    primitives::{keccak256, Address, Bytes, B256},
    sol_types::{SolStruct, SolType},
};
use lop_options_bindings::OptionInteraction;

/// Length of the ABI-encoded interaction body: ten static words.
pub const INTERACTION_BODY_LENGTH: usize = 10 * 32;

/// Length of a complete interaction payload: target address plus body.
pub const INTERACTION_LENGTH: usize = 20 + INTERACTION_BODY_LENGTH;

/// The canonical type string of the interaction body. Encoding and decoding
/// both go through the one [`OptionInteraction`] definition it is derived
/// from.
pub fn interaction_schema() -> String {
    OptionInteraction::eip712_root_type().into_owned()
}

/// Identifier of the interaction body layout, `keccak256` of
/// [`interaction_schema`]. Changes whenever a field is added, removed,
/// renamed, reordered or retyped.
pub fn interaction_schema_id() -> B256 {
    keccak256(interaction_schema())
}

/// Build the interaction body from signed option params.
pub fn option_interaction(signed: &SignedOptionParams) -> OptionInteraction {
    let params = &signed.params;
    OptionInteraction {
        maker: params.maker,
        underlyingAsset: params.underlyingAsset,
        strikeAsset: params.strikeAsset,
        strikePrice: params.strikePrice,
        expiry: params.expiry,
        optionAmount: params.amount,
        salt: params.salt,
        v: signed.signature.v,
        r: signed.signature.r,
        s: signed.signature.s,
    }
}

/// Build the taker interaction consumed by the verifier's fill callback:
/// the 20-byte verifier address followed by the ABI-encoded body.
pub fn build_interaction_payload(signed: &SignedOptionParams, verifier: Address) -> Bytes {
    let body = <OptionInteraction as SolType>::abi_encode(&option_interaction(signed));

    let mut payload = Vec::with_capacity(INTERACTION_LENGTH);
    payload.extend_from_slice(verifier.as_slice());
    payload.extend_from_slice(&body);
    payload.into()
}

/// Split an interaction payload into its target and decoded body.
pub fn decode_interaction(payload: &[u8]) -> Result<(Address, OptionInteraction), CodecError> {
    if payload.len() != INTERACTION_LENGTH {
        return Err(CodecError::InteractionLength {
            expected: INTERACTION_LENGTH,
            actual: payload.len(),
        });
    }

    let (target, body) = payload.split_at(20);
    let interaction = <OptionInteraction as SolType>::abi_decode(body)?;
    Ok((Address::from_slice(target), interaction))
}

/// Decode an interaction payload, checking that it targets `verifier`.
pub fn decode_interaction_for(
    payload: &[u8],
    verifier: Address,
) -> Result<OptionInteraction, CodecError> {
    let (target, interaction) = decode_interaction(payload)?;
    if target != verifier {
        return Err(CodecError::InteractionTarget { expected: verifier, actual: target });
    }
    Ok(interaction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::EcdsaSignature;
    use alloy::primitives::{b256, U256};
    use lop_options_bindings::OptionParams;

    fn signed() -> SignedOptionParams {
        SignedOptionParams {
            params: OptionParams {
                underlyingAsset: Address::repeat_byte(0x33),
                strikeAsset: Address::repeat_byte(0x44),
                maker: Address::repeat_byte(0xaa),
                strikePrice: U256::from(2_000_000_000u64),
                expiry: U256::from(1_800_000_000u64),
                amount: U256::from(10u64).pow(U256::from(18)),
                salt: U256::from(42),
            },
            digest: B256::repeat_byte(0x01),
            signature: EcdsaSignature::new(
                B256::repeat_byte(0x02),
                B256::repeat_byte(0x03),
                28,
            )
            .unwrap(),
        }
    }

    #[test]
    fn schema_string() {
        assert_eq!(
            interaction_schema(),
            "OptionInteraction(address maker,address underlyingAsset,address strikeAsset,uint256 strikePrice,uint256 expiry,uint256 optionAmount,uint256 salt,uint8 v,bytes32 r,bytes32 s)"
        );
        assert_eq!(interaction_schema_id(), keccak256(interaction_schema()));
    }

    #[test]
    fn payload_layout() {
        let verifier = Address::repeat_byte(0x22);
        let payload = build_interaction_payload(&signed(), verifier);
        assert_eq!(payload.len(), 340);
        assert_eq!(&payload[..20], verifier.as_slice());
        // maker is the first word
        assert_eq!(&payload[20..52], Address::repeat_byte(0xaa).into_word().as_slice());
        // v is the eighth word
        assert_eq!(
            B256::from_slice(&payload[20 + 7 * 32..20 + 8 * 32]),
            b256!("0x000000000000000000000000000000000000000000000000000000000000001c")
        );
        assert_eq!(&payload[308..], B256::repeat_byte(0x03).as_slice());
    }

    #[test]
    fn payload_decodes_back() {
        let verifier = Address::repeat_byte(0x22);
        let payload = build_interaction_payload(&signed(), verifier);
        let interaction = decode_interaction_for(&payload, verifier).unwrap();
        assert_eq!(interaction.option_params(), signed().params);
        assert_eq!(interaction.v, 28);
        assert_eq!(interaction.r, B256::repeat_byte(0x02));
    }

    #[test]
    fn decode_rejects_bad_payloads() {
        let verifier = Address::repeat_byte(0x22);
        let payload = build_interaction_payload(&signed(), verifier);

        assert!(matches!(
            decode_interaction(&payload[..339]),
            Err(CodecError::InteractionLength { expected: 340, actual: 339 })
        ));
        assert!(matches!(
            decode_interaction_for(&payload, Address::repeat_byte(0x23)),
            Err(CodecError::InteractionTarget { .. })
        ));
    }
}
