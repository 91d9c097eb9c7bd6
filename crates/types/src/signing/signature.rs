use crate::CodecError;
use alloy::primitives::{Address, Signature, B256, U256};
use serde::{Deserialize, Deserializer, Serialize};

/// An ECDSA signature in `{r, s, v}` form, `v` being 27 or 28.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// The `r` component.
    pub r: B256,
    /// The `s` component.
    pub s: B256,
    /// The recovery id, 27 or 28.
    #[serde(deserialize_with = "recovery_id")]
    pub v: u8,
}

fn recovery_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let v = u8::deserialize(deserializer)?;
    check_recovery_id(v).map_err(serde::de::Error::custom)
}

const fn check_recovery_id(v: u8) -> Result<u8, CodecError> {
    match v {
        27 | 28 => Ok(v),
        _ => Err(CodecError::InvalidRecoveryId(v)),
    }
}

impl EcdsaSignature {
    /// Create a signature, checking that `v` is 27 or 28.
    pub fn new(r: B256, s: B256, v: u8) -> Result<Self, CodecError> {
        check_recovery_id(v).map(|v| Self { r, s, v })
    }

    /// The y-parity bit.
    pub const fn parity(&self) -> bool {
        self.v == 28
    }

    /// Convert to the EIP-2098 compact form used in fill calldata.
    pub fn compact(&self) -> CompactSignature {
        let mut vs = U256::from_be_bytes(self.s.0);
        vs.set_bit(255, self.parity());
        CompactSignature { r: self.r, vs: vs.into() }
    }

    /// Recover the address that signed `hash`.
    pub fn recover(&self, hash: &B256) -> Result<Address, alloy::primitives::SignatureError> {
        Signature::from(*self).recover_address_from_prehash(hash)
    }
}

impl From<Signature> for EcdsaSignature {
    fn from(signature: Signature) -> Self {
        Self {
            r: signature.r().into(),
            s: signature.s().into(),
            v: 27 + u8::from(signature.v()),
        }
    }
}

impl From<EcdsaSignature> for Signature {
    fn from(signature: EcdsaSignature) -> Self {
        Self::new(
            U256::from_be_bytes(signature.r.0),
            U256::from_be_bytes(signature.s.0),
            signature.parity(),
        )
    }
}

/// An EIP-2098 compact signature: `s` with the y-parity folded into its top
/// bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactSignature {
    /// The `r` component.
    pub r: B256,
    /// `s | parity << 255`.
    pub vs: B256,
}

impl CompactSignature {
    /// Expand back into `{r, s, v}` form.
    pub fn expand(&self) -> EcdsaSignature {
        let mut s = U256::from_be_bytes(self.vs.0);
        let parity = s.bit(255);
        s.set_bit(255, false);
        EcdsaSignature { r: self.r, s: s.into(), v: 27 + u8::from(parity) }
    }
}
