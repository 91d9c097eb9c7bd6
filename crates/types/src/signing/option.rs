use crate::signing::{EcdsaSignature, OptionDomain, SigningError};
use crate::OptionTerms;
use alloy::{
    primitives::{Address, B256, U256},
    signers::Signer,
    sol_types::SolStruct,
};
use lop_options_bindings::OptionParams;

/// The option digest: `keccak256(0x1901 || separator || hashStruct(params))`.
///
/// The verifier computes the same value in `generateOptionHash` and marks it
/// used when the option is minted.
pub fn option_digest(params: &OptionParams, domain: &OptionDomain) -> B256 {
    params.eip712_signing_hash(domain.domain())
}

/// Option params with the maker's signature over their digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedOptionParams {
    /// The signed params.
    pub params: OptionParams,
    /// The option digest.
    pub digest: B256,
    /// The signature over the digest.
    pub signature: EcdsaSignature,
}

impl SignedOptionParams {
    /// The maker the params bind to.
    pub const fn maker(&self) -> Address {
        self.params.maker
    }
}

/// Sign option terms under the verifier domain, binding in the signer as
/// maker and `salt` as the replay-protection salt.
pub async fn sign_option_params<S: Signer>(
    terms: &OptionTerms,
    signer: &S,
    domain: &OptionDomain,
    salt: U256,
) -> Result<SignedOptionParams, SigningError> {
    let params = terms.to_params(signer.address(), salt);
    let digest = option_digest(&params, domain);
    let signature = signer.sign_hash(&digest).await?;
    Ok(SignedOptionParams { params, digest, signature: signature.into() })
}
