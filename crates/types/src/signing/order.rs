use crate::signing::{CompactSignature, EcdsaSignature, OrderDomain, SigningError};
use crate::OrderAddresses;
use alloy::{
    primitives::{Address, B256},
    signers::Signer,
    sol_types::SolStruct,
};
use lop_options_bindings::Order;
use serde::{Deserialize, Serialize};

/// The EIP-712 hash of an order under the protocol domain. This is the
/// order hash the protocol reports and the key orders are stored under.
pub fn order_hash(order: &Order, domain: &OrderDomain) -> B256 {
    order.eip712_signing_hash(domain.domain())
}

/// An order hash with the maker's signature over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedOrderHash {
    /// The order hash.
    pub hash: B256,
    /// The signature over the hash.
    pub signature: EcdsaSignature,
}

impl SignedOrderHash {
    /// The compact signature for fill calldata.
    pub fn compact(&self) -> CompactSignature {
        self.signature.compact()
    }
}

/// Sign an order under the protocol domain.
///
/// The order must carry the unpadded addresses it was built from, and the
/// signer must be the maker.
pub async fn sign_order<S: Signer>(
    order: &Order,
    signer: &S,
    domain: &OrderDomain,
    original_addresses: &OrderAddresses,
) -> Result<SignedOrderHash, SigningError> {
    check_address("maker", original_addresses.maker, order.maker)?;
    check_address("receiver", original_addresses.receiver, order.receiver)?;
    check_address("makerAsset", original_addresses.maker_asset, order.makerAsset)?;
    check_address("takerAsset", original_addresses.taker_asset, order.takerAsset)?;
    if signer.address() != order.maker {
        return Err(SigningError::WrongSigner { maker: order.maker, signer: signer.address() });
    }

    let hash = order_hash(order, domain);
    let signature = signer.sign_hash(&hash).await?;
    Ok(SignedOrderHash { hash, signature: signature.into() })
}

fn check_address(field: &'static str, expected: Address, actual: Address) -> Result<(), SigningError> {
    if expected != actual {
        return Err(SigningError::AddressMismatch { field, expected, actual });
    }
    Ok(())
}
