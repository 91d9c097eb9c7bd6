use alloy::primitives::Address;

/// An error that can occur when signing an order or option params.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    /// An order address differs from the unpadded address it was built
    /// from.
    #[error("order {field} {actual} does not match the original address {expected}")]
    AddressMismatch {
        /// Name of the address field.
        field: &'static str,
        /// The address the order was built from.
        expected: Address,
        /// The address found in the order.
        actual: Address,
    },
    /// The signer is not the maker named in the signed struct.
    #[error("signer {signer} is not the maker {maker}")]
    WrongSigner {
        /// The maker in the struct.
        maker: Address,
        /// The signer's address.
        signer: Address,
    },
    /// Error signing the hash.
    #[error(transparent)]
    Signer(#[from] alloy::signers::Error),
}
