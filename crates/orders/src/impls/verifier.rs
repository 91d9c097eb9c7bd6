use crate::OptionHashVerifier;
use alloy::{
    contract::Error as ContractError,
    network::Network,
    primitives::B256,
    providers::Provider,
};
use lop_options_bindings::{IOptionsNFT::IOptionsNFTInstance, OptionParams};

impl<P, N> OptionHashVerifier for IOptionsNFTInstance<P, N>
where
    P: Provider<N>,
    N: Network,
{
    type Error = ContractError;

    async fn is_option_hash_available(&self, params: &OptionParams) -> Result<bool, Self::Error> {
        let p = *params;
        self.isOptionHashAvailable(
            p.underlyingAsset,
            p.strikeAsset,
            p.maker,
            p.strikePrice,
            p.expiry,
            p.amount,
            p.salt,
        )
        .call()
        .await
    }

    async fn option_hash(&self, params: &OptionParams) -> Result<B256, Self::Error> {
        let p = *params;
        self.generateOptionHash(
            p.underlyingAsset,
            p.strikeAsset,
            p.maker,
            p.strikePrice,
            p.expiry,
            p.amount,
            p.salt,
        )
        .call()
        .await
    }
}
