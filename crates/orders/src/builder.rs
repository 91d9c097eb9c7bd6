use crate::{
    store::{insert_order, StoreError},
    KeccakSaltGenerator, OptionHashVerifier, OrderHashError, OrderHashManager, OrderStore,
    SaltGenerator,
};
use alloy::{
    primitives::{Address, Bytes, U256},
    signers::Signer,
};
use chrono::Utc;
use core::future::Future;
use lop_options_constants::ChainConstants;
use lop_options_types::{
    build_interaction_payload, build_order,
    signing::{
        sign_option_params, sign_order, OrderDomain, SignedOptionParams, SignedOrderHash,
        SigningError,
    },
    BuiltOrder, CompleteOrder, InvalidParameter, MakerTraits, OptionTerms, OrderRequest,
    ReplayScheme, StoredOrder,
};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Errors returned by [`OptionOrderBuilder`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BuilderError {
    /// The option terms are invalid.
    #[error("invalid option parameter: {0}")]
    InvalidParameter(#[from] InvalidParameter),
    /// Salt selection or validation failed.
    #[error(transparent)]
    Hash(#[from] OrderHashError),
    /// Signing failed.
    #[error("signing error: {0}")]
    Signing(#[from] SigningError),
    /// The signer did not answer in time.
    #[error("signer did not respond within {0:?}")]
    SigningTimeout(Duration),
    /// Persisting the order failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BuilderError {
    /// True if the same request may succeed when retried.
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Hash(error) => error.is_retryable(),
            Self::SigningTimeout(_) => true,
            Self::Store(StoreError::Backend(_)) => true,
            _ => false,
        }
    }
}

/// How an option is protected against signature replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayProtection {
    /// Verifier-checked salt. A supplied salt is checked for availability,
    /// otherwise one is searched for.
    Salt(Option<U256>),
    /// Legacy sequential nonce, used as both the option salt and the maker
    /// traits nonce. It must fit in 40 bits, and its digest is checked for
    /// availability like a supplied salt. See
    /// [`NonceManager`](crate::NonceManager) for the single-writer
    /// constraint.
    SequentialNonce(u64),
}

impl Default for ReplayProtection {
    fn default() -> Self {
        Self::Salt(None)
    }
}

/// Inputs for [`OptionOrderBuilder::build_complete_option`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompleteOptionRequest {
    /// The option terms.
    pub terms: OptionTerms,
    /// Replay protection scheme.
    pub replay: ReplayProtection,
    /// Salt of the limit order. Random when unset, and unrelated to the
    /// option salt.
    pub order_salt: Option<U256>,
    /// Receiver of the premium. Zero means the maker.
    pub receiver: Address,
    /// Maker traits before the nonce is applied.
    pub base_traits: MakerTraits,
}

impl CompleteOptionRequest {
    /// A salt-protected request for `terms` with a single, full fill.
    pub const fn new(terms: OptionTerms) -> Self {
        Self {
            terms,
            replay: ReplayProtection::Salt(None),
            order_salt: None,
            receiver: Address::ZERO,
            base_traits: MakerTraits::new().with_no_partial_fills(true),
        }
    }

    /// Set the replay protection scheme.
    pub const fn with_replay(mut self, replay: ReplayProtection) -> Self {
        self.replay = replay;
        self
    }

    /// Set the order salt.
    pub const fn with_order_salt(mut self, salt: U256) -> Self {
        self.order_salt = Some(salt);
        self
    }

    /// Set the premium receiver.
    pub const fn with_receiver(mut self, receiver: Address) -> Self {
        self.receiver = receiver;
        self
    }

    /// Set the base maker traits.
    pub const fn with_base_traits(mut self, traits: MakerTraits) -> Self {
        self.base_traits = traits;
        self
    }
}

/// Builds and signs option orders for one maker.
///
/// The limit order gives `optionAmount` of the underlying for `premium` of
/// the strike asset. The option params ride in the taker interaction, which
/// the verifier checks against the option signature before minting.
///
/// `OptionOrderBuilder` is generic over:
/// - `Sign`: A [`Signer`] for the maker
/// - `V`: An [`OptionHashVerifier`] for salt availability
/// - `G`: A [`SaltGenerator`] proposing salts
#[derive(Debug, Clone)]
pub struct OptionOrderBuilder<Sign, V, G = KeccakSaltGenerator> {
    signer: Sign,
    hash_manager: OrderHashManager<V, G>,
    order_domain: OrderDomain,
    constants: ChainConstants,
    signing_timeout: Duration,
}

impl<Sign, V, G> OptionOrderBuilder<Sign, V, G> {
    /// Create a new builder. The hash manager's option domain should come
    /// from the same `constants`.
    pub fn new(signer: Sign, hash_manager: OrderHashManager<V, G>, constants: ChainConstants) -> Self {
        Self {
            signer,
            hash_manager,
            order_domain: OrderDomain::from_constants(&constants),
            constants,
            signing_timeout: lop_options_types::config::DEFAULT_SIGNING_TIMEOUT,
        }
    }

    /// Set the bound on each signing call.
    pub fn with_signing_timeout(mut self, timeout: Duration) -> Self {
        self.signing_timeout = timeout;
        self
    }

    /// Get the bound on each signing call.
    pub const fn signing_timeout(&self) -> Duration {
        self.signing_timeout
    }

    /// Get a reference to the signer.
    pub const fn signer(&self) -> &Sign {
        &self.signer
    }

    /// Get a reference to the hash manager.
    pub const fn hash_manager(&self) -> &OrderHashManager<V, G> {
        &self.hash_manager
    }

    /// Get a reference to the chain constants.
    pub const fn constants(&self) -> &ChainConstants {
        &self.constants
    }

    /// Get a reference to the order domain.
    pub const fn order_domain(&self) -> &OrderDomain {
        &self.order_domain
    }

    /// Build a limit order.
    pub fn build_order(&self, request: OrderRequest) -> BuiltOrder {
        build_order(request)
    }

    /// Build the interaction payload targeting the configured verifier.
    pub fn build_interaction_payload(&self, signed: &SignedOptionParams) -> Bytes {
        build_interaction_payload(signed, self.constants.options_nft())
    }
}

impl<Sign, V, G> OptionOrderBuilder<Sign, V, G>
where
    Sign: Signer + Send + Sync,
{
    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, SigningError>>,
    ) -> Result<T, BuilderError> {
        match tokio::time::timeout(self.signing_timeout, fut).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => {
                warn!(timeout = ?self.signing_timeout, "signer timed out");
                Err(BuilderError::SigningTimeout(self.signing_timeout))
            }
        }
    }

    /// Sign a built order under the order domain.
    pub async fn sign_order(&self, built: &BuiltOrder) -> Result<SignedOrderHash, BuilderError> {
        self.bounded(sign_order(
            &built.order,
            &self.signer,
            &self.order_domain,
            &built.original_addresses,
        ))
        .await
    }

    /// Sign option terms with `salt` under the option domain.
    pub async fn sign_option_params(
        &self,
        terms: &OptionTerms,
        salt: U256,
    ) -> Result<SignedOptionParams, BuilderError> {
        self.bounded(sign_option_params(terms, &self.signer, self.hash_manager.domain(), salt)).await
    }
}

impl<Sign, V, G> OptionOrderBuilder<Sign, V, G>
where
    Sign: Signer + Send + Sync,
    V: OptionHashVerifier + Sync,
    G: SaltGenerator + Sync,
{
    /// Build, sign and package an option order.
    ///
    /// The only external calls are the salt availability check and the two
    /// signatures, each bounded by its timeout. Nothing is written anywhere
    /// until the caller persists the result.
    #[instrument(skip_all, fields(maker = %self.signer.address()))]
    pub async fn build_complete_option(
        &self,
        request: CompleteOptionRequest,
    ) -> Result<CompleteOrder, BuilderError> {
        let maker = self.signer.address();
        let terms = request.terms;
        let now = Utc::now().timestamp() as u64;

        let (option_salt, traits_nonce, scheme) = match request.replay {
            ReplayProtection::Salt(Some(salt)) => {
                self.hash_manager.validate(maker, &terms, salt, now).await?;
                (salt, salt_nonce(salt), ReplayScheme::Salt)
            }
            ReplayProtection::Salt(None) => {
                terms.validate(maker, now)?;
                let max_attempts = self.hash_manager.options().max_attempts;
                let salt = self.hash_manager.find_available_salt(maker, &terms, max_attempts).await?;
                (salt, salt_nonce(salt), ReplayScheme::Salt)
            }
            ReplayProtection::SequentialNonce(nonce) => {
                if nonce > crate::MAX_NONCE {
                    return Err(InvalidParameter::NonceOutOfRange { nonce, max: crate::MAX_NONCE }
                        .into());
                }
                let salt = U256::from(nonce);
                self.hash_manager.validate(maker, &terms, salt, now).await?;
                (salt, nonce, ReplayScheme::SequentialNonce)
            }
        };

        let built = self.build_order(OrderRequest {
            maker,
            receiver: request.receiver,
            maker_asset: terms.underlying_asset,
            taker_asset: terms.strike_asset,
            making_amount: terms.option_amount,
            taking_amount: terms.premium,
            salt: request.order_salt,
            traits: request.base_traits.with_nonce(traits_nonce),
        });

        let order_signature = self.sign_order(&built).await?;
        let option = self.sign_option_params(&terms, option_salt).await?;
        let interaction = self.build_interaction_payload(&option);
        debug!(order_hash = %order_signature.hash, option_digest = %option.digest, %option_salt, "built option order");

        Ok(CompleteOrder {
            order: built.limit_order(),
            order_hash: order_signature.hash,
            order_signature: order_signature.signature,
            terms,
            option_salt,
            option_digest: option.digest,
            option_signature: option.signature,
            interaction,
            scheme,
        })
    }

    /// Build an option order and store it as open.
    pub async fn persist_complete_option<S>(
        &self,
        store: &S,
        request: CompleteOptionRequest,
    ) -> Result<StoredOrder, BuilderError>
    where
        S: OrderStore + Sync,
    {
        let complete = self.build_complete_option(request).await?;
        let now = Utc::now().timestamp() as u64;
        insert_order(store, complete, now).await.map_err(Into::into)
    }
}

/// Maker traits nonce for a salt-protected option: the salt's low 40 bits.
fn salt_nonce(salt: U256) -> u64 {
    (salt & U256::from(crate::MAX_NONCE)).saturating_to()
}
