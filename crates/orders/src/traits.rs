use alloy::primitives::{Address, B256};
use core::future::Future;
use lop_options_bindings::OptionParams;
use lop_options_types::{OrderFilter, OrderStatus, StoredOrder};

/// Read access to the options NFT verifier's consumed-digest set.
///
/// Implementors only ever read verifier state. Digests are marked used by
/// the on-chain fill, never by this library.
pub trait OptionHashVerifier {
    /// The error type returned by verifier reads.
    type Error: core::error::Error + Send + Sync + 'static;

    /// True if the digest of `params` has not been consumed.
    fn is_option_hash_available(
        &self,
        params: &OptionParams,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// The verifier's own digest of `params`.
    fn option_hash(
        &self,
        params: &OptionParams,
    ) -> impl Future<Output = Result<B256, Self::Error>> + Send;
}

/// A per-maker monotonic counter backing the legacy nonce scheme.
///
/// Implementations are injected into [`NonceManager`]. There is no process
/// wide counter.
///
/// [`NonceManager`]: crate::NonceManager
pub trait NonceCounter {
    /// The error type returned by counter operations.
    type Error: core::error::Error + Send + Sync + 'static;

    /// The last nonce consumed by `maker`, zero if none.
    fn current_nonce(&self, maker: Address) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Record `nonce` as the last nonce consumed by `maker`.
    fn set_nonce(
        &self,
        maker: Address,
        nonce: u64,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Forget all nonces consumed by `maker`.
    fn reset_nonce(&self, maker: Address) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Persistence for created orders, keyed by order hash.
///
/// This is a plain key-value interface. Status transition rules are applied
/// by the callers in [`crate::store`], not by implementations.
pub trait OrderStore {
    /// The error type returned by store operations.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Insert an order. Returns `false` and leaves the store unchanged if an
    /// order with the same hash exists.
    fn insert(&self, order: StoredOrder) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Get an order by hash.
    fn get_by_hash(
        &self,
        order_hash: B256,
    ) -> impl Future<Output = Result<Option<StoredOrder>, Self::Error>> + Send;

    /// Overwrite an order's stored status. Returns `false` if no such order
    /// exists.
    fn update_status(
        &self,
        order_hash: B256,
        status: OrderStatus,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// List orders passing `filter` at time `now`.
    fn list(
        &self,
        filter: OrderFilter,
        now: u64,
    ) -> impl Future<Output = Result<Vec<StoredOrder>, Self::Error>> + Send;

    /// Remove every order. Administrative only.
    fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
