//! Mock implementations of the lop-options-orders backend traits, and a
//! signer that never answers.

use alloy::{
    primitives::{Address, ChainId, Signature, B256, U256},
    signers::{local::PrivateKeySigner, Signer},
};
use core::convert::Infallible;
use lop_options_bindings::OptionParams;
use lop_options_orders::{NonceCounter, OptionHashVerifier, OrderStore, SaltGenerator};
use lop_options_types::{
    signing::{option_digest, OptionDomain},
    OptionTerms, OrderFilter, OrderStatus, StoredOrder,
};
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

/// Error returned by a [`MockOptionVerifier`] set to fail.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("mock verifier unreachable")]
pub struct MockVerifierError;

/// A mock [`OptionHashVerifier`] holding a consumed-digest set.
///
/// Digests are computed under the verifier's own domain, as the contract
/// does. Clones share state.
#[derive(Debug, Clone)]
pub struct MockOptionVerifier {
    domain: OptionDomain,
    used: Arc<Mutex<HashSet<B256>>>,
    calls: Arc<AtomicU64>,
    failing: Arc<AtomicBool>,
    delay: Arc<Mutex<Option<Duration>>>,
    hash_override: Arc<Mutex<Option<B256>>>,
}

impl MockOptionVerifier {
    /// Create a verifier with nothing consumed.
    pub fn new(domain: OptionDomain) -> Self {
        Self {
            domain,
            used: Default::default(),
            calls: Default::default(),
            failing: Default::default(),
            delay: Default::default(),
            hash_override: Default::default(),
        }
    }

    /// The verifier's digest of `params`.
    pub fn digest(&self, params: &OptionParams) -> B256 {
        option_digest(params, &self.domain)
    }

    /// Mark a digest as consumed.
    pub fn mark_used(&self, digest: B256) {
        self.used.lock().unwrap().insert(digest);
    }

    /// Mark the digest of `terms` bound to `maker` and `salt` as consumed,
    /// as a fill of that option would.
    pub fn consume(&self, maker: Address, terms: &OptionTerms, salt: U256) -> B256 {
        let digest = self.digest(&terms.to_params(maker, salt));
        self.mark_used(digest);
        digest
    }

    /// Number of reads served, failed ones included.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every read fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Delay every read.
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap() = delay;
    }

    /// Report `digest` from `option_hash` regardless of input.
    pub fn set_hash_override(&self, digest: Option<B256>) {
        *self.hash_override.lock().unwrap() = digest;
    }

    async fn enter(&self) -> Result<(), MockVerifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(MockVerifierError);
        }
        Ok(())
    }
}

impl OptionHashVerifier for MockOptionVerifier {
    type Error = MockVerifierError;

    async fn is_option_hash_available(&self, params: &OptionParams) -> Result<bool, Self::Error> {
        self.enter().await?;
        let digest = self.digest(params);
        Ok(!self.used.lock().unwrap().contains(&digest))
    }

    async fn option_hash(&self, params: &OptionParams) -> Result<B256, Self::Error> {
        self.enter().await?;
        let hash_override = *self.hash_override.lock().unwrap();
        Ok(hash_override.unwrap_or_else(|| self.digest(params)))
    }
}

/// A [`SaltGenerator`] replaying a fixed sequence. Attempt `n` gets the
/// `n`-th salt, attempts past the end get the last one.
#[derive(Debug, Clone)]
pub struct SequenceSaltGenerator {
    salts: Vec<U256>,
}

impl SequenceSaltGenerator {
    /// Create a generator over `salts`.
    pub fn new(salts: impl IntoIterator<Item = u64>) -> Self {
        Self { salts: salts.into_iter().map(U256::from).collect() }
    }
}

impl SaltGenerator for SequenceSaltGenerator {
    fn generate(&self, _maker: Address, _terms: &OptionTerms, attempt: u32) -> U256 {
        let idx = (attempt as usize).min(self.salts.len().saturating_sub(1));
        self.salts.get(idx).copied().unwrap_or_default()
    }
}

/// An in-memory [`NonceCounter`]. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNonceCounter {
    nonces: Arc<Mutex<HashMap<Address, u64>>>,
}

impl InMemoryNonceCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }
}

impl NonceCounter for InMemoryNonceCounter {
    type Error = Infallible;

    async fn current_nonce(&self, maker: Address) -> Result<u64, Self::Error> {
        Ok(self.nonces.lock().unwrap().get(&maker).copied().unwrap_or_default())
    }

    async fn set_nonce(&self, maker: Address, nonce: u64) -> Result<(), Self::Error> {
        self.nonces.lock().unwrap().insert(maker, nonce);
        Ok(())
    }

    async fn reset_nonce(&self, maker: Address) -> Result<(), Self::Error> {
        self.nonces.lock().unwrap().remove(&maker);
        Ok(())
    }
}

/// An in-memory [`OrderStore`]. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<Mutex<BTreeMap<B256, StoredOrder>>>,
}

impl InMemoryOrderStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders.
    pub fn len(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OrderStore for InMemoryOrderStore {
    type Error = Infallible;

    async fn insert(&self, order: StoredOrder) -> Result<bool, Self::Error> {
        let mut orders = self.orders.lock().unwrap();
        if orders.contains_key(&order.order_hash()) {
            return Ok(false);
        }
        orders.insert(order.order_hash(), order);
        Ok(true)
    }

    async fn get_by_hash(&self, order_hash: B256) -> Result<Option<StoredOrder>, Self::Error> {
        Ok(self.orders.lock().unwrap().get(&order_hash).cloned())
    }

    async fn update_status(&self, order_hash: B256, status: OrderStatus) -> Result<bool, Self::Error> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .get_mut(&order_hash)
            .map(|order| order.status = status)
            .is_some())
    }

    async fn list(&self, filter: OrderFilter, now: u64) -> Result<Vec<StoredOrder>, Self::Error> {
        let mut orders: Vec<_> = self
            .orders
            .lock()
            .unwrap()
            .values()
            .filter(|order| filter.matches(order, now))
            .cloned()
            .collect();
        orders.sort_by_key(|order| order.created_at);
        Ok(orders)
    }

    async fn clear(&self) -> Result<(), Self::Error> {
        self.orders.lock().unwrap().clear();
        Ok(())
    }
}

/// A [`Signer`] that reports a real key's address but never produces a
/// signature, like a remote signer waiting on a confirmation that never
/// comes.
#[derive(Debug, Clone)]
pub struct StalledSigner {
    inner: PrivateKeySigner,
}

impl StalledSigner {
    /// Stall signing for `inner`'s address.
    pub const fn new(inner: PrivateKeySigner) -> Self {
        Self { inner }
    }
}

#[async_trait::async_trait]
impl Signer for StalledSigner {
    async fn sign_hash(&self, _hash: &B256) -> alloy::signers::Result<Signature> {
        std::future::pending().await
    }

    fn address(&self) -> Address {
        self.inner.address()
    }

    fn chain_id(&self) -> Option<ChainId> {
        self.inner.chain_id()
    }

    fn set_chain_id(&mut self, chain_id: Option<ChainId>) {
        self.inner.set_chain_id(chain_id);
    }
}
