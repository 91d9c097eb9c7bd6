use crate::NonceCounter;
use alloy::primitives::Address;
use tracing::{debug, instrument};

/// The largest nonce the 40-bit maker traits field can carry.
pub const MAX_NONCE: u64 = (1 << 40) - 1;

/// Errors returned by [`NonceManager`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NonceError {
    /// Counter backend error.
    #[error("nonce counter error: {0}")]
    Counter(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// The maker has used every nonce that fits in maker traits.
    #[error("maker {0} has no nonces left")]
    Exhausted(Address),
}

impl NonceError {
    /// True if the same request may succeed when retried.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Counter(_))
    }
}

/// Sequential per-maker nonces, the legacy replay protection scheme.
///
/// # Single writer
///
/// Two orders prepared at once for the same maker read the same "next"
/// nonce. Callers must serialize nonce-consuming operations per maker. This
/// type takes no lock. Prefer the salt scheme in
/// [`OrderHashManager`](crate::OrderHashManager) for concurrent
/// preparation.
#[derive(Debug, Clone)]
pub struct NonceManager<C> {
    counter: C,
}

impl<C> NonceManager<C> {
    /// Create a manager over an injected counter.
    pub const fn new(counter: C) -> Self {
        Self { counter }
    }

    /// Get a reference to the counter.
    pub const fn counter(&self) -> &C {
        &self.counter
    }
}

impl<C> NonceManager<C>
where
    C: NonceCounter + Sync,
{
    /// The last nonce consumed by `maker`.
    pub async fn get_current_nonce(&self, maker: Address) -> Result<u64, NonceError> {
        self.counter.current_nonce(maker).await.map_err(|e| NonceError::Counter(Box::new(e)))
    }

    /// The nonce the next order by `maker` should use.
    pub async fn get_next_nonce(&self, maker: Address) -> Result<u64, NonceError> {
        let current = self.get_current_nonce(maker).await?;
        match current.checked_add(1) {
            Some(next) if next <= MAX_NONCE => Ok(next),
            _ => Err(NonceError::Exhausted(maker)),
        }
    }

    /// True if `nonce` has not been consumed by `maker`.
    pub async fn is_nonce_available(&self, maker: Address, nonce: u64) -> Result<bool, NonceError> {
        Ok(nonce <= MAX_NONCE && nonce > self.get_current_nonce(maker).await?)
    }

    /// Consume the next nonce for `maker`, returning it.
    #[instrument(skip_all, fields(%maker))]
    pub async fn advance_nonce(&self, maker: Address) -> Result<u64, NonceError> {
        let next = self.get_next_nonce(maker).await?;
        self.counter.set_nonce(maker, next).await.map_err(|e| NonceError::Counter(Box::new(e)))?;
        debug!(next, "advanced nonce");
        Ok(next)
    }

    /// Forget every nonce consumed by `maker`.
    #[instrument(skip_all, fields(%maker))]
    pub async fn reset_nonce(&self, maker: Address) -> Result<(), NonceError> {
        self.counter.reset_nonce(maker).await.map_err(|e| NonceError::Counter(Box::new(e)))
    }
}
