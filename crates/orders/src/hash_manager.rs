use crate::{KeccakSaltGenerator, OptionHashVerifier, SaltGenerator};
use alloy::primitives::{Address, B256, U256};
use futures_util::future::try_join_all;
use lop_options_types::{
    parse_address, parse_salt, signing::{option_digest, OptionDomain}, InvalidParameter,
    OptionTerms, RelayerConfig,
};
use std::{collections::HashSet, future::Future, time::Duration};
use tracing::{debug, instrument, warn};

/// Errors returned by [`OrderHashManager`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OrderHashError {
    /// An address string is malformed.
    #[error("invalid address format: {0:?}")]
    InvalidAddressFormat(String),
    /// The option terms or salt are invalid.
    #[error("invalid option parameter: {0}")]
    InvalidParameter(#[from] InvalidParameter),
    /// The verifier could not be read, or did not answer in time.
    #[error("option verifier unavailable: {0}")]
    VerifierUnavailable(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// The digest for this salt has already been consumed.
    #[error("option digest {digest} for salt {salt} is already used")]
    DigestCollision {
        /// The consumed digest.
        digest: B256,
        /// The salt that produced it.
        salt: U256,
    },
    /// No unused salt was found within the attempt budget.
    #[error("no available salt found in {attempts} attempts")]
    SaltExhaustion {
        /// Number of salts tried.
        attempts: u32,
    },
    /// The local digest differs from the verifier's.
    #[error("local option digest {local} differs from verifier digest {remote}")]
    DigestMismatch {
        /// Digest computed locally.
        local: B256,
        /// Digest computed by the verifier.
        remote: B256,
    },
}

impl OrderHashError {
    /// True if the same request may succeed when retried.
    ///
    /// A collision needs a fresh salt, not a retry, and exhaustion or a
    /// digest mismatch point at a bug rather than a transient fault.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::VerifierUnavailable(_))
    }
}

/// Verifier state for one `(maker, terms, salt)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaltStatus {
    /// The digest has not been consumed.
    Available,
    /// The digest has been consumed.
    Used,
}

/// An option with a salt the verifier reported available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderConfig {
    /// The maker.
    pub maker: Address,
    /// The option terms.
    pub terms: OptionTerms,
    /// The available salt.
    pub salt: U256,
    /// The option digest for the salt.
    pub digest: B256,
}

/// Options for configuring the [`OrderHashManager`].
#[derive(Debug, Clone, Copy)]
pub struct HashManagerOptions {
    /// Salt search attempt budget.
    pub max_attempts: u32,
    /// Bound on each verifier read.
    pub verifier_timeout: Duration,
    /// Pause between salt attempts.
    pub retry_delay: Duration,
}

impl Default for HashManagerOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl HashManagerOptions {
    /// Create a new [`HashManagerOptions`] with default values.
    pub const fn new() -> Self {
        Self {
            max_attempts: lop_options_types::config::DEFAULT_MAX_SALT_ATTEMPTS,
            verifier_timeout: lop_options_types::config::DEFAULT_VERIFIER_TIMEOUT,
            retry_delay: Duration::from_millis(10),
        }
    }

    /// Set the attempt budget.
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the verifier timeout.
    pub const fn with_verifier_timeout(mut self, timeout: Duration) -> Self {
        self.verifier_timeout = timeout;
        self
    }

    /// Set the pause between attempts.
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }
}

impl From<&RelayerConfig> for HashManagerOptions {
    fn from(config: &RelayerConfig) -> Self {
        Self::new()
            .with_max_attempts(config.max_salt_attempts())
            .with_verifier_timeout(config.verifier_timeout())
    }
}

/// Computes option digests and finds salts whose digest the verifier has
/// not consumed.
///
/// Nothing is reserved between calls. Every search re-derives a fresh salt
/// and re-checks it, so concurrent searches for the same maker need no
/// coordination.
///
/// `OrderHashManager` is generic over:
/// - `V`: An [`OptionHashVerifier`] answering availability reads
/// - `G`: A [`SaltGenerator`] proposing candidate salts
#[derive(Debug, Clone)]
pub struct OrderHashManager<V, G = KeccakSaltGenerator> {
    verifier: V,
    generator: G,
    domain: OptionDomain,
    options: HashManagerOptions,
}

impl<V> OrderHashManager<V> {
    /// Create a manager with the default salt generator.
    pub const fn new(verifier: V, domain: OptionDomain, options: HashManagerOptions) -> Self {
        Self::with_generator(verifier, KeccakSaltGenerator::new(), domain, options)
    }
}

impl<V, G> OrderHashManager<V, G> {
    /// Create a manager with a custom salt generator.
    pub const fn with_generator(
        verifier: V,
        generator: G,
        domain: OptionDomain,
        options: HashManagerOptions,
    ) -> Self {
        Self { verifier, generator, domain, options }
    }

    /// Get a reference to the verifier.
    pub const fn verifier(&self) -> &V {
        &self.verifier
    }

    /// Get a reference to the salt generator.
    pub const fn generator(&self) -> &G {
        &self.generator
    }

    /// Get a reference to the option domain.
    pub const fn domain(&self) -> &OptionDomain {
        &self.domain
    }

    /// Get a reference to the options.
    pub const fn options(&self) -> &HashManagerOptions {
        &self.options
    }

    /// The option digest for `terms` bound to `maker` and `salt`. Matches the
    /// verifier's `generateOptionHash`.
    pub fn compute_digest(&self, maker: Address, terms: &OptionTerms, salt: U256) -> B256 {
        option_digest(&terms.to_params(maker, salt), &self.domain)
    }
}

impl<V, G> OrderHashManager<V, G>
where
    V: OptionHashVerifier + Sync,
{
    async fn bounded<T, E>(
        &self,
        fut: impl Future<Output = Result<T, E>>,
    ) -> Result<T, OrderHashError>
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        match tokio::time::timeout(self.options.verifier_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => Err(OrderHashError::VerifierUnavailable(Box::new(error))),
            Err(elapsed) => Err(OrderHashError::VerifierUnavailable(Box::new(elapsed))),
        }
    }

    /// Ask the verifier whether the digest for `salt` is unused.
    ///
    /// A timed-out read is an error, never an answer.
    #[instrument(skip_all, fields(%maker, %salt))]
    pub async fn check_salt(
        &self,
        maker: Address,
        terms: &OptionTerms,
        salt: U256,
    ) -> Result<SaltStatus, OrderHashError> {
        let params = terms.to_params(maker, salt);
        let available = self
            .bounded(self.verifier.is_option_hash_available(&params))
            .await
            .inspect_err(|e| warn!(%e, "verifier availability read failed"))?;

        Ok(if available { SaltStatus::Available } else { SaltStatus::Used })
    }

    /// True if the digest for `salt` is unused.
    pub async fn is_available(
        &self,
        maker: Address,
        terms: &OptionTerms,
        salt: U256,
    ) -> Result<bool, OrderHashError> {
        self.check_salt(maker, terms, salt).await.map(|status| status == SaltStatus::Available)
    }

    /// Check terms and salt for `maker` at time `now`, including current
    /// verifier availability. Parameter checks run first, so invalid terms
    /// never reach the verifier.
    pub async fn validate(
        &self,
        maker: Address,
        terms: &OptionTerms,
        salt: U256,
        now: u64,
    ) -> Result<(), OrderHashError> {
        terms.validate(maker, now)?;

        match self.check_salt(maker, terms, salt).await? {
            SaltStatus::Available => Ok(()),
            SaltStatus::Used => Err(OrderHashError::DigestCollision {
                digest: self.compute_digest(maker, terms, salt),
                salt,
            }),
        }
    }

    /// [`Self::validate`] for an unparsed maker address and salt.
    pub async fn validate_raw(
        &self,
        maker: &str,
        terms: &OptionTerms,
        salt: &str,
        now: u64,
    ) -> Result<(), OrderHashError> {
        let maker =
            parse_address(maker).map_err(|_| OrderHashError::InvalidAddressFormat(maker.into()))?;
        let salt = parse_salt(salt)?;
        self.validate(maker, terms, salt, now).await
    }

    /// Compare the local digest against the verifier's.
    #[instrument(skip_all, fields(%maker, %salt))]
    pub async fn check_digest_agreement(
        &self,
        maker: Address,
        terms: &OptionTerms,
        salt: U256,
    ) -> Result<B256, OrderHashError> {
        let params = terms.to_params(maker, salt);
        let local = option_digest(&params, &self.domain);
        let remote = self.bounded(self.verifier.option_hash(&params)).await?;

        if local != remote {
            warn!(%local, %remote, "option digest disagreement");
            return Err(OrderHashError::DigestMismatch { local, remote });
        }
        Ok(local)
    }
}

impl<V, G> OrderHashManager<V, G>
where
    V: OptionHashVerifier + Sync,
    G: SaltGenerator + Sync,
{
    /// Propose salts until the verifier reports one available, trying at
    /// most `max_attempts` salts.
    ///
    /// Verifier failures end the search immediately.
    #[instrument(skip_all, fields(%maker, max_attempts))]
    pub async fn find_available_salt(
        &self,
        maker: Address,
        terms: &OptionTerms,
        max_attempts: u32,
    ) -> Result<U256, OrderHashError> {
        self.search(maker, terms, 0, max_attempts, &HashSet::new()).await
    }

    async fn search(
        &self,
        maker: Address,
        terms: &OptionTerms,
        first_attempt: u32,
        max_attempts: u32,
        exclude: &HashSet<U256>,
    ) -> Result<U256, OrderHashError> {
        for attempt in 0..max_attempts {
            if attempt > 0 && !self.options.retry_delay.is_zero() {
                tokio::time::sleep(self.options.retry_delay).await;
            }

            let salt = self.generator.generate(maker, terms, first_attempt.saturating_add(attempt));
            if exclude.contains(&salt) {
                debug!(%salt, attempt, "salt already taken in batch");
                continue;
            }

            match self.check_salt(maker, terms, salt).await? {
                SaltStatus::Available => {
                    debug!(%salt, attempt, "found available salt");
                    return Ok(salt);
                }
                SaltStatus::Used => {
                    warn!(%salt, attempt, "option digest collision, trying a new salt");
                }
            }
        }
        Err(OrderHashError::SaltExhaustion { attempts: max_attempts })
    }

    /// Find available salts for `count` orders on the same terms.
    ///
    /// Searches run concurrently. A salt found twice within the batch is
    /// searched again, so the batch never repeats a salt. Nothing is
    /// reserved against other callers.
    #[instrument(skip_all, fields(%maker, count))]
    pub async fn create_parallel_orders(
        &self,
        maker: Address,
        terms: &OptionTerms,
        count: u32,
    ) -> Result<Vec<OrderConfig>, OrderHashError> {
        let max_attempts = self.options.max_attempts;
        let none = HashSet::new();
        let searches = (0..count)
            .map(|i| self.search(maker, terms, i.saturating_mul(max_attempts), max_attempts, &none));
        let found = try_join_all(searches).await?;

        let mut taken = HashSet::with_capacity(found.len());
        let mut configs = Vec::with_capacity(found.len());
        for (i, mut salt) in (0u32..).zip(found) {
            if !taken.insert(salt) {
                let first_attempt = count.saturating_add(i).saturating_mul(max_attempts);
                salt = self.search(maker, terms, first_attempt, max_attempts, &taken).await?;
                taken.insert(salt);
            }
            configs.push(OrderConfig {
                maker,
                terms: *terms,
                salt,
                digest: self.compute_digest(maker, terms, salt),
            });
        }
        Ok(configs)
    }
}
