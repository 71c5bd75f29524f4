use crate::config::RegionConfig;
use crate::error::ConfigError;
use crate::memory::MemoryCache;
use crate::overflow::{DiscardOverflow, OverflowStore};
use crate::policy::MemoryPolicy;
use crate::shared::RegionShared;

use core::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

/// A builder for a region's [`MemoryCache`].
///
/// The region configuration is mandatory; the policy defaults to the one
/// named by `config.policy`, and the overflow store defaults to
/// [`DiscardOverflow`].
pub struct MemoryCacheBuilder<K, V, H = ahash::RandomState> {
  config: RegionConfig,
  policy: Option<Arc<dyn MemoryPolicy<K, V>>>,
  overflow: Option<Arc<dyn OverflowStore<K, V>>>,
  hasher: H,
}

impl<K, V, H> fmt::Debug for MemoryCacheBuilder<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MemoryCacheBuilder")
      .field("config", &self.config)
      .field("has_custom_policy", &self.policy.is_some())
      .field("has_overflow", &self.overflow.is_some())
      .finish_non_exhaustive()
  }
}

impl<K, V> MemoryCacheBuilder<K, V, ahash::RandomState> {
  /// Starts a builder for the region described by `config`.
  pub fn new(config: RegionConfig) -> Self {
    Self {
      config,
      policy: None,
      overflow: None,
      hasher: ahash::RandomState::new(),
    }
  }
}

impl<K, V, H> MemoryCacheBuilder<K, V, H> {
  /// Overrides the policy named in the configuration with a custom strategy.
  pub fn policy<P>(mut self, policy: P) -> Self
  where
    P: MemoryPolicy<K, V> + 'static,
  {
    self.policy = Some(Arc::new(policy));
    self
  }

  /// Sets the store that receives evicted elements.
  pub fn overflow<O>(mut self, overflow: O) -> Self
  where
    O: OverflowStore<K, V> + 'static,
  {
    self.overflow = Some(Arc::new(overflow));
    self
  }

  /// Sets an overflow store that is shared with other owners.
  pub fn shared_overflow(mut self, overflow: Arc<dyn OverflowStore<K, V>>) -> Self {
    self.overflow = Some(overflow);
    self
  }

  /// Sets the hasher for the key map.
  pub fn hasher<H2>(self, hasher: H2) -> MemoryCacheBuilder<K, V, H2> {
    MemoryCacheBuilder {
      config: self.config,
      policy: self.policy,
      overflow: self.overflow,
      hasher,
    }
  }
}

impl<K, V, H> MemoryCacheBuilder<K, V, H>
where
  K: Eq + Hash + Clone + Send + Sync + fmt::Debug + 'static,
  V: Send + Sync + 'static,
  H: BuildHasher + Clone + Send + Sync + 'static,
{
  /// Validates the configuration and builds the memory cache.
  pub fn build(self) -> Result<MemoryCache<K, V, H>, ConfigError> {
    self.config.validate()?;

    let policy = self
      .policy
      .unwrap_or_else(|| self.config.policy.build::<K, V>());
    let overflow = self
      .overflow
      .unwrap_or_else(|| Arc::new(DiscardOverflow));

    let shared = RegionShared::new(self.config, policy, overflow, self.hasher);
    Ok(MemoryCache::from_shared(shared))
  }
}
