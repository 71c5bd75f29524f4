use crate::builder::MemoryCacheBuilder;
use crate::config::RegionConfig;
use crate::descriptor::MemoryElementDescriptor;
use crate::element::CacheElement;
use crate::error::ConfigError;
use crate::metrics::{MemoryCacheStats, Metrics};
use crate::overflow::OverflowStore;
use crate::shared::{CacheStatus, RegionShared};

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};
use tracing::{debug, info, warn};

/// Separator between the components of hierarchical string keys, e.g.
/// `"tiles:12:"` names every key below zoom level 12.
pub const NAME_COMPONENT_DELIMITER: &str = ":";

/// The bounded in-memory cache of one region.
///
/// Holds a concurrent key map and an eviction list ordered by the region's
/// [`MemoryPolicy`](crate::policy::MemoryPolicy). When an update pushes the
/// region past `max_objects`, elements are evicted from the list tail and
/// handed to the region's [`OverflowStore`] before `update` returns.
///
/// The handle is cheap to clone; clones share the same region.
pub struct MemoryCache<K, V, H = ahash::RandomState> {
  pub(crate) shared: Arc<RegionShared<K, V, H>>,
}

impl<K, V, H> Clone for MemoryCache<K, V, H> {
  fn clone(&self) -> Self {
    Self {
      shared: Arc::clone(&self.shared),
    }
  }
}

impl<K, V, H> fmt::Debug for MemoryCache<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MemoryCache")
      .field("shared", &self.shared)
      .finish()
  }
}

impl<K, V> MemoryCache<K, V>
where
  K: Eq + Hash + Clone + Send + Sync + fmt::Debug + 'static,
  V: Send + Sync + 'static,
{
  /// Sets up the memory cache for a region: validates the configuration,
  /// creates the map and list, and marks the cache alive.
  ///
  /// The policy is taken from `config.policy`. Use [`MemoryCacheBuilder`]
  /// for a custom policy or hasher.
  pub fn initialize<O>(config: RegionConfig, overflow: O) -> Result<Self, ConfigError>
  where
    O: OverflowStore<K, V> + 'static,
  {
    MemoryCacheBuilder::new(config).overflow(overflow).build()
  }
}

impl<K, V, H> MemoryCache<K, V, H>
where
  K: Eq + Hash + Clone + Send + Sync + fmt::Debug + 'static,
  V: Send + Sync + 'static,
  H: BuildHasher + Clone + Send + Sync + 'static,
{
  pub(crate) fn from_shared(shared: RegionShared<K, V, H>) -> Self {
    info!(
      region = %shared.config.name,
      policy = shared.policy.name(),
      max_objects = shared.config.max_objects,
      spool_chunk_size = shared.config.spool_chunk_size,
      shards = shared.store.num_shards(),
      "initialized memory cache"
    );
    Self {
      shared: Arc::new(shared),
    }
  }

  /// Looks up an element and lets the policy reposition it.
  ///
  /// The map lookup takes no region lock; the reposition does.
  pub fn get(&self, key: &K) -> Option<Arc<CacheElement<K, V>>> {
    let shared = &self.shared;
    debug!(region = %shared.name(), key = ?key, "getting item");

    let Some(descriptor) = shared.store.get(key) else {
      Metrics::incr(&shared.metrics.misses);
      debug!(region = %shared.name(), key = ?key, "memory cache miss");
      return None;
    };

    Metrics::incr(&shared.metrics.hits);
    {
      let mut list = shared.list.lock();
      shared.policy.adjust_list_for_get(&mut list, descriptor.node);
    }
    debug!(region = %shared.name(), key = ?key, "memory cache hit");

    if shared.config.verify_consistency {
      shared.verify();
    }
    Some(descriptor.element)
  }

  /// Looks up an element without touching eviction order or counters.
  ///
  /// Meant for reporting and inspection.
  pub fn get_quiet(&self, key: &K) -> Option<Arc<CacheElement<K, V>>> {
    let shared = &self.shared;
    match shared.store.get(key) {
      Some(descriptor) => {
        debug!(region = %shared.name(), key = ?key, "memory cache quiet hit");
        Some(descriptor.element)
      }
      None => {
        debug!(region = %shared.name(), key = ?key, "memory cache quiet miss");
        None
      }
    }
  }

  /// Calls [`get`](Self::get) for each key. Misses are absent from the result.
  pub fn get_multiple<'a, I>(&self, keys: I) -> HashMap<K, Arc<CacheElement<K, V>>>
  where
    I: IntoIterator<Item = &'a K>,
    K: 'a,
  {
    let mut found = HashMap::new();
    for key in keys {
      if let Some(element) = self.get(key) {
        found.insert(key.clone(), element);
      }
    }
    found
  }

  /// Stores an element, replacing any element resident under the same key.
  ///
  /// The policy places the new element; the previous one for the key, if
  /// any, is unlinked. If the region is then over `max_objects`, elements are
  /// spooled to the overflow store before this returns.
  pub fn update(&self, element: CacheElement<K, V>) {
    let shared = &self.shared;
    let element = Arc::new(element);
    let key = element.key().clone();

    {
      let mut list = shared.list.lock();
      Metrics::incr(&shared.metrics.puts);

      let node = shared.policy.adjust_list_for_update(&mut list, Arc::clone(&element));
      let descriptor = MemoryElementDescriptor::new(element, node);

      if let Some(old) = shared.store.insert(key, descriptor) {
        list.remove(old.node);
      }
    }

    if shared.config.verify_consistency {
      shared.verify();
    }

    shared.spool_if_needed();
  }

  /// Shorthand for `update` with default element attributes.
  pub fn put(&self, key: K, value: V) {
    self.update(CacheElement::new(key, value));
  }

  /// Removes one key. Returns `false` if it was not resident.
  pub fn remove(&self, key: &K) -> bool {
    let shared = &self.shared;
    debug!(region = %shared.name(), key = ?key, "removing item");

    let removed = {
      let mut list = shared.list.lock();
      match shared.store.remove(key) {
        Some(descriptor) => {
          list.remove(descriptor.node);
          true
        }
        None => false,
      }
    };

    if removed {
      Metrics::incr(&shared.metrics.removals);
    }
    removed
  }

  /// Removes every resident key accepted by `predicate`, returning how many
  /// were removed.
  pub fn remove_matching<F>(&self, predicate: F) -> usize
  where
    F: FnMut(&K) -> bool,
  {
    let removed = self.shared.remove_matching(predicate);
    Metrics::add(&self.shared.metrics.removals, removed as u64);
    debug!(region = %self.shared.name(), removed, "removed matching items");
    removed
  }

  /// Removes every key in a name hierarchy, i.e. every key starting with
  /// `prefix`. The prefix conventionally ends with
  /// [`NAME_COMPONENT_DELIMITER`]. Returns whether anything was removed.
  pub fn remove_hierarchy(&self, prefix: &str) -> bool
  where
    K: AsRef<str>,
  {
    self.remove_matching(|key| key.as_ref().starts_with(prefix)) > 0
  }

  /// Clears the map and the list.
  ///
  /// Lock-free readers that already hold an element keep it; they may observe
  /// the region half-cleared while this runs.
  pub fn remove_all(&self) {
    let shared = &self.shared;
    let mut list = shared.list.lock();
    list.remove_all();
    shared.store.clear();
    debug!(region = %shared.name(), "removed all items");
  }

  /// Evicts up to `count` elements from the list tail to the overflow store.
  ///
  /// Returns how many were actually evicted, which is fewer than `count`
  /// when the region holds fewer elements.
  pub fn free_elements(&self, count: usize) -> usize {
    let mut freed = 0;
    while freed < count {
      if self.shared.spool_last_element().is_none() {
        break;
      }
      freed += 1;
    }
    debug!(region = %self.shared.name(), requested = count, freed, "freed elements");
    freed
  }

  /// Hands an element straight to the overflow store, bypassing the map and list.
  pub fn waterfall(&self, element: Arc<CacheElement<K, V>>) {
    self.shared.overflow.spill(element);
  }

  /// The keys currently resident.
  pub fn key_set(&self) -> HashSet<K> {
    let mut keys = HashSet::new();
    self.shared.store.for_each(|key, _| {
      keys.insert(key.clone());
    });
    keys
  }

  /// Number of resident elements.
  pub fn size(&self) -> usize {
    self.shared.store.len()
  }

  pub fn statistics(&self) -> MemoryCacheStats {
    let shared = &self.shared;
    let list_size = shared.list.lock().size();
    shared.metrics.snapshot(
      shared.name(),
      format!("{} Memory Cache", shared.policy.name()),
      shared.store.len(),
      list_size,
    )
  }

  /// Clears the region and resets its counters.
  ///
  /// Only the first call has an effect; later calls are logged and ignored.
  pub fn dispose(&self) {
    let shared = &self.shared;
    if shared.mark_disposed() == CacheStatus::Disposed {
      warn!(region = %shared.name(), "memory cache already disposed");
      return;
    }
    self.remove_all();
    shared.metrics.reset();
    info!(region = %shared.name(), "memory cache disposed");
  }

  /// Checks that the map and the list describe the same set of elements,
  /// logging every problem found. Returns `true` when consistent.
  pub fn verify(&self) -> bool {
    self.shared.verify()
  }

  /// Logs every resident key in map order at debug level.
  pub fn dump_map(&self) {
    self.shared.dump_map();
  }

  /// Logs every resident key in eviction-list order (head first) at debug level.
  pub fn dump_cache_entries(&self) {
    self.shared.dump_cache_entries();
  }

  /// Keys in eviction-list order, head first; the last key is the next victim.
  pub fn keys_in_eviction_order(&self) -> Vec<K> {
    let list = self.shared.list.lock();
    list.iter().map(|(_, element)| element.key().clone()).collect()
  }

  pub fn status(&self) -> CacheStatus {
    self.shared.status()
  }

  pub fn config(&self) -> &RegionConfig {
    &self.shared.config
  }

  pub fn cache_name(&self) -> &str {
    self.shared.name()
  }

  pub fn policy_name(&self) -> &'static str {
    self.shared.policy.name()
  }
}
