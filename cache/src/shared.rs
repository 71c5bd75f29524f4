use crate::config::RegionConfig;
use crate::descriptor::{ElementList, MemoryElementDescriptor};
use crate::element::CacheElement;
use crate::metrics::Metrics;
use crate::overflow::OverflowStore;
use crate::policy::MemoryPolicy;
use crate::store::ShardedStore;

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, warn};

/// Lifecycle state of a region's memory cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CacheStatus {
  /// Initialized and serving requests.
  Alive = 0,
  /// `dispose` has run. Operations still work but the owner is shutting down.
  Disposed = 1,
}

impl CacheStatus {
  fn from_u8(value: u8) -> Self {
    match value {
      0 => CacheStatus::Alive,
      _ => CacheStatus::Disposed,
    }
  }
}

/// The internal, thread-safe core of a region's memory cache.
///
/// Locking discipline: every map mutation and every list mutation happens
/// while `list` is locked, map first-level lookups do not take it. The lock
/// order is always `list`, then a map shard. The overflow store is never
/// called with `list` held.
pub(crate) struct RegionShared<K, V, H> {
  pub(crate) config: RegionConfig,
  pub(crate) store: ShardedStore<K, MemoryElementDescriptor<K, V>, H>,
  pub(crate) list: Mutex<ElementList<K, V>>,
  pub(crate) policy: Arc<dyn MemoryPolicy<K, V>>,
  pub(crate) overflow: Arc<dyn OverflowStore<K, V>>,
  pub(crate) metrics: Metrics,
  status: AtomicU8,
}

impl<K, V, H> fmt::Debug for RegionShared<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RegionShared")
      .field("region", &self.config.name)
      .field("policy", &self.policy.name())
      .field("max_objects", &self.config.max_objects)
      .field("spool_chunk_size", &self.config.spool_chunk_size)
      .field("status", &self.status())
      .finish_non_exhaustive()
  }
}

impl<K, V, H> RegionShared<K, V, H> {
  pub(crate) fn status(&self) -> CacheStatus {
    CacheStatus::from_u8(self.status.load(Ordering::Acquire))
  }

  /// Marks the region disposed, returning the previous status.
  pub(crate) fn mark_disposed(&self) -> CacheStatus {
    CacheStatus::from_u8(self.status.swap(CacheStatus::Disposed as u8, Ordering::AcqRel))
  }
}

impl<K, V, H> RegionShared<K, V, H>
where
  K: Eq + Hash + Clone + fmt::Debug,
  H: BuildHasher + Clone,
{
  pub(crate) fn new(
    config: RegionConfig,
    policy: Arc<dyn MemoryPolicy<K, V>>,
    overflow: Arc<dyn OverflowStore<K, V>>,
    hasher: H,
  ) -> Self {
    let store = ShardedStore::new(config.resolved_shards(), hasher);
    Self {
      config,
      store,
      list: Mutex::new(ElementList::new()),
      policy,
      overflow,
      metrics: Metrics::new(),
      status: AtomicU8::new(CacheStatus::Alive as u8),
    }
  }

  #[inline]
  pub(crate) fn name(&self) -> &str {
    &self.config.name
  }

  /// Spools from the list tail, a chunk at a time, until the region is back
  /// within `max_objects` or the list runs dry.
  pub(crate) fn spool_if_needed(&self) {
    let max_objects = self.config.max_objects;
    let mut size = self.store.len();
    if size <= max_objects {
      return;
    }

    debug!(region = %self.name(), size, max_objects, "memory limit reached, spooling");

    while size > max_objects {
      let chunk = self.config.spool_chunk_size.min(size);
      debug!(
        region = %self.name(),
        size,
        max_objects,
        chunk,
        "spooling chunk to overflow store"
      );

      for _ in 0..chunk {
        if self.spool_last_element().is_none() {
          // A concurrent remove_all can empty both structures; only a map
          // that still holds entries points at a desync.
          let remaining = self.store.len();
          if remaining > 0 {
            warn!(
              region = %self.name(),
              map_size = remaining,
              "eviction list exhausted while the map still holds entries"
            );
            if self.config.verify_consistency {
              self.verify();
            }
          }
          return;
        }
      }
      size = self.store.len();
    }

    debug!(region = %self.name(), map_size = size, "spooling finished");
  }

  /// Evicts the list tail and hands it to the overflow store.
  ///
  /// Returns `None` when the list is empty.
  pub(crate) fn spool_last_element(&self) -> Option<Arc<CacheElement<K, V>>> {
    let element = {
      let mut list = self.list.lock();
      let (node, element) = list.remove_last()?;
      if self
        .store
        .remove_if(element.key(), |descriptor| descriptor.node == node)
        .is_none()
      {
        warn!(
          region = %self.name(),
          key = ?element.key(),
          "spool: map entry missing or owned by another node"
        );
      }
      element
    };

    debug!(region = %self.name(), key = ?element.key(), "spooling element");
    self.overflow.spill(Arc::clone(&element));
    Metrics::incr(&self.metrics.spooled);

    if self.config.verify_consistency {
      // Outside the lock this can report a mismatch where there is none.
      let map_size = self.store.len();
      let list_size = self.list.lock().size();
      if map_size != list_size {
        warn!(
          region = %self.name(),
          map_size,
          list_size,
          "size mismatch after spool"
        );
      }
    }

    Some(element)
  }

  /// Removes every resident key matching `predicate` from both structures.
  pub(crate) fn remove_matching<F>(&self, predicate: F) -> usize
  where
    F: FnMut(&K) -> bool,
  {
    let mut list = self.list.lock();
    let removed = self.store.extract_if(predicate);
    for descriptor in &removed {
      list.remove(descriptor.node);
    }
    removed.len()
  }

  /// Walks list→map and map→list, logging every inconsistency found.
  ///
  /// Holds the structural lock for the whole walk, so the result is exact.
  pub(crate) fn verify(&self) -> bool {
    let list = self.list.lock();
    let map_size = self.store.len();
    let mut consistent = true;

    debug!(
      region = %self.name(),
      map_size,
      list_size = list.size(),
      "verifying memory cache"
    );

    for (node, element) in list.iter() {
      match self.store.get(element.key()) {
        None => {
          error!(region = %self.name(), key = ?element.key(), "list node has no map entry");
          consistent = false;
        }
        Some(descriptor) if descriptor.node != node => {
          error!(
            region = %self.name(),
            key = ?element.key(),
            "map entry points at a different list node"
          );
          consistent = false;
        }
        Some(_) => {}
      }
    }

    self.store.for_each(|key, descriptor| match list.get(descriptor.node) {
      None => {
        error!(region = %self.name(), key = ?key, "map entry has no linked list node");
        consistent = false;
      }
      Some(element) if element.key() != key => {
        error!(
          region = %self.name(),
          key = ?key,
          node_key = ?element.key(),
          "map entry points at a node holding another key"
        );
        consistent = false;
      }
      Some(_) => {}
    });

    if map_size != list.size() {
      error!(
        region = %self.name(),
        map_size,
        list_size = list.size(),
        "map and list sizes differ"
      );
      consistent = false;
    }

    consistent
  }

  pub(crate) fn dump_map(&self) {
    debug!(region = %self.name(), "dumping map");
    self.store.for_each(|key, _| {
      debug!(region = %self.name(), key = ?key, "dump map");
    });
  }

  pub(crate) fn dump_cache_entries(&self) {
    debug!(region = %self.name(), "dumping cache entries");
    let list = self.list.lock();
    for (position, (_, element)) in list.iter().enumerate() {
      debug!(region = %self.name(), position, key = ?element.key(), "dump cache entry");
    }
  }
}
