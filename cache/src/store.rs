use core::fmt;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use crossbeam_utils::CachePadded;
use parking_lot::RwLock;

/// A concurrent map partitioned into multiple, independently locked shards.
///
/// Readers of different keys rarely touch the same lock, and readers of the
/// same shard never block each other.
pub(crate) struct ShardedStore<K, D, H> {
  shards: Box<[CachePadded<RwLock<HashMap<K, D, H>>>]>,
  hasher: H,
}

impl<K, D, H> fmt::Debug for ShardedStore<K, D, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ShardedStore")
      .field("num_shards", &self.shards.len())
      .finish()
  }
}

impl<K, D, H> ShardedStore<K, D, H>
where
  K: Eq + Hash,
  H: BuildHasher + Clone,
{
  /// Creates a store with `num_shards` rounded up to a power of two.
  pub(crate) fn new(num_shards: usize, hasher: H) -> Self {
    let num_shards = num_shards.max(1).next_power_of_two();
    let mut shards = Vec::with_capacity(num_shards);
    for _ in 0..num_shards {
      let shard_map = HashMap::with_hasher(hasher.clone());
      shards.push(CachePadded::new(RwLock::new(shard_map)));
    }

    Self {
      shards: shards.into_boxed_slice(),
      hasher,
    }
  }

  #[inline]
  fn get_shard(&self, key: &K) -> &RwLock<HashMap<K, D, H>> {
    let hash = self.hasher.hash_one(key);
    // The shard count is a power of two, so masking is a cheap modulo.
    let index = hash as usize & (self.shards.len() - 1);
    &self.shards[index]
  }

  pub(crate) fn num_shards(&self) -> usize {
    self.shards.len()
  }

  /// Returns a clone of the value for `key`, holding only a read lock.
  pub(crate) fn get(&self, key: &K) -> Option<D>
  where
    D: Clone,
  {
    self.get_shard(key).read().get(key).cloned()
  }

  /// Inserts a value, returning the one it replaced.
  pub(crate) fn insert(&self, key: K, value: D) -> Option<D> {
    self.get_shard(&key).write().insert(key, value)
  }

  pub(crate) fn remove(&self, key: &K) -> Option<D> {
    self.get_shard(key).write().remove(key)
  }

  /// Removes the entry for `key` only if `predicate` accepts its current value.
  pub(crate) fn remove_if<F>(&self, key: &K, predicate: F) -> Option<D>
  where
    F: FnOnce(&D) -> bool,
  {
    let mut shard = self.get_shard(key).write();
    match shard.get(key) {
      Some(value) if predicate(value) => shard.remove(key),
      _ => None,
    }
  }

  /// Removes every entry whose key matches `predicate`, returning the removed values.
  pub(crate) fn extract_if<F>(&self, mut predicate: F) -> Vec<D>
  where
    K: Clone,
    F: FnMut(&K) -> bool,
  {
    let mut removed = Vec::new();
    for shard in self.shards.iter() {
      let mut guard = shard.write();
      let keys: Vec<K> = guard.keys().filter(|key| predicate(key)).cloned().collect();
      for key in keys {
        if let Some(value) = guard.remove(&key) {
          removed.push(value);
        }
      }
    }
    removed
  }

  /// Total entry count. Shards are read one at a time, so under concurrent
  /// writes this is a close estimate rather than a snapshot.
  pub(crate) fn len(&self) -> usize {
    self.shards.iter().map(|shard| shard.read().len()).sum()
  }

  pub(crate) fn clear(&self) {
    for shard in self.shards.iter() {
      shard.write().clear();
    }
  }

  /// Visits every entry, one shard read lock at a time.
  pub(crate) fn for_each<F>(&self, mut f: F)
  where
    F: FnMut(&K, &D),
  {
    for shard in self.shards.iter() {
      let guard = shard.read();
      for (key, value) in guard.iter() {
        f(key, value);
      }
    }
  }
}
