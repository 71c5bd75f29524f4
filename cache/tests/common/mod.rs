#![allow(dead_code)]

use std::hash::{BuildHasher, Hasher};
use std::sync::Arc;

use parking_lot::Mutex;
use region_cache::{
  CacheElement, MemoryCache, MemoryCacheBuilder, OverflowStore, PolicyKind, RegionConfig,
};

/// An overflow store that remembers every element it was handed, in order.
pub struct RecordingOverflow<K, V> {
  spilled: Mutex<Vec<Arc<CacheElement<K, V>>>>,
}

impl<K, V> RecordingOverflow<K, V> {
  pub fn new() -> Self {
    Self {
      spilled: Mutex::new(Vec::new()),
    }
  }

  pub fn len(&self) -> usize {
    self.spilled.lock().len()
  }

  pub fn keys(&self) -> Vec<K>
  where
    K: Clone,
  {
    self.spilled.lock().iter().map(|e| e.key().clone()).collect()
  }

  pub fn clear(&self) {
    self.spilled.lock().clear();
  }
}

impl<K, V> OverflowStore<K, V> for RecordingOverflow<K, V>
where
  K: Send + Sync,
  V: Send + Sync,
{
  fn spill(&self, element: Arc<CacheElement<K, V>>) {
    self.spilled.lock().push(element);
  }
}

pub type Region = MemoryCache<String, i32>;

/// Builds a region with consistency checking on and a recording overflow store.
pub fn build_region(
  policy: PolicyKind,
  max_objects: usize,
  chunk_size: usize,
) -> (Region, Arc<RecordingOverflow<String, i32>>) {
  let overflow = Arc::new(RecordingOverflow::new());
  let cache = MemoryCacheBuilder::<String, i32>::new(
    RegionConfig::new("test")
      .policy(policy)
      .max_objects(max_objects)
      .spool_chunk_size(chunk_size)
      .verify_consistency(true),
  )
  .shared_overflow(overflow.clone())
  .build()
  .unwrap();
  (cache, overflow)
}

pub fn k(s: &str) -> String {
  s.to_string()
}

pub fn keys(list: &[&str]) -> Vec<String> {
  list.iter().map(|s| s.to_string()).collect()
}

// A custom hasher that uses an integer key as its own hash, so tests can
// decide which shard a key lands in. With 4 shards, key 5 -> shard 1.
#[derive(Clone, Default)]
pub struct ShardControllingHasher;
impl BuildHasher for ShardControllingHasher {
  type Hasher = TestHasher;
  fn build_hasher(&self) -> Self::Hasher {
    TestHasher(0)
  }
}
pub struct TestHasher(u64);
impl Hasher for TestHasher {
  fn finish(&self) -> u64 {
    self.0
  }
  fn write(&mut self, _: &[u8]) {
    unimplemented!()
  }
  fn write_i32(&mut self, i: i32) {
    self.0 = i as u64;
  }
}

pub fn build_sharded_region(
  shards: usize,
  max_objects: usize,
) -> MemoryCache<i32, String, ShardControllingHasher> {
  MemoryCacheBuilder::<i32, String>::new(
    RegionConfig::new("sharded")
      .shards(shards)
      .max_objects(max_objects)
      .verify_consistency(true),
  )
  .hasher(ShardControllingHasher)
  .build()
  .unwrap()
}

/// Installs a test subscriber honoring `RUST_LOG`. Safe to call more than once.
pub fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}
