use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_utils::CachePadded;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Lock-free counters for a region's memory cache.
#[derive(Debug, Default)]
pub(crate) struct Metrics {
  pub(crate) puts: CachePadded<AtomicU64>,
  pub(crate) hits: CachePadded<AtomicU64>,
  pub(crate) misses: CachePadded<AtomicU64>,
  // Elements handed to the overflow store by eviction.
  pub(crate) spooled: CachePadded<AtomicU64>,
  pub(crate) removals: CachePadded<AtomicU64>,
}

impl Metrics {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  #[inline]
  pub(crate) fn incr(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
  }

  #[inline]
  pub(crate) fn add(counter: &AtomicU64, n: u64) {
    counter.fetch_add(n, Ordering::Relaxed);
  }

  pub(crate) fn reset(&self) {
    for counter in [
      &self.puts,
      &self.hits,
      &self.misses,
      &self.spooled,
      &self.removals,
    ] {
      counter.store(0, Ordering::Relaxed);
    }
  }

  pub(crate) fn snapshot(
    &self,
    region: &str,
    type_name: String,
    map_size: usize,
    list_size: usize,
  ) -> MemoryCacheStats {
    MemoryCacheStats {
      region: region.to_string(),
      type_name,
      map_size,
      list_size,
      put_count: self.puts.load(Ordering::Relaxed),
      hit_count: self.hits.load(Ordering::Relaxed),
      miss_count: self.misses.load(Ordering::Relaxed),
      spool_count: self.spooled.load(Ordering::Relaxed),
      remove_count: self.removals.load(Ordering::Relaxed),
    }
  }
}

/// A point-in-time view of a region's memory cache.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MemoryCacheStats {
  pub region: String,
  /// The cache flavour, e.g. `"LRU Memory Cache"`.
  pub type_name: String,
  /// Number of map entries.
  pub map_size: usize,
  /// Number of list nodes. Equal to `map_size` in a consistent region.
  pub list_size: usize,
  pub put_count: u64,
  pub hit_count: u64,
  pub miss_count: u64,
  /// Elements handed to the overflow store by eviction.
  pub spool_count: u64,
  /// Elements removed explicitly.
  pub remove_count: u64,
}

impl MemoryCacheStats {
  /// hits / (hits + misses), or 0 when nothing was looked up yet.
  pub fn hit_ratio(&self) -> f64 {
    let lookups = self.hit_count + self.miss_count;
    if lookups == 0 {
      0.0
    } else {
      self.hit_count as f64 / lookups as f64
    }
  }

  /// Name/value pairs in display order, for reporting layers.
  pub fn stat_elements(&self) -> Vec<(&'static str, String)> {
    vec![
      ("Region", self.region.clone()),
      ("List Size", self.list_size.to_string()),
      ("Map Size", self.map_size.to_string()),
      ("Put Count", self.put_count.to_string()),
      ("Hit Count", self.hit_count.to_string()),
      ("Miss Count", self.miss_count.to_string()),
      ("Spool Count", self.spool_count.to_string()),
      ("Remove Count", self.remove_count.to_string()),
    ]
  }
}

impl fmt::Display for MemoryCacheStats {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}", self.type_name)?;
    for (name, value) in self.stat_elements() {
      writeln!(f, "  {name} = {value}")?;
    }
    Ok(())
  }
}
