//! Read-only reporting over a region's memory cache.
//!
//! Everything here goes through `key_set` and `get_quiet`, so building a
//! report never changes eviction order or hit/miss counters.

use crate::memory::MemoryCache;
use crate::metrics::MemoryCacheStats;
use crate::shared::CacheStatus;

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Placeholder for a creation time that RFC 3339 cannot express.
pub const UNKNOWN_TIME: &str = "unknown";

// 9999-12-31T23:59:59Z
const MAX_RFC3339_SECS: u64 = 253_402_300_799;

fn format_create_time(time: SystemTime) -> String {
  match time.duration_since(UNIX_EPOCH) {
    Ok(since) if since.as_secs() <= MAX_RFC3339_SECS => {
      humantime::format_rfc3339_seconds(time).to_string()
    }
    _ => UNKNOWN_TIME.to_string(),
  }
}

/// One row of an element report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ElementInfo {
  pub key: String,
  pub eternal: bool,
  /// Creation time, RFC 3339 with second precision, or
  /// [`UNKNOWN_TIME`] when it falls outside years 1970 to 9999.
  pub create_time: String,
  /// Max life in seconds, `None` if unlimited.
  pub max_life_secs: Option<u64>,
  /// Seconds left to live, `None` if the element never expires.
  pub expires_in_secs: Option<u64>,
}

/// A summary of one region.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RegionInfo {
  pub name: String,
  pub alive: bool,
  pub size: usize,
  pub stats: MemoryCacheStats,
}

impl<K, V, H> MemoryCache<K, V, H>
where
  K: Eq + Hash + Clone + Send + Sync + fmt::Debug + 'static,
  V: Send + Sync + 'static,
  H: BuildHasher + Clone + Send + Sync + 'static,
{
  /// Describes every resident element, sorted by key.
  ///
  /// Keys evicted between listing and lookup are skipped.
  pub fn element_info(&self) -> Vec<ElementInfo>
  where
    K: Ord,
  {
    let mut keys: Vec<K> = self.key_set().into_iter().collect();
    keys.sort_unstable();

    let now = SystemTime::now();
    keys
      .iter()
      .filter_map(|key| self.get_quiet(key))
      .map(|element| {
        let attributes = element.attributes();
        ElementInfo {
          key: format!("{:?}", element.key()),
          eternal: attributes.eternal,
          create_time: format_create_time(attributes.create_time),
          max_life_secs: attributes.max_life.map(|d| d.as_secs()),
          expires_in_secs: attributes.time_to_live(now).map(|d| d.as_secs()),
        }
      })
      .collect()
  }

  pub fn region_info(&self) -> RegionInfo {
    RegionInfo {
      name: self.cache_name().to_string(),
      alive: self.status() == CacheStatus::Alive,
      size: self.size(),
      stats: self.statistics(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::time::Duration;

  #[test]
  fn create_time_formats_within_rfc3339_range() {
    let time = UNIX_EPOCH + Duration::from_secs(86_400);
    assert_eq!(format_create_time(time), "1970-01-02T00:00:00Z");
    assert_eq!(
      format_create_time(UNIX_EPOCH + Duration::from_secs(MAX_RFC3339_SECS)),
      "9999-12-31T23:59:59Z"
    );
  }

  #[test]
  fn create_time_outside_rfc3339_range_is_unknown() {
    let before_epoch = UNIX_EPOCH - Duration::from_secs(10);
    assert_eq!(format_create_time(before_epoch), UNKNOWN_TIME);
    let past_9999 = UNIX_EPOCH + Duration::from_secs(MAX_RFC3339_SECS + 1);
    assert_eq!(format_create_time(past_9999), UNKNOWN_TIME);
  }
}
