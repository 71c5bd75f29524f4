use std::time::{Duration, SystemTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Descriptive attributes carried alongside a cached value.
///
/// The memory cache never acts on these; expiration and spool eligibility
/// are decided by whoever owns the region. They are kept so that reporting
/// consumers can show them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElementAttributes {
  /// Eternal elements never expire, regardless of `max_life`.
  pub eternal: bool,
  /// Maximum lifetime measured from `create_time`. `None` means unlimited.
  pub max_life: Option<Duration>,
  /// Maximum idle time. `None` means unlimited.
  pub idle_time: Option<Duration>,
  pub create_time: SystemTime,
  /// Whether the owner allows this element to be spooled to an overflow store.
  pub is_spool: bool,
  /// Approximate size in bytes, if the producer knows it.
  pub size: usize,
}

impl Default for ElementAttributes {
  fn default() -> Self {
    Self {
      eternal: true,
      max_life: None,
      idle_time: None,
      create_time: SystemTime::now(),
      is_spool: true,
      size: 0,
    }
  }
}

impl ElementAttributes {
  /// Attributes for an element that expires `max_life` after creation.
  pub fn with_max_life(max_life: Duration) -> Self {
    Self {
      eternal: false,
      max_life: Some(max_life),
      ..Self::default()
    }
  }

  /// Time left until `create_time + max_life`, measured from `now`.
  ///
  /// Returns `None` for eternal or unlimited elements, and `Some(ZERO)`
  /// once the deadline has passed. A deadline past the end of representable
  /// time counts as unlimited.
  pub fn time_to_live(&self, now: SystemTime) -> Option<Duration> {
    if self.eternal {
      return None;
    }
    let deadline = self.create_time.checked_add(self.max_life?)?;
    Some(deadline.duration_since(now).unwrap_or(Duration::ZERO))
  }
}

/// A cached element: key, value and attributes.
///
/// Elements are immutable once built; updating a key means storing a new element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheElement<K, V> {
  key: K,
  value: V,
  attributes: ElementAttributes,
}

impl<K, V> CacheElement<K, V> {
  pub fn new(key: K, value: V) -> Self {
    Self::with_attributes(key, value, ElementAttributes::default())
  }

  pub fn with_attributes(key: K, value: V, attributes: ElementAttributes) -> Self {
    Self {
      key,
      value,
      attributes,
    }
  }

  #[inline]
  pub fn key(&self) -> &K {
    &self.key
  }

  #[inline]
  pub fn value(&self) -> &V {
    &self.value
  }

  #[inline]
  pub fn attributes(&self) -> &ElementAttributes {
    &self.attributes
  }

  pub fn into_parts(self) -> (K, V, ElementAttributes) {
    (self.key, self.value, self.attributes)
  }
}
