use crate::element::CacheElement;

use std::sync::Arc;

/// The secondary store that receives elements evicted from a region.
///
/// `spill` is called once per evicted element, synchronously, on the thread
/// whose update caused the overflow, and never while the region's structural
/// lock is held. The memory cache does not retry and does not observe
/// failures: an implementation that can fail (disk, network) must handle
/// or queue its own errors.
pub trait OverflowStore<K, V>: Send + Sync {
  fn spill(&self, element: Arc<CacheElement<K, V>>);
}

/// Any thread-safe closure can act as an overflow store.
impl<K, V, F> OverflowStore<K, V> for F
where
  F: Fn(Arc<CacheElement<K, V>>) + Send + Sync,
{
  fn spill(&self, element: Arc<CacheElement<K, V>>) {
    self(element)
  }
}

/// An overflow store that discards everything it receives.
///
/// Used when a region has no secondary storage; eviction then simply drops
/// the element.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardOverflow;

impl<K, V> OverflowStore<K, V> for DiscardOverflow {
  fn spill(&self, _element: Arc<CacheElement<K, V>>) {}
}
