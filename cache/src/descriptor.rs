use crate::element::CacheElement;
use crate::list::{DoubleLinkedList, NodeId};

use std::fmt;
use std::sync::Arc;

/// The eviction list of a region. Each node holds the element it orders.
pub type ElementList<K, V> = DoubleLinkedList<Arc<CacheElement<K, V>>>;

/// The map-side half of a resident element: the element itself plus the
/// handle of the list node that orders it.
///
/// A descriptor is created on every update and is never reused. Two
/// descriptors for the same key are told apart by their node handle.
pub(crate) struct MemoryElementDescriptor<K, V> {
  pub(crate) element: Arc<CacheElement<K, V>>,
  pub(crate) node: NodeId,
}

impl<K, V> MemoryElementDescriptor<K, V> {
  pub(crate) fn new(element: Arc<CacheElement<K, V>>, node: NodeId) -> Self {
    Self { element, node }
  }
}

impl<K, V> Clone for MemoryElementDescriptor<K, V> {
  fn clone(&self) -> Self {
    Self {
      element: Arc::clone(&self.element),
      node: self.node,
    }
  }
}

impl<K: fmt::Debug, V> fmt::Debug for MemoryElementDescriptor<K, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MemoryElementDescriptor")
      .field("key", self.element.key())
      .field("node", &self.node)
      .finish()
  }
}
