use super::MemoryPolicy;
use crate::descriptor::ElementList;
use crate::element::CacheElement;
use crate::list::NodeId;

use std::sync::Arc;

/// An eviction policy that evicts the least recently used elements.
///
/// Writes and read hits both move an element to the head, so the tail is
/// always the element untouched for the longest time.
#[derive(Debug, Default, Clone, Copy)]
pub struct LruPolicy;

impl<K, V> MemoryPolicy<K, V> for LruPolicy
where
  K: Send + Sync,
  V: Send + Sync,
{
  fn name(&self) -> &'static str {
    "LRU"
  }

  fn adjust_list_for_update(
    &self,
    list: &mut ElementList<K, V>,
    element: Arc<CacheElement<K, V>>,
  ) -> NodeId {
    list.add_first(element)
  }

  fn adjust_list_for_get(&self, list: &mut ElementList<K, V>, node: NodeId) {
    list.make_first(node);
  }
}
