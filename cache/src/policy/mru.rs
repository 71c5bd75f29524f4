use super::MemoryPolicy;
use crate::descriptor::ElementList;
use crate::element::CacheElement;
use crate::list::NodeId;

use std::sync::Arc;

/// An eviction policy that evicts the most recently used element.
///
/// Both writes and read hits move an element to the tail, making it the next
/// eviction candidate. Suits scans where data that was just touched is the
/// least likely to be needed again.
#[derive(Debug, Default, Clone, Copy)]
pub struct MruPolicy;

impl<K, V> MemoryPolicy<K, V> for MruPolicy
where
  K: Send + Sync,
  V: Send + Sync,
{
  fn name(&self) -> &'static str {
    "MRU"
  }

  fn adjust_list_for_update(
    &self,
    list: &mut ElementList<K, V>,
    element: Arc<CacheElement<K, V>>,
  ) -> NodeId {
    list.add_last(element)
  }

  fn adjust_list_for_get(&self, list: &mut ElementList<K, V>, node: NodeId) {
    list.make_last(node);
  }
}
