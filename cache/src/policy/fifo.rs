use super::MemoryPolicy;
use crate::descriptor::ElementList;
use crate::element::CacheElement;
use crate::list::NodeId;

use std::sync::Arc;

/// An eviction policy that evicts elements in First-In, First-Out order.
///
/// A re-update of a resident key counts as a fresh insertion.
#[derive(Debug, Default, Clone, Copy)]
pub struct FifoPolicy;

impl<K, V> MemoryPolicy<K, V> for FifoPolicy
where
  K: Send + Sync,
  V: Send + Sync,
{
  fn name(&self) -> &'static str {
    "FIFO"
  }

  fn adjust_list_for_update(
    &self,
    list: &mut ElementList<K, V>,
    element: Arc<CacheElement<K, V>>,
  ) -> NodeId {
    list.add_first(element)
  }

  /// A FIFO policy does not care about access patterns. This is a no-op.
  fn adjust_list_for_get(&self, _list: &mut ElementList<K, V>, _node: NodeId) {}
}
