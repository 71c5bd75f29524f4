use super::MemoryPolicy;
use crate::descriptor::ElementList;
use crate::element::CacheElement;
use crate::list::NodeId;

use std::sync::Arc;

/// An eviction policy that evicts the most recently inserted element first.
///
/// New elements are appended at the tail, which is also where eviction
/// happens. Reads never reorder.
#[derive(Debug, Default, Clone, Copy)]
pub struct LifoPolicy;

impl<K, V> MemoryPolicy<K, V> for LifoPolicy
where
  K: Send + Sync,
  V: Send + Sync,
{
  fn name(&self) -> &'static str {
    "LIFO"
  }

  fn adjust_list_for_update(
    &self,
    list: &mut ElementList<K, V>,
    element: Arc<CacheElement<K, V>>,
  ) -> NodeId {
    list.add_last(element)
  }

  fn adjust_list_for_get(&self, _list: &mut ElementList<K, V>, _node: NodeId) {}
}
