use region_cache::{
  CacheElement, ElementList, MemoryCacheBuilder, MemoryPolicy, NodeId, RegionConfig,
};
use std::sync::Arc;

// New elements go to the tail and only earn a place at the head once read,
// so a burst of one-off writes cannot push out the elements being read.
struct ScanResistantPolicy;

impl<K: Send + Sync, V: Send + Sync> MemoryPolicy<K, V> for ScanResistantPolicy {
  fn name(&self) -> &'static str {
    "ScanResistant"
  }

  fn adjust_list_for_update(
    &self,
    list: &mut ElementList<K, V>,
    element: Arc<CacheElement<K, V>>,
  ) -> NodeId {
    list.add_last(element)
  }

  fn adjust_list_for_get(&self, list: &mut ElementList<K, V>, node: NodeId) {
    list.make_first(node);
  }
}

fn main() {
  println!("--- Region with a custom policy ---");

  let cache = MemoryCacheBuilder::<i32, String>::new(RegionConfig::new("docs").max_objects(3))
    .policy(ScanResistantPolicy)
    .overflow(|element: Arc<CacheElement<i32, String>>| {
      println!("[Overflow] spooled key {}", element.key());
    })
    .build()
    .expect("Failed to build region");

  cache.put(1, "one".to_string());
  cache.put(2, "two".to_string());
  cache.get(&1);
  cache.get(&2);
  println!("Keys 1 and 2 are hot.");

  for key in 100..105 {
    cache.put(key, format!("scan {key}"));
  }

  assert!(cache.get_quiet(&1).is_some());
  assert!(cache.get_quiet(&2).is_some());
  println!("\nHot keys survived the scan: {:?}", cache.keys_in_eviction_order());
  println!("Policy: {}", cache.statistics().type_name);
}
