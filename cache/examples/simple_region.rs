use region_cache::{CacheElement, MemoryCache, PolicyKind, RegionConfig};
use std::sync::Arc;

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  println!("--- LRU region with a printing overflow store ---");

  let cache = MemoryCache::initialize(
    RegionConfig::new("tiles")
      .policy(PolicyKind::Lru)
      .max_objects(2)
      .spool_chunk_size(1),
    |element: Arc<CacheElement<String, u32>>| {
      println!("[Overflow] spooled {} = {}", element.key(), element.value());
    },
  )
  .expect("Failed to initialize region");

  cache.put("A".to_string(), 1);
  cache.put("B".to_string(), 2);
  println!("Inserted A and B. Region is full.");

  // A read moves A to the head, leaving B as the next victim.
  cache.get(&"A".to_string());
  println!("Read A.");

  println!("Inserting C. This spools B.");
  cache.put("C".to_string(), 3);

  assert!(cache.get_quiet(&"B".to_string()).is_none());
  println!("\nEviction order (head first): {:?}", cache.keys_in_eviction_order());
  println!("\n{}", cache.statistics());
}
