//! A bounded, region-based, concurrent in-memory cache engine.
//!
//! Each named region owns one [`MemoryCache`]: a concurrent key map plus a
//! doubly linked eviction list. A [`MemoryPolicy`] decides where written and
//! read elements sit in the list, and the cache always evicts from the tail.
//!
//! # Features
//! - **Pluggable eviction**: LRU, FIFO, LIFO and MRU out of the box, or any
//!   custom [`MemoryPolicy`].
//! - **Synchronous spooling**: an update that overflows the region evicts in
//!   chunks and hands every victim to the region's [`OverflowStore`] before
//!   returning, without holding the region lock across the hand-off.
//! - **Lock-free reads**: lookups only touch a sharded reader/writer map;
//!   the region lock is taken for list repositioning only.
//! - **Observability**: `tracing` logs, counters, and an optional map/list
//!   consistency pass.
//!
//! ```
//! use region_cache::{MemoryCache, RegionConfig, PolicyKind};
//! use std::sync::{Arc, Mutex};
//!
//! let spilled = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&spilled);
//!
//! let cache = MemoryCache::initialize(
//!   RegionConfig::new("tiles").max_objects(2).spool_chunk_size(1).policy(PolicyKind::Lru),
//!   move |element: Arc<region_cache::CacheElement<&'static str, u32>>| {
//!     sink.lock().unwrap().push(*element.key());
//!   },
//! )
//! .unwrap();
//!
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3);
//!
//! assert_eq!(*spilled.lock().unwrap(), vec!["b"]);
//! assert!(cache.get_quiet(&"a").is_some());
//! ```

pub mod admin;
pub mod builder;
pub mod config;
pub mod element;
pub mod error;
pub mod group;
pub mod list;
pub mod memory;
pub mod metrics;
pub mod overflow;
pub mod policy;

// Internal, crate-only modules
mod descriptor;
mod shared;
mod store;

pub use admin::{ElementInfo, RegionInfo};
pub use builder::MemoryCacheBuilder;
pub use config::RegionConfig;
pub use descriptor::ElementList;
pub use element::{CacheElement, ElementAttributes};
pub use error::ConfigError;
pub use group::GroupAttrName;
pub use list::{DoubleLinkedList, NodeId};
pub use memory::{MemoryCache, NAME_COMPONENT_DELIMITER};
pub use metrics::MemoryCacheStats;
pub use overflow::{DiscardOverflow, OverflowStore};
pub use policy::{MemoryPolicy, PolicyKind};
pub use shared::CacheStatus;
