pub mod fifo;
pub mod lifo;
pub mod lru;
pub mod mru;

use crate::descriptor::ElementList;
use crate::element::CacheElement;
use crate::error::ConfigError;
use crate::list::NodeId;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A strategy that decides where elements sit in a region's eviction list.
///
/// The memory cache always evicts from the list tail, so a policy expresses
/// its eviction order purely through where it places written and read
/// elements. Both hooks run while the region's structural lock is held and
/// must not block.
pub trait MemoryPolicy<K, V>: Send + Sync {
  /// A short name such as `"LRU"`, used in statistics and logs.
  fn name(&self) -> &'static str;

  /// Places a freshly written element into the list and returns its node.
  ///
  /// Called for every update, including updates of a resident key; the
  /// cache unlinks the previous node for the key afterwards.
  fn adjust_list_for_update(
    &self,
    list: &mut ElementList<K, V>,
    element: Arc<CacheElement<K, V>>,
  ) -> NodeId;

  /// Repositions a node after a read hit.
  ///
  /// `node` may already have been removed by a concurrent writer, in which
  /// case the list operations used here are no-ops.
  fn adjust_list_for_get(&self, list: &mut ElementList<K, V>, node: NodeId);
}

/// The built-in policies, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PolicyKind {
  /// Evicts the least recently used element.
  #[default]
  Lru,
  /// Evicts the oldest inserted element; reads never reorder.
  Fifo,
  /// Evicts the most recently inserted element; reads never reorder.
  Lifo,
  /// Evicts the most recently used element.
  Mru,
}

impl PolicyKind {
  /// Instantiates the strategy for this kind.
  pub fn build<K, V>(self) -> Arc<dyn MemoryPolicy<K, V>>
  where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
  {
    match self {
      PolicyKind::Lru => Arc::new(lru::LruPolicy),
      PolicyKind::Fifo => Arc::new(fifo::FifoPolicy),
      PolicyKind::Lifo => Arc::new(lifo::LifoPolicy),
      PolicyKind::Mru => Arc::new(mru::MruPolicy),
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      PolicyKind::Lru => "lru",
      PolicyKind::Fifo => "fifo",
      PolicyKind::Lifo => "lifo",
      PolicyKind::Mru => "mru",
    }
  }
}

impl fmt::Display for PolicyKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for PolicyKind {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "lru" => Ok(PolicyKind::Lru),
      "fifo" => Ok(PolicyKind::Fifo),
      "lifo" => Ok(PolicyKind::Lifo),
      "mru" => Ok(PolicyKind::Mru),
      _ => Err(ConfigError::UnknownPolicy(s.to_string())),
    }
  }
}

#[cfg(test)]
pub(crate) mod test_utils {
  use super::*;

  pub(crate) fn element(key: i32) -> Arc<CacheElement<i32, ()>> {
    Arc::new(CacheElement::new(key, ()))
  }

  /// Keys from head to tail.
  pub(crate) fn keys(list: &ElementList<i32, ()>) -> Vec<i32> {
    list.iter().map(|(_, e)| *e.key()).collect()
  }

  /// Writes every key through `policy` and returns the node handles in order.
  pub(crate) fn write_all(
    policy: &dyn MemoryPolicy<i32, ()>,
    list: &mut ElementList<i32, ()>,
    keys: &[i32],
  ) -> Vec<NodeId> {
    keys
      .iter()
      .map(|key| policy.adjust_list_for_update(list, element(*key)))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn policy_kind_parses_case_insensitively() {
    assert_eq!("LRU".parse::<PolicyKind>().unwrap(), PolicyKind::Lru);
    assert_eq!(" fifo ".parse::<PolicyKind>().unwrap(), PolicyKind::Fifo);
    assert_eq!("Lifo".parse::<PolicyKind>().unwrap(), PolicyKind::Lifo);
    assert_eq!("mru".parse::<PolicyKind>().unwrap(), PolicyKind::Mru);
    assert_eq!(
      "arc".parse::<PolicyKind>(),
      Err(ConfigError::UnknownPolicy("arc".to_string()))
    );
  }

  #[test]
  fn built_policies_report_their_names() {
    let names: Vec<&str> = [
      PolicyKind::Lru,
      PolicyKind::Fifo,
      PolicyKind::Lifo,
      PolicyKind::Mru,
    ]
    .into_iter()
    .map(|kind| kind.build::<i32, ()>().name())
    .collect();
    assert_eq!(names, vec!["LRU", "FIFO", "LIFO", "MRU"]);
  }
}
