//! Keys for grouped elements: a group id plus an attribute name.

use crate::memory::MemoryCache;

use std::fmt;
use std::hash::{BuildHasher, Hash};

/// The key of one attribute in an element group.
///
/// A region keyed by `GroupAttrName` can drop a whole group at once with
/// [`MemoryCache::remove_group`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupAttrName<A> {
  pub group_id: String,
  pub attr_name: A,
}

impl<A> GroupAttrName<A> {
  pub fn new(group_id: impl Into<String>, attr_name: A) -> Self {
    Self {
      group_id: group_id.into(),
      attr_name,
    }
  }
}

impl<A: fmt::Display> fmt::Display for GroupAttrName<A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[GAN: groupId={}, attrName={}]", self.group_id, self.attr_name)
  }
}

impl<A, V, H> MemoryCache<GroupAttrName<A>, V, H>
where
  A: Eq + Hash + Clone + Send + Sync + fmt::Debug + 'static,
  V: Send + Sync + 'static,
  H: BuildHasher + Clone + Send + Sync + 'static,
{
  /// Removes every attribute of `group_id`. Returns whether anything was removed.
  pub fn remove_group(&self, group_id: &str) -> bool {
    self.remove_matching(|key| key.group_id == group_id) > 0
  }
}
