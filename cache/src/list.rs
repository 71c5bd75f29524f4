use std::fmt;

use generational_arena::{Arena, Index};

/// A stable handle to a node of a [`DoubleLinkedList`].
///
/// Handles are generational: once a node is removed, its handle never
/// resolves again, even if the slot is reused by a later insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

#[derive(Debug)]
struct Node<T> {
  value: T,
  next: Option<Index>,
  prev: Option<Index>,
}

/// An arena-backed doubly linked list.
///
/// Every operation is O(1). The list is not synchronized; the owner must
/// serialize all structural mutation.
pub struct DoubleLinkedList<T> {
  // Arena stores all nodes contiguously.
  nodes: Arena<Node<T>>,
  head: Option<Index>,
  tail: Option<Index>,
}

impl<T> fmt::Debug for DoubleLinkedList<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DoubleLinkedList")
      .field("size", &self.size())
      .finish()
  }
}

impl<T> Default for DoubleLinkedList<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> DoubleLinkedList<T> {
  pub fn new() -> Self {
    Self {
      nodes: Arena::new(),
      head: None,
      tail: None,
    }
  }

  // Detaches a node from its neighbours without freeing its arena slot.
  fn unlink(&mut self, index: Index) {
    let (prev_idx, next_idx) = match self.nodes.get(index) {
      Some(node) => (node.prev, node.next),
      None => return,
    };

    if let Some(prev) = prev_idx {
      self.nodes[prev].next = next_idx;
    } else {
      // Unlinking the head.
      self.head = next_idx;
    }

    if let Some(next) = next_idx {
      self.nodes[next].prev = prev_idx;
    } else {
      // Unlinking the tail.
      self.tail = prev_idx;
    }

    let node = &mut self.nodes[index];
    node.prev = None;
    node.next = None;
  }

  fn link_front(&mut self, index: Index) {
    let old_head = self.head;
    {
      let node = &mut self.nodes[index];
      node.next = old_head;
      node.prev = None;
    }
    match old_head {
      Some(old) => self.nodes[old].prev = Some(index),
      None => self.tail = Some(index),
    }
    self.head = Some(index);
  }

  fn link_back(&mut self, index: Index) {
    let old_tail = self.tail;
    {
      let node = &mut self.nodes[index];
      node.prev = old_tail;
      node.next = None;
    }
    match old_tail {
      Some(old) => self.nodes[old].next = Some(index),
      None => self.head = Some(index),
    }
    self.tail = Some(index);
  }

  /// Inserts `value` as the new head and returns its handle.
  pub fn add_first(&mut self, value: T) -> NodeId {
    let index = self.nodes.insert(Node {
      value,
      next: None,
      prev: None,
    });
    self.link_front(index);
    NodeId(index)
  }

  /// Inserts `value` as the new tail and returns its handle.
  pub fn add_last(&mut self, value: T) -> NodeId {
    let index = self.nodes.insert(Node {
      value,
      next: None,
      prev: None,
    });
    self.link_back(index);
    NodeId(index)
  }

  /// Moves an existing node to the head. Returns `false` if the handle is stale.
  pub fn make_first(&mut self, id: NodeId) -> bool {
    if !self.nodes.contains(id.0) {
      return false;
    }
    if self.head != Some(id.0) {
      self.unlink(id.0);
      self.link_front(id.0);
    }
    true
  }

  /// Moves an existing node to the tail. Returns `false` if the handle is stale.
  pub fn make_last(&mut self, id: NodeId) -> bool {
    if !self.nodes.contains(id.0) {
      return false;
    }
    if self.tail != Some(id.0) {
      self.unlink(id.0);
      self.link_back(id.0);
    }
    true
  }

  /// Removes a node and returns its value.
  ///
  /// Removing a node that is not in the list is a no-op returning `None`.
  pub fn remove(&mut self, id: NodeId) -> Option<T> {
    if !self.nodes.contains(id.0) {
      return None;
    }
    self.unlink(id.0);
    self.nodes.remove(id.0).map(|node| node.value)
  }

  /// Removes and returns the tail node.
  pub fn remove_last(&mut self) -> Option<(NodeId, T)> {
    let tail = self.tail?;
    self.remove(NodeId(tail)).map(|value| (NodeId(tail), value))
  }

  pub fn get_first(&self) -> Option<(NodeId, &T)> {
    self
      .head
      .map(|index| (NodeId(index), &self.nodes[index].value))
  }

  pub fn get_last(&self) -> Option<(NodeId, &T)> {
    self
      .tail
      .map(|index| (NodeId(index), &self.nodes[index].value))
  }

  pub fn get(&self, id: NodeId) -> Option<&T> {
    self.nodes.get(id.0).map(|node| &node.value)
  }

  pub fn contains(&self, id: NodeId) -> bool {
    self.nodes.contains(id.0)
  }

  pub fn remove_all(&mut self) {
    // Removing slot by slot advances the arena generation, so handles held
    // by concurrent readers stay stale after the list is refilled.
    let indices: Vec<Index> = self.nodes.iter().map(|(index, _)| index).collect();
    for index in indices {
      self.nodes.remove(index);
    }
    self.head = None;
    self.tail = None;
  }

  pub fn size(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.head.is_none()
  }

  /// Iterates from head to tail.
  pub fn iter(&self) -> Iter<'_, T> {
    Iter {
      list: self,
      current: self.head,
    }
  }
}

impl<T: fmt::Debug> DoubleLinkedList<T> {
  /// Logs every entry, head to tail, at debug level.
  pub fn debug_dump_entries(&self) {
    tracing::debug!(size = self.size(), "dumping linked list entries");
    for (position, (_, value)) in self.iter().enumerate() {
      tracing::debug!(position, entry = ?value, "list entry");
    }
  }
}

/// Head-to-tail iterator over a [`DoubleLinkedList`].
pub struct Iter<'a, T> {
  list: &'a DoubleLinkedList<T>,
  current: Option<Index>,
}

impl<'a, T> Iterator for Iter<'a, T> {
  type Item = (NodeId, &'a T);

  fn next(&mut self) -> Option<Self::Item> {
    let index = self.current?;
    let node = &self.list.nodes[index];
    self.current = node.next;
    Some((NodeId(index), &node.value))
  }
}
