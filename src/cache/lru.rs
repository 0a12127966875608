//! Recency List Module
//!
//! Implements Least Recently Used ordering for cache eviction.

use crate::error::{CacheError, Result};

// == Node Handle ==
/// Stable handle to a node in a [`RecencyList`].
///
/// Handles stay valid until the node is removed; the slot may then be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Doubly-linked list of keys stored in an arena of slots.
///
/// - Front = Least recently used (next eviction candidate)
/// - Back = Most recently used
///
/// All operations are O(1); links are slot indices rather than pointers.
#[derive(Debug)]
pub struct RecencyList<K> {
    /// Node slots, `None` when vacant
    slots: Vec<Option<Node<K>>>,
    /// Vacant slot indices available for reuse
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K> Default for RecencyList<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> RecencyList<K> {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    // == Push Back ==
    /// Inserts a new key at the back (most recently used).
    ///
    /// The caller guarantees the key is not already in the list.
    pub fn push_back(&mut self, key: K) -> NodeId {
        let node = Node {
            key,
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        self.link_back(idx);
        self.len += 1;
        NodeId(idx)
    }

    // == Move To Back ==
    /// Marks a node as most recently used.
    ///
    /// No-op if the node is already the tail or the handle is vacant.
    pub fn move_to_back(&mut self, id: NodeId) {
        if self.tail == Some(id.0) || self.slot(id.0).is_none() {
            return;
        }
        self.unlink(id.0);
        self.link_back(id.0);
    }

    // == Pop Front ==
    /// Removes and returns the least recently used key.
    pub fn pop_front(&mut self) -> Result<K> {
        let head = self.head.ok_or(CacheError::EmptyList)?;
        self.remove(NodeId(head)).ok_or(CacheError::EmptyList)
    }

    // == Remove ==
    /// Unlinks an arbitrary node and returns its key.
    ///
    /// Returns None if the handle does not refer to a live node.
    pub fn remove(&mut self, id: NodeId) -> Option<K> {
        self.slot(id.0)?;
        self.unlink(id.0);
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.key)
    }

    // == Peek Front ==
    /// Returns the least recently used key without removing it.
    #[cfg(test)]
    pub fn front(&self) -> Option<&K> {
        self.head.and_then(|idx| self.slot(idx)).map(|node| &node.key)
    }

    // == Length ==
    /// Returns the number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iteration ==
    /// Iterates keys from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter_nodes().map(|(_, key)| key)
    }

    /// Iterates `(handle, key)` pairs from least to most recently used.
    pub fn iter_nodes(&self) -> RecencyIter<'_, K> {
        RecencyIter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    // == Self Check ==
    /// Verifies head/tail, back links and length agree, with no cycles.
    pub fn is_well_formed(&self) -> bool {
        let mut prev = None;
        let mut cursor = self.head;
        let mut seen = 0;

        while let Some(idx) = cursor {
            let node = match self.slot(idx) {
                Some(node) => node,
                None => return false,
            };
            if node.prev != prev || seen >= self.len {
                return false;
            }
            seen += 1;
            prev = Some(idx);
            cursor = node.next;
        }

        let live = self.slots.iter().filter(|slot| slot.is_some()).count();
        seen == self.len && live == self.len && self.tail == prev
    }

    // == Link Helpers ==
    fn slot(&self, idx: usize) -> Option<&Node<K>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, idx: usize) -> Option<&mut Node<K>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    fn link_back(&mut self, idx: usize) {
        let old_tail = self.tail;
        if let Some(node) = self.slot_mut(idx) {
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(tail) => {
                if let Some(node) = self.slot_mut(tail) {
                    node.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.slot_mut(idx) {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.slot_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.slot_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }
}

// == Iterator ==
/// Front-to-back iterator over a [`RecencyList`].
pub struct RecencyIter<'a, K> {
    list: &'a RecencyList<K>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K> Iterator for RecencyIter<'a, K> {
    type Item = (NodeId, &'a K);

    fn next(&mut self) -> Option<Self::Item> {
        // Bounded by len so a corrupted list cannot loop forever
        if self.remaining == 0 {
            return None;
        }
        let idx = self.cursor?;
        let node = self.list.slot(idx)?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some((NodeId(idx), &node.key))
    }
}
