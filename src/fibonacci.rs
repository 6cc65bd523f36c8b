//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert, find_min and decrease_key
//! - O(log n) amortized extract_min and delete
//!
//! The structure is a collection of heap-ordered trees whose roots are linked
//! in a circular doubly linked list. The heap keeps a reference to the minimum
//! root. Non-root nodes carry a mark bit recording whether they have lost a
//! child since they last became a child themselves; losing a second child
//! triggers a cascading cut, which keeps node degrees logarithmic in subtree
//! size.
//!
//! Nodes live in a per-heap slotmap arena, so every handle is a generational
//! key that goes stale once its element is removed.

use crate::storage::{HeapId, NodeArena, NodeKey};
use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
use log::{debug, trace};
use rustc_hash::FxHashMap;
use std::fmt;

/// Handle to an element in a Fibonacci heap
///
/// The handle names one element of the heap that issued it. It becomes
/// invalid once the element is extracted or deleted, and is rejected by any
/// other heap.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    heap: HeapId,
    node: NodeKey,
}

impl Handle for FibonacciHandle {}

/// Translates handles of a heap that was merged into another one
///
/// Returned by [`FibonacciHeap::merge_with_handles`].
#[derive(Debug, Clone)]
pub struct HandleRemap {
    from: HeapId,
    to: HeapId,
    keys: FxHashMap<NodeKey, NodeKey>,
}

impl HandleRemap {
    /// Maps a handle of either merged heap to the equivalent handle of the
    /// merged heap, or `None` if the handle was already stale or belongs to
    /// some third heap.
    pub fn translate(&self, handle: &FibonacciHandle) -> Option<FibonacciHandle> {
        if handle.heap == self.to {
            return Some(*handle);
        }
        if handle.heap != self.from {
            return None;
        }
        self.keys.get(&handle.node).map(|&node| FibonacciHandle {
            heap: self.to,
            node,
        })
    }

    /// Number of relocated elements, which is the size of the smaller heap
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if no element had to be relocated
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(5, "item");
/// heap.insert(3, "other");
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.find_min(), Some((&1, &"item")));
/// assert_eq!(heap.extract_min(), Ok((1, "item")));
/// ```
pub struct FibonacciHeap<T, P: Ord> {
    id: HeapId,
    arena: NodeArena<T, P>,
    min: Option<NodeKey>,
    len: usize,
}

impl<T, P: Ord> FibonacciHeap<T, P> {
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self {
            id: HeapId::fresh(),
            arena: NodeArena::new(),
            min: None,
            len: 0,
        }
    }

    /// Creates a new empty heap with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: HeapId::fresh(),
            arena: NodeArena::with_capacity(capacity),
            min: None,
            len: 0,
        }
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Inserts an element as a new singleton root
    ///
    /// Keep the returned handle to target the element later with
    /// [`decrease_key`](Self::decrease_key) or [`delete`](Self::delete).
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, priority: P, item: T) -> FibonacciHandle {
        let node = self.arena.insert(priority, item);
        self.add_root(node);
        self.len += 1;
        self.debug_check_invariants();

        FibonacciHandle {
            heap: self.id,
            node,
        }
    }

    /// Returns the minimum priority and its item without removing it
    ///
    /// # Time Complexity
    /// O(1)
    pub fn find_min(&self) -> Option<(&P, &T)> {
        self.min.map(|min| {
            let node = &self.arena[min];
            (&node.priority, &node.item)
        })
    }

    /// Removes and returns the minimum priority and its item
    ///
    /// Children of the removed root are promoted to the root list, then roots
    /// of equal degree are linked until all root degrees are distinct and the
    /// true minimum is selected among the survivors.
    ///
    /// # Errors
    /// `HeapError::EmptyHeap` if there is nothing to extract.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn extract_min(&mut self) -> Result<(P, T), HeapError> {
        let min = self.min.ok_or(HeapError::EmptyHeap)?;

        let child = self.arena[min].child.take();
        if let Some(child) = child {
            for key in self.arena.ring(child) {
                let node = &mut self.arena[key];
                node.parent = None;
                node.marked = false;
            }
            self.arena.splice(min, child);
        }

        let next = self.arena[min].next;
        self.arena.remove_from_list(min);
        let node = self.arena.take(min);
        self.len -= 1;

        if next == min {
            self.min = None;
        } else {
            self.consolidate(next);
        }

        self.debug_check_invariants();
        Ok((node.priority, node.item))
    }

    /// Lowers the priority of the element behind `handle`
    ///
    /// An equal priority is accepted and leaves the structure as it is. If the
    /// new priority breaks heap order against the parent, the node is cut to
    /// the root list and its marked ancestors are cut in turn.
    ///
    /// # Errors
    /// - `HeapError::InvalidNewKey` if `new_priority` is greater than the
    ///   current priority; nothing is modified.
    /// - `HeapError::InvalidHandle` if the element is no longer in this heap.
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn decrease_key(
        &mut self,
        handle: &FibonacciHandle,
        new_priority: P,
    ) -> Result<(), HeapError> {
        let node = self.resolve(handle)?;
        if new_priority > self.arena[node].priority {
            return Err(HeapError::InvalidNewKey);
        }
        self.arena[node].priority = new_priority;

        let parent = self.arena[node].parent;
        if let Some(parent) = parent {
            if self.arena[node].priority < self.arena[parent].priority {
                self.cut(node, parent);
                self.cascading_cut(parent);
            }
        }

        if let Some(min) = self.min {
            if self.arena[node].priority < self.arena[min].priority {
                self.min = Some(node);
            }
        }

        self.debug_check_invariants();
        Ok(())
    }

    /// Removes the element behind `handle` and returns it
    ///
    /// # Errors
    /// `HeapError::InvalidHandle` if the element is no longer in this heap.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn delete(&mut self, handle: &FibonacciHandle) -> Result<(P, T), HeapError> {
        let node = self.resolve(handle)?;

        if self.min != Some(node) {
            let parent = self.arena[node].parent;
            if let Some(parent) = parent {
                self.cut(node, parent);
                self.cascading_cut(parent);
            }
            // Treated as negative infinity: it is the next to be extracted
            self.min = Some(node);
        }

        self.extract_min()
    }

    /// Merges another heap into this one, consuming the other heap
    ///
    /// Only the smaller of the two heaps has its nodes moved (`other` on a
    /// tie); the larger one's nodes stay where they are. Handles into the
    /// larger heap keep working, whichever side it was. Handles into the
    /// smaller heap go stale; use
    /// [`merge_with_handles`](Self::merge_with_handles) to translate them.
    /// Merging with an empty heap moves nothing and invalidates no handle.
    ///
    /// # Time Complexity
    /// O(min(n, m)). A node only ever moves into a heap at least twice the
    /// size of the one it left, so over a sequence of merges each node moves
    /// O(log n) times.
    pub fn merge(&mut self, other: Self) {
        self.absorb(other);
    }

    /// Like [`merge`](Self::merge), returning a map that turns a handle from
    /// either side into one valid in the merged heap
    pub fn merge_with_handles(&mut self, other: Self) -> HandleRemap {
        self.absorb(other)
    }

    /// Returns the priority and item behind `handle`, if it is still present
    pub fn get(&self, handle: &FibonacciHandle) -> Option<(&P, &T)> {
        if handle.heap != self.id {
            return None;
        }
        self.arena
            .get(handle.node)
            .map(|node| (&node.priority, &node.item))
    }

    /// Returns true if `handle` names an element currently in this heap
    pub fn contains(&self, handle: &FibonacciHandle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Removes every element, invalidating all outstanding handles
    pub fn clear(&mut self) {
        self.arena.clear();
        self.min = None;
        self.len = 0;
    }

    /// Drains the heap in non-decreasing priority order
    pub fn into_sorted_vec(mut self) -> Vec<(P, T)> {
        let mut sorted = Vec::with_capacity(self.len);
        while let Ok(entry) = self.extract_min() {
            sorted.push(entry);
        }
        sorted
    }

    /// Walks the whole forest and panics on the first broken invariant
    ///
    /// Checks ring links, parent links, heap order, degrees, marks on roots,
    /// that `min` is the minimum root and that the node count matches `len`.
    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        let Some(min) = self.min else {
            assert_eq!(self.len, 0, "empty heap reports len {}", self.len);
            assert_eq!(self.arena.len(), 0, "empty heap still owns nodes");
            return;
        };

        let mut count = 0;
        for root in self.arena.ring(min) {
            let node = &self.arena[root];
            assert!(node.parent.is_none(), "root list entry has a parent");
            assert!(!node.marked, "root is marked");
            assert!(
                self.arena[min].priority <= node.priority,
                "min does not reference the minimum root"
            );
            count += self.check_tree(root);
        }

        assert_eq!(
            count, self.len,
            "counted {} nodes but len is {}",
            count, self.len
        );
        assert_eq!(self.arena.len(), self.len, "arena holds unreachable nodes");
    }

    /// Checks one tree with an explicit stack; trees left by cascading cuts
    /// can be as deep as they are large.
    fn check_tree(&self, root: NodeKey) -> usize {
        let mut count = 0;
        let mut pending = vec![root];

        while let Some(key) = pending.pop() {
            count += 1;
            let node = &self.arena[key];
            assert_eq!(self.arena[node.next].prev, key, "broken next/prev link");

            let Some(child) = node.child else {
                assert_eq!(node.degree, 0, "childless node has degree {}", node.degree);
                continue;
            };

            let children = self.arena.ring(child);
            assert_eq!(
                children.len(),
                node.degree,
                "degree does not match child count"
            );
            for c in children {
                let child_node = &self.arena[c];
                assert_eq!(child_node.parent, Some(key), "child points at wrong parent");
                assert!(node.priority <= child_node.priority, "heap order violated");
                pending.push(c);
            }
        }
        count
    }

    #[inline]
    fn debug_check_invariants(&self) {
        #[cfg(feature = "invariant-checks")]
        self.assert_invariants();
    }

    fn resolve(&self, handle: &FibonacciHandle) -> Result<NodeKey, HeapError> {
        if handle.heap == self.id && self.arena.contains(handle.node) {
            Ok(handle.node)
        } else {
            Err(HeapError::InvalidHandle)
        }
    }

    /// Splices a detached node into the root list, updating `min`
    fn add_root(&mut self, node: NodeKey) {
        match self.min {
            Some(min) => {
                self.arena.add_to_list(node, min);
                if self.arena[node].priority < self.arena[min].priority {
                    self.min = Some(node);
                }
            }
            None => {
                self.arena.make_singleton(node);
                self.min = Some(node);
            }
        }
    }

    /// Links roots of equal degree until all root degrees are distinct, then
    /// rebuilds the root list and picks the true minimum
    fn consolidate(&mut self, start: NodeKey) {
        let roots = self.arena.ring(start);
        let before = roots.len();
        let mut by_degree: Vec<Option<NodeKey>> = Vec::new();

        for root in roots {
            let mut x = root;
            let mut degree = self.arena[x].degree;

            loop {
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, None);
                }
                let Some(mut y) = by_degree[degree].take() else {
                    break;
                };

                // Ensure x has the smaller priority
                if self.arena[y].priority < self.arena[x].priority {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                degree += 1;
            }

            by_degree[degree] = Some(x);
        }

        self.min = None;
        let mut after = 0;
        for root in by_degree.into_iter().flatten() {
            self.add_root(root);
            after += 1;
        }

        trace!("consolidated {} roots into {}", before, after);
    }

    /// Links root `child` under root `parent`
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        self.arena.remove_from_list(child);

        let node = &mut self.arena[child];
        node.parent = Some(parent);
        node.marked = false;

        let first_child = self.arena[parent].child;
        match first_child {
            Some(first) => self.arena.add_to_list(child, first),
            None => {
                self.arena.make_singleton(child);
                self.arena[parent].child = Some(child);
            }
        }
        self.arena[parent].degree += 1;
    }

    /// Detaches `node` from `parent` and makes it an unmarked root
    fn cut(&mut self, node: NodeKey, parent: NodeKey) {
        let next = self.arena[node].next;
        if self.arena[parent].child == Some(node) {
            self.arena[parent].child = if next == node { None } else { Some(next) };
        }
        self.arena.remove_from_list(node);
        self.arena[parent].degree -= 1;

        let n = &mut self.arena[node];
        n.parent = None;
        n.marked = false;

        self.add_root(node);
    }

    /// Walks up from `node`, cutting marked ancestors until it reaches a root
    /// or marks an unmarked node
    fn cascading_cut(&mut self, mut node: NodeKey) {
        loop {
            let Some(parent) = self.arena[node].parent else {
                return;
            };
            if !self.arena[node].marked {
                self.arena[node].marked = true;
                return;
            }
            trace!("cascading cut at {:?}", node);
            self.cut(node, parent);
            node = parent;
        }
    }

    /// Moves the smaller heap's nodes into the larger heap's arena and splices
    /// the root rings. Ties move `other`.
    fn absorb(&mut self, mut other: Self) -> HandleRemap {
        if self.len < other.len {
            std::mem::swap(self, &mut other);
        }
        let (from, to) = (other.id, self.id);

        let (Some(self_min), Some(other_min)) = (self.min, other.min) else {
            return HandleRemap {
                from,
                to,
                keys: FxHashMap::default(),
            };
        };

        let mut keys = FxHashMap::default();
        keys.reserve(other.len);
        for (old, node) in other.arena.drain() {
            keys.insert(old, self.arena.adopt(node));
        }
        for &new in keys.values() {
            let node = &mut self.arena[new];
            node.next = keys[&node.next];
            node.prev = keys[&node.prev];
            node.parent = node.parent.map(|p| keys[&p]);
            node.child = node.child.map(|c| keys[&c]);
        }
        debug!("relocated {} nodes from heap {:?} into {:?}", keys.len(), from, to);

        let other_min = keys[&other_min];
        self.arena.splice(self_min, other_min);
        if self.arena[other_min].priority < self.arena[self_min].priority {
            self.min = Some(other_min);
        }
        self.len += other.len;
        self.debug_check_invariants();

        HandleRemap { from, to, keys }
    }
}

impl<T, P: Ord> Default for FibonacciHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord + fmt::Debug> fmt::Debug for FibonacciHeap<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("min", &self.find_min().map(|(priority, _)| priority))
            .finish_non_exhaustive()
    }
}

impl<T, P: Ord> Extend<(P, T)> for FibonacciHeap<T, P> {
    fn extend<I: IntoIterator<Item = (P, T)>>(&mut self, iter: I) {
        for (priority, item) in iter {
            self.insert(priority, item);
        }
    }
}

impl<T, P: Ord> FromIterator<(P, T)> for FibonacciHeap<T, P> {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<T, P: Ord> Heap<T, P> for FibonacciHeap<T, P> {
    fn new() -> Self {
        FibonacciHeap::new()
    }

    fn is_empty(&self) -> bool {
        FibonacciHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        FibonacciHeap::len(self)
    }

    fn push(&mut self, priority: P, item: T) {
        self.insert(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.find_min()
    }

    fn pop(&mut self) -> Option<(P, T)> {
        self.extract_min().ok()
    }

    fn merge(&mut self, other: Self) {
        self.absorb(other);
    }
}

impl<T, P: Ord> DecreaseKeyHeap<T, P> for FibonacciHeap<T, P> {
    type Handle = FibonacciHandle;

    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle {
        self.insert(priority, item)
    }

    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError> {
        FibonacciHeap::decrease_key(self, handle, new_priority)
    }
}
