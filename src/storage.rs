//! Arena storage for heap nodes
//!
//! Every node of a heap lives in a [`SlotMap`] owned by that heap. Tree and
//! sibling relations are stored as [`NodeKey`]s rather than pointers, so the
//! cyclic parent/child/sibling graph never forms an ownership cycle and a
//! relink is just a handful of key rewrites.
//!
//! Slotmap keys are generational: once a node is removed, any key that still
//! names it stops resolving, which is what lets a heap reject stale handles.

use slotmap::{new_key_type, SlotMap};
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};

new_key_type! {
    /// Generational index of a node inside one heap's arena
    pub struct NodeKey;
}

/// Process-unique identity of a heap instance
///
/// Handles carry the id of the heap that issued them so that a handle from
/// one heap is never mistaken for a node of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeapId(u64);

impl HeapId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        HeapId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A node of a heap-ordered tree
///
/// `next`/`prev` place the node in a circular sibling list (the root list
/// when `parent` is `None`). A singleton ring links to itself.
#[derive(Debug)]
pub(crate) struct Node<T, P> {
    pub(crate) priority: P,
    pub(crate) item: T,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) child: Option<NodeKey>,
    pub(crate) next: NodeKey,
    pub(crate) prev: NodeKey,
    pub(crate) degree: usize,
    pub(crate) marked: bool,
}

/// Slotmap-backed node arena
#[derive(Debug)]
pub(crate) struct NodeArena<T, P> {
    nodes: SlotMap<NodeKey, Node<T, P>>,
}

impl<T, P> NodeArena<T, P> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Allocates a fresh node as a singleton ring: no parent, no children,
    /// unmarked, degree 0.
    pub(crate) fn insert(&mut self, priority: P, item: T) -> NodeKey {
        self.nodes.insert_with_key(|key| Node {
            priority,
            item,
            parent: None,
            child: None,
            next: key,
            prev: key,
            degree: 0,
            marked: false,
        })
    }

    /// Inserts an already-built node, keeping whatever links it carries.
    /// Used when relocating nodes from another arena; the caller rewrites
    /// the links afterwards.
    pub(crate) fn adopt(&mut self, node: Node<T, P>) -> NodeKey {
        self.nodes.insert(node)
    }

    /// Removes and returns the node at `key`.
    ///
    /// Panics if `key` is stale, like indexing does.
    pub(crate) fn take(&mut self, key: NodeKey) -> Node<T, P> {
        match self.nodes.remove(key) {
            Some(node) => node,
            None => panic!("stale node key {key:?}"),
        }
    }

    pub(crate) fn get(&self, key: NodeKey) -> Option<&Node<T, P>> {
        self.nodes.get(key)
    }

    pub(crate) fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (NodeKey, Node<T, P>)> + '_ {
        self.nodes.drain()
    }
}

impl<T, P> Index<NodeKey> for NodeArena<T, P> {
    type Output = Node<T, P>;

    fn index(&self, key: NodeKey) -> &Node<T, P> {
        &self.nodes[key]
    }
}

impl<T, P> IndexMut<NodeKey> for NodeArena<T, P> {
    fn index_mut(&mut self, key: NodeKey) -> &mut Node<T, P> {
        &mut self.nodes[key]
    }
}
