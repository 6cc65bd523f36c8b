//! Circular doubly-linked list operations over the node arena
//!
//! In a circular list:
//! - A single node points to itself (both `next` and `prev`)
//! - There is no head or tail - any node can be the entry point
//! - Splicing two rings together is O(1)
//! - Iteration wraps around, so walks must track their starting point
//!
//! Root lists and sibling lists of the Fibonacci heap are both rings of this
//! kind, threaded through the `next`/`prev` keys of [`Node`](crate::storage::Node).

use crate::storage::{NodeArena, NodeKey};

impl<T, P> NodeArena<T, P> {
    /// Turns `node` into a ring of one element.
    pub(crate) fn make_singleton(&mut self, node: NodeKey) {
        let n = &mut self[node];
        n.next = node;
        n.prev = node;
    }

    /// Inserts `node` immediately after `target` in `target`'s ring.
    ///
    /// `node` must not be part of a ring it needs to stay in; its own links
    /// are overwritten.
    pub(crate) fn add_to_list(&mut self, node: NodeKey, target: NodeKey) {
        let next = self[target].next;

        self[node].prev = target;
        self[node].next = next;
        self[next].prev = node;
        self[target].next = node;
    }

    /// Detaches `node` from its ring by linking its neighbours to each other.
    ///
    /// `node`'s own `next`/`prev` are left as they were; callers reset them
    /// before relying on them again. A singleton ring becomes empty.
    pub(crate) fn remove_from_list(&mut self, node: NodeKey) {
        let (prev, next) = (self[node].prev, self[node].next);

        self[prev].next = next;
        self[next].prev = prev;
    }

    /// Joins the ring containing `a` with the disjoint ring containing `b`.
    ///
    /// Before:
    ///   Ring A: ... <-> a_prev <-> a <-> ...
    ///   Ring B: ... <-> b_prev <-> b <-> ...
    ///
    /// After:
    ///   ... <-> a_prev <-> b <-> ... <-> b_prev <-> a <-> ...
    pub(crate) fn splice(&mut self, a: NodeKey, b: NodeKey) {
        let a_prev = self[a].prev;
        let b_prev = self[b].prev;

        self[a_prev].next = b;
        self[b].prev = a_prev;

        self[b_prev].next = a;
        self[a].prev = b_prev;
    }

    /// Collects every node of the ring starting at `start`, in `next` order.
    ///
    /// The result is a snapshot, so callers may relink nodes while walking it.
    pub(crate) fn ring(&self, start: NodeKey) -> Vec<NodeKey> {
        let mut nodes = vec![start];
        let mut current = self[start].next;

        while current != start {
            nodes.push(current);
            current = self[current].next;
        }

        nodes
    }
}
