//! Dijkstra's and A* search on top of a decrease-key heap
//!
//! These searches are the reason `decrease_key` exists: every open node keeps
//! the handle returned when it was pushed, and a cheaper route to it lowers its
//! priority in place instead of pushing a duplicate.
//!
//! Only lightweight indices are stored in the heap. A fast hash map (FxHash)
//! maps node states to their index; per-node metadata lives in a vector.
//!
//! Dijkstra is A* with h(n) = 0. The node type carries its own goal context
//! and implements `is_goal()` to decide when the search stops.
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::fibonacci::FibonacciHeap;
//! use rust_fibonacci_heap::pathfinding::{dijkstra, SearchNode};
//!
//! // Stops on a number line; walking costs 3 per step, the shuttle from 0 to
//! // 8 costs 5.
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct Stop(u8);
//!
//! impl SearchNode for Stop {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, u32)> {
//!         let mut next = vec![(Stop(self.0 + 1), 3)];
//!         if self.0 == 0 {
//!             next.push((Stop(8), 5));
//!         }
//!         next
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.0 == 9
//!     }
//! }
//!
//! let (path, cost) = dijkstra::<_, FibonacciHeap<_, _>>(&Stop(0)).unwrap();
//! assert_eq!(cost, 8);
//! assert_eq!(path.len(), 3);
//! ```

use crate::traits::DecreaseKeyHeap;
use log::{debug, warn};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::Add;

/// Types usable as path costs: ordered, copyable, additive, zero by default.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// A node in a search graph
pub trait SearchNode: Clone + Eq + Hash {
    /// The cost type for edge weights
    type Cost: Cost;

    /// Returns all successor nodes along with the cost to reach them.
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// Returns true if this node is a goal state.
    fn is_goal(&self) -> bool;
}

/// A node that can estimate its remaining cost for A* search.
///
/// The heuristic must never overestimate the true cost for A* to return
/// optimal paths.
pub trait AStarNode: SearchNode {
    /// Returns a lower bound on the cost from this node to any goal.
    fn heuristic(&self) -> Self::Cost;
}

/// Heap priority for an open node, ordered by f-score only
#[derive(Debug, Clone, Copy)]
pub struct PriorityCost<C> {
    /// g + h (h = 0 for Dijkstra)
    pub f_score: C,
    /// Cost from the start
    pub g_score: C,
}

impl<C: Ord> PartialEq for PriorityCost<C> {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score
    }
}

impl<C: Ord> Eq for PriorityCost<C> {}

impl<C: Ord> PartialOrd for PriorityCost<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for PriorityCost<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score.cmp(&other.f_score)
    }
}

/// Index of a discovered node; this is the item stored in the heap.
pub type NodeIndex = usize;

struct NodeEntry<N: SearchNode, H> {
    node: N,
    g_score: N::Cost,
    /// Present while the node is in the open set
    handle: Option<H>,
    came_from: Option<NodeIndex>,
    closed: bool,
}

/// Open/closed-set bookkeeping for one search
struct PathFinder<N: SearchNode, H> {
    entries: Vec<NodeEntry<N, H>>,
    index_of: FxHashMap<N, NodeIndex>,
}

impl<N: SearchNode, K> PathFinder<N, K> {
    fn new() -> Self {
        PathFinder {
            entries: Vec::new(),
            index_of: FxHashMap::default(),
        }
    }

    /// Returns the index for `node`, creating an entry if it is new.
    fn get_or_create_index(&mut self, node: N, g_score: N::Cost) -> (NodeIndex, bool) {
        if let Some(&index) = self.index_of.get(&node) {
            return (index, false);
        }

        let index = self.entries.len();
        self.index_of.insert(node.clone(), index);
        self.entries.push(NodeEntry {
            node,
            g_score,
            handle: None,
            came_from: None,
            closed: false,
        });
        (index, true)
    }

    /// Registers `start` and pushes it with priority `f_score`.
    fn seed<H>(&mut self, heap: &mut H, start: &N, f_score: N::Cost)
    where
        H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>, Handle = K>,
    {
        let zero = N::Cost::default();
        let (index, _) = self.get_or_create_index(start.clone(), zero);
        let priority = PriorityCost {
            f_score,
            g_score: zero,
        };
        self.entries[index].handle = Some(heap.push_with_handle(priority, index));
    }

    /// Moves a popped node to the closed set and returns a copy of it.
    fn settle(&mut self, index: NodeIndex) -> N {
        let entry = &mut self.entries[index];
        entry.closed = true;
        entry.handle = None;
        entry.node.clone()
    }

    fn reconstruct_path(&self, mut current: NodeIndex) -> Vec<N> {
        let mut path = vec![self.entries[current].node.clone()];
        while let Some(prev) = self.entries[current].came_from {
            path.push(self.entries[prev].node.clone());
            current = prev;
        }
        path.reverse();
        path
    }
}

/// Limits applied while searching
#[derive(Debug, Clone, Copy)]
struct Limits<C> {
    max_cost: Option<C>,
    max_nodes: Option<usize>,
}

impl<C> Limits<C> {
    fn none() -> Self {
        Limits {
            max_cost: None,
            max_nodes: None,
        }
    }
}

/// Runs Dijkstra's algorithm from `start` until `is_goal()` returns true.
///
/// Returns the path (start and goal inclusive) and its cost, or `None` if no
/// goal is reachable.
pub fn dijkstra<N, H>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    search::<N, H>(start, Limits::none(), |_| N::Cost::default())
}

/// Runs A* search from `start`, guided by the node's `heuristic()`.
pub fn astar<N, H>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: AStarNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    search::<N, H>(start, Limits::none(), |n| n.heuristic())
}

/// Builder for searches with cost or exploration limits.
///
/// ```rust
/// # use rust_fibonacci_heap::fibonacci::FibonacciHeap;
/// # use rust_fibonacci_heap::pathfinding::{PathFinderBuilder, SearchNode};
/// #[derive(Clone, PartialEq, Eq, Hash)]
/// struct Line(u32);
///
/// impl SearchNode for Line {
///     type Cost = u32;
///     fn successors(&self) -> Vec<(Self, u32)> { vec![(Line(self.0 + 1), 1)] }
///     fn is_goal(&self) -> bool { self.0 == 50 }
/// }
///
/// let too_far = PathFinderBuilder::new(Line(0))
///     .max_cost(10)
///     .dijkstra::<FibonacciHeap<_, _>>();
/// assert!(too_far.is_none());
/// ```
pub struct PathFinderBuilder<N: SearchNode> {
    start: N,
    limits: Limits<N::Cost>,
}

impl<N: SearchNode> PathFinderBuilder<N> {
    /// Creates a new builder starting from the given node.
    pub fn new(start: N) -> Self {
        PathFinderBuilder {
            start,
            limits: Limits::none(),
        }
    }

    /// Sets the maximum path cost to explore.
    pub fn max_cost(mut self, cost: N::Cost) -> Self {
        self.limits.max_cost = Some(cost);
        self
    }

    /// Sets the maximum number of nodes to pop before giving up.
    pub fn max_nodes(mut self, count: usize) -> Self {
        self.limits.max_nodes = Some(count);
        self
    }

    /// Runs Dijkstra's algorithm with the configured limits.
    pub fn dijkstra<H>(self) -> Option<(Vec<N>, N::Cost)>
    where
        H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
    {
        search::<N, H>(&self.start, self.limits, |_| N::Cost::default())
    }

    /// Runs A* search with the configured limits.
    pub fn astar<H>(self) -> Option<(Vec<N>, N::Cost)>
    where
        N: AStarNode,
        H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
    {
        search::<N, H>(&self.start, self.limits, |n| n.heuristic())
    }
}

fn search<N, H>(
    start: &N,
    limits: Limits<N::Cost>,
    heuristic: impl Fn(&N) -> N::Cost,
) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    let mut heap = H::new();
    let mut finder: PathFinder<N, H::Handle> = PathFinder::new();
    let mut explored = 0usize;
    finder.seed(&mut heap, start, heuristic(start));

    while let Some((PriorityCost { g_score, .. }, current_index)) = heap.pop() {
        if limits.max_nodes.is_some_and(|max| explored >= max) {
            debug!("search gave up after exploring {} nodes", explored);
            return None;
        }
        explored += 1;

        let current_node = finder.settle(current_index);
        if current_node.is_goal() {
            debug!("goal reached after exploring {} nodes", explored);
            return Some((finder.reconstruct_path(current_index), g_score));
        }

        for (neighbor, edge_cost) in current_node.successors() {
            let g = g_score + edge_cost;
            if limits.max_cost.is_some_and(|max| g > max) {
                continue;
            }
            let f_score = g + heuristic(&neighbor);
            relax(
                &mut heap,
                &mut finder,
                neighbor,
                current_index,
                PriorityCost { f_score, g_score: g },
            );
        }
    }

    None
}

/// Returns every node reachable from `start` within `max_cost`, with its
/// cheapest cost, in the order the nodes were settled.
pub fn reachable_within<N, H>(start: &N, max_cost: N::Cost) -> Vec<(N, N::Cost)>
where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    let mut heap = H::new();
    let mut finder: PathFinder<N, H::Handle> = PathFinder::new();
    let mut settled = Vec::new();
    if max_cost < N::Cost::default() {
        return settled;
    }
    finder.seed(&mut heap, start, N::Cost::default());

    while let Some((PriorityCost { g_score, .. }, current_index)) = heap.pop() {
        let current_node = finder.settle(current_index);
        for (neighbor, edge_cost) in current_node.successors() {
            let g = g_score + edge_cost;
            if g <= max_cost {
                let priority = PriorityCost { f_score: g, g_score: g };
                relax(&mut heap, &mut finder, neighbor, current_index, priority);
            }
        }
        settled.push((current_node, g_score));
    }

    settled
}

/// Opens `neighbor` or lowers its priority if `priority` is a cheaper route.
fn relax<N, H>(
    heap: &mut H,
    finder: &mut PathFinder<N, H::Handle>,
    neighbor: N,
    from: NodeIndex,
    priority: PriorityCost<N::Cost>,
) where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    let (index, is_new) = finder.get_or_create_index(neighbor, priority.g_score);
    let entry = &mut finder.entries[index];

    if entry.closed {
        return;
    }

    if is_new {
        entry.came_from = Some(from);
        entry.handle = Some(heap.push_with_handle(priority, index));
    } else if priority.g_score < entry.g_score {
        entry.g_score = priority.g_score;
        entry.came_from = Some(from);
        if let Some(handle) = &entry.handle {
            if let Err(err) = heap.decrease_key(handle, priority) {
                warn!("decrease_key on open node {} failed: {}", index, err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fibonacci::FibonacciHeap;

    type Fib = FibonacciHeap<NodeIndex, PriorityCost<u32>>;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    struct LinearNode {
        value: i32,
        goal: i32,
    }

    impl SearchNode for LinearNode {
        type Cost = u32;

        fn successors(&self) -> Vec<(Self, u32)> {
            if self.value < 100 {
                vec![(
                    LinearNode {
                        value: self.value + 1,
                        goal: self.goal,
                    },
                    1,
                )]
            } else {
                vec![]
            }
        }

        fn is_goal(&self) -> bool {
            self.value == self.goal
        }
    }

    #[test]
    fn test_linear_path() {
        let start = LinearNode { value: 0, goal: 10 };
        let (path, cost) = dijkstra::<_, Fib>(&start).unwrap();
        assert_eq!(cost, 10);
        assert_eq!(path.len(), 11);
        assert_eq!(path.first().map(|n| n.value), Some(0));
        assert_eq!(path.last().map(|n| n.value), Some(10));
    }

    #[test]
    fn test_unreachable_goal() {
        let start = LinearNode {
            value: 0,
            goal: 200,
        };
        assert!(dijkstra::<_, Fib>(&start).is_none());
    }

    #[test]
    fn test_start_is_goal() {
        let start = LinearNode { value: 3, goal: 3 };
        let (path, cost) = dijkstra::<_, Fib>(&start).unwrap();
        assert_eq!(cost, 0);
        assert_eq!(path, vec![start]);
    }

    #[test]
    fn test_max_nodes_limit() {
        let start = LinearNode { value: 0, goal: 50 };
        let limited = PathFinderBuilder::new(start.clone())
            .max_nodes(10)
            .dijkstra::<Fib>();
        assert!(limited.is_none());

        let enough = PathFinderBuilder::new(start).max_nodes(100).dijkstra::<Fib>();
        assert_eq!(enough.map(|(_, cost)| cost), Some(50));
    }

    #[test]
    fn test_reachable_within_budget() {
        let start = LinearNode {
            value: 0,
            goal: -1,
        };
        let reachable = reachable_within::<_, Fib>(&start, 5);
        let values: Vec<_> = reachable.iter().map(|(n, c)| (n.value, *c)).collect();
        assert_eq!(values, vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4), (5, 5)]);
    }
}
