//! Arena-backed Fibonacci heap
//!
//! This crate provides a Fibonacci heap: a forest of heap-ordered trees whose
//! roots form a circular list, with mark bits and cascading cuts keeping node
//! degrees logarithmic.
//!
//! - O(1) amortized insert, find_min and decrease_key
//! - O(log n) amortized extract_min and delete
//! - Merge that splices root lists together
//!
//! Nodes are stored in a slotmap arena, so the cyclic parent/child/sibling
//! graph is a set of generational indices and handles to removed elements are
//! detected instead of dangling.
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::fibonacci::FibonacciHeap;
//! use rust_fibonacci_heap::HeapError;
//!
//! let mut heap = FibonacciHeap::new();
//! let handle1 = heap.insert(5, "item1");
//! heap.insert(3, "item2");
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(heap.find_min(), Some((&1, &"item1")));
//! assert_eq!(heap.decrease_key(&handle1, 9), Err(HeapError::InvalidNewKey));
//! ```
//!
//! # Features
//!
//! - `invariant-checks`: re-verify every structural invariant after each
//!   mutating operation (slow, for testing). The `invariant_checks` test
//!   target only builds with it: `cargo test --features invariant-checks`.

pub mod fibonacci;
pub mod keyed;
mod list;
pub mod pathfinding;
mod storage;
pub mod traits;

// Re-export the main traits for convenience
pub use traits::{DecreaseKeyHeap, Heap, HeapError};
