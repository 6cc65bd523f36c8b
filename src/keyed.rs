//! Key-only priority queue
//!
//! [`KeyHeap`] is a Fibonacci heap whose elements are bare keys: the key is
//! both the ordering and the payload. It mirrors the classic textbook
//! interface (insert / find_min / extract_min / merge / decrease_key /
//! delete) on top of [`FibonacciHeap<(), K>`](crate::fibonacci::FibonacciHeap).
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::keyed::KeyHeap;
//!
//! let mut heap = KeyHeap::new();
//! let ten = heap.insert(10);
//! heap.insert(20);
//! heap.insert(5);
//! assert_eq!(heap.find_min(), Some(&5));
//! assert_eq!(heap.extract_min(), Ok(5));
//!
//! heap.decrease_key(&ten, 3).unwrap();
//! assert_eq!(heap.find_min(), Some(&3));
//! ```

use crate::fibonacci::{FibonacciHandle, FibonacciHeap, HandleRemap};
use crate::traits::HeapError;

/// Min-heap of keys with handle-based decrease_key and delete
#[derive(Debug)]
pub struct KeyHeap<K: Ord> {
    heap: FibonacciHeap<(), K>,
}

impl<K: Ord> KeyHeap<K> {
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self {
            heap: FibonacciHeap::new(),
        }
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of keys in the heap
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Inserts a key, returning the handle that names it
    pub fn insert(&mut self, key: K) -> FibonacciHandle {
        self.heap.insert(key, ())
    }

    /// Returns the smallest key, or `None` if the heap is empty
    pub fn find_min(&self) -> Option<&K> {
        self.heap.find_min().map(|(key, _)| key)
    }

    /// Removes and returns the smallest key
    pub fn extract_min(&mut self) -> Result<K, HeapError> {
        self.heap.extract_min().map(|(key, _)| key)
    }

    /// Moves every key of `other` into this heap
    ///
    /// Only the smaller heap's nodes move, so only its handles go stale; see
    /// [`FibonacciHeap::merge`].
    pub fn merge(&mut self, other: Self) {
        self.heap.merge(other.heap);
    }

    /// Like [`merge`](Self::merge), returning a map for the moved side's handles
    pub fn merge_with_handles(&mut self, other: Self) -> HandleRemap {
        self.heap.merge_with_handles(other.heap)
    }

    /// Lowers the key behind `handle` to `new_key`
    pub fn decrease_key(&mut self, handle: &FibonacciHandle, new_key: K) -> Result<(), HeapError> {
        self.heap.decrease_key(handle, new_key)
    }

    /// Removes the key behind `handle` and returns it
    pub fn delete(&mut self, handle: &FibonacciHandle) -> Result<K, HeapError> {
        self.heap.delete(handle).map(|(key, _)| key)
    }

    /// Returns the current key behind `handle`, if it is still present
    pub fn key(&self, handle: &FibonacciHandle) -> Option<&K> {
        self.heap.get(handle).map(|(key, _)| key)
    }

    /// Drains the heap in non-decreasing key order
    pub fn into_sorted_vec(self) -> Vec<K> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|(key, _)| key)
            .collect()
    }
}

impl<K: Ord> Default for KeyHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for KeyHeap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.heap.extend(iter.into_iter().map(|key| (key, ())));
    }
}

impl<K: Ord> FromIterator<K> for KeyHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}
