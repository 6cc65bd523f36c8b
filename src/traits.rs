//! Priority-queue traits and the shared error type
//!
//! [`Heap`] is the minimal queue surface (push, peek, pop, merge).
//! [`DecreaseKeyHeap`] adds handles, which is what graph searches in
//! [`pathfinding`](crate::pathfinding) are written against.
//!
//! Both traits are min-oriented and keep the ordering key (`P`) apart from
//! the payload (`T`).

use std::fmt;

/// Failure of a heap operation
///
/// Every variant is a precondition the caller can check or recover from; the
/// heap is left unchanged when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// Nothing to extract
    EmptyHeap,
    /// `decrease_key` was asked to raise a priority
    InvalidNewKey,
    /// The handle's element was already removed, or the handle came from a
    /// different heap
    InvalidHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            HeapError::EmptyHeap => "heap is empty",
            HeapError::InvalidNewKey => "new priority is greater than the current priority",
            HeapError::InvalidHandle => "handle is no longer valid (element was removed)",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for HeapError {}

/// Opaque reference to one element of a heap
pub trait Handle: Clone + PartialEq + Eq {}

/// Min-priority queue of `(priority, item)` pairs
///
/// ```rust
/// use rust_fibonacci_heap::Heap;
/// use rust_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// fn drain<H: Heap<&'static str, u8>>(mut heap: H) -> Vec<&'static str> {
///     std::iter::from_fn(|| heap.pop().map(|(_, item)| item)).collect()
/// }
///
/// let mut heap = FibonacciHeap::new();
/// heap.push(2, "b");
/// heap.push(1, "a");
/// assert_eq!(heap.peek(), Some((&1, &"a")));
/// assert_eq!(drain(heap), vec!["a", "b"]);
/// ```
pub trait Heap<T, P: Ord> {
    fn new() -> Self;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;

    fn push(&mut self, priority: P, item: T);

    /// Smallest priority and its item, if any
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes the smallest priority and its item, if any
    fn pop(&mut self) -> Option<(P, T)>;

    /// Moves every element of `other` into `self`
    fn merge(&mut self, other: Self);
}

/// A [`Heap`] whose elements can be addressed after insertion
///
/// ```rust
/// use rust_fibonacci_heap::{DecreaseKeyHeap, Heap, HeapError};
/// use rust_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.push_with_handle(10, "item");
/// assert_eq!(DecreaseKeyHeap::decrease_key(&mut heap, &handle, 5), Ok(()));
/// assert_eq!(
///     DecreaseKeyHeap::decrease_key(&mut heap, &handle, 6),
///     Err(HeapError::InvalidNewKey)
/// );
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    type Handle: Handle;

    /// Like [`Heap::push`], returning a handle to the new element
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Lowers the priority behind `handle` to `new_priority`
    ///
    /// # Errors
    /// - `HeapError::InvalidNewKey` if `new_priority` is greater than the
    ///   current priority; the heap is left untouched.
    /// - `HeapError::InvalidHandle` if the element is no longer in the heap.
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;
}
