//! Double-ended queue built as a doubly linked list.
//!
//! This module provides [`Deque`], a mutable doubly linked list that exposes
//! indexed access, slicing, searching, sorting and set algebra directly on the
//! linked structure.
//!
//! # Overview
//!
//! - O(1) `push`/`pop` at the tail and `unshift`/`shift` at the head
//! - O(1) `len`, `first`, `last`
//! - O(min(i, n - i)) indexed access, with negative indices counted from the tail
//! - O(1) relinking once a node is located (`remove_node`, `swap_nodes`)
//! - O(n log n) stable merge sort over linked runs
//!
//! Every derived deque (slices, maps, filters, sorted copies, set algebra
//! results) is a structurally independent copy: no node is ever shared between
//! two deques.
//!
//! # Examples
//!
//! ```rust
//! use linked_deque::Deque;
//!
//! let mut deque = Deque::from_range(1..=9);
//! assert_eq!(deque.delete(&5), Some(5));
//! assert_eq!(deque.len(), 8);
//! assert_eq!(deque.get(-1), Some(&9));
//! assert_eq!(deque.describe(), "(1 <> 2 <> 3 <> 4 <> 6 <> 7 <> 8 <> 9)");
//! ```
//!
//! # Node handles
//!
//! [`NodeHandle`] values name individual nodes. They are validated on every
//! use, so a handle from another deque or to a removed node is rejected with
//! [`DequeError::ForeignNode`] instead of corrupting the chain.
//!
//! ```rust
//! use linked_deque::{Deque, DequeError};
//!
//! let mut deque: Deque<char> = "abcd".chars().collect();
//! let first = deque.front_node().unwrap();
//! let last = deque.back_node().unwrap();
//! deque.swap_nodes(first, last).unwrap();
//! assert_eq!(deque.describe(), "(d <> b <> c <> a)");
//!
//! let other: Deque<char> = "xyz".chars().collect();
//! let foreign = other.front_node().unwrap();
//! assert_eq!(deque.remove_node(foreign), Err(DequeError::ForeignNode));
//! ```

use std::hash::{Hash, Hasher};
use std::ops::{Add, Index, IndexMut};

use static_assertions::assert_impl_all;

use crate::error::DequeError;

mod algorithms;
mod format;
mod iter;
mod matrix;
mod mutation;
mod nested;
mod node;
#[cfg(feature = "serde")]
mod serialize;
mod sort;
mod swap;
mod traversal;

pub use iter::{IntoIter, Iter};
pub use nested::Nested;
pub use node::NodeHandle;

use node::{Arena, NodeIndex, next_identity};

// =============================================================================
// Hashing
// =============================================================================

#[cfg(feature = "fxhash")]
type HashState = rustc_hash::FxBuildHasher;

#[cfg(not(feature = "fxhash"))]
type HashState = std::collections::hash_map::RandomState;

/// Hash map produced by the pair conversions ([`Deque::to_map`]).
///
/// Uses `rustc_hash` when the `fxhash` feature is enabled and the standard
/// `RandomState` otherwise.
pub type HashMap<K, V> = std::collections::HashMap<K, V, HashState>;

pub(crate) type HashSet<T> = std::collections::HashSet<T, HashState>;

// =============================================================================
// Deque
// =============================================================================

/// A double-ended queue implemented as a doubly linked list.
///
/// # Time Complexity
///
/// | Operation | Complexity |
/// |-----------|------------|
/// | `push` / `pop` | O(1) |
/// | `unshift` / `shift` | O(1) |
/// | `len` / `is_empty` | O(1) |
/// | `get` / `set` / `insert_at` / `delete_at` | O(min(i, n - i)) |
/// | `remove_node` / `swap_nodes` | O(1) |
/// | `slice` | O(start + count) |
/// | `sort` | O(n log n) |
///
/// # Examples
///
/// ```rust
/// use linked_deque::Deque;
///
/// let mut deque = Deque::new();
/// deque.push(2).push(3).unshift(1);
/// assert_eq!(deque.first(), Some(&1));
/// assert_eq!(deque.last(), Some(&3));
/// assert_eq!(deque.len(), 3);
/// ```
pub struct Deque<T> {
    arena: Arena<T>,
    head: Option<NodeIndex>,
    tail: Option<NodeIndex>,
    /// Cached node count, updated together with every link change.
    size: usize,
    identity: u64,
}

assert_impl_all!(Deque<i32>: Send, Sync, Clone, Default);

impl<T> Deque<T> {
    /// Creates a new empty deque.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            head: None,
            tail: None,
            size: 0,
            identity: next_identity(),
        }
    }

    /// Creates an empty deque with room for `capacity` nodes before the node
    /// storage reallocates.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            head: None,
            tail: None,
            size: 0,
            identity: next_identity(),
        }
    }

    /// Creates a deque holding `count` copies of `element`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let deque = Deque::from_elem('x', 3);
    /// assert_eq!(deque.describe(), "(x <> x <> x)");
    /// ```
    #[must_use]
    pub fn from_elem(element: T, count: usize) -> Self
    where
        T: Clone,
    {
        std::iter::repeat_n(element, count).collect()
    }

    /// Builds a deque from an ascending range.
    ///
    /// The range is consumed from its upper end, each value being prepended,
    /// so the deque ends up ascending.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let deque = Deque::from_range(0..=4);
    /// assert_eq!(deque.to_sequence(), vec![0, 1, 2, 3, 4]);
    /// ```
    #[must_use]
    pub fn from_range<R>(range: R) -> Self
    where
        R: DoubleEndedIterator<Item = T>,
    {
        let mut deque = Self::new();
        for value in range.rev() {
            deque.unshift(value);
        }
        deque
    }

    /// Returns a deque holding the elements of `self` repeated `times` times.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::deque;
    ///
    /// assert_eq!(deque!['a', 'b'].repeat(2), deque!['a', 'b', 'a', 'b']);
    /// assert!(deque![1, 2].repeat(0).is_empty());
    /// ```
    #[must_use]
    pub fn repeat(&self, times: usize) -> Self
    where
        T: Clone,
    {
        let mut repeated = Self::with_capacity(self.size * times);
        for _ in 0..times {
            repeated.extend(self.iter().cloned());
        }
        repeated
    }

    /// Returns the number of elements in the deque.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the deque contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Removes every element, invalidating all outstanding node handles.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
        self.size = 0;
    }

    /// Copies the elements, head to tail, into a `Vec`.
    #[must_use]
    pub fn to_sequence(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Returns a new deque holding the elements of `self` followed by those of
    /// `other`.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        let mut concatenated = self.clone();
        concatenated.extend(other.iter().cloned());
        concatenated
    }

    /// Resolves a handle to the arena slot of a live node of this deque.
    pub(crate) fn validate(&self, handle: NodeHandle) -> Result<NodeIndex, DequeError> {
        if handle.owner != self.identity {
            return Err(DequeError::ForeignNode);
        }
        match self.arena.live_generation(handle.index) {
            Some(generation) if generation == handle.generation => Ok(handle.index),
            _ => Err(DequeError::ForeignNode),
        }
    }

    /// Builds the public handle for a live node.
    pub(crate) fn handle(&self, index: NodeIndex) -> NodeHandle {
        NodeHandle {
            owner: self.identity,
            index,
            generation: self.arena.live_generation(index).unwrap_or_default(),
        }
    }
}

/// Builds a deque from any ordered sequence of values.
///
/// # Examples
///
/// ```rust
/// use linked_deque::deque;
///
/// let numbers = deque(vec![1, 2, 3]);
/// assert_eq!(numbers.len(), 3);
/// ```
pub fn deque<T, I>(values: I) -> Deque<T>
where
    I: IntoIterator<Item = T>,
{
    values.into_iter().collect()
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Deque<T> {
    fn clone(&self) -> Self {
        let mut cloned = Self::with_capacity(self.size);
        cloned.extend(self.iter().cloned());
        cloned
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T: Hash> Hash for Deque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T> Index<isize> for Deque<T> {
    type Output = T;

    fn index(&self, index: isize) -> &T {
        let len = self.size;
        match self.get(index) {
            Some(element) => element,
            None => panic!("index {index} out of range for deque of length {len}"),
        }
    }
}

impl<T> IndexMut<isize> for Deque<T> {
    fn index_mut(&mut self, index: isize) -> &mut T {
        let len = self.size;
        match self.get_mut(index) {
            Some(element) => element,
            None => panic!("index {index} out of range for deque of length {len}"),
        }
    }
}

impl<T: Clone> Add<&Deque<T>> for &Deque<T> {
    type Output = Deque<T>;

    fn add(self, other: &Deque<T>) -> Deque<T> {
        self.concat(other)
    }
}

impl<T> Add for Deque<T> {
    type Output = Self;

    fn add(mut self, mut other: Self) -> Self {
        self.append(&mut other);
        self
    }
}

impl<T, const N: usize> From<[T; N]> for Deque<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T> From<Vec<T>> for Deque<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T> From<Deque<T>> for Vec<T> {
    fn from(deque: Deque<T>) -> Self {
        deque.into_iter().collect()
    }
}

#[cfg(test)]
/// Walks the chain both ways and checks every invariant of the links.
fn assert_consistent<T>(deque: &Deque<T>) {
    let mut forward = 0;
    let mut previous = None;
    let mut cursor = deque.head;
    while let Some(node) = cursor {
        assert_eq!(deque.arena[node].pred, previous, "broken pred link");
        previous = Some(node);
        cursor = deque.arena[node].succ;
        forward += 1;
        assert!(forward <= deque.size, "chain longer than cached size");
    }
    assert_eq!(previous, deque.tail, "forward walk does not end at tail");
    assert_eq!(forward, deque.size);

    let mut backward = 0;
    let mut cursor = deque.tail;
    while let Some(node) = cursor {
        cursor = deque.arena[node].pred;
        backward += 1;
        assert!(backward <= deque.size, "chain longer than cached size");
    }
    assert_eq!(backward, deque.size);
    assert_eq!(
        deque.size == 0,
        deque.head.is_none() && deque.tail.is_none()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_new_is_empty() {
        let deque: Deque<i32> = Deque::new();
        assert!(deque.is_empty());
        assert_eq!(deque.len(), 0);
        assert_eq!(deque.first(), None);
        assert_eq!(deque.last(), None);
    }

    #[rstest]
    fn test_default_is_empty() {
        let deque: Deque<i32> = Deque::default();
        assert!(deque.is_empty());
    }

    #[rstest]
    fn test_from_range_is_ascending() {
        let deque = Deque::from_range(1..=9);
        assert_eq!(deque.len(), 9);
        assert_eq!(deque.to_sequence(), (1..=9).collect::<Vec<_>>());
    }

    #[rstest]
    fn test_from_elem() {
        let deque = Deque::from_elem(7, 4);
        assert_eq!(deque.to_sequence(), vec![7, 7, 7, 7]);
    }

    #[rstest]
    #[case(0, vec![])]
    #[case(1, vec![1, 2])]
    #[case(3, vec![1, 2, 1, 2, 1, 2])]
    fn test_repeat(#[case] times: usize, #[case] expected: Vec<i32>) {
        let deque = Deque::from([1, 2]);
        assert_eq!(deque.repeat(times).to_sequence(), expected);
    }

    #[rstest]
    fn test_clear_resets_links() {
        let mut deque = Deque::from([1, 2, 3]);
        deque.clear();
        assert!(deque.is_empty());
        assert_eq!(deque.first(), None);
        deque.push(4);
        assert_eq!(deque.to_sequence(), vec![4]);
    }

    #[rstest]
    fn test_clear_invalidates_handles() {
        let mut deque = Deque::from([1, 2, 3]);
        let handle = deque.front_node().unwrap();
        deque.clear();
        deque.push(9);
        assert_eq!(deque.value(handle), Err(DequeError::ForeignNode));
    }

    #[rstest]
    fn test_clone_is_independent() {
        let original = Deque::from([1, 2, 3]);
        let mut cloned = original.clone();
        cloned.push(4);
        cloned[0] = 10;
        assert_eq!(original.to_sequence(), vec![1, 2, 3]);
        assert_eq!(cloned.to_sequence(), vec![10, 2, 3, 4]);
    }

    #[rstest]
    fn test_clone_does_not_accept_original_handles() {
        let original = Deque::from([1, 2, 3]);
        let cloned = original.clone();
        let handle = original.front_node().unwrap();
        assert_eq!(cloned.value(handle), Err(DequeError::ForeignNode));
    }

    #[rstest]
    fn test_equality() {
        assert_eq!(Deque::from([1, 2, 3]), Deque::from_range(1..=3));
        assert_ne!(Deque::from([1, 2, 3]), Deque::from([1, 2]));
        assert_ne!(Deque::from([1, 2, 3]), Deque::from([1, 2, 4]));
    }

    #[rstest]
    fn test_equal_deques_hash_equally() {
        use std::collections::hash_map::DefaultHasher;

        let hash_of = |deque: &Deque<i32>| {
            let mut hasher = DefaultHasher::new();
            deque.hash(&mut hasher);
            hasher.finish()
        };
        let mut built = Deque::new();
        built.push(2).push(3).unshift(1);
        assert_eq!(hash_of(&built), hash_of(&Deque::from([1, 2, 3])));
    }

    #[rstest]
    fn test_index_negative() {
        let deque = Deque::from_range(0..=9);
        assert_eq!(deque[0], 0);
        assert_eq!(deque[-1], 9);
        assert_eq!(deque[-10], 0);
    }

    #[rstest]
    #[should_panic(expected = "index 3 out of range for deque of length 3")]
    fn test_index_out_of_range_panics() {
        let deque = Deque::from([1, 2, 3]);
        let _ = deque[3];
    }

    #[rstest]
    fn test_add_references() {
        let left = Deque::from([1, 2]);
        let right = Deque::from([3]);
        let sum = &left + &right;
        assert_eq!(sum.to_sequence(), vec![1, 2, 3]);
        assert_eq!(left.len(), 2);
    }

    #[rstest]
    fn test_add_owned() {
        let sum = Deque::from(vec!['a']) + Deque::from(vec!['b', 'c']);
        assert_eq!(sum.describe(), "(a <> b <> c)");
    }

    #[rstest]
    fn test_free_function_and_vec_round_trip() {
        let deque = deque(vec![3, 1, 2]);
        let values: Vec<i32> = deque.clone().into();
        assert_eq!(values, vec![3, 1, 2]);
        assert_eq!(Deque::from(values), deque);
    }
}
