//! Arbitrarily nested deques.
//!
//! [`Nested`] is the element type for deques whose elements may themselves be
//! deques, at any depth. Deep flattening walks the nesting with an explicit
//! stack of cursors instead of recursion, so depth is bounded by memory rather
//! than by the call stack. Every inner deque is owned by its parent, so the
//! nesting is always a finite tree.

use std::fmt;
use std::hash::Hash;
use std::mem;

use smallvec::SmallVec;

use super::{Deque, HashMap, IntoIter, Iter};
use crate::error::DequeError;

/// Nesting depth kept inline before the cursor stack spills to the heap.
const INLINE_DEPTH: usize = 8;

/// An element of a nested deque: either a plain value or another deque.
///
/// # Examples
///
/// ```rust
/// use linked_deque::{Deque, Nested};
///
/// let nested: Deque<Nested<i32>> = Deque::from([
///     Nested::Leaf(1),
///     Nested::deque([Nested::Leaf(2), Nested::deque([Nested::Leaf(3)])]),
///     Nested::Leaf(4),
/// ]);
/// assert_eq!(nested.describe(), "(1 <> (2 <> (3)) <> 4)");
/// assert_eq!(nested.flatten().to_sequence(), vec![1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Nested<T> {
    /// A plain value.
    Leaf(T),
    /// A nested deque.
    Deque(Deque<Nested<T>>),
}

impl<T> Nested<T> {
    /// Builds a nested deque element from its items.
    pub fn deque<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::Deque(items.into_iter().collect())
    }

    /// Returns `true` for a plain value.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Returns the plain value, if this is one.
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&T> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Deque(_) => None,
        }
    }

    /// Returns the nested deque, if this is one.
    #[must_use]
    pub const fn as_deque(&self) -> Option<&Deque<Self>> {
        match self {
            Self::Leaf(_) => None,
            Self::Deque(deque) => Some(deque),
        }
    }
}

impl<T> From<Deque<Nested<T>>> for Nested<T> {
    fn from(deque: Deque<Nested<T>>) -> Self {
        Self::Deque(deque)
    }
}

impl<T: fmt::Display> fmt::Display for Nested<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(value) => write!(formatter, "{value}"),
            Self::Deque(deque) => write!(formatter, "{deque}"),
        }
    }
}

impl<T> Deque<Nested<T>> {
    /// Returns every plain value at any depth, in order.
    #[must_use]
    pub fn flatten(&self) -> Deque<T>
    where
        T: Clone,
    {
        log::trace!("deep flatten over {} top-level elements", self.len());
        let mut flat = Deque::new();
        let mut stack: SmallVec<[Iter<'_, Nested<T>>; INLINE_DEPTH]> = SmallVec::new();
        stack.push(self.iter());
        while let Some(cursor) = stack.last_mut() {
            match cursor.next() {
                Some(Nested::Leaf(value)) => {
                    flat.push(value.clone());
                }
                Some(Nested::Deque(inner)) => stack.push(inner.iter()),
                None => {
                    stack.pop();
                }
            }
        }
        flat
    }

    /// Consumes the deque and returns every plain value at any depth, in
    /// order.
    #[must_use]
    pub fn into_flat(self) -> Deque<T> {
        let mut flat = Deque::new();
        let mut stack: SmallVec<[IntoIter<Nested<T>>; INLINE_DEPTH]> = SmallVec::new();
        stack.push(self.into_iter());
        while let Some(cursor) = stack.last_mut() {
            match cursor.next() {
                Some(Nested::Leaf(value)) => {
                    flat.push(value);
                }
                Some(Nested::Deque(inner)) => stack.push(inner.into_iter()),
                None => {
                    stack.pop();
                }
            }
        }
        flat
    }

    /// Splices every nested deque into its parent's place until only plain
    /// values remain.
    ///
    /// Nodes holding plain values are kept, along with their handles.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::{Deque, Nested};
    ///
    /// let mut nested = Deque::from([
    ///     Nested::deque([Nested::Leaf('a'), Nested::deque([])]),
    ///     Nested::Leaf('b'),
    /// ]);
    /// nested.flatten_in_place();
    /// assert_eq!(nested.describe(), "(a <> b)");
    /// ```
    pub fn flatten_in_place(&mut self) -> &mut Self {
        log::trace!(
            "deep flatten in place over {} top-level elements",
            self.len()
        );
        let mut cursor = self.head;
        while let Some(node) = cursor {
            let Nested::Deque(inner) = &mut self.arena[node].value else {
                cursor = self.arena[node].succ;
                continue;
            };
            let mut inner = mem::take(inner);
            let mut previous = self.arena[node].pred;
            let mut first_spliced = None;
            while let Some(element) = inner.shift() {
                let spliced = self.link_between(element, previous, Some(node));
                first_spliced.get_or_insert(spliced);
                previous = Some(spliced);
            }
            let succ = self.arena[node].succ;
            self.unlink(node);
            cursor = first_spliced.or(succ);
        }
        self
    }

    /// Converts a deque of nested pairs into a map from each pair's first
    /// element to its second. Later pairs overwrite earlier ones with an equal
    /// key.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::NotAPair`] for the first element that is a plain
    /// value, or [`DequeError::PairLength`] for the first nested deque whose
    /// length is not two.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::{Deque, DequeError, Nested};
    ///
    /// let pairs = Deque::from([Nested::deque([Nested::Leaf("k"), Nested::Leaf("v")])]);
    /// let map = pairs.to_map().unwrap();
    /// assert_eq!(map.get(&Nested::Leaf("k")), Some(&Nested::Leaf("v")));
    ///
    /// let broken = Deque::from([Nested::Leaf("k")]);
    /// assert_eq!(broken.to_map(), Err(DequeError::NotAPair { index: 0 }));
    /// ```
    pub fn to_map(&self) -> Result<HashMap<Nested<T>, Nested<T>>, DequeError>
    where
        T: Clone + Eq + Hash,
    {
        let mut map = HashMap::default();
        map.reserve(self.len());
        for (index, element) in self.iter().enumerate() {
            let Nested::Deque(pair) = element else {
                return Err(DequeError::NotAPair { index });
            };
            match (pair.len(), pair.first(), pair.last()) {
                (2, Some(key), Some(value)) => {
                    map.insert(key.clone(), value.clone());
                }
                (len, _, _) => return Err(DequeError::PairLength { index, len }),
            }
        }
        Ok(map)
    }
}
