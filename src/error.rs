//! Error types for deque operations.
//!
//! Absence (an index past either end, an empty deque) is reported through
//! `Option` on reads. [`DequeError`] covers the cases where the caller handed
//! the deque something it cannot act on: a position that has to exist for a
//! write, a node handle from another deque, or nested data with the wrong
//! shape.
//!
//! Every operation returning a `DequeError` validates its input before it
//! touches any link, so a failed call leaves the deque exactly as it was.

use std::fmt;

/// Represents errors that can occur when operating on a [`Deque`](crate::deque::Deque).
///
/// # Examples
///
/// ```rust
/// use linked_deque::{Deque, DequeError};
///
/// let mut deque: Deque<i32> = (1..=3).collect();
/// let error = deque.set(5, 10).unwrap_err();
/// assert_eq!(error, DequeError::IndexOutOfRange { index: 5, len: 3 });
/// assert_eq!(format!("{error}"), "index 5 out of range for deque of length 3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DequeError {
    /// The index resolves to no node.
    IndexOutOfRange {
        /// The requested index, possibly negative.
        index: isize,
        /// The length of the deque at the time of the call.
        len: usize,
    },
    /// The node handle does not refer to a live node of this deque.
    ForeignNode,
    /// A row of a matrix-shaped deque differs in length from the first row.
    RowLengthMismatch {
        /// Position of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// An element expected to be a pair is not a sequence at all.
    NotAPair {
        /// Position of the offending element.
        index: usize,
    },
    /// An element expected to be a pair is a sequence of the wrong length.
    PairLength {
        /// Position of the offending element.
        index: usize,
        /// The actual length of the element.
        len: usize,
    },
    /// Two elements have no defined order relative to each other.
    Incomparable,
}

impl fmt::Display for DequeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => write!(
                formatter,
                "index {index} out of range for deque of length {len}"
            ),
            Self::ForeignNode => write!(formatter, "node does not belong to this deque"),
            Self::RowLengthMismatch {
                row,
                expected,
                actual,
            } => write!(
                formatter,
                "row {row} has length {actual}, expected {expected}"
            ),
            Self::NotAPair { index } => write!(formatter, "element {index} is not a pair"),
            Self::PairLength { index, len } => write!(
                formatter,
                "element {index} has length {len}, expected 2"
            ),
            Self::Incomparable => write!(formatter, "elements are not mutually comparable"),
        }
    }
}

impl std::error::Error for DequeError {}
