//! # linked_deque
//!
//! A mutable double-ended queue built as a doubly linked list, with indexed
//! access, slicing, searching, stable merge sort and set algebra implemented
//! directly on the linked structure.
//!
//! ## Overview
//!
//! - **Ends**: O(1) `push`/`pop` at the tail and `unshift`/`shift` at the head
//! - **Indexing**: negative indices count from the tail, so `-1` is the last
//!   element; lookups walk from whichever end is nearer
//! - **Node handles**: [`NodeHandle`] names a node for O(1) removal, insertion
//!   and swapping, and is rejected by any deque it does not belong to
//! - **Algorithms**: search, `uniq`, `union`, `difference`, reductions,
//!   `transpose`, `cartesian_product`, deep `flatten` over [`Nested`] values
//!
//! Nodes are stored in a per-deque arena and linked by slot index, so the crate
//! contains no `unsafe` code.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Deque`] and [`Nested`] as plain
//!   sequences
//! - `fxhash`: hash-based algorithms use `rustc_hash` instead of the standard
//!   hasher
//! - `full`: Enable all features
//!
//! Structural operations emit `trace` records through the [`log`] facade; no
//! logger is installed by the crate.
//!
//! ## Example
//!
//! ```rust
//! use linked_deque::prelude::*;
//!
//! let mut deque = deque![9, 8, 7, 6, 5, 4, 3, 2, 1];
//! deque.sort();
//! assert_eq!(deque.get(0), Some(&1));
//! assert_eq!(deque.get(-1), Some(&9));
//! assert_eq!(deque.values_at(&[1, 3, 5]), deque![Some(2), Some(4), Some(6)]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use linked_deque::prelude::*;
/// ```
pub mod prelude {
    pub use crate::deque;
    pub use crate::deque::{Deque, HashMap, Nested, NodeHandle};
    pub use crate::error::DequeError;
}

pub mod deque;
mod deque_macro;
mod error;

pub use deque::{Deque, HashMap, IntoIter, Iter, Nested, NodeHandle, deque};
pub use error::DequeError;
