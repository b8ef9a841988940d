//! Swapping two nodes by relinking the chain around them.
//!
//! Values never move: the two nodes trade places, so handles keep following
//! their values.
//!
//! # Adjacency
//!
//! The general case repoints four neighbours:
//!
//! ```text
//! .. p1 <> A <> s1 .. p2 <> B <> s2 ..   =>   .. p1 <> B <> s1 .. p2 <> A <> s2 ..
//! ```
//!
//! When `A` and `B` are neighbours, `s1` is `B` and `p2` is `A`, so that
//! relinking would tie each node to itself. Adjacent pairs are therefore
//! crossed directly:
//!
//! ```text
//! .. p1 <> A <> B <> s2 ..   =>   .. p1 <> B <> A <> s2 ..
//! ```

use super::node::NodeIndex;
use super::{Deque, NodeHandle};
use crate::error::DequeError;

impl<T> Deque<T> {
    /// Exchanges the positions of two nodes in O(1).
    ///
    /// Swapping a node with itself is a no-op. The size and every other link
    /// are unchanged, and both handles stay valid.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::ForeignNode`] if either handle is not a live node
    /// of this deque; nothing is relinked in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let mut deque = Deque::from([1, 2, 3]);
    /// let first = deque.node(0).unwrap();
    /// let second = deque.node(1).unwrap();
    /// deque.swap_nodes(first, second).unwrap();
    /// assert_eq!(deque.to_sequence(), vec![2, 1, 3]);
    /// assert_eq!(deque.position(first), Ok(1));
    /// ```
    pub fn swap_nodes(&mut self, first: NodeHandle, second: NodeHandle) -> Result<(), DequeError> {
        let first = self.validate(first)?;
        let second = self.validate(second)?;
        self.swap_links(first, second);
        Ok(())
    }

    /// Exchanges the elements at two indices by swapping their nodes.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::IndexOutOfRange`] if either index resolves to no
    /// node; nothing is relinked in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let mut deque = Deque::from_range(1..=5);
    /// deque.swap(0, -1).unwrap();
    /// assert_eq!(deque.to_sequence(), vec![5, 2, 3, 4, 1]);
    /// assert!(deque.swap(0, 5).is_err());
    /// ```
    pub fn swap(&mut self, first: isize, second: isize) -> Result<(), DequeError> {
        let first_position = self
            .position_of(first)
            .ok_or_else(|| self.out_of_range(first))?;
        let second_position = self
            .position_of(second)
            .ok_or_else(|| self.out_of_range(second))?;
        let (front, back) = if first_position <= second_position {
            (first_position, second_position)
        } else {
            (second_position, first_position)
        };
        match (self.node_at_position(front), self.node_at_position(back)) {
            (Some(front), Some(back)) => {
                self.swap_links(front, back);
                Ok(())
            }
            _ => Err(self.out_of_range(first)),
        }
    }

    pub(crate) fn swap_links(&mut self, first: NodeIndex, second: NodeIndex) {
        if first == second {
            return;
        }
        // Neighbours are ordered so that `first` precedes `second`; for any
        // other pair the relinking below does not depend on order.
        let (first, second) = if self.arena[second].succ == Some(first) {
            (second, first)
        } else {
            (first, second)
        };
        let first_pred = self.arena[first].pred;
        let first_succ = self.arena[first].succ;
        let second_pred = self.arena[second].pred;
        let second_succ = self.arena[second].succ;
        log::trace!("swapping nodes {first} and {second}");

        if first_succ == Some(second) {
            self.relink(first_pred, Some(second));
            self.relink(Some(second), Some(first));
            self.relink(Some(first), second_succ);
        } else {
            self.relink(first_pred, Some(second));
            self.relink(Some(second), first_succ);
            self.relink(second_pred, Some(first));
            self.relink(Some(first), second_succ);
        }
    }
}
