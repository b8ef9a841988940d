//! Structural mutation: push/pop at the tail, unshift/shift at the head and
//! splicing at arbitrary positions.
//!
//! All splices go through [`Deque::relink`], which also moves `head`/`tail`
//! when one side of the new link is absent, and every allocation or release
//! adjusts the cached size in the same call.

use std::mem;

use super::node::{Node, NodeIndex};
use super::{Deque, NodeHandle};
use crate::error::DequeError;

impl<T> Deque<T> {
    /// Makes `succ` follow `pred`. An absent `pred` makes `succ` the head and an
    /// absent `succ` makes `pred` the tail.
    pub(crate) fn relink(&mut self, pred: Option<NodeIndex>, succ: Option<NodeIndex>) {
        match pred {
            Some(pred_index) => self.arena[pred_index].succ = succ,
            None => self.head = succ,
        }
        match succ {
            Some(succ_index) => self.arena[succ_index].pred = pred,
            None => self.tail = pred,
        }
    }

    /// Allocates a node for `value` between two neighbours, which must be
    /// adjacent (or the matching end of the chain).
    pub(crate) fn link_between(
        &mut self,
        value: T,
        pred: Option<NodeIndex>,
        succ: Option<NodeIndex>,
    ) -> NodeIndex {
        let node = self.arena.allocate(Node::new(value, pred, succ));
        self.relink(pred, Some(node));
        self.relink(Some(node), succ);
        self.size += 1;
        node
    }

    /// Detaches a node, bridging its neighbours, and returns its value.
    pub(crate) fn unlink(&mut self, node: NodeIndex) -> T {
        let Node { value, pred, succ } = self.arena.release(node);
        self.relink(pred, succ);
        self.size -= 1;
        value
    }

    /// Appends an element at the tail.
    pub fn push(&mut self, element: T) -> &mut Self {
        self.link_between(element, self.tail, None);
        self
    }

    /// Removes and returns the tail element, or `None` if the deque is empty.
    pub fn pop(&mut self) -> Option<T> {
        let tail = self.tail?;
        Some(self.unlink(tail))
    }

    /// Prepends an element at the head.
    pub fn unshift(&mut self, element: T) -> &mut Self {
        self.link_between(element, None, self.head);
        self
    }

    /// Removes and returns the head element, or `None` if the deque is empty.
    pub fn shift(&mut self) -> Option<T> {
        let head = self.head?;
        Some(self.unlink(head))
    }

    /// Inserts an element at `index` and returns a handle to its node.
    ///
    /// A non-negative `index` in `0..=len` places the element so that it ends
    /// up at that position (`len` appends). A negative `index` places the
    /// element right after the node at that index, so `-1` appends and `-len - 1`
    /// prepends.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::IndexOutOfRange`] if `index` is outside
    /// `-len - 1..=len`; the deque is left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let mut deque = Deque::from([1, 2, 4]);
    /// deque.insert_at(2, 3).unwrap();
    /// deque.insert_at(-1, 5).unwrap();
    /// assert_eq!(deque.to_sequence(), vec![1, 2, 3, 4, 5]);
    /// assert!(deque.insert_at(7, 0).is_err());
    /// ```
    pub fn insert_at(&mut self, index: isize, element: T) -> Result<NodeHandle, DequeError> {
        let magnitude = index.unsigned_abs();
        let node = if index >= 0 {
            if magnitude > self.size {
                return Err(self.out_of_range(index));
            }
            match self.node_at_position(magnitude) {
                Some(succ) => self.link_between(element, self.arena[succ].pred, Some(succ)),
                None => self.link_between(element, self.tail, None),
            }
        } else {
            if magnitude > self.size + 1 {
                return Err(self.out_of_range(index));
            }
            match self.node_at(index) {
                Some(pred) => self.link_between(element, Some(pred), self.arena[pred].succ),
                None => self.link_between(element, None, self.head),
            }
        };
        Ok(self.handle(node))
    }

    /// Inserts an element directly before `handle`'s node.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::ForeignNode`] if `handle` is not a live node of
    /// this deque.
    pub fn insert_before(
        &mut self,
        handle: NodeHandle,
        element: T,
    ) -> Result<NodeHandle, DequeError> {
        let succ = self.validate(handle)?;
        let node = self.link_between(element, self.arena[succ].pred, Some(succ));
        Ok(self.handle(node))
    }

    /// Inserts an element directly after `handle`'s node.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::ForeignNode`] if `handle` is not a live node of
    /// this deque.
    pub fn insert_after(
        &mut self,
        handle: NodeHandle,
        element: T,
    ) -> Result<NodeHandle, DequeError> {
        let pred = self.validate(handle)?;
        let node = self.link_between(element, Some(pred), self.arena[pred].succ);
        Ok(self.handle(node))
    }

    /// Unlinks `handle`'s node and returns its value.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::ForeignNode`] if `handle` belongs to another deque
    /// or its node was already removed.
    pub fn remove_node(&mut self, handle: NodeHandle) -> Result<T, DequeError> {
        let node = self.validate(handle)?;
        Ok(self.unlink(node))
    }

    /// Overwrites the element at `index` in place and returns the old value.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::IndexOutOfRange`] if `index` resolves to no node.
    pub fn set(&mut self, index: isize, element: T) -> Result<T, DequeError> {
        let node = self
            .node_at(index)
            .ok_or_else(|| self.out_of_range(index))?;
        Ok(mem::replace(&mut self.arena[node].value, element))
    }

    /// Removes the first element, searching from the head, equal to `element`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let mut deque = Deque::from([1, 2, 1]);
    /// assert_eq!(deque.delete(&1), Some(1));
    /// assert_eq!(deque.to_sequence(), vec![2, 1]);
    /// assert_eq!(deque.delete(&7), None);
    /// ```
    pub fn delete(&mut self, element: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let mut cursor = self.head;
        while let Some(node) = cursor {
            if self.arena[node].value == *element {
                return Some(self.unlink(node));
            }
            cursor = self.arena[node].succ;
        }
        None
    }

    /// Removes the first element, searching from the tail, equal to `element`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let mut deque = Deque::from(['a', 'b', 'a']);
    /// assert_eq!(deque.rdelete(&'a'), Some('a'));
    /// assert_eq!(deque.describe(), "(a <> b)");
    /// ```
    pub fn rdelete(&mut self, element: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let mut cursor = self.tail;
        while let Some(node) = cursor {
            if self.arena[node].value == *element {
                return Some(self.unlink(node));
            }
            cursor = self.arena[node].pred;
        }
        None
    }

    /// Removes and returns the element at `index`, if any.
    pub fn delete_at(&mut self, index: isize) -> Option<T> {
        let node = self.node_at(index)?;
        Some(self.unlink(node))
    }

    /// Keeps only the elements for which `predicate` returns `true`.
    pub fn retain<P>(&mut self, mut predicate: P) -> &mut Self
    where
        P: FnMut(&T) -> bool,
    {
        self.retain_with_index(|element, _| predicate(element))
    }

    /// Keeps only the elements for which `predicate` returns `true`, passing
    /// each element's position before any removal.
    pub fn retain_with_index<P>(&mut self, mut predicate: P) -> &mut Self
    where
        P: FnMut(&T, usize) -> bool,
    {
        let mut cursor = self.head;
        let mut position = 0;
        while let Some(node) = cursor {
            cursor = self.arena[node].succ;
            if !predicate(&self.arena[node].value, position) {
                self.unlink(node);
            }
            position += 1;
        }
        self
    }

    /// Applies `function` to every element in place, head to tail.
    pub fn for_each_mut<F>(&mut self, mut function: F) -> &mut Self
    where
        F: FnMut(&mut T),
    {
        let mut cursor = self.head;
        while let Some(node) = cursor {
            function(&mut self.arena[node].value);
            cursor = self.arena[node].succ;
        }
        self
    }

    /// Replaces every element with `function` applied to it.
    pub fn map_in_place<F>(&mut self, mut function: F) -> &mut Self
    where
        F: FnMut(&T) -> T,
    {
        self.for_each_mut(|element| *element = function(element))
    }

    /// Replaces every element with `function` applied to it and its position.
    pub fn map_with_index_in_place<F>(&mut self, mut function: F) -> &mut Self
    where
        F: FnMut(&T, usize) -> T,
    {
        let mut position = 0;
        self.for_each_mut(|element| {
            *element = function(element, position);
            position += 1;
        })
    }

    /// Moves every element of `other` to the tail of `self`, leaving `other`
    /// empty.
    pub fn append(&mut self, other: &mut Self) -> &mut Self {
        while let Some(element) = other.shift() {
            self.push(element);
        }
        self
    }

    /// Splits the deque at position `at`, keeping `[0, at)` and returning the
    /// nodes from `at` onward as a new deque.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::IndexOutOfRange`] if `at > len`.
    pub fn split_off(&mut self, at: usize) -> Result<Self, DequeError> {
        if at > self.size {
            return Err(DequeError::IndexOutOfRange {
                index: isize::try_from(at).unwrap_or(isize::MAX),
                len: self.size,
            });
        }
        Ok(self.split_tail(at))
    }

    pub(crate) fn split_tail(&mut self, at: usize) -> Self {
        let mut tail = Self::with_capacity(self.size.saturating_sub(at));
        while self.size > at {
            if let Some(element) = self.pop() {
                tail.unshift(element);
            }
        }
        tail
    }

    /// Reverses the order of the elements by flipping every node's links.
    ///
    /// Node handles stay valid and keep following their values.
    pub fn reverse_in_place(&mut self) -> &mut Self {
        let mut cursor = self.head;
        while let Some(node) = cursor {
            let links = &mut self.arena[node];
            mem::swap(&mut links.pred, &mut links.succ);
            cursor = links.pred;
        }
        mem::swap(&mut self.head, &mut self.tail);
        self
    }
}
