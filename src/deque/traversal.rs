//! Index and handle resolution.
//!
//! Non-negative indices count from the head, negative ones from the tail
//! (`-1` is the tail). Resolution walks from whichever end is nearer, so a
//! lookup costs O(min(i, n - i)) link steps and no recursion.

use std::ops::{Bound, RangeBounds};

use super::node::NodeIndex;
use super::{Deque, NodeHandle};
use crate::error::DequeError;

impl<T> Deque<T> {
    /// Maps a possibly negative index onto a head-relative position.
    pub(crate) fn position_of(&self, index: isize) -> Option<usize> {
        let magnitude = index.unsigned_abs();
        if index >= 0 {
            (magnitude < self.size).then_some(magnitude)
        } else {
            (magnitude <= self.size).then(|| self.size - magnitude)
        }
    }

    /// Walks to the node at a head-relative position.
    pub(crate) fn node_at_position(&self, position: usize) -> Option<NodeIndex> {
        if position >= self.size {
            return None;
        }
        if position <= self.size / 2 {
            let mut cursor = self.head;
            for _ in 0..position {
                cursor = self.arena[cursor?].succ;
            }
            cursor
        } else {
            let mut cursor = self.tail;
            for _ in 0..(self.size - 1 - position) {
                cursor = self.arena[cursor?].pred;
            }
            cursor
        }
    }

    pub(crate) fn node_at(&self, index: isize) -> Option<NodeIndex> {
        self.position_of(index)
            .and_then(|position| self.node_at_position(position))
    }

    pub(crate) fn out_of_range(&self, index: isize) -> DequeError {
        DequeError::IndexOutOfRange {
            index,
            len: self.size,
        }
    }

    /// Returns a reference to the element at `index`, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let deque = Deque::from_range(1..=9);
    /// assert_eq!(deque.get(0), Some(&1));
    /// assert_eq!(deque.get(-1), Some(&9));
    /// assert_eq!(deque.get(-9), Some(&1));
    /// assert_eq!(deque.get(9), None);
    /// assert_eq!(deque.get(-10), None);
    /// ```
    #[must_use]
    pub fn get(&self, index: isize) -> Option<&T> {
        self.node_at(index).map(|node| &self.arena[node].value)
    }

    /// Returns a mutable reference to the element at `index`, if any.
    pub fn get_mut(&mut self, index: isize) -> Option<&mut T> {
        self.node_at(index)
            .map(move |node| &mut self.arena[node].value)
    }

    /// Returns the first element, if any.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.head.map(|node| &self.arena[node].value)
    }

    /// Returns the last element, if any.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tail.map(|node| &self.arena[node].value)
    }

    /// Returns a mutable reference to the first element, if any.
    pub fn first_mut(&mut self) -> Option<&mut T> {
        self.head.map(move |node| &mut self.arena[node].value)
    }

    /// Returns a mutable reference to the last element, if any.
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.tail.map(move |node| &mut self.arena[node].value)
    }

    /// Returns a handle to the node at `index`, if any.
    #[must_use]
    pub fn node(&self, index: isize) -> Option<NodeHandle> {
        self.node_at(index).map(|node| self.handle(node))
    }

    /// Returns a handle to the head node, if any.
    #[must_use]
    pub fn front_node(&self) -> Option<NodeHandle> {
        self.head.map(|node| self.handle(node))
    }

    /// Returns a handle to the tail node, if any.
    #[must_use]
    pub fn back_node(&self) -> Option<NodeHandle> {
        self.tail.map(|node| self.handle(node))
    }

    /// Returns a handle to the successor of `handle`'s node, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::ForeignNode`] if `handle` is not a live node of
    /// this deque.
    pub fn next_node(&self, handle: NodeHandle) -> Result<Option<NodeHandle>, DequeError> {
        let node = self.validate(handle)?;
        Ok(self.arena[node].succ.map(|succ| self.handle(succ)))
    }

    /// Returns a handle to the predecessor of `handle`'s node, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::ForeignNode`] if `handle` is not a live node of
    /// this deque.
    pub fn prev_node(&self, handle: NodeHandle) -> Result<Option<NodeHandle>, DequeError> {
        let node = self.validate(handle)?;
        Ok(self.arena[node].pred.map(|pred| self.handle(pred)))
    }

    /// Returns the value stored in `handle`'s node.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::ForeignNode`] if `handle` is not a live node of
    /// this deque.
    pub fn value(&self, handle: NodeHandle) -> Result<&T, DequeError> {
        let node = self.validate(handle)?;
        Ok(&self.arena[node].value)
    }

    /// Returns a mutable reference to the value stored in `handle`'s node.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::ForeignNode`] if `handle` is not a live node of
    /// this deque.
    pub fn value_mut(&mut self, handle: NodeHandle) -> Result<&mut T, DequeError> {
        let node = self.validate(handle)?;
        Ok(&mut self.arena[node].value)
    }

    /// Returns the current head-relative position of `handle`'s node.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::ForeignNode`] if `handle` is not a live node of
    /// this deque.
    pub fn position(&self, handle: NodeHandle) -> Result<usize, DequeError> {
        let node = self.validate(handle)?;
        let mut position = 0;
        let mut cursor = self.arena[node].pred;
        while let Some(pred) = cursor {
            position += 1;
            cursor = self.arena[pred].pred;
        }
        Ok(position)
    }

    /// Copies up to `count` elements starting at `start` into a new deque.
    ///
    /// Copying stops early, returning the partial result, when the chain ends
    /// before `count` elements were taken. Returns `None` when `start`
    /// resolves to no node, which is distinct from a valid start with
    /// `count == 0`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let deque = Deque::from_range(1..=9);
    /// assert_eq!(deque.slice(0, 3).unwrap().to_sequence(), vec![1, 2, 3]);
    /// assert_eq!(deque.slice(-2, 5).unwrap().to_sequence(), vec![8, 9]);
    /// assert!(deque.slice(2, 0).unwrap().is_empty());
    /// assert!(deque.slice(9, 1).is_none());
    /// ```
    #[must_use]
    pub fn slice(&self, start: isize, count: usize) -> Option<Self>
    where
        T: Clone,
    {
        self.node_at(start).map(|node| self.copy_run(node, count))
    }

    fn copy_run(&self, start: NodeIndex, count: usize) -> Self
    where
        T: Clone,
    {
        let mut cursor = Some(start);
        let mut copied = Self::new();
        while copied.len() < count {
            let Some(node) = cursor else {
                break;
            };
            copied.push(self.arena[node].value.clone());
            cursor = self.arena[node].succ;
        }
        copied
    }

    /// Copies the elements covered by `range` into a new deque.
    ///
    /// Negative bounds count from the tail, as with [`get`](Self::get). The
    /// start must resolve to a node (`None` otherwise); an excluded start is
    /// resolved first and then stepped past. An end past the tail is clamped
    /// and an end before the start yields an empty deque.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let deque = Deque::from_range(1..=9);
    /// assert_eq!(deque.range(3..=5).unwrap().to_sequence(), vec![4, 5, 6]);
    /// assert_eq!(deque.range(-3..).unwrap().to_sequence(), vec![7, 8, 9]);
    /// assert_eq!(deque.range(-3..-1).unwrap().to_sequence(), vec![7, 8]);
    /// assert!(deque.range(20..).is_none());
    /// ```
    #[must_use]
    pub fn range<R>(&self, range: R) -> Option<Self>
    where
        R: RangeBounds<isize>,
        T: Clone,
    {
        let len = isize::try_from(self.size).ok()?;
        let absolute = |bound: isize| if bound < 0 { len + bound } else { bound };
        let start = match range.start_bound() {
            Bound::Included(&start) => absolute(start),
            Bound::Excluded(&start) => absolute(start).checked_add(1)?,
            Bound::Unbounded => 0,
        };
        let position = usize::try_from(start).ok()?;
        let node = self.node_at_position(position)?;
        let end = match range.end_bound() {
            Bound::Included(&end) => absolute(end).saturating_add(1),
            Bound::Excluded(&end) => absolute(end),
            Bound::Unbounded => len,
        };
        let count = usize::try_from(end.saturating_sub(start)).unwrap_or(0);
        Some(self.copy_run(node, count))
    }

    /// Copies the elements at each of `indices`, `None` for each index that
    /// resolves to no node.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let deque = Deque::from_range(0..=9);
    /// let picked = deque.values_at(&[1, 3, 5, 42]);
    /// assert_eq!(picked.to_sequence(), vec![Some(1), Some(3), Some(5), None]);
    /// ```
    #[must_use]
    pub fn values_at(&self, indices: &[isize]) -> Deque<Option<T>>
    where
        T: Clone,
    {
        indices
            .iter()
            .map(|&index| self.get(index).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn digits() -> Deque<i32> {
        Deque::from_range(0..=9)
    }

    #[rstest]
    #[case(0, Some(0))]
    #[case(4, Some(4))]
    #[case(5, Some(5))]
    #[case(9, Some(9))]
    #[case(10, None)]
    #[case(-1, Some(9))]
    #[case(-5, Some(5))]
    #[case(-6, Some(4))]
    #[case(-10, Some(0))]
    #[case(-11, None)]
    fn test_get(#[case] index: isize, #[case] expected: Option<i32>) {
        assert_eq!(digits().get(index).copied(), expected);
    }

    #[rstest]
    fn test_get_on_empty() {
        let deque: Deque<i32> = Deque::new();
        assert_eq!(deque.get(0), None);
        assert_eq!(deque.get(-1), None);
    }

    #[rstest]
    fn test_get_on_singleton() {
        let deque = Deque::from([42]);
        assert_eq!(deque.get(0), Some(&42));
        assert_eq!(deque.get(-1), Some(&42));
        assert_eq!(deque.get(1), None);
        assert_eq!(deque.get(-2), None);
    }

    #[rstest]
    fn test_get_mut_writes_through() {
        let mut deque = digits();
        if let Some(element) = deque.get_mut(-2) {
            *element = 80;
        }
        assert_eq!(deque.get(8), Some(&80));
    }

    #[rstest]
    fn test_first_and_last_mut() {
        let mut deque = Deque::from([1, 2, 3]);
        *deque.first_mut().unwrap() = 10;
        *deque.last_mut().unwrap() = 30;
        assert_eq!(deque.to_sequence(), vec![10, 2, 30]);
    }

    #[rstest]
    fn test_handle_navigation() {
        let deque = Deque::from(['a', 'b', 'c']);
        let front = deque.front_node().unwrap();
        let middle = deque.next_node(front).unwrap().unwrap();
        assert_eq!(deque.value(middle), Ok(&'b'));
        assert_eq!(deque.prev_node(middle), Ok(Some(front)));
        assert_eq!(deque.prev_node(front), Ok(None));
        assert_eq!(deque.next_node(deque.back_node().unwrap()), Ok(None));
        assert_eq!(deque.node(1), Some(middle));
        assert_eq!(deque.position(middle), Ok(1));
    }

    #[rstest]
    fn test_value_mut_through_handle() {
        let mut deque = Deque::from([1, 2, 3]);
        let handle = deque.node(-1).unwrap();
        *deque.value_mut(handle).unwrap() = 99;
        assert_eq!(deque.last(), Some(&99));
    }

    #[rstest]
    fn test_slice_stops_at_tail() {
        let slice = digits().slice(7, 10).unwrap();
        assert_eq!(slice.to_sequence(), vec![7, 8, 9]);
    }

    #[rstest]
    fn test_slice_absent_start_differs_from_empty() {
        let deque = digits();
        assert!(deque.slice(10, 0).is_none());
        assert_eq!(deque.slice(9, 0).map(|slice| slice.len()), Some(0));
    }

    #[rstest]
    fn test_slice_is_independent() {
        let deque = digits();
        let mut slice = deque.slice(0, 2).unwrap();
        slice.push(100);
        assert_eq!(deque.len(), 10);
        assert_eq!(slice.to_sequence(), vec![0, 1, 100]);
    }

    #[rstest]
    #[case(2..5, Some(vec![2, 3, 4]))]
    #[case(-3..5, Some(vec![]))]
    #[case(8..100, Some(vec![8, 9]))]
    #[case(0..0, Some(vec![]))]
    #[case(10..12, None)]
    fn test_range(#[case] range: std::ops::Range<isize>, #[case] expected: Option<Vec<i32>>) {
        let sliced = digits().range(range).map(|slice| slice.to_sequence());
        assert_eq!(sliced, expected);
    }

    #[rstest]
    fn test_range_inclusive_and_unbounded() {
        let deque = digits();
        assert_eq!(deque.range(..=2).unwrap().to_sequence(), vec![0, 1, 2]);
        assert_eq!(deque.range(-3..=-1).unwrap().to_sequence(), vec![7, 8, 9]);
        assert_eq!(deque.range(..).unwrap(), deque);
    }

    #[rstest]
    #[case(isize::MIN..isize::MAX)]
    #[case(-11..10)]
    #[case(10..isize::MAX)]
    fn test_range_unresolved_start(#[case] range: std::ops::Range<isize>) {
        assert_eq!(digits().range(range), None);
    }

    #[rstest]
    fn test_range_extreme_bounds() {
        let deque = digits();
        assert_eq!(deque.range(isize::MIN..), None);
        assert_eq!(deque.range(-11..=isize::MAX), None);
        assert_eq!(deque.range(-10..=isize::MAX), Some(digits()));
        assert_eq!(deque.range(3..isize::MIN).map(|slice| slice.len()), Some(0));
        assert_eq!(
            deque.range(-1..=isize::MIN).map(|slice| slice.len()),
            Some(0)
        );
    }

    #[rstest]
    #[case(Bound::Excluded(-1), Bound::Unbounded, None)]
    #[case(Bound::Excluded(9), Bound::Unbounded, None)]
    #[case(Bound::Excluded(-3), Bound::Unbounded, Some(vec![8, 9]))]
    #[case(Bound::Excluded(-11), Bound::Excluded(2), Some(vec![0, 1]))]
    #[case(Bound::Excluded(2), Bound::Included(4), Some(vec![3, 4]))]
    #[case(Bound::Excluded(isize::MAX), Bound::Unbounded, None)]
    fn test_range_excluded_start(
        #[case] start: Bound<isize>,
        #[case] end: Bound<isize>,
        #[case] expected: Option<Vec<i32>>,
    ) {
        let sliced = digits()
            .range((start, end))
            .map(|slice| slice.to_sequence());
        assert_eq!(sliced, expected);
    }

    #[rstest]
    fn test_range_on_empty() {
        let deque: Deque<i32> = Deque::new();
        assert_eq!(deque.range(..), None);
        assert_eq!(deque.range(-1..), None);
    }

    #[rstest]
    fn test_values_at_matches_scenario() {
        let picked = digits().values_at(&[1, 3, 5]);
        assert_eq!(picked, Deque::from([Some(1), Some(3), Some(5)]));
    }

    #[rstest]
    fn test_values_at_negative() {
        let picked = digits().values_at(&[-1, -10, -11]);
        assert_eq!(picked.to_sequence(), vec![Some(9), Some(0), None]);
    }
}
