//! Stable merge sort over linked runs.
//!
//! The chain is bisected at its structural midpoint into two runs of nodes,
//! each run is sorted recursively and the two sorted runs are merged by
//! repeatedly taking the smaller head node. Ties take from the left run, which
//! keeps the sort stable. Recursion depth is bounded by `log2(n)`.
//!
//! Runs are chains of nodes inside the deque's own arena, so values never leave
//! their slots while the comparator runs. Sorting in place relinks the nodes:
//! handles keep following their values. If the comparator unwinds, every node
//! is threaded back into one chain in slot order and no element is lost.
//!
//! The fallible variants always sort a copy, so a comparison failure leaves the
//! original deque untouched.

use std::cmp::Ordering;
use std::convert::Infallible;

use super::Deque;
use super::node::{Arena, NodeIndex};
use crate::error::DequeError;

/// Rethreads the chain in slot order unless the sort ran to completion.
struct Rethread<'a, T> {
    deque: &'a mut Deque<T>,
    complete: bool,
}

impl<T> Drop for Rethread<'_, T> {
    fn drop(&mut self) {
        if !self.complete {
            let live: Vec<NodeIndex> = self.deque.arena.live_indices().collect();
            for pair in live.windows(2) {
                self.deque.arena[pair[0]].succ = Some(pair[1]);
            }
            if let Some(&last) = live.last() {
                self.deque.arena[last].succ = None;
            }
            self.deque.thread_from(live.first().copied());
        }
    }
}

impl<T> Deque<T> {
    /// Rebuilds the `pred` links, head and tail from a `succ` chain.
    fn thread_from(&mut self, head: Option<NodeIndex>) {
        self.head = head;
        let mut pred = None;
        let mut cursor = head;
        while let Some(node) = cursor {
            self.arena[node].pred = pred;
            pred = Some(node);
            cursor = self.arena[node].succ;
        }
        self.tail = pred;
    }
}

fn sort_run<T, E, F>(
    arena: &mut Arena<T>,
    head: Option<NodeIndex>,
    len: usize,
    compare: &mut F,
) -> Result<Option<NodeIndex>, E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let Some(mut cut) = head else {
        return Ok(None);
    };
    if len <= 1 {
        return Ok(head);
    }
    let half = len / 2;
    for _ in 1..half {
        if let Some(next) = arena[cut].succ {
            cut = next;
        }
    }
    let right = arena[cut].succ.take();
    let left = sort_run(arena, head, half, compare)?;
    let right = sort_run(arena, right, len - half, compare)?;
    merge_runs(arena, left, right, compare)
}

fn merge_runs<T, E, F>(
    arena: &mut Arena<T>,
    mut left: Option<NodeIndex>,
    mut right: Option<NodeIndex>,
    compare: &mut F,
) -> Result<Option<NodeIndex>, E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let mut head = None;
    let mut last: Option<NodeIndex> = None;
    while let (Some(left_head), Some(right_head)) = (left, right) {
        let taken = if compare(&arena[left_head].value, &arena[right_head].value)?
            == Ordering::Greater
        {
            right = arena[right_head].succ;
            right_head
        } else {
            left = arena[left_head].succ;
            left_head
        };
        match last {
            Some(pred) => arena[pred].succ = Some(taken),
            None => head = Some(taken),
        }
        last = Some(taken);
    }
    let rest = left.or(right);
    match last {
        Some(pred) => arena[pred].succ = rest,
        None => head = rest,
    }
    Ok(head)
}

fn merge_sort<T, E, F>(deque: &mut Deque<T>, compare: &mut F) -> Result<(), E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    if deque.size <= 1 {
        return Ok(());
    }
    let mut guard = Rethread {
        deque,
        complete: false,
    };
    let (head, len) = (guard.deque.head, guard.deque.size);
    let head = sort_run(&mut guard.deque.arena, head, len, compare)?;
    guard.deque.thread_from(head);
    guard.complete = true;
    Ok(())
}

fn infallible<T, F>(deque: &mut Deque<T>, mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    log::trace!("merge sort over {} elements", deque.len());
    let sorted: Result<(), Infallible> =
        merge_sort(deque, &mut |left: &T, right: &T| Ok(compare(left, right)));
    match sorted {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

fn partial<T, F>(mut deque: Deque<T>, mut compare: F) -> Result<Deque<T>, DequeError>
where
    F: FnMut(&T, &T) -> Option<Ordering>,
{
    log::trace!("fallible merge sort over {} elements", deque.len());
    merge_sort(&mut deque, &mut |left: &T, right: &T| {
        compare(left, right).ok_or(DequeError::Incomparable)
    })?;
    Ok(deque)
}

impl<T> Deque<T> {
    /// Sorts the deque in place by the elements' natural order.
    ///
    /// Nodes are relinked rather than reallocated, so node handles stay valid
    /// and keep following their values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let mut deque = Deque::from([9, 8, 7, 6, 5, 4, 3, 2, 1]);
    /// deque.sort();
    /// assert_eq!(deque, Deque::from_range(1..=9));
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp);
    }

    /// Sorts the deque in place with a comparator.
    ///
    /// If `compare` panics, the deque keeps every element, in an unspecified
    /// order.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        infallible(self, compare);
    }

    /// Sorts the deque in place by a key extracted from each element.
    pub fn sort_by_key<K, F>(&mut self, mut key: F)
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.sort_by(|left, right| key(left).cmp(&key(right)));
    }

    /// Returns a sorted copy, leaving `self` untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let deque = Deque::from([3, 1, 2]);
    /// assert_eq!(deque.sorted().to_sequence(), vec![1, 2, 3]);
    /// assert_eq!(deque.to_sequence(), vec![3, 1, 2]);
    /// ```
    #[must_use]
    pub fn sorted(&self) -> Self
    where
        T: Ord + Clone,
    {
        self.sorted_by(T::cmp)
    }

    /// Returns a copy sorted with a comparator.
    #[must_use]
    pub fn sorted_by<F>(&self, compare: F) -> Self
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut sorted = self.clone();
        infallible(&mut sorted, compare);
        sorted
    }

    /// Returns a copy sorted by a key extracted from each element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let words = Deque::from(["pear", "fig", "apple"]);
    /// let by_length = words.sorted_by_key(|word| word.len());
    /// assert_eq!(by_length.to_sequence(), vec!["fig", "pear", "apple"]);
    /// ```
    #[must_use]
    pub fn sorted_by_key<K, F>(&self, mut key: F) -> Self
    where
        T: Clone,
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.sorted_by(|left, right| key(left).cmp(&key(right)))
    }

    /// Returns a copy sorted by the elements' partial order.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Incomparable`] if two elements compared during the
    /// sort have no defined order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::{Deque, DequeError};
    ///
    /// let readings = Deque::from([2.5, 0.5, 1.5]);
    /// assert_eq!(readings.try_sorted().unwrap().to_sequence(), vec![0.5, 1.5, 2.5]);
    ///
    /// let broken = Deque::from([1.0, f64::NAN]);
    /// assert_eq!(broken.try_sorted(), Err(DequeError::Incomparable));
    /// ```
    pub fn try_sorted(&self) -> Result<Self, DequeError>
    where
        T: PartialOrd + Clone,
    {
        self.try_sorted_by(T::partial_cmp)
    }

    /// Returns a copy sorted with a partial comparator.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Incomparable`] if `compare` returns `None`.
    pub fn try_sorted_by<F>(&self, compare: F) -> Result<Self, DequeError>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Option<Ordering>,
    {
        partial(self.clone(), compare)
    }

    /// Sorts the deque in place by the elements' partial order.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Incomparable`] if two elements have no defined
    /// order; the deque is left as it was.
    pub fn try_sort(&mut self) -> Result<(), DequeError>
    where
        T: PartialOrd + Clone,
    {
        self.try_sort_by(T::partial_cmp)
    }

    /// Sorts the deque in place with a partial comparator.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Incomparable`] if `compare` returns `None`; the
    /// deque is left as it was.
    pub fn try_sort_by<F>(&mut self, compare: F) -> Result<(), DequeError>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Option<Ordering>,
    {
        *self = self.try_sorted_by(compare)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deque::assert_consistent;
    use rstest::rstest;

    #[rstest]
    #[case(vec![])]
    #[case(vec![1])]
    #[case(vec![2, 1])]
    #[case(vec![9, 8, 7, 6, 5, 4, 3, 2, 1])]
    #[case(vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5])]
    #[case(vec![1, 2, 3, 4])]
    fn test_sorted(#[case] values: Vec<i32>) {
        let deque = Deque::from(values.clone());
        let sorted = deque.sorted();
        let mut expected = values.clone();
        expected.sort_unstable();
        assert_eq!(sorted.to_sequence(), expected);
        assert_eq!(deque.to_sequence(), values);
        assert_consistent(&sorted);
    }

    #[rstest]
    fn test_sort_in_place() {
        let mut deque = Deque::from([9, 8, 7, 6, 5, 4, 3, 2, 1]);
        deque.sort();
        assert_eq!(deque.to_sequence(), (1..=9).collect::<Vec<_>>());
        assert_consistent(&deque);
    }

    #[rstest]
    fn test_sort_by_descending() {
        let mut deque = Deque::from_range(1..=5);
        deque.sort_by(|left, right| right.cmp(left));
        assert_eq!(deque.to_sequence(), vec![5, 4, 3, 2, 1]);
    }

    #[rstest]
    fn test_sort_is_stable() {
        let deque = Deque::from([(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (0, 'e'), (2, 'f')]);
        let sorted = deque.sorted_by_key(|&(key, _)| key);
        assert_eq!(
            sorted.to_sequence(),
            vec![(0, 'e'), (1, 'b'), (1, 'd'), (2, 'a'), (2, 'c'), (2, 'f')]
        );
    }

    #[rstest]
    fn test_sort_by_key_in_place() {
        let mut deque = Deque::from(["ccc", "a", "bb"]);
        deque.sort_by_key(|word| word.len());
        assert_eq!(deque.describe(), "(a <> bb <> ccc)");
    }

    #[rstest]
    fn test_sort_keeps_handles() {
        let mut deque = Deque::from([3, 1, 2]);
        let handle = deque.front_node().unwrap();
        deque.sort();
        assert_eq!(deque.value(handle), Ok(&3));
        assert_eq!(deque.position(handle), Ok(2));
        assert_eq!(deque.back_node(), Some(handle));
    }

    #[rstest]
    fn test_sort_by_panicking_comparator_keeps_elements() {
        let mut deque = Deque::from([3.0, f64::NAN, 1.0, 2.0]);
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            deque.sort_by(|left, right| left.partial_cmp(right).expect("comparable"));
        }));
        assert!(outcome.is_err());
        assert_eq!(deque.len(), 4);
        assert_consistent(&deque);
        let mut kept = deque.to_sequence();
        assert_eq!(kept.iter().filter(|value| value.is_nan()).count(), 1);
        kept.retain(|value| !value.is_nan());
        kept.sort_by(f64::total_cmp);
        assert_eq!(kept, vec![1.0, 2.0, 3.0]);
    }

    #[rstest]
    fn test_sort_after_removals_reuses_slots() {
        let mut deque = Deque::from_range(0..8);
        deque.delete(&3);
        deque.delete(&6);
        deque.unshift(42).push(-1);
        deque.sort();
        assert_eq!(deque.to_sequence(), vec![-1, 0, 1, 2, 4, 5, 7, 42]);
        assert_consistent(&deque);
    }

    #[rstest]
    fn test_try_sort_failure_leaves_deque_untouched() {
        let mut deque = Deque::from([3.0, f64::NAN, 1.0, 2.0]);
        assert_eq!(deque.try_sort(), Err(DequeError::Incomparable));
        assert_eq!(deque.len(), 4);
        assert_eq!(deque.first(), Some(&3.0));
        assert!(deque.get(1).is_some_and(|value| value.is_nan()));
        assert_eq!(deque.last(), Some(&2.0));
        assert_consistent(&deque);
    }

    #[rstest]
    fn test_try_sort_success() {
        let mut deque = Deque::from([0.5, -1.0, 0.25]);
        deque.try_sort().unwrap();
        assert_eq!(deque.to_sequence(), vec![-1.0, 0.25, 0.5]);
    }

    #[rstest]
    fn test_try_sorted_by_custom_comparator() {
        let deque = Deque::from([3, 1, 2]);
        let sorted = deque
            .try_sorted_by(|left, right| Some(right.cmp(left)))
            .unwrap();
        assert_eq!(sorted.to_sequence(), vec![3, 2, 1]);
        assert_eq!(
            deque.try_sorted_by(|_, _| None),
            Err(DequeError::Incomparable)
        );
    }

    #[rstest]
    fn test_sorting_sorted_is_idempotent() {
        let sorted = Deque::from([5, 3, 8, 1]).sorted();
        assert_eq!(sorted.sorted(), sorted);
    }
}
