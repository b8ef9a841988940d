//! Algorithms built on the traversal and mutation primitives: search, set
//! algebra, reduction and structural transforms.
//!
//! Everything here walks the chain iteratively. Operations returning a deque
//! build a fresh one; the `_in_place` forms relink `self`.

use std::hash::Hash;
use std::iter::Sum;

use super::{Deque, HashSet};

// =============================================================================
// Search
// =============================================================================

impl<T> Deque<T> {
    /// Returns the position of the first element equal to `element`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let deque = Deque::from(['a', 'b', 'a']);
    /// assert_eq!(deque.index(&'a'), Some(0));
    /// assert_eq!(deque.rindex(&'a'), Some(2));
    /// assert_eq!(deque.index(&'z'), None);
    /// ```
    #[must_use]
    pub fn index(&self, element: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.index_by(|candidate| candidate == element)
    }

    /// Returns the position of the first element matching `predicate`.
    pub fn index_by<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().position(predicate)
    }

    /// Returns the position of the last element equal to `element`.
    #[must_use]
    pub fn rindex(&self, element: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.rindex_by(|candidate| candidate == element)
    }

    /// Returns the position of the last element matching `predicate`,
    /// scanning backward from the tail.
    pub fn rindex_by<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().rposition(predicate)
    }

    /// Returns the positions of every element equal to `element`, in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let deque = Deque::from([1, 2, 1, 3, 1]);
    /// assert_eq!(deque.find_all(&1).to_sequence(), vec![0, 2, 4]);
    /// assert!(deque.find_all(&9).is_empty());
    /// ```
    #[must_use]
    pub fn find_all(&self, element: &T) -> Deque<usize>
    where
        T: PartialEq,
    {
        self.find_all_by(|candidate| candidate == element)
    }

    /// Returns the positions of every element matching `predicate`, in order.
    pub fn find_all_by<P>(&self, mut predicate: P) -> Deque<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter()
            .enumerate()
            .filter(|(_, element)| predicate(element))
            .map(|(position, _)| position)
            .collect()
    }

    /// Returns `true` if some element equals `element`.
    #[must_use]
    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.index(element).is_some()
    }
}

// =============================================================================
// Predicates and reduction
// =============================================================================

impl<T> Deque<T> {
    /// Returns `true` if every element matches `predicate` (vacuously for an
    /// empty deque).
    pub fn all<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().all(predicate)
    }

    /// Returns `true` if every element matches `predicate`, which also receives
    /// the element's position.
    pub fn all_with_index<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T, usize) -> bool,
    {
        self.iter()
            .enumerate()
            .all(|(position, element)| predicate(element, position))
    }

    /// Returns `true` if some element matches `predicate`.
    pub fn any<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().any(predicate)
    }

    /// Returns `true` if some element matches `predicate`, which also receives
    /// the element's position.
    pub fn any_with_index<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T, usize) -> bool,
    {
        self.iter()
            .enumerate()
            .any(|(position, element)| predicate(element, position))
    }

    /// Counts the elements matching `predicate`.
    pub fn count_by<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().filter(|element| predicate(element)).count()
    }

    /// Folds the elements head to tail, seeded with `initial`.
    pub fn fold<B, F>(&self, initial: B, function: F) -> B
    where
        F: FnMut(B, &T) -> B,
    {
        self.iter().fold(initial, function)
    }

    /// Folds the elements head to tail, seeded with the head element.
    ///
    /// Returns `None` for an empty deque and the head itself for a singleton.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let deque = Deque::from_range(1..=4);
    /// assert_eq!(deque.reduce(|product, element| product * element), Some(24));
    /// assert_eq!(Deque::<i32>::new().reduce(|a, b| a + b), None);
    /// ```
    pub fn reduce<F>(&self, function: F) -> Option<T>
    where
        T: Clone,
        F: FnMut(T, &T) -> T,
    {
        let mut iter = self.iter();
        let first = iter.next()?.clone();
        Some(iter.fold(first, function))
    }

    /// Sums the elements.
    pub fn sum<'a, S>(&'a self) -> S
    where
        S: Sum<&'a T>,
    {
        self.iter().sum()
    }

    /// Returns the smallest element, the first one among equals.
    #[must_use]
    pub fn min(&self) -> Option<&T>
    where
        T: Ord,
    {
        self.iter()
            .reduce(|best, element| if element < best { element } else { best })
    }

    /// Returns the largest element, the last one among equals.
    #[must_use]
    pub fn max(&self) -> Option<&T>
    where
        T: Ord,
    {
        self.iter().max()
    }

    /// Returns the element with the smallest key.
    pub fn min_by_key<K, F>(&self, key: F) -> Option<&T>
    where
        K: Ord,
        F: FnMut(&&T) -> K,
    {
        self.iter().min_by_key(key)
    }

    /// Returns the element with the largest key.
    pub fn max_by_key<K, F>(&self, key: F) -> Option<&T>
    where
        K: Ord,
        F: FnMut(&&T) -> K,
    {
        self.iter().max_by_key(key)
    }
}

// =============================================================================
// Projection and filtering
// =============================================================================

impl<T> Deque<T> {
    /// Returns a deque of `function` applied to every element.
    pub fn map<U, F>(&self, function: F) -> Deque<U>
    where
        F: FnMut(&T) -> U,
    {
        self.iter().map(function).collect()
    }

    /// Returns a deque of `function` applied to every element and its position.
    pub fn map_with_index<U, F>(&self, mut function: F) -> Deque<U>
    where
        F: FnMut(&T, usize) -> U,
    {
        self.iter()
            .enumerate()
            .map(|(position, element)| function(element, position))
            .collect()
    }

    /// Returns a deque of copies of the elements matching `predicate`.
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        T: Clone,
        P: FnMut(&T) -> bool,
    {
        self.iter()
            .filter(|element| predicate(element))
            .cloned()
            .collect()
    }

    /// Returns a deque of copies of the elements matching `predicate`, which
    /// also receives each element's position.
    pub fn filter_with_index<P>(&self, mut predicate: P) -> Self
    where
        T: Clone,
        P: FnMut(&T, usize) -> bool,
    {
        self.iter()
            .enumerate()
            .filter(|&(position, element)| predicate(element, position))
            .map(|(_, element)| element.clone())
            .collect()
    }

    /// Returns a copy with the elements in reverse order.
    #[must_use]
    pub fn reverse(&self) -> Self
    where
        T: Clone,
    {
        let mut reversed = Self::with_capacity(self.size);
        for element in self {
            reversed.unshift(element.clone());
        }
        reversed
    }
}

// =============================================================================
// Set algebra
// =============================================================================

/// Hashed set algebra, linear in the total input size. Element types with
/// only `PartialEq` (floats, for one) use the `_by` forms further down.
impl<T: Clone + Eq + Hash> Deque<T> {
    /// Returns the first occurrence of each distinct element, in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let deque = Deque::from([3, 1, 3, 2, 1]);
    /// assert_eq!(deque.uniq().to_sequence(), vec![3, 1, 2]);
    /// ```
    #[must_use]
    pub fn uniq(&self) -> Self {
        let mut seen = HashSet::default();
        self.iter()
            .filter(|element| seen.insert(*element))
            .cloned()
            .collect()
    }

    /// Removes every occurrence of a value after its first one.
    ///
    /// Values occurring once stay where they are, and surviving nodes keep
    /// their handles.
    pub fn uniq_in_place(&mut self) -> &mut Self {
        let duplicates: Vec<_> = {
            let mut seen = HashSet::default();
            self.node_indices()
                .filter(|&node| !seen.insert(&self.arena[node].value))
                .collect()
        };
        for node in duplicates {
            self.unlink(node);
        }
        self
    }

    /// Returns the distinct elements of `self` and all of `others`, in
    /// first-seen order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let left = Deque::from(['a', 'b', 'a']);
    /// let right = Deque::from(['c', 'b']);
    /// let tail = Deque::from(['d']);
    /// assert_eq!(left.union(&[&right, &tail]).describe(), "(a <> b <> c <> d)");
    /// ```
    #[must_use]
    pub fn union(&self, others: &[&Self]) -> Self {
        let mut seen = HashSet::default();
        std::iter::once(self)
            .chain(others.iter().copied())
            .flat_map(Self::iter)
            .filter(|element| seen.insert(*element))
            .cloned()
            .collect()
    }

    /// Returns the elements of `self`, duplicates included, that occur in none
    /// of `others`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let deque = Deque::from([1, 1, 2, 3, 4]);
    /// let removed = Deque::from([2, 4]);
    /// assert_eq!(deque.difference(&[&removed]).to_sequence(), vec![1, 1, 3]);
    /// ```
    #[must_use]
    pub fn difference(&self, others: &[&Self]) -> Self {
        let excluded: HashSet<&T> = others.iter().flat_map(|other| other.iter()).collect();
        self.filter(|element| !excluded.contains(element))
    }

    /// Returns the distinct elements of `self` that also occur in `other`, in
    /// the order of `self`.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let present: HashSet<&T> = other.iter().collect();
        let mut seen = HashSet::default();
        self.iter()
            .filter(|element| present.contains(element) && seen.insert(*element))
            .cloned()
            .collect()
    }
}

/// Set algebra under a caller-supplied equality, for element types that cannot
/// be hashed. Each form is quadratic in the input size.
impl<T: Clone> Deque<T> {
    /// Returns the first occurrence of each element, where `same` decides
    /// whether two elements count as equal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let readings = Deque::from([1.5, 0.5, 1.5, 2.0, 0.5]);
    /// assert_eq!(readings.uniq_by(PartialEq::eq).to_sequence(), vec![1.5, 0.5, 2.0]);
    /// ```
    #[must_use]
    pub fn uniq_by<F>(&self, same: F) -> Self
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.union_by(&[], same)
    }

    /// Returns the distinct elements of `self` and all of `others` under
    /// `same`, in first-seen order.
    #[must_use]
    pub fn union_by<F>(&self, others: &[&Self], mut same: F) -> Self
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut distinct = Self::new();
        for element in std::iter::once(self)
            .chain(others.iter().copied())
            .flat_map(Self::iter)
        {
            if !distinct.any(|kept| same(kept, element)) {
                distinct.push(element.clone());
            }
        }
        distinct
    }

    /// Returns the elements of `self`, duplicates included, that are `same`
    /// as no element of `others`.
    #[must_use]
    pub fn difference_by<F>(&self, others: &[&Self], mut same: F) -> Self
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.filter(|element| {
            !others
                .iter()
                .any(|other| other.any(|excluded| same(element, excluded)))
        })
    }

    /// Returns the distinct elements of `self` that are `same` as some element
    /// of `other`, in the order of `self`.
    #[must_use]
    pub fn intersection_by<F>(&self, other: &Self, mut same: F) -> Self
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut common = Self::new();
        for element in self {
            if other.any(|present| same(element, present))
                && !common.any(|kept| same(kept, element))
            {
                common.push(element.clone());
            }
        }
        common
    }
}

// =============================================================================
// Cartesian product
// =============================================================================

impl<T: Clone> Deque<T> {
    /// Returns every tuple taking one element from `self` and from each of
    /// `others`, with `self` varying slowest and the last argument fastest.
    ///
    /// An empty factor yields an empty product; no factors besides `self`
    /// yields one single-element tuple per element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let digits = Deque::from([1, 2]);
    /// let more = Deque::from([3, 4]);
    /// let product = digits.cartesian_product(&[&more]);
    /// assert_eq!(product.describe(), "((1 <> 3) <> (1 <> 4) <> (2 <> 3) <> (2 <> 4))");
    /// ```
    #[must_use]
    pub fn cartesian_product(&self, others: &[&Self]) -> Deque<Self> {
        let mut tuples: Deque<Self> = Deque::from([Self::new()]);
        for factor in std::iter::once(self).chain(others.iter().copied()) {
            let mut extended = Deque::with_capacity(tuples.len() * factor.len());
            for prefix in &tuples {
                for element in factor {
                    let mut tuple = prefix.clone();
                    tuple.push(element.clone());
                    extended.push(tuple);
                }
            }
            tuples = extended;
        }
        tuples
    }

    /// Returns every pair taking one element from `self` and one from `other`,
    /// with `self` varying slowest.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let numbers = Deque::from([1, 2]);
    /// let letters = Deque::from(['a', 'b']);
    /// assert_eq!(
    ///     numbers.product(&letters).to_sequence(),
    ///     vec![(1, 'a'), (1, 'b'), (2, 'a'), (2, 'b')]
    /// );
    /// ```
    #[must_use]
    pub fn product<U: Clone>(&self, other: &Deque<U>) -> Deque<(T, U)> {
        let mut pairs = Deque::with_capacity(self.len() * other.len());
        for left in self {
            for right in other {
                pairs.push((left.clone(), right.clone()));
            }
        }
        pairs
    }
}
