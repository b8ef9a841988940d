//! Operations on deques of deques: one-level flattening, matrix transposition
//! and conversion of pair rows into a map.

use std::hash::Hash;

use super::{Deque, HashMap, Iter};
use crate::error::DequeError;

impl<T> Deque<Deque<T>> {
    /// Concatenates the inner deques into one, copying their elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let rows = Deque::from([Deque::from([1, 2]), Deque::new(), Deque::from([3])]);
    /// assert_eq!(rows.flatten().to_sequence(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn flatten(&self) -> Deque<T>
    where
        T: Clone,
    {
        self.iter().flat_map(Deque::iter).cloned().collect()
    }

    /// Concatenates the inner deques into one, consuming them.
    #[must_use]
    pub fn into_flat(self) -> Deque<T> {
        self.into_iter().flatten().collect()
    }

    /// Returns the transpose of a deque of equal-length rows.
    ///
    /// An empty deque, or one whose rows are all empty, transposes to an empty
    /// deque.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::RowLengthMismatch`] naming the first row whose
    /// length differs from that of the first row.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::{Deque, DequeError};
    ///
    /// let rows = Deque::from([Deque::from([1, 2, 3]), Deque::from([4, 5, 6])]);
    /// assert_eq!(rows.transpose().unwrap().describe(), "((1 <> 4) <> (2 <> 5) <> (3 <> 6))");
    ///
    /// let ragged = Deque::from([Deque::from([1, 2]), Deque::from([3])]);
    /// assert_eq!(
    ///     ragged.transpose(),
    ///     Err(DequeError::RowLengthMismatch { row: 1, expected: 2, actual: 1 })
    /// );
    /// ```
    pub fn transpose(&self) -> Result<Self, DequeError>
    where
        T: Clone,
    {
        let width = self.first().map_or(0, Deque::len);
        if let Some((row, actual)) = self
            .iter()
            .map(Deque::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(DequeError::RowLengthMismatch {
                row,
                expected: width,
                actual,
            });
        }
        log::trace!("transposing {} rows of width {width}", self.len());

        let mut cursors: Deque<Iter<'_, T>> = self.iter().map(Deque::iter).collect();
        let mut columns = Self::with_capacity(width);
        for _ in 0..width {
            let mut column = Deque::with_capacity(self.len());
            cursors.for_each_mut(|cursor| {
                if let Some(element) = cursor.next() {
                    column.push(element.clone());
                }
            });
            columns.push(column);
        }
        Ok(columns)
    }

    /// Converts a deque of two-element rows into a map from each row's first
    /// element to its second. Later rows overwrite earlier ones with an equal
    /// key.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::PairLength`] for the first row whose length is not
    /// two.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// let pairs = Deque::from([Deque::from(["a", "1"]), Deque::from(["b", "2"])]);
    /// let map = pairs.to_map().unwrap();
    /// assert_eq!(map.get("a"), Some(&"1"));
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn to_map(&self) -> Result<HashMap<T, T>, DequeError>
    where
        T: Clone + Eq + Hash,
    {
        let mut map = HashMap::default();
        map.reserve(self.len());
        for (index, row) in self.iter().enumerate() {
            match (row.len(), row.first(), row.last()) {
                (2, Some(key), Some(value)) => {
                    map.insert(key.clone(), value.clone());
                }
                (len, _, _) => return Err(DequeError::PairLength { index, len }),
            }
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deque::assert_consistent;
    use rstest::rstest;

    fn matrix(rows: &[&[i32]]) -> Deque<Deque<i32>> {
        rows.iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }

    #[rstest]
    fn test_flatten_one_level() {
        let rows = matrix(&[&[1], &[], &[2, 3]]);
        assert_eq!(rows.flatten().to_sequence(), vec![1, 2, 3]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.into_flat().to_sequence(), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_transpose_rectangular() {
        let columns = matrix(&[&[1, 2, 3], &[4, 5, 6]]).transpose().unwrap();
        assert_eq!(columns, matrix(&[&[1, 4], &[2, 5], &[3, 6]]));
        columns.iter().for_each(assert_consistent);
        assert_consistent(&columns);
    }

    #[rstest]
    fn test_transpose_twice_restores() {
        let rows = matrix(&[&[1, 2], &[3, 4], &[5, 6]]);
        assert_eq!(rows.transpose().unwrap().transpose().unwrap(), rows);
    }

    #[rstest]
    #[case(matrix(&[]))]
    #[case(matrix(&[&[], &[]]))]
    fn test_transpose_degenerate(#[case] rows: Deque<Deque<i32>>) {
        assert!(rows.transpose().unwrap().is_empty());
    }

    #[rstest]
    #[case(matrix(&[&[1, 2, 3], &[4, 5]]), 1, 3, 2)]
    #[case(matrix(&[&[1], &[2], &[3, 4]]), 2, 1, 2)]
    #[case(matrix(&[&[], &[1]]), 1, 0, 1)]
    fn test_transpose_rejects_ragged_rows(
        #[case] rows: Deque<Deque<i32>>,
        #[case] row: usize,
        #[case] expected: usize,
        #[case] actual: usize,
    ) {
        assert_eq!(
            rows.transpose(),
            Err(DequeError::RowLengthMismatch {
                row,
                expected,
                actual
            })
        );
    }

    #[rstest]
    fn test_to_map_later_keys_overwrite() {
        let map = matrix(&[&[1, 10], &[2, 20], &[1, 30]]).to_map().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&1), Some(&30));
        assert_eq!(map.get(&2), Some(&20));
    }

    #[rstest]
    fn test_to_map_rejects_wrong_length() {
        let rows = matrix(&[&[1, 2], &[3, 4, 5]]);
        assert_eq!(
            rows.to_map(),
            Err(DequeError::PairLength { index: 1, len: 3 })
        );
        let rows = matrix(&[&[1]]);
        assert_eq!(
            rows.to_map(),
            Err(DequeError::PairLength { index: 0, len: 1 })
        );
    }

    #[rstest]
    fn test_to_map_empty() {
        assert!(matrix(&[]).to_map().unwrap().is_empty());
    }
}
