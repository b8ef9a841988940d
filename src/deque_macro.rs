//! The `deque!` construction macro.

/// Builds a [`Deque`](crate::Deque) from a list of elements, or from one
/// element repeated a number of times.
///
/// # Examples
///
/// ```
/// use linked_deque::deque;
///
/// let letters = deque!['a', 'b', 'c'];
/// assert_eq!(letters.describe(), "(a <> b <> c)");
///
/// let zeros = deque![0; 3];
/// assert_eq!(zeros.to_sequence(), vec![0, 0, 0]);
///
/// let empty: linked_deque::Deque<i32> = deque![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! deque {
    () => {
        $crate::Deque::new()
    };

    ($element:expr; $count:expr) => {
        $crate::Deque::from_elem($element, $count)
    };

    ($($element:expr),+ $(,)?) => {
        $crate::Deque::from([$($element),+])
    };
}
