//! Textual rendering of a [`Deque`].
//!
//! Elements are written head to tail, joined by ` <> ` and wrapped in
//! parentheses; an empty deque renders as `()`. Nested deques render
//! recursively through their own [`Display`](fmt::Display) implementation.

use std::fmt;
use std::io::{self, Write};

use super::Deque;

impl<T: fmt::Display> Deque<T> {
    /// Renders the deque as `(a <> b <> c)`, or `()` when empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_deque::Deque;
    ///
    /// assert_eq!(Deque::from([1, 2, 3]).describe(), "(1 <> 2 <> 3)");
    /// assert_eq!(Deque::<i32>::new().describe(), "()");
    ///
    /// let rows = Deque::from([Deque::from([1, 2]), Deque::new()]);
    /// assert_eq!(rows.describe(), "((1 <> 2) <> ())");
    /// ```
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Writes the rendering followed by a newline to `writer`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{self}")
    }

    /// Writes the rendering followed by a newline to standard output.
    ///
    /// # Errors
    ///
    /// Returns any error raised while writing to standard output.
    pub fn print(&self) -> io::Result<()> {
        self.write_to(&mut io::stdout().lock())
    }
}

impl<T: fmt::Display> fmt::Display for Deque<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "(")?;
        for (position, element) in self.iter().enumerate() {
            if position > 0 {
                write!(formatter, " <> ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, ")")
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![], "()")]
    #[case(vec![7], "(7)")]
    #[case(vec![1, 2, 3], "(1 <> 2 <> 3)")]
    fn test_describe(#[case] values: Vec<i32>, #[case] expected: &str) {
        let deque = Deque::from(values);
        assert_eq!(deque.describe(), expected);
        assert_eq!(format!("{deque}"), expected);
    }

    #[rstest]
    fn test_describe_strings_are_unquoted() {
        let deque = Deque::from(["a", "b"]);
        assert_eq!(deque.describe(), "(a <> b)");
    }

    #[rstest]
    fn test_describe_nested() {
        let inner = Deque::from([2, 3]);
        let rows = Deque::from([Deque::from([1]), inner, Deque::new()]);
        assert_eq!(rows.describe(), "((1) <> (2 <> 3) <> ())");
    }

    #[rstest]
    fn test_debug_is_list_like() {
        let deque = Deque::from(["a", "b"]);
        assert_eq!(format!("{deque:?}"), r#"["a", "b"]"#);
    }

    #[rstest]
    fn test_write_to_appends_newline() {
        let mut buffer = Vec::new();
        Deque::from([1, 2]).write_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "(1 <> 2)\n");
    }

    #[rstest]
    fn test_write_to_empty() {
        let mut buffer = Vec::new();
        Deque::<u8>::new().write_to(&mut buffer).unwrap();
        assert_eq!(buffer, b"()\n");
    }
}
