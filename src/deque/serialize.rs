//! Serde support: a deque serializes as a plain sequence, head to tail.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Deque;

impl<T: Serialize> Serialize for Deque<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

struct DequeVisitor<T> {
    marker: PhantomData<T>,
}

impl<T> DequeVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<'de, T> Visitor<'de> for DequeVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = Deque<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut deque = Deque::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            deque.push(element);
        }
        Ok(deque)
    }
}

impl<'de, T> Deserialize<'de> for Deque<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(DequeVisitor::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deque::Nested;
    use rstest::rstest;

    #[rstest]
    fn test_serialize_as_sequence() {
        let deque = Deque::from([3, 1, 2]);
        assert_eq!(serde_json::to_string(&deque).unwrap(), "[3,1,2]");
        assert_eq!(serde_json::to_string(&Deque::<i32>::new()).unwrap(), "[]");
    }

    #[rstest]
    fn test_deserialize_preserves_order() {
        let deque: Deque<String> = serde_json::from_str(r#"["b","a","c"]"#).unwrap();
        assert_eq!(deque.describe(), "(b <> a <> c)");
    }

    #[rstest]
    fn test_deserialize_rejects_non_sequence() {
        assert!(serde_json::from_str::<Deque<i32>>("{\"a\":1}").is_err());
        assert!(serde_json::from_str::<Deque<i32>>("[1,\"x\"]").is_err());
    }

    #[rstest]
    fn test_nested_is_untagged() {
        let nested: Deque<Nested<i32>> = serde_json::from_str("[1,[2,[3]],[]]").unwrap();
        assert_eq!(nested.describe(), "(1 <> (2 <> (3)) <> ())");
        assert_eq!(serde_json::to_string(&nested).unwrap(), "[1,[2,[3]],[]]");
    }
}
