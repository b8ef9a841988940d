#![cfg(feature = "serde")]

//! Integration tests for serde support.
//!
//! A deque serializes as a plain sequence in head-to-tail order, and nested
//! deques as nested sequences.

use linked_deque::{Deque, Nested, deque};
use rstest::rstest;

#[rstest]
fn test_deque_json_roundtrip() {
    let deque = deque![3, 1, 4, 1, 5];
    let json = serde_json::to_string(&deque).unwrap();
    assert_eq!(json, "[3,1,4,1,5]");
    let restored: Deque<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, deque);
}

#[rstest]
fn test_deque_after_swap_serializes_in_chain_order() {
    let mut deque = deque!['a', 'b', 'c'];
    deque.swap(0, 2).unwrap();
    assert_eq!(serde_json::to_string(&deque).unwrap(), r#"["c","b","a"]"#);
}

#[rstest]
fn test_deque_of_deques_roundtrip() {
    let rows = deque![deque![1, 2], deque![], deque![3]];
    let json = serde_json::to_string(&rows).unwrap();
    assert_eq!(json, "[[1,2],[],[3]]");
    let restored: Deque<Deque<i32>> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, rows);
}

#[rstest]
fn test_nested_roundtrip_then_flatten() {
    let nested: Deque<Nested<String>> = serde_json::from_str(r#"["a",["b",["c"]],"d"]"#).unwrap();
    assert_eq!(nested.describe(), "(a <> (b <> (c)) <> d)");
    assert_eq!(nested.flatten().describe(), "(a <> b <> c <> d)");
    let json = serde_json::to_string(&nested).unwrap();
    assert_eq!(json, r#"["a",["b",["c"]],"d"]"#);
}

#[rstest]
fn test_invalid_json_is_rejected() {
    assert!(serde_json::from_str::<Deque<i32>>("42").is_err());
    assert!(serde_json::from_str::<Deque<i32>>("[1,2,").is_err());
}
