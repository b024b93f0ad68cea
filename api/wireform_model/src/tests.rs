// Copyright 2015-2023 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::*;
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;

#[test]
fn scalars_to_string() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::BooleanValue(true).to_string(), "true");
    assert_eq!(Value::Int64Value(-56).to_string(), "-56");
    assert_eq!(Value::Float64Value(0.5).to_string(), "0.5");
    assert_eq!(Value::text("name").to_string(), r#""name""#);
}

#[test]
fn text_to_string_escapes() {
    assert_eq!(Value::text("").to_string(), r#""""#);
    assert_eq!(Value::text("two words").to_string(), r#""two words""#);
    assert_eq!(Value::text("\r\n\t").to_string(), r#""\r\n\t""#);
    assert_eq!(Value::text("\"\\\"").to_string(), r#""\"\\\"""#);
    assert_eq!(Value::text("\u{b}").to_string(), r#""\u000b""#);
    assert_eq!(Value::text("\u{c}").to_string(), r#""\f""#);
    assert_eq!(Value::text("\u{8}").to_string(), r#""\b""#);
}

#[test]
fn composites_to_string() {
    let list = Value::list(vec![1i64, 2i64, 3i64]);
    assert_eq!(list.to_string(), "[1,2,3]");
    let map = Value::map(vec![("first", Value::from(1i64)), ("second", Value::text("a"))]);
    assert_eq!(map.to_string(), r#"{"first":1,"second":"a"}"#);
    assert_eq!(Value::empty_map().to_string(), "{}");
}

#[test]
fn kinds() {
    assert_eq!(Value::Null.kind(), ValueKind::Null);
    assert_eq!(Value::from(false).kind(), ValueKind::Boolean);
    assert_eq!(Value::from(2i64).kind(), ValueKind::Int64);
    assert_eq!(Value::from(2.0).kind(), ValueKind::Float64);
    assert_eq!(Value::text("a").kind(), ValueKind::Text);
    assert_eq!(Value::from(Timestamp::now()).kind(), ValueKind::Timestamp);
    assert_eq!(Value::list(Vec::<Value>::new()).kind(), ValueKind::List);
    assert_eq!(Value::empty_map().kind(), ValueKind::Map);
}

#[test]
fn nan_equality_is_reflexive() {
    let nan = Value::Float64Value(f64::NAN);
    assert_eq!(nan, nan.clone());
    assert_ne!(nan, Value::Float64Value(0.0));
}

#[test]
fn cross_kind_numeric_ordering() {
    assert_eq!(
        Value::Int64Value(2).cmp(&Value::Float64Value(2.0)),
        Ordering::Equal
    );
    assert_eq!(
        Value::Int64Value(2).cmp(&Value::Float64Value(2.5)),
        Ordering::Less
    );
    assert_eq!(
        Value::Float64Value(3.5).cmp(&Value::Int64Value(3)),
        Ordering::Greater
    );
}

#[test]
fn composite_ordering_is_lexicographic() {
    let shorter = Value::list(vec![1i64, 2i64]);
    let longer = Value::list(vec![1i64, 2i64, 3i64]);
    assert_eq!(shorter.cmp(&longer), Ordering::Less);

    let first = Value::map(vec![("a", Value::from(1i64))]);
    let second = Value::map(vec![("b", Value::from(0i64))]);
    assert_eq!(first.cmp(&second), Ordering::Less);
}

#[test]
fn equal_values_hash_alike() {
    fn hash_of(value: &Value) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }
    let left = Value::map(vec![("count", Value::from(3i64))]);
    let right = Value::map(vec![("count", Value::from(3i64))]);
    assert_eq!(hash_of(&left), hash_of(&right));
}

#[test]
fn guarded_insertion_rejects_duplicates() {
    let mut map = Value::empty_map();
    assert!(map.try_insert("color", "red").is_ok());
    let result = map.try_insert("color", "blue");
    assert_eq!(
        result,
        Err(DuplicateKeyError {
            key: "color".to_string()
        })
    );
    assert_eq!(map.get_entry("color"), Some(&Value::text("red")));
}

#[test]
fn guarded_insertion_requires_a_map() {
    let mut not_map = Value::Int64Value(7);
    assert!(not_map.try_insert("k", 1i64).is_err());
}

#[test]
fn timestamp_millis_round_trip() {
    let ts = Timestamp::from_millis(1_583_081_820_000).expect("in range");
    assert_eq!(ts.millis(), 1_583_081_820_000);
    assert_eq!(Timestamp::from_millis(ts.millis()), Some(ts));
}

#[test]
fn timestamp_ordering_follows_time() {
    let earlier = Timestamp::from_millis(1_000).expect("in range");
    let later = Timestamp::from_millis(2_000).expect("in range");
    assert!(earlier < later);
}
