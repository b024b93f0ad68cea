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

//! The wire-level data model. A [`Value`] is the intermediate tree that the
//! marshalling engine produces and consumes, decoupled from both the native
//! representation of a structured type and from any concrete wire format.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use either::Either;
use thiserror::Error;

mod timestamp;

pub use timestamp::Timestamp;

#[cfg(test)]
mod tests;

/// A single scalar or composite wire value.
#[derive(Clone, Debug)]
pub enum Value {
    /// An explicitly null value.
    Null,

    /// A boolean wrapped as a [`Value`].
    BooleanValue(bool),

    /// A 64-bit integer wrapped as a [`Value`]. All integral wire values,
    /// regardless of their declared width, are carried at this precision.
    Int64Value(i64),

    /// A 64-bit floating point number wrapped as a [`Value`].
    Float64Value(f64),

    /// A textual value.
    Text(String),

    /// A UTC instant. On a concrete wire this is exchanged as an epoch
    /// millisecond count; in the tree it keeps its own kind.
    Timestamp(Timestamp),

    /// An ordered sequence of values.
    List(Vec<Value>),

    /// A composite value of keyed entries. Entry order is preserved so that
    /// diagnostics derived from a map are stable.
    Map(Vec<(String, Value)>),
}

/// The kinds of value that can occur in the wire tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Int64,
    Float64,
    Text,
    Timestamp,
    List,
    Map,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueKind::Null => write!(f, "Null"),
            ValueKind::Boolean => write!(f, "Boolean"),
            ValueKind::Int64 => write!(f, "Int64"),
            ValueKind::Float64 => write!(f, "Float64"),
            ValueKind::Text => write!(f, "Text"),
            ValueKind::Timestamp => write!(f, "Timestamp"),
            ValueKind::List => write!(f, "List"),
            ValueKind::Map => write!(f, "Map"),
        }
    }
}

/// Error produced when a guarded map insertion would overwrite an entry that
/// is already present. The original entry is left intact.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("Duplicate key '{key}' in map value.")]
pub struct DuplicateKeyError {
    /// The key that was inserted twice.
    pub key: String,
}

impl Value {
    /// Create a text value from anything that can be converted to a [`String`].
    pub fn text<T: Into<String>>(x: T) -> Value {
        Value::Text(x.into())
    }

    /// Create a list from a vector of anything that can be converted to a [`Value`].
    pub fn list<V: Into<Value>>(items: Vec<V>) -> Value {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Create a map from a vector of keyed entries.
    pub fn map<K: Into<String>, V: Into<Value>>(entries: Vec<(K, V)>) -> Value {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Create an empty map.
    pub fn empty_map() -> Value {
        Value::Map(vec![])
    }

    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::BooleanValue(_) => ValueKind::Boolean,
            Value::Int64Value(_) => ValueKind::Int64,
            Value::Float64Value(_) => ValueKind::Float64,
            Value::Text(_) => ValueKind::Text,
            Value::Timestamp(_) => ValueKind::Timestamp,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
        }
    }

    /// Insert an entry into a map value, failing if the key is already
    /// present. Does nothing and returns an error for non-map values.
    pub fn try_insert<K: Into<String>, V: Into<Value>>(
        &mut self,
        key: K,
        value: V,
    ) -> Result<(), DuplicateKeyError> {
        let key = key.into();
        match self {
            Value::Map(entries) => {
                if entries.iter().any(|(k, _)| *k == key) {
                    Err(DuplicateKeyError { key })
                } else {
                    entries.push((key, value.into()));
                    Ok(())
                }
            }
            _ => Err(DuplicateKeyError { key }),
        }
    }

    /// Look up an entry of a map value by key.
    pub fn get_entry(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries
                .iter()
                .find_map(|(k, v)| if k == key { Some(v) } else { None }),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::BooleanValue(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64Value(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64Value(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Map(entries) => Some(entries.as_slice()),
            _ => None,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::BooleanValue(_) => 1,
            Value::Int64Value(_) => 2,
            Value::Float64Value(_) => 2,
            Value::Text(_) => 3,
            Value::Timestamp(_) => 4,
            Value::List(_) => 5,
            Value::Map(_) => 6,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::BooleanValue(p), Value::BooleanValue(q)) => p.cmp(q),
            (Value::Int64Value(n), Value::Int64Value(m)) => n.cmp(m),
            (Value::Int64Value(n), Value::Float64Value(y)) => cmp_f64(*n as f64, *y),
            (Value::Float64Value(x), Value::Int64Value(m)) => cmp_f64(*x, *m as f64),
            (Value::Float64Value(x), Value::Float64Value(y)) => cmp_f64(*x, *y),
            (Value::Text(s), Value::Text(t)) => s.cmp(t),
            (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
            (Value::List(xs), Value::List(ys)) => {
                let mut first = xs.iter();
                let mut second = ys.iter();
                loop {
                    match (first.next(), second.next()) {
                        (Some(a), Some(b)) => match a.compare(b) {
                            Ordering::Equal => continue,
                            ow => break ow,
                        },
                        (Some(_), None) => break Ordering::Greater,
                        (None, Some(_)) => break Ordering::Less,
                        (None, None) => break Ordering::Equal,
                    }
                }
            }
            (Value::Map(xs), Value::Map(ys)) => {
                let mut first = xs
                    .iter()
                    .flat_map(|(k, v)| [Either::Left(k), Either::Right(v)].into_iter());
                let mut second = ys
                    .iter()
                    .flat_map(|(k, v)| [Either::Left(k), Either::Right(v)].into_iter());
                loop {
                    let ord = match (first.next(), second.next()) {
                        (Some(a), Some(b)) => match (a, b) {
                            (Either::Left(k1), Either::Left(k2)) => k1.cmp(k2),
                            (Either::Right(v1), Either::Right(v2)) => v1.compare(v2),
                            (Either::Left(_), Either::Right(_)) => Ordering::Less,
                            (Either::Right(_), Either::Left(_)) => Ordering::Greater,
                        },
                        (Some(_), None) => Ordering::Greater,
                        (None, Some(_)) => Ordering::Less,
                        (None, None) => break Ordering::Equal,
                    };
                    if ord != Ordering::Equal {
                        break ord;
                    }
                }
            }
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

// NaN sorts below every other float and equal to itself so the ordering
// stays total.
fn cmp_f64(x: f64, y: f64) -> Ordering {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => {
            if x == y {
                Ordering::Equal
            } else if x < y {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::BooleanValue(p), Value::BooleanValue(q)) => p == q,
            (Value::Int64Value(n), Value::Int64Value(m)) => n == m,
            (Value::Float64Value(x), Value::Float64Value(y)) => {
                if x.is_nan() {
                    y.is_nan()
                } else {
                    x == y
                }
            }
            (Value::Text(s), Value::Text(t)) => s == t,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::List(xs), Value::List(ys)) => xs == ys,
            (Value::Map(xs), Value::Map(ys)) => xs == ys,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => {
                state.write_u8(0);
            }
            Value::BooleanValue(p) => {
                state.write_u8(1);
                state.write_u8(if *p { 1 } else { 0 });
            }
            Value::Int64Value(n) => {
                state.write_u8(2);
                state.write_i64(*n);
            }
            Value::Float64Value(x) => {
                state.write_u8(3);
                if x.is_nan() {
                    state.write_u64(0);
                } else {
                    state.write_u64(x.to_bits());
                }
            }
            Value::Text(s) => {
                state.write_u8(4);
                s.hash(state);
            }
            Value::Timestamp(ts) => {
                state.write_u8(5);
                ts.hash(state);
            }
            Value::List(items) => {
                state.write_u8(6);
                items.hash(state);
            }
            Value::Map(entries) => {
                state.write_u8(7);
                entries.hash(state);
            }
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(p: bool) -> Self {
        Value::BooleanValue(p)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int64Value(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int64Value(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float64Value(x)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Value::Timestamp(ts)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<(String, Value)>> for Value {
    fn from(entries: Vec<(String, Value)>) -> Self {
        Value::Map(entries)
    }
}

fn write_string_literal(literal: &str, f: &mut Formatter<'_>) -> std::fmt::Result {
    if needs_escape(literal) {
        write!(f, "\"{}\"", escape_text(literal))
    } else {
        write!(f, "\"{}\"", literal)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::BooleanValue(p) => write!(f, "{}", p),
            Value::Int64Value(n) => write!(f, "{}", n),
            Value::Float64Value(x) => write!(f, "{}", x),
            Value::Text(s) => write_string_literal(s, f),
            Value::Timestamp(ts) => write!(f, "{}", ts),
            Value::List(items) => {
                f.write_str("[")?;
                let mut first = true;
                for item in items {
                    if !first {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                    first = false;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                let mut first = true;
                for (key, value) in entries {
                    if !first {
                        f.write_str(",")?;
                    }
                    write_string_literal(key, f)?;
                    write!(f, ":{}", value)?;
                    first = false;
                }
                f.write_str("}")
            }
        }
    }
}

fn needs_escape(text: &str) -> bool {
    text.chars().any(|c| c < '\u{20}' || c == '"' || c == '\\')
}

static DIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

fn escape_text(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => {
                output.push('\\');
                output.push('"');
            }
            '\\' => {
                output.push('\\');
                output.push('\\');
            }
            '\r' => {
                output.push('\\');
                output.push('r');
            }
            '\n' => {
                output.push('\\');
                output.push('n');
            }
            '\t' => {
                output.push('\\');
                output.push('t');
            }
            '\u{08}' => {
                output.push('\\');
                output.push('b');
            }
            '\u{0c}' => {
                output.push('\\');
                output.push('f');
            }
            cp if cp < '\u{20}' => {
                let n = cp as usize;
                output.push('\\');
                output.push('u');
                output.push(DIGITS[(n >> 12) & 0xf]);
                output.push(DIGITS[(n >> 8) & 0xf]);
                output.push(DIGITS[(n >> 4) & 0xf]);
                output.push(DIGITS[n & 0xf]);
            }
            _ => output.push(c),
        }
    }
    output
}
