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

use std::collections::hash_map::DefaultHasher;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use wireform_model::{DuplicateKeyError, Value};

/// One in-memory occurrence of a structured type: an ordered mapping from
/// native field name to value, where a missing entry means the field is
/// unset. Instances are owned by the caller; the marshalling engine never
/// keeps a reference past a single call.
///
/// Field order is kept for display and encoding but carries no meaning:
/// equality is that of the mapping, so an instance rebuilt by a decode
/// compares equal to the one originally encoded however it was assembled.
#[derive(Clone, Debug, Default)]
pub struct Instance {
    fields: Vec<(String, Value)>,
}

impl Instance {
    pub fn new() -> Instance {
        Instance::default()
    }

    /// Set a field, replacing any previous value. Incremental construction
    /// is deliberately unchecked; validation happens when the instance is
    /// encoded against a schema.
    pub fn set<S: Into<String>, V: Into<Value>>(&mut self, name: S, value: V) -> &mut Self {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.fields.push((name, value));
        }
        self
    }

    /// Consuming form of [`Instance::set`] for chained construction.
    pub fn with<S: Into<String>, V: Into<Value>>(mut self, name: S, value: V) -> Self {
        self.set(name, value);
        self
    }

    /// Clear a field, returning its previous value if it was set.
    pub fn unset(&mut self, name: &str) -> Option<Value> {
        let index = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(index).1)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(n, v)| if n == name { Some(v) } else { None })
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// Insert one entry of a map-valued field, creating the map if the field
    /// is unset. Fails if the key is already present, leaving the first
    /// inserted value intact; also fails if the field is set to a non-map.
    pub fn put_entry<S, K, V>(&mut self, name: S, key: K, value: V) -> Result<(), DuplicateKeyError>
    where
        S: Into<String>,
        K: Into<String>,
        V: Into<Value>,
    {
        let name = name.into();
        if !self.is_set(&name) {
            self.set(name.as_str(), Value::empty_map());
        }
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, map)) => map.try_insert(key, value),
            None => Ok(()),
        }
    }

    /// Append one element to a list-valued field, creating the list if the
    /// field is unset. Appends nothing if the field is set to a non-list.
    pub fn push_item<S, V>(&mut self, name: S, value: V) -> &mut Self
    where
        S: Into<String>,
        V: Into<Value>,
    {
        let name = name.into();
        if !self.is_set(&name) {
            self.set(name.as_str(), Value::List(vec![]));
        }
        if let Some((_, Value::List(items))) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            items.push(value.into());
        }
        self
    }

    /// The set fields in insertion order.
    pub fn fields(&self) -> &[(String, Value)] {
        self.fields.as_slice()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl Eq for Instance {}

// Order-insensitive to stay consistent with equality: per-field hashes are
// combined with a commutative operation.
impl Hash for Instance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut combined: u64 = 0;
        for field in &self.fields {
            let mut hasher = DefaultHasher::new();
            field.hash(&mut hasher);
            combined = combined.wrapping_add(hasher.finish());
        }
        state.write_usize(self.fields.len());
        state.write_u64(combined);
    }
}

impl FromIterator<(String, Value)> for Instance {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut instance = Instance::new();
        for (name, value) in iter {
            instance.set(name, value);
        }
        instance
    }
}

// Only set fields are printed; an unset optional leaves no trace.
impl Display for Instance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for (name, value) in &self.fields {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", name, value)?;
            first = false;
        }
        f.write_str("}")
    }
}
