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

use std::collections::HashMap;

use tracing::debug;

use crate::{SchemaError, TypeSpec};

/// Accumulates type schemas during the single-threaded startup phase.
/// Consumed by [`RegistryBuilder::build`], which is the only way to obtain
/// a [`SchemaRegistry`]; after that point no registration is expressible.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    types: HashMap<String, TypeSpec>,
    // Registration order, kept so that build-time validation reports the
    // first offending registration deterministically.
    order: Vec<String>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        RegistryBuilder::default()
    }

    /// Register the schema for one structured type.
    pub fn register<S: Into<String>>(
        &mut self,
        type_id: S,
        spec: TypeSpec,
    ) -> Result<(), SchemaError> {
        let type_id = type_id.into();
        if self.types.contains_key(&type_id) {
            return Err(SchemaError::DuplicateType(type_id));
        }
        debug!(type_id = %type_id, fields = spec.len(), "Registered type schema.");
        self.order.push(type_id.clone());
        self.types.insert(type_id, spec);
        Ok(())
    }

    /// Validate the accumulated schemas and freeze them. Every struct
    /// reference must resolve to a registered type so that a dangling
    /// reference surfaces here rather than in the middle of a marshalling
    /// call.
    pub fn build(self) -> Result<SchemaRegistry, SchemaError> {
        let RegistryBuilder { types, order } = self;
        for type_id in &order {
            if let Some(spec) = types.get(type_id) {
                for referenced in spec.struct_refs() {
                    if !types.contains_key(referenced) {
                        return Err(SchemaError::UnknownType(referenced.to_string()));
                    }
                }
            }
        }
        debug!(types = types.len(), "Schema registry built.");
        Ok(SchemaRegistry { types })
    }
}

/// An immutable catalog of type schemas. Shared freely between threads;
/// lookups never lock.
#[derive(Debug)]
pub struct SchemaRegistry {
    types: HashMap<String, TypeSpec>,
}

impl SchemaRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The schema for a type identifier.
    pub fn lookup(&self, type_id: &str) -> Result<&TypeSpec, SchemaError> {
        self.types
            .get(type_id)
            .ok_or_else(|| SchemaError::UnknownType(type_id.to_string()))
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.types.contains_key(type_id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn type_ids(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}
