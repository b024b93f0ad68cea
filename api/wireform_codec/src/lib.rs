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

//! The marshalling engine. A [`Marshaller`] borrows a built
//! [`SchemaRegistry`] and converts between native [`Instance`]s and the
//! wire [`Value`] tree, validating per-field constraints on the way out and
//! tolerating schema evolution on the way in. Calls are pure: nothing is
//! retained between them, so one marshaller can serve any number of threads.

use wireform_model::Value;
use wireform_schema::{FieldKind, SchemaError, SchemaRegistry, TypeSpec};

mod check;
mod error;
mod instance;
mod read;
mod tags;
mod write;

pub use error::{format_errors, MarshalError, ValidationError, Violation};
pub use instance::Instance;
pub use tags::{parse_tag, DisplayTag, Tag, UnknownTagError};


/// Converts between native instances and wire payloads for the types of one
/// schema registry.
#[derive(Clone, Copy, Debug)]
pub struct Marshaller<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> Marshaller<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Marshaller { registry }
    }

    pub fn registry(&self) -> &'a SchemaRegistry {
        self.registry
    }

    /// Encode an instance of a registered type into a wire map. Either every
    /// field validates and the complete payload is returned, or every
    /// violation found in the instance is returned and no payload is.
    /// Instance fields the type does not declare are ignored.
    pub fn encode(&self, type_id: &str, instance: &Instance) -> Result<Value, MarshalError> {
        let spec = self.registry.lookup(type_id)?;
        self.encode_with(spec, instance)
    }

    /// Encode against a spec in hand rather than a registered type
    /// identifier. Struct references inside the spec are still resolved
    /// through the registry.
    pub fn encode_with(&self, spec: &TypeSpec, instance: &Instance) -> Result<Value, MarshalError> {
        let mut errors = vec![];
        let encoded = write::encode_fields(self.registry, spec, instance.fields(), "", &mut errors)?;
        if errors.is_empty() {
            Ok(encoded)
        } else {
            Err(MarshalError::Invalid(errors))
        }
    }

    /// Decode a wire map into an instance of a registered type. Wire keys
    /// the type does not declare are ignored and unknown enumeration
    /// variants are preserved as their strings; missing required fields and
    /// every other constraint violation are collected and returned together.
    pub fn decode(&self, type_id: &str, wire: &Value) -> Result<Instance, MarshalError> {
        let spec = self.registry.lookup(type_id)?;
        self.decode_with(spec, wire)
    }

    /// Decode against a spec in hand rather than a registered type
    /// identifier.
    pub fn decode_with(&self, spec: &TypeSpec, wire: &Value) -> Result<Instance, MarshalError> {
        let entries = match wire {
            Value::Map(entries) => entries.as_slice(),
            other => {
                return Err(MarshalError::Invalid(vec![ValidationError::new(
                    String::new(),
                    Violation::Kind {
                        expected: wireform_model::ValueKind::Map,
                        actual: other.kind(),
                    },
                    Some(other.clone()),
                )]));
            }
        };
        let mut errors = vec![];
        let fields = read::decode_fields(self.registry, spec, entries, "", &mut errors)?;
        if errors.is_empty() {
            Ok(fields.into_iter().collect())
        } else {
            Err(MarshalError::Invalid(errors))
        }
    }

    /// Canonicalize a string against the allowed set of an enumeration
    /// field, for callers that want encode-time strictness when accepting
    /// external input. The inverse direction is the identity: canonical
    /// strings are the wire representation.
    pub fn parse_enum(
        &self,
        type_id: &str,
        field: &str,
        value: &str,
    ) -> Result<&'a str, MarshalError> {
        let spec = self.registry.lookup(type_id)?;
        let field_spec = spec.field(field).ok_or_else(|| SchemaError::UnknownField {
            type_id: type_id.to_string(),
            field: field.to_string(),
        })?;
        let allowed = match (field_spec.kind(), &field_spec.constraints().allowed) {
            (FieldKind::Enumeration, Some(allowed)) => allowed,
            _ => {
                return Err(MarshalError::Schema(SchemaError::NotEnumeration {
                    type_id: type_id.to_string(),
                    field: field.to_string(),
                }));
            }
        };
        allowed
            .iter()
            .find(|variant| *variant == value)
            .map(String::as_str)
            .ok_or_else(|| {
                MarshalError::Invalid(vec![ValidationError::new(
                    field.to_string(),
                    Violation::NotInEnum {
                        allowed: allowed.clone(),
                    },
                    Some(Value::text(value)),
                )])
            })
    }
}

// Dotted field paths, with the prefix empty at the top level.
pub(crate) fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}
