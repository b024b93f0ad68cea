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

//! Schema descriptions for structured wire types. A [`TypeSpec`] describes
//! one structured type as an ordered collection of [`FieldSpec`]s; a
//! [`SchemaRegistry`] holds the specs for every type an application
//! exchanges, built once at startup and read-only afterwards.

use std::fmt::{Display, Formatter};

use thiserror::Error;

use wireform_model::ValueKind;

mod range;
mod registry;
mod text;

pub use range::{Bound, Range};
pub use registry::{RegistryBuilder, SchemaRegistry};
pub use text::TextSchema;


/// Error produced when assembling schemas or the registry. All of these
/// indicate misuse by the integrating application and should abort
/// initialization rather than be handled.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A schema was registered twice under one type identifier.
    #[error("A schema for type '{0}' is already registered.")]
    DuplicateType(String),
    /// A type identifier had no registered schema.
    #[error("No schema is registered for type '{0}'.")]
    UnknownType(String),
    /// Two fields of one type shared a native name.
    #[error("Field '{0}' is declared more than once.")]
    DuplicateField(String),
    /// Two fields of one type mapped to the same wire key.
    #[error("Wire key '{0}' is mapped by more than one field.")]
    DuplicateWireKey(String),
    /// A field was named that its type does not declare.
    #[error("Type '{type_id}' has no field '{field}'.")]
    UnknownField { type_id: String, field: String },
    /// An enumeration operation was applied to a non-enumeration field.
    #[error("Field '{field}' of type '{type_id}' is not an enumeration.")]
    NotEnumeration { type_id: String, field: String },
    /// A pattern constraint failed to compile.
    #[error("Invalid pattern constraint: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// The kind of value a field carries, including the element kind for
/// collections and the referenced type identifier for nested structures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Boolean,
    /// Integral, carried as a 64-bit value on the wire regardless of the
    /// declared width of the member.
    Integer,
    Double,
    Text,
    Timestamp,
    /// A string-backed enumeration. The allowed variants live in the field's
    /// constraints; values outside the set still decode (see the codec).
    Enumeration,
    List(Box<FieldKind>),
    /// A map with text keys and elements of the given kind.
    Map(Box<FieldKind>),
    /// A nested structured type, referenced by its registry identifier.
    Struct(String),
}

impl FieldKind {
    /// The wire-level kind a well-formed value of this field kind has.
    pub fn wire_kind(&self) -> ValueKind {
        match self {
            FieldKind::Boolean => ValueKind::Boolean,
            FieldKind::Integer => ValueKind::Int64,
            FieldKind::Double => ValueKind::Float64,
            FieldKind::Text => ValueKind::Text,
            FieldKind::Timestamp => ValueKind::Timestamp,
            FieldKind::Enumeration => ValueKind::Text,
            FieldKind::List(_) => ValueKind::List,
            FieldKind::Map(_) => ValueKind::Map,
            FieldKind::Struct(_) => ValueKind::Map,
        }
    }

    /// Convenience for a list of elements of the given kind.
    pub fn list_of(element: FieldKind) -> FieldKind {
        FieldKind::List(Box::new(element))
    }

    /// Convenience for a map with elements of the given kind.
    pub fn map_of(element: FieldKind) -> FieldKind {
        FieldKind::Map(Box::new(element))
    }

    /// Convenience for a reference to a registered structured type.
    pub fn struct_ref<S: Into<String>>(type_id: S) -> FieldKind {
        FieldKind::Struct(type_id.into())
    }

    fn collect_struct_refs<'a>(&'a self, refs: &mut Vec<&'a str>) {
        match self {
            FieldKind::Struct(type_id) => refs.push(type_id.as_str()),
            FieldKind::List(element) | FieldKind::Map(element) => {
                element.collect_struct_refs(refs);
            }
            _ => {}
        }
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Boolean => write!(f, "boolean"),
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Double => write!(f, "double"),
            FieldKind::Text => write!(f, "text"),
            FieldKind::Timestamp => write!(f, "timestamp"),
            FieldKind::Enumeration => write!(f, "enumeration"),
            FieldKind::List(element) => write!(f, "list of {}", element),
            FieldKind::Map(element) => write!(f, "map of {}", element),
            FieldKind::Struct(type_id) => write!(f, "struct '{}'", type_id),
        }
    }
}

/// The constraint set attached to one field. Every member is optional; an
/// empty set accepts any well-kinded value.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Constraints {
    /// Bounds on the character count of text or the element count of a
    /// collection.
    pub length: Option<Range<usize>>,
    /// Bounds on an integer value.
    pub int_range: Option<Range<i64>>,
    /// Bounds on a floating point value.
    pub float_range: Option<Range<f64>>,
    /// A pattern a text value must satisfy.
    pub text: Option<TextSchema>,
    /// The allowed variants of an enumeration field.
    pub allowed: Option<Vec<String>>,
}

impl Constraints {
    pub fn is_empty(&self) -> bool {
        self.length.is_none()
            && self.int_range.is_none()
            && self.float_range.is_none()
            && self.text.is_none()
            && self.allowed.is_none()
    }
}

/// Specification of one field of a structured type.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    name: String,
    wire_key: String,
    kind: FieldKind,
    required: bool,
    constraints: Constraints,
}

impl FieldSpec {
    fn new(name: String, kind: FieldKind, required: bool) -> Self {
        FieldSpec {
            wire_key: name.clone(),
            name,
            kind,
            required,
            constraints: Constraints::default(),
        }
    }

    /// A field that must be present when a value of the owning type is
    /// encoded or decoded.
    pub fn required<S: Into<String>>(name: S, kind: FieldKind) -> Self {
        FieldSpec::new(name.into(), kind, true)
    }

    /// A field that may be absent. Absent optional fields are omitted from
    /// wire payloads entirely.
    pub fn optional<S: Into<String>>(name: S, kind: FieldKind) -> Self {
        FieldSpec::new(name.into(), kind, false)
    }

    /// Map the field to a wire key differing from its native name.
    pub fn mapped_to<S: Into<String>>(mut self, wire_key: S) -> Self {
        self.wire_key = wire_key.into();
        self
    }

    /// Constrain the length (characters for text, elements for collections)
    /// to an inclusive interval.
    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.constraints.length = Some(Range::inclusive(min, max));
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.constraints.length = Some(Range::lower_bounded(Bound::inclusive(min)));
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.constraints.length = Some(Range::upper_bounded(Bound::inclusive(max)));
        self
    }

    /// Constrain an integer value to an inclusive interval.
    pub fn int_range(mut self, min: i64, max: i64) -> Self {
        self.constraints.int_range = Some(Range::inclusive(min, max));
        self
    }

    /// Constrain a floating point value to an inclusive interval.
    pub fn float_range(mut self, min: f64, max: f64) -> Self {
        self.constraints.float_range = Some(Range::inclusive(min, max));
        self
    }

    /// Constrain a text value with a regular expression. The pattern is
    /// compiled here so that a malformed one fails at schema-build time.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, SchemaError> {
        self.constraints.text = Some(TextSchema::regex(pattern)?);
        Ok(self)
    }

    /// Constrain a text value with a prebuilt [`TextSchema`].
    pub fn matching(mut self, schema: TextSchema) -> Self {
        self.constraints.text = Some(schema);
        self
    }

    /// Declare the allowed variants of an enumeration field.
    pub fn allowed<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wire_key(&self) -> &str {
        &self.wire_key
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }
}

/// Specification of one structured type as an ordered collection of fields.
/// Field order is irrelevant for correctness but preserved so diagnostics
/// are stable.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeSpec {
    fields: Vec<FieldSpec>,
}

impl TypeSpec {
    /// Assemble a spec, rejecting duplicate native names and duplicate wire
    /// keys.
    pub fn of(fields: Vec<FieldSpec>) -> Result<TypeSpec, SchemaError> {
        for (i, field) in fields.iter().enumerate() {
            for other in &fields[i + 1..] {
                if field.name == other.name {
                    return Err(SchemaError::DuplicateField(field.name.clone()));
                }
                if field.wire_key == other.wire_key {
                    return Err(SchemaError::DuplicateWireKey(field.wire_key.clone()));
                }
            }
        }
        Ok(TypeSpec { fields })
    }

    pub fn fields(&self) -> &[FieldSpec] {
        self.fields.as_slice()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_by_wire_key(&self, wire_key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.wire_key == wire_key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The identifiers of every structured type this spec references,
    /// including through list and map element kinds.
    pub fn struct_refs(&self) -> Vec<&str> {
        let mut refs = vec![];
        for field in &self.fields {
            field.kind.collect_struct_refs(&mut refs);
        }
        refs
    }
}
