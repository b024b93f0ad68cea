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

//! The encode path: native fields to a wire map. Violations are collected
//! across the whole call, never reported one at a time, and a payload is
//! only produced when nothing was violated.

use crate::check::{
    count_violation, duplicate_key, element_constraints, float_violation, int_violation,
    text_violation,
};
use crate::{join_path, ValidationError, Violation};
use wireform_model::Value;
use wireform_schema::{Constraints, FieldKind, SchemaError, SchemaRegistry, TypeSpec};

pub(crate) fn encode_fields(
    registry: &SchemaRegistry,
    spec: &TypeSpec,
    fields: &[(String, Value)],
    prefix: &str,
    errors: &mut Vec<ValidationError>,
) -> Result<Value, SchemaError> {
    let mut entries = Vec::with_capacity(spec.len());
    for field in spec.fields() {
        let path = join_path(prefix, field.name());
        let value = fields
            .iter()
            .find_map(|(name, value)| if name == field.name() { Some(value) } else { None });
        match value {
            Some(value) => {
                if let Some(encoded) = encode_value(
                    registry,
                    field.kind(),
                    field.constraints(),
                    value,
                    &path,
                    errors,
                )? {
                    entries.push((field.wire_key().to_string(), encoded));
                }
            }
            None if field.is_required() => {
                errors.push(ValidationError::new(path, Violation::Required, None));
            }
            // Unset optional fields leave no trace in the payload; an
            // explicit null is never emitted for them.
            None => {}
        }
    }
    Ok(Value::Map(entries))
}

fn encode_value(
    registry: &SchemaRegistry,
    kind: &FieldKind,
    constraints: &Constraints,
    value: &Value,
    path: &str,
    errors: &mut Vec<ValidationError>,
) -> Result<Option<Value>, SchemaError> {
    let violation = match (kind, value) {
        (FieldKind::Boolean, Value::BooleanValue(_)) => None,
        (FieldKind::Integer, Value::Int64Value(n)) => int_violation(constraints, *n),
        (FieldKind::Double, Value::Float64Value(x)) => float_violation(constraints, *x),
        (FieldKind::Text, Value::Text(s)) => text_violation(constraints, false, s),
        (FieldKind::Enumeration, Value::Text(s)) => text_violation(constraints, true, s),
        (FieldKind::Timestamp, Value::Timestamp(_)) => None,
        (FieldKind::List(element), Value::List(items)) => {
            match count_violation(constraints, items.len()) {
                Some(violation) => Some(violation),
                None => {
                    let element_constraints = element_constraints(constraints);
                    return encode_elements(registry, element, &element_constraints, items, path, errors)
                        .map(|items| items.map(Value::List));
                }
            }
        }
        (FieldKind::Map(element), Value::Map(entries)) => {
            if let Some(key) = duplicate_key(entries) {
                Some(Violation::DuplicateKey { key })
            } else {
                match count_violation(constraints, entries.len()) {
                    Some(violation) => Some(violation),
                    None => {
                        let element_constraints = element_constraints(constraints);
                        return encode_entries(registry, element, &element_constraints, entries, path, errors)
                            .map(|entries| entries.map(Value::Map));
                    }
                }
            }
        }
        (FieldKind::Struct(type_id), Value::Map(native)) => {
            let nested = registry.lookup(type_id)?;
            let before = errors.len();
            let encoded = encode_fields(registry, nested, native, path, errors)?;
            return Ok(if errors.len() == before {
                Some(encoded)
            } else {
                None
            });
        }
        (expected, actual) => Some(Violation::Kind {
            expected: expected.wire_kind(),
            actual: actual.kind(),
        }),
    };
    match violation {
        Some(violation) => {
            errors.push(ValidationError::new(
                path.to_string(),
                violation,
                Some(value.clone()),
            ));
            Ok(None)
        }
        None => Ok(Some(value.clone())),
    }
}

fn encode_elements(
    registry: &SchemaRegistry,
    element: &FieldKind,
    constraints: &Constraints,
    items: &[Value],
    path: &str,
    errors: &mut Vec<ValidationError>,
) -> Result<Option<Vec<Value>>, SchemaError> {
    let mut encoded = Vec::with_capacity(items.len());
    let mut complete = true;
    for (i, item) in items.iter().enumerate() {
        let item_path = format!("{}[{}]", path, i);
        match encode_value(
            registry,
            element,
            constraints,
            item,
            &item_path,
            errors,
        )? {
            Some(item) => encoded.push(item),
            None => complete = false,
        }
    }
    Ok(if complete { Some(encoded) } else { None })
}

fn encode_entries(
    registry: &SchemaRegistry,
    element: &FieldKind,
    constraints: &Constraints,
    entries: &[(String, Value)],
    path: &str,
    errors: &mut Vec<ValidationError>,
) -> Result<Option<Vec<(String, Value)>>, SchemaError> {
    let mut encoded = Vec::with_capacity(entries.len());
    let mut complete = true;
    for (key, value) in entries {
        let entry_path = format!("{}.{}", path, key);
        match encode_value(
            registry,
            element,
            constraints,
            value,
            &entry_path,
            errors,
        )? {
            Some(value) => encoded.push((key.clone(), value)),
            None => complete = false,
        }
    }
    Ok(if complete { Some(encoded) } else { None })
}
