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

//! The decode path: a wire map back to native fields. Unknown wire keys and
//! unknown enumeration variants are tolerated so that payloads produced
//! against a newer schema than this process was built with still decode.

use crate::check::{
    count_violation, duplicate_key, element_constraints, float_violation, int_violation,
    text_violation,
};
use crate::{join_path, ValidationError, Violation};
use wireform_model::{Timestamp, Value};
use wireform_schema::{Constraints, FieldKind, SchemaError, SchemaRegistry, TypeSpec};

pub(crate) fn decode_fields(
    registry: &SchemaRegistry,
    spec: &TypeSpec,
    entries: &[(String, Value)],
    prefix: &str,
    errors: &mut Vec<ValidationError>,
) -> Result<Vec<(String, Value)>, SchemaError> {
    let mut fields = Vec::with_capacity(spec.len());
    for field in spec.fields() {
        let path = join_path(prefix, field.name());
        let mut matches = entries
            .iter()
            .filter(|(key, _)| key == field.wire_key())
            .map(|(_, value)| value);
        let first = matches.next();
        if matches.next().is_some() {
            errors.push(ValidationError::new(
                path,
                Violation::DuplicateKey {
                    key: field.wire_key().to_string(),
                },
                None,
            ));
            continue;
        }
        match first {
            Some(value) => {
                if let Some(decoded) = decode_value(
                    registry,
                    field.kind(),
                    field.constraints(),
                    value,
                    &path,
                    errors,
                )? {
                    fields.push((field.name().to_string(), decoded));
                }
            }
            None if field.is_required() => {
                errors.push(ValidationError::new(path, Violation::Required, None));
            }
            None => {}
        }
    }
    Ok(fields)
}

fn decode_value(
    registry: &SchemaRegistry,
    kind: &FieldKind,
    constraints: &Constraints,
    value: &Value,
    path: &str,
    errors: &mut Vec<ValidationError>,
) -> Result<Option<Value>, SchemaError> {
    let mut decoded = None;
    let violation = match (kind, value) {
        (FieldKind::Boolean, Value::BooleanValue(_)) => None,
        (FieldKind::Integer, Value::Int64Value(n)) => int_violation(constraints, *n),
        (FieldKind::Double, Value::Float64Value(x)) => float_violation(constraints, *x),
        // JSON wires deliver undecorated integers where a double is
        // declared; widen rather than reject.
        (FieldKind::Double, Value::Int64Value(n)) => {
            let widened = *n as f64;
            match float_violation(constraints, widened) {
                Some(violation) => Some(violation),
                None => {
                    decoded = Some(Value::Float64Value(widened));
                    None
                }
            }
        }
        // Unknown enumeration variants pass through untouched; the allowed
        // set is only enforced when encoding.
        (FieldKind::Enumeration, Value::Text(s)) => text_violation(constraints, false, s),
        (FieldKind::Text, Value::Text(s)) => text_violation(constraints, false, s),
        (FieldKind::Timestamp, Value::Timestamp(_)) => None,
        (FieldKind::Timestamp, Value::Int64Value(millis)) => {
            match Timestamp::from_millis(*millis) {
                Some(ts) => {
                    decoded = Some(Value::Timestamp(ts));
                    None
                }
                None => Some(Violation::InvalidTimestamp { millis: *millis }),
            }
        }
        (FieldKind::List(element), Value::List(items)) => {
            match count_violation(constraints, items.len()) {
                Some(violation) => Some(violation),
                None => {
                    let element_constraints = element_constraints(constraints);
                    return decode_elements(registry, element, &element_constraints, items, path, errors)
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
                        return decode_entries(registry, element, &element_constraints, entries, path, errors)
                            .map(|entries| entries.map(Value::Map));
                    }
                }
            }
        }
        (FieldKind::Struct(type_id), Value::Map(entries)) => {
            let nested = registry.lookup(type_id)?;
            let before = errors.len();
            let fields = decode_fields(registry, nested, entries, path, errors)?;
            return Ok(if errors.len() == before {
                Some(Value::Map(fields))
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
        None => Ok(Some(decoded.unwrap_or_else(|| value.clone()))),
    }
}

fn decode_elements(
    registry: &SchemaRegistry,
    element: &FieldKind,
    constraints: &Constraints,
    items: &[Value],
    path: &str,
    errors: &mut Vec<ValidationError>,
) -> Result<Option<Vec<Value>>, SchemaError> {
    let mut decoded = Vec::with_capacity(items.len());
    let mut complete = true;
    for (i, item) in items.iter().enumerate() {
        let item_path = format!("{}[{}]", path, i);
        match decode_value(
            registry,
            element,
            constraints,
            item,
            &item_path,
            errors,
        )? {
            Some(item) => decoded.push(item),
            None => complete = false,
        }
    }
    Ok(if complete { Some(decoded) } else { None })
}

fn decode_entries(
    registry: &SchemaRegistry,
    element: &FieldKind,
    constraints: &Constraints,
    entries: &[(String, Value)],
    path: &str,
    errors: &mut Vec<ValidationError>,
) -> Result<Option<Vec<(String, Value)>>, SchemaError> {
    let mut decoded = Vec::with_capacity(entries.len());
    let mut complete = true;
    for (key, value) in entries {
        let entry_path = format!("{}.{}", path, key);
        match decode_value(
            registry,
            element,
            constraints,
            value,
            &entry_path,
            errors,
        )? {
            Some(value) => decoded.push((key.clone(), value)),
            None => complete = false,
        }
    }
    Ok(if complete { Some(decoded) } else { None })
}
