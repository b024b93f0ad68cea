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

//! Constraint evaluation shared by the encode and decode paths. Each
//! function reports the first violated constraint for one value, in the
//! fixed order: enum membership, length, numeric range, pattern.

use crate::Violation;
use wireform_schema::Constraints;

/// Check a text value. Enum membership is only enforced when `enforce_enum`
/// is set; the decode path passes `false` so unknown variants flow through.
pub(crate) fn text_violation(
    constraints: &Constraints,
    enforce_enum: bool,
    text: &str,
) -> Option<Violation> {
    if enforce_enum {
        if let Some(allowed) = &constraints.allowed {
            if !allowed.iter().any(|variant| variant == text) {
                return Some(Violation::NotInEnum {
                    allowed: allowed.clone(),
                });
            }
        }
    }
    if let Some(bounds) = &constraints.length {
        let actual = text.chars().count();
        if !bounds.contains(actual) {
            return Some(Violation::Length {
                bounds: *bounds,
                actual,
            });
        }
    }
    if let Some(schema) = &constraints.text {
        if !schema.matches_str(text) {
            return Some(Violation::Pattern {
                pattern: schema.to_string(),
            });
        }
    }
    None
}

pub(crate) fn int_violation(constraints: &Constraints, value: i64) -> Option<Violation> {
    match &constraints.int_range {
        Some(bounds) if !bounds.contains(value) => Some(Violation::IntRange { bounds: *bounds }),
        _ => None,
    }
}

pub(crate) fn float_violation(constraints: &Constraints, value: f64) -> Option<Violation> {
    match &constraints.float_range {
        Some(bounds) if !bounds.contains(value) => Some(Violation::FloatRange { bounds: *bounds }),
        _ => None,
    }
}

/// Check the element count of a list or map value.
pub(crate) fn count_violation(constraints: &Constraints, count: usize) -> Option<Violation> {
    match &constraints.length {
        Some(bounds) if !bounds.contains(count) => Some(Violation::Length {
            bounds: *bounds,
            actual: count,
        }),
        _ => None,
    }
}

/// The constraints a collection field passes down to its elements: all but
/// `length`, which applies to the element count.
pub(crate) fn element_constraints(constraints: &Constraints) -> Constraints {
    Constraints {
        length: None,
        ..constraints.clone()
    }
}

/// The first duplicated key of a map value, if any.
pub(crate) fn duplicate_key(entries: &[(String, wireform_model::Value)]) -> Option<String> {
    for (i, (key, _)) in entries.iter().enumerate() {
        if entries[i + 1..].iter().any(|(other, _)| other == key) {
            return Some(key.clone());
        }
    }
    None
}
