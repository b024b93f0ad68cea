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

use std::fmt::{Display, Formatter};

use thiserror::Error;

use wireform_model::{Value, ValueKind};
use wireform_schema::{Range, SchemaError};

/// A single constraint failure.
#[derive(Clone, Debug, PartialEq)]
pub enum Violation {
    /// A required field had no value.
    Required,
    /// A value had the wrong wire kind for its field.
    Kind {
        expected: ValueKind,
        actual: ValueKind,
    },
    /// An enumeration field was encoded with a value outside its allowed
    /// set. Never produced on decode.
    NotInEnum { allowed: Vec<String> },
    /// A text or collection length fell outside the field's bounds.
    Length {
        bounds: Range<usize>,
        actual: usize,
    },
    /// An integer fell outside the field's bounds.
    IntRange { bounds: Range<i64> },
    /// A floating point number fell outside the field's bounds.
    FloatRange { bounds: Range<f64> },
    /// A text value did not satisfy the field's pattern.
    Pattern { pattern: String },
    /// A map field carried the same key twice.
    DuplicateKey { key: String },
    /// An epoch millisecond count did not denote a representable instant.
    InvalidTimestamp { millis: i64 },
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::Required => write!(f, "required field is not set"),
            Violation::Kind { expected, actual } => {
                write!(f, "expected {} but found {}", expected, actual)
            }
            Violation::NotInEnum { allowed } => {
                write!(f, "value is not one of [{}]", allowed.join(", "))
            }
            Violation::Length { bounds, actual } => {
                write!(f, "length {} is not {}", actual, DisplayRange(bounds))
            }
            Violation::IntRange { bounds } => {
                write!(f, "value is not {}", DisplayRange(bounds))
            }
            Violation::FloatRange { bounds } => {
                write!(f, "value is not {}", DisplayRange(bounds))
            }
            Violation::Pattern { pattern } => {
                write!(f, "value does not match {}", pattern)
            }
            Violation::DuplicateKey { key } => write!(f, "duplicate key '{}'", key),
            Violation::InvalidTimestamp { millis } => {
                write!(f, "epoch millisecond count {} is out of range", millis)
            }
        }
    }
}

// Renders interval bounds as a predicate ("at least 1 and at most 64").
struct DisplayRange<'a, T: Display + Copy + PartialOrd>(&'a Range<T>);

impl<'a, T: Display + Copy + PartialOrd> Display for DisplayRange<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let DisplayRange(range) = self;
        match (range.min(), range.max()) {
            (Some(min), Some(max)) => {
                write_bound(f, min, "at least", "more than")?;
                f.write_str(" and ")?;
                write_bound(f, max, "at most", "less than")
            }
            (Some(min), None) => write_bound(f, min, "at least", "more than"),
            (None, Some(max)) => write_bound(f, max, "at most", "less than"),
            (None, None) => f.write_str("unconstrained"),
        }
    }
}

fn write_bound<T: Display + Copy>(
    f: &mut Formatter<'_>,
    bound: wireform_schema::Bound<T>,
    inclusive: &str,
    exclusive: &str,
) -> std::fmt::Result {
    if bound.is_inclusive() {
        write!(f, "{} {}", inclusive, bound.value())
    } else {
        write!(f, "{} {}", exclusive, bound.value())
    }
}

/// One accumulated validation failure: the path of the offending field, the
/// constraint it violated and, where one exists, the offending value.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationError {
    /// Dotted path of the field, with `[i]` components for list elements.
    pub path: String,
    pub violation: Violation,
    pub value: Option<Value>,
}

impl ValidationError {
    pub fn new(path: String, violation: Violation, value: Option<Value>) -> Self {
        ValidationError {
            path,
            violation,
            value,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if !self.path.is_empty() {
            write!(f, "{}: ", self.path)?;
        }
        write!(f, "{}", self.violation)?;
        if let Some(value) = &self.value {
            write!(f, "; found {}", value)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Render a collected list of validation failures, one per line, in the
/// order they were encountered.
pub fn format_errors(errors: &[ValidationError]) -> String {
    let mut message = String::new();
    for (i, error) in errors.iter().enumerate() {
        if i > 0 {
            message.push('\n');
        }
        message.push_str(&error.to_string());
    }
    message
}

/// Error type of the marshalling entry points.
#[derive(Error, Debug)]
pub enum MarshalError {
    /// Schema or registry misuse; fatal.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// The complete list of constraint failures for the call; the caller can
    /// correct the input and retry.
    #[error("{}", format_errors(.0))]
    Invalid(Vec<ValidationError>),
}

impl MarshalError {
    /// The collected validation failures, if this is a validation error.
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            MarshalError::Invalid(errors) => Some(errors.as_slice()),
            MarshalError::Schema(_) => None,
        }
    }
}
