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

use crate::SchemaError;
use regex::Regex;
use std::fmt::{Display, Formatter};

/// Constraint over UTF-8 strings.
#[derive(Clone, Debug)]
pub enum TextSchema {
    /// Matches if and only if the string is non-empty.
    NonEmpty,
    /// Matches only a specific string.
    Exact(String),
    /// Matches a string against a regular expression.
    Matches(Regex),
}

impl TextSchema {
    /// A schema that matches a single string.
    pub fn exact(string: &str) -> TextSchema {
        TextSchema::Exact(string.to_string())
    }

    /// A schema that accepts strings matching a regular expression.
    pub fn regex(string: &str) -> Result<TextSchema, SchemaError> {
        Regex::new(string)
            .map(TextSchema::Matches)
            .map_err(SchemaError::InvalidPattern)
    }

    pub fn matches_str(&self, text: &str) -> bool {
        match self {
            TextSchema::NonEmpty => !text.is_empty(),
            TextSchema::Exact(s) => text == s,
            TextSchema::Matches(r) => r.is_match(text),
        }
    }
}

impl Display for TextSchema {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TextSchema::NonEmpty => write!(f, "non-empty"),
            TextSchema::Exact(s) => write!(f, "= '{}'", s),
            TextSchema::Matches(r) => write!(f, "~ /{}/", r.as_str()),
        }
    }
}

impl PartialEq for TextSchema {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TextSchema::NonEmpty, TextSchema::NonEmpty) => true,
            (TextSchema::Exact(left), TextSchema::Exact(right)) => left == right,
            (TextSchema::Matches(left), TextSchema::Matches(right)) => {
                left.as_str() == right.as_str()
            }
            _ => false,
        }
    }
}

impl Eq for TextSchema {}
