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

//! Compile-time-checked construction for string-backed enumeration fields.
//! The wire representation stays a plain string either way; a [`Tag`] impl
//! only adds a closed Rust-side view for callers that want one, and parsing
//! through it is strict where the decode path deliberately is not.

use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Error produced when parsing a string into a closed [`Tag`] enumeration.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("'{value}' is not a recognized variant.")]
pub struct UnknownTagError {
    /// The string that matched no variant.
    pub value: String,
}

/// A closed Rust enumeration mirroring the allowed set of a string-backed
/// wire field.
pub trait Tag: Sized + Copy + PartialEq + 'static {
    /// Every variant with its canonical wire string, in declaration order.
    const VARIANTS: &'static [(&'static str, Self)];

    /// The canonical wire string of this variant.
    fn tag(&self) -> &'static str;
}

/// Parse the canonical wire string of a variant. Matching is exact; unknown
/// strings fail here even though the string-backed wire field tolerates
/// them.
pub fn parse_tag<T: Tag>(value: &str) -> Result<T, UnknownTagError> {
    T::VARIANTS
        .iter()
        .find_map(|(tag, variant)| if *tag == value { Some(*variant) } else { None })
        .ok_or_else(|| UnknownTagError {
            value: value.to_string(),
        })
}

/// Adapter displaying a variant by its wire string.
pub struct DisplayTag<T: Tag>(pub T);

impl<T: Tag> Display for DisplayTag<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let DisplayTag(variant) = self;
        f.write_str(variant.tag())
    }
}
