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

//! Schema-driven marshalling between native structured data and a JSON-like
//! wire representation.
//!
//! A process registers a [`schema::TypeSpec`] for each structured type it
//! exchanges, builds the registry once at startup and then encodes
//! [`Instance`]s to wire payloads (validating every per-field constraint,
//! collecting all violations in one pass) and decodes service responses
//! back (tolerating unknown fields and unknown enumeration variants, the
//! contract that keeps an old client working against a newer service).
//!
//! ```
//! use wireform::model::Value;
//! use wireform::schema::{FieldKind, FieldSpec, SchemaRegistry, TypeSpec};
//! use wireform::{Instance, Marshaller};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = SchemaRegistry::builder();
//! builder.register(
//!     "CancelJobRequest",
//!     TypeSpec::of(vec![
//!         FieldSpec::required("jobId", FieldKind::Text).length(1, 64),
//!         FieldSpec::optional("force", FieldKind::Boolean),
//!     ])?,
//! )?;
//! let registry = builder.build()?;
//!
//! let marshaller = Marshaller::new(&registry);
//! let request = Instance::new().with("jobId", "rollout-7").with("force", true);
//! let payload = marshaller.encode("CancelJobRequest", &request)?;
//! assert_eq!(
//!     payload,
//!     Value::map(vec![
//!         ("jobId", Value::text("rollout-7")),
//!         ("force", Value::from(true)),
//!     ])
//! );
//! # Ok(())
//! # }
//! ```

/// The wire-level value tree.
pub mod model {
    pub use wireform_model::{DuplicateKeyError, Timestamp, Value, ValueKind};
}

/// Type and field schemas and the registry that holds them.
pub mod schema {
    pub use wireform_schema::{
        Bound, Constraints, FieldKind, FieldSpec, Range, RegistryBuilder, SchemaError,
        SchemaRegistry, TextSchema, TypeSpec,
    };
}

/// Diagnostics produced by the engine.
pub mod errors {
    pub use wireform_codec::{format_errors, MarshalError, ValidationError, Violation};
}

/// Compile-time-checked views of string-backed enumeration fields.
pub mod tags {
    pub use wireform_codec::{parse_tag, DisplayTag, Tag, UnknownTagError};
}

/// JSON as a concrete wire format.
#[cfg(feature = "json")]
pub mod json {
    pub use wireform_json::{from_json, parse_json, print_json, to_json, JsonError};
}

pub use wireform_codec::{Instance, Marshaller};
