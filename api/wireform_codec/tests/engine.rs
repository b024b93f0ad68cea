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

//! End-to-end behavior of the marshalling engine against a small device
//! management schema catalog.

use wireform_codec::{Instance, MarshalError, Marshaller, Violation};
use wireform_model::{Timestamp, Value, ValueKind};
use wireform_schema::{FieldKind, FieldSpec, SchemaRegistry, TypeSpec};

const JOB_STATUSES: [&str; 4] = ["QUEUED", "IN_PROGRESS", "SUCCEEDED", "FAILED"];

fn registry() -> SchemaRegistry {
    let mut builder = SchemaRegistry::builder();
    builder
        .register(
            "CancelJobRequest",
            TypeSpec::of(vec![
                FieldSpec::required("jobId", FieldKind::Text)
                    .length(1, 64)
                    .pattern("^[a-zA-Z0-9_-]+$")
                    .expect("valid pattern"),
                FieldSpec::required("thingName", FieldKind::Text)
                    .length(1, 128)
                    .pattern("^[a-zA-Z0-9:_-]+$")
                    .expect("valid pattern"),
                FieldSpec::optional("force", FieldKind::Boolean),
                FieldSpec::optional("expectedVersion", FieldKind::Integer).int_range(1, i64::MAX),
                FieldSpec::optional("comment", FieldKind::Text).max_length(2028),
            ])
            .expect("valid spec"),
        )
        .expect("registration");
    builder
        .register(
            "JobSummary",
            TypeSpec::of(vec![
                FieldSpec::required("jobId", FieldKind::Text).length(1, 64),
                FieldSpec::optional("status", FieldKind::Enumeration).allowed(JOB_STATUSES),
                FieldSpec::optional("queuedAt", FieldKind::Timestamp),
                FieldSpec::optional("retryAttempt", FieldKind::Integer).int_range(0, 10),
                FieldSpec::optional("progress", FieldKind::Double).float_range(0.0, 1.0),
                FieldSpec::optional("targets", FieldKind::list_of(FieldKind::Text))
                    .length(1, 16),
                FieldSpec::optional("attributes", FieldKind::map_of(FieldKind::Text)),
                FieldSpec::optional("rateLimit", FieldKind::struct_ref("RateLimitConfig")),
                FieldSpec::optional("nextToken", FieldKind::Text).mapped_to("next_token"),
            ])
            .expect("valid spec"),
        )
        .expect("registration");
    builder
        .register(
            "RateLimitConfig",
            TypeSpec::of(vec![
                FieldSpec::required("maximumPerMinute", FieldKind::Integer).int_range(1, 1000),
                FieldSpec::optional("incrementFactor", FieldKind::Double).float_range(1.0, 5.0),
            ])
            .expect("valid spec"),
        )
        .expect("registration");
    builder.build().expect("closed registry")
}

fn paths(error: &MarshalError) -> Vec<&str> {
    error
        .validation_errors()
        .expect("validation failure")
        .iter()
        .map(|e| e.path.as_str())
        .collect()
}

#[test]
fn encode_produces_a_complete_payload() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let request = Instance::new()
        .with("jobId", "rollout-7")
        .with("thingName", "thermostat:12")
        .with("force", true);
    let payload = marshaller
        .encode("CancelJobRequest", &request)
        .expect("valid request");
    assert_eq!(
        payload,
        Value::map(vec![
            ("jobId", Value::text("rollout-7")),
            ("thingName", Value::text("thermostat:12")),
            ("force", Value::BooleanValue(true)),
        ])
    );
}

#[test]
fn round_trip_reconstructs_the_instance() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let queued_at = Timestamp::from_millis(1_583_081_820_000).expect("in range");
    let summary = Instance::new()
        .with("jobId", "rollout-7")
        .with("status", "IN_PROGRESS")
        .with("queuedAt", queued_at)
        .with("retryAttempt", 2i64)
        .with("progress", 0.25)
        .with("targets", Value::list(vec!["thing-1", "thing-2"]))
        .with("attributes", Value::map(vec![("floor", Value::text("3"))]))
        .with(
            "rateLimit",
            Value::map(vec![
                ("maximumPerMinute", Value::Int64Value(50)),
                ("incrementFactor", Value::Float64Value(2.0)),
            ]),
        );
    let payload = marshaller
        .encode("JobSummary", &summary)
        .expect("valid summary");
    let decoded = marshaller
        .decode("JobSummary", &payload)
        .expect("decodes cleanly");
    assert_eq!(decoded, summary);
}

#[test]
fn unset_optionals_are_omitted_and_stay_absent() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let summary = Instance::new().with("jobId", "rollout-7");
    let payload = marshaller
        .encode("JobSummary", &summary)
        .expect("valid summary");
    match &payload {
        Value::Map(entries) => assert_eq!(entries.len(), 1),
        other => panic!("expected a map, found {}", other),
    }
    let decoded = marshaller
        .decode("JobSummary", &payload)
        .expect("decodes cleanly");
    assert!(!decoded.is_set("status"));
    assert_eq!(decoded, summary);
}

#[test]
fn missing_required_field_is_always_named() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let request = Instance::new().with("thingName", "thermostat:12");
    let error = marshaller
        .encode("CancelJobRequest", &request)
        .expect_err("missing jobId");
    let errors = error.validation_errors().expect("validation failure");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "jobId");
    assert_eq!(errors[0].violation, Violation::Required);
}

#[test]
fn unknown_wire_keys_are_ignored() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let bare = Value::map(vec![("jobId", Value::text("rollout-7"))]);
    let extended = Value::map(vec![
        ("jobId", Value::text("rollout-7")),
        ("namespaceId", Value::text("beta")),
    ]);
    let from_bare = marshaller.decode("JobSummary", &bare).expect("decodes");
    let from_extended = marshaller
        .decode("JobSummary", &extended)
        .expect("still decodes");
    assert_eq!(from_bare, from_extended);
}

#[test]
fn unknown_enum_variants_decode_but_do_not_encode() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let wire = Value::map(vec![
        ("jobId", Value::text("rollout-7")),
        ("status", Value::text("FUTURE_VALUE")),
    ]);
    let decoded = marshaller.decode("JobSummary", &wire).expect("tolerated");
    assert_eq!(decoded.get("status"), Some(&Value::text("FUTURE_VALUE")));

    let error = marshaller
        .encode("JobSummary", &decoded)
        .expect_err("strict on encode");
    let errors = error.validation_errors().expect("validation failure");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "status");
    assert!(matches!(errors[0].violation, Violation::NotInEnum { .. }));
}

#[test]
fn collect_all_reports_every_offending_field() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let request = Instance::new()
        .with("jobId", "")
        .with("thingName", "no spaces allowed")
        .with("expectedVersion", 0i64);
    let error = marshaller
        .encode("CancelJobRequest", &request)
        .expect_err("three violations");
    let errors = error.validation_errors().expect("validation failure");
    assert_eq!(errors.len(), 3);
    assert_eq!(paths(&error), vec!["jobId", "thingName", "expectedVersion"]);
    assert!(matches!(errors[0].violation, Violation::Length { .. }));
    assert!(matches!(errors[1].violation, Violation::Pattern { .. }));
    assert!(matches!(errors[2].violation, Violation::IntRange { .. }));
}

#[test]
fn nested_errors_are_path_prefixed() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let summary = Instance::new()
        .with("jobId", "rollout-7")
        .with("rateLimit", Value::map(vec![("incrementFactor", Value::Float64Value(9.5))]));
    let error = marshaller
        .encode("JobSummary", &summary)
        .expect_err("nested violations");
    assert_eq!(
        paths(&error),
        vec!["rateLimit.maximumPerMinute", "rateLimit.incrementFactor"]
    );
}

#[test]
fn list_element_errors_are_indexed() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let summary = Instance::new()
        .with("jobId", "rollout-7")
        .with(
            "targets",
            Value::List(vec![
                Value::text("thing-1"),
                Value::Int64Value(2),
            ]),
        );
    let error = marshaller
        .encode("JobSummary", &summary)
        .expect_err("element violation");
    assert_eq!(paths(&error), vec!["targets[1]"]);
}

#[test]
fn no_partial_payload_on_failure() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let request = Instance::new()
        .with("jobId", "rollout-7")
        .with("thingName", "");
    let result = marshaller.encode("CancelJobRequest", &request);
    assert!(matches!(result, Err(MarshalError::Invalid(_))));
}

#[test]
fn duplicate_map_keys_fail_to_encode() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let summary = Instance::new()
        .with("jobId", "rollout-7")
        .with(
            "attributes",
            Value::Map(vec![
                ("floor".to_string(), Value::text("3")),
                ("floor".to_string(), Value::text("4")),
            ]),
        );
    let error = marshaller
        .encode("JobSummary", &summary)
        .expect_err("duplicate key");
    let errors = error.validation_errors().expect("validation failure");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "attributes");
    assert_eq!(
        errors[0].violation,
        Violation::DuplicateKey {
            key: "floor".to_string()
        }
    );
}

#[test]
fn duplicate_wire_keys_fail_to_decode() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let wire = Value::Map(vec![
        ("jobId".to_string(), Value::text("rollout-7")),
        ("jobId".to_string(), Value::text("rollout-8")),
    ]);
    let error = marshaller
        .decode("JobSummary", &wire)
        .expect_err("duplicate wire key");
    let errors = error.validation_errors().expect("validation failure");
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].violation, Violation::DuplicateKey { .. }));
}

#[test]
fn decode_widens_integers_for_double_fields() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let wire = Value::map(vec![
        ("jobId", Value::text("rollout-7")),
        ("progress", Value::Int64Value(1)),
    ]);
    let decoded = marshaller.decode("JobSummary", &wire).expect("decodes");
    assert_eq!(decoded.get("progress"), Some(&Value::Float64Value(1.0)));
}

#[test]
fn decode_reads_epoch_milliseconds_as_timestamps() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let wire = Value::map(vec![
        ("jobId", Value::text("rollout-7")),
        ("queuedAt", Value::Int64Value(1_583_081_820_000)),
    ]);
    let decoded = marshaller.decode("JobSummary", &wire).expect("decodes");
    let expected = Timestamp::from_millis(1_583_081_820_000).expect("in range");
    assert_eq!(decoded.get("queuedAt"), Some(&Value::Timestamp(expected)));
}

#[test]
fn decode_reports_missing_required_fields() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let wire = Value::map(vec![("status", Value::text("QUEUED"))]);
    let error = marshaller
        .decode("JobSummary", &wire)
        .expect_err("missing jobId");
    let errors = error.validation_errors().expect("validation failure");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "jobId");
    assert_eq!(errors[0].violation, Violation::Required);
}

#[test]
fn decode_rejects_non_map_payloads() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let error = marshaller
        .decode("JobSummary", &Value::text("not a map"))
        .expect_err("kind mismatch");
    let errors = error.validation_errors().expect("validation failure");
    assert_eq!(
        errors[0].violation,
        Violation::Kind {
            expected: ValueKind::Map,
            actual: ValueKind::Text,
        }
    );
}

#[test]
fn wire_key_mapping_is_applied_both_ways() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let summary = Instance::new()
        .with("jobId", "rollout-7")
        .with("nextToken", "page-2");
    let payload = marshaller.encode("JobSummary", &summary).expect("encodes");
    assert_eq!(payload.get_entry("next_token"), Some(&Value::text("page-2")));
    assert_eq!(payload.get_entry("nextToken"), None);
    let decoded = marshaller.decode("JobSummary", &payload).expect("decodes");
    assert_eq!(decoded.get("nextToken"), Some(&Value::text("page-2")));
}

#[test]
fn parse_enum_canonicalizes_known_variants() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let canonical = marshaller
        .parse_enum("JobSummary", "status", "SUCCEEDED")
        .expect("known variant");
    assert_eq!(canonical, "SUCCEEDED");
}

#[test]
fn parse_enum_rejects_unknown_variants() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let error = marshaller
        .parse_enum("JobSummary", "status", "ARCHIVED")
        .expect_err("unknown variant");
    let errors = error.validation_errors().expect("validation failure");
    assert!(matches!(errors[0].violation, Violation::NotInEnum { .. }));
}

#[test]
fn errors_render_one_line_per_violation() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let request = Instance::new()
        .with("jobId", "")
        .with("thingName", "no spaces allowed");
    let error = marshaller
        .encode("CancelJobRequest", &request)
        .expect_err("two violations");
    let message = error.to_string();
    let lines: Vec<&str> = message.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("jobId: "));
    assert!(lines[1].starts_with("thingName: "));
}

#[test]
fn unknown_type_ids_are_schema_errors() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);
    let result = marshaller.encode("DeleteJobRequest", &Instance::new());
    assert!(matches!(result, Err(MarshalError::Schema(_))));
}
