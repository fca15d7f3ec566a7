use std::error::Error;

use dev_test_runner::example::app::{
    application_error, ApplicationError, ConfigError, IoError, NotFoundError, OtherError, QuotaError,
    Severity,
};
use dev_test_runner::example::audit::{envelope::DecodeError, report_error, AuditError, ReportError};
use dev_test_runner::generated;
use pretty_assertions::assert_eq;

fn config_error() -> ConfigError {
    ConfigError { key: "host".into(), value: "localhost".into(), message: "ignored".into() }
}

fn io_error() -> IoError {
    IoError { path: "file.txt".into(), cause: Some(NotFoundError { entity: "file".into() }) }
}

#[test]
fn leaf_renders_referenced_fields_only() {
    let err = config_error();
    assert_eq!(err.to_string(), "invalid config: host=localhost");
    assert!(err.source().is_none());
}

#[test]
fn leaf_with_cause_renders_and_unwraps_it() {
    let err = io_error();
    assert_eq!(err.to_string(), "could not read file.txt: not found: file");

    let source = err.source().expect("cause is set");
    let cause = source.downcast_ref::<NotFoundError>().expect("cause is a NotFoundError");
    assert!(std::ptr::eq(cause, err.cause.as_ref().unwrap()));
    assert!(cause.source().is_none());
}

#[test]
fn unset_cause_renders_empty_and_has_no_source() {
    let err = IoError { path: "file.txt".into(), cause: None };
    assert_eq!(err.to_string(), "could not read file.txt: ");
    assert!(err.source().is_none());
}

#[test]
fn sum_delegates_to_the_set_member() {
    let err = ApplicationError::from_config_error(config_error());
    assert_eq!(err.to_string(), "invalid config: host=localhost");
    let source = err.source().expect("member is set");
    assert_eq!(source.downcast_ref::<ConfigError>(), Some(&config_error()));

    let err = ApplicationError::from(OtherError { message: "boom".into() });
    assert_eq!(err.to_string(), "boom");
    assert!(matches!(err.kind, Some(application_error::Kind::OtherError(_))));
}

#[test]
fn unset_sum_falls_back() {
    let err = ApplicationError::default();
    assert_eq!(err.to_string(), "unknown error");
    assert!(err.source().is_none());
}

#[test]
fn scalar_member_falls_back() {
    let err = ApplicationError {
        kind: Some(application_error::Kind::LegacyMessage("old style".into())),
    };
    assert_eq!(err.to_string(), "unknown error");
    assert!(err.source().is_none());
}

#[test]
fn chain_walks_through_sum_and_leaf() {
    let err: ApplicationError = io_error().into();
    let chain: Vec<String> = std::iter::successors(Some(&err as &(dyn Error + 'static)), |&e| e.source())
        .map(|e| e.to_string())
        .collect();
    assert_eq!(
        chain,
        [
            "could not read file.txt: not found: file",
            "could not read file.txt: not found: file",
            "not found: file",
        ]
    );
}

#[test]
fn cross_package_cause_and_non_scalar_fields() {
    let err = AuditError {
        resource: "db".into(),
        reason: Some(NotFoundError { entity: "row".into() }),
        tags: vec!["a".into(), "b".into()],
        attempt: Some(2),
    };
    assert_eq!(err.to_string(), r#"audit of db failed: not found: row (attempt 2, tags ["a", "b"])"#);
    assert!(err.source().unwrap().downcast_ref::<NotFoundError>().is_some());

    let bare = AuditError { resource: "db".into(), ..Default::default() };
    assert_eq!(bare.to_string(), "audit of db failed:  (attempt 0, tags [])");
    assert!(bare.source().is_none());
}

#[test]
fn enums_render_by_value_name() {
    let err = QuotaError { limit: 5, severity: Severity::High as i32 };
    assert_eq!(err.to_string(), "quota 5 exceeded (HIGH)");

    let unknown = QuotaError { limit: 5, severity: 9 };
    assert_eq!(unknown.to_string(), "quota 5 exceeded (9)");
}

#[test]
fn nested_error_keeps_literal_braces() {
    let err = DecodeError { offset: 7 };
    assert_eq!(err.to_string(), "decode failed at byte 7 [{}]");
}

#[test]
fn sum_constructors_default_other_fields() {
    let err = ReportError::from_decode_error(DecodeError { offset: 3 });
    assert_eq!(err.trace_id, "");
    assert_eq!(err.to_string(), "decode failed at byte 3 [{}]");

    let nested = ReportError::from(ApplicationError::from_io_error(io_error()));
    assert_eq!(nested.to_string(), "could not read file.txt: not found: file");
    let app = nested.source().unwrap().downcast_ref::<ApplicationError>().unwrap();
    assert!(matches!(app.kind, Some(application_error::Kind::IoError(_))));

    let audit = ReportError::from_audit_error(AuditError::default());
    assert!(matches!(audit.reason, Some(report_error::Reason::Audit(_))));
}

#[test]
fn artifacts_carry_header_and_skip_non_errors() {
    assert!(generated::APP.starts_with("// Code generated by proto-errgen. DO NOT EDIT.\n// source: example/app.proto\n"));
    assert!(generated::APP.contains("// package: example.app\n"));
    assert!(!generated::APP.contains("for Request"));
    assert!(!generated::AUDIT.contains("for Envelope "));
    assert!(generated::AUDIT.contains("impl ::std::fmt::Display for envelope::DecodeError"));
}
