//! Unit tests for request payload inspection.
//!
//! Run with: cargo test --test payload_unit_test

use meteo_db::error::AppError;
use meteo_db::payload::Payload;

fn payload(body: &str) -> Payload {
    Payload::parse(body.as_bytes()).unwrap()
}

#[test]
fn only_objects_are_accepted() {
    for body in ["", "null", "[]", "42", "\"text\"", "{"] {
        assert!(
            matches!(Payload::parse(body.as_bytes()), Err(AppError::InvalidFields(_))),
            "{body:?}"
        );
    }
}

#[test]
fn require_reports_first_missing_key() {
    let p = payload(r#"{"nume": "X", "lat": null}"#);

    assert!(p.require(&["nume", "lat"]).is_ok());
    match p.require(&["nume", "lon", "idTara"]) {
        Err(AppError::InvalidFields(msg)) => assert_eq!(msg, "Missing field 'lon'"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn numbers_accept_integers_and_floats_only() {
    let p = payload(r#"{"a": 1, "b": -2.5, "c": "3", "d": true, "e": null}"#);

    assert_eq!(p.number("a").unwrap(), 1.0);
    assert_eq!(p.number("b").unwrap(), -2.5);
    for key in ["c", "d", "e"] {
        assert!(matches!(p.number(key), Err(AppError::InvalidFormat(_))), "{key}");
    }
}

#[test]
fn integers_reject_floats_but_not_large_values() {
    let p = payload(r#"{"a": 7, "b": 7.0, "c": 3000000000, "d": "7", "e": 18446744073709551615}"#);

    assert_eq!(p.integer("a").unwrap(), 7);
    assert_eq!(p.integer("c").unwrap(), 3_000_000_000);
    assert_eq!(p.integer("e").unwrap(), i64::MAX);
    for key in ["b", "d"] {
        assert!(matches!(p.integer(key), Err(AppError::InvalidFormat(_))), "{key}");
    }
}

#[test]
fn strings_must_be_json_strings() {
    let p = payload(r#"{"a": "Paris", "b": 5, "c": ["Paris"]}"#);

    assert_eq!(p.string("a").unwrap(), "Paris");
    assert!(matches!(p.string("b"), Err(AppError::InvalidFormat(_))));
    assert!(matches!(p.string("c"), Err(AppError::InvalidFormat(_))));
}
