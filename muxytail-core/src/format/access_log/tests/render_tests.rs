use crate::format::access_log::render::*;
use chrono::Utc;
use pretty_assertions::assert_eq;

#[test]
fn status_buckets() {
    let cases = [
        (-1, StatusClass::Other),
        (0, StatusClass::Other),
        (101, StatusClass::Other),
        (199, StatusClass::Other),
        (200, StatusClass::Ok),
        (204, StatusClass::Ok),
        (299, StatusClass::Ok),
        (300, StatusClass::Other),
        (304, StatusClass::Other),
        (399, StatusClass::Other),
        (400, StatusClass::Error),
        (404, StatusClass::Error),
        (503, StatusClass::Error),
        (999, StatusClass::Error),
        (70000, StatusClass::Error),
    ];

    for (status, expected) in cases {
        assert_eq!(classify_status(status), expected, "status {status}");
    }
}

#[test]
fn major_version() {
    assert_eq!(major(""), "");
    assert_eq!(major("1"), "1");
    assert_eq!(major("1.2"), "1");
    assert_eq!(major("1.2.3"), "1");
    assert_eq!(major("10.20.30"), "10");
    assert_eq!(major(".5"), "");
}

#[test]
fn longest_value() {
    let s = |v: &[&str]| v.iter().map(|x| x.to_string()).collect::<Vec<_>>();

    assert_eq!(longest(&[]), "");
    assert_eq!(longest(&s(&["one"])), "one");
    assert_eq!(longest(&s(&["a", "bb", "c"])), "bb");
    assert_eq!(longest(&s(&["short", "longer", "longest"])), "longest");
    assert_eq!(longest(&s(&["same", "size", "test"])), "same");
    assert_eq!(longest(&s(&["", "non-empty", ""])), "non-empty");
}

#[test]
fn timestamp_in_utc() {
    assert_eq!(format_timestamp(1696156800.0, &Utc), "1/Oct 10:40:00");
    assert_eq!(format_timestamp(0.0, &Utc), "1/Jan 00:00:00");
}

#[test]
fn timestamp_truncates_fraction() {
    assert_eq!(format_timestamp(1696156800.999, &Utc), "1/Oct 10:40:00");
}

#[test]
fn unrepresentable_timestamp_is_empty() {
    assert_eq!(format_timestamp(f64::NAN, &Utc), "");
    assert_eq!(format_timestamp(f64::INFINITY, &Utc), "");
    assert_eq!(format_timestamp(1e300, &Utc), "");
}

#[test]
fn whitespace_runs_collapse() {
    assert_eq!(collapse_whitespace("a  b\t\tc \n d"), "a b c d");
    assert_eq!(collapse_whitespace("  lead"), " lead");
    assert_eq!(collapse_whitespace("none"), "none");
    assert_eq!(collapse_whitespace(""), "");
}
