use crate::format::access_log::{AccessLogRecord, HeaderValues, RequestHeaders, RequestRecord};
use pretty_assertions::assert_eq;

#[test]
fn empty_object_decodes_to_defaults() {
    let record = AccessLogRecord::decode("{}").unwrap();

    assert_eq!(record, AccessLogRecord::default());
}

#[test]
fn minimal_status_record() {
    let record = AccessLogRecord::decode(r#"{"status":200}"#).unwrap();

    assert_eq!(record.status, 200);
    assert_eq!(record.ts, 0.0);
    assert_eq!(record.request.remote_ip, "");
}

#[test]
fn full_caddy_record() {
    // Arrange
    let line = r#"{"level":"info","ts":1696156800.123,"logger":"http.log.access","msg":"handled request","request":{"remote_ip":"127.0.0.1","remote_port":"5555","proto":"HTTP/1.1","method":"GET","host":"x.com","uri":"/a","headers":{"Referer":["http://r.com"],"User-Agent":["curl/8.0"],"Accept":["*/*"]}},"status":404,"size":12}"#;

    // Act
    let record = AccessLogRecord::decode(line).unwrap();

    // Assert
    assert_eq!(record.status, 404);
    assert_eq!(record.ts, 1696156800.123);
    assert_eq!(record.request.remote_ip, "127.0.0.1");
    assert_eq!(record.request.method, "GET");
    assert_eq!(record.request.proto, "HTTP/1.1");
    assert_eq!(record.url(), "x.com/a");
    assert_eq!(
        record.request.headers.referer,
        HeaderValues::Many(vec!["http://r.com".to_string()])
    );
    assert_eq!(
        record.request.headers.user_agent.as_slice(),
        &["curl/8.0".to_string()]
    );
}

#[test]
fn single_string_headers() {
    let line = r#"{"request":{"headers":{"Referer":"http://r.com","User-Agent":"curl/8.0"}}}"#;

    let record = AccessLogRecord::decode(line).unwrap();

    assert_eq!(
        record.request.headers.referer,
        HeaderValues::One("http://r.com".to_string())
    );
    assert_eq!(
        record.request.headers.user_agent.as_slice(),
        &["curl/8.0".to_string()]
    );
}

#[test]
fn missing_headers_are_empty() {
    let record = AccessLogRecord::decode(r#"{"request":{"uri":"/"}}"#).unwrap();

    assert!(record.request.headers.referer.as_slice().is_empty());
    assert!(record.request.headers.user_agent.as_slice().is_empty());
}

#[test]
fn statuses_outside_http_range_decode() {
    let negative = AccessLogRecord::decode(r#"{"status":-1}"#).unwrap();
    let large = AccessLogRecord::decode(r#"{"status":70000}"#).unwrap();

    assert_eq!(negative.status, -1);
    assert_eq!(large.status, 70000);
}

#[test]
fn null_fields_read_as_absent() {
    // Arrange
    let null_request = r#"{"request":null,"status":200}"#;
    let null_headers = r#"{"request":{"host":"x.com","uri":null,"headers":null},"status":null,"ts":null}"#;

    // Act
    let first = AccessLogRecord::decode(null_request).unwrap();
    let second = AccessLogRecord::decode(null_headers).unwrap();

    // Assert
    assert_eq!(first.request, RequestRecord::default());
    assert_eq!(first.status, 200);
    assert_eq!(second.request.host, "x.com");
    assert_eq!(second.request.uri, "");
    assert_eq!(second.request.headers, RequestHeaders::default());
    assert_eq!(second.status, 0);
    assert_eq!(second.ts, 0.0);
}

#[test]
fn textual_status_fails() {
    assert!(AccessLogRecord::decode(r#"{"status":"OK"}"#).is_err());
}

#[test]
fn non_json_fails() {
    assert!(AccessLogRecord::decode("hello world").is_err());
    assert!(AccessLogRecord::decode("{not json").is_err());
    assert!(AccessLogRecord::decode("").is_err());
}

#[test]
fn non_object_json_fails() {
    assert!(AccessLogRecord::decode("[]").is_err());
    assert!(AccessLogRecord::decode("[200, 1.0]").is_err());
    assert!(AccessLogRecord::decode("null").is_err());
    assert!(AccessLogRecord::decode("42").is_err());
    assert!(AccessLogRecord::decode(r#""{}""#).is_err());
}

#[test]
fn leading_whitespace_is_accepted() {
    assert!(AccessLogRecord::decode("  {\"status\":301}").is_ok());
}
