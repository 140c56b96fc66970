use hellohttp::http::mime::ContentType;
use hellohttp::http::request::Version;
use hellohttp::http::response::{Response, ResponseBuilder, StatusCode};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(
        StatusCode::MethodNotAllowed.reason_phrase(),
        "Method Not Allowed"
    );
}

#[test]
fn test_string_response_sets_framing_headers() {
    let response = Response::string(StatusCode::Ok, "Hello, World", Version::HTTP_11, true, None);

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.version, Version::HTTP_11);
    assert_eq!(response.header("Content-Type"), Some(ContentType::TEXT_HTML));
    assert_eq!(response.header("Content-Length"), Some("12"));
    assert_eq!(response.body, b"Hello, World".to_vec());
    assert!(response.keep_alive());
    assert!(!response.need_eof());
}

#[test]
fn test_string_response_counts_bytes_not_chars() {
    let response = Response::string(StatusCode::Ok, "héllo", Version::HTTP_11, true, None);

    assert_eq!(response.header("Content-Length"), Some("6"));
}

#[test]
fn test_string_response_custom_content_type() {
    let response = Response::string(
        StatusCode::Ok,
        "plain",
        Version::HTTP_11,
        true,
        Some(ContentType::TEXT_PLAIN),
    );

    assert_eq!(response.header("content-type"), Some("text/plain"));
}

#[test]
fn test_empty_response_advertises_supplied_length() {
    let response = Response::empty(StatusCode::Ok, "42", Version::HTTP_11, true, None);

    assert!(response.body.is_empty());
    assert_eq!(response.header("Content-Length"), Some("42"));
    assert_eq!(response.header("Content-Type"), Some("text/html"));
    assert!(!response.need_eof());
}

#[test]
fn test_keep_alive_false_on_http11_adds_close() {
    let response = Response::string(StatusCode::Ok, "x", Version::HTTP_11, false, None);

    assert_eq!(response.header("Connection"), Some("close"));
    assert!(!response.keep_alive());
    assert!(response.need_eof());
}

#[test]
fn test_keep_alive_true_on_http10_adds_keep_alive() {
    let response = Response::string(StatusCode::Ok, "x", Version::HTTP_10, true, None);

    assert_eq!(response.header("Connection"), Some("keep-alive"));
    assert!(response.keep_alive());
    assert!(!response.need_eof());
}

#[test]
fn test_http10_without_keep_alive_needs_eof() {
    let response = Response::string(StatusCode::Ok, "x", Version::HTTP_10, false, None);

    assert_eq!(response.header("Connection"), None);
    assert!(response.need_eof());
}

#[test]
fn test_unframed_body_needs_eof() {
    let mut response = ResponseBuilder::new(StatusCode::Ok).body(b"abc".to_vec()).build();
    response.headers.remove("Content-Length");

    assert!(response.keep_alive());
    assert!(response.need_eof());
}

#[test]
fn test_chunked_body_is_framed() {
    let mut response = ResponseBuilder::new(StatusCode::Ok)
        .header("Transfer-Encoding", "chunked")
        .build();
    response.headers.remove("Content-Length");

    assert!(!response.need_eof());
}

#[test]
fn test_set_keep_alive_replaces_connection_header() {
    let mut response = ResponseBuilder::new(StatusCode::Ok)
        .header("Connection", "upgrade")
        .build();

    response.set_keep_alive(false);
    let values: Vec<_> = response.headers.get_all("Connection").collect();
    assert_eq!(values, vec!["close"]);

    response.set_keep_alive(true);
    assert_eq!(response.header("Connection"), None);
}

#[test]
fn test_response_builder_preserves_custom_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.header("Content-Length"), Some("999"));
}

#[test]
fn test_response_builder_empty_body() {
    let response = ResponseBuilder::new(StatusCode::Ok).build();

    assert_eq!(response.body.len(), 0);
    assert_eq!(response.header("Content-Length"), Some("0"));
}
