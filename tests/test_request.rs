use hellohttp::http::headers::Headers;
use hellohttp::http::request::{Method, Request, RequestBuilder, Version};

fn request(version: Version, headers: &[(&str, &str)]) -> Request {
    Request {
        method: Method::GET,
        path: "/".to_string(),
        version,
        headers: headers.iter().copied().collect::<Headers>(),
        body: vec![],
    }
}

#[test]
fn test_request_header_retrieval_is_case_insensitive() {
    let req = request(
        Version::HTTP_11,
        &[("Host", "example.com"), ("Content-Type", "application/json")],
    );

    assert_eq!(req.header("host"), Some("example.com"));
    assert_eq!(req.header("CONTENT-TYPE"), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_keep_alive_http11_default() {
    assert!(request(Version::HTTP_11, &[]).keep_alive());
}

#[test]
fn test_request_keep_alive_http11_close() {
    assert!(!request(Version::HTTP_11, &[("Connection", "close")]).keep_alive());
    assert!(!request(Version::HTTP_11, &[("Connection", "Upgrade, Close")]).keep_alive());
}

#[test]
fn test_request_keep_alive_http10_default_closes() {
    assert!(!request(Version::HTTP_10, &[]).keep_alive());
}

#[test]
fn test_request_keep_alive_http10_opt_in() {
    assert!(request(Version::HTTP_10, &[("Connection", "Keep-Alive")]).keep_alive());
}

#[test]
fn test_request_method_from_string() {
    assert_eq!(Method::parse("GET"), Method::GET);
    assert_eq!(Method::parse("HEAD"), Method::HEAD);
    assert_eq!(Method::parse("POST"), Method::POST);
    assert_eq!(Method::parse("get"), Method::Other("get".to_string()));
    assert_eq!(Method::parse("PURGE").as_str(), "PURGE");
}

#[test]
fn test_version_parse_and_display() {
    assert_eq!(Version::parse("HTTP/1.1"), Some(Version::HTTP_11));
    assert_eq!(Version::parse("HTTP/1.0"), Some(Version::HTTP_10));
    assert_eq!(Version::parse("HTTP/2.0"), Some(Version(20)));
    assert_eq!(Version::parse("HTTP/1.10"), None);
    assert_eq!(Version::parse("http/1.1"), None);
    assert_eq!(Version::HTTP_10.to_string(), "HTTP/1.0");
}

#[test]
fn test_request_builder() {
    let req = RequestBuilder::new()
        .method(Method::HEAD)
        .path("/index")
        .header("Content-Length", "7")
        .build()
        .unwrap();

    assert_eq!(req.version, Version::HTTP_11);
    assert_eq!(req.header("content-length"), Some("7"));
    assert!(RequestBuilder::new().path("/").build().is_err());
}
