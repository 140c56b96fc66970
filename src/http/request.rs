use std::fmt;

use crate::http::headers::Headers;

/// HTTP request methods.
///
/// The server answers GET and HEAD. Every other method is still a valid
/// request and is answered with 405 Method Not Allowed, so unknown tokens are
/// kept in `Other` instead of failing the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// Any other method token, stored as sent
    Other(String),
}

impl Method {
    /// Parses an HTTP method token.
    ///
    /// Method names are case-sensitive, so `get` ends up in `Other`.
    ///
    /// # Example
    ///
    /// ```
    /// # use hellohttp::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::GET);
    /// assert_eq!(Method::parse("get"), Method::Other("get".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Other(other) => other,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Protocol version encoded as `major * 10 + minor`, so HTTP/1.1 is 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version(pub u8);

impl Version {
    pub const HTTP_10: Version = Version(10);
    pub const HTTP_11: Version = Version(11);

    /// Parses `HTTP/x.y` with single-digit major and minor numbers.
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.strip_prefix("HTTP/")?.as_bytes();
        match digits {
            [major @ b'0'..=b'9', b'.', minor @ b'0'..=b'9'] => {
                Some(Version((major - b'0') * 10 + (minor - b'0')))
            }
            _ => None,
        }
    }

    pub fn major(self) -> u8 {
        self.0 / 10
    }

    pub fn minor(self) -> u8 {
        self.0 % 10
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::HTTP_11
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP/{}.{}", self.major(), self.minor())
    }
}

/// Represents a parsed HTTP request from a client.
///
/// Built once by the parser and never modified afterwards.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, HEAD, etc.)
    pub method: Method,
    /// The request target as sent (e.g., "/World")
    pub path: String,
    /// Protocol version of the request line
    pub version: Version,
    /// Request headers in the order they were received
    pub headers: Headers,
    /// Request body, empty unless Content-Length was sent
    pub body: Vec<u8>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Version,
    headers: Headers,
    body: Vec<u8>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            version: Version::default(),
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(key, value);
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            path: self.path.ok_or("path missing")?,
            version: self.version,
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Retrieves the first header value by name, ignoring ASCII case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// Determines whether the connection should remain open after the response.
    ///
    /// HTTP/1.1 keeps the connection open unless `Connection` lists `close`.
    /// HTTP/1.0 closes it unless `Connection` lists `keep-alive`.
    pub fn keep_alive(&self) -> bool {
        keep_alive(self.version, &self.headers)
    }
}

pub(crate) fn keep_alive(version: Version, headers: &Headers) -> bool {
    if version >= Version::HTTP_11 {
        !headers.has_token("Connection", "close")
    } else {
        headers.has_token("Connection", "keep-alive")
    }
}
