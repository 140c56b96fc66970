use crate::http::headers::Headers;
use crate::http::mime::ContentType;
use crate::http::request::Version;

/// Status codes the server sends: 200 for greetings and HEAD replies, 405
/// for every other method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 405 Method Not Allowed
    MethodNotAllowed,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use hellohttp::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::MethodNotAllowed => 405,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
        }
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// The keep-alive flag lives in the `Connection` header, the same way it
/// travels on the wire; use [`Response::keep_alive`] and
/// [`Response::set_keep_alive`] rather than editing that header directly.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Protocol version, copied from the request being answered
    pub version: Version,
    /// HTTP headers in serialization order
    pub headers: Headers,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use hellohttp::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/plain")
///     .body(b"hi".to_vec())
///     .build();
/// assert_eq!(response.headers.get("Content-Length"), Some("2"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    version: Version,
    keep_alive: bool,
    headers: Headers,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new HTTP/1.1 keep-alive response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            version: Version::HTTP_11,
            keep_alive: true,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn keep_alive(mut self, keep_alive: bool) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(key, value);
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// Adds a Content-Length header matching the body size unless one was set
    /// explicitly, then applies the keep-alive flag.
    pub fn build(mut self) -> Response {
        if !self.headers.contains("Content-Length") {
            self.headers.append("Content-Length", self.body.len().to_string());
        }

        let mut response = Response {
            status: self.status,
            version: self.version,
            headers: self.headers,
            body: self.body,
        };
        response.set_keep_alive(self.keep_alive);
        response
    }
}

impl Response {
    /// Creates a response carrying `body`, with Content-Length equal to its byte length.
    ///
    /// `content_type` defaults to [`ContentType::TEXT_HTML`].
    pub fn string(
        status: StatusCode,
        body: impl Into<String>,
        version: Version,
        keep_alive: bool,
        content_type: Option<&str>,
    ) -> Self {
        let body = body.into().into_bytes();
        // build() derives Content-Length from the body
        ResponseBuilder::new(status)
            .version(version)
            .keep_alive(keep_alive)
            .header("Content-Type", content_type.unwrap_or(ContentType::TEXT_HTML))
            .body(body)
            .build()
    }

    /// Creates a response without body bytes that still advertises
    /// `content_length`, written to the header verbatim.
    ///
    /// Used for HEAD replies, which describe a body they do not send.
    pub fn empty(
        status: StatusCode,
        content_length: &str,
        version: Version,
        keep_alive: bool,
        content_type: Option<&str>,
    ) -> Self {
        ResponseBuilder::new(status)
            .version(version)
            .keep_alive(keep_alive)
            .header("Content-Type", content_type.unwrap_or(ContentType::TEXT_HTML))
            .header("Content-Length", content_length)
            .build()
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// Whether the connection stays open after this response, judged from
    /// the version and `Connection` header.
    pub fn keep_alive(&self) -> bool {
        crate::http::request::keep_alive(self.version, &self.headers)
    }

    /// Rewrites the `Connection` header so that [`Response::keep_alive`]
    /// returns `keep_alive`.
    ///
    /// HTTP/1.1 only needs `close` to opt out; HTTP/1.0 needs `keep-alive`
    /// to opt in.
    pub fn set_keep_alive(&mut self, keep_alive: bool) {
        self.headers.remove("Connection");
        if self.version >= Version::HTTP_11 {
            if !keep_alive {
                self.headers.append("Connection", "close");
            }
        } else if keep_alive {
            self.headers.append("Connection", "keep-alive");
        }
    }

    /// Whether the server has to close the connection after sending this response.
    ///
    /// That is the case when the client asked for it, or when the body has no
    /// length the client could frame it by and end-of-stream is the only
    /// terminator.
    pub fn need_eof(&self) -> bool {
        let framed = self.headers.contains("Content-Length")
            || self.headers.has_token("Transfer-Encoding", "chunked");
        !framed || !self.keep_alive()
    }
}
