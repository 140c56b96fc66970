use serde::Deserialize;

use crate::http::headers::Headers;
use crate::http::request::{Method, Request, Version};

const HEADERS_END: &[u8] = b"\r\n\r\n";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("need more data")]
    Incomplete,
    #[error("bad request line")]
    InvalidRequest,
    #[error("bad method")]
    InvalidMethod,
    #[error("bad version")]
    InvalidVersion,
    #[error("bad header")]
    InvalidHeader,
    #[error("bad Content-Length")]
    InvalidContentLength,
    #[error("unsupported Transfer-Encoding")]
    UnsupportedTransferEncoding,
    #[error("header limit exceeded")]
    HeaderTooLarge,
    #[error("body limit exceeded")]
    BodyTooLarge,
}

/// Size limits applied while parsing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Largest accepted request line plus header block, terminator included
    pub max_header_bytes: usize,
    /// Largest accepted Content-Length
    pub max_body_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_header_bytes: 8 * 1024,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Parses one request from the front of `buf` using the default [`Limits`].
///
/// On success returns the request and the number of bytes it occupied;
/// anything after that belongs to the next request.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    parse_http_request_with_limits(buf, &Limits::default())
}

pub fn parse_http_request_with_limits(
    buf: &[u8],
    limits: &Limits,
) -> Result<(Request, usize), ParseError> {
    // Stray CRLFs between requests are ignored
    let skipped = leading_empty_lines(buf);
    let buf = &buf[skipped..];

    // Look for header/body separator
    let headers_end = match find_headers_end(buf) {
        Some(pos) => pos,
        None if buf.len() >= limits.max_header_bytes => return Err(ParseError::HeaderTooLarge),
        None => return Err(ParseError::Incomplete),
    };
    if headers_end + HEADERS_END.len() > limits.max_header_bytes {
        return Err(ParseError::HeaderTooLarge);
    }

    let header_bytes = &buf[..headers_end];
    let body_bytes = &buf[headers_end + HEADERS_END.len()..];

    let mut lines = header_bytes
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line));

    // Request line
    let request_line = lines.next().ok_or(ParseError::InvalidRequest)?;
    let request_line = std::str::from_utf8(request_line)
        .map_err(|_| ParseError::InvalidRequest)?;
    let (method, path, version) = split_request_line(request_line)?;

    if !is_token(method) {
        return Err(ParseError::InvalidMethod);
    }
    let method = Method::parse(method);
    let version = Version::parse(version).ok_or(ParseError::InvalidVersion)?;

    // Headers; values may carry obs-text, which is decoded lossily
    let mut headers = Headers::new();
    for line in lines {
        let colon = line
            .iter()
            .position(|&b| b == b':')
            .ok_or(ParseError::InvalidHeader)?;

        let key = std::str::from_utf8(&line[..colon])
            .ok()
            .filter(|key| is_token(key))
            .ok_or(ParseError::InvalidHeader)?;
        let value = String::from_utf8_lossy(line[colon + 1..].trim_ascii());
        headers.append(key, value);
    }

    if headers.contains("Transfer-Encoding") {
        return Err(ParseError::UnsupportedTransferEncoding);
    }

    // Body
    let content_length = content_length(&headers)?;
    if content_length > limits.max_body_bytes {
        return Err(ParseError::BodyTooLarge);
    }
    if body_bytes.len() < content_length {
        return Err(ParseError::Incomplete);
    }

    let request = Request {
        method,
        path: path.to_string(),
        version,
        headers,
        body: body_bytes[..content_length].to_vec(),
    };

    let total_consumed = skipped + headers_end + HEADERS_END.len() + content_length;
    Ok((request, total_consumed))
}

/// Length of the run of `\r\n` pairs at the front of `buf`.
pub(crate) fn leading_empty_lines(buf: &[u8]) -> usize {
    buf.chunks_exact(2).take_while(|pair| *pair == b"\r\n").count() * 2
}

fn split_request_line(line: &str) -> Result<(&str, &str, &str), ParseError> {
    let mut parts = line.split(' ');
    let (Some(method), Some(path), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ParseError::InvalidRequest);
    };
    if path.is_empty() {
        return Err(ParseError::InvalidRequest);
    }
    Ok((method, path, version))
}

/// Every Content-Length field has to agree; a missing one means no body.
///
/// Values must be plain digits, since HEAD replies pass them on verbatim.
fn content_length(headers: &Headers) -> Result<usize, ParseError> {
    let mut length = None;
    for value in headers.get_all("Content-Length") {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidContentLength);
        }
        let parsed = value
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidContentLength)?;
        if length.is_some_and(|l| l != parsed) {
            return Err(ParseError::InvalidContentLength);
        }
        length = Some(parsed);
    }
    Ok(length.unwrap_or(0))
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADERS_END.len())
        .position(|w| w == HEADERS_END)
}
