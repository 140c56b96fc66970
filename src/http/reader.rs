use std::io;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::parser::{
    Limits, ParseError, leading_empty_lines, parse_http_request_with_limits,
};
use crate::http::request::Request;

/// Why a request could not be read. The connection is unusable afterwards.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("Failed to read request: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to read request: {0}")]
    Parse(#[from] ParseError),
    #[error("Failed to read request: stream ended after {0} bytes of a request")]
    PartialMessage(usize),
}

/// Reads exactly one request from `stream`.
///
/// `buf` must be the same buffer for every call on a connection: bytes read
/// past the end of one request stay in it and start the next one.
///
/// Returns `Ok(None)` when the peer closes the stream before sending any byte
/// of a new request, which is how a keep-alive session normally ends.
pub async fn read_request<S>(
    stream: &mut S,
    buf: &mut BytesMut,
    limits: &Limits,
) -> Result<Option<Request>, ReadError>
where
    S: AsyncRead + Unpin,
{
    loop {
        // Empty lines before a request are dropped, so they neither count
        // as a partial request at EOF nor pile up in the buffer
        let skipped = leading_empty_lines(buf);
        buf.advance(skipped);

        // Try parsing whatever we already have
        if !buf.is_empty() {
            match parse_http_request_with_limits(buf, limits) {
                Ok((request, consumed)) => {
                    buf.advance(consumed);
                    return Ok(Some(request));
                }
                Err(ParseError::Incomplete) => {}
                Err(e) => return Err(e.into()),
            }
        }

        if buf.capacity() - buf.len() < 1024 {
            buf.reserve(4096);
        }

        let n = stream.read_buf(buf).await?;
        if n == 0 {
            if buf.is_empty() {
                return Ok(None);
            }
            return Err(ReadError::PartialMessage(buf.len()));
        }
    }
}
