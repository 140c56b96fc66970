use std::sync::Arc;

use anyhow::Context;
use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::diagnostics::Diagnostics;
use crate::http::handler::handle_request;
use crate::http::parser::Limits;
use crate::http::reader::read_request;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// Turns one request into one response.
pub type RequestHandler = fn(Request) -> Response;

/// Serves every request sent on one stream, then half-closes it.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    handler: RequestHandler,
    limits: Limits,
    diagnostics: Arc<dyn Diagnostics>,
    served: usize,
}

pub enum ConnectionState {
    Reading,
    Dispatching(Request),
    Writing(ResponseWriter, bool), // bool = need_eof?
    Closing,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
            handler: handle_request,
            limits: Limits::default(),
            diagnostics,
            served: 0,
        }
    }

    pub fn with_handler(mut self, handler: RequestHandler) -> Self {
        self.handler = handler;
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Runs the connection to completion and returns how many responses were sent.
    ///
    /// Never fails: read and write errors are reported to the diagnostic sink
    /// and end this connection only. The outbound half is shut down on every
    /// exit path so the peer sees end-of-stream.
    pub async fn run(mut self) -> usize {
        match self.drive().await {
            Ok(()) => self.diagnostics.connection_closed(self.served),
            Err(e) => self.diagnostics.connection_error(&e),
        }

        // best effort, the peer may already be gone
        let _ = self.stream.shutdown().await;
        self.served
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            // Any early return through `?` leaves the state at Closing
            match std::mem::replace(&mut self.state, ConnectionState::Closing) {
                ConnectionState::Reading => {
                    match read_request(&mut self.stream, &mut self.buffer, &self.limits).await? {
                        Some(req) => {
                            self.state = ConnectionState::Dispatching(req);
                        }
                        None => {
                            self.state = ConnectionState::Closing;
                        }
                    }
                }

                ConnectionState::Dispatching(req) => {
                    self.diagnostics.request(&req);
                    let response = (self.handler)(req);

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer, response.need_eof());
                }

                ConnectionState::Writing(mut writer, need_eof) => {
                    writer
                        .write_to_stream(&mut self.stream)
                        .await
                        .context("Failed to write response")?;
                    self.served += 1;

                    if need_eof {
                        self.state = ConnectionState::Closing;
                    } else {
                        self.state = ConnectionState::Reading; // go back for next request
                    }
                }

                ConnectionState::Closing => {
                    break;
                }
            }
        }

        Ok(())
    }
}
