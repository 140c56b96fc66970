//! HTTP protocol implementation.
//!
//! This module implements a small HTTP/1.1 server with support for keep-alive connections.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The per-connection state machine driving read, dispatch and write
//! - **`reader`**: Pulls one request at a time off a stream, telling clean EOF apart from errors
//! - **`parser`**: Parses HTTP requests out of byte buffers
//! - **`handler`**: Maps a request to its response by method
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation and constructors
//! - **`headers`**: Ordered, case-insensitive header collection
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: Content-Type constants
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Request received          (EOF or read error → Closing)
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← Generate response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ need_eof → Closing (half-close the outbound side)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use hellohttp::diagnostics::TracingDiagnostics;
//! use hellohttp::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         tokio::spawn(async move {
//!             Connection::new(socket, Arc::new(TracingDiagnostics)).run().await;
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod handler;
pub mod headers;
pub mod mime;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;
