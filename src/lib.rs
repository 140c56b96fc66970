//! hellohttp - minimal HTTP/1.1 greeting server
//!
//! Core library for request parsing, dispatch and connection handling.

pub mod config;
pub mod diagnostics;
pub mod http;
pub mod server;
