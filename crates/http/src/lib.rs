//! An incremental HTTP/1.1 request parser for stream sockets
//!
//! Bytes arrive from a socket in arbitrarily sized pieces. This crate accumulates them in a
//! growable buffer and feeds them to a resumable decoder that walks a request through
//! request line, headers and body, producing a [`protocol::Request`] once the body matches
//! its declared `Content-Length`. Parsing is strict: the method must be uppercase ASCII,
//! the version must be exactly `HTTP/1.1` and header names are validated as RFC 9110 tokens.
//!
//! # Example
//!
//! ```
//! use tcp_http::reader::request_from_reader;
//!
//! let raw = b"GET /coffee HTTP/1.1\r\nHost: localhost:42069\r\nUser-Agent: curl/7.81.0\r\n\r\n";
//! let request = request_from_reader(&raw[..]).unwrap();
//!
//! assert_eq!(request.method(), "GET");
//! assert_eq!(request.request_target(), "/coffee");
//! assert_eq!(request.headers().get("host").as_deref(), Some("localhost:42069"));
//! assert!(request.body().is_empty());
//! ```
//!
//! # Architecture
//!
//! - [`reader`]: drives a decoder from a blocking or async byte stream
//! - [`codec`]: the request decoder state machine and the response encoder
//! - [`protocol`]: request, response, header and error types
//! - [`connection`]: one-request-per-connection serving over async streams
//! - [`handler`]: request handler trait and utilities
//!
//! ## Error Handling
//!
//! - [`protocol::HttpError`]: Top-level error type
//! - [`protocol::ParseError`]: Request parsing errors
//! - [`protocol::SendError`]: Response sending errors
//!
//! # Limitations
//!
//! - HTTP/1.1 only, and only bodies framed by `Content-Length` (no chunked encoding)
//! - One request per connection; no keep-alive or pipelining
//! - No TLS support

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;
pub mod reader;

mod utils;
pub(crate) use utils::ensure;
