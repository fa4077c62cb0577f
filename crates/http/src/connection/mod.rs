//! HTTP connection handling module
//!
//! - [`HttpConnection`]: reads one request, runs the handler, writes the response
//! - [`ResponseWriter`]: buffered, order-checked response output
//!
//! Each connection serves a single request and is then closed; there is no keep-alive
//! and no pipelining.

mod http_connection;
mod response_writer;

pub use http_connection::HttpConnection;
pub use response_writer::ResponseWriter;
