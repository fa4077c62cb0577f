//! HTTP codec module for decoding requests and encoding responses
//!
//! # Architecture
//!
//! - Request handling:
//!   - [`RequestDecoder`]: the phase state machine for one request
//!   - request line tokenizing in `request_line`
//!   - header lines via the [`header`] module
//!   - `Content-Length` bodies via the [`body`] module
//!
//! - Response handling:
//!   - [`ResponseEncoder`]: encodes status line, header block and body in order
//!
//! None of the codecs perform I/O; see [`crate::reader`] for the drivers that pull bytes
//! off a transport and [`crate::connection`] for the response side.

pub mod body;
pub mod header;
mod request_decoder;
mod request_line;
mod response_encoder;

pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;

pub(crate) const CRLF: &[u8] = b"\r\n";

/// Position of the first CRLF in `src`, if any.
#[inline]
pub(crate) fn find_crlf(src: &[u8]) -> Option<usize> {
    src.windows(CRLF.len()).position(|window| window == CRLF)
}
