//! Serializes a header block for an outbound response.
//!
//! Every stored value is written as its own `name: value\r\n` line, in insertion order,
//! followed by the blank line that terminates the block.

use bytes::{BufMut, BytesMut};

use crate::protocol::Headers;

/// Initial buffer space reserved before writing a header block
const INIT_HEADER_SIZE: usize = 1024;

#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderEncoder;

impl HeaderEncoder {
    pub fn encode(&mut self, headers: &Headers, dst: &mut BytesMut) {
        dst.reserve(INIT_HEADER_SIZE);

        for (header_name, header_value) in headers {
            dst.put_slice(header_name.as_ref());
            dst.put_slice(b": ");
            dst.put_slice(header_value.as_ref());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
    }
}
