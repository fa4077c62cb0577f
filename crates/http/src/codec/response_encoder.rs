use std::io;
use std::io::Write;

use bytes::{BufMut, BytesMut};
use http::StatusCode;
use tokio_util::codec::Encoder;
use tracing::error;

use crate::codec::header::HeaderEncoder;
use crate::protocol::{ResponsePart, SendError};

/// Which part of the response the encoder accepts next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum WriterState {
    #[default]
    StatusLine,
    Headers,
    Body,
}

impl WriterState {
    fn expected(self) -> &'static str {
        match self {
            WriterState::StatusLine => "status line",
            WriterState::Headers => "headers",
            WriterState::Body => "body",
        }
    }
}

/// Encodes the parts of one response, refusing them out of order.
///
/// The status line must come first, then exactly one header block, then any number of
/// body chunks.
#[derive(Debug, Default)]
pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
    state: WriterState,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Encoder<ResponsePart> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: ResponsePart, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match (self.state, item) {
            (WriterState::StatusLine, ResponsePart::StatusLine(status)) => {
                encode_status_line(status, dst)?;
                self.state = WriterState::Headers;
                Ok(())
            }

            (WriterState::Headers, ResponsePart::Headers(headers)) => {
                self.header_encoder.encode(&headers, dst);
                self.state = WriterState::Body;
                Ok(())
            }

            (WriterState::Body, ResponsePart::Body(body)) => {
                dst.extend_from_slice(&body);
                Ok(())
            }

            (state, item) => {
                error!(expected = state.expected(), actual = item.name(), "response parts written out of order");
                Err(SendError::invalid_write_order(state.expected(), item.name()))
            }
        }
    }
}

fn encode_status_line(status: StatusCode, dst: &mut BytesMut) -> Result<(), SendError> {
    write!(FastWrite(dst), "HTTP/1.1 {} {}\r\n", status.as_str(), status.canonical_reason().unwrap_or(""))?;
    Ok(())
}

/// Adapter so `write!` can format straight into a `BytesMut`.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
