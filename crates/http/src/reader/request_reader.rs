use std::io::{ErrorKind, Read};

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, trace};

use crate::codec::RequestDecoder;
use crate::protocol::{ParseError, Request};
use crate::reader::ReadBuffer;

/// Initial read buffer capacity
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Reads exactly one request off a byte stream.
///
/// Each call owns a fresh [`ReadBuffer`] and [`RequestDecoder`] for its whole duration;
/// nothing is shared between calls, so one `RequestReader` can serve any number of
/// connections concurrently.
///
/// # Example
///
/// ```
/// use tcp_http::reader::RequestReader;
///
/// let raw = b"POST /coffee HTTP/1.1\r\nContent-Length: 4\r\n\r\nmilk";
/// let request = RequestReader::with_capacity(8).read_request(&raw[..]).unwrap();
///
/// assert_eq!(request.request_target(), "/coffee");
/// assert_eq!(&request.body()[..], b"milk");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequestReader {
    initial_capacity: usize,
    max_buffer_size: Option<usize>,
}

impl RequestReader {
    pub fn new() -> Self {
        Default::default()
    }

    /// Starts every read buffer at `initial_capacity` bytes.
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self { initial_capacity, max_buffer_size: None }
    }

    /// Fails the read with [`ParseError::BufferLimitExceeded`] instead of growing the buffer
    /// past `max_buffer_size` bytes.
    pub fn max_buffer_size(mut self, max_buffer_size: usize) -> Self {
        self.max_buffer_size = Some(max_buffer_size);
        self
    }

    /// Reads from a blocking stream until one request is complete.
    ///
    /// Bytes buffered past the end of the request are dropped along with the buffer.
    ///
    /// # Errors
    ///
    /// - any [`ParseError`] raised while decoding
    /// - [`ParseError::IncompleteRequest`] if the stream ends first
    /// - [`ParseError::Io`] carrying the stream's own error otherwise
    pub fn read_request<R: Read>(&self, mut reader: R) -> Result<Request, ParseError> {
        let mut buffer = self.new_buffer();
        let mut decoder = RequestDecoder::new();

        loop {
            let read = match reader.read(buffer.unfilled_mut()?) {
                Ok(read) => read,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            decoder = match feed(decoder, &mut buffer, read)?.try_into_request() {
                Ok(request) => return Ok(finish(request, &buffer)),
                Err(decoder) => decoder,
            };
        }
    }

    /// Reads from an async stream until one request is complete.
    ///
    /// Same contract as [`read_request`](Self::read_request).
    pub async fn read_request_async<R: AsyncRead + Unpin>(&self, mut reader: R) -> Result<Request, ParseError> {
        let mut buffer = self.new_buffer();
        let mut decoder = RequestDecoder::new();

        loop {
            let read = reader.read(buffer.unfilled_mut()?).await?;

            decoder = match feed(decoder, &mut buffer, read)?.try_into_request() {
                Ok(request) => return Ok(finish(request, &buffer)),
                Err(decoder) => decoder,
            };
        }
    }

    fn new_buffer(&self) -> ReadBuffer {
        ReadBuffer::new(self.initial_capacity, self.max_buffer_size)
    }
}

impl Default for RequestReader {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE)
    }
}

/// Reads one request from a blocking stream with the default configuration.
pub fn request_from_reader<R: Read>(reader: R) -> Result<Request, ParseError> {
    RequestReader::new().read_request(reader)
}

/// Accounts for `read` new bytes and runs the decoder over everything unconsumed.
///
/// A zero-byte read is end of stream, which is only reached while the request is unfinished.
fn feed(decoder: RequestDecoder, buffer: &mut ReadBuffer, read: usize) -> Result<RequestDecoder, ParseError> {
    if read == 0 {
        debug!(phase = %decoder.phase(), bytes_read = buffer.total_read(), "stream ended before request was complete");
        return Err(ParseError::incomplete(decoder.phase(), buffer.total_read()));
    }

    buffer.advance(read);
    let (decoder, consumed) = decoder.decode(buffer.filled())?;
    buffer.consume(consumed);
    trace!(read, consumed, buffered = buffer.filled().len(), phase = %decoder.phase(), "parse pass");

    Ok(decoder)
}

fn finish(request: Request, buffer: &ReadBuffer) -> Request {
    debug!(
        method = request.method(),
        target = request.request_target(),
        bytes_read = buffer.total_read(),
        capacity = buffer.capacity(),
        "request parsed"
    );
    request
}
