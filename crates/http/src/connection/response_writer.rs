use bytes::{Bytes, BytesMut};
use http::StatusCode;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::codec::Encoder;

use crate::codec::ResponseEncoder;
use crate::protocol::{Headers, Response, ResponsePart, SendError};

/// Initial capacity of the outgoing buffer
const INIT_BUFFER_SIZE: usize = 4 * 1024;

/// Buffers a response and writes it to the peer in order: status line, headers, body.
///
/// The `write_*` methods only encode into the buffer; nothing reaches the transport
/// until [`flush`](Self::flush).
#[derive(Debug)]
pub struct ResponseWriter<W> {
    writer: W,
    buffer: BytesMut,
    encoder: ResponseEncoder,
}

impl<W> ResponseWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(writer: W) -> Self {
        Self::with_capacity(writer, INIT_BUFFER_SIZE)
    }

    pub fn with_capacity(writer: W, buffer_size: usize) -> Self {
        Self { writer, buffer: BytesMut::with_capacity(buffer_size), encoder: ResponseEncoder::new() }
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn write_status_line(&mut self, status: StatusCode) -> Result<(), SendError> {
        self.encoder.encode(ResponsePart::StatusLine(status), &mut self.buffer)
    }

    pub fn write_headers(&mut self, headers: Headers) -> Result<(), SendError> {
        self.encoder.encode(ResponsePart::Headers(headers), &mut self.buffer)
    }

    pub fn write_body<B: Into<Bytes>>(&mut self, body: B) -> Result<(), SendError> {
        self.encoder.encode(ResponsePart::Body(body.into()), &mut self.buffer)
    }

    /// Writes a whole response, its headers laid over [`default_headers`](crate::protocol::default_headers).
    pub fn write_response(&mut self, response: &Response) -> Result<(), SendError> {
        self.write_status_line(response.status())?;
        self.write_headers(response.wire_headers())?;
        self.write_body(response.body_bytes().clone())
    }

    pub async fn flush(&mut self) -> Result<(), SendError> {
        if !self.buffer.is_empty() {
            self.writer.write_all(self.buffer.as_ref()).await?;
            self.buffer.clear();
        }
        Ok(self.writer.flush().await?)
    }

    /// Flushes and shuts down the write side; the connection carries no further responses.
    pub async fn shutdown(&mut self) -> Result<(), SendError> {
        self.flush().await?;
        Ok(self.writer.shutdown().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use http::header::CONTENT_TYPE;

    #[tokio::test]
    async fn writes_nothing_until_flush() {
        let mut out = Vec::new();
        let mut writer = ResponseWriter::new(&mut out);

        writer.write_status_line(StatusCode::OK).unwrap();
        writer.write_headers(Headers::new()).unwrap();
        assert!(writer.get_mut().is_empty());

        writer.flush().await.unwrap();
        assert_eq!(&out[..], b"HTTP/1.1 200 OK\r\n\r\n");
    }

    #[tokio::test]
    async fn writes_response_with_default_headers() {
        let mut out = Vec::new();
        let mut writer = ResponseWriter::new(&mut out);

        let response = Response::new(StatusCode::NOT_FOUND)
            .header(CONTENT_TYPE, HeaderValue::from_static("text/html"))
            .body("<p>nope</p>");
        writer.write_response(&response).unwrap();
        writer.shutdown().await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.contains("content-length: 11\r\n"));
        assert!(text.contains("connection: close\r\n"));
        assert!(text.contains("content-type: text/html\r\n"));
        assert!(text.ends_with("\r\n\r\n<p>nope</p>"));
    }

    #[tokio::test]
    async fn rejects_body_before_headers() {
        let mut writer = ResponseWriter::new(Vec::new());
        writer.write_status_line(StatusCode::OK).unwrap();

        let err = writer.write_body("too early").unwrap_err();
        assert!(matches!(err, SendError::InvalidWriteOrder { .. }));
    }
}
