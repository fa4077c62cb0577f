use std::sync::Arc;

use http::StatusCode;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{error, info, warn};

use crate::connection::ResponseWriter;
use crate::handler::Handler;
use crate::protocol::{HttpError, ParseError, Response};
use crate::reader::RequestReader;

/// Serves exactly one request on one connection.
///
/// `HttpConnection` reads a request with a [`RequestReader`], hands it to a [`Handler`],
/// writes the handler's response and shuts the write side down. There is no keep-alive:
/// anything the peer sends after the request is ignored.
///
/// A request that fails to parse is answered directly with `400 Bad Request` (or
/// `500 Internal Server Error` when the fault is not the peer's) before the parse error
/// is returned.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    reader: R,
    writer: ResponseWriter<W>,
    request_reader: RequestReader,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer: ResponseWriter::new(writer), request_reader: RequestReader::new() }
    }

    /// Uses `request_reader` to configure buffering for this connection.
    pub fn with_request_reader(mut self, request_reader: RequestReader) -> Self {
        self.request_reader = request_reader;
        self
    }

    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler + ?Sized,
    {
        let request = match self.request_reader.read_request_async(&mut self.reader).await {
            Ok(request) => request,
            Err(e) => {
                warn!(cause = %e, "can't parse request");
                let response = error_response(&e);
                if let Err(send_error) = self.send_response(&response).await {
                    error!(cause = %send_error, "can't send parse error response");
                }
                return Err(e.into());
            }
        };

        info!(method = request.method(), target = request.request_target(), "received request");
        let response = handler.call(request).await;

        self.send_response(&response).await?;
        info!(status = response.status().as_u16(), "sent response");
        Ok(())
    }

    async fn send_response(&mut self, response: &Response) -> Result<(), HttpError> {
        self.writer.write_response(response)?;
        self.writer.shutdown().await?;
        Ok(())
    }
}

fn error_response(e: &ParseError) -> Response {
    let status = if e.is_client_error() { StatusCode::BAD_REQUEST } else { StatusCode::INTERNAL_SERVER_ERROR };
    Response::new(status).body(format!("Error parsing request: {e}"))
}
