use std::future::Future;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

use tcp_http::connection::HttpConnection;
use tcp_http::handler::Handler;
use tcp_http::reader::RequestReader;
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info, warn};

/// Largest read buffer a connection may grow to before its request is rejected
const DEFAULT_MAX_BUFFER_SIZE: usize = 1024 * 1024;

pub struct ServerBuilder {
    address: Option<io::Result<Vec<SocketAddr>>>,
    handler: Option<Arc<dyn Handler>>,
    reader: RequestReader,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { address: None, handler: None, reader: RequestReader::new().max_buffer_size(DEFAULT_MAX_BUFFER_SIZE) }
    }

    pub fn address<A: ToSocketAddrs>(mut self, address: A) -> Self {
        self.address = Some(address.to_socket_addrs().map(Iterator::collect));
        self
    }

    pub fn handler(mut self, handler: impl Handler + 'static) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Replaces the request reader used on every connection.
    pub fn reader(mut self, reader: RequestReader) -> Self {
        self.reader = reader;
        self
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        let address = self.address.ok_or(ServerBuildError::MissingAddress)?.map_err(ServerBuildError::invalid_address)?;
        let handler = self.handler.ok_or(ServerBuildError::MissingHandler)?;
        Ok(Server { address, handler, reader: self.reader })
    }
}

impl std::fmt::Debug for ServerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerBuilder")
            .field("address", &self.address)
            .field("handler", &self.handler.is_some())
            .field("reader", &self.reader)
            .finish()
    }
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("address must be set")]
    MissingAddress,
    #[error("handler must be set")]
    MissingHandler,
    #[error("can't resolve address: {source}")]
    InvalidAddress { source: io::Error },
}

impl ServerBuildError {
    fn invalid_address(source: io::Error) -> Self {
        Self::InvalidAddress { source }
    }
}

pub struct Server {
    address: Vec<SocketAddr>,
    handler: Arc<dyn Handler>,
    reader: RequestReader,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Binds the listening socket. Connections are not accepted until
    /// [`Listening::serve_until`] runs.
    pub async fn listen(self) -> io::Result<Listening> {
        let listener = match TcpListener::bind(self.address.as_slice()).await {
            Ok(listener) => listener,
            Err(e) => {
                error!(cause = %e, address = ?self.address, "bind server error");
                return Err(e);
            }
        };

        info!(address = %listener.local_addr()?, "start listening");
        Ok(Listening { listener, handler: self.handler, reader: self.reader })
    }
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server").field("address", &self.address).field("reader", &self.reader).finish_non_exhaustive()
    }
}

/// A bound server, ready to accept connections.
pub struct Listening {
    listener: TcpListener,
    handler: Arc<dyn Handler>,
    reader: RequestReader,
}

impl Listening {
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until `shutdown` resolves.
    ///
    /// Connections already being served keep running on their own tasks; only the accept
    /// loop stops. Accept errors are logged and the loop carries on.
    pub async fn serve_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let (tcp_stream, remote_addr) = tokio::select! {
                () = &mut shutdown => {
                    info!("shutdown requested, stop accepting");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok(stream_and_addr) => stream_and_addr,
                    Err(e) => {
                        warn!(cause = %e, "failed to accept");
                        continue;
                    }
                },
            };

            info!(%remote_addr, "accepted connection");
            tokio::spawn(serve_connection(tcp_stream, remote_addr, Arc::clone(&self.handler), self.reader));
        }
    }
}

impl std::fmt::Debug for Listening {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listening").field("listener", &self.listener).field("reader", &self.reader).finish_non_exhaustive()
    }
}

async fn serve_connection(tcp_stream: TcpStream, remote_addr: SocketAddr, handler: Arc<dyn Handler>, reader: RequestReader) {
    let (reader_half, writer_half) = tcp_stream.into_split();
    let connection = HttpConnection::new(reader_half, writer_half).with_request_reader(reader);
    match connection.process(handler).await {
        Ok(()) => {
            info!(%remote_addr, "finished process, connection shutdown");
        }
        Err(e) => {
            error!(%remote_addr, cause = %e, "service has error, connection shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use indoc::indoc;
    use tcp_http::handler::make_handler;
    use tcp_http::protocol::{Request, Response};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::sync::oneshot;

    async fn echo_target(request: Request) -> Response {
        Response::ok().body(request.request_target().to_owned())
    }

    async fn start(handler: impl Handler + 'static) -> (SocketAddr, oneshot::Sender<()>) {
        let server = Server::builder().address("127.0.0.1:0").handler(handler).build().unwrap();
        let listening = server.listen().await.unwrap();
        let addr = listening.local_addr().unwrap();

        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(listening.serve_until(async move {
            let _ = rx.await;
        }));
        (addr, tx)
    }

    async fn exchange(addr: SocketAddr, request: &[u8]) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request).await.unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[test]
    fn build_requires_address() {
        let err = Server::builder().handler(make_handler(echo_target)).build().unwrap_err();
        assert!(matches!(err, ServerBuildError::MissingAddress));
    }

    #[test]
    fn build_requires_handler() {
        let err = Server::builder().address("127.0.0.1:0").build().unwrap_err();
        assert!(matches!(err, ServerBuildError::MissingHandler));
    }

    #[tokio::test]
    async fn serves_requests_until_shutdown() {
        let (addr, shutdown) = start(make_handler(echo_target)).await;

        let request = indoc! {"
            GET /coffee HTTP/1.1
            Host: localhost:42069
            User-Agent: curl/7.81.0
            Accept: */*

        "}
        .replace('\n', "\r\n");
        let response = exchange(addr, request.as_bytes()).await;
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("connection: close\r\n"));
        assert!(response.ends_with("\r\n\r\n/coffee"));

        let response = exchange(addr, b"GET /tea HTTP/1.1\r\n\r\n").await;
        assert!(response.ends_with("\r\n\r\n/tea"));

        shutdown.send(()).unwrap();
    }

    #[tokio::test]
    async fn malformed_request_gets_400() {
        let (addr, _shutdown) = start(make_handler(echo_target)).await;

        let response = exchange(addr, b"GET / HTTP/1.0\r\n\r\n").await;
        assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert!(response.ends_with("Error parsing request: unrecognized HTTP-version: 1.0"));
    }

    #[tokio::test]
    async fn oversized_request_is_rejected() {
        let server = Server::builder()
            .address("127.0.0.1:0")
            .handler(make_handler(echo_target))
            .reader(RequestReader::with_capacity(8).max_buffer_size(32))
            .build()
            .unwrap();
        let listening = server.listen().await.unwrap();
        let addr = listening.local_addr().unwrap();
        tokio::spawn(listening.serve_until(std::future::pending()));

        // fills the 32 byte limit without ever finishing the request line
        let request = format!("GET /{}", "a".repeat(27));
        assert_eq!(request.len(), 32);

        let response = exchange(addr, request.as_bytes()).await;
        assert!(response.starts_with(&format!("HTTP/1.1 {} ", StatusCode::BAD_REQUEST.as_str())));
        assert!(response.contains("Error parsing request: "));
    }
}
