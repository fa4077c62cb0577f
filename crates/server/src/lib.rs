//! A minimal HTTP/1.1 server on top of `tcp-http`.
//!
//! Every accepted connection is served on its own tokio task: one request is parsed, one
//! response is written and the connection is closed.
//!
//! ```no_run
//! use tcp_http::handler::make_handler;
//! use tcp_http::protocol::{Request, Response};
//! use tcp_server::Server;
//!
//! async fn hello(_request: Request) -> Response {
//!     Response::ok().body("Hello World!\r\n")
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = Server::builder().address("127.0.0.1:8080").handler(make_handler(hello)).build().unwrap();
//!     let listening = server.listen().await.unwrap();
//!     listening.serve_until(async { tokio::signal::ctrl_c().await.unwrap() }).await;
//! }
//! ```

pub mod pages;
mod server;

pub use server::Listening;
pub use server::Server;
pub use server::ServerBuildError;
pub use server::ServerBuilder;
