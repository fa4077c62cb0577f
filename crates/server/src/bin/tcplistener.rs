use std::net::{TcpListener, TcpStream};

use tcp_http::protocol::Request;
use tcp_http::reader::request_from_reader;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

const PORT: u16 = 42069;

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let listener = match TcpListener::bind(("0.0.0.0", PORT)) {
        Ok(listener) => listener,
        Err(e) => {
            error!(cause = %e, port = PORT, "error listening for TCP traffic");
            return;
        }
    };
    info!(port = PORT, "listening for TCP traffic");

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => handle(&stream),
            Err(e) => warn!(cause = %e, "failed to accept"),
        }
    }
}

fn handle(stream: &TcpStream) {
    let peer = stream.peer_addr().map(|addr| addr.to_string()).unwrap_or_else(|_| String::from("unknown"));
    info!(%peer, "accepted connection");

    match request_from_reader(stream) {
        Ok(request) => print!("{}", describe(&request)),
        Err(e) => error!(%peer, cause = %e, "error getting request from connection"),
    }

    info!(%peer, "connection closed");
}

fn describe(request: &Request) -> String {
    let line = request.request_line();
    let mut out = format!(
        "Request line:\n- Method: {}\n- Target: {}\n- Version: {}\nHeaders:\n",
        line.method(),
        line.request_target(),
        line.http_version()
    );
    for (name, value) in request.headers() {
        out.push_str(&format!("- {}: {}\n", name, String::from_utf8_lossy(value.as_bytes())));
    }
    out.push_str(&format!("Body:\n{}\n", String::from_utf8_lossy(request.body())));
    out
}
