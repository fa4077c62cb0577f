use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UdpSocket;
use tracing::{Level, error, warn};
use tracing_subscriber::FmtSubscriber;

const LOCAL_ADDR: &str = "0.0.0.0:8080";
const REMOTE_ADDR: &str = "127.0.0.1:42069";

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let socket = match UdpSocket::bind(LOCAL_ADDR).await {
        Ok(socket) => socket,
        Err(e) => {
            error!(cause = %e, address = LOCAL_ADDR, "couldn't bind udp socket");
            return;
        }
    };
    if let Err(e) = socket.connect(REMOTE_ADDR).await {
        error!(cause = %e, address = REMOTE_ADDR, "couldn't establish connection");
        return;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        if let Err(e) = std::io::stdout().flush() {
            warn!(cause = %e, "can't flush prompt");
        }

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!(cause = %e, "can't read stdin");
                break;
            }
        };

        if let Err(e) = socket.send(format!("{line}\n").as_bytes()).await {
            warn!(cause = %e, "can't send datagram");
        }
    }
}
