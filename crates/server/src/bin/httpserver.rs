use tcp_http::handler::make_handler;
use tcp_server::Server;
use tcp_server::pages;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

const PORT: u16 = 42069;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let server = match Server::builder().address(("0.0.0.0", PORT)).handler(make_handler(pages::demo)).build() {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "can't build server");
            return;
        }
    };

    let listening = match server.listen().await {
        Ok(listening) => listening,
        Err(e) => {
            error!(cause = %e, port = PORT, "error starting server");
            return;
        }
    };

    info!(port = PORT, "server started");
    listening.serve_until(shutdown_signal()).await;
    info!("server gracefully stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(cause = %e, "can't listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(cause = %e, "can't listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
