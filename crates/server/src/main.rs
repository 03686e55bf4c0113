use clap::Parser;
use pico_httpd::config::Cli;
use pico_httpd::{Server, ServerConfig};
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {e}");
        return ExitCode::FAILURE;
    }

    let config = ServerConfig::from(Cli::parse());
    info!(directory = ?config.directory(), address = config.address(), "starting server");

    let server = match Server::new(&config) {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "build server error");
            return ExitCode::FAILURE;
        }
    };

    match server.start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(cause = %e, "server stopped");
            ExitCode::FAILURE
        }
    }
}
