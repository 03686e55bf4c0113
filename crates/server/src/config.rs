use clap::Parser;
use std::path::{Path, PathBuf};

/// Listen on every interface, port 4221
pub const DEFAULT_ADDRESS: &str = "0.0.0.0:4221";

#[derive(Parser, Debug)]
#[command(name = "pico-httpd", version, about = "A tiny HTTP/1.1 server with echo, user-agent and file routes", long_about = None)]
pub struct Cli {
    /// Directory served by `GET /files/{name}` and written by `POST /files/{name}`
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Socket address to listen on
    #[arg(long, default_value = DEFAULT_ADDRESS)]
    pub address: String,
}

/// Settings fixed at startup and shared read-only by every connection.
///
/// Without a directory every `/files/*` request is answered with 404.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    directory: Option<PathBuf>,
    address: String,
}

impl ServerConfig {
    pub fn new(directory: Option<PathBuf>, address: impl Into<String>) -> Self {
        Self { directory, address: address.into() }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(None, DEFAULT_ADDRESS)
    }
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self::new(cli.directory, cli.address)
    }
}
