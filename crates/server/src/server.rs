use std::io;
use std::path::Path;
use std::sync::Arc;

use pico_http::connection::HttpConnection;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::files::FileStore;
use crate::router::Router;
use crate::service::FileService;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("invalid route table: {source}")]
    Route {
        #[from]
        source: matchit::InsertError,
    },

    #[error("bind {address} error: {source}")]
    Bind { address: String, source: io::Error },

    #[error("accept connection error: {source}")]
    Accept { source: io::Error },
}

/// Accepts connections and serves each one on its own task.
///
/// There is no limit on concurrent connections.
#[derive(Debug)]
pub struct Server {
    address: String,
    service: Arc<FileService>,
}

impl Server {
    pub fn new(config: &ServerConfig) -> Result<Self, ServerError> {
        if let Some(directory) = config.directory().filter(|directory| !directory.is_dir()) {
            warn!(directory = %directory.display(), "directory does not exist, file reads will miss until it is created");
        }

        let service = FileService::new(Router::standard()?, FileStore::new(config.directory().map(Path::to_path_buf)));
        Ok(Self { address: config.address().to_owned(), service: Arc::new(service) })
    }

    /// Binds the configured address and serves until accepting fails.
    pub async fn start(self) -> Result<(), ServerError> {
        let tcp_listener = TcpListener::bind(self.address.as_str())
            .await
            .map_err(|source| ServerError::Bind { address: self.address.clone(), source })?;

        self.serve(tcp_listener).await
    }

    /// Serves connections from an already bound listener.
    ///
    /// The accept loop never waits for a connection task; an accept error
    /// ends the loop and is returned.
    pub async fn serve(self, tcp_listener: TcpListener) -> Result<(), ServerError> {
        match tcp_listener.local_addr() {
            Ok(local_addr) => info!(%local_addr, "start listening"),
            Err(e) => warn!(cause = %e, "start listening on unknown address"),
        }

        loop {
            let (tcp_stream, remote_addr) = tcp_listener.accept().await.map_err(|source| ServerError::Accept { source })?;

            let service = Arc::clone(&self.service);

            tokio::spawn(async move {
                let (reader, writer) = tcp_stream.into_split();
                let connection = HttpConnection::new(reader, writer);
                match connection.process(service).await {
                    Ok(()) => {
                        info!(%remote_addr, "finished process, connection shutdown");
                    }
                    Err(e) if e.is_malformed_request() => {
                        warn!(%remote_addr, cause = %e, "drop malformed request, connection shutdown");
                    }
                    Err(e) => {
                        error!(%remote_addr, cause = %e, "send response error, connection shutdown");
                    }
                }
            });
        }
    }
}
