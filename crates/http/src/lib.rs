//! A one-request-per-connection HTTP/1.1 pipeline
//!
//! This crate turns a raw byte stream into a framed request, hands it to a
//! [`handler::Handler`], and serializes the handler's response back onto the
//! stream in a single write. It is built on top of tokio and `tokio-util`
//! codecs, using `httparse` for the request line and header block.
//!
//! # Features
//!
//! - Request framing with `Content-Length` delimited bodies
//! - Exact `Content-Length` on every response
//! - Whole-response buffering so each response is one write
//! - Clean error handling separating malformed requests from write failures
//!
//! # Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use http::{Request, Response, StatusCode};
//! use std::convert::Infallible;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn};
//! use pico_http::connection::HttpConnection;
//! use pico_http::handler::make_handler;
//!
//! #[tokio::main]
//! async fn main() {
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:8080").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = Arc::new(make_handler(hello_world));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = handler.clone();
//!
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             let connection = HttpConnection::new(reader, writer);
//!             match connection.process(handler).await {
//!                 Ok(()) => info!("finished process, connection shutdown"),
//!                 Err(e) => error!("service has error, cause {}, connection shutdown", e),
//!             }
//!         });
//!     }
//! }
//!
//! async fn hello_world(request: Request<Bytes>) -> Result<Response<Bytes>, Infallible> {
//!     info!(path = request.uri().path(), "receive request");
//!     Ok(Response::builder().status(StatusCode::OK).body(Bytes::from_static(b"Hello World!\r\n")).unwrap())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`connection`]: frames one request, invokes the handler, writes one response
//! - [`protocol`]: protocol types and error types
//! - [`codec`]: request decoding and response encoding
//! - [`handler`]: the handler trait and closure adaptor
//!
//! # Limitations
//!
//! - HTTP/1.1 responses only, one request per connection
//! - No chunked transfer encoding
//! - No limit on header count, header size or body size

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

