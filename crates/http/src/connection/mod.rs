//! HTTP connection handling module
//!
//! # Components
//!
//! - [`HttpConnection`]: owns one accepted connection:
//!   - Frames a single request, body included
//!   - Invokes the handler
//!   - Writes the response in one write and shuts the write side down
//!
//! There is no keep-alive: each connection serves exactly one request.

mod http_connection;
mod message_writer;

pub use http_connection::HttpConnection;
