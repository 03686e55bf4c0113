//! A tiny concurrent HTTP/1.1 server.
//!
//! | Method | Path           | Response                                                    |
//! |--------|----------------|-------------------------------------------------------------|
//! | GET    | `/`            | 200, empty body                                             |
//! | GET    | `/echo/{s}`    | 200, body `s`, gzip when `Accept-Encoding` mentions it      |
//! | GET    | `/user-agent`  | 200, body is the `User-Agent` header                        |
//! | GET    | `/files/{f}`   | 200 with the file's bytes, 404 when it can't be read        |
//! | POST   | `/files/{f}`   | 201 after writing the request body to the file              |
//!
//! Anything else is answered with an empty 404. Each connection serves one
//! request on its own task, framed and written by [`pico_http`].

pub mod config;
pub mod encoding;
pub mod files;
pub mod router;
pub mod server;
pub mod service;

pub use config::ServerConfig;
pub use server::{Server, ServerError};
