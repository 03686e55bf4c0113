//! HTTP codec module for encoding and decoding HTTP messages
//!
//! - Request handling:
//!   - [`RequestDecoder`]: decodes an incoming request into a header frame and payload frames
//!   - Header parsing via the `header` module
//!   - Payload decoding via the `body` module
//!
//! - Response handling:
//!   - [`ResponseEncoder`]: encodes a complete response, header block and body, into one buffer
//!
//! # Example
//!
//! ```
//! use bytes::{Bytes, BytesMut};
//! use http::Response;
//! use pico_http::codec::ResponseEncoder;
//! use tokio_util::codec::Encoder;
//!
//! let mut encoder = ResponseEncoder::new();
//! let mut buffer = BytesMut::new();
//! encoder.encode(Response::new(Bytes::from_static(b"abc")), &mut buffer).unwrap();
//! assert!(buffer.ends_with(b"\r\n\r\nabc"));
//! ```

mod body;
mod header;
mod request_decoder;
mod response_encoder;

pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
