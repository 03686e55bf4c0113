//! HTTP header processing for requests and responses
//!
//! - [`HeaderDecoder`]: decodes the request line and header block, sizes the payload
//! - [`HeaderEncoder`]: writes the status line and header lines of a response

mod header_decoder;
mod header_encoder;

pub use header_decoder::HeaderDecoder;
pub use header_encoder::HeaderEncoder;
