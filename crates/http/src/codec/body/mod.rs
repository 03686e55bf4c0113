//! Request body decoding
//!
//! - [`LengthDecoder`]: yields exactly `Content-Length` bytes
//! - [`PayloadDecoder`]: picks between a length-delimited body and no body

mod length_decoder;
mod payload_decoder;

pub use payload_decoder::PayloadDecoder;
