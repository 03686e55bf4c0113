//! Response body content negotiation.
//!
//! Only gzip is offered. A request accepts gzip when its `Accept-Encoding`
//! value contains `gzip` anywhere; the value is not split into tokens or
//! weighed by q-values.

use bytes::{BufMut, Bytes, BytesMut};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io;
use std::io::Write;
use tracing::trace;

/// A content coding the server can apply to a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Gzip,
}

impl Encoding {
    /// Selects an encoding based on the `Accept-Encoding` header value.
    pub fn select(accept_encodings: &str) -> Option<Self> {
        accept_encodings.contains("gzip").then_some(Self::Gzip)
    }

    /// The `Content-Encoding` header value for this encoding.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Gzip => "gzip",
        }
    }

    /// Compresses `data` into a complete gzip member.
    pub fn encode(self, data: &[u8]) -> Result<Bytes, io::Error> {
        match self {
            Encoding::Gzip => {
                let mut encoder = GzEncoder::new(BytesMut::with_capacity(data.len()).writer(), Compression::best());
                encoder.write_all(data)?;
                let encoded = encoder.finish()?.into_inner().freeze();
                trace!(raw_size = data.len(), encoded_size = encoded.len(), "gzip body");
                Ok(encoded)
            }
        }
    }
}

/// Negotiates the response body against a request's `Accept-Encoding` value.
///
/// Returns the body to send and, when it was compressed, the encoding to
/// announce in `Content-Encoding`.
pub fn negotiate(body: Bytes, accept_encodings: &str) -> Result<(Bytes, Option<Encoding>), io::Error> {
    match Encoding::select(accept_encodings) {
        Some(encoding) => Ok((encoding.encode(&body)?, Some(encoding))),
        None => Ok((body, None)),
    }
}
