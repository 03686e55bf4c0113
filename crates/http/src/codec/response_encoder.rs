use crate::codec::header::HeaderEncoder;
use crate::protocol::{PayloadSize, ResponseHead, SendError};
use bytes::{BufMut, Bytes, BytesMut};
use http::Response;
use tokio_util::codec::Encoder;

/// Encodes a whole response: status line, header lines, blank line, then the body.
#[derive(Debug)]
pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ResponseEncoder {
    fn default() -> Self {
        Self { header_encoder: HeaderEncoder }
    }
}

impl Encoder<Response<Bytes>> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: Response<Bytes>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (parts, body) = item.into_parts();
        let payload_size = PayloadSize::new_length(body.len() as u64);

        self.header_encoder.encode((ResponseHead::from_parts(parts, ()), payload_size), dst)?;

        dst.reserve(body.len());
        dst.put(body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use http::header::CONTENT_TYPE;

    #[test]
    fn body_follows_blank_line() {
        let response = Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, "text/plain")
            .body(Bytes::from_static(b"abc"))
            .unwrap();

        let mut dst = BytesMut::new();
        ResponseEncoder::new().encode(response, &mut dst).unwrap();

        assert_eq!(&dst[..], b"HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\ncontent-length: 3\r\n\r\nabc");
    }

    #[test]
    fn empty_body() {
        let response = Response::builder().status(StatusCode::CREATED).body(Bytes::new()).unwrap();

        let mut dst = BytesMut::new();
        ResponseEncoder::new().encode(response, &mut dst).unwrap();

        assert_eq!(&dst[..], b"HTTP/1.1 201 Created\r\ncontent-length: 0\r\n\r\n");
    }
}
