//! HTTP header decoder implementation for parsing HTTP request headers
//!
//! Decodes the request line and header block from raw bytes into a
//! [`RequestHeader`], then decides how many body bytes follow.
//!
//! Only HTTP/1.0 and HTTP/1.1 request lines are accepted. There is no cap on
//! the number of headers or the size of the header block: the `httparse`
//! header array starts at [`INIT_HEADER_NUM`] entries and doubles whenever a
//! request carries more.
//!
//! # Implementation Details
//!
//! 1. Parse raw bytes using `httparse`
//! 2. Record header name/value byte ranges
//! 3. Split the header block off the buffer and slice names and values out of it
//! 4. Read `Content-Length` to size the payload

use bytes::BytesMut;
use http::header::CONTENT_LENGTH;
use http::{HeaderName, HeaderValue, Method, Request, Uri};
use httparse::{Error, Status};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::protocol::{ParseError, PayloadSize, RequestHeader};

/// Initial number of header slots handed to `httparse`
const INIT_HEADER_NUM: usize = 64;

/// Decoder for HTTP request headers implementing the [`Decoder`] trait.
///
/// Produces a [`RequestHeader`] and the [`PayloadSize`] announced by its
/// `Content-Length` header.
#[derive(Debug)]
pub struct HeaderDecoder;

impl Decoder for HeaderDecoder {
    type Item = (RequestHeader, PayloadSize);
    type Error = ParseError;

    /// Attempts to decode HTTP headers from the provided bytes buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some((header, payload_size)))` if a complete header was successfully parsed
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if parsing failed
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // Minimum valid HTTP request needs at least "GET / HTTP/1.1\r\n\r\n"
        if src.len() < 14 {
            return Ok(None);
        }

        let Some(head) = parse_head(src)? else {
            return Ok(None);
        };
        let ParsedHead { body_offset, mut request, header_index } = head;

        let headers = request.headers_mut();
        headers.reserve(header_index.len());

        // Split header portion from source buffer, the rest is body
        let header_bytes = src.split_to(body_offset).freeze();
        for index in &header_index {
            let name = HeaderName::from_bytes(&header_bytes[index.name.0..index.name.1]).map_err(ParseError::invalid_header)?;
            let value =
                HeaderValue::from_maybe_shared(header_bytes.slice(index.value.0..index.value.1)).map_err(ParseError::invalid_header)?;

            // insert rather than append: a repeated header keeps its last value
            headers.insert(name, value);
        }

        let header = RequestHeader::from(request);
        let payload_size = parse_payload(&header)?;

        Ok(Some((header, payload_size)))
    }
}

/// The request line and header ranges of a complete header block
struct ParsedHead {
    body_offset: usize,
    request: Request<()>,
    header_index: Vec<HeaderIndex>,
}

/// Parses the header block at the front of `src`, growing the header array
/// until every header fits.
///
/// Returns `Ok(None)` while the header block is incomplete.
fn parse_head(src: &[u8]) -> Result<Option<ParsedHead>, ParseError> {
    let mut header_num = INIT_HEADER_NUM;

    loop {
        let mut headers = vec![httparse::EMPTY_HEADER; header_num];
        let mut req = httparse::Request::new(&mut headers);

        let body_offset = match req.parse(src) {
            Ok(Status::Complete(body_offset)) => body_offset,
            Ok(Status::Partial) => return Ok(None),
            Err(Error::TooManyHeaders) => {
                header_num *= 2;
                trace!(header_num, "grow header array");
                continue;
            }
            Err(e) => return Err(ParseError::invalid_header(e.to_string())),
        };
        trace!(header_size = body_offset, header_count = req.headers.len(), "parsed header");

        // Calculate and record byte range indices for each header
        let header_index = HeaderIndex::record(src, req.headers);

        let version = match req.version {
            Some(0) => http::Version::HTTP_10,
            Some(1) => http::Version::HTTP_11,
            _ => return Err(ParseError::InvalidVersion(req.version)),
        };

        let method = req.method.ok_or(ParseError::InvalidMethod)?;
        let method = Method::from_bytes(method.as_bytes()).map_err(|_e| ParseError::InvalidMethod)?;
        let uri = req.path.ok_or(ParseError::InvalidUri)?.parse::<Uri>().map_err(|_e| ParseError::InvalidUri)?;

        let mut request = Request::new(());
        *request.method_mut() = method;
        *request.uri_mut() = uri;
        *request.version_mut() = version;

        return Ok(Some(ParsedHead { body_offset, request, header_index }));
    }
}

/// Stores the byte range positions of a header's name and value within the original buffer.
struct HeaderIndex {
    name: (usize, usize),
    value: (usize, usize),
}

impl HeaderIndex {
    fn record(bytes: &[u8], headers: &[httparse::Header<'_>]) -> Vec<HeaderIndex> {
        let bytes_ptr = bytes.as_ptr() as usize;
        headers
            .iter()
            .map(|header| {
                let name_start = header.name.as_ptr() as usize - bytes_ptr;
                let value_start = header.value.as_ptr() as usize - bytes_ptr;
                HeaderIndex {
                    name: (name_start, name_start + header.name.len()),
                    value: (value_start, value_start + header.value.len()),
                }
            })
            .collect()
    }
}

/// Determines the payload size from the `Content-Length` header.
///
/// A request without `Content-Length` has an empty body, whatever its method.
/// `Transfer-Encoding` is not consulted.
fn parse_payload(header: &RequestHeader) -> Result<PayloadSize, ParseError> {
    let Some(cl_value) = header.headers().get(CONTENT_LENGTH) else {
        return Ok(PayloadSize::new_empty());
    };

    let cl_str = cl_value.to_str().map_err(|e| ParseError::invalid_content_length(format!("value can't to_str: {e}")))?;

    let length =
        cl_str.trim().parse::<u64>().map_err(|e| ParseError::invalid_content_length(format!("value {cl_str} is not u64: {e}")))?;

    Ok(PayloadSize::new_length(length))
}
