use std::cmp;
use std::error::Error;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use http::{Request, Response, StatusCode};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::FramedRead;
use tracing::{debug, error, trace};

use crate::codec::RequestDecoder;
use crate::connection::message_writer::MessageWriter;
use crate::handler::Handler;
use crate::protocol::{HttpError, Message, ParseError, PayloadItem, PayloadSize, RequestHeader};

/// Initial capacity of the read and write buffers
const BUFFER_SIZE: usize = 8 * 1024;

/// Upper bound on the body buffer reserved up front from a declared `Content-Length`
const MAX_BODY_RESERVE: u64 = 64 * 1024;

/// An HTTP connection serving exactly one request
///
/// `HttpConnection` owns one accepted connection end-to-end:
/// - Reads and frames a single request, body included
/// - Hands it to the [`Handler`]
/// - Writes the response back in one write
/// - Shuts the write side down
///
/// A request that cannot be framed gets no response at all; the error is
/// returned to the caller, which drops the connection.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<R, RequestDecoder>,
    message_writer: MessageWriter<W>,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            framed_read: FramedRead::with_capacity(reader, RequestDecoder::new(), BUFFER_SIZE),
            message_writer: MessageWriter::with_capacity(writer, BUFFER_SIZE),
        }
    }

    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
    {
        let request = self.read_request().await?;
        debug!(method = %request.method(), path = request.uri().path(), body_size = request.body().len(), "receive request");

        let response_result = handler.call(request).await;

        let response = match response_result {
            Ok(response) => response,
            Err(e) => {
                let e: Box<dyn Error + Send + Sync> = e.into();
                error!(cause = %e, "handle request error");
                build_error_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        };

        self.message_writer.write(response)?;
        self.message_writer.flush().await?;
        self.message_writer.shutdown().await?;
        Ok(())
    }

    /// Frames one request, reading until the declared body length is consumed
    async fn read_request(&mut self) -> Result<Request<Bytes>, ParseError> {
        let (header, payload_size): (RequestHeader, PayloadSize) = match self.framed_read.next().await {
            Some(Ok(Message::Header(header))) => header,
            Some(Ok(Message::Payload(_))) => return Err(ParseError::invalid_body("need header while receive body")),
            Some(Err(e)) => return Err(e),
            None => return Err(ParseError::Incomplete),
        };

        let reserve = cmp::min(payload_size.len(), MAX_BODY_RESERVE);
        let mut body = BytesMut::with_capacity(usize::try_from(reserve).unwrap_or_default());

        loop {
            match self.framed_read.next().await {
                Some(Ok(Message::Payload(PayloadItem::Chunk(bytes)))) => {
                    trace!(chunk_size = bytes.len(), "receive body chunk");
                    body.extend_from_slice(&bytes);
                }
                Some(Ok(Message::Payload(PayloadItem::Eof))) => break,
                Some(Ok(Message::Header(_))) => return Err(ParseError::invalid_body("need body while receive header")),
                Some(Err(e)) => return Err(e),
                None => {
                    return Err(ParseError::invalid_body(format!(
                        "connection closed after {} of {} body bytes",
                        body.len(),
                        payload_size.len()
                    )));
                }
            }
        }

        Ok(header.body(body.freeze()))
    }
}

fn build_error_response(status_code: StatusCode) -> Response<Bytes> {
    let mut response = Response::new(Bytes::new());
    *response.status_mut() = status_code;
    response
}
