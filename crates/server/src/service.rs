//! Request dispatch: route a framed request to its endpoint and build the response.

use std::error::Error;

use bytes::Bytes;
use http::header::{ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, Request, Response, StatusCode};
use pico_http::handler::Handler;
use tracing::debug;

use crate::encoding::negotiate;
use crate::files::{FileStore, FileStoreError};
use crate::router::{Endpoint, Router};

/// The application behind every connection: the route table and the file store.
///
/// Holds no mutable state, so one instance serves all connections concurrently.
#[derive(Debug)]
pub struct FileService {
    router: Router,
    files: FileStore,
}

impl FileService {
    pub fn new(router: Router, files: FileStore) -> Self {
        Self { router, files }
    }

    /// Produces the single response for `req`.
    ///
    /// Exactly one endpoint answers; an unmatched request gets an empty 404.
    pub async fn dispatch(&self, req: &Request<Bytes>) -> Result<Response<Bytes>, Box<dyn Error + Send + Sync>> {
        let Some(route) = self.router.at(req.method(), req.uri().path()) else {
            debug!(method = %req.method(), path = req.uri().path(), "no route matched");
            return Ok(empty(StatusCode::NOT_FOUND));
        };

        match route.endpoint() {
            Endpoint::Root => Ok(empty(StatusCode::OK)),
            Endpoint::Echo => echo(route.capture(), req.headers()),
            Endpoint::UserAgent => {
                let user_agent = req.headers().get(USER_AGENT).map(|value| Bytes::copy_from_slice(value.as_bytes()));
                text(user_agent.unwrap_or_default())
            }
            Endpoint::ReadFile => self.read_file(route.capture()).await,
            Endpoint::WriteFile => self.write_file(route.capture(), req.body()).await,
        }
    }

    async fn read_file(&self, name: &str) -> Result<Response<Bytes>, Box<dyn Error + Send + Sync>> {
        let Some(contents) = self.files.read(name).await else {
            return Ok(empty(StatusCode::NOT_FOUND));
        };

        Ok(Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, mime::APPLICATION_OCTET_STREAM.as_ref())
            .body(contents)?)
    }

    async fn write_file(&self, name: &str, contents: &[u8]) -> Result<Response<Bytes>, Box<dyn Error + Send + Sync>> {
        match self.files.write(name, contents).await {
            Ok(()) => Ok(empty(StatusCode::CREATED)),
            Err(FileStoreError::NotConfigured) => Ok(empty(StatusCode::NOT_FOUND)),
            Err(e) => Err(e.into()),
        }
    }
}

impl Handler for FileService {
    type Error = Box<dyn Error + Send + Sync>;

    async fn call(&self, req: Request<Bytes>) -> Result<Response<Bytes>, Self::Error> {
        self.dispatch(&req).await
    }
}

fn echo(capture: &str, headers: &HeaderMap) -> Result<Response<Bytes>, Box<dyn Error + Send + Sync>> {
    let accept_encodings = headers.get(ACCEPT_ENCODING).and_then(|value| value.to_str().ok()).unwrap_or_default();
    let (body, encoding) = negotiate(Bytes::copy_from_slice(capture.as_bytes()), accept_encodings)?;

    let mut builder = Response::builder().status(StatusCode::OK);
    if let Some(encoding) = encoding {
        builder = builder.header(CONTENT_ENCODING, encoding.name());
    }
    Ok(builder.header(CONTENT_TYPE, mime::TEXT_PLAIN.as_ref()).body(body)?)
}

fn text(body: Bytes) -> Result<Response<Bytes>, Box<dyn Error + Send + Sync>> {
    Ok(Response::builder().status(StatusCode::OK).header(CONTENT_TYPE, mime::TEXT_PLAIN.as_ref()).body(body)?)
}

fn empty(status: StatusCode) -> Response<Bytes> {
    let mut response = Response::new(Bytes::new());
    *response.status_mut() = status;
    response
}
