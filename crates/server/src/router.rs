//! Route table: method and path to endpoint, first match wins.
//!
//! Paths are matched with `matchit`; each path carries a list of items, one
//! per method, checked in the order they were added. Wildcard routes use a
//! catch-all parameter named `capture`. The captured text is percent-decoded
//! and the value handed to the endpoint is its final `/`-delimited segment.
//! An empty segment, or a capture that does not decode to UTF-8, does not
//! match.

use http::Method;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::trace;

type InnerRouter<T> = matchit::Router<T>;

/// The parameter name wildcard routes must use for their catch-all segment
const CAPTURE: &str = "capture";

/// The action a matched route performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /`
    Root,
    /// `GET /echo/*`
    Echo,
    /// `GET /user-agent`
    UserAgent,
    /// `GET /files/*`
    ReadFile,
    /// `POST /files/*`
    WriteFile,
}

#[derive(Debug)]
pub struct Router {
    inner_router: InnerRouter<Vec<RouterItem>>,
}

/// A router item binding a method to an endpoint
#[derive(Debug, Clone)]
pub struct RouterItem {
    method: Method,
    endpoint: Endpoint,
}

/// A matched route with its decoded wildcard capture, empty for literal routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'req> {
    endpoint: Endpoint,
    capture: Cow<'req, str>,
}

pub fn get(endpoint: Endpoint) -> RouterItem {
    RouterItem { method: Method::GET, endpoint }
}

pub fn post(endpoint: Endpoint) -> RouterItem {
    RouterItem { method: Method::POST, endpoint }
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// The fixed route table served by the server.
    pub fn standard() -> Result<Self, matchit::InsertError> {
        Self::builder()
            .route("/", get(Endpoint::Root))
            .route("/echo/{*capture}", get(Endpoint::Echo))
            .route("/user-agent", get(Endpoint::UserAgent))
            .route("/files/{*capture}", get(Endpoint::ReadFile))
            .route("/files/{*capture}", post(Endpoint::WriteFile))
            .build()
    }

    /// Matches a method and path against the table.
    ///
    /// Returns `None` when nothing matches, which the caller answers with 404.
    pub fn at<'req>(&self, method: &Method, path: &'req str) -> Option<RouteMatch<'req>> {
        let matched = match self.inner_router.at(path) {
            Ok(matched) => matched,
            Err(e) => {
                trace!(path, cause = %e, "no route for path");
                return None;
            }
        };

        let item = matched.value.iter().find(|item| item.method == *method)?;

        let capture = match matched.params.get(CAPTURE) {
            Some(captured) => final_segment(captured)?,
            None => Cow::Borrowed(""),
        };

        Some(RouteMatch { endpoint: item.endpoint, capture })
    }
}

/// Percent-decodes a catch-all capture and keeps its last path segment.
fn final_segment(captured: &str) -> Option<Cow<'_, str>> {
    let decoded = match percent_decode_str(captured).decode_utf8() {
        Ok(decoded) => decoded,
        Err(e) => {
            trace!(captured, cause = %e, "capture is not utf-8");
            return None;
        }
    };

    let segment = match decoded {
        Cow::Borrowed(decoded) => Cow::Borrowed(decoded.rsplit('/').next().unwrap_or_default()),
        Cow::Owned(decoded) => Cow::Owned(decoded.rsplit('/').next().unwrap_or_default().to_owned()),
    };

    (!segment.is_empty()).then_some(segment)
}

impl<'req> RouteMatch<'req> {
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn capture(&self) -> &str {
        &self.capture
    }
}

#[derive(Debug)]
pub struct RouterBuilder {
    data: HashMap<String, Vec<RouterItem>>,
}

impl RouterBuilder {
    fn new() -> Self {
        Self { data: HashMap::new() }
    }

    pub fn route(mut self, route: impl Into<String>, item: RouterItem) -> Self {
        self.data.entry(route.into()).or_default().push(item);
        self
    }

    pub fn build(self) -> Result<Router, matchit::InsertError> {
        let mut inner_router = InnerRouter::new();

        for (path, items) in self.data {
            inner_router.insert(path, items)?;
        }

        Ok(Router { inner_router })
    }
}
