//! HTTP response header handling implementation.

use http::Response;

/// Type alias for HTTP response headers.
///
/// The header portion of a response, using `http::Response<()>` with an empty
/// body placeholder. Header iteration follows insertion order, which is the
/// order the header lines are written.
pub type ResponseHead = Response<()>;
