//! Core HTTP protocol abstractions.
//!
//! - **Message Handling** ([`Message`], [`PayloadItem`], [`PayloadSize`]):
//!   the frames produced by the request decoder
//! - **Request Processing** ([`RequestHeader`]): the framed header block
//! - **Response Processing** ([`ResponseHead`]): response headers before the body is attached
//! - **Error Handling** ([`HttpError`], [`ParseError`], [`SendError`])
//!
//! The protocol module is typically used through the connection layer rather
//! than directly.

mod message;
pub use message::Message;
pub use message::PayloadItem;
pub use message::PayloadSize;

mod request;
pub use request::RequestHeader;

mod response;
pub use response::ResponseHead;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
