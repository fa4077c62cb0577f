//! Core HTTP protocol types shared by the codecs, readers and connection.
//!
//! - **Messages** ([`message`]): [`ParsePhase`] and the [`ResponsePart`]s a response is
//!   written as
//! - **Headers** ([`headers`]): the case-insensitive, order preserving [`Headers`] collection
//! - **Requests** ([`request`]): the parsed [`Request`] and its [`RequestLine`]
//! - **Responses** ([`response`]): the [`Response`] value and [`default_headers`]
//! - **Errors** ([`error`]): [`ParseError`], [`SendError`] and the top level [`HttpError`]

mod message;
pub use message::ParsePhase;
pub use message::ResponsePart;

mod headers;
pub use headers::Headers;

mod request;
pub use request::Request;
pub use request::RequestLine;

mod response;
pub use response::Response;
pub use response::content_type;
pub use response::default_headers;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
