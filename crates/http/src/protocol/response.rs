//! Outbound response value.
//!
//! Handlers build a [`Response`]; the connection layer merges its headers over
//! [`default_headers`] and writes it with a
//! [`ResponseWriter`](crate::connection::ResponseWriter).

use bytes::Bytes;
use http::header::{CONNECTION, CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderName, HeaderValue, StatusCode};
use mime::Mime;

use crate::protocol::Headers;

/// Headers every response starts from: the body length, `Connection: close` since each
/// connection carries a single request, and a plain text content type.
pub fn default_headers(content_len: usize) -> Headers {
    let mut headers = Headers::new();
    headers.insert(CONTENT_LENGTH, HeaderValue::from(content_len));
    headers.insert(CONNECTION, HeaderValue::from_static("close"));
    headers.insert(CONTENT_TYPE, content_type(&mime::TEXT_PLAIN));
    headers
}

/// `Content-Type` value for a media type.
pub fn content_type(mime: &Mime) -> HeaderValue {
    // a parsed `Mime` only holds visible ASCII, the fallback is never taken in practice
    HeaderValue::from_str(mime.as_ref()).unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    headers: Headers,
    body: Bytes,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self { status, headers: Headers::new(), body: Bytes::new() }
    }

    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    /// Sets a header, replacing any earlier value for the same name.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body<B: Into<Bytes>>(mut self, body: B) -> Self {
        self.body = body.into();
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    pub fn body_bytes(&self) -> &Bytes {
        &self.body
    }

    /// The headers that go on the wire: [`default_headers`] for this body, overridden by
    /// whatever was set on the response.
    pub fn wire_headers(&self) -> Headers {
        let mut headers = default_headers(self.body.len());
        headers.extend_overriding(self.headers.clone());
        headers
    }

    pub fn into_parts(self) -> (StatusCode, Headers, Bytes) {
        (self.status, self.headers, self.body)
    }
}
