//! Parsed request types.
//!
//! A [`Request`] is only ever handed out once parsing has reached
//! [`ParsePhase::Done`](crate::protocol::ParsePhase::Done), so it carries no parser state
//! of its own and is immutable from the caller's point of view.

use bytes::Bytes;

use crate::protocol::Headers;

/// The validated `<METHOD> <TARGET> HTTP/<VERSION>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: String,
    request_target: String,
    http_version: String,
}

impl RequestLine {
    pub(crate) fn new(method: String, request_target: String, http_version: String) -> Self {
        Self { method, request_target, http_version }
    }

    /// The method token, uppercase ASCII letters only.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The request target exactly as sent.
    pub fn request_target(&self) -> &str {
        &self.request_target
    }

    /// The version without its `HTTP/` prefix, always `"1.1"`.
    pub fn http_version(&self) -> &str {
        &self.http_version
    }
}

/// A fully parsed HTTP/1.1 request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    request_line: RequestLine,
    headers: Headers,
    body: Bytes,
}

impl Request {
    pub(crate) fn new(request_line: RequestLine, headers: Headers, body: Bytes) -> Self {
        Self { request_line, headers, body }
    }

    pub fn request_line(&self) -> &RequestLine {
        &self.request_line
    }

    pub fn method(&self) -> &str {
        self.request_line.method()
    }

    pub fn request_target(&self) -> &str {
        self.request_line.request_target()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The body bytes. Empty when the request carried no `Content-Length`.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Splits the request into its request line, headers and body.
    pub fn into_parts(self) -> (RequestLine, Headers, Bytes) {
        (self.request_line, self.headers, self.body)
    }
}
