use std::io;
use thiserror::Error;

use crate::protocol::ParsePhase;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("poorly formatted request-line: {line}")]
    InvalidRequestLine { line: String },

    #[error("invalid method: {method}")]
    InvalidMethod { method: String },

    #[error("unrecognized HTTP-version: {version}")]
    InvalidVersion { version: String },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("malformed Content-Length: {value}")]
    InvalidContentLength { value: String },

    #[error("body exceeds Content-Length, declared: {declared} received: {received}")]
    BodyTooLarge { declared: u64, received: u64 },

    #[error("incomplete request, in state: {phase}, read {bytes_read} bytes before EOF")]
    IncompleteRequest { phase: ParsePhase, bytes_read: usize },

    #[error("read buffer size {size} exceeds the limit {max_size}")]
    BufferLimitExceeded { size: usize, max_size: usize },

    #[error("trying to read data in a done state")]
    AlreadyDone,

    #[error(transparent)]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn invalid_request_line<S: ToString>(line: S) -> Self {
        Self::InvalidRequestLine { line: line.to_string() }
    }

    pub fn invalid_method<S: ToString>(method: S) -> Self {
        Self::InvalidMethod { method: method.to_string() }
    }

    pub fn invalid_version<S: ToString>(version: S) -> Self {
        Self::InvalidVersion { version: version.to_string() }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn invalid_content_length<S: ToString>(value: S) -> Self {
        Self::InvalidContentLength { value: value.to_string() }
    }

    pub fn body_too_large(declared: u64, received: u64) -> Self {
        Self::BodyTooLarge { declared, received }
    }

    pub fn incomplete(phase: ParsePhase, bytes_read: usize) -> Self {
        Self::IncompleteRequest { phase, bytes_read }
    }

    pub fn buffer_limit_exceeded(size: usize, max_size: usize) -> Self {
        Self::BufferLimitExceeded { size, max_size }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    /// Whether the peer sent something we refuse to parse.
    ///
    /// `false` means the failure is on our side or in the transport, not in the request bytes.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::AlreadyDone | Self::Io { .. })
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("invalid write order, expected {expected} but got {actual}")]
    InvalidWriteOrder { expected: &'static str, actual: &'static str },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn invalid_write_order(expected: &'static str, actual: &'static str) -> Self {
        Self::InvalidWriteOrder { expected, actual }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
