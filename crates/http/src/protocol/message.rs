use std::fmt;

use bytes::Bytes;
use http::StatusCode;

use crate::protocol::Headers;

/// The phase a request parse is currently in.
///
/// This is the public, data-free view of the parser state. It is carried by
/// [`ParseError::IncompleteRequest`](crate::protocol::ParseError::IncompleteRequest)
/// so a premature end of stream can report how far parsing got.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ParsePhase {
    /// Waiting for a complete request line
    Init,
    /// Request line parsed, collecting header lines
    ParsingHeaders,
    /// Header block terminated, accumulating the body
    ParsingBody,
    /// The request is complete
    Done,
}

impl ParsePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParsePhase::Init => "init",
            ParsePhase::ParsingHeaders => "parsing_headers",
            ParsePhase::ParsingBody => "parsing_body",
            ParsePhase::Done => "done",
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, ParsePhase::Done)
    }
}

impl fmt::Display for ParsePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One piece of an outbound response, in wire order.
///
/// A response is always written as exactly one status line, then one header
/// block, then the body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePart {
    /// `HTTP/1.1 <code> <reason>`
    StatusLine(StatusCode),
    /// The header block including its terminating blank line
    Headers(Headers),
    /// Raw body bytes
    Body(Bytes),
}

impl ResponsePart {
    /// Short name used in write-order errors
    pub fn name(&self) -> &'static str {
        match self {
            ResponsePart::StatusLine(_) => "status line",
            ResponsePart::Headers(_) => "headers",
            ResponsePart::Body(_) => "body",
        }
    }
}
