//! HTTP request decoder module
//!
//! This module drives the parse of a single request through its phases:
//!
//! ```text
//! Init --request line--> ParsingHeaders --blank line--> ParsingBody --length reached--> Done
//! ```
//!
//! The decoder does no I/O. It is handed whatever unconsumed bytes the caller has buffered,
//! reports how many of them it took, and is resumed with the remainder plus any new bytes
//! on the next call. Bytes reported as consumed are never looked at again.
//!
//! # Example
//!
//! ```
//! use tcp_http::codec::RequestDecoder;
//!
//! let decoder = RequestDecoder::new();
//! let (decoder, consumed) = decoder.decode(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap();
//!
//! assert_eq!(consumed, 35);
//! let request = decoder.into_request().unwrap();
//! assert_eq!(request.method(), "GET");
//! ```

use bytes::Bytes;
use http::header::CONTENT_LENGTH;
use tracing::trace;

use crate::codec::body::{LengthDecoder, parse_content_length};
use crate::codec::request_line::decode_request_line;
use crate::ensure;
use crate::protocol::{Headers, ParseError, ParsePhase, Request, RequestLine};

/// Parser state, one variant per phase, each holding exactly what that phase has built so far.
#[derive(Debug)]
enum ParseState {
    Init,
    ParsingHeaders { request_line: RequestLine, headers: Headers },
    ParsingBody { request_line: RequestLine, headers: Headers, body: LengthDecoder },
    Done(Request),
}

impl ParseState {
    fn phase(&self) -> ParsePhase {
        match self {
            ParseState::Init => ParsePhase::Init,
            ParseState::ParsingHeaders { .. } => ParsePhase::ParsingHeaders,
            ParseState::ParsingBody { .. } => ParsePhase::ParsingBody,
            ParseState::Done(_) => ParsePhase::Done,
        }
    }

    /// Runs the current phase once against `src`.
    ///
    /// Returns the next state and the bytes consumed; zero consumed means more input is
    /// needed unless the returned state is `Done`.
    fn step(self, src: &[u8]) -> Result<(Self, usize), ParseError> {
        match self {
            ParseState::Init => match decode_request_line(src)? {
                Some((request_line, consumed)) => {
                    Ok((ParseState::ParsingHeaders { request_line, headers: Headers::new() }, consumed))
                }
                None => Ok((ParseState::Init, 0)),
            },

            ParseState::ParsingHeaders { request_line, mut headers } => {
                let (consumed, done) = headers.parse(src)?;
                let next = if done {
                    ParseState::ParsingBody { request_line, headers, body: LengthDecoder::new() }
                } else {
                    ParseState::ParsingHeaders { request_line, headers }
                };
                Ok((next, consumed))
            }

            ParseState::ParsingBody { request_line, headers, mut body } => {
                // a request without Content-Length has no body, whatever else is buffered is dropped
                let Some(value) = headers.get(CONTENT_LENGTH) else {
                    trace!(discarded = src.len(), "no content-length, finishing without body");
                    return Ok((ParseState::Done(Request::new(request_line, headers, Bytes::new())), src.len()));
                };

                let content_length = parse_content_length(&value)?;
                let next = if body.decode(content_length, src)? {
                    ParseState::Done(Request::new(request_line, headers, body.into_body()))
                } else {
                    ParseState::ParsingBody { request_line, headers, body }
                };
                Ok((next, src.len()))
            }

            ParseState::Done(_) => Err(ParseError::AlreadyDone),
        }
    }
}

/// Incremental decoder for one HTTP/1.1 request.
///
/// The decoder is an accumulator value: [`RequestDecoder::decode`] takes it by value and
/// hands back the advanced decoder together with the number of bytes consumed.
#[derive(Debug)]
pub struct RequestDecoder {
    state: ParseState,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Default::default()
    }

    pub fn phase(&self) -> ParsePhase {
        self.state.phase()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self.state, ParseState::Done(_))
    }

    /// Consumes as many complete units (request line, header lines, body bytes) from `src`
    /// as are available.
    ///
    /// # Returns
    ///
    /// The advanced decoder and the number of bytes of `src` consumed. The caller must drop
    /// exactly that many bytes from the front of its buffer before the next call.
    ///
    /// # Errors
    ///
    /// Any error from the request line, header or body parsing aborts the request. Calling
    /// this on a decoder that is already done returns [`ParseError::AlreadyDone`].
    pub fn decode(self, src: &[u8]) -> Result<(Self, usize), ParseError> {
        ensure!(!self.is_done(), ParseError::AlreadyDone);

        let mut state = self.state;
        let mut total_consumed = 0;

        while !matches!(state, ParseState::Done(_)) {
            let before = state.phase();
            let (next, consumed) = state.step(&src[total_consumed..])?;
            state = next;
            total_consumed += consumed;

            if before != state.phase() {
                trace!(from = %before, to = %state.phase(), consumed, "parse phase changed");
            }
            if consumed == 0 {
                break;
            }
        }

        Ok((Self { state }, total_consumed))
    }

    /// Returns the parsed request if the decoder is done.
    pub fn into_request(self) -> Option<Request> {
        self.try_into_request().ok()
    }

    /// Returns the parsed request, or the decoder itself if it still needs input.
    pub fn try_into_request(self) -> Result<Request, Self> {
        match self.state {
            ParseState::Done(request) => Ok(request),
            state => Err(Self { state }),
        }
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self { state: ParseState::Init }
    }
}
