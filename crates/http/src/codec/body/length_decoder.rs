//! Accumulates a request body delimited by its `Content-Length` header.
//!
//! The body is never truncated: every byte handed to [`LengthDecoder::decode`] is kept, and
//! the moment more bytes have arrived than were declared the request is rejected.

use bytes::{Bytes, BytesMut};
use tracing::trace;

use crate::ensure;
use crate::protocol::ParseError;

/// Appends body bytes until the declared length is reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LengthDecoder {
    body: BytesMut,
    /// Body bytes taken so far
    received: u64,
}

impl LengthDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends all of `src` to the body.
    ///
    /// Returns `Ok(true)` once exactly `content_length` bytes have been received.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::BodyTooLarge`] as soon as the received count exceeds
    /// `content_length`.
    pub fn decode(&mut self, content_length: u64, src: &[u8]) -> Result<bool, ParseError> {
        self.body.extend_from_slice(src);
        self.received += src.len() as u64;
        trace!(received = self.received, content_length, "accumulated body bytes");

        ensure!(self.received <= content_length, ParseError::body_too_large(content_length, self.received));

        Ok(self.received == content_length)
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn into_body(self) -> Bytes {
        self.body.freeze()
    }
}

/// Parses a `Content-Length` value as a plain base-10 non-negative integer.
///
/// Signs, whitespace and anything else besides ASCII digits are rejected.
pub fn parse_content_length(value: &str) -> Result<u64, ParseError> {
    ensure!(!value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()), ParseError::invalid_content_length(value));

    value.parse::<u64>().map_err(|e| ParseError::invalid_content_length(format!("{value} ({e})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        let mut decoder = LengthDecoder::new();

        assert!(!decoder.decode(5, b"he").unwrap());
        assert_eq!(decoder.received(), 2);

        assert!(decoder.decode(5, b"llo").unwrap());
        assert_eq!(decoder.received(), 5);
        assert_eq!(&decoder.into_body()[..], b"hello");
    }

    #[test]
    fn empty_window_does_not_complete_non_empty_body() {
        let mut decoder = LengthDecoder::new();
        assert!(!decoder.decode(3, b"").unwrap());
    }

    #[test]
    fn zero_length_completes_immediately() {
        let mut decoder = LengthDecoder::new();
        assert!(decoder.decode(0, b"").unwrap());
        assert!(decoder.into_body().is_empty());
    }

    #[test]
    fn too_many_bytes() {
        let mut decoder = LengthDecoder::new();
        let err = decoder.decode(3, b"hello").unwrap_err();
        assert!(matches!(err, ParseError::BodyTooLarge { declared: 3, received: 5 }));
    }

    #[test]
    fn excess_across_windows() {
        let mut decoder = LengthDecoder::new();
        assert!(!decoder.decode(4, b"abc").unwrap());
        assert!(matches!(decoder.decode(4, b"de"), Err(ParseError::BodyTooLarge { declared: 4, received: 5 })));
    }

    #[test]
    fn content_length_values() {
        assert_eq!(parse_content_length("0").unwrap(), 0);
        assert_eq!(parse_content_length("13").unwrap(), 13);
        assert_eq!(parse_content_length("007").unwrap(), 7);

        for bad in ["", "-1", "+5", "five", "5 ", "1.5", "5, 5", "99999999999999999999999"] {
            assert!(
                matches!(parse_content_length(bad), Err(ParseError::InvalidContentLength { .. })),
                "{bad:?} should be rejected"
            );
        }
    }
}
