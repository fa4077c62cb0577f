//! Request-line tokenizer.
//!
//! The accepted grammar is deliberately narrow:
//!
//! ```text
//! request-line = method SP request-target SP "HTTP/1.1"
//! method       = 1*( %x41-5A )   ; uppercase ASCII letters
//! ```
//!
//! Any other HTTP version is rejected rather than negotiated.

use std::str::FromStr;

use tracing::trace;

use crate::codec::{CRLF, find_crlf};
use crate::ensure;
use crate::protocol::{ParseError, RequestLine};

const HTTP_NAME: &str = "HTTP";
const SUPPORTED_VERSION: &str = "1.1";

/// Takes one CRLF terminated request line from the front of `src`.
///
/// Returns `Ok(None)` if the terminator has not arrived yet, otherwise the parsed line and
/// the number of bytes it occupied including the CRLF.
pub(crate) fn decode_request_line(src: &[u8]) -> Result<Option<(RequestLine, usize)>, ParseError> {
    let Some(line_end) = find_crlf(src) else {
        return Ok(None);
    };

    let line = std::str::from_utf8(&src[..line_end])
        .map_err(|e| ParseError::invalid_request_line(format!("{} ({e})", String::from_utf8_lossy(&src[..line_end]))))?;

    let request_line = line.parse::<RequestLine>()?;
    trace!(method = request_line.method(), target = request_line.request_target(), "parsed request line");

    Ok(Some((request_line, line_end + CRLF.len())))
}

impl FromStr for RequestLine {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts = line.split(' ').collect::<Vec<_>>();
        let [method, request_target, version] = parts[..] else {
            return Err(ParseError::invalid_request_line(line));
        };

        ensure!(
            !method.is_empty() && method.bytes().all(|b| b.is_ascii_uppercase()),
            ParseError::invalid_method(method)
        );

        let version_parts = version.split('/').collect::<Vec<_>>();
        let [http_name, http_version] = version_parts[..] else {
            return Err(ParseError::invalid_request_line(line));
        };

        ensure!(http_name == HTTP_NAME, ParseError::invalid_version(http_name));
        ensure!(http_version == SUPPORTED_VERSION, ParseError::invalid_version(http_version));

        Ok(RequestLine::new(method.to_owned(), request_target.to_owned(), http_version.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_get_request_line() {
        let (line, consumed) = decode_request_line(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap().unwrap();

        assert_eq!(line.method(), "GET");
        assert_eq!(line.request_target(), "/");
        assert_eq!(line.http_version(), "1.1");
        assert_eq!(consumed, 16);
    }

    #[test]
    fn good_get_request_line_with_path() {
        let line = "GET /coffee HTTP/1.1".parse::<RequestLine>().unwrap();
        assert_eq!(line.method(), "GET");
        assert_eq!(line.request_target(), "/coffee");
        assert_eq!(line.http_version(), "1.1");
    }

    #[test]
    fn good_post_request_line() {
        let line = "POST /submit?x=1&y=2 HTTP/1.1".parse::<RequestLine>().unwrap();
        assert_eq!(line.method(), "POST");
        assert_eq!(line.request_target(), "/submit?x=1&y=2");
    }

    #[test]
    fn waits_for_terminator() {
        assert!(decode_request_line(b"GET / HTTP/1.1").unwrap().is_none());
        assert!(decode_request_line(b"GET / HTTP/1.1\r").unwrap().is_none());
        assert!(decode_request_line(b"").unwrap().is_none());
    }

    #[test]
    fn wrong_number_of_parts() {
        let err = "/coffee HTTP/1.1".parse::<RequestLine>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidRequestLine { ref line } if line == "/coffee HTTP/1.1"));

        let err = "GET  / HTTP/1.1".parse::<RequestLine>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidRequestLine { .. }));

        let err = "GET / HTTP/1.1 extra".parse::<RequestLine>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidRequestLine { .. }));
    }

    #[test]
    fn lowercase_method() {
        let err = "get / HTTP/1.1".parse::<RequestLine>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidMethod { ref method } if method == "get"));
        assert_eq!(err.to_string(), "invalid method: get");
    }

    #[test]
    fn mixed_case_method() {
        let err = "GeT / HTTP/1.1".parse::<RequestLine>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidMethod { ref method } if method == "GeT"));
    }

    #[test]
    fn empty_method() {
        let err = " / HTTP/1.1".parse::<RequestLine>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidMethod { .. }));
    }

    #[test]
    fn unsupported_version() {
        let err = "GET / HTTP/1.0".parse::<RequestLine>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidVersion { ref version } if version == "1.0"));

        let err = "GET / HTTP/2".parse::<RequestLine>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidVersion { .. }));
    }

    #[test]
    fn protocol_name_is_case_sensitive() {
        let err = "GET / http/1.1".parse::<RequestLine>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidVersion { ref version } if version == "http"));
    }

    #[test]
    fn malformed_version_field() {
        let err = "GET / HTTP1.1".parse::<RequestLine>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidRequestLine { .. }));

        let err = "GET / HTTP/1/1".parse::<RequestLine>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidRequestLine { .. }));
    }

    #[test]
    fn non_utf8_line() {
        let err = decode_request_line(b"GET /\xff HTTP/1.1\r\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidRequestLine { .. }));
    }
}
