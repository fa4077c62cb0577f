//! Line-at-a-time decoder for the request header block.
//!
//! Unlike a whole-block parser, [`HeaderDecoder`] only ever looks at the first complete
//! line of its input, so the request decoder can feed it whatever happens to be buffered
//! and resume on the next read without re-scanning lines it has already taken.
//!
//! A header line has the shape `name ":" OWS value OWS CRLF`:
//!
//! - leading whitespace before the name is tolerated
//! - whitespace between the name and the colon is rejected
//! - the name must be a valid token and is stored lower-cased
//! - surrounding whitespace around the value is trimmed
//!
//! A line consisting only of CRLF ends the header block.

use http::{HeaderName, HeaderValue};
use tracing::trace;

use crate::codec::{CRLF, find_crlf};
use crate::ensure;
use crate::protocol::{Headers, ParseError};

/// Decoder for one header line at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderDecoder;

impl HeaderDecoder {
    /// Decodes the first header line in `src` into `headers`.
    ///
    /// # Returns
    ///
    /// - `Ok((0, false))` if `src` holds no complete line yet
    /// - `Ok((2, true))` if `src` starts with the blank line ending the block
    /// - `Ok((n, false))` if one field line of `n` bytes (terminator included) was recorded
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidHeader`] if the line is not a well formed field line.
    pub fn decode(&mut self, headers: &mut Headers, src: &[u8]) -> Result<(usize, bool), ParseError> {
        let Some(line_end) = find_crlf(src) else {
            return Ok((0, false));
        };

        if line_end == 0 {
            trace!("reached end of header block");
            return Ok((CRLF.len(), true));
        }

        let (name, value) = parse_field_line(&src[..line_end])?;
        trace!(name = %name, "parsed header");
        headers.append(name, value);

        Ok((line_end + CRLF.len(), false))
    }
}

fn parse_field_line(line: &[u8]) -> Result<(HeaderName, HeaderValue), ParseError> {
    let colon = line
        .iter()
        .position(|b| *b == b':')
        .ok_or_else(|| ParseError::invalid_header(format!("malformed header line: {}", String::from_utf8_lossy(line))))?;

    let (raw_name, raw_value) = (&line[..colon], &line[colon + 1..]);

    ensure!(
        !raw_name.last().is_some_and(u8::is_ascii_whitespace),
        ParseError::invalid_header(format!("whitespace before colon in header: {}", String::from_utf8_lossy(raw_name)))
    );

    let raw_name = raw_name.trim_ascii_start();
    ensure!(!raw_name.is_empty(), ParseError::invalid_header("empty header name"));

    let name = HeaderName::from_bytes(raw_name).map_err(|e| {
        ParseError::invalid_header(format!("invalid header name {}: {e}", String::from_utf8_lossy(raw_name)))
    })?;

    let value = HeaderValue::from_bytes(raw_value.trim_ascii())
        .map_err(|e| ParseError::invalid_header(format!("invalid value for header {name}: {e}")))?;

    Ok((name, value))
}
