//! Header collection used both for parsed requests and outbound responses.
//!
//! [`Headers`] wraps [`http::HeaderMap`], which gives case-insensitive lookup and keeps
//! every value of a repeated name in insertion order. Parsing is incremental: each call to
//! [`Headers::parse`] consumes at most one complete header line from the window it is given.

use http::header::{GetAll, Iter};
use http::{HeaderMap, HeaderName, HeaderValue};

use crate::codec::header::HeaderDecoder;
use crate::protocol::ParseError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    inner: HeaderMap,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one header line from the front of `data`.
    ///
    /// Returns the number of bytes consumed and whether the blank line ending the header
    /// block was seen. `(0, false)` means no complete line is available yet.
    pub fn parse(&mut self, data: &[u8]) -> Result<(usize, bool), ParseError> {
        HeaderDecoder.decode(self, data)
    }

    /// Case-insensitive lookup. Repeated headers are joined with `", "` in the order received.
    pub fn get<K: AsRef<str>>(&self, name: K) -> Option<String> {
        let mut values = self.inner.get_all(name.as_ref()).iter();
        let first = values.next()?;

        let mut joined = String::from_utf8_lossy(first.as_bytes()).into_owned();
        for value in values {
            joined.push_str(", ");
            joined.push_str(&String::from_utf8_lossy(value.as_bytes()));
        }
        Some(joined)
    }

    /// Every value stored under `name`, in insertion order.
    pub fn get_all<K: AsRef<str>>(&self, name: K) -> GetAll<'_, HeaderValue> {
        self.inner.get_all(name.as_ref())
    }

    pub fn contains<K: AsRef<str>>(&self, name: K) -> bool {
        self.inner.contains_key(name.as_ref())
    }

    /// Adds a value, keeping any values already present under the same name.
    pub fn append(&mut self, name: HeaderName, value: HeaderValue) {
        self.inner.append(name, value);
    }

    /// Sets a value, replacing every value previously stored under the same name.
    pub fn insert(&mut self, name: HeaderName, value: HeaderValue) {
        self.inner.insert(name, value);
    }

    pub fn remove<K: AsRef<str>>(&mut self, name: K) -> Option<HeaderValue> {
        self.inner.remove(name.as_ref())
    }

    /// Overrides `self` with every header in `other`.
    ///
    /// Names present in `other` replace all of their values here; the rest are kept.
    pub fn extend_overriding(&mut self, other: Headers) {
        let mut last_name = None;
        for (name, value) in other.inner {
            match name {
                Some(name) => {
                    self.inner.insert(name.clone(), value);
                    last_name = Some(name);
                }
                // a `None` name continues the previous name's values
                None => {
                    if let Some(name) = &last_name {
                        self.inner.append(name.clone(), value);
                    }
                }
            }
        }
    }

    pub fn iter(&self) -> Iter<'_, HeaderValue> {
        self.inner.iter()
    }

    /// Number of stored values, counting repeated names once per value.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn as_header_map(&self) -> &HeaderMap {
        &self.inner
    }
}

impl From<HeaderMap> for Headers {
    fn from(inner: HeaderMap) -> Self {
        Self { inner }
    }
}

impl From<Headers> for HeaderMap {
    fn from(headers: Headers) -> Self {
        headers.inner
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a HeaderName, &'a HeaderValue);
    type IntoIter = Iter<'a, HeaderValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{CONTENT_LENGTH, CONTENT_TYPE, HOST};

    #[test]
    fn parse_single_line() {
        let mut headers = Headers::new();
        let data = b"Host: localhost:42069\r\n\r\n";

        let (consumed, done) = headers.parse(data).unwrap();

        assert_eq!(consumed, 23);
        assert!(!done);
        assert_eq!(headers.get("host").as_deref(), Some("localhost:42069"));
    }

    #[test]
    fn parse_terminator() {
        let mut headers = Headers::new();
        let (consumed, done) = headers.parse(b"\r\nleftover").unwrap();

        assert_eq!(consumed, 2);
        assert!(done);
        assert!(headers.is_empty());
    }

    #[test]
    fn parse_needs_more_data() {
        let mut headers = Headers::new();
        let (consumed, done) = headers.parse(b"Host: local").unwrap();

        assert_eq!(consumed, 0);
        assert!(!done);
        assert!(headers.is_empty());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut headers = Headers::new();
        headers.parse(b"Content-Length: 13\r\n").unwrap();

        assert_eq!(headers.get("content-length").as_deref(), Some("13"));
        assert_eq!(headers.get("CONTENT-LENGTH").as_deref(), Some("13"));
        assert!(headers.contains(CONTENT_LENGTH));
        assert_eq!(headers.get("missing"), None);
    }

    #[test]
    fn duplicates_joined_in_order() {
        let mut headers = Headers::new();
        headers.parse(b"Set-Person: lane-loves-go\r\n").unwrap();
        headers.parse(b"Set-Person: prime-loves-zig\r\n").unwrap();
        headers.parse(b"set-person: tj-loves-ocaml\r\n").unwrap();

        assert_eq!(headers.len(), 3);
        assert_eq!(headers.get("Set-Person").as_deref(), Some("lane-loves-go, prime-loves-zig, tj-loves-ocaml"));
        assert_eq!(headers.get_all("set-person").iter().count(), 3);
    }

    #[test]
    fn insert_replaces_append_keeps() {
        let mut headers = Headers::new();
        headers.append(HOST, HeaderValue::from_static("a"));
        headers.append(HOST, HeaderValue::from_static("b"));
        assert_eq!(headers.get(HOST).as_deref(), Some("a, b"));

        headers.insert(HOST, HeaderValue::from_static("c"));
        assert_eq!(headers.get(HOST).as_deref(), Some("c"));

        assert_eq!(headers.remove(HOST), Some(HeaderValue::from_static("c")));
        assert!(headers.is_empty());
    }

    #[test]
    fn extend_overriding_replaces_only_named() {
        let mut base = Headers::new();
        base.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        base.insert(CONTENT_LENGTH, HeaderValue::from_static("3"));

        let mut overrides = Headers::new();
        overrides.append(CONTENT_TYPE, HeaderValue::from_static("text/html"));
        overrides.append(HOST, HeaderValue::from_static("a"));
        overrides.append(HOST, HeaderValue::from_static("b"));

        base.extend_overriding(overrides);

        assert_eq!(base.get(CONTENT_TYPE).as_deref(), Some("text/html"));
        assert_eq!(base.get(CONTENT_LENGTH).as_deref(), Some("3"));
        assert_eq!(base.get(HOST).as_deref(), Some("a, b"));
    }
}
