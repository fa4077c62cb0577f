//! Growable read buffer shared by the blocking and async drivers.
//!
//! Layout, with `capacity == buf.len()`:
//!
//! ```text
//! [ unconsumed bytes .......... | unused capacity ............ ]
//! 0                          filled                       capacity
//! ```
//!
//! Reads land in the unused capacity. After every parse pass the consumed prefix is
//! shifted out so unconsumed bytes always start at offset 0. The capacity only ever
//! doubles, and only when a read would otherwise have nowhere to go.

use bytes::BytesMut;
use tracing::trace;

use crate::ensure;
use crate::protocol::ParseError;

#[derive(Debug)]
pub struct ReadBuffer {
    /// Zero-initialised storage, its length is the capacity
    buf: BytesMut,
    /// Bytes read but not yet consumed
    filled: usize,
    /// Bytes read from the transport over the buffer's lifetime
    total_read: usize,
    max_size: Option<usize>,
}

impl ReadBuffer {
    /// Creates a buffer of `capacity` bytes (at least one) that may grow up to `max_size`.
    pub fn new(capacity: usize, max_size: Option<usize>) -> Self {
        let mut buf = BytesMut::new();
        buf.resize(capacity.max(1), 0);
        Self { buf, filled: 0, total_read: 0, max_size }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The bytes read so far and not yet consumed.
    pub fn filled(&self) -> &[u8] {
        &self.buf[..self.filled]
    }

    pub fn total_read(&self) -> usize {
        self.total_read
    }

    /// The region the next read should write into, growing the buffer first if it is full.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::BufferLimitExceeded`] if growing would pass the configured limit.
    pub fn unfilled_mut(&mut self) -> Result<&mut [u8], ParseError> {
        if self.filled >= self.buf.len() {
            self.grow()?;
        }
        Ok(&mut self.buf[self.filled..])
    }

    /// Marks `n` more bytes, just written into [`unfilled_mut`](Self::unfilled_mut), as filled.
    pub fn advance(&mut self, n: usize) {
        debug_assert!(self.filled + n <= self.buf.len());
        self.filled += n;
        self.total_read += n;
    }

    /// Drops the first `n` filled bytes and moves the rest to the front.
    pub fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.filled);
        self.buf.copy_within(n..self.filled, 0);
        self.filled -= n;
    }

    fn grow(&mut self) -> Result<(), ParseError> {
        let new_capacity = self.buf.len() * 2;
        if let Some(max_size) = self.max_size {
            ensure!(new_capacity <= max_size, ParseError::buffer_limit_exceeded(new_capacity, max_size));
        }

        trace!(from = self.buf.len(), to = new_capacity, "growing read buffer");
        self.buf.resize(new_capacity, 0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(buffer: &mut ReadBuffer, data: &[u8]) -> usize {
        let unfilled = buffer.unfilled_mut().unwrap();
        let n = unfilled.len().min(data.len());
        unfilled[..n].copy_from_slice(&data[..n]);
        buffer.advance(n);
        n
    }

    #[test]
    fn grows_only_when_full() {
        let mut buffer = ReadBuffer::new(4, None);

        assert_eq!(fill(&mut buffer, b"ab"), 2);
        assert_eq!(buffer.capacity(), 4);
        assert_eq!(fill(&mut buffer, b"cd"), 2);
        assert_eq!(buffer.capacity(), 4);

        assert_eq!(fill(&mut buffer, b"efgh"), 4);
        assert_eq!(buffer.capacity(), 8);
        assert_eq!(buffer.filled(), b"abcdefgh");

        assert_eq!(fill(&mut buffer, b"ij"), 2);
        assert_eq!(buffer.capacity(), 16);
        assert_eq!(buffer.filled(), b"abcdefghij");
        assert_eq!(buffer.total_read(), 10);
    }

    #[test]
    fn consume_compacts_to_front() {
        let mut buffer = ReadBuffer::new(8, None);
        fill(&mut buffer, b"GET / HT");

        buffer.consume(4);
        assert_eq!(buffer.filled(), b"/ HT");
        assert_eq!(buffer.unfilled_mut().unwrap().len(), 4);

        fill(&mut buffer, b"TP/1");
        assert_eq!(buffer.filled(), b"/ HTTP/1");
        assert_eq!(buffer.capacity(), 8);
        assert_eq!(buffer.total_read(), 12);

        buffer.consume(8);
        assert!(buffer.filled().is_empty());
    }

    #[test]
    fn never_shrinks() {
        let mut buffer = ReadBuffer::new(2, None);
        fill(&mut buffer, b"ab");
        fill(&mut buffer, b"cd");
        assert_eq!(buffer.capacity(), 4);

        buffer.consume(4);
        assert_eq!(buffer.capacity(), 4);
    }

    #[test]
    fn growth_respects_limit() {
        let mut buffer = ReadBuffer::new(4, Some(8));
        fill(&mut buffer, b"abcd");
        fill(&mut buffer, b"efgh");
        assert_eq!(buffer.capacity(), 8);

        let err = buffer.unfilled_mut().unwrap_err();
        assert!(matches!(err, ParseError::BufferLimitExceeded { size: 16, max_size: 8 }));
        assert_eq!(buffer.filled(), b"abcdefgh");
    }

    #[test]
    fn zero_capacity_is_bumped() {
        let mut buffer = ReadBuffer::new(0, None);
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.unfilled_mut().unwrap().len(), 1);
    }
}
