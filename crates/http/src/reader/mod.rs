//! Stream reader drivers
//!
//! A driver owns a [`ReadBuffer`], pulls bytes from a transport in bounded reads, hands
//! everything unconsumed to a [`RequestDecoder`](crate::codec::RequestDecoder) and keeps
//! whatever the decoder did not take for the next pass.
//!
//! - [`RequestReader::read_request`]: blocking, over [`std::io::Read`]
//! - [`RequestReader::read_request_async`]: over [`tokio::io::AsyncRead`]
//!
//! Both stop as soon as the request is complete and never read past that point.

mod read_buffer;
mod request_reader;

pub use read_buffer::ReadBuffer;
pub use request_reader::DEFAULT_BUFFER_SIZE;
pub use request_reader::RequestReader;
pub use request_reader::request_from_reader;
