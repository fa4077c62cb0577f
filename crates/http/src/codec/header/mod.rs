//! Header block processing for requests and responses
//!
//! - [`HeaderDecoder`]: takes one request header line at a time into a [`Headers`](crate::protocol::Headers)
//! - [`HeaderEncoder`]: writes a response header block

mod header_decoder;
mod header_encoder;

pub use header_decoder::HeaderDecoder;
pub use header_encoder::HeaderEncoder;
