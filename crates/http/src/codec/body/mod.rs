//! Request body handling
//!
//! Only `Content-Length` delimited bodies are supported. A request without that header is
//! treated as bodiless.

mod length_decoder;

pub use length_decoder::LengthDecoder;
pub use length_decoder::parse_content_length;
