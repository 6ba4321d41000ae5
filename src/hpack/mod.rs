// Author: tickbh

//! HPACK header compression (RFC 7541).

pub mod decoder;
pub mod encoder;
pub mod header;
pub mod huffman;
pub mod integer;
pub mod table;

pub use decoder::{Decoder, DecoderError};
pub use encoder::Encoder;
pub use header::{Header, HeaderList};
pub use table::HeaderTable;
