// Author: tickbh

//! HPACK decoder (RFC 7541 3.2, 6).

use std::fmt;

use super::header::{Header, HeaderList};
use super::huffman::decode_huffman;
use super::integer::decode_integer;
use super::table::HeaderTable;

/// Failure decoding a header block. Any of these means the connection
/// the block belonged to must be torn down - HPACK has no way to
/// resynchronise mid-block once a representation has been mis-parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderError {
    UnexpectedEndOfStream,
    IntegerOverflow,
    InvalidIndex,
    InvalidHuffmanCode,
    InvalidHuffmanPadding,
    HuffmanEosInStream,
    /// A Dynamic Table Size Update appeared after another representation
    /// within the same header block; RFC 7541 4.2 only allows it at the
    /// start of a block (or immediately following another size update).
    SizeUpdateNotAtBlockStart,
    /// A Dynamic Table Size Update requested a max size above the limit
    /// the peer established via SETTINGS_HEADER_TABLE_SIZE.
    MaxSizeExceedsLimit,
}

impl DecoderError {
    pub fn description_str(&self) -> &'static str {
        match self {
            DecoderError::UnexpectedEndOfStream => "truncated hpack input",
            DecoderError::IntegerOverflow => "hpack integer overflowed 32 bits",
            DecoderError::InvalidIndex => "hpack index out of range",
            DecoderError::InvalidHuffmanCode => "invalid huffman code",
            DecoderError::InvalidHuffmanPadding => "invalid huffman padding",
            DecoderError::HuffmanEosInStream => "huffman eos symbol in string literal",
            DecoderError::SizeUpdateNotAtBlockStart => {
                "dynamic table size update outside block prefix"
            }
            DecoderError::MaxSizeExceedsLimit => "dynamic table size update exceeds settings limit",
        }
    }
}

impl fmt::Display for DecoderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description_str())
    }
}

impl std::error::Error for DecoderError {}

/// Which of the five wire representations a leading octet selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Representation {
    Indexed,
    LiteralWithIncrementalIndexing,
    LiteralWithoutIndexing,
    LiteralNeverIndexed,
    SizeUpdate,
}

impl Representation {
    fn load(octet: u8) -> Representation {
        if octet & 0b1000_0000 != 0 {
            Representation::Indexed
        } else if octet & 0b1100_0000 == 0b0100_0000 {
            Representation::LiteralWithIncrementalIndexing
        } else if octet & 0b1110_0000 == 0b0010_0000 {
            Representation::SizeUpdate
        } else if octet & 0b1111_0000 == 0b0001_0000 {
            Representation::LiteralNeverIndexed
        } else {
            Representation::LiteralWithoutIndexing
        }
    }
}

/// Streaming HPACK decoder. Owns the peer-direction dynamic table and
/// tracks the SETTINGS-established ceiling on its size.
pub struct Decoder {
    table: HeaderTable,
    max_size_limit: usize,
}

impl Decoder {
    pub fn new() -> Self {
        Decoder {
            table: HeaderTable::new(),
            max_size_limit: super::table::DEFAULT_MAX_SIZE,
        }
    }

    pub fn with_max_size(max_size: usize) -> Self {
        Decoder {
            table: HeaderTable::with_max_size(max_size),
            max_size_limit: max_size,
        }
    }

    pub fn reset(&mut self) {
        self.table.reset();
        self.max_size_limit = super::table::DEFAULT_MAX_SIZE;
    }

    /// Updates the ceiling a Dynamic Table Size Update may not exceed -
    /// this is the local SETTINGS_HEADER_TABLE_SIZE the decoder's owner
    /// advertised to the peer, not the table's live size.
    pub fn set_max_table_size(&mut self, max_size: usize) {
        self.max_size_limit = max_size;
        if self.table.max_size() > max_size {
            self.table.set_max_size(max_size);
        }
    }

    pub fn max_table_size(&self) -> usize {
        self.max_size_limit
    }

    pub fn table_dynamic_len(&self) -> usize {
        self.table.dynamic_len()
    }

    /// Decodes one complete header block, invoking `cb` with each
    /// header in wire order.
    pub fn decode_with_cb<F: FnMut(Header)>(
        &mut self,
        buf: &[u8],
        mut cb: F,
    ) -> Result<(), DecoderError> {
        let mut pos = 0;
        let mut seen_header = false;

        while pos < buf.len() {
            match Representation::load(buf[pos]) {
                Representation::Indexed => {
                    let (index, consumed) = decode_integer(&buf[pos..], 7)?;
                    pos += consumed;
                    if index == 0 {
                        return Err(DecoderError::InvalidIndex);
                    }
                    let header = self
                        .table
                        .at(index as usize)
                        .ok_or(DecoderError::InvalidIndex)?
                        .clone();
                    cb(header);
                    seen_header = true;
                }
                Representation::LiteralWithIncrementalIndexing => {
                    let (header, consumed) = self.decode_literal(&buf[pos..], 6)?;
                    pos += consumed;
                    self.table.add(header.clone());
                    cb(header);
                    seen_header = true;
                }
                Representation::LiteralWithoutIndexing => {
                    let (header, consumed) = self.decode_literal(&buf[pos..], 4)?;
                    pos += consumed;
                    cb(header);
                    seen_header = true;
                }
                Representation::LiteralNeverIndexed => {
                    let (header, consumed) = self.decode_literal(&buf[pos..], 4)?;
                    pos += consumed;
                    cb(header);
                    seen_header = true;
                }
                Representation::SizeUpdate => {
                    if seen_header {
                        return Err(DecoderError::SizeUpdateNotAtBlockStart);
                    }
                    let (new_max, consumed) = decode_integer(&buf[pos..], 5)?;
                    pos += consumed;
                    if new_max as usize > self.max_size_limit {
                        return Err(DecoderError::MaxSizeExceedsLimit);
                    }
                    self.table.set_max_size(new_max as usize);
                }
            }
        }

        Ok(())
    }

    /// Decodes one complete header block into an ordered [`HeaderList`].
    pub fn decode(&mut self, buf: &[u8]) -> Result<HeaderList, DecoderError> {
        let mut list = HeaderList::new();
        self.decode_with_cb(buf, |h| list.push(h))?;
        Ok(list)
    }

    fn decode_literal(&self, buf: &[u8], prefix_bits: u8) -> Result<(Header, usize), DecoderError> {
        let (index, mut consumed) = decode_integer(buf, prefix_bits)?;

        let name = if index == 0 {
            let (name, c) = self.decode_string(&buf[consumed..])?;
            consumed += c;
            name
        } else {
            let name = self
                .table
                .at(index as usize)
                .ok_or(DecoderError::InvalidIndex)?
                .name
                .clone();
            name
        };

        let (value, c) = self.decode_string(&buf[consumed..])?;
        consumed += c;

        Ok((Header { name, value }, consumed))
    }

    fn decode_string(&self, buf: &[u8]) -> Result<(Vec<u8>, usize), DecoderError> {
        let first = *buf.first().ok_or(DecoderError::UnexpectedEndOfStream)?;
        let huffman = first & 0x80 != 0;
        let (len, mut consumed) = decode_integer(buf, 7)?;
        let len = len as usize;

        if buf.len() < consumed + len {
            return Err(DecoderError::UnexpectedEndOfStream);
        }
        let raw = &buf[consumed..consumed + len];
        consumed += len;

        let data = if huffman {
            decode_huffman(raw)?
        } else {
            raw.to_vec()
        };

        Ok((data, consumed))
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_to_vec(hex: &str) -> Vec<u8> {
        (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn indexed_representation_zero_index_is_rejected() {
        let mut decoder = Decoder::new();
        assert_eq!(
            decoder.decode(&[0x80]).unwrap_err(),
            DecoderError::InvalidIndex
        );
    }

    #[test]
    fn c_2_1_literal_with_indexing_new_name() {
        let mut decoder = Decoder::new();
        let input = hex_to_vec("400a637573746f6d2d6b65790d637573746f6d2d686561646572");
        let list = decoder.decode(&input).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.iter().next().unwrap().name, b"custom-key");
        assert_eq!(list.iter().next().unwrap().value, b"custom-header");
        assert_eq!(decoder.table.dynamic_len(), 1);
    }

    #[test]
    fn c_2_4_indexed_representation() {
        let mut decoder = Decoder::new();
        let list = decoder.decode(&[0x82]).unwrap();
        assert_eq!(list.iter().next().unwrap().name, b":method");
        assert_eq!(list.iter().next().unwrap().value, b"GET");
        assert_eq!(decoder.table.dynamic_len(), 0);
    }

    #[test]
    fn truncated_name_literal_length_fails() {
        let mut decoder = Decoder::new();
        // Literal with incremental indexing, new name, length byte says 10
        // bytes follow but only 2 are present.
        let input = [0x40, 0x0a, b'c', b'u'];
        assert_eq!(
            decoder.decode(&input).unwrap_err(),
            DecoderError::UnexpectedEndOfStream
        );
    }

    #[test]
    fn size_update_after_header_in_same_block_fails() {
        let mut decoder = Decoder::new();
        let mut input = vec![0x82]; // :method: GET
        input.push(0x20); // size update to 0, but not at block start
        assert_eq!(
            decoder.decode(&input).unwrap_err(),
            DecoderError::SizeUpdateNotAtBlockStart
        );
    }

    #[test]
    fn size_update_exceeding_settings_limit_fails() {
        let mut decoder = Decoder::new();
        decoder.set_max_table_size(100);
        let mut out = Vec::new();
        super::super::integer::encode_integer(0x20, 5, 200, &mut out);
        assert_eq!(
            decoder.decode(&out).unwrap_err(),
            DecoderError::MaxSizeExceedsLimit
        );
    }

    #[test]
    fn size_update_at_block_start_is_allowed_and_applies() {
        let mut decoder = Decoder::new();
        let mut out = Vec::new();
        super::super::integer::encode_integer(0x20, 5, 256, &mut out);
        decoder.decode(&out).unwrap();
        assert_eq!(decoder.table.max_size(), 256);
    }
}
