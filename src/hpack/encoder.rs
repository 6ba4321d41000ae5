// Author: tickbh

//! HPACK encoder (RFC 7541 3.1, 6).

use std::collections::HashSet;

use crate::http2::Http2Error;

use super::header::Header;
use super::huffman::encode_huffman;
use super::integer::encode_integer;
use super::table::{HeaderTable, Match};

const DEFAULT_SENSITIVE_NAMES: &[&str] =
    &["cookie", "proxy-authenticate", "set-cookie", "www-authenticate"];

/// How a header was classified before choosing its wire representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    /// Value must never enter the dynamic table; always Never Indexed.
    Sensitive,
    /// Large entries are encoded without indexing to leave the table
    /// room for smaller, more reusable headers.
    Big,
    Indexable,
}

/// Stateful HPACK encoder. Owns the local-direction dynamic table and
/// the set of header names whose values must never be indexed.
pub struct Encoder {
    table: HeaderTable,
    sensitive: HashSet<Vec<u8>>,
    huffman_literals: bool,
    max_size_limit: usize,
    pending_size_update: Option<usize>,
}

impl Encoder {
    pub fn new() -> Self {
        Encoder {
            table: HeaderTable::new(),
            sensitive: default_sensitive_set(),
            huffman_literals: false,
            max_size_limit: super::table::DEFAULT_MAX_SIZE,
            pending_size_update: None,
        }
    }

    pub fn reset(&mut self) {
        self.table.reset();
        self.sensitive = default_sensitive_set();
        self.pending_size_update = None;
        self.max_size_limit = super::table::DEFAULT_MAX_SIZE;
    }

    pub fn mark_sensitive(&mut self, name: impl Into<Vec<u8>>) {
        self.sensitive.insert(name.into());
    }

    /// Whether string literals are Huffman-coded. Off by default:
    /// opportunistic Huffman coding is a policy choice, not forced.
    pub fn set_huffman_literals(&mut self, enabled: bool) {
        self.huffman_literals = enabled;
    }

    /// Call when the peer's SETTINGS_HEADER_TABLE_SIZE changes. Shrinks
    /// the dynamic table immediately if needed and queues a Dynamic
    /// Table Size Update to be emitted before the next header block.
    pub fn on_settings_header_table_size(&mut self, max_size: usize) {
        self.max_size_limit = max_size;
        if self.table.max_size() > max_size {
            self.table.set_max_size(max_size);
            self.pending_size_update = Some(max_size);
        }
    }

    /// Caller-directed resize of the dynamic table (e.g. to use less
    /// memory than SETTINGS allows). Rejected if it would exceed the
    /// limit the peer most recently established.
    pub fn set_max_table_size(&mut self, max_size: usize) -> Result<(), Http2Error> {
        if max_size > self.max_size_limit {
            return Err(Http2Error::InvalidSettingValue);
        }
        self.table.set_max_size(max_size);
        self.pending_size_update = Some(max_size);
        Ok(())
    }

    /// Encodes a single header, flushing any queued size update first.
    pub fn encode(&mut self, header: &Header, out: &mut Vec<u8>) {
        self.flush_pending_size_update(out);
        self.encode_header(header, out);
    }

    /// Encodes every header in `headers` into one header block.
    pub fn encode_all<'a, I>(&mut self, headers: I, out: &mut Vec<u8>)
    where
        I: IntoIterator<Item = &'a Header>,
    {
        self.flush_pending_size_update(out);
        for header in headers {
            self.encode_header(header, out);
        }
    }

    fn flush_pending_size_update(&mut self, out: &mut Vec<u8>) {
        if let Some(max_size) = self.pending_size_update.take() {
            encode_integer(0x20, 5, max_size as u64, out);
        }
    }

    fn classify(&self, header: &Header) -> Class {
        if self.sensitive.contains(&header.name) {
            Class::Sensitive
        } else if header.size() > 256 {
            Class::Big
        } else {
            Class::Indexable
        }
    }

    fn encode_header(&mut self, header: &Header, out: &mut Vec<u8>) {
        let class = self.classify(header);

        match self.table.best_match(header) {
            Match::Full(index) => {
                encode_integer(0x80, 7, index as u64, out);
            }
            Match::Name(index) => {
                let (high, prefix) = literal_prefix(class);
                encode_integer(high, prefix, index as u64, out);
                self.encode_string(&header.value, out);
                if class == Class::Indexable {
                    self.table.add(header.clone());
                }
            }
            Match::None => {
                let (high, prefix) = literal_prefix(class);
                encode_integer(high, prefix, 0, out);
                self.encode_string(&header.name, out);
                self.encode_string(&header.value, out);
                if class == Class::Indexable {
                    self.table.add(header.clone());
                }
            }
        }
    }

    fn encode_string(&self, data: &[u8], out: &mut Vec<u8>) {
        if self.huffman_literals {
            let mut encoded = Vec::new();
            encode_huffman(data, &mut encoded);
            encode_integer(0x80, 7, encoded.len() as u64, out);
            out.extend_from_slice(&encoded);
        } else {
            encode_integer(0x00, 7, data.len() as u64, out);
            out.extend_from_slice(data);
        }
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

fn default_sensitive_set() -> HashSet<Vec<u8>> {
    DEFAULT_SENSITIVE_NAMES
        .iter()
        .map(|s| s.as_bytes().to_vec())
        .collect()
}

/// `(high_bits, prefix_bits)` for the literal representation a class uses.
fn literal_prefix(class: Class) -> (u8, u8) {
    match class {
        Class::Sensitive => (0x10, 4),
        Class::Big => (0x00, 4),
        Class::Indexable => (0x40, 6),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hpack::decoder::Decoder;

    #[test]
    fn indexed_name_and_value_from_static_table() {
        let mut encoder = Encoder::new();
        let mut out = Vec::new();
        encoder.encode(&Header::new(":method", "GET"), &mut out);
        assert_eq!(out, vec![0x82]);
    }

    #[test]
    fn new_name_gets_incremental_indexing_by_default() {
        let mut encoder = Encoder::new();
        let mut out = Vec::new();
        encoder.encode(&Header::new("custom-key", "custom-header"), &mut out);
        assert_eq!(out[0] & 0b1100_0000, 0b0100_0000);
    }

    #[test]
    fn sensitive_header_never_indexed_and_not_added_to_table() {
        let mut encoder = Encoder::new();
        let mut out = Vec::new();
        encoder.encode(&Header::new("cookie", "sekret"), &mut out);
        assert_eq!(out[0] & 0b1111_0000, 0b0001_0000);

        let mut decoder = Decoder::new();
        let decoded = decoder.decode(&out).unwrap();
        assert_eq!(decoded.first(b"cookie").unwrap().value, b"sekret");
    }

    #[test]
    fn round_trips_through_decoder_and_builds_matching_table() {
        let mut encoder = Encoder::new();
        let mut decoder = Decoder::new();
        let headers = vec![
            Header::new(":method", "GET"),
            Header::new(":scheme", "http"),
            Header::new(":path", "/"),
            Header::new(":authority", "www.example.com"),
            Header::new("cookie", "sekret"),
        ];

        let mut out = Vec::new();
        encoder.encode_all(headers.iter(), &mut out);
        let decoded = decoder.decode(&out).unwrap();

        let decoded: Vec<Header> = decoded.into_iter().collect();
        assert_eq!(decoded, headers);
    }

    #[test]
    fn max_table_size_zero_prevents_indexing_state() {
        let mut encoder = Encoder::new();
        encoder.on_settings_header_table_size(0);
        let mut first = Vec::new();
        encoder.encode(&Header::new("x-custom", "value"), &mut first);
        let mut second = Vec::new();
        encoder.encode(&Header::new("x-custom", "value"), &mut second);
        // No size update pending on the second call; same representation length.
        assert_eq!(first.len() - size_update_len(0), second.len());
    }

    fn size_update_len(n: usize) -> usize {
        let mut out = Vec::new();
        encode_integer(0x20, 5, n as u64, &mut out);
        out.len()
    }

    #[test]
    fn set_max_table_size_above_settings_limit_is_rejected() {
        let mut encoder = Encoder::new();
        encoder.on_settings_header_table_size(100);
        assert!(matches!(
            encoder.set_max_table_size(200),
            Err(Http2Error::InvalidSettingValue)
        ));
    }
}
