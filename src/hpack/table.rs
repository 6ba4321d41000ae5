// Author: tickbh

//! Combined static + dynamic indexing table (RFC 7541 2.3).
//!
//! Indices `1..=61` address the immutable static table; indices above
//! 61 address the dynamic table, newest entry first (index 62 is
//! always the most recently inserted dynamic entry, for as long as it
//! survives eviction).

use std::collections::VecDeque;

use lazy_static::lazy_static;

use super::header::Header;

pub const STATIC_TABLE_LEN: usize = 61;

pub const DEFAULT_MAX_SIZE: usize = 4_096;

static STATIC_TABLE_RAW: &[(&str, &str)] = &[
    (":authority", ""),
    (":method", "GET"),
    (":method", "POST"),
    (":path", "/"),
    (":path", "/index.html"),
    (":scheme", "http"),
    (":scheme", "https"),
    (":status", "200"),
    (":status", "204"),
    (":status", "206"),
    (":status", "304"),
    (":status", "400"),
    (":status", "404"),
    (":status", "500"),
    ("accept-charset", ""),
    ("accept-encoding", "gzip, deflate"),
    ("accept-language", ""),
    ("accept-ranges", ""),
    ("accept", ""),
    ("access-control-allow-origin", ""),
    ("age", ""),
    ("allow", ""),
    ("authorization", ""),
    ("cache-control", ""),
    ("content-disposition", ""),
    ("content-encoding", ""),
    ("content-language", ""),
    ("content-length", ""),
    ("content-location", ""),
    ("content-range", ""),
    ("content-type", ""),
    ("cookie", ""),
    ("date", ""),
    ("etag", ""),
    ("expect", ""),
    ("expires", ""),
    ("from", ""),
    ("host", ""),
    ("if-match", ""),
    ("if-modified-since", ""),
    ("if-none-match", ""),
    ("if-range", ""),
    ("if-unmodified-since", ""),
    ("last-modified", ""),
    ("link", ""),
    ("location", ""),
    ("max-forwards", ""),
    ("proxy-authenticate", ""),
    ("proxy-authorization", ""),
    ("range", ""),
    ("referer", ""),
    ("refresh", ""),
    ("retry-after", ""),
    ("server", ""),
    ("set-cookie", ""),
    ("strict-transport-security", ""),
    ("transfer-encoding", ""),
    ("user-agent", ""),
    ("vary", ""),
    ("via", ""),
    ("www-authenticate", ""),
];

lazy_static! {
    static ref STATIC_TABLE: Vec<Header> = STATIC_TABLE_RAW
        .iter()
        .map(|&(name, value)| Header::new(name.as_bytes(), value.as_bytes()))
        .collect();
}

/// Where a `best_match` lookup landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// No entry shares this header's name.
    None,
    /// An entry at this index shares the name only.
    Name(usize),
    /// An entry at this index shares both name and value.
    Full(usize),
}

/// Static table plus a byte-accounted, size-bounded dynamic table.
pub struct HeaderTable {
    dynamic: VecDeque<Header>,
    size: usize,
    max_size: usize,
}

impl HeaderTable {
    pub fn new() -> Self {
        HeaderTable {
            dynamic: VecDeque::new(),
            size: 0,
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    pub fn with_max_size(max_size: usize) -> Self {
        HeaderTable {
            dynamic: VecDeque::new(),
            size: 0,
            max_size,
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn dynamic_len(&self) -> usize {
        self.dynamic.len()
    }

    pub fn reset(&mut self) {
        self.dynamic.clear();
        self.size = 0;
        self.max_size = DEFAULT_MAX_SIZE;
    }

    /// Resolves a combined static+dynamic index (1-based). `None` if out of range.
    pub fn at(&self, index: usize) -> Option<&Header> {
        if index == 0 {
            return None;
        }
        if index <= STATIC_TABLE_LEN {
            return STATIC_TABLE.get(index - 1);
        }
        self.dynamic.get(index - STATIC_TABLE_LEN - 1)
    }

    /// Inserts `header` at the newest dynamic position, then evicts
    /// from the oldest end until the table fits `max_size` again.
    pub fn add(&mut self, header: Header) {
        self.size += header.size();
        self.dynamic.push_front(header);
        self.evict_to_fit();
    }

    fn evict_to_fit(&mut self) {
        while self.size > self.max_size {
            match self.dynamic.pop_back() {
                Some(evicted) => self.size -= evicted.size(),
                None => {
                    self.size = 0;
                    break;
                }
            }
        }
    }

    /// Lowers or raises the dynamic table's capacity, evicting as needed.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        self.evict_to_fit();
    }

    /// Finds the best combined index for `header`, preferring a
    /// full name+value match over a name-only match, and preferring
    /// the static table over the dynamic table within each class.
    pub fn best_match(&self, header: &Header) -> Match {
        let mut name_match: Option<usize> = None;

        for (i, candidate) in STATIC_TABLE.iter().enumerate() {
            if candidate.name == header.name {
                if candidate.value == header.value {
                    return Match::Full(i + 1);
                }
                if name_match.is_none() {
                    name_match = Some(i + 1);
                }
            }
        }

        for (i, candidate) in self.dynamic.iter().enumerate() {
            if candidate.name == header.name {
                if candidate.value == header.value {
                    return Match::Full(STATIC_TABLE_LEN + i + 1);
                }
                if name_match.is_none() {
                    name_match = Some(STATIC_TABLE_LEN + i + 1);
                }
            }
        }

        match name_match {
            Some(i) => Match::Name(i),
            None => Match::None,
        }
    }
}

impl Default for HeaderTable {
    fn default() -> Self {
        Self::new()
    }
}
