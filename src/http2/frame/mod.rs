// Copyright 2022 - 2023 Wenmeng See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Author: tickbh

//! The thin frame-header and SETTINGS boundary HPACK sits behind.
//!
//! Only enough of RFC 9113's frame layer lives here to carry a
//! `SETTINGS_HEADER_TABLE_SIZE` update end to end: the 9-byte frame
//! header, `Kind`, `Flag`, `StreamIdentifier`, and the SETTINGS
//! payload codec. HEADERS/CONTINUATION reassembly, flow control,
//! priority and the other frame types are connection-layer concerns
//! this crate does not model.

mod flag;
mod frame;
mod settings;

pub use flag::Flag;
pub use frame::{FrameHeader, FRAME_HEADER_BYTES};
pub use settings::{Setting, SettingIdentifier, Settings};

use crate::binary::{Buf, BufMut};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Data,
    Headers,
    Priority,
    Reset,
    Settings,
    PushPromise,
    Ping,
    GoAway,
    WindowUpdate,
    Continuation,
    Unknown(u8),
}

impl Kind {
    pub fn new(byte: u8) -> Kind {
        match byte {
            0x0 => Kind::Data,
            0x1 => Kind::Headers,
            0x2 => Kind::Priority,
            0x3 => Kind::Reset,
            0x4 => Kind::Settings,
            0x5 => Kind::PushPromise,
            0x6 => Kind::Ping,
            0x7 => Kind::GoAway,
            0x8 => Kind::WindowUpdate,
            0x9 => Kind::Continuation,
            other => Kind::Unknown(other),
        }
    }

    pub fn encode(&self) -> u8 {
        match *self {
            Kind::Data => 0x0,
            Kind::Headers => 0x1,
            Kind::Priority => 0x2,
            Kind::Reset => 0x3,
            Kind::Settings => 0x4,
            Kind::PushPromise => 0x5,
            Kind::Ping => 0x6,
            Kind::GoAway => 0x7,
            Kind::WindowUpdate => 0x8,
            Kind::Continuation => 0x9,
            Kind::Unknown(b) => b,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamIdentifier(pub u32);

const MASK_U31: u32 = (1 << 31) - 1;

impl StreamIdentifier {
    pub fn zero() -> StreamIdentifier {
        StreamIdentifier(0)
    }

    pub fn client_first() -> StreamIdentifier {
        StreamIdentifier(1)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn parse<T: Buf>(buf: &mut T) -> StreamIdentifier {
        StreamIdentifier(buf.get_u32() & MASK_U31)
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u32(self.0 & MASK_U31);
    }
}

pub(crate) fn read_u24<T: Buf>(buf: &mut T) -> u32 {
    let a = buf.get_u8() as u32;
    let b = buf.get_u8() as u32;
    let c = buf.get_u8() as u32;
    (a << 16) | (b << 8) | c
}

pub(crate) fn encode_u24<B: BufMut>(buf: &mut B, value: u32) -> usize {
    buf.put_u8((value >> 16) as u8);
    buf.put_u8((value >> 8) as u8);
    buf.put_u8(value as u8);
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_identifier_strips_reserved_bit() {
        let mut buf = crate::binary::Cursor::new(&[0x80, 0x00, 0x00, 0x01]);
        assert_eq!(StreamIdentifier::parse(&mut buf), StreamIdentifier(1));
    }
}
