// Copyright 2022 - 2023 Wenmeng See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Author: tickbh
// -----
// Created Date: 2023/08/21 11:20:39

use crate::binary::{Buf, BufMut};
use crate::http2::Http2Error;

use super::{encode_u24, read_u24, Flag, Kind, StreamIdentifier};

pub const FRAME_HEADER_BYTES: usize = 9;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameHeader {
    pub length: u32,
    pub kind: Kind,
    pub flag: Flag,
    pub id: StreamIdentifier,
}

impl FrameHeader {
    pub fn new(kind: Kind, flag: Flag, id: StreamIdentifier) -> FrameHeader {
        FrameHeader {
            length: 0,
            kind,
            flag,
            id,
        }
    }

    #[inline]
    pub fn parse<T: Buf>(buffer: &mut T) -> Result<FrameHeader, Http2Error> {
        if buffer.remaining() < FRAME_HEADER_BYTES {
            return Err(Http2Error::Short);
        }
        let length = read_u24(buffer);
        let kind = Kind::new(buffer.get_u8());
        let flag_byte = buffer.get_u8();
        let id = StreamIdentifier::parse(buffer);
        Ok(FrameHeader {
            length,
            kind,
            flag: Flag::new(flag_byte),
            id,
        })
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn stream_id(&self) -> StreamIdentifier {
        self.id
    }

    pub fn flag(&self) -> Flag {
        self.flag
    }

    pub fn flags_mut(&mut self) -> &mut Flag {
        &mut self.flag
    }

    pub fn encode<B: BufMut>(&self, buffer: &mut B) -> usize {
        let mut size = 0;
        size += encode_u24(buffer, self.length);
        size += buffer.put_u8(self.kind.encode());
        size += buffer.put_u8(self.flag.bits());
        self.id.encode(buffer);
        size + 4
    }
}
