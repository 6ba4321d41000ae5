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
use crate::http2::{
    Http2Error, DEFAULT_MAX_FRAME_SIZE, MAX_INITIAL_WINDOW_SIZE, MAX_MAX_FRAME_SIZE,
};

use super::{Flag, FrameHeader, Kind, StreamIdentifier};

/// Identifiers RFC 9113 6.5.2 assigns to SETTINGS parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum SettingIdentifier {
    /// Initial size of the sender's HPACK dynamic table.
    HeaderTableSize = 0x1,
    EnablePush = 0x2,
    MaxConcurrentStreams = 0x3,
    InitialWindowSize = 0x4,
    MaxFrameSize = 0x5,
    MaxHeaderListSize = 0x6,
    EnableConnectProtocol = 0x8,
}

impl SettingIdentifier {
    fn from_id(id: u16) -> Option<SettingIdentifier> {
        match id {
            0x1 => Some(SettingIdentifier::HeaderTableSize),
            0x2 => Some(SettingIdentifier::EnablePush),
            0x3 => Some(SettingIdentifier::MaxConcurrentStreams),
            0x4 => Some(SettingIdentifier::InitialWindowSize),
            0x5 => Some(SettingIdentifier::MaxFrameSize),
            0x6 => Some(SettingIdentifier::MaxHeaderListSize),
            0x8 => Some(SettingIdentifier::EnableConnectProtocol),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Setting {
    HeaderTableSize(u32),
    EnablePush(u32),
    MaxConcurrentStreams(u32),
    InitialWindowSize(u32),
    MaxFrameSize(u32),
    MaxHeaderListSize(u32),
    EnableConnectProtocol(u32),
}

impl Setting {
    fn from_id(id: u16, val: u32) -> Result<Option<Setting>, Http2Error> {
        let Some(ident) = SettingIdentifier::from_id(id) else {
            return Ok(None);
        };
        let setting = match ident {
            SettingIdentifier::HeaderTableSize => Setting::HeaderTableSize(val),
            SettingIdentifier::EnablePush => {
                if val > 1 {
                    return Err(Http2Error::InvalidSettingValue);
                }
                Setting::EnablePush(val)
            }
            SettingIdentifier::MaxConcurrentStreams => Setting::MaxConcurrentStreams(val),
            SettingIdentifier::InitialWindowSize => {
                if val > MAX_INITIAL_WINDOW_SIZE {
                    return Err(Http2Error::InvalidSettingValue);
                }
                Setting::InitialWindowSize(val)
            }
            SettingIdentifier::MaxFrameSize => {
                if val < DEFAULT_MAX_FRAME_SIZE || val > MAX_MAX_FRAME_SIZE {
                    return Err(Http2Error::InvalidSettingValue);
                }
                Setting::MaxFrameSize(val)
            }
            SettingIdentifier::MaxHeaderListSize => Setting::MaxHeaderListSize(val),
            SettingIdentifier::EnableConnectProtocol => {
                if val > 1 {
                    return Err(Http2Error::InvalidSettingValue);
                }
                Setting::EnableConnectProtocol(val)
            }
        };
        Ok(Some(setting))
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        let (id, val) = match *self {
            Setting::HeaderTableSize(v) => (SettingIdentifier::HeaderTableSize, v),
            Setting::EnablePush(v) => (SettingIdentifier::EnablePush, v),
            Setting::MaxConcurrentStreams(v) => (SettingIdentifier::MaxConcurrentStreams, v),
            Setting::InitialWindowSize(v) => (SettingIdentifier::InitialWindowSize, v),
            Setting::MaxFrameSize(v) => (SettingIdentifier::MaxFrameSize, v),
            Setting::MaxHeaderListSize(v) => (SettingIdentifier::MaxHeaderListSize, v),
            Setting::EnableConnectProtocol(v) => (SettingIdentifier::EnableConnectProtocol, v),
        };
        log::trace!("encoding setting {:?} = {}", id, val);
        buf.put_u16(id as u16);
        buf.put_u32(val);
    }
}

/// A parsed SETTINGS frame payload: every recognised parameter is
/// `Some`, unrecognised ones are ignored per RFC 9113 6.5.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    flags: Flag,
    header_table_size: Option<u32>,
    enable_push: Option<u32>,
    max_concurrent_streams: Option<u32>,
    initial_window_size: Option<u32>,
    max_frame_size: Option<u32>,
    max_header_list_size: Option<u32>,
    enable_connect_protocol: Option<u32>,
}

impl Settings {
    pub fn new() -> Settings {
        Settings::default()
    }

    pub fn ack() -> Settings {
        Settings {
            flags: Flag::ack(),
            ..Settings::default()
        }
    }

    pub fn is_ack(&self) -> bool {
        self.flags.is_ack()
    }

    pub fn flags(&self) -> Flag {
        self.flags
    }

    pub fn header_table_size(&self) -> Option<u32> {
        self.header_table_size
    }

    pub fn set_header_table_size(&mut self, size: u32) {
        self.header_table_size = Some(size);
    }

    pub fn max_frame_size(&self) -> Option<u32> {
        self.max_frame_size
    }

    pub fn set_max_frame_size(&mut self, size: u32) {
        self.max_frame_size = Some(size);
    }

    /// Parses a SETTINGS frame's 6-byte-per-entry payload.
    pub fn parse<T: Buf>(header: FrameHeader, payload: &mut T) -> Result<Settings, Http2Error> {
        if !header.stream_id().is_zero() {
            return Err(Http2Error::InvalidStreamId);
        }

        if header.flag().is_ack() {
            if payload.has_remaining() {
                return Err(Http2Error::InvalidPayloadLength);
            }
            return Ok(Settings::ack());
        }

        if payload.remaining() % 6 != 0 {
            return Err(Http2Error::InvalidPayloadLength);
        }

        let mut settings = Settings::new();
        while payload.has_remaining() {
            let id = payload.get_u16();
            let val = payload.get_u32();
            if let Some(setting) = Setting::from_id(id, val)? {
                settings.apply(setting);
            }
        }
        Ok(settings)
    }

    fn apply(&mut self, setting: Setting) {
        match setting {
            Setting::HeaderTableSize(v) => self.header_table_size = Some(v),
            Setting::EnablePush(v) => self.enable_push = Some(v),
            Setting::MaxConcurrentStreams(v) => self.max_concurrent_streams = Some(v),
            Setting::InitialWindowSize(v) => self.initial_window_size = Some(v),
            Setting::MaxFrameSize(v) => self.max_frame_size = Some(v),
            Setting::MaxHeaderListSize(v) => self.max_header_list_size = Some(v),
            Setting::EnableConnectProtocol(v) => self.enable_connect_protocol = Some(v),
        }
    }

    pub fn for_each<F: FnMut(Setting)>(&self, mut f: F) {
        if let Some(v) = self.header_table_size {
            f(Setting::HeaderTableSize(v));
        }
        if let Some(v) = self.enable_push {
            f(Setting::EnablePush(v));
        }
        if let Some(v) = self.max_concurrent_streams {
            f(Setting::MaxConcurrentStreams(v));
        }
        if let Some(v) = self.initial_window_size {
            f(Setting::InitialWindowSize(v));
        }
        if let Some(v) = self.max_frame_size {
            f(Setting::MaxFrameSize(v));
        }
        if let Some(v) = self.max_header_list_size {
            f(Setting::MaxHeaderListSize(v));
        }
        if let Some(v) = self.enable_connect_protocol {
            f(Setting::EnableConnectProtocol(v));
        }
    }

    pub fn payload_len(&self) -> usize {
        let mut count = 0;
        self.for_each(|_| count += 1);
        count * 6
    }

    pub fn encode<B: BufMut>(&self, buf: &mut B) -> usize {
        let header = FrameHeader {
            length: self.payload_len() as u32,
            kind: Kind::Settings,
            flag: self.flags,
            id: StreamIdentifier::zero(),
        };
        let mut size = header.encode(buf);
        self.for_each(|setting| setting.encode(buf));
        size += self.payload_len();
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::Cursor;

    #[test]
    fn ack_frame_has_empty_payload() {
        let header = FrameHeader::new(Kind::Settings, Flag::ack(), StreamIdentifier::zero());
        let mut cursor = Cursor::new(&[]);
        let settings = Settings::parse(header, &mut cursor).unwrap();
        assert!(settings.is_ack());
    }

    #[test]
    fn non_multiple_of_six_payload_is_rejected() {
        let header = FrameHeader::new(Kind::Settings, Flag::zero(), StreamIdentifier::zero());
        let mut cursor = Cursor::new(&[0u8; 7]);
        assert!(matches!(
            Settings::parse(header, &mut cursor),
            Err(Http2Error::InvalidPayloadLength)
        ));
    }

    #[test]
    fn header_table_size_round_trips() {
        let mut settings = Settings::new();
        settings.set_header_table_size(8192);
        let mut out = Vec::new();
        settings.encode(&mut out);

        let mut cursor = Cursor::new(&out);
        let header = FrameHeader::parse(&mut cursor).unwrap();
        let parsed = Settings::parse(header, &mut cursor).unwrap();
        assert_eq!(parsed.header_table_size(), Some(8192));
    }

    #[test]
    fn enable_push_out_of_range_is_rejected() {
        assert!(matches!(
            Setting::from_id(0x2, 2),
            Err(Http2Error::InvalidSettingValue)
        ));
    }
}
