// Copyright 2022 - 2023 Wenmeng See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Author: tickbh

#[macro_use]
extern crate bitflags;

pub mod binary;
mod error;
mod helper;
pub mod hpack;
pub mod http2;

pub use binary::{Buf, BufMut};
pub use error::{WebError, WebResult};
pub use helper::Helper;
pub use hpack::{Decoder, DecoderError, Encoder, Header, HeaderList, HeaderTable};
pub use http2::Http2Error;
