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

//! Minimal in-tree buffer cursor used by the frame and settings codecs.
//!
//! HPACK itself works directly on `&[u8]` slices; this module only
//! exists to give the frame/SETTINGS boundary layer the same small
//! cursor/sink abstraction the rest of the code base uses, without
//! pulling in the full byte-buffer crate.

mod buf;
mod buf_mut;

pub use buf::{Buf, Cursor};
pub use buf_mut::BufMut;
