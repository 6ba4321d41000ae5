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
// Created Date: 2023/08/15 10:47:56

use std::{fmt, result};

use crate::http2::Http2Error;

#[derive(Debug)]
pub enum WebError {
    Http2(Http2Error),
    Extension(&'static str),
    Io(std::io::Error),
}

impl WebError {
    #[inline]
    fn description_str(&self) -> &'static str {
        match self {
            WebError::Http2(e) => e.description_str(),
            WebError::Extension(_) => "std error",
            WebError::Io(_) => "io error",
        }
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description_str())
    }
}

impl std::error::Error for WebError {}

impl From<std::io::Error> for WebError {
    fn from(e: std::io::Error) -> Self {
        WebError::Io(e)
    }
}

impl From<Http2Error> for WebError {
    fn from(e: Http2Error) -> Self {
        WebError::Http2(e)
    }
}

pub type WebResult<T> = result::Result<T, WebError>;
