// Copyright 2022 Matthew Ingwersen.
//
// Licensed under the Apache License, Version 2.0 (the "License"); you
// may not use this file except in compliance with the License. You may
// obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied. See the License for the specific language governing
// permissions and limitations under the License.

//! Handling of the [RFC 6698] RR type, TLSA.
//!
//! [RFC 6698]: https://datatracker.ietf.org/doc/html/rfc6698

use std::fmt;

use super::helpers::{self, Bounds};
use super::ReadRdataError;
use crate::message::{Reader, Writer};

/// The RDATA of a TLSA record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tlsa {
    pub cert_usage: u8,
    pub selector: u8,
    pub matching_type: u8,
    pub cert_data: Vec<u8>,
}

impl Tlsa {
    pub(super) fn read(reader: &mut Reader, rdlength: u16) -> Result<Self, ReadRdataError> {
        let bounds = Bounds::new(reader, rdlength);
        Ok(Self {
            cert_usage: reader.read_u8()?,
            selector: reader.read_u8()?,
            matching_type: reader.read_u8()?,
            cert_data: bounds.read_rest(reader)?,
        })
    }

    pub(super) fn write(&self, writer: &mut Writer) {
        writer.write_u8(self.cert_usage);
        writer.write_u8(self.selector);
        writer.write_u8(self.matching_type);
        writer.write_octets(&self.cert_data);
    }
}

impl fmt::Display for Tlsa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} ",
            self.cert_usage, self.selector, self.matching_type
        )?;
        helpers::fmt_hex(&self.cert_data, f)
    }
}
