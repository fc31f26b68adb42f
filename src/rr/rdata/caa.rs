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

//! Handling of the [RFC 8659] RR type, CAA.
//!
//! [RFC 8659]: https://datatracker.ietf.org/doc/html/rfc8659

use std::fmt;

use super::helpers::{self, Bounds};
use super::ReadRdataError;
use crate::message::{Reader, Writer};
use crate::validate::{FieldSpec, ValidationError};

const TAG_SPEC: FieldSpec = FieldSpec::range("tag length", 1, 255);

/// The RDATA of a CAA record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Caa {
    pub flags: u8,
    tag: Vec<u8>,
    pub value: Vec<u8>,
}

impl Caa {
    /// Builds CAA RDATA. The tag must be 1 to 255 octets long.
    pub fn try_new(flags: u8, tag: &[u8], value: &[u8]) -> Result<Self, ValidationError> {
        TAG_SPEC.check(tag.len())?;
        Ok(Self {
            flags,
            tag: tag.to_vec(),
            value: value.to_vec(),
        })
    }

    pub fn tag(&self) -> &[u8] {
        &self.tag
    }

    /// Whether the Issuer Critical flag is set.
    pub fn is_critical(&self) -> bool {
        self.flags & 0x80 != 0
    }

    pub(super) fn read(reader: &mut Reader, rdlength: u16) -> Result<Self, ReadRdataError> {
        let bounds = Bounds::new(reader, rdlength);
        let flags = reader.read_u8()?;
        let tag_len = reader.read_u8()?;
        if tag_len == 0 {
            return Err(ReadRdataError::Other("empty CAA tag"));
        }
        Ok(Self {
            flags,
            tag: reader.read_octets(tag_len as usize)?,
            value: bounds.read_rest(reader)?,
        })
    }

    pub(super) fn write(&self, writer: &mut Writer) {
        writer.write_u8(self.flags);
        writer.write_u8(self.tag.len() as u8);
        writer.write_octets(&self.tag);
        writer.write_octets(&self.value);
    }
}

impl fmt::Display for Caa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} ", self.flags, String::from_utf8_lossy(&self.tag))?;
        helpers::fmt_quoted(&self.value, f)
    }
}
