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

//! Handling of the [RFC 3403] RR type, NAPTR.
//!
//! [RFC 3403]: https://datatracker.ietf.org/doc/html/rfc3403

use std::fmt;

use super::{CharacterString, ReadRdataError};
use crate::message::{Reader, Writer};
use crate::name::Name;

/// The RDATA of a NAPTR record. The replacement name is written
/// uncompressed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Naptr {
    pub order: u16,
    pub preference: u16,
    pub flags: CharacterString,
    pub services: CharacterString,
    pub regexp: CharacterString,
    pub replacement: Name,
}

impl Naptr {
    pub(super) fn read(reader: &mut Reader, _rdlength: u16) -> Result<Self, ReadRdataError> {
        Ok(Self {
            order: reader.read_u16()?,
            preference: reader.read_u16()?,
            flags: CharacterString::read(reader)?,
            services: CharacterString::read(reader)?,
            regexp: CharacterString::read(reader)?,
            replacement: reader.read_name()?,
        })
    }

    pub(super) fn write(&self, writer: &mut Writer) {
        writer.write_u16(self.order);
        writer.write_u16(self.preference);
        self.flags.write(writer);
        self.services.write(writer);
        self.regexp.write(writer);
        writer.write_name(&self.replacement, false);
    }
}

impl fmt::Display for Naptr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.order, self.preference, self.flags, self.services, self.regexp, self.replacement
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{read_all, round_trip};
    use super::super::Rdata;
    use super::*;
    use crate::rr::Type;

    #[test]
    fn naptr_works() {
        let octets = b"\x00\x64\x00\x0a\x01u\x07E2U+sip\x00\x04_sip\x04_udp\x07example\x03com\x00";
        let rdata = read_all(Type::NAPTR, octets).unwrap();
        match &rdata {
            Rdata::Naptr(naptr) => {
                assert_eq!(naptr.order, 100);
                assert_eq!(naptr.preference, 10);
                assert_eq!(naptr.flags.octets(), b"u");
                assert_eq!(naptr.services.octets(), b"E2U+sip");
                assert!(naptr.regexp.is_empty());
            }
            other => panic!("expected NAPTR RDATA, got {other:?}"),
        }
        assert_eq!(
            rdata.to_string(),
            "100 10 \"u\" \"E2U+sip\" \"\" _sip._udp.example.com."
        );
        assert_eq!(round_trip(&rdata), rdata);
    }
}
