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

//! Implementation of the [`Header`] type.

use std::fmt;

use super::constants::*;
use super::{Opcode, Rcode};
use crate::bits::{extract_bits, inject_bits};
use crate::validate::{FieldSpec, ValidationError};

const OPCODE_SPEC: FieldSpec = FieldSpec::bits("opcode", 4);
const RCODE_SPEC: FieldSpec = FieldSpec::bits("rcode", 4);

////////////////////////////////////////////////////////////////////////
// HEADER                                                             //
////////////////////////////////////////////////////////////////////////

/// The header of a DNS message, as defined by [RFC 1035 § 4.1.1] and
/// extended by [RFC 4035 § 3.2] (the AD and CD bits).
///
/// The four section counts are not stored here: they are always
/// computed from the sections of a [`Message`](super::Message) when it
/// is serialized, and checked against the sections when it is parsed.
/// See [`SectionCounts`].
///
/// The opcode and RCODE are four-bit fields, so they can only be changed
/// through [`Header::set_opcode`] and [`Header::set_rcode`], which reject
/// values that don't fit.
///
/// [RFC 1035 § 4.1.1]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1
/// [RFC 4035 § 3.2]: https://datatracker.ietf.org/doc/html/rfc4035#section-3.2
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Header {
    pub id: u16,
    pub qr: bool,
    opcode: Opcode,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: bool,
    pub ad: bool,
    pub cd: bool,
    rcode: Rcode,
}

impl Header {
    /// Creates a new header for a query with the given ID. All flags
    /// are clear, the opcode is QUERY, and the RCODE is NOERROR.
    pub fn new(id: u16) -> Self {
        Self {
            id,
            qr: false,
            opcode: Opcode::Query,
            aa: false,
            tc: false,
            rd: false,
            ra: false,
            z: false,
            ad: false,
            cd: false,
            rcode: Rcode::NoError,
        }
    }

    /// Returns the opcode.
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Sets the opcode. An [`Opcode::Unassigned`] value that does not
    /// fit in four bits is rejected, and the header is left unchanged.
    /// One that names an assigned opcode is stored as that opcode.
    pub fn set_opcode(&mut self, opcode: Opcode) -> Result<(), ValidationError> {
        self.opcode = field_to_opcode(OPCODE_SPEC.check(u8::from(opcode))?);
        Ok(())
    }

    /// Returns the (non-extended) RCODE.
    pub fn rcode(&self) -> Rcode {
        self.rcode
    }

    /// Sets the RCODE. An [`Rcode::Unassigned`] value that does not fit
    /// in four bits is rejected, and the header is left unchanged. One
    /// that names an assigned RCODE is stored as that RCODE.
    pub fn set_rcode(&mut self, rcode: Rcode) -> Result<(), ValidationError> {
        self.rcode = field_to_rcode(RCODE_SPEC.check(u8::from(rcode))?);
        Ok(())
    }

    /// Returns the 16-bit flags word of the header.
    pub fn flags(&self) -> u16 {
        let set = |word: u64, (offset, width): (u32, u32), value: u64| {
            inject_bits(word, value, offset, width)
        };
        let mut word = 0;
        word = set(word, QR, self.qr as u64);
        word = set(word, OPCODE, u8::from(self.opcode) as u64);
        word = set(word, AA, self.aa as u64);
        word = set(word, TC, self.tc as u64);
        word = set(word, RD, self.rd as u64);
        word = set(word, RA, self.ra as u64);
        word = set(word, Z, self.z as u64);
        word = set(word, AD, self.ad as u64);
        word = set(word, CD, self.cd as u64);
        word = set(word, RCODE, u8::from(self.rcode) as u64);
        word as u16
    }

    /// Builds a header from its ID and 16-bit flags word. Every flags
    /// word is valid, so this cannot fail.
    pub fn from_flags(id: u16, flags: u16) -> Self {
        let get = |(offset, width): (u32, u32)| extract_bits(flags as u64, offset, width);
        let flag = |position: (u32, u32)| get(position) != 0;
        Self {
            id,
            qr: flag(QR),
            opcode: field_to_opcode(get(OPCODE)),
            aa: flag(AA),
            tc: flag(TC),
            rd: flag(RD),
            ra: flag(RA),
            z: flag(Z),
            ad: flag(AD),
            cd: flag(CD),
            rcode: field_to_rcode(get(RCODE)),
        }
    }
}

/// Converts an extracted four-bit field into an [`Opcode`].
fn field_to_opcode(field: u64) -> Opcode {
    let value = field as u8;
    Opcode::try_from(value).unwrap_or(Opcode::Unassigned(value))
}

/// Converts an extracted four-bit field into an [`Rcode`].
fn field_to_rcode(field: u64) -> Rcode {
    let value = field as u8;
    Rcode::try_from(value).unwrap_or(Rcode::Unassigned(value))
}

impl Default for Header {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            ";; ->>HEADER<<- opcode: {}, status: {}, id: {}\n;; flags:",
            self.opcode, self.rcode, self.id
        )?;
        let flags = [
            ("qr", self.qr),
            ("aa", self.aa),
            ("tc", self.tc),
            ("rd", self.rd),
            ("ra", self.ra),
            ("z", self.z),
            ("ad", self.ad),
            ("cd", self.cd),
        ];
        for (mnemonic, set) in flags {
            if set {
                write!(f, " {mnemonic}")?;
            }
        }
        f.write_str(";")
    }
}

////////////////////////////////////////////////////////////////////////
// SECTION COUNTS                                                     //
////////////////////////////////////////////////////////////////////////

/// The four section counts of a message header.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct SectionCounts {
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
