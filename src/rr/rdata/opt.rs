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

//! Handling of the EDNS pseudo-RR type, OPT.
//!
//! This follows EDNS(0) as restated and refined by [RFC 6891].
//!
//! [RFC 6891]: https://datatracker.ietf.org/doc/html/rfc6891

use std::fmt;

use super::helpers::Bounds;
use super::ReadRdataError;
use crate::bits::{extract_bits, inject_bits};
use crate::message::constants::{EDNS_DO, EDNS_EXTENDED_RCODE, EDNS_VERSION, EDNS_Z};
use crate::message::{Reader, Writer};
use crate::util::to_hex;
use crate::validate::{FieldSpec, FieldValue, ValidationError};

const Z_SPEC: FieldSpec = FieldSpec::bits("z", 15);

////////////////////////////////////////////////////////////////////////
// EDNS OPTIONS                                                       //
////////////////////////////////////////////////////////////////////////

/// A single EDNS option, as carried in OPT RDATA ([RFC 6891 § 6.1.2]).
/// The option data is kept opaque.
///
/// [RFC 6891 § 6.1.2]: https://datatracker.ietf.org/doc/html/rfc6891#section-6.1.2
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EdnsOption {
    pub code: u16,
    pub data: Vec<u8>,
}

impl fmt::Display for EdnsOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "OPT{}={}", self.code, to_hex(&self.data))
    }
}

/// Reads the options of OPT RDATA.
pub(super) fn read_options(
    reader: &mut Reader,
    rdlength: u16,
) -> Result<Vec<EdnsOption>, ReadRdataError> {
    let bounds = Bounds::new(reader, rdlength);
    let mut options = Vec::new();
    while bounds.remaining(reader)? > 0 {
        let code = reader.read_u16()?;
        let len = reader.read_u16()?;
        options.push(EdnsOption {
            code,
            data: reader.read_octets(len as usize)?,
        });
    }
    Ok(options)
}

/// Writes the options of OPT RDATA.
pub(super) fn write_options(options: &[EdnsOption], writer: &mut Writer) {
    for option in options {
        writer.write_u16(option.code);
        writer.write_u16(option.data.len() as u16);
        writer.write_octets(&option.data);
    }
}

////////////////////////////////////////////////////////////////////////
// OPT PSEUDO-RR                                                      //
////////////////////////////////////////////////////////////////////////

/// The EDNS(0) OPT pseudo-record of a message.
///
/// An OPT record reuses the CLASS and TTL fields of the standard RR
/// format. The CLASS field holds the requestor's UDP payload size, and
/// the TTL field is split per [RFC 6891 § 6.1.3]:
///
/// ```text
///   31     24 23     16 15 14                0
///  +---------+---------+--+-------------------+
///  | EXT-RC  | VERSION |DO|         Z         |
///  +---------+---------+--+-------------------+
/// ```
///
/// `OptRecord` models these fields directly. The owner of an OPT record
/// is always the root.
///
/// [RFC 6891 § 6.1.3]: https://datatracker.ietf.org/doc/html/rfc6891#section-6.1.3
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OptRecord {
    pub udp_payload_size: u16,
    pub extended_rcode: u8,
    pub version: u8,
    pub dnssec_ok: bool,
    z: u16,
    pub options: Vec<EdnsOption>,
}

impl OptRecord {
    /// Creates a version 0 OPT record advertising the given UDP payload
    /// size, with no flags or options.
    pub fn new(udp_payload_size: u16) -> Self {
        Self {
            udp_payload_size,
            extended_rcode: 0,
            version: 0,
            dnssec_ok: false,
            z: 0,
            options: Vec::new(),
        }
    }

    /// Builds an OPT record from its on-the-wire CLASS and TTL fields
    /// and its options.
    pub fn from_wire(class: u16, ttl: u32, options: Vec<EdnsOption>) -> Self {
        let ttl = ttl as u64;
        let get = |(offset, width): (u32, u32)| extract_bits(ttl, offset, width);
        Self {
            udp_payload_size: class,
            extended_rcode: get(EDNS_EXTENDED_RCODE) as u8,
            version: get(EDNS_VERSION) as u8,
            dnssec_ok: get(EDNS_DO) != 0,
            z: get(EDNS_Z) as u16,
            options,
        }
    }

    /// Returns the on-the-wire TTL field.
    pub fn ttl(&self) -> u32 {
        let set = |word: u64, (offset, width): (u32, u32), value: u64| {
            inject_bits(word, value, offset, width)
        };
        let mut word = 0;
        word = set(word, EDNS_EXTENDED_RCODE, self.extended_rcode as u64);
        word = set(word, EDNS_VERSION, self.version as u64);
        word = set(word, EDNS_DO, self.dnssec_ok as u64);
        word = set(word, EDNS_Z, self.z as u64);
        word as u32
    }

    /// Writes the options as OPT RDATA.
    pub(crate) fn write_options(&self, writer: &mut Writer) {
        write_options(&self.options, writer);
    }

    /// Returns the reserved Z bits.
    pub fn z(&self) -> u16 {
        self.z
    }

    /// Sets the reserved Z bits. Values wider than 15 bits are rejected,
    /// and the record is left unchanged.
    pub fn set_z<V: FieldValue>(&mut self, z: V) -> Result<(), ValidationError> {
        self.z = Z_SPEC.check(z)? as u16;
        Ok(())
    }
}

impl Default for OptRecord {
    fn default() -> Self {
        Self::new(512)
    }
}

impl fmt::Display for OptRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "; EDNS: version: {}, flags:", self.version)?;
        if self.dnssec_ok {
            f.write_str(" do")?;
        }
        write!(f, "; udp: {}", self.udp_payload_size)?;
        for option in &self.options {
            write!(f, "\n; {option}")?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::super::tests::{read_all, round_trip};
    use super::super::Rdata;
    use super::*;
    use crate::rr::Type;

    #[test]
    fn ttl_layout_is_correct() {
        let opt = OptRecord::from_wire(1232, 0x0100_8000, Vec::new());
        assert_eq!(opt.udp_payload_size, 1232);
        assert_eq!(opt.extended_rcode, 1);
        assert_eq!(opt.version, 0);
        assert!(opt.dnssec_ok);
        assert_eq!(opt.z(), 0);
        assert_eq!(opt.ttl(), 0x0100_8000);

        let opt = OptRecord::from_wire(512, 0x00ff_7fff, Vec::new());
        assert_eq!(opt.extended_rcode, 0);
        assert_eq!(opt.version, 255);
        assert!(!opt.dnssec_ok);
        assert_eq!(opt.z(), 0x7fff);
        assert_eq!(opt.ttl(), 0x00ff_7fff);
    }

    #[test]
    fn set_z_validates() {
        let mut opt = OptRecord::new(4096);
        opt.set_z(0x1234).unwrap();
        assert_eq!(opt.ttl(), 0x1234);
        assert!(opt.set_z(0x8000).is_err());
        assert_eq!(opt.z(), 0x1234);
    }

    #[test]
    fn options_round_trip() {
        let rdata = read_all(
            Type::OPT,
            b"\x00\x0c\x00\x04\x00\x00\x00\x00\x00\x09\x00\x00",
        )
        .unwrap();
        assert_eq!(
            rdata,
            Rdata::Opt(vec![
                EdnsOption {
                    code: 12,
                    data: vec![0; 4]
                },
                EdnsOption {
                    code: 9,
                    data: Vec::new()
                },
            ])
        );
        assert_eq!(rdata.to_string(), "OPT12=00000000 OPT9=");
        assert_eq!(round_trip(&rdata), rdata);
    }

    #[test]
    fn empty_options_are_decoded() {
        assert_eq!(read_all(Type::OPT, b""), Ok(Rdata::Opt(Vec::new())));
    }

    #[test]
    fn overlong_option_is_rejected() {
        let mut reader = Reader::new(b"\x00\x0c\x00\x04\x00\x00\x00\x00");
        assert!(Rdata::read(&mut reader, Type::OPT, 6).is_err());
    }

    #[test]
    fn opt_displays_like_dig() {
        let mut opt = OptRecord::new(4096);
        opt.dnssec_ok = true;
        assert_eq!(opt.to_string(), "; EDNS: version: 0, flags: do; udp: 4096");
    }
}
