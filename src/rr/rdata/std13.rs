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

//! RR types from the original DNS specification, STD 13 ([RFC 1034]
//! and [RFC 1035]).
//!
//! [RFC 1034]: https://datatracker.ietf.org/doc/html/rfc1034
//! [RFC 1035]: https://datatracker.ietf.org/doc/html/rfc1035

use std::fmt;
use std::net::Ipv4Addr;
use std::ops::Deref;

use super::helpers::{self, Bounds};
use super::ReadRdataError;
use crate::message::{Reader, Writer};
use crate::name::Name;
use crate::validate::{FieldSpec, FieldValue, ValidationError};

////////////////////////////////////////////////////////////////////////
// STD 13 (RFC 1035 § 3.3) <CHARACTER-STRING> TYPE                    //
////////////////////////////////////////////////////////////////////////

const CHARACTER_STRING_SPEC: FieldSpec = FieldSpec::u8("character-string length");

/// A type for [RFC 1035 § 3.3] `<character-string>`s.
///
/// On the wire, a `<character-string>` is a single length octet
/// followed by that number of octets, so its content is limited to 255
/// octets. A `CharacterString` can only be constructed from data of
/// length 255 or less.
///
/// [RFC 1035 § 3.3]: https://datatracker.ietf.org/doc/html/rfc1035#section-3.3
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct CharacterString {
    octets: Vec<u8>,
}

impl CharacterString {
    /// Returns the underlying octets.
    pub fn octets(&self) -> &[u8] {
        &self.octets
    }

    pub(super) fn read(reader: &mut Reader) -> Result<Self, ReadRdataError> {
        let len = reader.read_u8()?;
        Ok(Self {
            octets: reader.read_octets(len as usize)?,
        })
    }

    pub(super) fn write(&self, writer: &mut Writer) {
        writer.write_u8(self.octets.len() as u8);
        writer.write_octets(&self.octets);
    }
}

impl TryFrom<Vec<u8>> for CharacterString {
    type Error = ValidationError;

    fn try_from(octets: Vec<u8>) -> Result<Self, Self::Error> {
        CHARACTER_STRING_SPEC.check(octets.len())?;
        Ok(Self { octets })
    }
}

impl TryFrom<&[u8]> for CharacterString {
    type Error = ValidationError;

    fn try_from(octets: &[u8]) -> Result<Self, Self::Error> {
        octets.to_vec().try_into()
    }
}

impl TryFrom<&str> for CharacterString {
    type Error = ValidationError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        text.as_bytes().try_into()
    }
}

impl Deref for CharacterString {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.octets
    }
}

impl fmt::Display for CharacterString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        helpers::fmt_quoted(&self.octets, f)
    }
}

////////////////////////////////////////////////////////////////////////
// A                                                                  //
////////////////////////////////////////////////////////////////////////

const IPV4_SPEC: FieldSpec = FieldSpec::ipv4("address");

/// The RDATA of an A record: an IPv4 address.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct A(pub Ipv4Addr);

impl A {
    /// Builds an A record from the four octets of the address, each of
    /// which must be in the range 0-255.
    pub fn try_from_parts<V: FieldValue>(parts: &[V]) -> Result<Self, ValidationError> {
        IPV4_SPEC.check_tuple::<V, 4>(parts).map(|octets| Self(octets.into()))
    }

    pub(super) fn read(reader: &mut Reader, _rdlength: u16) -> Result<Self, ReadRdataError> {
        Ok(Self(reader.read_u32()?.into()))
    }

    pub(super) fn write(&self, writer: &mut Writer) {
        writer.write_octets(&self.0.octets());
    }
}

impl fmt::Display for A {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////
// SOA                                                                //
////////////////////////////////////////////////////////////////////////

/// The RDATA of an SOA record.
///
/// Note that [RFC 1035 § 3.3.13] does not state whether REFRESH, RETRY,
/// and EXPIRE are signed or unsigned. BIND, NSD, and Knot all treat them
/// as unsigned, and so do we.
///
/// [RFC 1035 § 3.3.13]: https://datatracker.ietf.org/doc/html/rfc1035#section-3.3.13
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Soa {
    pub mname: Name,
    pub rname: Name,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

impl Soa {
    /// Builds SOA RDATA, checking that each of the five integer fields
    /// fits in 32 unsigned bits.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new<V: FieldValue>(
        mname: Name,
        rname: Name,
        serial: V,
        refresh: V,
        retry: V,
        expire: V,
        minimum: V,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            mname,
            rname,
            serial: FieldSpec::u32("serial").check(serial)? as u32,
            refresh: FieldSpec::u32("refresh").check(refresh)? as u32,
            retry: FieldSpec::u32("retry").check(retry)? as u32,
            expire: FieldSpec::u32("expire").check(expire)? as u32,
            minimum: FieldSpec::u32("minimum").check(minimum)? as u32,
        })
    }

    pub(super) fn read(reader: &mut Reader, _rdlength: u16) -> Result<Self, ReadRdataError> {
        Ok(Self {
            mname: reader.read_name()?,
            rname: reader.read_name()?,
            serial: reader.read_u32()?,
            refresh: reader.read_u32()?,
            retry: reader.read_u32()?,
            expire: reader.read_u32()?,
            minimum: reader.read_u32()?,
        })
    }

    pub(super) fn write(&self, writer: &mut Writer) {
        writer.write_name(&self.mname, true);
        writer.write_name(&self.rname, true);
        writer.write_u32(self.serial);
        writer.write_u32(self.refresh);
        writer.write_u32(self.retry);
        writer.write_u32(self.expire);
        writer.write_u32(self.minimum);
    }
}

impl fmt::Display for Soa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.mname, self.rname, self.serial, self.refresh, self.retry, self.expire, self.minimum
        )
    }
}

////////////////////////////////////////////////////////////////////////
// HINFO                                                              //
////////////////////////////////////////////////////////////////////////

/// The RDATA of an HINFO record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Hinfo {
    pub cpu: CharacterString,
    pub os: CharacterString,
}

impl Hinfo {
    pub(super) fn read(reader: &mut Reader, _rdlength: u16) -> Result<Self, ReadRdataError> {
        Ok(Self {
            cpu: CharacterString::read(reader)?,
            os: CharacterString::read(reader)?,
        })
    }

    pub(super) fn write(&self, writer: &mut Writer) {
        self.cpu.write(writer);
        self.os.write(writer);
    }
}

impl fmt::Display for Hinfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.cpu, self.os)
    }
}

////////////////////////////////////////////////////////////////////////
// MX                                                                 //
////////////////////////////////////////////////////////////////////////

/// The RDATA of an MX record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mx {
    pub preference: u16,
    pub exchange: Name,
}

impl Mx {
    /// Builds MX RDATA, checking that the preference fits in 16 bits.
    pub fn try_new<V: FieldValue>(preference: V, exchange: Name) -> Result<Self, ValidationError> {
        Ok(Self {
            preference: FieldSpec::u16("preference").check(preference)? as u16,
            exchange,
        })
    }

    pub(super) fn read(reader: &mut Reader, _rdlength: u16) -> Result<Self, ReadRdataError> {
        Ok(Self {
            preference: reader.read_u16()?,
            exchange: reader.read_name()?,
        })
    }

    pub(super) fn write(&self, writer: &mut Writer) {
        writer.write_u16(self.preference);
        writer.write_name(&self.exchange, true);
    }
}

impl fmt::Display for Mx {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.preference, self.exchange)
    }
}

////////////////////////////////////////////////////////////////////////
// TXT                                                                //
////////////////////////////////////////////////////////////////////////

/// The RDATA of a TXT record: one or more `<character-string>`s.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Txt {
    pub strings: Vec<CharacterString>,
}

impl Txt {
    pub(super) fn read(reader: &mut Reader, rdlength: u16) -> Result<Self, ReadRdataError> {
        let bounds = Bounds::new(reader, rdlength);
        let mut strings = Vec::new();
        while bounds.remaining(reader)? > 0 {
            strings.push(CharacterString::read(reader)?);
        }
        Ok(Self { strings })
    }

    pub(super) fn write(&self, writer: &mut Writer) {
        for string in &self.strings {
            string.write(writer);
        }
    }
}

impl fmt::Display for Txt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, string) in self.strings.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            string.fmt(f)?;
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
    use crate::message::CompressionMode;
    use crate::rr::Type;

    fn name(text: &str) -> Name {
        text.parse().unwrap()
    }

    #[test]
    fn character_strings_are_limited_to_255_octets() {
        assert!(CharacterString::try_from(vec![b'x'; 255]).is_ok());
        let err = CharacterString::try_from(vec![b'x'; 256]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "attribute 'character-string length' must be between 0-255 [256]"
        );
    }

    #[test]
    fn a_is_built_from_validated_parts() {
        assert_eq!(
            A::try_from_parts(&[192, 0, 2, 1]),
            Ok(A(Ipv4Addr::new(192, 0, 2, 1)))
        );
        assert!(A::try_from_parts(&[192, 0, 2, 256]).is_err());
        assert!(A::try_from_parts(&[192, 0, 2]).is_err());
    }

    #[test]
    fn a_reads_and_displays() {
        let rdata = read_all(Type::A, b"\xc0\x00\x02\x01").unwrap();
        assert_eq!(rdata, Rdata::A(A(Ipv4Addr::new(192, 0, 2, 1))));
        assert_eq!(rdata.to_string(), "192.0.2.1");
    }

    #[test]
    fn soa_round_trips() {
        let soa = Soa::try_new(
            name("ns1.example.com."),
            name("hostmaster.example.com."),
            2024010101u32,
            7200,
            3600,
            1209600,
            300,
        )
        .unwrap();
        let rdata = Rdata::Soa(soa);
        assert_eq!(round_trip(&rdata), rdata);
        assert_eq!(
            rdata.to_string(),
            "ns1.example.com. hostmaster.example.com. 2024010101 7200 3600 1209600 300"
        );
    }

    #[test]
    fn soa_rejects_out_of_range_timers() {
        assert!(Soa::try_new(Name::root(), Name::root(), 1i64, 2, 3, 4, 1 << 32).is_err());
        assert!(Soa::try_new(Name::root(), Name::root(), -1i64, 2, 3, 4, 5).is_err());
    }

    #[test]
    fn soa_names_are_compressed() {
        let soa = Soa::try_new(name("example.com."), name("admin.example.com."), 1u32, 2, 3, 4, 5)
            .unwrap();
        let mut writer = Writer::new(CompressionMode::Standard);
        Rdata::Soa(soa).write(&mut writer, Type::SOA).unwrap();
        let octets = writer.finish();
        assert_eq!(&octets[..21], b"\x07example\x03com\x00\x05admin\xc0\x00");
        assert_eq!(octets.len(), 21 + 20);
    }

    #[test]
    fn mx_round_trips_and_validates() {
        let rdata = Rdata::Mx(Mx::try_new(10, name("mail.example.com.")).unwrap());
        assert_eq!(round_trip(&rdata), rdata);
        assert_eq!(rdata.to_string(), "10 mail.example.com.");
        assert!(Mx::try_new(65536, Name::root()).is_err());
    }

    #[test]
    fn txt_reads_multiple_strings() {
        let rdata = read_all(Type::TXT, b"\x05hello\x00\x05world").unwrap();
        let expected = Txt {
            strings: vec![
                "hello".try_into().unwrap(),
                CharacterString::default(),
                "world".try_into().unwrap(),
            ],
        };
        assert_eq!(rdata, Rdata::Txt(expected));
        assert_eq!(rdata.to_string(), "\"hello\" \"\" \"world\"");
        assert_eq!(round_trip(&rdata), rdata);
    }

    #[test]
    fn txt_rejects_overlong_string() {
        let err = read_all(Type::TXT, b"\x05hi").unwrap_err();
        assert!(err.is_truncation());
    }

    #[test]
    fn hinfo_round_trips() {
        let rdata = Rdata::Hinfo(Hinfo {
            cpu: "x86_64".try_into().unwrap(),
            os: "Linux".try_into().unwrap(),
        });
        assert_eq!(round_trip(&rdata), rdata);
        assert_eq!(rdata.to_string(), "\"x86_64\" \"Linux\"");
    }

    #[test]
    fn name_rdata_round_trips() {
        for rdata in [
            Rdata::Ns(name("ns.example.com.")),
            Rdata::Cname(name("www.example.com.")),
            Rdata::Ptr(name("host.example.com.")),
            Rdata::Dname(name("example.net.")),
        ] {
            assert_eq!(round_trip(&rdata), rdata);
        }
    }
}
