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

//! Handling of the DNSSEC RR types of [RFC 4034]: DS, RRSIG, NSEC, and
//! DNSKEY.
//!
//! None of these types permit compression of embedded names, so they are
//! always written uncompressed. No cryptographic processing is done
//! here.
//!
//! [RFC 4034]: https://datatracker.ietf.org/doc/html/rfc4034

use std::collections::BTreeSet;
use std::fmt;

use super::helpers::{self, Bounds};
use super::ReadRdataError;
use crate::message::{Reader, Writer};
use crate::name::Name;
use crate::rr::Type;

////////////////////////////////////////////////////////////////////////
// RFC 4034 § 5 - DS RR                                               //
////////////////////////////////////////////////////////////////////////

/// The RDATA of a DS record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ds {
    pub key_tag: u16,
    pub algorithm: u8,
    pub digest_type: u8,
    pub digest: Vec<u8>,
}

impl Ds {
    pub(super) fn read(reader: &mut Reader, rdlength: u16) -> Result<Self, ReadRdataError> {
        let bounds = Bounds::new(reader, rdlength);
        Ok(Self {
            key_tag: reader.read_u16()?,
            algorithm: reader.read_u8()?,
            digest_type: reader.read_u8()?,
            digest: bounds.read_rest(reader)?,
        })
    }

    pub(super) fn write(&self, writer: &mut Writer) {
        writer.write_u16(self.key_tag);
        writer.write_u8(self.algorithm);
        writer.write_u8(self.digest_type);
        writer.write_octets(&self.digest);
    }
}

impl fmt::Display for Ds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {} ", self.key_tag, self.algorithm, self.digest_type)?;
        helpers::fmt_hex(&self.digest, f)
    }
}

////////////////////////////////////////////////////////////////////////
// RFC 4034 § 2 - DNSKEY RR                                           //
////////////////////////////////////////////////////////////////////////

/// The RDATA of a DNSKEY record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dnskey {
    pub flags: u16,
    pub protocol: u8,
    pub algorithm: u8,
    pub public_key: Vec<u8>,
}

impl Dnskey {
    /// Whether the Zone Key flag (bit 7) is set.
    pub fn is_zone_key(&self) -> bool {
        self.flags & 0x0100 != 0
    }

    /// Whether the Secure Entry Point flag (bit 15) is set.
    pub fn is_secure_entry_point(&self) -> bool {
        self.flags & 0x0001 != 0
    }

    /// Computes the key tag of this key, per [RFC 4034 Appendix B]. The
    /// obsolete algorithm 1 (RSA/MD5) is not special-cased.
    ///
    /// [RFC 4034 Appendix B]: https://datatracker.ietf.org/doc/html/rfc4034#appendix-B
    pub fn key_tag(&self) -> u16 {
        let mut rdata = Vec::with_capacity(4 + self.public_key.len());
        rdata.extend_from_slice(&self.flags.to_be_bytes());
        rdata.push(self.protocol);
        rdata.push(self.algorithm);
        rdata.extend_from_slice(&self.public_key);

        let mut accumulator: u32 = 0;
        for (i, &octet) in rdata.iter().enumerate() {
            if i & 1 == 0 {
                accumulator += (octet as u32) << 8;
            } else {
                accumulator += octet as u32;
            }
        }
        accumulator += (accumulator >> 16) & 0xffff;
        (accumulator & 0xffff) as u16
    }

    pub(super) fn read(reader: &mut Reader, rdlength: u16) -> Result<Self, ReadRdataError> {
        let bounds = Bounds::new(reader, rdlength);
        Ok(Self {
            flags: reader.read_u16()?,
            protocol: reader.read_u8()?,
            algorithm: reader.read_u8()?,
            public_key: bounds.read_rest(reader)?,
        })
    }

    pub(super) fn write(&self, writer: &mut Writer) {
        writer.write_u16(self.flags);
        writer.write_u8(self.protocol);
        writer.write_u8(self.algorithm);
        writer.write_octets(&self.public_key);
    }
}

impl fmt::Display for Dnskey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {} ", self.flags, self.protocol, self.algorithm)?;
        helpers::fmt_base64(&self.public_key, f)
    }
}

////////////////////////////////////////////////////////////////////////
// RFC 4034 § 3 - RRSIG RR                                            //
////////////////////////////////////////////////////////////////////////

/// The RDATA of an RRSIG record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rrsig {
    pub type_covered: Type,
    pub algorithm: u8,
    pub labels: u8,
    pub original_ttl: u32,
    pub expiration: u32,
    pub inception: u32,
    pub key_tag: u16,
    pub signer_name: Name,
    pub signature: Vec<u8>,
}

impl Rrsig {
    pub(super) fn read(reader: &mut Reader, rdlength: u16) -> Result<Self, ReadRdataError> {
        let bounds = Bounds::new(reader, rdlength);
        Ok(Self {
            type_covered: reader.read_u16()?.into(),
            algorithm: reader.read_u8()?,
            labels: reader.read_u8()?,
            original_ttl: reader.read_u32()?,
            expiration: reader.read_u32()?,
            inception: reader.read_u32()?,
            key_tag: reader.read_u16()?,
            signer_name: reader.read_name()?,
            signature: bounds.read_rest(reader)?,
        })
    }

    pub(super) fn write(&self, writer: &mut Writer) {
        writer.write_u16(self.type_covered.into());
        writer.write_u8(self.algorithm);
        writer.write_u8(self.labels);
        writer.write_u32(self.original_ttl);
        writer.write_u32(self.expiration);
        writer.write_u32(self.inception);
        writer.write_u16(self.key_tag);
        writer.write_name(&self.signer_name, false);
        writer.write_octets(&self.signature);
    }
}

impl fmt::Display for Rrsig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} ",
            self.type_covered, self.algorithm, self.labels, self.original_ttl
        )?;
        helpers::fmt_timestamp(self.expiration, f)?;
        f.write_str(" ")?;
        helpers::fmt_timestamp(self.inception, f)?;
        write!(f, " {} {} ", self.key_tag, self.signer_name)?;
        helpers::fmt_base64(&self.signature, f)
    }
}

////////////////////////////////////////////////////////////////////////
// RFC 4034 § 4 - NSEC RR                                             //
////////////////////////////////////////////////////////////////////////

/// The RDATA of an NSEC record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Nsec {
    pub next_domain_name: Name,
    pub types: TypeBitmap,
}

impl Nsec {
    pub(super) fn read(reader: &mut Reader, rdlength: u16) -> Result<Self, ReadRdataError> {
        let bounds = Bounds::new(reader, rdlength);
        let next_domain_name = reader.read_name()?;
        let bitmap = bounds.read_rest(reader)?;
        Ok(Self {
            next_domain_name,
            types: TypeBitmap::from_wire(&bitmap)?,
        })
    }

    pub(super) fn write(&self, writer: &mut Writer) {
        writer.write_name(&self.next_domain_name, false);
        writer.write_octets(&self.types.to_wire());
    }
}

impl fmt::Display for Nsec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.next_domain_name)?;
        for rr_type in self.types.iter() {
            write!(f, " {rr_type}")?;
        }
        Ok(())
    }
}

/// The set of RR types present at a name, as encoded in the window
/// blocks of [RFC 4034 § 4.1.2].
///
/// [RFC 4034 § 4.1.2]: https://datatracker.ietf.org/doc/html/rfc4034#section-4.1.2
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TypeBitmap {
    types: BTreeSet<Type>,
}

impl TypeBitmap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rr_type: Type) -> bool {
        self.types.insert(rr_type)
    }

    pub fn contains(&self, rr_type: Type) -> bool {
        self.types.contains(&rr_type)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates over the types in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Type> + '_ {
        self.types.iter().copied()
    }

    /// Decodes window blocks. Windows must appear in increasing order,
    /// and each bitmap must be 1 to 32 octets long.
    fn from_wire(octets: &[u8]) -> Result<Self, ReadRdataError> {
        let mut types = BTreeSet::new();
        let mut last_window = None;
        let mut rest = octets;
        while !rest.is_empty() {
            let (window, len) = match rest {
                [window, len, ..] => (*window, *len as usize),
                _ => return Err(ReadRdataError::Other("truncated NSEC window block")),
            };
            if last_window.map_or(false, |last| window <= last) {
                return Err(ReadRdataError::Other("NSEC windows out of order"));
            }
            if len == 0 || len > 32 {
                return Err(ReadRdataError::Other("invalid NSEC bitmap length"));
            }
            let bitmap = rest
                .get(2..2 + len)
                .ok_or(ReadRdataError::Other("truncated NSEC window block"))?;
            for (i, octet) in bitmap.iter().enumerate() {
                for bit in 0..8 {
                    if octet & (0x80 >> bit) != 0 {
                        let value = (window as u16) << 8 | (i * 8 + bit) as u16;
                        types.insert(Type::from(value));
                    }
                }
            }
            last_window = Some(window);
            rest = &rest[2 + len..];
        }
        Ok(Self { types })
    }

    /// Encodes the set as window blocks.
    fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::new();
        let mut window: Option<(u8, [u8; 32], usize)> = None;
        for rr_type in self.iter() {
            let value = u16::from(rr_type);
            let (high, low) = ((value >> 8) as u8, (value & 0xff) as usize);
            if !matches!(window, Some((current, _, _)) if current == high) {
                if let Some(done) = window.take() {
                    push_window(&mut out, done);
                }
                window = Some((high, [0; 32], 0));
            }
            if let Some((_, bitmap, len)) = &mut window {
                bitmap[low / 8] |= 0x80 >> (low % 8);
                *len = (*len).max(low / 8 + 1);
            }
        }
        if let Some(done) = window {
            push_window(&mut out, done);
        }
        out
    }
}

fn push_window(out: &mut Vec<u8>, (window, bitmap, len): (u8, [u8; 32], usize)) {
    out.push(window);
    out.push(len as u8);
    out.extend_from_slice(&bitmap[..len]);
}

impl FromIterator<Type> for TypeBitmap {
    fn from_iter<I: IntoIterator<Item = Type>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
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

    #[test]
    fn ds_works() {
        let rdata = read_all(Type::DS, b"\x7b\x40\x08\x02\xde\xad\xbe\xef").unwrap();
        assert_eq!(
            rdata,
            Rdata::Ds(Ds {
                key_tag: 31552,
                algorithm: 8,
                digest_type: 2,
                digest: vec![0xde, 0xad, 0xbe, 0xef],
            })
        );
        assert_eq!(rdata.to_string(), "31552 8 2 DEADBEEF");
        assert_eq!(round_trip(&rdata), rdata);
    }

    #[test]
    fn short_ds_is_rejected() {
        // Three octets cannot hold the fixed fields.
        let mut reader = Reader::new(b"\x7b\x40\x08\x02\x00");
        assert!(Rdata::read(&mut reader, Type::DS, 3).is_err());
    }

    #[test]
    fn dnskey_works() {
        let dnskey = Dnskey {
            flags: 257,
            protocol: 3,
            algorithm: 13,
            public_key: b"dns".to_vec(),
        };
        assert!(dnskey.is_zone_key());
        assert!(dnskey.is_secure_entry_point());
        let rdata = Rdata::Dnskey(dnskey);
        assert_eq!(rdata.to_string(), "257 3 13 ZG5z");
        assert_eq!(round_trip(&rdata), rdata);
    }

    #[test]
    fn key_tag_is_computed() {
        // 0x0101 + 0x030d + 0x646e + 0x7300 = 0xdb7c.
        let dnskey = Dnskey {
            flags: 257,
            protocol: 3,
            algorithm: 13,
            public_key: b"dns".to_vec(),
        };
        assert_eq!(dnskey.key_tag(), 0xdb7c);

        // Carries out of the low 16 bits are folded back in.
        let dnskey = Dnskey {
            flags: 0xffff,
            protocol: 0xff,
            algorithm: 0xff,
            public_key: vec![0xff, 0xff],
        };
        assert_eq!(dnskey.key_tag(), 0xffff);
    }

    #[test]
    fn rrsig_works() {
        let rrsig = Rrsig {
            type_covered: Type::A,
            algorithm: 13,
            labels: 2,
            original_ttl: 3600,
            expiration: 1_700_000_000,
            inception: 0,
            key_tag: 12345,
            signer_name: "example.com.".parse().unwrap(),
            signature: b"sig".to_vec(),
        };
        let rdata = Rdata::Rrsig(rrsig);
        assert_eq!(
            rdata.to_string(),
            "A 13 2 3600 20231114221320 19700101000000 12345 example.com. c2ln"
        );
        assert_eq!(round_trip(&rdata), rdata);
    }

    #[test]
    fn rrsig_signer_is_not_compressed() {
        let signer: Name = "example.com.".parse().unwrap();
        let mut writer = Writer::new(CompressionMode::Standard);
        writer.write_name(&signer, true);
        let rrsig = Rrsig {
            type_covered: Type::SOA,
            algorithm: 8,
            labels: 2,
            original_ttl: 0,
            expiration: 0,
            inception: 0,
            key_tag: 0,
            signer_name: signer,
            signature: Vec::new(),
        };
        Rdata::Rrsig(rrsig).write(&mut writer, Type::RRSIG).unwrap();
        let octets = writer.finish();
        assert_eq!(&octets[13 + 18..], b"\x07example\x03com\x00");
    }

    #[test]
    fn nsec_type_bitmap_works() {
        // The example of RFC 4034 § 4.3.
        let octets = b"\x04host\x07example\x03com\x00\
                       \x00\x06\x40\x01\x00\x00\x00\x03\
                       \x04\x1b\x00\x00\x00\x00\x00\x00\x00\
                       \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
                       \x00\x00\x00\x00\x00\x00\x00\x00\x00\x20";
        let rdata = read_all(Type::NSEC, octets).unwrap();
        let expected_types: TypeBitmap = [
            Type::A,
            Type::MX,
            Type::RRSIG,
            Type::NSEC,
            Type::from(1234),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            rdata,
            Rdata::Nsec(Nsec {
                next_domain_name: "host.example.com.".parse().unwrap(),
                types: expected_types,
            })
        );
        assert_eq!(
            rdata.to_string(),
            "host.example.com. A MX RRSIG NSEC TYPE1234"
        );
        assert_eq!(round_trip(&rdata), rdata);
    }

    #[test]
    fn bad_type_bitmaps_are_rejected() {
        assert!(TypeBitmap::from_wire(b"\x00\x00").is_err());
        assert!(TypeBitmap::from_wire(b"\x00\x21").is_err());
        assert!(TypeBitmap::from_wire(b"\x01\x01\x40\x00\x01\x40").is_err());
        assert!(TypeBitmap::from_wire(b"\x00\x02\x40").is_err());
        assert_eq!(TypeBitmap::from_wire(b""), Ok(TypeBitmap::new()));
    }

    #[test]
    fn type_bitmap_encodes_windows() {
        let types: TypeBitmap = [Type::NS, Type::SOA, Type::CAA].into_iter().collect();
        assert_eq!(types.to_wire(), b"\x00\x01\x22\x01\x01\x40");
    }
}
