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

//! Implementation of the [`Rdata`] type and DNS RDATA processing.

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;
use log::debug;

use super::Type;
use crate::buffer;
use crate::message::{Reader, Writer};
use crate::name::{self, Name};
use crate::util::to_hex;

// Implementation helpers.
mod helpers;

// Implementations of RR types.
mod caa;
mod dnssec;
mod ipv6;
mod naptr;
mod opt;
mod srv;
mod sshfp;
mod std13;
mod tlsa;
pub use caa::*;
pub use dnssec::*;
pub use ipv6::*;
pub use naptr::*;
pub use opt::*;
pub use srv::*;
pub use sshfp::*;
pub use std13::*;
pub use tlsa::*;

/// The largest RDATA that fits the 16-bit RDLENGTH field.
pub const MAX_RDLENGTH: usize = u16::MAX as usize;

////////////////////////////////////////////////////////////////////////
// RDATA TYPE                                                         //
////////////////////////////////////////////////////////////////////////

/// A type for record RDATA.
///
/// Each RR type this crate understands has its own variant, holding
/// the decoded fields of the RDATA. RDATA of any other type is kept as
/// opaque octets in [`Rdata::Unknown`], as [RFC 3597] prescribes, and is
/// written back out unchanged.
///
/// Embedded domain names are compared case-insensitively, like all
/// [`Name`]s.
///
/// [RFC 3597]: https://datatracker.ietf.org/doc/html/rfc3597
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Rdata {
    A(A),
    Ns(Name),
    Cname(Name),
    Soa(Soa),
    Ptr(Name),
    Hinfo(Hinfo),
    Mx(Mx),
    Txt(Txt),
    Aaaa(Aaaa),
    Srv(Srv),
    Naptr(Naptr),
    Dname(Name),
    Opt(Vec<EdnsOption>),
    Ds(Ds),
    Sshfp(Sshfp),
    Rrsig(Rrsig),
    Nsec(Nsec),
    Dnskey(Dnskey),
    Tlsa(Tlsa),
    Caa(Caa),
    Unknown { rr_type: Type, octets: Vec<u8> },
}

impl Rdata {
    /// Returns the RR type this RDATA belongs to.
    pub fn rr_type(&self) -> Type {
        match self {
            Self::A(_) => Type::A,
            Self::Ns(_) => Type::NS,
            Self::Cname(_) => Type::CNAME,
            Self::Soa(_) => Type::SOA,
            Self::Ptr(_) => Type::PTR,
            Self::Hinfo(_) => Type::HINFO,
            Self::Mx(_) => Type::MX,
            Self::Txt(_) => Type::TXT,
            Self::Aaaa(_) => Type::AAAA,
            Self::Srv(_) => Type::SRV,
            Self::Naptr(_) => Type::NAPTR,
            Self::Dname(_) => Type::DNAME,
            Self::Opt(_) => Type::OPT,
            Self::Ds(_) => Type::DS,
            Self::Sshfp(_) => Type::SSHFP,
            Self::Rrsig(_) => Type::RRSIG,
            Self::Nsec(_) => Type::NSEC,
            Self::Dnskey(_) => Type::DNSKEY,
            Self::Tlsa(_) => Type::TLSA,
            Self::Caa(_) => Type::CAA,
            Self::Unknown { rr_type, .. } => *rr_type,
        }
    }

    /// Reads RDATA of type `rr_type` and length `rdlength` at the
    /// reader's cursor.
    ///
    /// Registered types are decoded by their codec; any embedded
    /// compressed names are decompressed against the whole message.
    /// Other types are kept opaque. Empty RDATA of a registered type
    /// (which appears e.g. in dynamic update messages, per
    /// [RFC 2136 § 2.5]) is also kept opaque, except for OPT, whose
    /// RDATA may legitimately be empty.
    ///
    /// Fails if fewer than `rdlength` octets remain, or if the codec
    /// consumed a different number of octets than `rdlength`.
    ///
    /// [RFC 2136 § 2.5]: https://datatracker.ietf.org/doc/html/rfc2136#section-2.5
    pub fn read(reader: &mut Reader, rr_type: Type, rdlength: u16) -> Result<Self, ReadRdataError> {
        let len = rdlength as usize;
        if len > reader.remaining() {
            return Err(ReadRdataError::Field(buffer::Error::Truncated {
                offset: reader.offset(),
                remaining: reader.remaining(),
                requested: len,
            }));
        }

        let start = reader.offset();
        let rdata = match REGISTRY.get(&rr_type) {
            Some(codec) if len > 0 || rr_type == Type::OPT => (codec.decode)(reader, rdlength)?,
            registered => {
                if registered.is_none() {
                    debug!("Keeping RDATA of unknown type {rr_type} opaque");
                }
                Self::Unknown {
                    rr_type,
                    octets: reader.read_octets(len)?,
                }
            }
        };

        let consumed = reader.offset() - start;
        if consumed == len {
            Ok(rdata)
        } else {
            Err(ReadRdataError::LengthMismatch {
                declared: rdlength,
                consumed,
            })
        }
    }

    /// Writes this RDATA at the end of the writer's message, as RDATA
    /// of type `rr_type`.
    ///
    /// [`Rdata::Unknown`] is written verbatim, but only under an
    /// unregistered type or as the empty RDATA of a registered type other
    /// than OPT; anything else would not decode back to opaque RDATA.
    /// Any other variant must match `rr_type`.
    pub fn write(&self, writer: &mut Writer, rr_type: Type) -> Result<(), WriteRdataError> {
        if let Self::Unknown { octets, .. } = self {
            if REGISTRY.contains_key(&rr_type) && (!octets.is_empty() || rr_type == Type::OPT) {
                return Err(WriteRdataError::OpaqueRegisteredType(rr_type));
            }
            writer.write_octets(octets);
            return Ok(());
        }
        match REGISTRY.get(&rr_type) {
            Some(codec) if self.rr_type() == rr_type => (codec.encode)(self, writer),
            _ => Err(WriteRdataError::TypeMismatch {
                expected: rr_type,
                found: self.rr_type(),
            }),
        }
    }
}

/// RDATA is displayed in the presentation format of zone files. RDATA
/// kept opaque uses the generic format of [RFC 3597 § 5].
///
/// [RFC 3597 § 5]: https://datatracker.ietf.org/doc/html/rfc3597#section-5
impl fmt::Display for Rdata {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::A(a) => a.fmt(f),
            Self::Ns(name) | Self::Cname(name) | Self::Ptr(name) | Self::Dname(name) => {
                name.fmt(f)
            }
            Self::Soa(soa) => soa.fmt(f),
            Self::Hinfo(hinfo) => hinfo.fmt(f),
            Self::Mx(mx) => mx.fmt(f),
            Self::Txt(txt) => txt.fmt(f),
            Self::Aaaa(aaaa) => aaaa.fmt(f),
            Self::Srv(srv) => srv.fmt(f),
            Self::Naptr(naptr) => naptr.fmt(f),
            Self::Opt(options) => {
                let mut first = true;
                for option in options {
                    if !first {
                        f.write_str(" ")?;
                    }
                    first = false;
                    option.fmt(f)?;
                }
                Ok(())
            }
            Self::Ds(ds) => ds.fmt(f),
            Self::Sshfp(sshfp) => sshfp.fmt(f),
            Self::Rrsig(rrsig) => rrsig.fmt(f),
            Self::Nsec(nsec) => nsec.fmt(f),
            Self::Dnskey(dnskey) => dnskey.fmt(f),
            Self::Tlsa(tlsa) => tlsa.fmt(f),
            Self::Caa(caa) => caa.fmt(f),
            Self::Unknown { octets, .. } => {
                write!(f, "\\# {}", octets.len())?;
                if !octets.is_empty() {
                    write!(f, " {}", to_hex(octets))?;
                }
                Ok(())
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////
// REGISTRY                                                           //
////////////////////////////////////////////////////////////////////////

/// The signature of an RDATA decoder. It is given the reader positioned
/// at the start of the RDATA, and the RDLENGTH.
pub type DecodeFn = fn(&mut Reader, u16) -> Result<Rdata, ReadRdataError>;

/// The signature of an RDATA encoder.
pub type EncodeFn = fn(&Rdata, &mut Writer) -> Result<(), WriteRdataError>;

/// The decoder and encoder for one registered RR type.
pub struct Codec {
    pub name: &'static str,
    pub decode: DecodeFn,
    pub encode: EncodeFn,
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Codec").field("name", &self.name).finish()
    }
}

/// Builds a [`Codec`] from a typed reader and writer for the payload of
/// the given [`Rdata`] variant.
macro_rules! codec {
    ($rr_type:expr, $variant:ident, $read:expr, $write:expr) => {
        Codec {
            name: stringify!($variant),
            decode: |reader, rdlength| $read(reader, rdlength).map(Rdata::$variant),
            encode: |rdata, writer| match rdata {
                Rdata::$variant(payload) => {
                    $write(payload, writer);
                    Ok(())
                }
                other => Err(WriteRdataError::TypeMismatch {
                    expected: $rr_type,
                    found: other.rr_type(),
                }),
            },
        }
    };
}

lazy_static! {
    static ref REGISTRY: HashMap<Type, Codec> = {
        let mut registry = HashMap::new();
        registry.insert(Type::A, codec!(Type::A, A, A::read, A::write));
        registry.insert(
            Type::NS,
            codec!(Type::NS, Ns, helpers::read_name_rdata, helpers::write_compressed_name),
        );
        registry.insert(
            Type::CNAME,
            codec!(Type::CNAME, Cname, helpers::read_name_rdata, helpers::write_compressed_name),
        );
        registry.insert(Type::SOA, codec!(Type::SOA, Soa, Soa::read, Soa::write));
        registry.insert(
            Type::PTR,
            codec!(Type::PTR, Ptr, helpers::read_name_rdata, helpers::write_compressed_name),
        );
        registry.insert(Type::HINFO, codec!(Type::HINFO, Hinfo, Hinfo::read, Hinfo::write));
        registry.insert(Type::MX, codec!(Type::MX, Mx, Mx::read, Mx::write));
        registry.insert(Type::TXT, codec!(Type::TXT, Txt, Txt::read, Txt::write));
        registry.insert(Type::AAAA, codec!(Type::AAAA, Aaaa, Aaaa::read, Aaaa::write));
        registry.insert(Type::SRV, codec!(Type::SRV, Srv, Srv::read, Srv::write));
        registry.insert(Type::NAPTR, codec!(Type::NAPTR, Naptr, Naptr::read, Naptr::write));
        registry.insert(
            Type::DNAME,
            codec!(Type::DNAME, Dname, helpers::read_name_rdata, helpers::write_uncompressed_name),
        );
        registry.insert(Type::OPT, codec!(Type::OPT, Opt, opt::read_options, opt::write_options));
        registry.insert(Type::DS, codec!(Type::DS, Ds, Ds::read, Ds::write));
        registry.insert(Type::SSHFP, codec!(Type::SSHFP, Sshfp, Sshfp::read, Sshfp::write));
        registry.insert(Type::RRSIG, codec!(Type::RRSIG, Rrsig, Rrsig::read, Rrsig::write));
        registry.insert(Type::NSEC, codec!(Type::NSEC, Nsec, Nsec::read, Nsec::write));
        registry.insert(Type::DNSKEY, codec!(Type::DNSKEY, Dnskey, Dnskey::read, Dnskey::write));
        registry.insert(Type::TLSA, codec!(Type::TLSA, Tlsa, Tlsa::read, Tlsa::write));
        registry.insert(Type::CAA, codec!(Type::CAA, Caa, Caa::read, Caa::write));
        registry
    };
}

/// Returns the codec registered for `rr_type`, if there is one.
pub fn codec(rr_type: Type) -> Option<&'static Codec> {
    REGISTRY.get(&rr_type)
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that RDATA could not be read.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReadRdataError {
    /// A fixed-width field could not be read.
    Field(buffer::Error),

    /// An embedded domain name was invalid.
    InvalidName(name::Error),

    /// The RDATA's codec consumed a different number of octets than
    /// RDLENGTH declared.
    LengthMismatch { declared: u16, consumed: usize },

    /// The RDATA was structurally invalid for its type.
    Other(&'static str),
}

impl ReadRdataError {
    /// Returns whether the error was caused by running out of octets.
    pub fn is_truncation(&self) -> bool {
        match self {
            Self::Field(err) => matches!(err, buffer::Error::Truncated { .. }),
            Self::InvalidName(err) => *err == name::Error::UnexpectedEom,
            _ => false,
        }
    }
}

impl fmt::Display for ReadRdataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Field(err) => write!(f, "invalid RDATA field: {err}"),
            Self::InvalidName(err) => write!(f, "invalid embedded domain name: {err}"),
            Self::LengthMismatch { declared, consumed } => write!(
                f,
                "RDLENGTH is {declared} but the RDATA occupies {consumed} octets"
            ),
            Self::Other(reason) => write!(f, "invalid RDATA: {reason}"),
        }
    }
}

impl std::error::Error for ReadRdataError {}

impl From<buffer::Error> for ReadRdataError {
    fn from(err: buffer::Error) -> Self {
        Self::Field(err)
    }
}

impl From<name::Error> for ReadRdataError {
    fn from(err: name::Error) -> Self {
        Self::InvalidName(err)
    }
}

/// An error signaling that RDATA could not be written.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum WriteRdataError {
    /// The RDATA variant does not belong to the record's RR type.
    TypeMismatch { expected: Type, found: Type },

    /// The RDATA is longer than 65,535 octets.
    TooLong(usize),

    /// Opaque RDATA was given for a type that has a codec.
    OpaqueRegisteredType(Type),
}

impl fmt::Display for WriteRdataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected, found } => {
                write!(f, "{found} RDATA cannot be written as {expected} RDATA")
            }
            Self::TooLong(len) => write!(f, "RDATA is too long ({len} octets)"),
            Self::OpaqueRegisteredType(rr_type) => {
                write!(f, "{rr_type} RDATA must be given in decoded form")
            }
        }
    }
}

impl std::error::Error for WriteRdataError {}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::CompressionMode;

    /// Writes `rdata` into a fresh message and reads it back.
    pub(super) fn round_trip(rdata: &Rdata) -> Rdata {
        let mut writer = Writer::new(CompressionMode::Standard);
        rdata.write(&mut writer, rdata.rr_type()).unwrap();
        let octets = writer.finish();
        let mut reader = Reader::new(&octets);
        let decoded = Rdata::read(&mut reader, rdata.rr_type(), octets.len() as u16).unwrap();
        assert!(reader.at_eom());
        decoded
    }

    /// Reads RDATA of type `rr_type` occupying all of `octets`.
    pub(super) fn read_all(rr_type: Type, octets: &[u8]) -> Result<Rdata, ReadRdataError> {
        let mut reader = Reader::new(octets);
        Rdata::read(&mut reader, rr_type, octets.len() as u16)
    }

    #[test]
    fn registry_covers_known_types() {
        let types = [
            Type::A,
            Type::NS,
            Type::CNAME,
            Type::SOA,
            Type::PTR,
            Type::HINFO,
            Type::MX,
            Type::TXT,
            Type::AAAA,
            Type::SRV,
            Type::NAPTR,
            Type::DNAME,
            Type::OPT,
            Type::DS,
            Type::SSHFP,
            Type::RRSIG,
            Type::NSEC,
            Type::DNSKEY,
            Type::TLSA,
            Type::CAA,
        ];
        for rr_type in types {
            assert!(codec(rr_type).is_some(), "{rr_type} is not registered");
        }
        assert!(codec(Type::NULL).is_none());
        assert_eq!(codec(Type::MX).map(|codec| codec.name), Some("Mx"));
    }

    #[test]
    fn unknown_types_are_kept_opaque() {
        let rr_type = Type::from(0xff00);
        let rdata = read_all(rr_type, b"\x01\x02\xab").unwrap();
        assert_eq!(
            rdata,
            Rdata::Unknown {
                rr_type,
                octets: vec![1, 2, 0xab]
            }
        );
        assert_eq!(rdata.to_string(), "\\# 3 0102ab");
        assert_eq!(round_trip(&rdata), rdata);
    }

    #[test]
    fn empty_rdata_of_known_type_is_kept_opaque() {
        let rdata = read_all(Type::A, b"").unwrap();
        assert_eq!(
            rdata,
            Rdata::Unknown {
                rr_type: Type::A,
                octets: Vec::new()
            }
        );
        assert_eq!(rdata.to_string(), "\\# 0");
    }

    #[test]
    fn read_detects_length_mismatch() {
        // An A record claiming five octets of RDATA.
        let mut reader = Reader::new(b"\xc0\x00\x02\x01\xff");
        assert_eq!(
            Rdata::read(&mut reader, Type::A, 5),
            Err(ReadRdataError::LengthMismatch {
                declared: 5,
                consumed: 4
            })
        );

        // An MX record claiming two octets, whose exchange runs past them.
        let mut reader = Reader::new(b"\x00\x0a\x00\x00");
        assert_eq!(
            Rdata::read(&mut reader, Type::MX, 2),
            Err(ReadRdataError::LengthMismatch {
                declared: 2,
                consumed: 3
            })
        );
    }

    #[test]
    fn read_detects_truncation() {
        let mut reader = Reader::new(b"\x7f\x00");
        let err = Rdata::read(&mut reader, Type::A, 4).unwrap_err();
        assert!(err.is_truncation());
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn write_rejects_mismatched_types() {
        let mut writer = Writer::new(CompressionMode::Standard);
        let rdata = Rdata::Ns("example.com.".parse().unwrap());
        assert_eq!(
            rdata.write(&mut writer, Type::CNAME),
            Err(WriteRdataError::TypeMismatch {
                expected: Type::CNAME,
                found: Type::NS
            })
        );
        assert_eq!(
            rdata.write(&mut writer, Type::NULL),
            Err(WriteRdataError::TypeMismatch {
                expected: Type::NULL,
                found: Type::NS
            })
        );
    }

    #[test]
    fn unknown_rdata_is_written_verbatim() {
        let mut writer = Writer::new(CompressionMode::Standard);
        let empty = Rdata::Unknown {
            rr_type: Type::A,
            octets: vec![],
        };
        empty.write(&mut writer, Type::A).unwrap();
        let private = Rdata::Unknown {
            rr_type: Type::from(0xff00),
            octets: vec![1, 2],
        };
        private.write(&mut writer, Type::from(0xff00)).unwrap();
        assert_eq!(writer.finish(), b"\x01\x02");
    }

    #[test]
    fn unknown_rdata_of_registered_type_is_rejected() {
        let mut writer = Writer::new(CompressionMode::Standard);
        let rdata = Rdata::Unknown {
            rr_type: Type::A,
            octets: vec![1, 2, 3],
        };
        assert_eq!(
            rdata.write(&mut writer, Type::A),
            Err(WriteRdataError::OpaqueRegisteredType(Type::A))
        );
        let empty_opt = Rdata::Unknown {
            rr_type: Type::OPT,
            octets: vec![],
        };
        assert_eq!(
            empty_opt.write(&mut writer, Type::OPT),
            Err(WriteRdataError::OpaqueRegisteredType(Type::OPT))
        );
        assert!(writer.is_empty());
    }
}
