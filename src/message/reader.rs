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

//! Implementation of the [`Reader`] type to read on-the-wire DNS
//! messages.

use std::fmt;

use log::trace;

use super::constants::*;
use super::{Header, Question, SectionCounts};
use crate::buffer::{self, Buffer};
use crate::name::{self, Name};
use crate::rr::rdata::{OptRecord, Rdata, ReadRdataError};
use crate::rr::{Record, Rr, Ttl, Type};

////////////////////////////////////////////////////////////////////////
// READER                                                             //
////////////////////////////////////////////////////////////////////////

/// A cursor over a buffer containing a DNS message that enables reading
/// the message data.
///
/// The cursor starts at the first octet of the message. The header
/// must be read first with [`Reader::read_header`], and then
/// [`Reader::read_question`] and [`Reader::read_record`] must be called
/// sequentially to read any questions, and then any records, in the
/// order they appear in the message.
///
/// The lower-level methods ([`Reader::read_u16`], [`Reader::read_name`],
/// and so on) are provided for RDATA decoders. Names are always read
/// with respect to the whole message, so compression pointers inside
/// RDATA are followed correctly.
pub struct Reader {
    buf: Buffer,
}

impl Reader {
    /// Creates a new `Reader` over a copy of `octets`.
    pub fn new(octets: &[u8]) -> Self {
        Self {
            buf: Buffer::from(octets),
        }
    }

    /// Returns the position of the cursor.
    pub fn offset(&self) -> usize {
        self.buf.offset()
    }

    /// Returns the number of octets after the cursor.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    /// Returns whether the `Reader`'s cursor has reached the end of the
    /// message.
    pub fn at_eom(&self) -> bool {
        self.buf.remaining() == 0
    }

    /// Reads an unsigned 8-bit integer.
    pub fn read_u8(&mut self) -> buffer::Result<u8> {
        self.buf.get_u8()
    }

    /// Reads a network-byte-order `u16`.
    pub fn read_u16(&mut self) -> buffer::Result<u16> {
        self.buf.get_u16()
    }

    /// Reads a network-byte-order `u32`.
    pub fn read_u32(&mut self) -> buffer::Result<u32> {
        self.buf.get_u32()
    }

    /// Reads `len` raw octets.
    pub fn read_octets(&mut self, len: usize) -> buffer::Result<Vec<u8>> {
        self.buf.get(len).map(<[u8]>::to_vec)
    }

    /// Reads a (possibly compressed) domain name. The cursor is left
    /// just past the first pointer of the name, or past its terminating
    /// null label if it has no pointers. On failure the cursor is not
    /// moved.
    pub fn read_name(&mut self) -> std::result::Result<Name, name::Error> {
        let start = self.buf.offset();
        let (name, len) = Name::try_from_compressed(self.buf.as_slice(), start)?;
        self.buf
            .seek(start + len)
            .or(Err(name::Error::UnexpectedEom))?;
        Ok(name)
    }

    /// Reads the 12-octet message header.
    pub fn read_header(&mut self) -> Result<(Header, SectionCounts)> {
        if self.buf.remaining() < HEADER_SIZE {
            return Err(Error::HeaderTooShort);
        }
        let fields = self.buf.unpack(&HEADER_LAYOUT)?;
        let header = Header::from_flags(fields[0] as u16, fields[1] as u16);
        let counts = SectionCounts {
            qdcount: fields[2] as u16,
            ancount: fields[3] as u16,
            nscount: fields[4] as u16,
            arcount: fields[5] as u16,
        };
        trace!("Read header {header:?} with {counts:?}");
        Ok((header, counts))
    }

    /// Reads a [`Question`] starting at the current cursor.
    ///
    /// This method is atomic, in that the cursor is not changed on
    /// failure.
    pub fn read_question(&mut self) -> Result<Question> {
        let start = self.buf.offset();
        self.read_question_inner().map_err(|err| {
            self.rewind(start);
            err
        })
    }

    fn read_question_inner(&mut self) -> Result<Question> {
        let qname = self.read_name().map_err(Error::InvalidOwner)?;
        let qtype = self.read_u16()?.into();
        let qclass = self.read_u16()?.into();
        Ok(Question {
            qname,
            qtype,
            qclass,
        })
    }

    /// Reads a resource record at the current cursor. An OPT record
    /// owned by the root is returned as [`Record::Opt`]; everything
    /// else is a [`Record::Standard`].
    ///
    /// This method is atomic, in that the cursor is not changed on
    /// failure.
    pub fn read_record(&mut self) -> Result<Record> {
        let start = self.buf.offset();
        self.read_record_inner().map_err(|err| {
            self.rewind(start);
            err
        })
    }

    fn read_record_inner(&mut self) -> Result<Record> {
        let owner = self.read_name().map_err(Error::InvalidOwner)?;
        let fields = self.buf.unpack(&RR_FIXED_LAYOUT)?;
        let rr_type = Type::from(fields[0] as u16);
        let class = fields[1] as u16;
        let ttl = fields[2] as u32;
        let rdlength = fields[3] as u16;
        let rdata = Rdata::read(self, rr_type, rdlength)?;

        match rdata {
            Rdata::Opt(options) if owner.is_root() => Ok(Record::Opt(OptRecord::from_wire(
                class, ttl, options,
            ))),
            rdata => Ok(Record::Standard(Rr {
                owner,
                rr_type,
                class: class.into(),
                ttl: Ttl::from(ttl),
                rdata,
            })),
        }
    }

    /// Moves the cursor back to `offset` after a failed read.
    fn rewind(&mut self, offset: usize) {
        // The offset was valid before the read began, and reads never
        // shrink the buffer.
        let _ = self.buf.seek(offset);
    }
}

impl fmt::Debug for Reader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Reader")
            .field("len", &self.buf.len())
            .field("cursor", &self.buf.offset())
            .finish()
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that a header, [`Question`], or resource record
/// could not be read.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    HeaderTooShort,
    Field(buffer::Error),
    InvalidOwner(name::Error),
    InvalidRdata(ReadRdataError),
}

impl Error {
    /// Returns whether the error was caused by running out of octets
    /// (as opposed to malformed data).
    pub fn is_truncation(&self) -> bool {
        match self {
            Self::HeaderTooShort => true,
            Self::Field(err) => matches!(err, buffer::Error::Truncated { .. }),
            Self::InvalidOwner(err) => *err == name::Error::UnexpectedEom,
            Self::InvalidRdata(err) => err.is_truncation(),
        }
    }
}

impl From<buffer::Error> for Error {
    fn from(err: buffer::Error) -> Self {
        Self::Field(err)
    }
}

impl From<ReadRdataError> for Error {
    fn from(err: ReadRdataError) -> Self {
        Self::InvalidRdata(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::HeaderTooShort => f.write_str("header too short"),
            Self::Field(err) => write!(f, "error reading field: {err}"),
            Self::InvalidOwner(err) => write!(f, "invalid owner: {err}"),
            Self::InvalidRdata(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

/// The type returned by fallible [`Reader`] methods.
pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::super::tests::EXAMPLE_COM_NS_MESSAGE;
    use super::super::{Opcode, Qclass, Qtype, Rcode};
    use super::*;
    use crate::class::Class;

    #[test]
    fn reader_works() {
        let mut reader = Reader::new(EXAMPLE_COM_NS_MESSAGE);
        let expected_qname: Name = "example.com.".parse().unwrap();
        let expected_ns_a: Name = "a.iana-servers.net.".parse().unwrap();
        let expected_ns_b: Name = "b.iana-servers.net.".parse().unwrap();

        // Check the header.
        let (header, counts) = reader.read_header().unwrap();
        assert_eq!(header.id, 0xe2d7);
        assert!(header.qr);
        assert_eq!(header.opcode(), Opcode::Query);
        assert!(!header.aa);
        assert!(!header.tc);
        assert!(header.rd);
        assert!(header.ra);
        assert_eq!(header.rcode(), Rcode::NoError);
        assert_eq!(
            counts,
            SectionCounts {
                qdcount: 1,
                ancount: 2,
                nscount: 0,
                arcount: 1
            }
        );

        // Check the question.
        let question = reader.read_question().unwrap();
        assert_eq!(question.qname, expected_qname);
        assert_eq!(question.qtype, Qtype::from(Type::NS));
        assert_eq!(question.qclass, Qclass::from(Class::IN));

        // Check the answers.
        for expected_ns in [expected_ns_a, expected_ns_b] {
            match reader.read_record().unwrap() {
                Record::Standard(rr) => {
                    assert_eq!(rr.owner, expected_qname);
                    assert_eq!(rr.rr_type, Type::NS);
                    assert_eq!(rr.class, Class::IN);
                    assert_eq!(rr.ttl, Ttl::from(86178));
                    assert_eq!(rr.rdata, Rdata::Ns(expected_ns));
                }
                other => panic!("expected an NS record, got {other:?}"),
            }
        }

        // Check the OPT record.
        match reader.read_record().unwrap() {
            Record::Opt(opt) => {
                assert_eq!(opt.udp_payload_size, 4096);
                assert_eq!(opt.extended_rcode, 0);
                assert_eq!(opt.version, 0);
                assert!(!opt.dnssec_ok);
                assert!(opt.options.is_empty());
            }
            other => panic!("expected an OPT record, got {other:?}"),
        }

        // And that should be it!
        assert!(reader.at_eom());
    }

    #[test]
    fn reader_rejects_short_header() {
        for size in 0..HEADER_SIZE {
            let buf = vec![0; size];
            let mut reader = Reader::new(&buf);
            assert_eq!(reader.read_header(), Err(Error::HeaderTooShort));
        }
    }

    #[test]
    fn failed_reads_do_not_move_cursor() {
        // A question whose QCLASS is cut off.
        let mut reader = Reader::new(b"\x07example\x00\x00\x01\x00");
        let err = reader.read_question().unwrap_err();
        assert!(err.is_truncation());
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn read_name_follows_pointers_and_stops_after_them() {
        let mut reader = Reader::new(b"\x03com\x00\x07example\xc0\x00\xff");
        assert_eq!(reader.read_name(), Ok("com.".parse().unwrap()));
        assert_eq!(reader.read_name(), Ok("example.com.".parse().unwrap()));
        assert_eq!(reader.offset(), 15);
        assert_eq!(reader.read_u8(), Ok(0xff));
    }

    #[test]
    fn opt_with_non_root_owner_is_standard() {
        let mut reader = Reader::new(b"\x01x\x00\x00\x29\x10\x00\x00\x00\x00\x00\x00\x00");
        match reader.read_record().unwrap() {
            Record::Standard(rr) => {
                assert_eq!(rr.rr_type, Type::OPT);
                assert_eq!(rr.rdata, Rdata::Opt(Vec::new()));
            }
            other => panic!("expected a standard record, got {other:?}"),
        }
    }
}
