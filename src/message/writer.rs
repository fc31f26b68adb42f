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

//! Implementation of the [`Writer`] type to serialize DNS messages.

use std::fmt;

use log::trace;

use super::constants::*;
use super::{Header, Question, SectionCounts};
use crate::buffer::{self, Buffer, Layout};
use crate::name::{Name, NameTable};
use crate::rr::rdata::{WriteRdataError, MAX_RDLENGTH};
use crate::rr::{Record, Type};

pub use crate::name::CompressionMode;

////////////////////////////////////////////////////////////////////////
// WRITER                                                             //
////////////////////////////////////////////////////////////////////////

/// A serializer of DNS messages.
///
/// A `Writer` appends to a message held in its own buffer. The header
/// must be written first with [`Writer::write_header`], followed by the
/// questions and then the records of each section in order. The writer
/// does not check this order, nor does it count what is written: the
/// caller supplies the [`SectionCounts`] up front. [`Message::pack`]
/// takes care of all of this.
///
/// Domain names are compressed according to the [`CompressionMode`]
/// given at construction, and only where [RFC 3597 § 4] permits it:
/// owner names, QNAMEs, and names inside NS, CNAME, PTR, SOA, and MX
/// RDATA.
///
/// [`Message::pack`]: super::Message::pack
/// [RFC 3597 § 4]: https://datatracker.ietf.org/doc/html/rfc3597#section-4
pub struct Writer {
    buf: Buffer,
    names: NameTable,
}

impl Writer {
    /// Creates a new `Writer` with an empty message.
    pub fn new(mode: CompressionMode) -> Self {
        Self {
            buf: Buffer::with_capacity(512),
            names: NameTable::new(mode),
        }
    }

    /// Returns the compression mode in use.
    pub fn compression_mode(&self) -> CompressionMode {
        self.names.mode()
    }

    /// Returns the number of octets written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.put_u16(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.put_u32(value);
    }

    pub fn write_octets(&mut self, octets: &[u8]) {
        self.buf.append(octets);
    }

    /// Writes a domain name. If `compress` is `true`, the name may be
    /// compressed against earlier names, and its suffixes become
    /// available to later names. Otherwise it is written in full and
    /// not remembered.
    pub fn write_name(&mut self, name: &Name, compress: bool) {
        self.names.write_name(&mut self.buf, name, compress);
    }

    /// Writes the 12-octet message header.
    pub fn write_header(&mut self, header: &Header, counts: SectionCounts) -> Result<()> {
        self.buf.pack(
            &HEADER_LAYOUT,
            &[
                header.id as u64,
                header.flags() as u64,
                counts.qdcount as u64,
                counts.ancount as u64,
                counts.nscount as u64,
                counts.arcount as u64,
            ],
        )?;
        trace!("Wrote header {header:?} with {counts:?}");
        Ok(())
    }

    /// Writes a question. The QNAME is compressed.
    pub fn write_question(&mut self, question: &Question) -> Result<()> {
        self.write_name(&question.qname, true);
        self.buf.pack(
            &QUESTION_FIXED_LAYOUT,
            &[
                u16::from(question.qtype) as u64,
                u16::from(question.qclass) as u64,
            ],
        )?;
        Ok(())
    }

    /// Writes a resource record. The owner is compressed.
    ///
    /// An OPT record owned by the root must be given as [`Record::Opt`],
    /// since that is how it reads back; a [`Record::Standard`] of that
    /// shape is rejected.
    ///
    /// RDLENGTH is first written as zero and then patched in place once
    /// the RDATA has been written, since compression means its length
    /// isn't known beforehand.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        match record {
            Record::Standard(rr) if rr.rr_type == Type::OPT && rr.owner.is_root() => {
                Err(Error::StandardOptRecord)
            }
            Record::Standard(rr) => self.write_rr(
                &rr.owner,
                rr.rr_type,
                rr.class.into(),
                rr.ttl.into(),
                |writer| rr.rdata.write(writer, rr.rr_type),
            ),
            Record::Opt(opt) => self.write_rr(
                &Name::root(),
                Type::OPT,
                opt.udp_payload_size,
                opt.ttl(),
                |writer| {
                    opt.write_options(writer);
                    Ok(())
                },
            ),
        }
    }

    fn write_rr<F>(
        &mut self,
        owner: &Name,
        rr_type: Type,
        class: u16,
        ttl: u32,
        write_rdata: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut Self) -> std::result::Result<(), WriteRdataError>,
    {
        self.write_name(owner, true);
        self.buf.pack(
            &RR_FIXED_LAYOUT,
            &[u16::from(rr_type) as u64, class as u64, ttl as u64, 0],
        )?;
        let rdata_start = self.buf.len();
        write_rdata(self)?;
        let rdlength = self.buf.len() - rdata_start;
        if rdlength > MAX_RDLENGTH {
            return Err(WriteRdataError::TooLong(rdlength).into());
        }
        self.buf
            .update(rdata_start - 2, &Layout::U16, &[rdlength as u64])?;
        trace!("Wrote {rr_type} record owned by {owner} with {rdlength} octets of RDATA");
        Ok(())
    }

    /// Consumes the `Writer`, returning the serialized message.
    pub fn finish(self) -> Vec<u8> {
        self.buf.into_vec()
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new(CompressionMode::default())
    }
}

impl fmt::Debug for Writer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Writer")
            .field("len", &self.buf.len())
            .field("mode", &self.names.mode())
            .field("names", &self.names.len())
            .finish()
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that a [`Writer`] operation could not be
/// performed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A fixed-width field could not be written.
    Field(buffer::Error),

    /// The RDATA of a record could not be written.
    InvalidRdata(WriteRdataError),

    /// A root-owned OPT record was given as a standard record.
    StandardOptRecord,
}

impl From<buffer::Error> for Error {
    fn from(err: buffer::Error) -> Self {
        Self::Field(err)
    }
}

impl From<WriteRdataError> for Error {
    fn from(err: WriteRdataError) -> Self {
        Self::InvalidRdata(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Field(err) => write!(f, "error writing field: {err}"),
            Self::InvalidRdata(err) => err.fmt(f),
            Self::StandardOptRecord => {
                f.write_str("root-owned OPT record must be the EDNS pseudo-record")
            }
        }
    }
}

impl std::error::Error for Error {}

/// The type returned by fallible [`Writer`] methods.
pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::super::Opcode;
    use super::*;
    use crate::class::Class;
    use crate::rr::rdata::{Mx, OptRecord, A};
    use crate::rr::{Rdata, Rr, Ttl};

    fn test_name() -> Name {
        "dnswire.test.".parse().unwrap()
    }

    #[test]
    fn writer_works() {
        // Not exhaustive; a check that the Writer works in a basic
        // scenario.
        let mut header = Header::new(0x0703);
        header.qr = true;
        header.aa = true;
        let counts = SectionCounts {
            qdcount: 1,
            ancount: 1,
            ..Default::default()
        };
        let question = Question::new(test_name(), Type::A);
        let answer = Record::Standard(Rr::new(
            test_name(),
            Class::IN,
            Ttl::from(3600),
            Rdata::A(A(Ipv4Addr::LOCALHOST)),
        ));

        let mut writer = Writer::default();
        writer.write_header(&header, counts).unwrap();
        writer.write_question(&question).unwrap();
        writer.write_record(&answer).unwrap();
        assert_eq!(
            writer.finish(),
            b"\x07\x03\x84\x00\x00\x01\x00\x01\x00\x00\x00\x00\
              \x07dnswire\x04test\x00\x00\x01\x00\x01\
              \xc0\x0c\x00\x01\x00\x01\x00\x00\x0e\x10\x00\x04\
              \x7f\x00\x00\x01"
        );
    }

    #[test]
    fn writer_works_with_edns() {
        let mut header = Header::new(0x0703);
        header.qr = true;
        header.set_opcode(Opcode::Update).unwrap();
        let counts = SectionCounts {
            arcount: 1,
            ..Default::default()
        };

        let mut writer = Writer::default();
        writer.write_header(&header, counts).unwrap();
        writer
            .write_record(&Record::Opt(OptRecord::new(1232)))
            .unwrap();
        assert_eq!(
            writer.finish(),
            b"\x07\x03\xa8\x00\x00\x00\x00\x00\x00\x00\x00\x01\
              \x00\x00\x29\x04\xd0\x00\x00\x00\x00\x00\x00",
        );
    }

    #[test]
    fn rdlength_is_patched() {
        let record = Record::Standard(Rr::new(
            test_name(),
            Class::IN,
            Ttl::from(0),
            Rdata::Mx(Mx::try_new(5, test_name()).unwrap()),
        ));
        let mut writer = Writer::default();
        writer.write_record(&record).unwrap();
        let octets = writer.finish();
        // The exchange is compressed to a pointer to the owner.
        assert_eq!(
            &octets[14..],
            b"\x00\x0f\x00\x01\x00\x00\x00\x00\x00\x04\x00\x05\xc0\x00"
        );
    }

    #[test]
    fn disabled_compression_writes_names_in_full() {
        let question = Question::new(test_name(), Type::A);
        let mut writer = Writer::new(CompressionMode::Disabled);
        writer.write_question(&question).unwrap();
        writer.write_question(&question).unwrap();
        assert_eq!(writer.len(), 2 * (14 + 4));
    }

    #[test]
    fn writer_rejects_overlong_rdata() {
        let record = Record::Standard(Rr {
            owner: Name::root(),
            rr_type: Type::NULL,
            class: Class::IN,
            ttl: Ttl::from(0),
            rdata: Rdata::Unknown {
                rr_type: Type::NULL,
                octets: vec![0; MAX_RDLENGTH + 1],
            },
        });
        let mut writer = Writer::default();
        assert_eq!(
            writer.write_record(&record),
            Err(Error::InvalidRdata(WriteRdataError::TooLong(MAX_RDLENGTH + 1)))
        );
    }

    #[test]
    fn writer_rejects_root_opt_as_standard_record() {
        let record = Record::Standard(Rr::new(
            Name::root(),
            Class::from(1232),
            Ttl::from(0),
            Rdata::Opt(Vec::new()),
        ));
        let mut writer = Writer::default();
        assert_eq!(writer.write_record(&record), Err(Error::StandardOptRecord));
        assert!(writer.is_empty());

        // Anywhere else, OPT RDATA is written like any other.
        let record = Record::Standard(Rr::new(
            test_name(),
            Class::IN,
            Ttl::from(0),
            Rdata::Opt(Vec::new()),
        ));
        writer.write_record(&record).unwrap();
        assert_eq!(writer.len(), 14 + 10);
    }

    #[test]
    fn writer_rejects_mismatched_rdata() {
        let record = Record::Standard(Rr {
            owner: Name::root(),
            rr_type: Type::A,
            class: Class::IN,
            ttl: Ttl::from(0),
            rdata: Rdata::Ns(test_name()),
        });
        let mut writer = Writer::default();
        assert_eq!(
            writer.write_record(&record),
            Err(Error::InvalidRdata(WriteRdataError::TypeMismatch {
                expected: Type::A,
                found: Type::NS
            }))
        );
    }
}
