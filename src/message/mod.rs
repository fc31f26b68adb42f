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

//! Implementation of reading and writing of DNS messages.

use std::fmt;

use log::{debug, trace};

use crate::buffer;
use crate::name::{self, Name};
use crate::rr::rdata::{OptRecord, ReadRdataError};
use crate::rr::Record;

pub(crate) mod constants;
mod header;
mod opcode;
mod question;
mod rcode;
pub mod reader;
pub mod writer;
pub use header::{Header, SectionCounts};
pub use opcode::{IntoOpcodeError, Opcode};
pub use question::{Qclass, Qtype, Question};
pub use rcode::{IntoRcodeError, Rcode};
pub use reader::Reader;
pub use writer::{CompressionMode, Writer};

////////////////////////////////////////////////////////////////////////
// SECTIONS                                                           //
////////////////////////////////////////////////////////////////////////

/// The sections of a DNS message.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Section {
    Question,
    Answer,
    Authority,
    Additional,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Question => "question",
            Self::Answer => "answer",
            Self::Authority => "authority",
            Self::Additional => "additional",
        })
    }
}

////////////////////////////////////////////////////////////////////////
// MESSAGE                                                            //
////////////////////////////////////////////////////////////////////////

/// A DNS message, decoded into its header and four sections.
///
/// The section counts of the on-the-wire header are not stored: they are
/// derived from the sections (see [`Message::counts`]), so they can never
/// disagree with the records actually present.
///
/// Messages are decoded with [`Message::parse`] and encoded with
/// [`Message::pack`]. A message that was parsed packs back into a
/// message that parses equal to it; with the default
/// [`CompressionMode::Standard`], a message produced by a compressing
/// encoder typically packs back into exactly the octets it came from.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<Record>,
    pub authorities: Vec<Record>,
    pub additionals: Vec<Record>,
}

impl Message {
    /// Creates a message with the given header and empty sections.
    pub fn new(header: Header) -> Self {
        Self {
            header,
            ..Default::default()
        }
    }

    /// Creates a recursive query for `qname` of type `qtype` in class
    /// IN, with a random ID.
    pub fn query(qname: Name, qtype: impl Into<Qtype>) -> Self {
        let mut header = Header::new(rand::random());
        header.rd = true;
        let mut message = Self::new(header);
        message.add_question(Question::new(qname, qtype));
        message
    }

    /// Decodes a message from `octets`.
    ///
    /// Exactly as many questions and records are decoded as the header
    /// announces. Octets left over after the last section are ignored.
    pub fn parse(octets: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(octets);
        let (header, counts) = reader.read_header().map_err(Error::from_read)?;
        let mut message = Self::new(header);

        for decoded in 0..counts.qdcount {
            let question = reader.read_question().map_err(|err| {
                Error::from_section(err, Section::Question, counts.qdcount, decoded)
            })?;
            message.questions.push(question);
        }
        message.answers = read_section(&mut reader, Section::Answer, counts.ancount)?;
        message.authorities = read_section(&mut reader, Section::Authority, counts.nscount)?;
        message.additionals = read_section(&mut reader, Section::Additional, counts.arcount)?;

        if !reader.at_eom() {
            debug!(
                "Ignoring {} trailing octets after message {:#06x}",
                reader.remaining(),
                message.header.id
            );
        }
        Ok(message)
    }

    /// Encodes the message with [`CompressionMode::Standard`].
    pub fn pack(&self) -> Result<Vec<u8>> {
        self.pack_with(CompressionMode::Standard)
    }

    /// Encodes the message with the given [`CompressionMode`]. The
    /// section counts are recomputed from the sections.
    pub fn pack_with(&self, mode: CompressionMode) -> Result<Vec<u8>> {
        let counts = self.counts()?;
        let mut writer = Writer::new(mode);
        writer.write_header(&self.header, counts)?;
        for question in &self.questions {
            writer.write_question(question)?;
        }
        for record in self
            .answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
        {
            writer.write_record(record)?;
        }
        trace!("Packed message {:#06x} into {} octets", self.header.id, writer.len());
        Ok(writer.finish())
    }

    /// Computes the section counts of the message. This fails if any
    /// section has more than 65,535 entries.
    pub fn counts(&self) -> Result<SectionCounts> {
        let count = |section, len: usize| {
            u16::try_from(len).or(Err(Error::CountOverflow { section, count: len }))
        };
        Ok(SectionCounts {
            qdcount: count(Section::Question, self.questions.len())?,
            ancount: count(Section::Answer, self.answers.len())?,
            nscount: count(Section::Authority, self.authorities.len())?,
            arcount: count(Section::Additional, self.additionals.len())?,
        })
    }

    /// Creates a reply skeleton for this message: the same header with
    /// QR, AA, and RA set, and the same questions.
    pub fn reply(&self) -> Self {
        let mut header = self.header;
        header.qr = true;
        header.aa = true;
        header.ra = true;
        Self {
            header,
            questions: self.questions.clone(),
            ..Default::default()
        }
    }

    /// Creates a truncated copy of this message: the same header with TC
    /// set, and the same questions, but no records.
    pub fn truncate(&self) -> Self {
        let mut header = self.header;
        header.tc = true;
        Self {
            header,
            questions: self.questions.clone(),
            ..Default::default()
        }
    }

    /// Returns the EDNS pseudo-record in the additional section, if there
    /// is one.
    pub fn edns(&self) -> Option<&OptRecord> {
        self.additionals.iter().find_map(Record::as_opt)
    }

    pub fn edns_mut(&mut self) -> Option<&mut OptRecord> {
        self.additionals.iter_mut().find_map(Record::as_opt_mut)
    }

    /// Returns the 12-bit extended RCODE of [RFC 6891 § 6.1.3]: the upper
    /// eight bits from the EDNS pseudo-record (zero without one) and the
    /// lower four from the header.
    ///
    /// [RFC 6891 § 6.1.3]: https://datatracker.ietf.org/doc/html/rfc6891#section-6.1.3
    pub fn extended_rcode(&self) -> u16 {
        let upper = self.edns().map_or(0, |opt| opt.extended_rcode as u16);
        upper << 4 | u8::from(self.header.rcode()) as u16
    }

    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
    }

    pub fn add_answer(&mut self, record: impl Into<Record>) {
        self.answers.push(record.into());
    }

    pub fn add_authority(&mut self, record: impl Into<Record>) {
        self.authorities.push(record.into());
    }

    pub fn add_additional(&mut self, record: impl Into<Record>) {
        self.additionals.push(record.into());
    }
}

/// Reads the `expected` records of `section`.
fn read_section(reader: &mut Reader, section: Section, expected: u16) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for decoded in 0..expected {
        let record = reader
            .read_record()
            .map_err(|err| Error::from_section(err, section, expected, decoded))?;
        records.push(record);
    }
    trace!("Read {expected} records in the {section} section");
    Ok(records)
}

/// Messages are displayed in the style of dig.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{} QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
            self.header,
            self.questions.len(),
            self.answers.len(),
            self.authorities.len(),
            self.additionals.len()
        )?;
        if let Some(opt) = self.edns() {
            write!(f, "\n;; OPT PSEUDOSECTION:\n{opt}\n")?;
        }
        if !self.questions.is_empty() {
            f.write_str("\n;; QUESTION SECTION:\n")?;
            for question in &self.questions {
                writeln!(f, "{question}")?;
            }
        }
        let sections = [
            ("ANSWER", &self.answers),
            ("AUTHORITY", &self.authorities),
            ("ADDITIONAL", &self.additionals),
        ];
        for (title, records) in sections {
            let mut standard = records.iter().filter(|r| r.as_opt().is_none()).peekable();
            if standard.peek().is_some() {
                write!(f, "\n;; {title} SECTION:\n")?;
                for record in standard {
                    writeln!(f, "{record}")?;
                }
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that a message could not be parsed or packed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The message is shorter than a header.
    HeaderTooShort,

    /// The message ended before the number of entries announced for a
    /// section had been decoded.
    TruncatedMessage {
        section: Section,
        expected: u16,
        decoded: u16,
    },

    /// An owner, QNAME, or embedded domain name was invalid. This
    /// includes compression loops.
    InvalidName(name::Error),

    /// A fixed-width field could not be decoded.
    InvalidField(buffer::Error),

    /// RDATA could not be decoded.
    InvalidRdata(ReadRdataError),

    /// A section has too many entries to be counted in the header.
    CountOverflow { section: Section, count: usize },

    /// A record could not be encoded.
    Write(writer::Error),
}

impl Error {
    /// Returns whether the error was caused by the message being cut
    /// short (as opposed to being malformed).
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::HeaderTooShort | Self::TruncatedMessage { .. })
    }

    fn from_section(err: reader::Error, section: Section, expected: u16, decoded: u16) -> Self {
        if err.is_truncation() {
            Self::TruncatedMessage {
                section,
                expected,
                decoded,
            }
        } else {
            Self::from_read(err)
        }
    }

    fn from_read(err: reader::Error) -> Self {
        match err {
            reader::Error::HeaderTooShort => Self::HeaderTooShort,
            reader::Error::Field(err) => Self::InvalidField(err),
            reader::Error::InvalidOwner(err) => Self::InvalidName(err),
            reader::Error::InvalidRdata(ReadRdataError::InvalidName(err)) => {
                Self::InvalidName(err)
            }
            reader::Error::InvalidRdata(err) => Self::InvalidRdata(err),
        }
    }
}

impl From<writer::Error> for Error {
    fn from(err: writer::Error) -> Self {
        Self::Write(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::HeaderTooShort => f.write_str("message is shorter than a header"),
            Self::TruncatedMessage {
                section,
                expected,
                decoded,
            } => write!(
                f,
                "message truncated in the {section} section after {decoded} of {expected} entries"
            ),
            Self::InvalidName(err) => write!(f, "invalid domain name: {err}"),
            Self::InvalidField(err) => write!(f, "invalid field: {err}"),
            Self::InvalidRdata(err) => err.fmt(f),
            Self::CountOverflow { section, count } => {
                write!(f, "too many entries in the {section} section ({count})")
            }
            Self::Write(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

/// The type returned by fallible [`Message`] operations.
pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::net::{Ipv4Addr, Ipv6Addr};

    use super::*;
    use crate::class::Class;
    use crate::rr::rdata::{Aaaa, Caa, EdnsOption, Mx, Soa, Txt, WriteRdataError, A};
    use crate::rr::{Rdata, Rr, Ttl, Type};

    /// This is the query for example.com. IN NS answered by
    /// [`EXAMPLE_COM_NS_MESSAGE`]. It carries an EDNS cookie option.
    pub const EXAMPLE_COM_NS_QUERY: &[u8] =
        b"\xe2\xd7\x01\x20\x00\x01\x00\x00\x00\x00\x00\x01\x07\x65\x78\x61\
          \x6d\x70\x6c\x65\x03\x63\x6f\x6d\x00\x00\x02\x00\x01\x00\x00\x29\
          \x10\x00\x00\x00\x00\x00\x00\x0c\x00\x0a\x00\x08\x3b\x9e\x1c\x52\
          \x7d\x4a\x10\x6e";

    /// This is a reply to a query for example.com. IN NS to a recursive
    /// server, made on January 7, 2022.
    pub const EXAMPLE_COM_NS_MESSAGE: &[u8] =
        b"\xe2\xd7\x81\x80\x00\x01\x00\x02\x00\x00\x00\x01\x07\x65\x78\x61\
          \x6d\x70\x6c\x65\x03\x63\x6f\x6d\x00\x00\x02\x00\x01\xc0\x0c\x00\
          \x02\x00\x01\x00\x01\x50\xa2\x00\x14\x01\x61\x0c\x69\x61\x6e\x61\
          \x2d\x73\x65\x72\x76\x65\x72\x73\x03\x6e\x65\x74\x00\xc0\x0c\x00\
          \x02\x00\x01\x00\x01\x50\xa2\x00\x04\x01\x62\xc0\x2b\x00\x00\x29\
          \x10\x00\x00\x00\x00\x00\x00\x00";

    fn name(text: &str) -> Name {
        text.parse().unwrap()
    }

    fn rr(owner: &str, ttl: u32, rdata: Rdata) -> Record {
        Record::Standard(Rr::new(name(owner), Class::IN, Ttl::from(ttl), rdata))
    }

    #[test]
    fn captured_reply_repacks_byte_for_byte() {
        let message = Message::parse(EXAMPLE_COM_NS_MESSAGE).unwrap();
        assert_eq!(message.questions.len(), 1);
        assert_eq!(message.answers.len(), 2);
        assert!(message.authorities.is_empty());
        assert_eq!(message.edns().map(|opt| opt.udp_payload_size), Some(4096));
        assert_eq!(message.pack().unwrap(), EXAMPLE_COM_NS_MESSAGE);
    }

    #[test]
    fn captured_query_and_reply_match() {
        let query = Message::parse(EXAMPLE_COM_NS_QUERY).unwrap();
        assert!(!query.header.qr && query.header.rd && query.header.ad);
        assert!(query.answers.is_empty());
        let opt = query.edns().unwrap();
        assert_eq!(opt.udp_payload_size, 4096);
        assert_eq!(opt.options.len(), 1);
        assert_eq!(opt.options[0].code, 10);
        assert_eq!(query.pack().unwrap(), EXAMPLE_COM_NS_QUERY);

        let reply = Message::parse(EXAMPLE_COM_NS_MESSAGE).unwrap();
        assert_eq!(reply.header.id, query.header.id);
        assert_eq!(reply.questions, query.questions);
        assert_eq!(query.reply().questions, reply.questions);
    }

    #[test]
    fn built_message_round_trips() {
        let mut message = Message::query(name("example.com."), Type::MX);
        message.header.qr = true;
        message.add_answer(rr(
            "example.com.",
            300,
            Rdata::Mx(Mx::try_new(10, name("mail.example.com.")).unwrap()),
        ));
        message.add_answer(rr(
            "example.com.",
            300,
            Rdata::Txt(Txt {
                strings: vec!["v=spf1 -all".try_into().unwrap()],
            }),
        ));
        message.add_answer(rr(
            "example.com.",
            300,
            Rdata::Caa(Caa::try_new(0, b"issue", b"ca.example.net").unwrap()),
        ));
        message.add_authority(rr(
            "example.com.",
            3600,
            Rdata::Soa(
                Soa::try_new(
                    name("ns.example.com."),
                    name("admin.example.com."),
                    1u32,
                    7200,
                    900,
                    1209600,
                    60,
                )
                .unwrap(),
            ),
        ));
        message.add_additional(rr(
            "mail.example.com.",
            300,
            Rdata::A(A(Ipv4Addr::new(192, 0, 2, 25))),
        ));
        message.add_additional(rr(
            "mail.example.com.",
            300,
            Rdata::Aaaa(Aaaa(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 25))),
        ));
        message.add_additional(rr(
            "mail.example.com.",
            300,
            Rdata::Unknown {
                rr_type: Type::from(65280),
                octets: vec![1, 2, 3],
            },
        ));
        let mut opt = OptRecord::new(1232);
        opt.dnssec_ok = true;
        opt.options.push(EdnsOption {
            code: 10,
            data: vec![0xab; 8],
        });
        message.add_additional(opt);

        for mode in [
            CompressionMode::Standard,
            CompressionMode::CaseInsensitive,
            CompressionMode::Disabled,
        ] {
            let octets = message.pack_with(mode).unwrap();
            assert_eq!(Message::parse(&octets).unwrap(), message);
        }
        assert!(
            message.pack().unwrap().len()
                < message.pack_with(CompressionMode::Disabled).unwrap().len()
        );
    }

    #[test]
    fn repacking_reaches_a_fixed_point() {
        // A response whose answer owner is written out in full.
        let octets = b"\x12\x34\x81\x80\x00\x01\x00\x01\x00\x00\x00\x00\
                       \x07example\x03com\x00\x00\x01\x00\x01\
                       \x07example\x03com\x00\x00\x01\x00\x01\x00\x00\x00\x3c\x00\x04\
                       \xc0\x00\x02\x01";
        let message = Message::parse(octets).unwrap();
        let repacked = message.pack().unwrap();
        assert!(repacked.len() < octets.len());
        assert_eq!(Message::parse(&repacked).unwrap(), message);
        assert_eq!(Message::parse(&repacked).unwrap().pack().unwrap(), repacked);
    }

    #[test]
    fn parse_reports_truncated_sections() {
        assert_eq!(
            Message::parse(&EXAMPLE_COM_NS_MESSAGE[..5]),
            Err(Error::HeaderTooShort)
        );
        assert_eq!(
            Message::parse(&EXAMPLE_COM_NS_MESSAGE[..20]),
            Err(Error::TruncatedMessage {
                section: Section::Question,
                expected: 1,
                decoded: 0
            })
        );
        assert_eq!(
            Message::parse(&EXAMPLE_COM_NS_MESSAGE[..40]),
            Err(Error::TruncatedMessage {
                section: Section::Answer,
                expected: 2,
                decoded: 0
            })
        );
        let err = Message::parse(&EXAMPLE_COM_NS_MESSAGE[..70]).unwrap_err();
        assert_eq!(
            err,
            Error::TruncatedMessage {
                section: Section::Answer,
                expected: 2,
                decoded: 1
            }
        );
        assert!(err.is_truncation());
    }

    #[test]
    fn parse_reports_overstated_counts() {
        // The header announces an authority record that isn't there.
        let mut octets = EXAMPLE_COM_NS_MESSAGE.to_vec();
        octets[9] = 1;
        assert_eq!(
            Message::parse(&octets),
            Err(Error::TruncatedMessage {
                section: Section::Additional,
                expected: 1,
                decoded: 0
            })
        );
    }

    #[test]
    fn parse_rejects_compression_loops() {
        let octets = b"\x00\x00\x00\x00\x00\x01\x00\x00\x00\x00\x00\x00\xc0\x0c\x00\x01\x00\x01";
        let err = Message::parse(octets).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidName(name::Error::CompressionLoop {
                pointer: 12,
                target: 12
            })
        );
        assert!(!err.is_truncation());
    }

    #[test]
    fn parse_rejects_compression_loops_in_rdata() {
        // An MX record whose exchange points forward, past itself.
        let octets = b"\x00\x00\x81\x80\x00\x00\x00\x01\x00\x00\x00\x00\
                       \x00\x00\x0f\x00\x01\x00\x00\x00\x3c\x00\x04\
                       \x00\x0a\xc0\x1d";
        assert_eq!(
            Message::parse(octets),
            Err(Error::InvalidName(name::Error::CompressionLoop {
                pointer: 25,
                target: 29
            }))
        );
    }

    #[test]
    fn assigned_codes_survive_a_round_trip() {
        let mut message = Message::query(name("example.com."), Type::A);
        message.header.set_opcode(Opcode::Unassigned(0)).unwrap();
        message.header.set_rcode(Rcode::Unassigned(3)).unwrap();
        let parsed = Message::parse(&message.pack().unwrap()).unwrap();
        assert_eq!(parsed, message);
        assert_eq!(parsed.header.rcode(), Rcode::NxDomain);
    }

    #[test]
    fn pack_rejects_records_that_would_not_read_back() {
        let mut message = Message::default();
        message.add_answer(rr(
            "example.com.",
            60,
            Rdata::Unknown {
                rr_type: Type::A,
                octets: vec![1, 2, 3],
            },
        ));
        assert_eq!(
            message.pack(),
            Err(Error::Write(writer::Error::InvalidRdata(
                WriteRdataError::OpaqueRegisteredType(Type::A)
            )))
        );

        let mut message = Message::default();
        message.add_additional(Rr::new(
            Name::root(),
            Class::from(4096),
            Ttl::from(0),
            Rdata::Opt(Vec::new()),
        ));
        assert_eq!(
            message.pack(),
            Err(Error::Write(writer::Error::StandardOptRecord))
        );
    }

    #[test]
    fn parse_ignores_trailing_octets() {
        let mut octets = EXAMPLE_COM_NS_MESSAGE.to_vec();
        octets.extend_from_slice(b"junk");
        assert_eq!(
            Message::parse(&octets),
            Message::parse(EXAMPLE_COM_NS_MESSAGE)
        );
    }

    #[test]
    fn reply_and_truncate_work() {
        let query = Message::query(name("example.com."), Type::A);
        assert!(query.header.rd);
        assert_eq!(query.questions[0].qclass, Qclass::from(Class::IN));

        let reply = query.reply();
        assert_eq!(reply.header.id, query.header.id);
        assert!(reply.header.qr && reply.header.aa && reply.header.ra && reply.header.rd);
        assert_eq!(reply.questions, query.questions);

        let mut full = reply.clone();
        full.add_answer(rr("example.com.", 60, Rdata::A(A(Ipv4Addr::LOCALHOST))));
        let truncated = full.truncate();
        assert!(truncated.header.tc);
        assert!(truncated.answers.is_empty());
        assert_eq!(truncated.questions, query.questions);
        assert_eq!(
            truncated.pack().unwrap().len(),
            12 + 13 + 4,
        );
    }

    #[test]
    fn extended_rcode_combines_header_and_opt() {
        let mut message = Message::default();
        message.header.set_rcode(Rcode::Unassigned(0xe)).unwrap();
        assert_eq!(message.extended_rcode(), 0xe);
        message.add_additional(OptRecord::new(512));
        message.edns_mut().unwrap().extended_rcode = 1;
        // BADVERS/BADSIG is 16.
        message.header.set_rcode(Rcode::NoError).unwrap();
        assert_eq!(message.extended_rcode(), 16);
    }

    #[test]
    fn counts_are_derived() {
        let mut message = Message::query(name("example.com."), Type::A);
        message.add_answer(rr("example.com.", 60, Rdata::A(A(Ipv4Addr::LOCALHOST))));
        message.add_additional(OptRecord::default());
        assert_eq!(
            message.counts(),
            Ok(SectionCounts {
                qdcount: 1,
                ancount: 1,
                nscount: 0,
                arcount: 1
            })
        );
        let octets = message.pack().unwrap();
        assert_eq!(&octets[4..12], b"\x00\x01\x00\x01\x00\x00\x00\x01");
    }

    #[test]
    fn message_displays_like_dig() {
        let message = Message::parse(EXAMPLE_COM_NS_MESSAGE).unwrap();
        let text = message.to_string();
        assert!(text.starts_with(
            ";; ->>HEADER<<- opcode: QUERY, status: NOERROR, id: 58071\n\
             ;; flags: qr rd ra; QUERY: 1, ANSWER: 2, AUTHORITY: 0, ADDITIONAL: 1\n"
        ));
        assert!(text.contains(";; OPT PSEUDOSECTION:\n; EDNS: version: 0, flags:; udp: 4096\n"));
        assert!(text.contains(";; ANSWER SECTION:\nexample.com.\t86178\tIN\tNS\ta.iana-servers.net.\n"));
        assert!(!text.contains("ADDITIONAL SECTION"));
    }
}
