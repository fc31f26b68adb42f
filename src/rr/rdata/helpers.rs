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

//! Helpers shared by the RR type-specific codecs.

use std::fmt::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::ReadRdataError;
use crate::message::{Reader, Writer};
use crate::name::Name;

////////////////////////////////////////////////////////////////////////
// RDATA BOUNDS                                                       //
////////////////////////////////////////////////////////////////////////

/// The extent of the RDATA being decoded, for fields that run to the
/// end of the RDATA (keys, digests, signatures, and so on).
pub struct Bounds {
    start: usize,
    declared: u16,
}

impl Bounds {
    /// Marks the RDATA as starting at the reader's cursor and occupying
    /// `rdlength` octets.
    pub fn new(reader: &Reader, rdlength: u16) -> Self {
        Self {
            start: reader.offset(),
            declared: rdlength,
        }
    }

    /// Returns the number of RDATA octets after the reader's cursor.
    pub fn remaining(&self, reader: &Reader) -> Result<usize, ReadRdataError> {
        let end = self.start + self.declared as usize;
        end.checked_sub(reader.offset())
            .ok_or(ReadRdataError::LengthMismatch {
                declared: self.declared,
                consumed: reader.offset() - self.start,
            })
    }

    /// Reads everything up to the end of the RDATA.
    pub fn read_rest(&self, reader: &mut Reader) -> Result<Vec<u8>, ReadRdataError> {
        let len = self.remaining(reader)?;
        Ok(reader.read_octets(len)?)
    }
}

////////////////////////////////////////////////////////////////////////
// NAME RDATA                                                         //
////////////////////////////////////////////////////////////////////////

/// Reads RDATA consisting of a single (possibly compressed) domain name.
pub fn read_name_rdata(reader: &mut Reader, _rdlength: u16) -> Result<Name, ReadRdataError> {
    Ok(reader.read_name()?)
}

/// Writes a domain name that [RFC 3597 § 4] allows to be compressed.
///
/// [RFC 3597 § 4]: https://datatracker.ietf.org/doc/html/rfc3597#section-4
pub fn write_compressed_name(name: &Name, writer: &mut Writer) {
    writer.write_name(name, true);
}

/// Writes a domain name that must not be compressed.
pub fn write_uncompressed_name(name: &Name, writer: &mut Writer) {
    writer.write_name(name, false);
}

////////////////////////////////////////////////////////////////////////
// PRESENTATION FORMAT                                                //
////////////////////////////////////////////////////////////////////////

/// Writes `octets` as a quoted string, escaping quotes, backslashes,
/// and anything that is not printable ASCII.
pub fn fmt_quoted(octets: &[u8], f: &mut fmt::Formatter) -> fmt::Result {
    f.write_char('"')?;
    for &octet in octets {
        match octet {
            b'"' | b'\\' => write!(f, "\\{}", octet as char)?,
            0x20..=0x7e => f.write_char(octet as char)?,
            _ => write!(f, "\\{octet:03}")?,
        }
    }
    f.write_char('"')
}

/// Writes `octets` in uppercase hexadecimal, as zone files present
/// digests and fingerprints.
pub fn fmt_hex(octets: &[u8], f: &mut fmt::Formatter) -> fmt::Result {
    for octet in octets {
        write!(f, "{octet:02X}")?;
    }
    Ok(())
}

/// Writes `octets` in base64, as zone files present keys and
/// signatures.
pub fn fmt_base64(octets: &[u8], f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(&STANDARD.encode(octets))
}

/// Writes a DNSSEC signature timestamp (seconds since the epoch) in the
/// `YYYYMMDDHHmmSS` form of [RFC 4034 § 3.2].
///
/// [RFC 4034 § 3.2]: https://datatracker.ietf.org/doc/html/rfc4034#section-3.2
pub fn fmt_timestamp(timestamp: u32, f: &mut fmt::Formatter) -> fmt::Result {
    let days = (timestamp / 86400) as i64;
    let seconds = timestamp % 86400;
    let (year, month, day) = civil_from_days(days);
    write!(
        f,
        "{year:04}{month:02}{day:02}{:02}{:02}{:02}",
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60
    )
}

/// Converts a count of days since 1970-01-01 to a proleptic Gregorian
/// (year, month, day).
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719468;
    let era = z.div_euclid(146097);
    let doe = z.rem_euclid(146097);
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    struct Shown<F: Fn(&mut fmt::Formatter) -> fmt::Result>(F);

    impl<F: Fn(&mut fmt::Formatter) -> fmt::Result> fmt::Display for Shown<F> {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            (self.0)(f)
        }
    }

    #[test]
    fn quoting_escapes_specials() {
        let shown = Shown(|f| fmt_quoted(b"say \"hi\"\\\x07", f));
        assert_eq!(shown.to_string(), "\"say \\\"hi\\\"\\\\\\007\"");
    }

    #[test]
    fn hex_and_base64_work() {
        assert_eq!(Shown(|f| fmt_hex(b"\x0a\xbc", f)).to_string(), "0ABC");
        assert_eq!(Shown(|f| fmt_base64(b"dns", f)).to_string(), "ZG5z");
    }

    #[test]
    fn timestamps_are_formatted_as_dates() {
        assert_eq!(Shown(|f| fmt_timestamp(0, f)).to_string(), "19700101000000");
        assert_eq!(
            Shown(|f| fmt_timestamp(1_700_000_000, f)).to_string(),
            "20231114221320"
        );
        assert_eq!(
            Shown(|f| fmt_timestamp(951_782_400, f)).to_string(),
            "20000229000000"
        );
    }

    #[test]
    fn bounds_track_rdata_end() {
        let mut reader = Reader::new(b"\x01\x02\x03\x04\x05");
        reader.read_u8().unwrap();
        let bounds = Bounds::new(&reader, 3);
        reader.read_u8().unwrap();
        assert_eq!(bounds.remaining(&reader), Ok(2));
        assert_eq!(bounds.read_rest(&mut reader), Ok(vec![3, 4]));
        assert_eq!(reader.read_u8(), Ok(5));
        assert_eq!(
            bounds.remaining(&reader),
            Err(ReadRdataError::LengthMismatch {
                declared: 3,
                consumed: 4
            })
        );
    }
}
