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

//! Handling of the [RFC 4255] RR type, SSHFP.
//!
//! [RFC 4255]: https://datatracker.ietf.org/doc/html/rfc4255

use std::fmt;

use super::helpers::{self, Bounds};
use super::ReadRdataError;
use crate::message::{Reader, Writer};

/// The RDATA of an SSHFP record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sshfp {
    pub algorithm: u8,
    pub fp_type: u8,
    pub fingerprint: Vec<u8>,
}

impl Sshfp {
    pub(super) fn read(reader: &mut Reader, rdlength: u16) -> Result<Self, ReadRdataError> {
        let bounds = Bounds::new(reader, rdlength);
        Ok(Self {
            algorithm: reader.read_u8()?,
            fp_type: reader.read_u8()?,
            fingerprint: bounds.read_rest(reader)?,
        })
    }

    pub(super) fn write(&self, writer: &mut Writer) {
        writer.write_u8(self.algorithm);
        writer.write_u8(self.fp_type);
        writer.write_octets(&self.fingerprint);
    }
}

impl fmt::Display for Sshfp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} ", self.algorithm, self.fp_type)?;
        helpers::fmt_hex(&self.fingerprint, f)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{read_all, round_trip};
    use super::super::Rdata;
    use super::*;
    use crate::rr::Type;

    #[test]
    fn sshfp_works() {
        let rdata = read_all(Type::SSHFP, b"\x04\x02\x12\x34\xab").unwrap();
        assert_eq!(rdata.to_string(), "4 2 1234AB");
        assert_eq!(round_trip(&rdata), rdata);
    }
}
