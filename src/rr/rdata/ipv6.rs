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

//! Handling of the [RFC 3596] RR type, AAAA.
//!
//! [RFC 3596]: https://datatracker.ietf.org/doc/html/rfc3596

use std::fmt;
use std::net::Ipv6Addr;

use super::ReadRdataError;
use crate::message::{Reader, Writer};
use crate::validate::{FieldSpec, FieldValue, ValidationError};

const IPV6_SPEC: FieldSpec = FieldSpec::ipv6("address");

////////////////////////////////////////////////////////////////////////
// RFC 3596 §§ 2.1 and 2.2 - IPV6 AAAA RR                             //
////////////////////////////////////////////////////////////////////////

/// The RDATA of an AAAA record: an IPv6 address.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Aaaa(pub Ipv6Addr);

impl Aaaa {
    /// Builds an AAAA record from the sixteen octets of the address.
    pub fn try_from_parts<V: FieldValue>(parts: &[V]) -> Result<Self, ValidationError> {
        IPV6_SPEC
            .check_tuple::<V, 16>(parts)
            .map(|octets| Self(octets.into()))
    }

    pub(super) fn read(reader: &mut Reader, _rdlength: u16) -> Result<Self, ReadRdataError> {
        let mut octets = [0; 16];
        octets.copy_from_slice(&reader.read_octets(16)?);
        Ok(Self(octets.into()))
    }

    pub(super) fn write(&self, writer: &mut Writer) {
        writer.write_octets(&self.0.octets());
    }
}

impl fmt::Display for Aaaa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{read_all, round_trip};
    use super::super::Rdata;
    use super::*;
    use crate::rr::Type;

    #[test]
    fn aaaa_works() {
        let rdata = read_all(
            Type::AAAA,
            b"\x20\x01\x0d\xb8\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x01",
        )
        .unwrap();
        assert_eq!(rdata.to_string(), "2001:db8::1");
        assert_eq!(round_trip(&rdata), rdata);
    }

    #[test]
    fn aaaa_parts_are_validated() {
        let mut parts = [0u16; 16];
        parts[15] = 1;
        assert_eq!(
            Aaaa::try_from_parts(&parts),
            Ok(Aaaa(Ipv6Addr::LOCALHOST))
        );
        parts[0] = 256;
        assert!(Aaaa::try_from_parts(&parts).is_err());
        assert!(Aaaa::try_from_parts(&parts[..4]).is_err());
    }

    #[test]
    fn short_aaaa_is_rejected() {
        assert!(read_all(Type::AAAA, b"\x20\x01\x0d\xb8").is_err());
    }
}
