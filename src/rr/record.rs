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

//! Implementation of the [`Record`] and [`Rr`] types.

use std::fmt;

use super::rdata::{OptRecord, Rdata};
use super::{Ttl, Type};
use crate::class::Class;
use crate::name::Name;
use crate::validate::{FieldSpec, FieldValue, ValidationError};

const CLASS_SPEC: FieldSpec = FieldSpec::u16("class");
const TTL_SPEC: FieldSpec = FieldSpec::u32("ttl");

////////////////////////////////////////////////////////////////////////
// STANDARD RESOURCE RECORDS                                          //
////////////////////////////////////////////////////////////////////////

/// A resource record in the standard format of [RFC 1035 § 4.1.3].
///
/// The RR type is stored separately from the RDATA so that records
/// whose RDATA is kept opaque (see [`Rdata::Unknown`]) can still be
/// written back under their original type.
///
/// [RFC 1035 § 4.1.3]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.3
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rr {
    pub owner: Name,
    pub rr_type: Type,
    pub class: Class,
    pub ttl: Ttl,
    pub rdata: Rdata,
}

impl Rr {
    /// Creates a new record, taking the RR type from the RDATA.
    pub fn new(owner: Name, class: Class, ttl: Ttl, rdata: Rdata) -> Self {
        Self {
            owner,
            rr_type: rdata.rr_type(),
            class,
            ttl,
            rdata,
        }
    }

    /// Creates a new record from unchecked class and TTL values, which
    /// must fit in 16 and 32 unsigned bits respectively.
    pub fn try_new<C: FieldValue, T: FieldValue>(
        owner: Name,
        class: C,
        ttl: T,
        rdata: Rdata,
    ) -> Result<Self, ValidationError> {
        let class = CLASS_SPEC.check(class)? as u16;
        let ttl = TTL_SPEC.check(ttl)? as u32;
        Ok(Self::new(owner, class.into(), ttl.into(), rdata))
    }
}

/// Records are displayed in zone file format.
impl fmt::Display for Rr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.owner, self.ttl, self.class, self.rr_type, self.rdata
        )
    }
}

////////////////////////////////////////////////////////////////////////
// RECORDS                                                            //
////////////////////////////////////////////////////////////////////////

/// A record as it appears in one of the answer, authority, or additional
/// sections of a message.
///
/// The EDNS(0) pseudo-record repurposes the class and TTL fields, so it
/// is kept apart from standard records. Only an OPT record owned by the
/// root is treated as the EDNS pseudo-record; any other OPT record is
/// read as a standard record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Record {
    Standard(Rr),
    Opt(OptRecord),
}

impl Record {
    /// Returns the RR type of the record.
    pub fn rr_type(&self) -> Type {
        match self {
            Self::Standard(rr) => rr.rr_type,
            Self::Opt(_) => Type::OPT,
        }
    }

    /// Returns the owner of the record. The EDNS pseudo-record is always
    /// owned by the root.
    pub fn owner(&self) -> Name {
        match self {
            Self::Standard(rr) => rr.owner.clone(),
            Self::Opt(_) => Name::root(),
        }
    }

    pub fn as_opt(&self) -> Option<&OptRecord> {
        match self {
            Self::Opt(opt) => Some(opt),
            Self::Standard(_) => None,
        }
    }

    pub fn as_opt_mut(&mut self) -> Option<&mut OptRecord> {
        match self {
            Self::Opt(opt) => Some(opt),
            Self::Standard(_) => None,
        }
    }
}

impl From<Rr> for Record {
    fn from(rr: Rr) -> Self {
        Self::Standard(rr)
    }
}

impl From<OptRecord> for Record {
    fn from(opt: OptRecord) -> Self {
        Self::Opt(opt)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Standard(rr) => rr.fmt(f),
            Self::Opt(opt) => opt.fmt(f),
        }
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rr::rdata::Mx;

    #[test]
    fn try_new_validates() {
        let owner: Name = "example.com.".parse().unwrap();
        let rdata = Rdata::Mx(Mx::try_new(10, "mail.example.com.".parse().unwrap()).unwrap());
        let rr = Rr::try_new(owner.clone(), 1, 3600, rdata.clone()).unwrap();
        assert_eq!(rr.rr_type, Type::MX);
        assert_eq!(rr.class, Class::IN);
        assert_eq!(u32::from(rr.ttl), 3600);

        let err = Rr::try_new(owner.clone(), 65536, 3600, rdata.clone()).unwrap_err();
        assert_eq!(err.attribute, "class");
        let err = Rr::try_new(owner, 1, -1, rdata).unwrap_err();
        assert_eq!(err.attribute, "ttl");
    }

    #[test]
    fn rr_displays_in_zone_file_format() {
        let rr = Rr::try_new(
            "example.com.".parse().unwrap(),
            1,
            300,
            Rdata::Ns("ns.example.com.".parse().unwrap()),
        )
        .unwrap();
        assert_eq!(rr.to_string(), "example.com.\t300\tIN\tNS\tns.example.com.");
    }

    #[test]
    fn opt_records_are_owned_by_root() {
        let record = Record::from(OptRecord::new(1232));
        assert_eq!(record.rr_type(), Type::OPT);
        assert!(record.owner().is_root());
        assert_eq!(record.as_opt().map(|opt| opt.udp_payload_size), Some(1232));
    }
}
