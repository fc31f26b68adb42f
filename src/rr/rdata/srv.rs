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

//! Handling of the [RFC 2782] RR type, SRV.
//!
//! [RFC 2782]: https://datatracker.ietf.org/doc/html/rfc2782

use std::fmt;

use super::ReadRdataError;
use crate::message::{Reader, Writer};
use crate::name::Name;
use crate::validate::{FieldSpec, FieldValue, ValidationError};

////////////////////////////////////////////////////////////////////////
// RFC 2782 - SRV RR                                                  //
////////////////////////////////////////////////////////////////////////

/// The RDATA of an SRV record.
///
/// [RFC 2782] forbids compression of the target, though (per
/// [RFC 3597 § 4]) a compressed target is still accepted when reading.
///
/// [RFC 2782]: https://datatracker.ietf.org/doc/html/rfc2782
/// [RFC 3597 § 4]: https://datatracker.ietf.org/doc/html/rfc3597#section-4
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Srv {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: Name,
}

impl Srv {
    pub fn try_new<V: FieldValue>(
        priority: V,
        weight: V,
        port: V,
        target: Name,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            priority: FieldSpec::u16("priority").check(priority)? as u16,
            weight: FieldSpec::u16("weight").check(weight)? as u16,
            port: FieldSpec::u16("port").check(port)? as u16,
            target,
        })
    }

    pub(super) fn read(reader: &mut Reader, _rdlength: u16) -> Result<Self, ReadRdataError> {
        Ok(Self {
            priority: reader.read_u16()?,
            weight: reader.read_u16()?,
            port: reader.read_u16()?,
            target: reader.read_name()?,
        })
    }

    pub(super) fn write(&self, writer: &mut Writer) {
        writer.write_u16(self.priority);
        writer.write_u16(self.weight);
        writer.write_u16(self.port);
        writer.write_name(&self.target, false);
    }
}

impl fmt::Display for Srv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.priority, self.weight, self.port, self.target
        )
    }
}
