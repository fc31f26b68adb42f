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

//! Provides the [`Ttl`] structure for DNS RR TTLs.

use std::fmt;

////////////////////////////////////////////////////////////////////////
// TTLS                                                               //
////////////////////////////////////////////////////////////////////////

/// The time to live (TTL) of a DNS record.
///
/// There are contradictory definitions of the TTL field in [RFC 1035]
/// (see [erratum 2130]), so [RFC 2181 § 8] clarified that TTL values
/// are unsigned integers between 0 and 2³¹ - 1, inclusive, and that a
/// value received with the most significant bit set is to be treated
/// as zero.
///
/// A codec must reproduce what it was given, so this type stores the
/// raw 32-bit wire value unchanged. The RFC 2181 interpretation is
/// available through [`Ttl::effective`].
///
/// [Erratum 2130]: https://www.rfc-editor.org/errata/eid2130
/// [RFC 1035]: https://datatracker.ietf.org/doc/html/rfc1035
/// [RFC 2181 § 8]: https://datatracker.ietf.org/doc/html/rfc2181#section-8
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Ttl(u32);

impl Ttl {
    /// Returns the TTL as interpreted per RFC 2181 § 8: wire values
    /// with the most significant bit set count as zero.
    pub fn effective(self) -> u32 {
        if self.0 > i32::MAX as u32 {
            0
        } else {
            self.0
        }
    }
}

impl From<u32> for Ttl {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<Ttl> for u32 {
    fn from(ttl: Ttl) -> Self {
        ttl.0
    }
}

impl fmt::Debug for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_ttls_are_not_modified() {
        let i32_max = i32::MAX as u32;
        assert_eq!(Ttl::from(0).effective(), 0);
        assert_eq!(Ttl::from(23).effective(), 23);
        assert_eq!(Ttl::from(i32_max).effective(), i32_max);
    }

    #[test]
    fn large_ttls_are_kept_but_effectively_zero() {
        let ttl = Ttl::from(i32::MAX as u32 + 1);
        assert_eq!(u32::from(ttl), 0x8000_0000);
        assert_eq!(ttl.effective(), 0);
    }
}
