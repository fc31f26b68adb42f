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

//! Typed field descriptors.
//!
//! A [`FieldSpec`] names an attribute of some wire entity and the
//! numeric constraint its values must satisfy. Constructors and setters
//! throughout the crate run candidate values through a spec before
//! storing them, so that an entity never holds a value that cannot be
//! encoded. When a check fails, a [`ValidationError`] is returned and the
//! entity is left untouched.

use std::fmt;

////////////////////////////////////////////////////////////////////////
// FIELD VALUES                                                       //
////////////////////////////////////////////////////////////////////////

/// A value that can be checked against a [`FieldSpec`].
///
/// This is implemented for all primitive integer types, so that
/// negative and oversized candidates can be expressed (and rejected)
/// rather than silently truncated by an `as` cast at the call site.
pub trait FieldValue: Copy {
    fn to_i128(self) -> i128;
}

macro_rules! impl_field_value {
    ($($t:ty),*) => {
        $(
            impl FieldValue for $t {
                fn to_i128(self) -> i128 {
                    self as i128
                }
            }
        )*
    };
}

impl_field_value!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

////////////////////////////////////////////////////////////////////////
// FIELD SPECS                                                        //
////////////////////////////////////////////////////////////////////////

/// The constraint of a [`FieldSpec`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Constraint {
    /// A scalar in `min..=max`.
    Range { min: i128, max: i128 },

    /// A sequence of exactly `len` scalars, each in `min..=max`.
    Tuple { len: usize, min: i128, max: i128 },

    /// An unsigned scalar of the given bit width.
    Bits(u32),
}

impl Constraint {
    fn bounds(&self) -> (i128, i128) {
        match *self {
            Self::Range { min, max } | Self::Tuple { min, max, .. } => (min, max),
            Self::Bits(width) => (0, (1i128 << width) - 1),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (min, max) = self.bounds();
        match self {
            Self::Tuple { len, .. } => {
                write!(f, "tuple with {len} elements in range {min}-{max}")
            }
            _ => write!(f, "between {min}-{max}"),
        }
    }
}

/// A descriptor for a constrained attribute.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldSpec {
    pub attribute: &'static str,
    pub constraint: Constraint,
}

impl FieldSpec {
    pub const fn range(attribute: &'static str, min: i128, max: i128) -> Self {
        Self {
            attribute,
            constraint: Constraint::Range { min, max },
        }
    }

    pub const fn bits(attribute: &'static str, width: u32) -> Self {
        Self {
            attribute,
            constraint: Constraint::Bits(width),
        }
    }

    pub const fn u8(attribute: &'static str) -> Self {
        Self::bits(attribute, 8)
    }

    pub const fn u16(attribute: &'static str) -> Self {
        Self::bits(attribute, 16)
    }

    pub const fn u32(attribute: &'static str) -> Self {
        Self::bits(attribute, 32)
    }

    pub const fn tuple(attribute: &'static str, len: usize, min: i128, max: i128) -> Self {
        Self {
            attribute,
            constraint: Constraint::Tuple { len, min, max },
        }
    }

    /// An IPv4 address: four octets.
    pub const fn ipv4(attribute: &'static str) -> Self {
        Self::tuple(attribute, 4, 0, 255)
    }

    /// An IPv6 address: sixteen octets.
    pub const fn ipv6(attribute: &'static str) -> Self {
        Self::tuple(attribute, 16, 0, 255)
    }

    /// Checks a scalar candidate, returning it as a `u64` if it is
    /// acceptable.
    pub fn check<V: FieldValue>(&self, value: V) -> Result<u64, ValidationError> {
        let wide = value.to_i128();
        let (min, max) = self.constraint.bounds();
        if matches!(self.constraint, Constraint::Tuple { .. })
            || wide < min
            || wide > max
            || wide < 0
        {
            return Err(self.reject(wide.to_string()));
        }
        Ok(wide as u64)
    }

    /// Checks a tuple candidate of octet-sized elements, returning the
    /// elements as a fixed-size array if the candidate is acceptable.
    pub fn check_tuple<V: FieldValue, const N: usize>(
        &self,
        values: &[V],
    ) -> Result<[u8; N], ValidationError> {
        let (min, max) = self.constraint.bounds();
        let len_ok = match self.constraint {
            Constraint::Tuple { len, .. } => len == values.len() && len == N,
            _ => false,
        };
        let mut out = [0; N];
        if len_ok {
            for (slot, value) in out.iter_mut().zip(values) {
                let wide = value.to_i128();
                if wide < min || wide > max || !(0..=255).contains(&wide) {
                    return Err(self.reject(render_tuple(values)));
                }
                *slot = wide as u8;
            }
            Ok(out)
        } else {
            Err(self.reject(render_tuple(values)))
        }
    }

    fn reject(&self, value: String) -> ValidationError {
        ValidationError {
            attribute: self.attribute,
            constraint: self.constraint,
            value,
        }
    }
}

fn render_tuple<V: FieldValue>(values: &[V]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_i128().to_string()).collect();
    format!("({})", items.join(", "))
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that a candidate value violates a [`FieldSpec`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidationError {
    pub attribute: &'static str,
    pub constraint: Constraint,
    pub value: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "attribute '{}' must be {} [{}]",
            self.attribute, self.constraint, self.value
        )
    }
}

impl std::error::Error for ValidationError {}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
