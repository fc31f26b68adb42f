// Copyright 2021 Matthew Ingwersen.
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

//! Implementation of data structures related to domain names.

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use arrayvec::ArrayVec;

mod compress;
mod error;
mod label;
mod wire;
pub use compress::{CompressionMode, NameTable};
pub use error::Error;
pub use label::Label;

/// The maximum number of labels in a domain name, not counting the
/// null label.
const MAX_N_LABELS: usize = 127;

/// The maximum length of the uncompressed on-the-wire representation of
/// a domain name.
const MAX_WIRE_LEN: usize = 255;

/// The maximum length of a label in a domain name (not including the
/// octet that provides the length).
const MAX_LABEL_LEN: usize = 63;

////////////////////////////////////////////////////////////////////////
// NAME STRUCTURE                                                     //
////////////////////////////////////////////////////////////////////////

/// A structure to represent a domain name.
///
/// A `Name` is an ordered sequence of non-null [`Label`]s, from the
/// leftmost (most specific) label to the rightmost. The terminating
/// null label of the on-the-wire form is implicit, so the DNS root `.`
/// is the empty sequence.
///
/// `Name`s can be constructed in several ways:
///
/// * through the [`FromStr`] implementation;
/// * from a sequence of labels through [`Name::from_labels`]; and
/// * from compressed on-the-wire names through
///   [`Name::try_from_compressed`].
///
/// Every constructor checks that the uncompressed on-the-wire form of
/// the name is at most 255 octets long, so every `Name` can be encoded.
///
/// Like [`Label`], comparison, ordering, and hashing of `Name`s are
/// ASCII-case-insensitive, while case is preserved internally.
#[derive(Clone, Default)]
pub struct Name {
    labels: Vec<Label>,
}

#[allow(clippy::len_without_is_empty)] // We have is_root().
impl Name {
    /// Returns a `Name` representing the DNS root, `.`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a `Name` from its labels, leftmost first. The null label
    /// may not appear; the root is given by an empty sequence.
    pub fn from_labels<I>(labels: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Label>,
    {
        let mut wire_len = 1;
        let mut collected = Vec::new();
        for label in labels {
            if label.is_null() {
                return Err(Error::NullNonTerminal);
            }
            wire_len += label.len() + 1;
            if wire_len > MAX_WIRE_LEN {
                return Err(Error::NameTooLong);
            }
            collected.push(label);
        }
        Ok(Self { labels: collected })
    }

    /// Returns whether the `Name` is the DNS root `.`.
    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the labels of this `Name`, leftmost first. The null
    /// label is not included.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Returns the number of non-null labels in this `Name`.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Tries to parse a compressed name present at index `start` of the
    /// provided buffer. Pointers are followed; indices given in
    /// pointers are treated as equivalent to indices in `octets` (so
    /// generally one will pass an entire DNS message in `octets`). Two
    /// things are returned on success:
    ///
    /// * the new `Name`; and
    /// * the number of contiguous octets read at `start`. Equivalently,
    ///   the number of octets to skip after `start` to read the next
    ///   field when parsing a DNS message. If a pointer label is
    ///   present at `start`, for instance, this value will be 2.
    pub fn try_from_compressed(octets: &[u8], start: usize) -> Result<(Self, usize), Error> {
        wire::parse_compressed_name(octets, start)
    }

    /// Returns the length of the uncompressed on-the-wire
    /// representation of the `Name`.
    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(|label| label.len() + 1).sum::<usize>() + 1
    }

    /// Returns the uncompressed on-the-wire representation of the
    /// `Name`.
    pub fn wire_repr(&self) -> Vec<u8> {
        self.wire_repr_from(0)
    }

    /// Returns the uncompressed on-the-wire representation of the
    /// `Name` starting with the `n`-th label. If `n == self.len()`,
    /// this is the root's representation; if `n > self.len()`, this
    /// panics.
    pub fn wire_repr_from(&self, n: usize) -> Vec<u8> {
        let mut octets = Vec::with_capacity(MAX_WIRE_LEN);
        for label in &self.labels[n..] {
            octets.push(label.len() as u8);
            octets.extend_from_slice(label.octets());
        }
        octets.push(0);
        octets
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            f.write_str(".")
        } else {
            for label in &self.labels {
                write!(f, "{label}.")?;
            }
            Ok(())
        }
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
    }
}

impl Eq for Name {}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The [`Ord`] implementation for `Name` employs DNSSEC's canonical
/// ordering of domain names. Per [RFC 4034 § 6.1], `Name`s are ordered
/// as strings of labels read from right to left.
///
/// [RFC 4034 § 6.1]: https://datatracker.ietf.org/doc/html/rfc4034#section-6.1
impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        self.labels.iter().rev().cmp(other.labels.iter().rev())
    }
}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for label in &self.labels {
            label.hash(state);
        }
        state.write_usize(self.labels.len());
    }
}

////////////////////////////////////////////////////////////////////////
// PARSING OF NAMES FROM RUST STRINGS                                 //
////////////////////////////////////////////////////////////////////////

/// Allows for conversion of a Rust [`str`] into a [`Name`]. The passed
/// string must be strictly ASCII. Escape sequences as defined by
/// [RFC 4343 § 2.1] are supported. Names are always treated as fully
/// qualified, so the trailing period is optional.
///
/// [RFC 4343 § 2.1]: https://datatracker.ietf.org/doc/html/rfc4343#section-2.1
impl FromStr for Name {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::StrEmpty);
        } else if s == "." {
            return Ok(Self::root());
        }

        let mut remaining_octets = s.as_bytes();
        let mut labels = Vec::new();
        let mut current = ArrayVec::<u8, MAX_LABEL_LEN>::new();

        // NOTE: to check that the string is ASCII, it suffices to check
        // that each octet is ASCII as we go. This is because all
        // multi-byte characters start with an octet that is not ASCII.
        while let Some(&octet) = remaining_octets.first() {
            if octet == b'\\' {
                let (value, consumed) = parse_escape(&remaining_octets[1..])?;
                current.try_push(value).or(Err(Error::LabelTooLong))?;
                remaining_octets = &remaining_octets[consumed + 1..];
            } else if octet == b'.' {
                if current.is_empty() {
                    return Err(Error::NullNonTerminal);
                }
                labels.push(Label::try_from(current.as_slice())?);
                current.clear();
                remaining_octets = &remaining_octets[1..];
            } else if !octet.is_ascii() {
                return Err(Error::StrNotAscii);
            } else {
                current.try_push(octet).or(Err(Error::LabelTooLong))?;
                remaining_octets = &remaining_octets[1..];
            }
        }
        if !current.is_empty() {
            labels.push(Label::try_from(current.as_slice())?);
        }
        Self::from_labels(labels)
    }
}

/// Parses an escape sequence. We expect `remaining_octets` to start
/// with the octet immediately *after* the backslash that introduces the
/// escape sequence.
fn parse_escape(remaining_octets: &[u8]) -> Result<(u8, usize), Error> {
    match remaining_octets {
        [] => Err(Error::InvalidEscape),
        [d1, d2, d3, ..] if d1.is_ascii_digit() && d2.is_ascii_digit() && d3.is_ascii_digit() => {
            let value = 100 * (d1 - b'0') as usize + 10 * (d2 - b'0') as usize + (d3 - b'0') as usize;
            u8::try_from(value)
                .map(|value| (value, 3))
                .or(Err(Error::InvalidEscape))
        }
        [d1, ..] if d1.is_ascii_digit() => Err(Error::InvalidEscape),
        [other, ..] => Ok((*other, 1)),
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
