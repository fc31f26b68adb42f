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

//! Implementation of the [`Buffer`] type, a growable octet buffer with
//! a cursor.

use std::fmt;

use crate::util::to_hex;

////////////////////////////////////////////////////////////////////////
// LAYOUTS                                                            //
////////////////////////////////////////////////////////////////////////

/// A fixed-width, unsigned, network-byte-order field of a [`Layout`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Field {
    U8,
    U16,
    U32,
    U64,
}

impl Field {
    /// Returns the number of octets the field occupies on the wire.
    pub const fn size(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
        }
    }

    /// Returns the largest value the field can hold.
    pub const fn max(self) -> u64 {
        match self {
            Self::U8 => u8::MAX as u64,
            Self::U16 => u16::MAX as u64,
            Self::U32 => u32::MAX as u64,
            Self::U64 => u64::MAX,
        }
    }
}

/// An ordered list of [`Field`]s describing a fixed-width binary
/// record, for use with [`Buffer::pack`], [`Buffer::unpack`], and
/// [`Buffer::update`].
///
/// Layouts are meant to be declared as constants:
///
/// ```
/// use dnswire::buffer::{Field, Layout};
///
/// const TYPE_CLASS_TTL: Layout = Layout::new(&[Field::U16, Field::U16, Field::U32]);
/// assert_eq!(TYPE_CLASS_TTL.size(), 8);
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Layout {
    fields: &'static [Field],
}

impl Layout {
    pub const U8: Layout = Layout::new(&[Field::U8]);
    pub const U16: Layout = Layout::new(&[Field::U16]);
    pub const U32: Layout = Layout::new(&[Field::U32]);

    /// Creates a new `Layout` from its fields.
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }

    /// Returns the fields of the layout.
    pub const fn fields(&self) -> &'static [Field] {
        self.fields
    }

    /// Returns the total encoded size of the layout in octets.
    pub const fn size(&self) -> usize {
        let mut size = 0;
        let mut i = 0;
        while i < self.fields.len() {
            size += self.fields[i].size();
            i += 1;
        }
        size
    }

    /// Encodes `values` according to the layout, checking the arity
    /// and that each value fits its field.
    fn encode(&self, values: &[u64]) -> Result<Vec<u8>> {
        if values.len() != self.fields.len() {
            return Err(Error::LayoutMismatch {
                layout: *self,
                provided: values.len(),
            });
        }
        let mut octets = Vec::with_capacity(self.size());
        for (&field, &value) in self.fields.iter().zip(values) {
            if value > field.max() {
                return Err(Error::ValueTooWide { field, value });
            }
            let be = value.to_be_bytes();
            octets.extend_from_slice(&be[8 - field.size()..]);
        }
        Ok(octets)
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("!")?;
        for field in self.fields {
            f.write_str(match field {
                Field::U8 => "B",
                Field::U16 => "H",
                Field::U32 => "I",
                Field::U64 => "Q",
            })?;
        }
        Ok(())
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

////////////////////////////////////////////////////////////////////////
// BUFFER                                                             //
////////////////////////////////////////////////////////////////////////

/// A growable octet buffer with a single cursor.
///
/// Writes always append to the end of the buffer and move the cursor
/// to the new end; the only exception is [`Buffer::update`], which
/// patches already-written octets in place (e.g. to fill in an RDLENGTH
/// field once the RDATA has been written). Reads consume octets at the
/// cursor and advance it. A read that cannot be satisfied fails without
/// moving the cursor.
///
/// A `Buffer` is owned by the single parse or pack operation that uses
/// it, and nested writers (record, then name, then label) borrow it
/// mutably in turn; no locking is needed.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct Buffer {
    octets: Vec<u8>,
    offset: usize,
}

impl Buffer {
    /// Creates a new, empty `Buffer`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty `Buffer` with space reserved for
    /// `capacity` octets.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            octets: Vec::with_capacity(capacity),
            offset: 0,
        }
    }

    /// Returns the current cursor position.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Moves the cursor to `offset`, which may not be past the end of
    /// the buffer.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.octets.len() {
            Err(Error::OutOfBounds {
                position: offset,
                len: 0,
                buffer_len: self.octets.len(),
            })
        } else {
            self.offset = offset;
            Ok(())
        }
    }

    /// Returns the number of octets after the cursor.
    pub fn remaining(&self) -> usize {
        self.octets.len() - self.offset
    }

    /// Returns the length of the buffer.
    pub fn len(&self) -> usize {
        self.octets.len()
    }

    /// Returns whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.octets.is_empty()
    }

    /// Returns the whole buffer, regardless of the cursor.
    pub fn as_slice(&self) -> &[u8] {
        &self.octets
    }

    /// Consumes the `Buffer`, returning the underlying octets.
    pub fn into_vec(self) -> Vec<u8> {
        self.octets
    }

    /// Returns the next `len` octets and advances the cursor past them.
    pub fn get(&mut self, len: usize) -> Result<&[u8]> {
        if len > self.remaining() {
            return Err(Error::Truncated {
                offset: self.offset,
                remaining: self.remaining(),
                requested: len,
            });
        }
        let start = self.offset;
        self.offset += len;
        Ok(&self.octets[start..self.offset])
    }

    /// Returns the octet at the cursor without advancing it.
    pub fn peek_u8(&self) -> Result<u8> {
        self.octets.get(self.offset).copied().ok_or(Error::Truncated {
            offset: self.offset,
            remaining: 0,
            requested: 1,
        })
    }

    /// Appends `octets` to the buffer, moving the cursor to the end.
    pub fn append(&mut self, octets: &[u8]) {
        self.octets.extend_from_slice(octets);
        self.offset = self.octets.len();
    }

    /// Appends `values` encoded according to `layout`. Nothing is
    /// written if the values do not match the layout.
    pub fn pack(&mut self, layout: &Layout, values: &[u64]) -> Result<()> {
        let encoded = layout.encode(values)?;
        self.append(&encoded);
        Ok(())
    }

    /// Overwrites the already-written octets at `position` with
    /// `values` encoded according to `layout`. The length of the buffer
    /// and the cursor are unchanged.
    pub fn update(&mut self, position: usize, layout: &Layout, values: &[u64]) -> Result<()> {
        let encoded = layout.encode(values)?;
        let end = position.checked_add(encoded.len());
        match end {
            Some(end) if end <= self.octets.len() => {
                self.octets[position..end].copy_from_slice(&encoded);
                Ok(())
            }
            _ => Err(Error::OutOfBounds {
                position,
                len: encoded.len(),
                buffer_len: self.octets.len(),
            }),
        }
    }

    /// Reads fields at the cursor according to `layout`.
    pub fn unpack(&mut self, layout: &Layout) -> Result<Vec<u64>> {
        let start = self.offset;
        let octets = self.get(layout.size())?;
        let mut values = Vec::with_capacity(layout.fields().len());
        let mut index = 0;
        for &field in layout.fields() {
            let raw = &octets[index..index + field.size()];
            let value = match field {
                Field::U8 => raw.first().map(|&b| b as u64),
                Field::U16 => raw.try_into().ok().map(|a| u16::from_be_bytes(a) as u64),
                Field::U32 => raw.try_into().ok().map(|a| u32::from_be_bytes(a) as u64),
                Field::U64 => raw.try_into().ok().map(u64::from_be_bytes),
            };
            match value {
                Some(value) => values.push(value),
                None => {
                    let octets = octets.to_vec();
                    self.offset = start;
                    return Err(Error::Malformed {
                        layout: *layout,
                        octets,
                    });
                }
            }
            index += field.size();
        }
        Ok(values)
    }

    /// Reads an unsigned 8-bit integer at the cursor.
    pub fn get_u8(&mut self) -> Result<u8> {
        let octets = self.get(1)?;
        Ok(octets[0])
    }

    /// Reads a network-byte-order `u16` at the cursor.
    pub fn get_u16(&mut self) -> Result<u16> {
        let octets = self.get(2)?;
        Ok(u16::from_be_bytes([octets[0], octets[1]]))
    }

    /// Reads a network-byte-order `u32` at the cursor.
    pub fn get_u32(&mut self) -> Result<u32> {
        let octets = self.get(4)?;
        Ok(u32::from_be_bytes([octets[0], octets[1], octets[2], octets[3]]))
    }

    /// Appends an unsigned 8-bit integer.
    pub fn put_u8(&mut self, value: u8) {
        self.append(&[value]);
    }

    /// Appends a `u16` in network byte order.
    pub fn put_u16(&mut self, value: u16) {
        self.append(&value.to_be_bytes());
    }

    /// Appends a `u32` in network byte order.
    pub fn put_u32(&mut self, value: u32) {
        self.append(&value.to_be_bytes());
    }

    /// Returns the contents of the buffer as a lowercase hex string.
    pub fn hex(&self) -> String {
        to_hex(&self.octets)
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(octets: Vec<u8>) -> Self {
        Self { octets, offset: 0 }
    }
}

impl From<&[u8]> for Buffer {
    fn from(octets: &[u8]) -> Self {
        octets.to_vec().into()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.octets.len())
            .field("offset", &self.offset)
            .field("octets", &self.hex())
            .finish()
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that a [`Buffer`] operation failed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Fewer octets remain than a read requested.
    Truncated {
        offset: usize,
        remaining: usize,
        requested: usize,
    },

    /// The octets were present but could not be decoded according to
    /// the layout.
    Malformed { layout: Layout, octets: Vec<u8> },

    /// The number of values given does not match the layout.
    LayoutMismatch { layout: Layout, provided: usize },

    /// A value does not fit in its field.
    ValueTooWide { field: Field, value: u64 },

    /// A write or seek would go past the end of the buffer.
    OutOfBounds {
        position: usize,
        len: usize,
        buffer_len: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Truncated {
                offset,
                remaining,
                requested,
            } => write!(
                f,
                "not enough octets [offset={offset},remaining={remaining},requested={requested}]"
            ),
            Self::Malformed { layout, octets } => {
                write!(f, "error unpacking '{layout}' <{}>", to_hex(octets))
            }
            Self::LayoutMismatch { layout, provided } => write!(
                f,
                "layout '{layout}' has {} fields but {provided} values were given",
                layout.fields().len()
            ),
            Self::ValueTooWide { field, value } => {
                write!(f, "value {value} does not fit in a {field:?} field")
            }
            Self::OutOfBounds {
                position,
                len,
                buffer_len,
            } => write!(
                f,
                "access of {len} octets at {position} is outside a buffer of {buffer_len} octets"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// The type returned by fallible [`Buffer`] methods.
pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
