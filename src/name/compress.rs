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

//! Implementation of name compression for message serialization.

use std::collections::HashMap;

use log::trace;

use super::Name;
use crate::buffer::Buffer;

/// The largest offset a compression pointer can refer to.
const POINTER_MAX: usize = 0x3fff;

/// The two high bits that mark a length octet as a pointer.
const POINTER_MASK: u16 = 0xc000;

/// How a [`NameTable`] may (when allowed by the DNS standard) compress
/// domain names.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CompressionMode {
    /// Compress a suffix only against an earlier occurrence with exactly
    /// the same octets. This preserves case, so a decoded message
    /// repacks into the same octets it was decoded from.
    #[default]
    Standard,

    /// Compress against earlier occurrences that differ only in ASCII
    /// case. This can produce smaller messages, but the case of the
    /// later occurrence is lost.
    CaseInsensitive,

    /// Do not compress domain names. However, note that
    /// [RFC 1123 § 6.1.2.4] requires name servers to use compression
    /// in responses, since it helps prevent truncation and retries over
    /// TCP.
    ///
    /// [RFC 1123 § 6.1.2.4]: https://datatracker.ietf.org/doc/html/rfc1123#section-6.1.2.4
    Disabled,
}

/// The compression state of a message being serialized: a map from
/// every name suffix written so far (in its uncompressed on-the-wire
/// form) to the message offset where it was first written.
///
/// The table must be used with a [`Buffer`] holding the message from
/// its first octet, since pointer offsets are taken from the buffer
/// length.
#[derive(Clone, Debug, Default)]
pub struct NameTable {
    mode: CompressionMode,
    suffixes: HashMap<Vec<u8>, u16>,
}

impl NameTable {
    /// Creates a new, empty `NameTable`.
    pub fn new(mode: CompressionMode) -> Self {
        Self {
            mode,
            suffixes: HashMap::new(),
        }
    }

    /// Returns the compression mode of the table.
    pub fn mode(&self) -> CompressionMode {
        self.mode
    }

    /// Returns the number of suffixes recorded.
    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    /// Returns whether no suffixes have been recorded.
    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    /// Appends `name` to `buf`. When `compress` is set (and the mode
    /// allows it), the longest previously recorded suffix of `name` is
    /// replaced with a pointer, and the suffixes written out in full are
    /// recorded for later names. Otherwise the name is written
    /// uncompressed and nothing is recorded.
    pub fn write_name(&mut self, buf: &mut Buffer, name: &Name, compress: bool) {
        if !compress || self.mode == CompressionMode::Disabled {
            buf.append(&name.wire_repr());
            return;
        }

        for (i, label) in name.labels().iter().enumerate() {
            let key = self.key_for(name, i);
            if let Some(&offset) = self.suffixes.get(&key) {
                trace!("Compressing {name} with a pointer to offset {offset}");
                buf.put_u16(POINTER_MASK | offset);
                return;
            }
            let offset = buf.len();
            if offset <= POINTER_MAX {
                self.suffixes.insert(key, offset as u16);
            }
            buf.put_u8(label.len() as u8);
            buf.append(label.octets());
        }
        buf.put_u8(0);
    }

    /// Returns the table key for the suffix of `name` starting at label
    /// `n`.
    fn key_for(&self, name: &Name, n: usize) -> Vec<u8> {
        let mut key = name.wire_repr_from(n);
        if self.mode == CompressionMode::CaseInsensitive {
            key.make_ascii_lowercase();
        }
        key
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
