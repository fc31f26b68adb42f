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

//! Constants related to DNS messages.
//!
//! Flag positions are given as (offset, width) pairs within the 16-bit
//! flags word of the header, counting from the least significant bit,
//! for use with [`crate::bits`].

use crate::buffer::{Field, Layout};

pub const HEADER_SIZE: usize = 12;

/// ID, flags, and the four section counts.
pub const HEADER_LAYOUT: Layout = Layout::new(&[Field::U16; 6]);

/// QTYPE and QCLASS, which follow a QNAME.
pub const QUESTION_FIXED_LAYOUT: Layout = Layout::new(&[Field::U16, Field::U16]);

/// TYPE, CLASS, TTL, and RDLENGTH, which follow an RR's owner.
pub const RR_FIXED_LAYOUT: Layout = Layout::new(&[Field::U16, Field::U16, Field::U32, Field::U16]);

pub const QR: (u32, u32) = (15, 1);
pub const OPCODE: (u32, u32) = (11, 4);
pub const AA: (u32, u32) = (10, 1);
pub const TC: (u32, u32) = (9, 1);
pub const RD: (u32, u32) = (8, 1);
pub const RA: (u32, u32) = (7, 1);
pub const Z: (u32, u32) = (6, 1);
pub const AD: (u32, u32) = (5, 1);
pub const CD: (u32, u32) = (4, 1);
pub const RCODE: (u32, u32) = (0, 4);

// OPT TTL word, RFC 6891 § 6.1.3.
pub const EDNS_EXTENDED_RCODE: (u32, u32) = (24, 8);
pub const EDNS_VERSION: (u32, u32) = (16, 8);
pub const EDNS_DO: (u32, u32) = (15, 1);
pub const EDNS_Z: (u32, u32) = (0, 15);
