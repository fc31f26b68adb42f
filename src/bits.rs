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

//! Extraction and injection of bit fields within integer words.
//!
//! Offsets count from the least significant bit, so the DNS header's QR
//! flag lives at offset 15 with width 1, and its RCODE at offset 0 with
//! width 4.

/// Returns a mask of `width` one bits in the least significant
/// positions. Widths of 64 and above yield all ones.
const fn mask(width: u32) -> u64 {
    if width >= u64::BITS {
        u64::MAX
    } else {
        (1 << width) - 1
    }
}

/// Returns the `width`-bit field of `word` starting at bit `offset`.
pub const fn extract_bits(word: u64, offset: u32, width: u32) -> u64 {
    if offset >= u64::BITS {
        0
    } else {
        (word >> offset) & mask(width)
    }
}

/// Returns `word` with the `width`-bit field starting at bit `offset`
/// replaced by the low `width` bits of `value`. Bits of `value` beyond
/// `width` are ignored; all other bits of `word` are preserved.
pub const fn inject_bits(word: u64, value: u64, offset: u32, width: u32) -> u64 {
    if offset >= u64::BITS {
        word
    } else {
        let field_mask = mask(width) << offset;
        (word & !field_mask) | ((value << offset) & field_mask)
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
