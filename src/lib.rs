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

//! A codec for DNS messages in the [RFC 1035] wire format.
//!
//! The entry point is [`Message`](message::Message), which decodes a
//! datagram into its header, questions, and records, and encodes it back
//! with domain name compression. Lower layers are public as well:
//! [`message::Reader`] and [`message::Writer`] work a message one field
//! at a time, [`name`] handles domain names and compression pointers,
//! and [`rr::rdata`] holds the per-type RDATA codecs.
//!
//! [RFC 1035]: https://datatracker.ietf.org/doc/html/rfc1035

pub mod bits;
pub mod buffer;
pub mod class;
pub mod message;
pub mod name;
pub mod rr;
mod util;
pub mod validate;
