//! Encode and decode binary records from a single field description.
//!
//! # Overview
//!
//! A type describes its binary layout once, by implementing [Fields]: an ordered
//! sequence of calls against a [Coder]. Bound to an [Encoder], that sequence writes the
//! value to a byte channel. Bound to a [Decoder], the very same sequence reads it back.
//! There is no schema and no self-description beyond explicit length prefixes, so the
//! order of calls in [Fields::fields] *is* the wire format.
//!
//! # Wire Format
//!
//! All multi-byte integers are little-endian.
//!
//! | Field kind                          | Layout                                            |
//! |-------------------------------------|---------------------------------------------------|
//! | `u16`/`i16`, `u32`/`i32`, `u64`/`i64` | 2, 4 or 8 raw bytes                              |
//! | varint / length                     | 1, 3, 5 or 9 bytes (see [varint])                 |
//! | string                              | varint byte length, then the UTF-8 bytes          |
//! | fixed byte buffer                   | exactly the declared length, no prefix            |
//! | sequence                            | `count` element encodings, no prefix or delimiter |
//!
//! Sequence coders never write their element count. When the count must be on the wire,
//! code it explicitly (usually with [Coder::length]) right before the sequence, and read it
//! back the same way before decoding.
//!
//! # Errors
//!
//! Each coder carries a sticky [Status]. The first channel failure, short write, or
//! missing byte is recorded and every later operation becomes a no-op. Check the status
//! (or use [Encoder::finish], [marshal], [decode]) once the pass is complete, and discard
//! the output if it is faulted.
//!
//! # Example
//!
//! ```
//! use bincoder::{decode, encode, Coder, Fields};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Entry {
//!     id: u16,
//!     tags: Vec<String>,
//! }
//!
//! impl Fields for Entry {
//!     fn fields<C: Coder>(&mut self, coder: &mut C) {
//!         coder.u16(&mut self.id);
//!         let mut count = self.tags.len();
//!         coder.length(&mut count);
//!         coder.slice(count, &mut self.tags, |c, tag| c.string(tag));
//!     }
//! }
//!
//! let mut entry = Entry { id: 7, tags: vec!["a".into(), "bc".into()] };
//! let encoded = encode(&mut entry).unwrap();
//! assert_eq!(encoded.as_ref(), &[7, 0, 2, 1, b'a', 2, b'b', b'c']);
//! assert_eq!(decode::<Entry>(encoded).unwrap(), entry);
//! ```

pub mod coder;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod marshal;
pub mod status;
pub mod varint;

// Re-export main types and traits
pub use coder::{Coder, Fields};
pub use config::{Config, RangeCfg};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::Error;
pub use marshal::{decode, decode_cfg, encode, marshal, unmarshal};
pub use status::Status;
