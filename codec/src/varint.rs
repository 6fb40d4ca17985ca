//! Variable-length unsigned integer encoding.
//!
//! The first byte selects the total width of the encoding:
//!
//! | First byte | Total bytes | Trailing bytes            |
//! |------------|-------------|---------------------------|
//! | `< 0xFD`   | 1           | none, the byte is the value |
//! | `0xFD`     | 3           | little-endian `u16`       |
//! | `0xFE`     | 5           | little-endian `u32`       |
//! | `0xFF`     | 9           | little-endian `u64`       |
//!
//! Encoding always picks the smallest tier that can hold the value. Decoding accepts
//! any tier, reading exactly the number of trailing bytes the first byte dictates.

use crate::Error;
use bytes::{Buf, BufMut};

/// Prefix announcing a trailing `u16`.
pub const TAG_U16: u8 = 0xFD;

/// Prefix announcing a trailing `u32`.
pub const TAG_U32: u8 = 0xFE;

/// Prefix announcing a trailing `u64`.
pub const TAG_U64: u8 = 0xFF;

/// Largest encoding produced for any value.
pub const MAX_SIZE: usize = 9;

/// Encodes `value` as a varint.
pub fn write(value: u64, buf: &mut impl BufMut) {
    if value < TAG_U16 as u64 {
        // Fast path for small values (common case for lengths).
        buf.put_u8(value as u8);
    } else if value <= u16::MAX as u64 {
        buf.put_u8(TAG_U16);
        buf.put_u16_le(value as u16);
    } else if value <= u32::MAX as u64 {
        buf.put_u8(TAG_U32);
        buf.put_u32_le(value as u32);
    } else {
        buf.put_u8(TAG_U64);
        buf.put_u64_le(value);
    }
}

/// Returns the number of trailing bytes announced by the first byte of a varint.
pub fn tail_len(first: u8) -> usize {
    match first {
        TAG_U16 => 2,
        TAG_U32 => 4,
        TAG_U64 => 8,
        _ => 0,
    }
}

/// Decodes the value of a varint whose first byte has already been consumed.
///
/// `tail` must hold at least [tail_len] bytes.
pub fn read_tail(first: u8, tail: &mut impl Buf) -> u64 {
    match first {
        TAG_U16 => tail.get_u16_le() as u64,
        TAG_U32 => tail.get_u32_le() as u64,
        TAG_U64 => tail.get_u64_le(),
        small => small as u64,
    }
}

/// Decodes a varint from an in-memory buffer.
pub fn read(buf: &mut impl Buf) -> Result<u64, Error> {
    if !buf.has_remaining() {
        return Err(Error::EndOfData {
            expected: 1,
            read: 0,
        });
    }
    let first = buf.get_u8();
    let tail = tail_len(first);
    if buf.remaining() < tail {
        return Err(Error::EndOfData {
            expected: 1 + tail,
            read: 1 + buf.remaining(),
        });
    }
    Ok(read_tail(first, buf))
}

/// Calculates the number of bytes needed to encode `value` as a varint.
pub fn size(value: u64) -> usize {
    if value < TAG_U16 as u64 {
        1
    } else if value <= u16::MAX as u64 {
        3
    } else if value <= u32::MAX as u64 {
        5
    } else {
        MAX_SIZE
    }
}
