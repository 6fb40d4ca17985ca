//! In-memory entry points.
//!
//! These adapt [bytes] buffers to the byte channel expected by [Encoder] and [Decoder]
//! and run a whole pass, returning the outcome instead of a status cell.

use crate::{Config, Decoder, Encoder, Error, Fields};
use bytes::{buf::Reader, buf::Writer, Buf, BufMut, Bytes, BytesMut};

/// Runs `f` against an encoder backed by a fresh buffer and returns the bytes written.
pub fn marshal(f: impl FnOnce(&mut Encoder<Writer<BytesMut>>)) -> Result<Bytes, Error> {
    let mut encoder = Encoder::new(BytesMut::new().writer());
    f(&mut encoder);
    let writer = encoder.finish()?;
    Ok(writer.into_inner().freeze())
}

/// Runs `f` against a decoder reading from `buf`.
///
/// Bytes left in `buf` after `f` returns are ignored.
pub fn unmarshal<B: Buf>(buf: B, f: impl FnOnce(&mut Decoder<Reader<B>>)) -> Result<(), Error> {
    let mut decoder = Decoder::new(buf.reader());
    f(&mut decoder);
    let (_, status) = decoder.into_parts();
    status.into_result()
}

/// Encodes `value` through its field description.
pub fn encode<T: Fields>(value: &mut T) -> Result<Bytes, Error> {
    marshal(|encoder| value.fields(encoder))
}

/// Decodes a `T` from `buf`, which must hold exactly one encoded value.
pub fn decode<T: Fields + Default>(buf: impl Buf) -> Result<T, Error> {
    decode_cfg(buf, Config::default())
}

/// Decodes a `T` from `buf` using `cfg`, which must hold exactly one encoded value.
pub fn decode_cfg<T: Fields + Default>(buf: impl Buf, cfg: Config) -> Result<T, Error> {
    let mut decoder = Decoder::with_config(buf.reader(), cfg);
    let mut value = T::default();
    value.fields(&mut decoder);
    let (reader, status) = decoder.into_parts();
    status.into_result()?;

    // Check that the buffer is fully consumed.
    let remaining = reader.into_inner().remaining();
    if remaining > 0 {
        return Err(Error::ExtraData(remaining));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coder;

    #[test]
    fn test_marshal_unmarshal() {
        let encoded = marshal(|e| {
            e.u32(&mut 42);
            e.string(&mut "wire".into());
        })
        .unwrap();
        assert_eq!(encoded.as_ref(), &[42, 0, 0, 0, 4, b'w', b'i', b'r', b'e']);

        let (mut n, mut s) = (0u32, String::new());
        unmarshal(encoded, |d| {
            d.u32(&mut n);
            d.string(&mut s);
        })
        .unwrap();
        assert_eq!(n, 42);
        assert_eq!(s, "wire");
    }

    #[test]
    fn test_unmarshal_reports_fault() {
        let result = unmarshal(&[0x01][..], |d| d.u16(&mut 0));
        assert!(matches!(
            result,
            Err(Error::EndOfData {
                expected: 2,
                read: 1
            })
        ));
    }

    #[test]
    fn test_unmarshal_allows_trailing_bytes() {
        let mut value = 0u16;
        unmarshal(&[0x01, 0x00, 0xFF][..], |d| d.u16(&mut value)).unwrap();
        assert_eq!(value, 1);
    }

    #[test]
    fn test_decode_rejects_extra_data() {
        assert!(matches!(
            decode::<u16>(&[0x01, 0x00, 0xFF][..]),
            Err(Error::ExtraData(1))
        ));
    }

    #[test]
    fn test_decode_cfg() {
        let encoded = encode(&mut "abcdef".to_string()).unwrap();
        assert_eq!(
            decode_cfg::<String>(encoded.clone(), Config::with_max_len(6)).unwrap(),
            "abcdef"
        );
        assert!(matches!(
            decode_cfg::<String>(encoded, Config::with_max_len(5)),
            Err(Error::InvalidLength(6))
        ));
    }
}
