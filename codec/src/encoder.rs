//! Writing side of the [Coder] contract.

use crate::{varint, Coder, Error, Status};
use bytes::{Bytes, BytesMut};
use std::io::{ErrorKind, Write};

/// A [Coder] that writes every field to a byte channel.
///
/// Pass `&mut W` to keep ownership of the channel, or use [Encoder::into_parts] to get it
/// back. Either way the channel stays available after a fault so it can be flushed or
/// closed by its owner.
///
/// # Example
///
/// ```
/// use bincoder::{Coder, Encoder};
///
/// let mut out = Vec::new();
/// let mut encoder = Encoder::new(&mut out);
/// encoder.u16(&mut 0x0102);
/// encoder.string(&mut "hi".to_string());
/// encoder.finish().unwrap();
/// assert_eq!(out, [0x02, 0x01, 0x02, b'h', b'i']);
/// ```
pub struct Encoder<W: Write> {
    sink: W,
    status: Status,
}

impl<W: Write> Encoder<W> {
    /// Creates an encoder writing to `sink`.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            status: Status::default(),
        }
    }

    /// Returns a reference to the underlying channel.
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Writes `bytes` to the channel in a single call.
    ///
    /// A short write or channel error faults the encoder. Only interrupted calls are retried.
    fn write_all(&mut self, bytes: &[u8]) {
        if self.status.is_faulted() || bytes.is_empty() {
            return;
        }
        loop {
            match self.sink.write(bytes) {
                Ok(written) if written == bytes.len() => return,
                Ok(written) => {
                    return self.status.fault(Error::ShortWrite {
                        expected: bytes.len(),
                        written,
                    })
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return self.status.fault(err.into()),
            }
        }
    }

    /// Pushes any buffered output to the channel.
    pub fn flush(&mut self) {
        if self.status.is_faulted() {
            return;
        }
        if let Err(err) = self.sink.flush() {
            self.status.fault(err.into());
        }
    }

    /// Flushes the channel and returns it, or the first fault of the pass.
    pub fn finish(mut self) -> Result<W, Error> {
        self.flush();
        let (sink, status) = self.into_parts();
        status.into_result().map(|_| sink)
    }

    /// Returns the channel and the final status, faulted or not.
    pub fn into_parts(self) -> (W, Status) {
        (self.sink, self.status)
    }
}

macro_rules! impl_write_fixed {
    ($($type:ident),*) => {
        $(
            #[inline]
            fn $type(&mut self, f: &mut $type) {
                self.write_all(&f.to_le_bytes());
            }
        )*
    };
}

impl<W: Write> Coder for Encoder<W> {
    fn status(&self) -> &Status {
        &self.status
    }

    fn fault(&mut self, err: Error) {
        self.status.fault(err);
    }

    impl_write_fixed!(u16, u32, u64, i16, i32, i64);

    fn varint(&mut self, f: &mut u64) {
        if self.status.is_faulted() {
            return;
        }
        let mut buf = [0u8; varint::MAX_SIZE];
        let len = varint::size(*f);
        varint::write(*f, &mut &mut buf[..]);
        self.write_all(&buf[..len]);
    }

    fn length(&mut self, f: &mut usize) {
        self.varint(&mut (*f as u64));
    }

    fn string(&mut self, f: &mut String) {
        if self.status.is_faulted() {
            return;
        }
        self.length(&mut f.len());
        self.write_all(f.as_bytes());
    }

    fn bytes(&mut self, len: usize, f: &mut Bytes) {
        if self.status.is_faulted() {
            return;
        }
        if f.len() >= len {
            return self.write_all(&f[..len]);
        }
        let mut padded = BytesMut::zeroed(len);
        padded[..f.len()].copy_from_slice(f);
        self.write_all(&padded);
    }

    fn array<const N: usize>(&mut self, f: &mut [u8; N]) {
        self.write_all(&f[..]);
    }

    fn sequence<C>(
        &mut self,
        count: usize,
        container: &mut C,
        _construct: impl FnOnce(&mut C, usize),
        mut each: impl FnMut(&mut Self, &mut C, usize),
    ) {
        for index in 0..count {
            if self.status.is_faulted() {
                return;
            }
            each(self, container, index);
        }
    }

    fn slice<T: Default>(
        &mut self,
        count: usize,
        items: &mut Vec<T>,
        mut each: impl FnMut(&mut Self, &mut T),
    ) {
        if self.status.is_faulted() {
            return;
        }
        if items.len() != count {
            return self.status.fault(Error::CountMismatch {
                count,
                len: items.len(),
            });
        }
        for item in items.iter_mut() {
            if self.status.is_faulted() {
                return;
            }
            each(self, item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Accepts a fixed number of writes, then fails every later one.
    struct FailAfter {
        out: Vec<u8>,
        writes: usize,
    }

    impl Write for FailAfter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.writes == 0 {
                return Err(io::Error::new(ErrorKind::BrokenPipe, "channel closed"));
            }
            self.writes -= 1;
            self.out.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Accepts at most `limit` bytes per call.
    struct ShortWriter {
        out: Vec<u8>,
        limit: usize,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.limit);
            self.out.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn encoded(f: impl FnOnce(&mut Encoder<&mut Vec<u8>>)) -> Vec<u8> {
        let mut out = Vec::new();
        let mut encoder = Encoder::new(&mut out);
        f(&mut encoder);
        encoder.finish().unwrap();
        out
    }

    #[test]
    fn test_fixed_width_little_endian() {
        let out = encoded(|e| {
            e.u16(&mut 0x0102);
            e.u32(&mut 0x01020304);
            e.u64(&mut 0x0102030405060708);
        });
        assert_eq!(
            out,
            [0x02, 0x01, 0x04, 0x03, 0x02, 0x01, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
        );

        let out = encoded(|e| {
            e.i16(&mut -1);
            e.i32(&mut -2);
            e.i64(&mut i64::MIN);
        });
        assert_eq!(
            out,
            [
                0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x80
            ]
        );
    }

    #[test]
    fn test_string() {
        assert_eq!(encoded(|e| e.string(&mut String::new())), [0x00]);
        assert_eq!(encoded(|e| e.string(&mut "hi".into())), [0x02, b'h', b'i']);

        let long = "x".repeat(300);
        let out = encoded(|e| e.string(&mut long.clone()));
        assert_eq!(&out[..3], &[0xFD, 0x2C, 0x01]);
        assert_eq!(&out[3..], long.as_bytes());
    }

    #[test]
    fn test_bytes_padding() {
        let out = encoded(|e| e.bytes(8, &mut Bytes::from_static(&[1, 2, 3, 4, 5])));
        assert_eq!(out, [1, 2, 3, 4, 5, 0, 0, 0]);
    }

    #[test]
    fn test_bytes_truncation() {
        let mut source = Bytes::from_static(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        let out = encoded(|e| e.bytes(8, &mut source));
        assert_eq!(out, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_array() {
        assert_eq!(encoded(|e| e.array(&mut [9, 8, 7])), [9, 8, 7]);
    }

    #[test]
    fn test_sequence_never_constructs() {
        let mut values = vec![1u16, 2, 3];
        let out = encoded(|e| {
            e.sequence(
                values.len(),
                &mut values,
                |_, _| panic!("constructor must not run when encoding"),
                |e, values, i| e.u16(&mut values[i]),
            )
        });
        assert_eq!(out, [1, 0, 2, 0, 3, 0]);
    }

    #[test]
    fn test_slice_count_mismatch() {
        let mut encoder = Encoder::new(Vec::new());
        encoder.slice(3, &mut vec![1u32, 2], |e, v| e.u32(v));
        let (out, status) = encoder.into_parts();
        assert!(out.is_empty());
        assert!(matches!(
            status.error(),
            Some(Error::CountMismatch { count: 3, len: 2 })
        ));
    }

    #[test]
    fn test_sticky_fault() {
        let mut encoder = Encoder::new(FailAfter {
            out: Vec::new(),
            writes: 2,
        });
        encoder.u16(&mut 1);
        encoder.u16(&mut 2);
        assert!(encoder.status().is_clear());

        // Third field hits the failing channel.
        encoder.u32(&mut 3);
        assert!(encoder.is_faulted());

        // Every later operation is a no-op, even once the channel would accept writes.
        let (mut sink, status) = encoder.into_parts();
        sink.writes = usize::MAX;
        let mut encoder = Encoder { sink, status };
        encoder.u64(&mut 4);
        encoder.string(&mut "ignored".into());
        encoder.bytes(4, &mut Bytes::new());
        encoder.slice(1, &mut vec![5u16], |e, v| e.u16(v));
        encoder.flush();

        let (sink, status) = encoder.into_parts();
        assert_eq!(sink.out, [1, 0, 2, 0]);
        assert!(matches!(status.into_result(), Err(Error::Io(_))));
    }

    #[test]
    fn test_short_write() {
        let mut encoder = Encoder::new(ShortWriter {
            out: Vec::new(),
            limit: 3,
        });
        encoder.u16(&mut 7);
        encoder.u32(&mut 8);
        encoder.u16(&mut 9);
        let (sink, status) = encoder.into_parts();
        assert_eq!(sink.out, [7, 0, 8, 0, 0]);
        assert!(matches!(
            status.error(),
            Some(Error::ShortWrite {
                expected: 4,
                written: 3
            })
        ));
    }

    #[test]
    fn test_finish_reports_fault() {
        let mut encoder = Encoder::new(FailAfter {
            out: Vec::new(),
            writes: 0,
        });
        encoder.u16(&mut 1);
        assert!(matches!(encoder.finish(), Err(Error::Io(_))));
    }
}
