//! Reading side of the [Coder] contract.

use crate::{varint, Coder, Config, Error, Status};
use bytes::{Bytes, BytesMut};
use std::io::{ErrorKind, Read};

/// Upper bound on the buffer grown ahead of data actually arriving from the channel.
///
/// A length prefix only grows the destination as bytes are delivered, so a hostile
/// prefix cannot force a large allocation up front.
const READ_CHUNK: usize = 4096;

/// A [Coder] that overwrites every field with the value read from a byte channel.
///
/// The channel may deliver any number of bytes per call: reads are repeated until a
/// field is complete, the channel reports end of data, or it fails.
///
/// # Example
///
/// ```
/// use bincoder::{Coder, Decoder};
///
/// let mut decoder = Decoder::new(&[0x02, 0x01, 0x02, b'h', b'i'][..]);
/// let (mut a, mut b) = (0u16, String::new());
/// decoder.u16(&mut a);
/// decoder.string(&mut b);
/// assert!(decoder.status().is_clear());
/// assert_eq!((a, b.as_str()), (0x0102, "hi"));
/// ```
pub struct Decoder<R: Read> {
    source: R,
    status: Status,
    cfg: Config,
}

impl<R: Read> Decoder<R> {
    /// Creates a decoder reading from `source` with the default [Config].
    pub fn new(source: R) -> Self {
        Self::with_config(source, Config::default())
    }

    /// Creates a decoder reading from `source` with the given [Config].
    pub fn with_config(source: R, cfg: Config) -> Self {
        Self {
            source,
            status: Status::default(),
            cfg,
        }
    }

    /// Returns the configuration of this decoder.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Returns a reference to the underlying channel.
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Returns the channel and the final status, faulted or not.
    pub fn into_parts(self) -> (R, Status) {
        (self.source, self.status)
    }

    /// Reads exactly `n` bytes from the channel.
    ///
    /// If the channel ends or fails first, the decoder is faulted and the bytes read so
    /// far are returned.
    fn read_exact(&mut self, n: usize) -> BytesMut {
        let mut buf = BytesMut::new();
        if self.status.is_faulted() {
            return buf;
        }
        let mut filled = 0;
        while filled < n {
            if filled == buf.len() {
                buf.resize(filled + (n - filled).min(READ_CHUNK), 0);
            }
            match self.source.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.status.fault(Error::EndOfData {
                        expected: n,
                        read: filled,
                    });
                    break;
                }
                Ok(read) => filled += read,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.status.fault(err.into());
                    break;
                }
            }
        }
        buf.truncate(filled);
        buf
    }

    /// Reads exactly `N` bytes, or returns `None` if the decoder is (or becomes) faulted.
    fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let buf = self.read_exact(N);
        if self.status.is_faulted() {
            return None;
        }
        buf[..].try_into().ok()
    }
}

macro_rules! impl_read_fixed {
    ($($type:ident),*) => {
        $(
            #[inline]
            fn $type(&mut self, f: &mut $type) {
                if let Some(raw) = self.read_array() {
                    *f = $type::from_le_bytes(raw);
                }
            }
        )*
    };
}

impl<R: Read> Coder for Decoder<R> {
    fn status(&self) -> &Status {
        &self.status
    }

    fn fault(&mut self, err: Error) {
        self.status.fault(err);
    }

    impl_read_fixed!(u16, u32, u64, i16, i32, i64);

    fn varint(&mut self, f: &mut u64) {
        let Some([first]) = self.read_array::<1>() else {
            return;
        };
        let mut tail = self.read_exact(varint::tail_len(first));
        if self.status.is_faulted() {
            return;
        }
        *f = varint::read_tail(first, &mut tail);
    }

    fn length(&mut self, f: &mut usize) {
        if self.status.is_faulted() {
            return;
        }
        let mut value = 0u64;
        self.varint(&mut value);
        if self.status.is_faulted() {
            return;
        }
        match usize::try_from(value) {
            Ok(len) if self.cfg.max_len.contains(&len) => *f = len,
            _ => self.status.fault(Error::InvalidLength(value)),
        }
    }

    fn string(&mut self, f: &mut String) {
        if self.status.is_faulted() {
            return;
        }
        let mut len = 0;
        self.length(&mut len);
        let raw = self.read_exact(len);
        if self.status.is_faulted() {
            return;
        }
        match std::str::from_utf8(&raw) {
            Ok(s) => {
                f.clear();
                f.push_str(s);
            }
            Err(err) => self.status.fault(err.into()),
        }
    }

    fn bytes(&mut self, len: usize, f: &mut Bytes) {
        let raw = self.read_exact(len);
        if self.status.is_faulted() {
            return;
        }
        *f = raw.freeze();
    }

    fn array<const N: usize>(&mut self, f: &mut [u8; N]) {
        if let Some(raw) = self.read_array() {
            *f = raw;
        }
    }

    fn sequence<C>(
        &mut self,
        count: usize,
        container: &mut C,
        construct: impl FnOnce(&mut C, usize),
        mut each: impl FnMut(&mut Self, &mut C, usize),
    ) {
        if self.status.is_faulted() {
            return;
        }
        construct(container, count);
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
        self.sequence(
            count,
            items,
            |items, count| {
                items.clear();
                items.reserve(count.min(READ_CHUNK));
            },
            |coder, items, _| {
                let mut item = T::default();
                each(coder, &mut item);
                items.push(item);
            },
        );
    }
}
