//! The field-coding contract shared by [crate::Encoder] and [crate::Decoder].

use crate::{Error, Status};
use bytes::Bytes;

/// A set of field-coding operations.
///
/// The same call on an [crate::Encoder] writes the field and on a [crate::Decoder]
/// overwrites it with the value read from the channel. A [Fields] routine written
/// against this trait therefore describes both directions at once.
///
/// Every operation checks the coder's [Status] first and returns without touching
/// the channel (or the field) once the coder is faulted.
pub trait Coder: Sized {
    /// Returns the sticky status of this coder.
    fn status(&self) -> &Status;

    /// Records `err` unless the coder already holds an earlier fault.
    fn fault(&mut self, err: Error);

    /// Returns true if the coder has faulted.
    fn is_faulted(&self) -> bool {
        self.status().is_faulted()
    }

    /// Codes a `u16` as 2 little-endian bytes.
    fn u16(&mut self, f: &mut u16);

    /// Codes a `u32` as 4 little-endian bytes.
    fn u32(&mut self, f: &mut u32);

    /// Codes a `u64` as 8 little-endian bytes.
    fn u64(&mut self, f: &mut u64);

    /// Codes an `i16` as 2 little-endian two's-complement bytes.
    fn i16(&mut self, f: &mut i16);

    /// Codes an `i32` as 4 little-endian two's-complement bytes.
    fn i32(&mut self, f: &mut i32);

    /// Codes an `i64` as 8 little-endian two's-complement bytes.
    fn i64(&mut self, f: &mut i64);

    /// Codes a `u64` as a [crate::varint].
    fn varint(&mut self, f: &mut u64);

    /// Codes an in-memory length as a [crate::varint].
    ///
    /// When decoding, the value must fall within [crate::Config::max_len].
    fn length(&mut self, f: &mut usize);

    /// Codes a string as a varint byte length followed by its UTF-8 bytes.
    fn string(&mut self, f: &mut String);

    /// Codes exactly `len` raw bytes. The length itself is never written.
    ///
    /// When encoding, a longer `f` is truncated and a shorter one is zero-padded.
    fn bytes(&mut self, len: usize, f: &mut Bytes);

    /// Codes exactly `N` raw bytes. The length itself is never written.
    fn array<const N: usize>(&mut self, f: &mut [u8; N]);

    /// Codes `count` elements of `container`, in index order.
    ///
    /// `construct` runs once, before any element, and only when decoding. It must
    /// prepare `container` to receive `count` elements. `each` then runs for every
    /// index in `0..count` on both sides.
    ///
    /// `count` is not written: callers that need it on the wire code it first.
    fn sequence<C>(
        &mut self,
        count: usize,
        container: &mut C,
        construct: impl FnOnce(&mut C, usize),
        each: impl FnMut(&mut Self, &mut C, usize),
    );

    /// Codes the first `count` elements of `items` with `each`.
    ///
    /// When decoding, `items` is replaced by `count` default elements before the first
    /// call to `each`. When encoding, `items` must hold exactly `count` elements.
    fn slice<T: Default>(
        &mut self,
        count: usize,
        items: &mut Vec<T>,
        each: impl FnMut(&mut Self, &mut T),
    );

    /// Codes a nested value through its own field description.
    fn field<T: Fields>(&mut self, f: &mut T) {
        if self.is_faulted() {
            return;
        }
        f.fields(self);
    }
}

/// A type whose binary layout is described by a single, ordered sequence of [Coder] calls.
///
/// # Example
///
/// ```
/// use bincoder::{decode, encode, Coder, Fields};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Point {
///     x: u32,
///     y: u32,
///     label: String,
/// }
///
/// impl Fields for Point {
///     fn fields<C: Coder>(&mut self, coder: &mut C) {
///         coder.u32(&mut self.x);
///         coder.u32(&mut self.y);
///         coder.string(&mut self.label);
///     }
/// }
///
/// let mut point = Point { x: 1, y: 2, label: "a".into() };
/// let encoded = encode(&mut point).unwrap();
/// assert_eq!(encoded.as_ref(), &[1, 0, 0, 0, 2, 0, 0, 0, 1, b'a']);
/// assert_eq!(decode::<Point>(encoded).unwrap(), point);
/// ```
pub trait Fields {
    /// Issues the coder calls for every field of `self`, in wire order.
    fn fields<C: Coder>(&mut self, coder: &mut C);
}

macro_rules! impl_fields {
    ($($type:ident),*) => {
        $(
            impl Fields for $type {
                #[inline]
                fn fields<C: Coder>(&mut self, coder: &mut C) {
                    coder.$type(self);
                }
            }
        )*
    };
}

impl_fields!(u16, u32, u64, i16, i32, i64);

impl Fields for String {
    #[inline]
    fn fields<C: Coder>(&mut self, coder: &mut C) {
        coder.string(self);
    }
}
