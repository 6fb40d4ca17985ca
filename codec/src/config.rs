//! Decoder configuration.
//!
//! Lengths read from the wire are untrusted. [Config] bounds every self-describing
//! length (string byte counts and [crate::Coder::length]) before the decoder acts on it.

use core::ops::{Bound, RangeBounds};

/// An accepted range of values, built from any of the standard range types.
///
/// # Examples
///
/// ```
/// use bincoder::RangeCfg;
///
/// let cfg = RangeCfg::new(0..=1024usize);
/// assert!(cfg.contains(&1024));
/// assert!(!cfg.contains(&1025));
///
/// let cfg: RangeCfg<usize> = (..).into();
/// assert!(cfg.contains(&usize::MAX));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RangeCfg<T: Copy + PartialOrd> {
    start: Bound<T>,
    end: Bound<T>,
}

impl<T: Copy + PartialOrd> RangeCfg<T> {
    /// Creates a `RangeCfg` from any type implementing `RangeBounds<T>`.
    pub fn new(r: impl RangeBounds<T>) -> Self {
        Self {
            start: r.start_bound().cloned(),
            end: r.end_bound().cloned(),
        }
    }

    /// Creates a `RangeCfg` that only accepts `value`.
    pub fn exact(value: T) -> Self {
        Self {
            start: Bound::Included(value),
            end: Bound::Included(value),
        }
    }

    /// Returns true if `value` lies within both bounds.
    pub fn contains(&self, value: &T) -> bool {
        let above_start = match &self.start {
            Bound::Included(s) => value >= s,
            Bound::Excluded(s) => value > s,
            Bound::Unbounded => true,
        };
        let below_end = match &self.end {
            Bound::Included(e) => value <= e,
            Bound::Excluded(e) => value < e,
            Bound::Unbounded => true,
        };
        above_start && below_end
    }
}

impl<T: Copy + PartialOrd> RangeBounds<T> for RangeCfg<T> {
    fn start_bound(&self) -> Bound<&T> {
        self.start.as_ref()
    }

    fn end_bound(&self) -> Bound<&T> {
        self.end.as_ref()
    }
}

macro_rules! impl_from_range {
    ($($range:ty),*) => {
        $(
            impl<T: Copy + PartialOrd> From<$range> for RangeCfg<T> {
                fn from(r: $range) -> Self {
                    Self::new(r)
                }
            }
        )*
    };
}

impl_from_range!(
    core::ops::Range<T>,
    core::ops::RangeInclusive<T>,
    core::ops::RangeFrom<T>,
    core::ops::RangeTo<T>,
    core::ops::RangeToInclusive<T>
);

impl<T: Copy + PartialOrd> From<core::ops::RangeFull> for RangeCfg<T> {
    fn from(_: core::ops::RangeFull) -> Self {
        Self::new(..)
    }
}

/// Configuration applied by a [crate::Decoder].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Accepted range for every length read from the wire.
    pub max_len: RangeCfg<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_len: (..).into(),
        }
    }
}

impl Config {
    /// Returns a configuration accepting lengths up to and including `max`.
    pub fn with_max_len(max: usize) -> Self {
        Self {
            max_len: (..=max).into(),
        }
    }
}
