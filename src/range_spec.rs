//! # Range descriptors for message size axes
//!
//! A range descriptor is the compact text form `r:<start>,<step>,<end>` of an
//! arithmetic progression. It expands to `start, start+step, start+2·step, …`
//! up to and including the largest term not exceeding `end`.
//!
//! Validation happens when the descriptor is parsed, never during iteration:
//! a [`RangeSpec`] that exists is always well formed. Iteration is lazy and
//! restartable, so the same spec can be enumerated by any number of
//! parameterized dimensions.
//!
//! ```
//! use fabmatrix::RangeSpec;
//!
//! let sizes: RangeSpec = "r:0,4,16".parse().unwrap();
//! assert_eq!(sizes.iter().collect::<Vec<_>>(), vec![0, 4, 8, 12, 16]);
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use num_traits::{PrimInt, Unsigned};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{RANGE_SPEC_PREFIX, RANGE_SPEC_SEPARATOR};
use crate::error::{Error, Result};

/// Integer types a range descriptor can expand into
pub trait RangeInt: PrimInt + Unsigned + FromStr + fmt::Display {}

impl<T> RangeInt for T where T: PrimInt + Unsigned + FromStr + fmt::Display {}

/// A validated arithmetic progression `start..=end` by `step`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeSpec<T = u64> {
    start: T,
    step: T,
    end: T,
}

impl<T: RangeInt> RangeSpec<T> {
    /// Create a range from its components
    ///
    /// Fails with [`Error::MalformedRangeSpec`] when `step` is zero or `end`
    /// is below `start`.
    pub fn new(start: T, step: T, end: T) -> Result<Self> {
        let descriptor = format!("{RANGE_SPEC_PREFIX}{start},{step},{end}");
        Self::validated(&descriptor, start, step, end)
    }

    /// Parse a descriptor of the form `r:<start>,<step>,<end>`
    pub fn parse(descriptor: &str) -> Result<Self> {
        let body = descriptor.strip_prefix(RANGE_SPEC_PREFIX).ok_or_else(|| {
            Error::malformed_range(descriptor, format!("missing {RANGE_SPEC_PREFIX:?} prefix"))
        })?;

        let parts: Vec<&str> = body.split(RANGE_SPEC_SEPARATOR).collect();
        if parts.len() != 3 {
            return Err(Error::malformed_range(
                descriptor,
                format!("expected 3 components, found {}", parts.len()),
            ));
        }

        let start = parse_component(descriptor, "start", parts[0])?;
        let step = parse_component(descriptor, "step", parts[1])?;
        let end = parse_component(descriptor, "end", parts[2])?;

        Self::validated(descriptor, start, step, end)
    }

    fn validated(descriptor: &str, start: T, step: T, end: T) -> Result<Self> {
        if step.is_zero() {
            return Err(Error::malformed_range(descriptor, "step must be at least 1"));
        }
        if end < start {
            return Err(Error::malformed_range(descriptor, "end must not be less than start"));
        }
        Ok(Self { start, step, end })
    }

    /// First term of the progression
    pub fn start(&self) -> T {
        self.start
    }

    /// Distance between consecutive terms
    pub fn step(&self) -> T {
        self.step
    }

    /// Inclusive upper bound (not necessarily a term)
    pub fn end(&self) -> T {
        self.end
    }

    /// Number of terms, or `None` if it does not fit in `usize`
    pub fn checked_len(&self) -> Option<usize> {
        terms_from(self.start, self.step, self.end)
    }

    /// Number of terms, saturating at `usize::MAX`
    ///
    /// Only ranges with more than `usize::MAX` terms saturate, such as
    /// `r:0,1,18446744073709551615` over `u64`. Use [`RangeSpec::checked_len`]
    /// where that matters.
    pub fn len(&self) -> usize {
        self.checked_len().unwrap_or(usize::MAX)
    }

    /// A valid range always contains `start`
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Largest term not exceeding `end`
    pub fn last(&self) -> T {
        self.start + (self.end - self.start) / self.step * self.step
    }

    /// Check whether `value` is a term of the progression
    pub fn contains(&self, value: T) -> bool {
        value >= self.start
            && value <= self.end
            && ((value - self.start) % self.step).is_zero()
    }

    /// Iterate over the terms in increasing order
    pub fn iter(&self) -> RangeIter<T> {
        RangeIter {
            next: Some(self.start),
            step: self.step,
            end: self.end,
        }
    }

    /// Collect every term
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

/// Terms of the progression from `from` up to `end`
fn terms_from<T: RangeInt>(from: T, step: T, end: T) -> Option<usize> {
    ((end - from) / step).to_usize()?.checked_add(1)
}

fn parse_component<T: RangeInt>(descriptor: &str, name: &str, text: &str) -> Result<T> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::malformed_range(
            descriptor,
            format!("{name} {text:?} is not a non-negative integer"),
        ));
    }
    text.parse::<T>()
        .map_err(|_| Error::malformed_range(descriptor, format!("{name} {text:?} is out of range")))
}

impl<T: RangeInt> FromStr for RangeSpec<T> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<T: RangeInt> fmt::Display for RangeSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}",
            RANGE_SPEC_PREFIX,
            self.start,
            RANGE_SPEC_SEPARATOR,
            self.step,
            RANGE_SPEC_SEPARATOR,
            self.end
        )
    }
}

impl<T: RangeInt> Serialize for RangeSpec<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: RangeInt> Deserialize<'de> for RangeSpec<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let descriptor = String::deserialize(deserializer)?;
        Self::parse(&descriptor).map_err(de::Error::custom)
    }
}

impl<'a, T: RangeInt> IntoIterator for &'a RangeSpec<T> {
    type Item = T;
    type IntoIter = RangeIter<T>;

    fn into_iter(self) -> RangeIter<T> {
        self.iter()
    }
}

/// Lazy iterator over the terms of a [`RangeSpec`]
///
/// Not an `ExactSizeIterator`: a range over a type wider than `usize` can
/// hold more terms than `usize` counts, and `size_hint` then reports no
/// upper bound.
#[derive(Debug, Clone)]
pub struct RangeIter<T> {
    next: Option<T>,
    step: T,
    end: T,
}

impl<T: RangeInt> Iterator for RangeIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.next?;
        // checked_add guards against wrapping when `end` sits near T::MAX
        self.next = current.checked_add(&self.step).filter(|n| *n <= self.end);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            None => (0, Some(0)),
            Some(next) => match terms_from(next, self.step, self.end) {
                Some(n) => (n, Some(n)),
                None => (usize::MAX, None),
            },
        }
    }
}

impl<T: RangeInt> FusedIterator for RangeIter<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_small_range() {
        let spec: RangeSpec = "r:0,4,64".parse().unwrap();
        let values = spec.to_vec();
        assert_eq!(values.len(), 17);
        assert_eq!(values[0], 0);
        assert_eq!(*values.last().unwrap(), 64);
        assert_eq!(spec.len(), values.len());
    }

    #[test]
    fn test_last_term_below_end() {
        let spec: RangeSpec = "r:0,3,10".parse().unwrap();
        assert_eq!(spec.to_vec(), vec![0, 3, 6, 9]);
        assert_eq!(spec.last(), 9);
        assert!(!spec.contains(10));
    }

    #[test]
    fn test_single_term() {
        let spec: RangeSpec = "r:7,5,7".parse().unwrap();
        assert_eq!(spec.to_vec(), vec![7]);
        assert_eq!(spec.len(), 1);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let spec: RangeSpec = "r:8000,4,9000".parse().unwrap();
        let first: Vec<_> = spec.iter().collect();
        let second: Vec<_> = (&spec).into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_zero_step() {
        let err = RangeSpec::<u64>::parse("r:10,0,20").unwrap_err();
        assert!(matches!(err, Error::MalformedRangeSpec { .. }));
    }

    #[test]
    fn test_rejects_bad_shapes() {
        for bad in ["", "0,4,64", "R:0,4,64", "r:0,4", "r:0,4,64,1", "r:a,4,64", "r:-1,4,64", "r:0, 4,64", "r:64,4,0", "r:+1,4,64"] {
            assert!(
                matches!(RangeSpec::<u64>::parse(bad), Err(Error::MalformedRangeSpec { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_overflowing_component() {
        assert!(RangeSpec::<u8>::parse("r:0,1,256").is_err());
        assert!(RangeSpec::<u8>::parse("r:0,1,255").is_ok());
    }

    #[test]
    fn test_no_wrap_near_max() {
        let spec = RangeSpec::<u8>::new(250, 4, 255).unwrap();
        assert_eq!(spec.to_vec(), vec![250, 254]);
    }

    #[test]
    fn test_len_beyond_usize() {
        let spec = RangeSpec::<u128>::new(0, 1, u128::MAX).unwrap();
        assert_eq!(spec.checked_len(), None);
        assert_eq!(spec.len(), usize::MAX);
        assert_eq!(spec.iter().size_hint(), (usize::MAX, None));
    }

    #[test]
    fn test_full_width_u64_range() {
        let spec = RangeSpec::<u64>::new(0, 1, u64::MAX).unwrap();
        // 2^64 terms never fit in a usize
        assert_eq!(spec.checked_len(), None);
        assert_eq!(spec.iter().size_hint().1, None);
        assert_eq!(spec.last(), u64::MAX);
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let spec = RangeSpec::<u8>::new(250, 4, 255).unwrap();
        let mut iter = spec.iter();
        assert_eq!(iter.size_hint(), (2, Some(2)));
        iter.next();
        assert_eq!(iter.size_hint(), (1, Some(1)));
        iter.next();
        assert_eq!(iter.size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_display_round_trip() {
        let spec = RangeSpec::<u64>::new(4048, 4, 4148).unwrap();
        assert_eq!(spec.to_string(), "r:4048,4,4148");
        assert_eq!(spec.to_string().parse::<RangeSpec>().unwrap(), spec);
    }
}
