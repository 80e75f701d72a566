// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use crate::algorithms::bitwise;

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
}

/// An element type that [`SearchValues`] can be built for.
///
/// This trait is sealed and implemented for `u8` and `u16`.
pub trait SearchElement: Copy + sealed::Sealed + 'static {
    /// Number of distinct values of the type.
    #[doc(hidden)]
    const CARDINALITY: usize;

    /// The value as a bitmap position.
    #[doc(hidden)]
    fn code(self) -> usize;
}

impl SearchElement for u8 {
    const CARDINALITY: usize = 1 << 8;

    #[inline]
    fn code(self) -> usize {
        usize::from(self)
    }
}

impl SearchElement for u16 {
    const CARDINALITY: usize = 1 << 16;

    #[inline]
    fn code(self) -> usize {
        usize::from(self)
    }
}

const ASCII_LIMIT: usize = 128;

#[derive(Clone, PartialEq, Eq)]
enum Bitmap {
    /// Every needle is below 128; anything at or above 128 is rejected by value.
    Ascii([u64; 2]),
    /// One bit per value of the element type.
    Full(Box<[u64]>),
}

impl Bitmap {
    fn strategy(&self) -> &'static str {
        match self {
            Self::Ascii(_) => "ascii",
            Self::Full(_) => "full",
        }
    }
}

#[inline]
fn set_bit(bits: &mut [u64], code: usize) {
    if let Some(word) = bits.get_mut(code / 64) {
        *word |= 1 << (code % 64);
    }
}

#[inline]
fn test_bit(bits: &[u64], code: usize) -> bool {
    bits.get(code / 64).is_some_and(|word| word & (1 << (code % 64)) != 0)
}

/// One bit per byte value, kept on the stack.
///
/// Used internally for ad hoc byte sets that live for a single search, so it is never logged.
#[derive(Clone, Copy)]
pub(crate) struct ByteSet([u64; 4]);

impl ByteSet {
    pub(crate) fn new(values: &[u8]) -> Self {
        let mut bits = [0_u64; 4];
        for &value in values {
            set_bit(&mut bits, usize::from(value));
        }

        Self(bits)
    }

    #[inline]
    pub(crate) fn contains(&self, value: u8) -> bool {
        test_bit(&self.0, usize::from(value))
    }

    /// First byte whose membership equals `member`.
    pub(crate) fn position(&self, haystack: &[u8], member: bool) -> Option<usize> {
        bitwise::position(haystack, |value| self.contains(value) == member)
    }

    /// Last byte whose membership equals `member`.
    pub(crate) fn rposition(&self, haystack: &[u8], member: bool) -> Option<usize> {
        bitwise::rposition(haystack, |value| self.contains(value) == member)
    }
}

/// A precomputed set of values, for repeated "any of" and "none of" searches.
///
/// Building the set costs one pass over the needle values; each membership test afterwards is a
/// single bit lookup, no matter how many values the set holds. The full element value is compared,
/// so a `u16` haystack value never matches a needle merely because its low byte does.
///
/// # Examples
///
/// ```
/// use memview::{ReadOnlyView, ReadView, SearchValues};
///
/// let vowels = SearchValues::new(b"aeiou");
/// let text = ReadOnlyView::new(b"rhythm and blues");
///
/// assert_eq!(text.index_of_any_values(&vowels), Some(7));
/// assert_eq!(text.last_index_of_any_values(&vowels), Some(14));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SearchValues<T: SearchElement> {
    bitmap: Bitmap,
    count: usize,
    _element: std::marker::PhantomData<fn(T)>,
}

impl<T: SearchElement> SearchValues<T> {
    /// Builds the set from `values`. Duplicates are allowed and have no effect.
    #[must_use]
    pub fn new(values: &[T]) -> Self {
        let ascii = values.iter().all(|value| value.code() < ASCII_LIMIT);

        let bitmap = if ascii {
            let mut bits = [0_u64; 2];
            for value in values {
                set_bit(&mut bits, value.code());
            }
            Bitmap::Ascii(bits)
        } else {
            let mut bits = vec![0_u64; T::CARDINALITY / 64].into_boxed_slice();
            for value in values {
                set_bit(&mut bits, value.code());
            }
            Bitmap::Full(bits)
        };

        let count = match &bitmap {
            Bitmap::Ascii(bits) => bits.iter().map(|word| word.count_ones() as usize).sum(),
            Bitmap::Full(bits) => bits.iter().map(|word| word.count_ones() as usize).sum(),
        };

        #[cfg(any(feature = "logs", test))]
        tracing::event!(
            name: "memview.search_values.built",
            tracing::Level::TRACE,
            strategy = %bitmap.strategy(),
            needles = count,
            "search values built",
        );

        Self {
            bitmap,
            count,
            _element: std::marker::PhantomData,
        }
    }

    /// Number of distinct values in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Whether the set holds no values, in which case nothing ever matches.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether `value` is in the set.
    #[must_use]
    #[inline]
    pub fn contains(&self, value: T) -> bool {
        let code = value.code();

        match &self.bitmap {
            Bitmap::Ascii(bits) => code < ASCII_LIMIT && test_bit(bits, code),
            Bitmap::Full(bits) => test_bit(bits, code),
        }
    }

    /// Index of the first element of `haystack` that is in the set.
    #[must_use]
    pub fn index_of_any(&self, haystack: &[T]) -> Option<usize> {
        bitwise::position(haystack, |value| self.contains(value))
    }

    /// Index of the first element of `haystack` that is not in the set.
    #[must_use]
    pub fn index_of_any_except(&self, haystack: &[T]) -> Option<usize> {
        bitwise::position(haystack, |value| !self.contains(value))
    }

    /// Index of the last element of `haystack` that is in the set.
    #[must_use]
    pub fn last_index_of_any(&self, haystack: &[T]) -> Option<usize> {
        bitwise::rposition(haystack, |value| self.contains(value))
    }

    /// Index of the last element of `haystack` that is not in the set.
    #[must_use]
    pub fn last_index_of_any_except(&self, haystack: &[T]) -> Option<usize> {
        bitwise::rposition(haystack, |value| !self.contains(value))
    }
}

impl<T: SearchElement> fmt::Debug for SearchValues<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchValues")
            .field("strategy", &self.bitmap.strategy())
            .field("len", &self.count)
            .finish()
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use testing_aids::LogCapture;

    use super::*;

    static_assertions::assert_impl_all!(SearchValues<u8>: Send, Sync, Clone);
    static_assertions::assert_impl_all!(SearchValues<u16>: Send, Sync, Clone);

    #[test]
    fn ascii_needles_do_not_alias_high_bytes() {
        let values = SearchValues::<u16>::new(&[u16::from(b'a'), u16::from(b'z')]);
        let haystack = [0x0161_u16, 0x017A, 0x0061];

        assert!(!values.contains(0x0161));
        assert!(values.contains(0x61));
        assert_eq!(values.index_of_any(&haystack), Some(2));
        assert_eq!(values.index_of_any_except(&haystack), Some(0));
    }

    #[test]
    fn zero_is_an_ordinary_needle() {
        let values = SearchValues::<u8>::new(&[0, b'\n']);
        let haystack = b"line\0one\ntwo";

        assert_eq!(values.len(), 2);
        assert_eq!(values.index_of_any(haystack), Some(4));
        assert_eq!(values.last_index_of_any(haystack), Some(8));

        let without_zero = SearchValues::<u8>::new(b"\n");
        assert!(!without_zero.contains(0));
    }

    #[test]
    fn full_range_sets() {
        let values = SearchValues::<u16>::new(&[0x20AC, 0xFFFF, u16::from(b'a')]);

        assert!(values.contains(0xFFFF));
        assert!(values.contains(u16::from(b'a')));
        assert!(!values.contains(0x20AD));
        assert_eq!(values.last_index_of_any(&[0xFFFF, 1, 2]), Some(0));
        assert_eq!(values.last_index_of_any_except(&[1, 0x20AC, 0xFFFF]), Some(0));

        let bytes = SearchValues::<u8>::new(&[0xFF, 0x80, b'x']);
        assert!(bytes.contains(0x80));
        assert!(!bytes.contains(0x81));
        assert_eq!(format!("{bytes:?}"), "SearchValues { strategy: \"full\", len: 3 }");
    }

    #[test]
    fn empty_set_matches_nothing() {
        let values = SearchValues::<u8>::new(&[]);

        assert!(values.is_empty());
        assert_eq!(values.index_of_any(b"abc"), None);
        assert_eq!(values.index_of_any_except(b"abc"), Some(0));
        assert_eq!(values.last_index_of_any_except(b"abc"), Some(2));
    }

    #[test]
    fn duplicates_count_once() {
        let values = SearchValues::<u8>::new(b"aaab");
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn build_is_logged() {
        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        _ = SearchValues::<u16>::new(&[1, 2, 300]);

        capture.assert_contains("search values built");
        capture.assert_contains("strategy=full");
        capture.assert_contains("needles=3");
    }
}
