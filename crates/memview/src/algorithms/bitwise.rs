// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Batched comparison of bitwise-comparable elements.
//!
//! A bitwise element is reinterpreted as the unsigned word of the same layout and the haystack is
//! processed in chunks of [`LANES`] words, building a match mask per chunk with straight-line code
//! the compiler can vectorize. The tail that does not fill a whole chunk is scanned one word at a
//! time. Single-byte words go through `memchr`, which picks the widest SIMD available at runtime.

use std::{ptr, slice};

/// Number of words examined per batch. Masks are built in a `u32`, so this must not exceed 32.
pub(crate) const LANES: usize = 16;

const _: () = assert!(LANES <= u32::BITS as usize);

/// Dispatches on the word type matching `$t`, binding it as the type alias `$w` within `$body`.
///
/// Falls through to `$fallback` for any type that is not bitwise-comparable.
macro_rules! with_word {
    ($t:ty => |$w:ident| $body:block else $fallback:block) => {
        match $crate::kind::Word::of::<$t>() {
            Some($crate::kind::Word::W8) => {
                type $w = u8;
                $body
            }
            Some($crate::kind::Word::W16) => {
                type $w = u16;
                $body
            }
            Some($crate::kind::Word::W32) => {
                type $w = u32;
                $body
            }
            Some($crate::kind::Word::W64) => {
                type $w = u64;
                $body
            }
            Some($crate::kind::Word::W128) => {
                type $w = u128;
                $body
            }
            _ => $fallback,
        }
    };
}

pub(crate) use with_word;

/// Reinterprets a slice of bitwise elements as a slice of words.
///
/// # Safety
///
/// `W` must be the word that `Word::of::<T>()` selects for `T`.
#[inline]
pub(crate) unsafe fn cast_slice<T, W>(elements: &[T]) -> &[W] {
    debug_assert_eq!(size_of::<T>(), size_of::<W>());
    debug_assert_eq!(align_of::<T>(), align_of::<W>());

    // SAFETY: Same size and alignment, and every bit pattern of a bitwise element is a valid word.
    unsafe { slice::from_raw_parts(elements.as_ptr().cast::<W>(), elements.len()) }
}

/// Reinterprets one bitwise element as its word.
///
/// # Safety
///
/// Same as [`cast_slice`].
#[inline]
pub(crate) unsafe fn cast_value<T, W: Copy>(value: &T) -> W {
    // SAFETY: Same size and alignment, and every bit pattern of a bitwise element is a valid word.
    unsafe { ptr::from_ref(value).cast::<W>().read() }
}

/// Views the bytes of a slice of bitwise elements.
///
/// # Safety
///
/// `T` must be bitwise-comparable, which guarantees it has no padding bytes.
#[inline]
pub(crate) unsafe fn as_bytes<T>(elements: &[T]) -> &[u8] {
    let Some(len) = crate::offset::byte_len::<T>(elements.len()) else {
        unreachable!("a live slice never spans more than isize::MAX bytes");
    };

    // SAFETY: The caller guarantees there is no padding, so every byte is initialized.
    unsafe { slice::from_raw_parts(elements.as_ptr().cast::<u8>(), len) }
}

#[inline]
fn lane_mask<W: Copy>(chunk: &[W], mut matches: impl FnMut(W) -> bool) -> u32 {
    chunk
        .iter()
        .enumerate()
        .fold(0, |mask, (lane, &word)| mask | (u32::from(matches(word)) << lane))
}

/// First index whose word satisfies `matches`.
pub(crate) fn position<W: Copy>(words: &[W], mut matches: impl FnMut(W) -> bool) -> Option<usize> {
    let mut chunks = words.chunks_exact(LANES);
    let mut base = 0;

    for chunk in &mut chunks {
        let mask = lane_mask(chunk, &mut matches);
        if mask != 0 {
            return Some(base + mask.trailing_zeros() as usize);
        }

        base += LANES;
    }

    chunks
        .remainder()
        .iter()
        .position(|&word| matches(word))
        .map(|index| base + index)
}

/// Last index whose word satisfies `matches`.
pub(crate) fn rposition<W: Copy>(words: &[W], mut matches: impl FnMut(W) -> bool) -> Option<usize> {
    let mut chunks = words.rchunks_exact(LANES);
    let mut end = words.len();

    for chunk in &mut chunks {
        let mask = lane_mask(chunk, &mut matches);
        let start = end - LANES;

        if mask != 0 {
            return Some(start + (u32::BITS - 1 - mask.leading_zeros()) as usize);
        }

        end = start;
    }

    chunks.remainder().iter().rposition(|&word| matches(word))
}

/// Number of words satisfying `matches`.
pub(crate) fn count<W: Copy>(words: &[W], mut matches: impl FnMut(W) -> bool) -> usize {
    let mut chunks = words.chunks_exact(LANES);
    let mut total = 0;

    for chunk in &mut chunks {
        total += lane_mask(chunk, &mut matches).count_ones() as usize;
    }

    total + chunks.remainder().iter().filter(|&&word| matches(word)).count()
}

/// Index of the first position at which two equally long byte sequences differ, or their length.
pub(crate) fn first_mismatch(left: &[u8], right: &[u8]) -> usize {
    const CHUNK: usize = 64;

    debug_assert_eq!(left.len(), right.len());

    let mut offset = 0;
    for (a, b) in left.chunks(CHUNK).zip(right.chunks(CHUNK)) {
        if a == b {
            offset += a.len();
            continue;
        }

        return offset + a.iter().zip(b).take_while(|(x, y)| x == y).count();
    }

    offset
}

/// Result of a batched kernel that only has a form for some inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Batched {
    /// The kernel ran and this is its answer.
    Done(Option<usize>),
    /// No batched form exists; the caller takes the per-element path.
    Unhandled,
}

/// Search primitives over words. Single bytes are served by `memchr`, wider words by the
/// chunked loops above.
#[expect(clippy::nonminimal_bool, reason = "branch-free lane mask")]
pub(crate) trait SearchWord: Copy + Eq {
    fn find(words: &[Self], value: Self) -> Option<usize> {
        position(words, |w| w == value)
    }

    fn rfind(words: &[Self], value: Self) -> Option<usize> {
        rposition(words, |w| w == value)
    }

    fn find2(words: &[Self], a: Self, b: Self) -> Option<usize> {
        position(words, |w| (w == a) | (w == b))
    }

    fn rfind2(words: &[Self], a: Self, b: Self) -> Option<usize> {
        rposition(words, |w| (w == a) | (w == b))
    }

    fn find3(words: &[Self], a: Self, b: Self, c: Self) -> Option<usize> {
        position(words, |w| (w == a) | (w == b) | (w == c))
    }

    fn rfind3(words: &[Self], a: Self, b: Self, c: Self) -> Option<usize> {
        rposition(words, |w| (w == a) | (w == b) | (w == c))
    }

    fn find_seq(words: &[Self], needle: &[Self]) -> Batched {
        let _ = (words, needle);
        Batched::Unhandled
    }

    fn rfind_seq(words: &[Self], needle: &[Self]) -> Batched {
        let _ = (words, needle);
        Batched::Unhandled
    }
}

impl SearchWord for u8 {
    fn find(words: &[Self], value: Self) -> Option<usize> {
        memchr::memchr(value, words)
    }

    fn rfind(words: &[Self], value: Self) -> Option<usize> {
        memchr::memrchr(value, words)
    }

    fn find2(words: &[Self], a: Self, b: Self) -> Option<usize> {
        memchr::memchr2(a, b, words)
    }

    fn rfind2(words: &[Self], a: Self, b: Self) -> Option<usize> {
        memchr::memrchr2(a, b, words)
    }

    fn find3(words: &[Self], a: Self, b: Self, c: Self) -> Option<usize> {
        memchr::memchr3(a, b, c, words)
    }

    fn rfind3(words: &[Self], a: Self, b: Self, c: Self) -> Option<usize> {
        memchr::memrchr3(a, b, c, words)
    }

    fn find_seq(words: &[Self], needle: &[Self]) -> Batched {
        Batched::Done(memchr::memmem::find(words, needle))
    }

    fn rfind_seq(words: &[Self], needle: &[Self]) -> Batched {
        Batched::Done(memchr::memmem::rfind(words, needle))
    }
}

impl SearchWord for u16 {}
impl SearchWord for u32 {}
impl SearchWord for u64 {}
impl SearchWord for u128 {}
