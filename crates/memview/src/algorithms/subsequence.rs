// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Needle-in-haystack search.
//!
//! The first needle element is located with the single-value search, restricted to start positions
//! that leave room for the whole needle, and the rest of the needle is then compared in place. On a
//! mismatch the search restarts one past the candidate.

use super::bitwise::{self, Batched, SearchWord, with_word};
use super::{compare, search};

pub(crate) fn index_of_seq<T: PartialEq>(haystack: &[T], needle: &[T]) -> Option<usize> {
    let Some((first, rest)) = needle.split_first() else {
        return Some(0);
    };

    with_word!(T => |W| {
        // SAFETY: `with_word!` selected `W` for `T`.
        let words = unsafe { bitwise::cast_slice::<T, W>(haystack) };
        // SAFETY: As above.
        let needle_words = unsafe { bitwise::cast_slice::<T, W>(needle) };
        if let Batched::Done(found) = W::find_seq(words, needle_words) {
            return found;
        }
    } else {});

    // Candidate starts are [0, search_space); a longer needle leaves no candidates at all.
    let search_space = haystack.len().checked_sub(rest.len())?;
    let mut offset = 0;

    while offset < search_space {
        let candidate = offset + search::index_of(&haystack[offset..search_space], first)?;
        let tail_start = candidate + 1;

        if compare::sequence_equal(&haystack[tail_start..tail_start + rest.len()], rest) {
            return Some(candidate);
        }

        offset = tail_start;
    }

    None
}

pub(crate) fn last_index_of_seq<T: PartialEq>(haystack: &[T], needle: &[T]) -> Option<usize> {
    // An empty needle is found after everything.
    let Some((first, rest)) = needle.split_first() else {
        return Some(haystack.len());
    };

    with_word!(T => |W| {
        // SAFETY: `with_word!` selected `W` for `T`.
        let words = unsafe { bitwise::cast_slice::<T, W>(haystack) };
        // SAFETY: As above.
        let needle_words = unsafe { bitwise::cast_slice::<T, W>(needle) };
        if let Batched::Done(found) = W::rfind_seq(words, needle_words) {
            return found;
        }
    } else {});

    let mut end = haystack.len().checked_sub(rest.len())?;

    while end > 0 {
        let candidate = search::last_index_of(&haystack[..end], first)?;
        let tail_start = candidate + 1;

        if compare::sequence_equal(&haystack[tail_start..tail_start + rest.len()], rest) {
            return Some(candidate);
        }

        end = candidate;
    }

    None
}
