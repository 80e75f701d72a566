// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Single and multi-value search.
//!
//! Every function dispatches once on the element kind: bitwise elements take the batched word
//! path, all other elements are compared one at a time, front to back (or back to front), stopping
//! at the first match. The per-element path never looks at an element past the one it returns.

use super::bitwise::{self, Batched, SearchWord, with_word};
use crate::search_values::ByteSet;

pub(crate) fn index_of<T: PartialEq>(haystack: &[T], value: &T) -> Option<usize> {
    with_word!(T => |W| {
        // SAFETY: `with_word!` selected `W` for `T`.
        let words = unsafe { bitwise::cast_slice::<T, W>(haystack) };
        // SAFETY: As above.
        let value = unsafe { bitwise::cast_value::<T, W>(value) };
        W::find(words, value)
    } else {
        haystack.iter().position(|element| element == value)
    })
}

pub(crate) fn last_index_of<T: PartialEq>(haystack: &[T], value: &T) -> Option<usize> {
    with_word!(T => |W| {
        // SAFETY: `with_word!` selected `W` for `T`.
        let words = unsafe { bitwise::cast_slice::<T, W>(haystack) };
        // SAFETY: As above.
        let value = unsafe { bitwise::cast_value::<T, W>(value) };
        W::rfind(words, value)
    } else {
        haystack.iter().rposition(|element| element == value)
    })
}

pub(crate) fn index_of_any2<T: PartialEq>(haystack: &[T], a: &T, b: &T) -> Option<usize> {
    with_word!(T => |W| {
        // SAFETY: `with_word!` selected `W` for `T`.
        let words = unsafe { bitwise::cast_slice::<T, W>(haystack) };
        // SAFETY: As above.
        let word = |value: &T| unsafe { bitwise::cast_value::<T, W>(value) };
        W::find2(words, word(a), word(b))
    } else {
        haystack.iter().position(|element| element == a || element == b)
    })
}

pub(crate) fn last_index_of_any2<T: PartialEq>(haystack: &[T], a: &T, b: &T) -> Option<usize> {
    with_word!(T => |W| {
        // SAFETY: `with_word!` selected `W` for `T`.
        let words = unsafe { bitwise::cast_slice::<T, W>(haystack) };
        // SAFETY: As above.
        let word = |value: &T| unsafe { bitwise::cast_value::<T, W>(value) };
        W::rfind2(words, word(a), word(b))
    } else {
        haystack.iter().rposition(|element| element == a || element == b)
    })
}

pub(crate) fn index_of_any3<T: PartialEq>(haystack: &[T], a: &T, b: &T, c: &T) -> Option<usize> {
    with_word!(T => |W| {
        // SAFETY: `with_word!` selected `W` for `T`.
        let words = unsafe { bitwise::cast_slice::<T, W>(haystack) };
        // SAFETY: As above.
        let word = |value: &T| unsafe { bitwise::cast_value::<T, W>(value) };
        W::find3(words, word(a), word(b), word(c))
    } else {
        haystack.iter().position(|element| element == a || element == b || element == c)
    })
}

pub(crate) fn last_index_of_any3<T: PartialEq>(haystack: &[T], a: &T, b: &T, c: &T) -> Option<usize> {
    with_word!(T => |W| {
        // SAFETY: `with_word!` selected `W` for `T`.
        let words = unsafe { bitwise::cast_slice::<T, W>(haystack) };
        // SAFETY: As above.
        let word = |value: &T| unsafe { bitwise::cast_value::<T, W>(value) };
        W::rfind3(words, word(a), word(b), word(c))
    } else {
        haystack.iter().rposition(|element| element == a || element == b || element == c)
    })
}

/// Direction-independent core of the set searches, so that the 0..=3 value shortcuts are shared.
enum Set<'v, T> {
    Empty,
    One(&'v T),
    Two(&'v T, &'v T),
    Three(&'v T, &'v T, &'v T),
    Many(&'v [T]),
}

impl<'v, T: PartialEq> Set<'v, T> {
    fn new(values: &'v [T]) -> Self {
        match values {
            [] => Self::Empty,
            [a] => Self::One(a),
            [a, b] => Self::Two(a, b),
            [a, b, c] => Self::Three(a, b, c),
            many => Self::Many(many),
        }
    }

    fn contains(&self, element: &T) -> bool {
        match *self {
            Self::Empty => false,
            Self::One(a) => element == a,
            Self::Two(a, b) => element == a || element == b,
            Self::Three(a, b, c) => element == a || element == b || element == c,
            Self::Many(values) => values.iter().any(|value| element == value),
        }
    }
}

/// Builds a byte bitmap for single-byte bitwise elements, which turns every membership test into a
/// single lookup regardless of the number of values.
fn byte_set<T>(values: &[T]) -> Option<ByteSet> {
    with_word!(T => |W| {
        if size_of::<W>() != 1 {
            return None;
        }

        // SAFETY: `with_word!` selected a one-byte word for `T`, so its bytes are its words.
        let bytes = unsafe { bitwise::as_bytes(values) };
        Some(ByteSet::new(bytes))
    } else {
        None
    })
}

pub(crate) fn index_of_any<T: PartialEq>(haystack: &[T], values: &[T]) -> Option<usize> {
    match Set::new(values) {
        Set::Empty => None,
        Set::One(a) => index_of(haystack, a),
        Set::Two(a, b) => index_of_any2(haystack, a, b),
        Set::Three(a, b, c) => index_of_any3(haystack, a, b, c),
        set @ Set::Many(_) => match byte_set(values) {
            // SAFETY: `byte_set` only succeeds for one-byte bitwise elements.
            Some(bytes) => bytes.position(unsafe { bitwise::as_bytes(haystack) }, true),
            None => haystack.iter().position(|element| set.contains(element)),
        },
    }
}

pub(crate) fn last_index_of_any<T: PartialEq>(haystack: &[T], values: &[T]) -> Option<usize> {
    match Set::new(values) {
        Set::Empty => None,
        Set::One(a) => last_index_of(haystack, a),
        Set::Two(a, b) => last_index_of_any2(haystack, a, b),
        Set::Three(a, b, c) => last_index_of_any3(haystack, a, b, c),
        set @ Set::Many(_) => match byte_set(values) {
            // SAFETY: `byte_set` only succeeds for one-byte bitwise elements.
            Some(bytes) => bytes.rposition(unsafe { bitwise::as_bytes(haystack) }, true),
            None => haystack.iter().rposition(|element| set.contains(element)),
        },
    }
}

pub(crate) fn index_of_except<T: PartialEq>(haystack: &[T], value: &T) -> Option<usize> {
    except(haystack, &Set::One(value), false)
}

pub(crate) fn last_index_of_except<T: PartialEq>(haystack: &[T], value: &T) -> Option<usize> {
    except(haystack, &Set::One(value), true)
}

pub(crate) fn index_of_any_except2<T: PartialEq>(haystack: &[T], a: &T, b: &T) -> Option<usize> {
    except(haystack, &Set::Two(a, b), false)
}

pub(crate) fn last_index_of_any_except2<T: PartialEq>(haystack: &[T], a: &T, b: &T) -> Option<usize> {
    except(haystack, &Set::Two(a, b), true)
}

pub(crate) fn index_of_any_except3<T: PartialEq>(haystack: &[T], a: &T, b: &T, c: &T) -> Option<usize> {
    except(haystack, &Set::Three(a, b, c), false)
}

pub(crate) fn last_index_of_any_except3<T: PartialEq>(haystack: &[T], a: &T, b: &T, c: &T) -> Option<usize> {
    except(haystack, &Set::Three(a, b, c), true)
}

/// First element that is not in `values`. With no values every element qualifies.
pub(crate) fn index_of_any_except<T: PartialEq>(haystack: &[T], values: &[T]) -> Option<usize> {
    except(haystack, &Set::new(values), false)
}

/// Last element that is not in `values`. With no values every element qualifies.
pub(crate) fn last_index_of_any_except<T: PartialEq>(haystack: &[T], values: &[T]) -> Option<usize> {
    except(haystack, &Set::new(values), true)
}

fn except<T: PartialEq>(haystack: &[T], set: &Set<'_, T>, backwards: bool) -> Option<usize> {
    if let Set::Many(values) = *set
        && let Some(bytes) = byte_set(values)
    {
        // SAFETY: `byte_set` only succeeds for one-byte bitwise elements.
        let haystack = unsafe { bitwise::as_bytes(haystack) };

        return if backwards {
            bytes.rposition(haystack, false)
        } else {
            bytes.position(haystack, false)
        };
    }

    with_word!(T => |W| {
        if let Batched::Done(found) = except_words::<T, W>(haystack, set, backwards) {
            return found;
        }
    } else {});

    if backwards {
        haystack.iter().rposition(|element| !set.contains(element))
    } else {
        haystack.iter().position(|element| !set.contains(element))
    }
}

/// Batched "not any of" search for up to three inline values.
#[expect(clippy::nonminimal_bool, reason = "branch-free lane mask")]
fn except_words<T, W: Copy + Eq>(haystack: &[T], set: &Set<'_, T>, backwards: bool) -> Batched {
    // SAFETY: Only called from within `with_word!`, which selected `W` for `T`.
    let words = unsafe { bitwise::cast_slice::<T, W>(haystack) };
    // SAFETY: As above.
    let word = |value: &T| unsafe { bitwise::cast_value::<T, W>(value) };

    let found = match *set {
        Set::Empty => search_words(words, backwards, |_| true),
        Set::One(a) => {
            let a = word(a);
            search_words(words, backwards, |w| w != a)
        }
        Set::Two(a, b) => {
            let (a, b) = (word(a), word(b));
            search_words(words, backwards, |w| (w != a) & (w != b))
        }
        Set::Three(a, b, c) => {
            let (a, b, c) = (word(a), word(b), word(c));
            search_words(words, backwards, |w| (w != a) & (w != b) & (w != c))
        }
        Set::Many(_) => return Batched::Unhandled,
    };

    Batched::Done(found)
}

fn search_words<W: Copy>(words: &[W], backwards: bool, matches: impl FnMut(W) -> bool) -> Option<usize> {
    if backwards {
        bitwise::rposition(words, matches)
    } else {
        bitwise::position(words, matches)
    }
}

pub(crate) fn index_of_in_range<T: PartialOrd>(haystack: &[T], low: &T, high: &T, inside: bool) -> Option<usize> {
    haystack.iter().position(|element| in_range(element, low, high) == inside)
}

pub(crate) fn last_index_of_in_range<T: PartialOrd>(haystack: &[T], low: &T, high: &T, inside: bool) -> Option<usize> {
    haystack.iter().rposition(|element| in_range(element, low, high) == inside)
}

#[inline]
fn in_range<T: PartialOrd>(element: &T, low: &T, high: &T) -> bool {
    low <= element && element <= high
}

pub(crate) fn count<T: PartialEq>(haystack: &[T], value: &T) -> usize {
    with_word!(T => |W| {
        // SAFETY: `with_word!` selected `W` for `T`.
        let words = unsafe { bitwise::cast_slice::<T, W>(haystack) };
        // SAFETY: As above.
        let value = unsafe { bitwise::cast_value::<T, W>(value) };
        bitwise::count(words, |w| w == value)
    } else {
        haystack.iter().filter(|&element| element == value).count()
    })
}
