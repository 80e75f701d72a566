// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Structural comparison of two sequences.

use std::cmp::Ordering;

use super::bitwise;
use crate::kind::ElementKind;

pub(crate) fn sequence_equal<T: PartialEq>(left: &[T], right: &[T]) -> bool {
    if left.len() != right.len() {
        return false;
    }

    if ElementKind::of::<T>().is_bitwise() {
        // SAFETY: `T` is bitwise, so it has no padding and equality is byte equality.
        let left = unsafe { bitwise::as_bytes(left) };
        // SAFETY: As above.
        let right = unsafe { bitwise::as_bytes(right) };
        return left == right;
    }

    left.iter().zip(right).all(|(a, b)| a == b)
}

pub(crate) fn sequence_equal_by<T>(left: &[T], right: &[T], mut eq: impl FnMut(&T, &T) -> bool) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(a, b)| eq(a, b))
}

/// Lexicographic order: the first unequal pair decides, otherwise the shorter sequence is less.
pub(crate) fn sequence_compare_to<T: Ord>(left: &[T], right: &[T]) -> Ordering {
    sequence_compare_to_by(left, right, Ord::cmp)
}

pub(crate) fn sequence_compare_to_by<T>(left: &[T], right: &[T], mut compare: impl FnMut(&T, &T) -> Ordering) -> Ordering {
    left.iter()
        .zip(right)
        .map(|(a, b)| compare(a, b))
        .find(|&ordering| ordering != Ordering::Equal)
        .unwrap_or_else(|| left.len().cmp(&right.len()))
}

/// Number of leading positions at which the two sequences hold equal elements.
pub(crate) fn common_prefix_length<T: PartialEq>(left: &[T], right: &[T]) -> usize {
    let shared = left.len().min(right.len());
    let (left, right) = (&left[..shared], &right[..shared]);

    if ElementKind::of::<T>().is_bitwise() && size_of::<T>() != 0 {
        // SAFETY: `T` is bitwise, so it has no padding and equality is byte equality.
        let left_bytes = unsafe { bitwise::as_bytes(left) };
        // SAFETY: As above.
        let right_bytes = unsafe { bitwise::as_bytes(right) };
        return bitwise::first_mismatch(left_bytes, right_bytes) / size_of::<T>();
    }

    left.iter().zip(right).take_while(|(a, b)| a == b).count()
}

pub(crate) fn common_prefix_length_by<T>(left: &[T], right: &[T], mut eq: impl FnMut(&T, &T) -> bool) -> usize {
    left.iter().zip(right).take_while(|(a, b)| eq(a, b)).count()
}

pub(crate) fn starts_with_by<T>(haystack: &[T], prefix: &[T], eq: impl FnMut(&T, &T) -> bool) -> bool {
    haystack.len() >= prefix.len() && sequence_equal_by(&haystack[..prefix.len()], prefix, eq)
}

pub(crate) fn ends_with_by<T>(haystack: &[T], suffix: &[T], eq: impl FnMut(&T, &T) -> bool) -> bool {
    haystack
        .len()
        .checked_sub(suffix.len())
        .is_some_and(|start| sequence_equal_by(&haystack[start..], suffix, eq))
}

pub(crate) fn starts_with<T: PartialEq>(haystack: &[T], prefix: &[T]) -> bool {
    haystack.len() >= prefix.len() && sequence_equal(&haystack[..prefix.len()], prefix)
}

pub(crate) fn ends_with<T: PartialEq>(haystack: &[T], suffix: &[T]) -> bool {
    haystack
        .len()
        .checked_sub(suffix.len())
        .is_some_and(|start| sequence_equal(&haystack[start..], suffix))
}
