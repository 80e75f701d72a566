// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! In-place mutation and copying.
//!
//! The copy and replace routines work on raw pointers rather than slices because the source and
//! destination may be views over the same memory, in which case forming a shared and a mutable
//! slice over them at once would be undefined behavior.

use std::ptr::{self, NonNull};

use crate::kind::ElementKind;
use crate::offset::{self, element_ptr};

/// Resets every element to its default value.
///
/// Bitwise elements default to all-zero bytes and are cleared with a single fill. Everything else is
/// assigned `T::default()`, which drops the previous value in each slot.
pub(crate) fn clear<T: Default>(elements: &mut [T]) {
    if ElementKind::of::<T>().is_bitwise() {
        // SAFETY: The all-zero pattern is the default value of every bitwise type, and the slice
        // is valid for writes of its whole length.
        unsafe { ptr::write_bytes(elements.as_mut_ptr(), 0, elements.len()) };
        return;
    }

    elements.fill_with(T::default);
}

pub(crate) fn fill<T: Clone>(elements: &mut [T], value: &T) {
    elements.fill(value.clone());
}

pub(crate) fn replace<T: PartialEq + Clone>(elements: &mut [T], old: &T, new: &T) {
    for element in elements.iter_mut().filter(|element| **element == *old) {
        element.clone_from(new);
    }
}

/// Copies `len` elements from `src` to `dst`, correctly even when the two ranges overlap.
///
/// # Safety
///
/// `src` must be valid for reads and `dst` valid for writes of `len` initialized elements.
pub(crate) unsafe fn copy_overlapping<T: Clone>(src: NonNull<T>, dst: NonNull<T>, len: usize) {
    if src == dst || len == 0 {
        return;
    }

    if ElementKind::of::<T>().is_bitwise() {
        // SAFETY: Bitwise elements are trivially copyable and `ptr::copy` allows overlap.
        unsafe { ptr::copy(src.as_ptr(), dst.as_ptr(), len) };
        return;
    }

    let backwards = offset::ranges_overlap(src.as_ptr(), len, dst.as_ptr(), len) && dst > src;

    if backwards {
        // The destination starts inside the source, so copy back to front to read every source
        // element before it is overwritten.
        for index in (0..len).rev() {
            // SAFETY: The caller guarantees both ranges are valid for `len` elements.
            unsafe { copy_one(src, dst, index) };
        }
    } else {
        for index in 0..len {
            // SAFETY: As above.
            unsafe { copy_one(src, dst, index) };
        }
    }
}

/// # Safety
///
/// `index` must be within both ranges.
#[inline]
unsafe fn copy_one<T: Clone>(src: NonNull<T>, dst: NonNull<T>, index: usize) {
    // SAFETY: Forwarding the caller's guarantee that `index` is in bounds.
    let from = unsafe { element_ptr(src, index) };
    // SAFETY: As above.
    let to = unsafe { element_ptr(dst, index) };

    // SAFETY: `from` is valid for reads; the reference ends before `to` is written.
    let value = unsafe { from.as_ref() }.clone();

    // SAFETY: `to` is valid for writes and holds an initialized element, which is dropped here.
    unsafe { *to.as_ptr() = value };
}

/// Copies `len` elements from `src` to `dst`, writing `new` wherever the source holds `old`.
///
/// When `src == dst` this is an in-place replacement.
///
/// # Safety
///
/// Same as [`copy_overlapping`], and additionally the two ranges must either not overlap or start
/// at the same address.
pub(crate) unsafe fn replace_into<T: PartialEq + Clone>(src: NonNull<T>, dst: NonNull<T>, len: usize, old: &T, new: &T) {
    let in_place = src == dst;

    for index in 0..len {
        // SAFETY: The caller guarantees both ranges are valid for `len` elements.
        let from = unsafe { element_ptr(src, index) };
        // SAFETY: As above.
        let to = unsafe { element_ptr(dst, index) };

        // SAFETY: `from` is valid for reads; the reference ends before `to` is written.
        let matched = unsafe { from.as_ref() } == old;

        if matched {
            // SAFETY: `to` is valid for writes and holds an initialized element.
            unsafe { (*to.as_ptr()).clone_from(new) };
        } else if !in_place {
            // SAFETY: As above.
            unsafe { copy_one(src, dst, index) };
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn clear_zeroes_bitwise_elements() {
        let mut values = [7_i32, -1, 99];
        clear(&mut values);
        assert_eq!(values, [0, 0, 0]);

        let mut flags = [true, false, true];
        clear(&mut flags);
        assert_eq!(flags, [false; 3]);

        let mut chars = ['x', 'y'];
        clear(&mut chars);
        assert_eq!(chars, ['\0', '\0']);
    }

    #[test]
    fn clear_drops_owned_values() {
        let shared = Arc::new(5);
        let mut values = vec![Some(Arc::clone(&shared)), None, Some(Arc::clone(&shared))];
        assert_eq!(Arc::strong_count(&shared), 3);

        clear(&mut values);

        assert_eq!(values, [None, None, None]);
        assert_eq!(Arc::strong_count(&shared), 1);
    }

    #[test]
    fn clear_writes_default_for_plain_types() {
        let mut values = [1.5_f64, -0.0, f64::NAN];
        clear(&mut values);
        assert!(values.iter().all(|&v| v.to_bits() == 0));
    }

    #[test]
    fn fill_and_replace() {
        let mut words = vec!["a".to_owned(), "b".to_owned(), "a".to_owned()];

        replace(&mut words, &"a".to_owned(), &"z".to_owned());
        assert_eq!(words, ["z", "b", "z"]);

        fill(&mut words, &"q".to_owned());
        assert_eq!(words, ["q", "q", "q"]);
    }

    fn copy_within<T: Clone>(data: &mut [T], from: usize, to: usize, len: usize) {
        assert!(from + len <= data.len() && to + len <= data.len());
        let base = NonNull::from(&mut *data).cast::<T>();

        // SAFETY: Both ranges were checked to lie within `data`.
        unsafe { copy_overlapping(element_ptr(base, from), element_ptr(base, to), len) };
    }

    #[test]
    fn overlapping_copy_forward_and_backward() {
        let mut data = [90, 91, 92, 93, 94, 95, 96, 97];
        copy_within(&mut data, 1, 2, 6);
        assert_eq!(data, [90, 91, 91, 92, 93, 94, 95, 96]);

        let mut data = [90, 91, 92, 93, 94, 95, 96, 97];
        copy_within(&mut data, 2, 1, 6);
        assert_eq!(data, [90, 92, 93, 94, 95, 96, 97, 97]);
    }

    #[test]
    fn overlapping_copy_of_owned_values() {
        let mut data: Vec<String> = (0..8).map(|n| n.to_string()).collect();
        copy_within(&mut data, 1, 2, 6);
        assert_eq!(data, ["0", "1", "1", "2", "3", "4", "5", "6"]);

        let mut data: Vec<String> = (0..8).map(|n| n.to_string()).collect();
        copy_within(&mut data, 3, 0, 5);
        assert_eq!(data, ["3", "4", "5", "6", "7", "5", "6", "7"]);

        let mut data: Vec<String> = (0..3).map(|n| n.to_string()).collect();
        copy_within(&mut data, 0, 0, 3);
        assert_eq!(data, ["0", "1", "2"]);
    }

    #[test]
    fn replace_into_separate_destination() {
        let src = [1, 2, 1, 3];
        let mut dst = [0; 5];

        // SAFETY: Distinct arrays, each at least four elements long.
        unsafe {
            replace_into(NonNull::from(&src).cast::<i32>(), NonNull::from(&mut dst).cast::<i32>(), 4, &1, &8);
        }

        assert_eq!(dst, [8, 2, 8, 3, 0]);
    }

    #[test]
    fn replace_into_same_storage() {
        let mut data = vec![Some("x".to_owned()), None, Some("x".to_owned())];
        let base = NonNull::from(&mut data[..]).cast::<Option<String>>();

        // SAFETY: Source and destination are the same three-element range.
        unsafe { replace_into(base, base, 3, &None, &Some("y".to_owned())) };

        assert_eq!(data, [Some("x".to_owned()), Some("y".to_owned()), Some("x".to_owned())]);
    }
}
