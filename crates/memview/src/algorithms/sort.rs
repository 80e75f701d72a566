// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Index-based introspective sort.
//!
//! The sort only ever talks to its input through a [`SortTarget`], which compares and swaps
//! positions. That lets the same routine sort a key slice while permuting a second slice in lock step,
//! or sort a permutation of indices without moving any element at all. Stability is not guaranteed.

use std::cmp::Ordering;

use crate::{Error, Result};

/// Partitions at or below this size are finished with insertion sort.
const INSERTION_SORT_THRESHOLD: usize = 16;

/// Something that can be sorted by position.
pub(crate) trait SortTarget {
    fn len(&self) -> usize;

    /// Whether the element at `a` orders strictly before the element at `b`.
    fn less(&mut self, a: usize, b: usize) -> bool;

    fn swap(&mut self, a: usize, b: usize);
}

/// Sorts `target` in place.
pub(crate) fn introsort<S: SortTarget>(target: &mut S) {
    let len = target.len();
    if len < 2 {
        return;
    }

    let depth_limit = 2 * (usize::BITS - len.leading_zeros());
    intro_sort(target, 0, len - 1, depth_limit);
}

/// Sorts the inclusive range `[lo, hi]`.
fn intro_sort<S: SortTarget>(target: &mut S, lo: usize, mut hi: usize, mut depth_limit: u32) {
    while hi > lo {
        let size = hi - lo + 1;

        if size <= INSERTION_SORT_THRESHOLD {
            match size {
                2 => swap_if_greater(target, lo, hi),
                3 => {
                    swap_if_greater(target, lo, hi - 1);
                    swap_if_greater(target, lo, hi);
                    swap_if_greater(target, hi - 1, hi);
                }
                _ => insertion_sort(target, lo, hi),
            }
            return;
        }

        if depth_limit == 0 {
            heapsort(target, lo, hi);
            return;
        }
        depth_limit -= 1;

        let pivot = partition(target, lo, hi);

        // Recurse into the upper part, loop on the lower part.
        intro_sort(target, pivot + 1, hi, depth_limit);
        hi = pivot - 1;
    }
}

#[inline]
fn swap_if_greater<S: SortTarget>(target: &mut S, a: usize, b: usize) {
    if a != b && target.less(b, a) {
        target.swap(a, b);
    }
}

/// Median-of-three partition of `[lo, hi]`, which holds more than three elements.
///
/// Returns the final position of the pivot. It is always within `(lo, hi)`.
fn partition<S: SortTarget>(target: &mut S, lo: usize, hi: usize) -> usize {
    let mid = lo + (hi - lo) / 2;

    swap_if_greater(target, lo, mid);
    swap_if_greater(target, lo, hi);
    swap_if_greater(target, mid, hi);

    // `lo <= pivot <= hi` now holds; park the pivot next to the end so both ends act as sentinels.
    let pivot = hi - 1;
    target.swap(mid, pivot);

    let mut left = lo;
    let mut right = pivot;

    loop {
        while left < pivot {
            left += 1;
            if !target.less(left, pivot) {
                break;
            }
        }

        while right > lo {
            right -= 1;
            if !target.less(pivot, right) {
                break;
            }
        }

        if left >= right {
            break;
        }

        target.swap(left, right);
    }

    if left != pivot {
        target.swap(left, pivot);
    }

    left
}

fn insertion_sort<S: SortTarget>(target: &mut S, lo: usize, hi: usize) {
    for i in lo + 1..=hi {
        let mut j = i;
        while j > lo && target.less(j, j - 1) {
            target.swap(j, j - 1);
            j -= 1;
        }
    }
}

fn heapsort<S: SortTarget>(target: &mut S, lo: usize, hi: usize) {
    let n = hi - lo + 1;

    for i in (1..=n / 2).rev() {
        down_heap(target, i, n, lo);
    }

    for i in (2..=n).rev() {
        target.swap(lo, lo + i - 1);
        down_heap(target, 1, i - 1, lo);
    }
}

/// Sifts the 1-based heap node `i` down within a heap of `n` nodes rooted at `lo`.
fn down_heap<S: SortTarget>(target: &mut S, mut i: usize, n: usize, lo: usize) {
    while i <= n / 2 {
        let mut child = 2 * i;

        if child < n && target.less(lo + child - 1, lo + child) {
            child += 1;
        }

        if !target.less(lo + i - 1, lo + child - 1) {
            break;
        }

        target.swap(lo + i - 1, lo + child - 1);
        i = child;
    }
}

/// Keys sorted by a comparer, with a second slice of the same length permuted alongside.
struct Paired<'k, 'i, K, V, F> {
    keys: &'k mut [K],
    items: &'i mut [V],
    compare: F,
}

impl<K, V, F: FnMut(&K, &K) -> Ordering> SortTarget for Paired<'_, '_, K, V, F> {
    fn len(&self) -> usize {
        self.keys.len()
    }

    fn less(&mut self, a: usize, b: usize) -> bool {
        (self.compare)(&self.keys[a], &self.keys[b]) == Ordering::Less
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.keys.swap(a, b);
        self.items.swap(a, b);
    }
}

/// A permutation of key indices, sorted by partially ordered keys that stay where they are.
///
/// Records whether any compared pair turned out to be unordered.
struct Order<'k, K> {
    keys: &'k [K],
    indices: Vec<usize>,
    incomparable: bool,
}

impl<K: PartialOrd> SortTarget for Order<'_, K> {
    fn len(&self) -> usize {
        self.indices.len()
    }

    fn less(&mut self, a: usize, b: usize) -> bool {
        if let Some(ordering) = self.keys[self.indices[a]].partial_cmp(&self.keys[self.indices[b]]) {
            ordering == Ordering::Less
        } else {
            self.incomparable = true;
            false
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.indices.swap(a, b);
    }
}

pub(crate) fn sort_by<T>(elements: &mut [T], compare: impl FnMut(&T, &T) -> Ordering) {
    elements.sort_unstable_by(compare);
}

/// Sorts `keys` and applies the same permutation to `items`.
///
/// Both slices must have the same length; the caller checks this.
pub(crate) fn sort_pairs_by<K, V>(keys: &mut [K], items: &mut [V], compare: impl FnMut(&K, &K) -> Ordering) {
    debug_assert_eq!(keys.len(), items.len());

    introsort(&mut Paired { keys, items, compare });
}

/// Sorts partially ordered keys, failing without moving anything if two keys have no order.
pub(crate) fn try_sort<K: PartialOrd>(keys: &mut [K]) -> Result<()> {
    let mut order = sorted_order(keys)?;
    apply_permutation(&mut order, |a, b| keys.swap(a, b));
    Ok(())
}

/// Like [`try_sort`], permuting `items` alongside `keys`.
pub(crate) fn try_sort_pairs<K: PartialOrd, V>(keys: &mut [K], items: &mut [V]) -> Result<()> {
    debug_assert_eq!(keys.len(), items.len());

    let mut order = sorted_order(keys)?;
    apply_permutation(&mut order, |a, b| {
        keys.swap(a, b);
        items.swap(a, b);
    });
    Ok(())
}

fn sorted_order<K: PartialOrd>(keys: &[K]) -> Result<Vec<usize>> {
    let mut target = Order {
        keys,
        indices: (0..keys.len()).collect(),
        incomparable: false,
    };

    introsort(&mut target);

    if target.incomparable {
        return Err(Error::unsupported("sorting elements that have no total order"));
    }

    Ok(target.indices)
}

/// Rearranges the underlying data so that position `i` receives the element that was at `order[i]`,
/// using only swaps. `order` is left as the identity permutation.
fn apply_permutation(order: &mut [usize], mut swap: impl FnMut(usize, usize)) {
    for start in 0..order.len() {
        let mut current = start;

        loop {
            let source = order[current];
            order[current] = current;

            if source == start {
                break;
            }

            swap(current, source);
            current = source;
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    #![allow(clippy::cast_precision_loss, reason = "test data is small")]

    use super::*;
    use crate::ErrorKind;

    /// Deterministic pseudo-random sequence, enough to exercise every partition shape.
    fn scrambled(len: usize, seed: u64) -> Vec<u64> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
                (state >> 33) % 1000
            })
            .collect()
    }

    fn sorted_copy(values: &[u64]) -> Vec<u64> {
        let mut copy = values.to_vec();
        copy.sort_unstable();
        copy
    }

    #[test]
    fn paired_sort_permutes_items_in_lock_step() {
        let mut keys = [5, 3, 1, 4, 2];
        let mut items = ['a', 'b', 'c', 'd', 'e'];

        sort_pairs_by(&mut keys, &mut items, Ord::cmp);

        assert_eq!(keys, [1, 2, 3, 4, 5]);
        assert_eq!(items, ['c', 'e', 'b', 'd', 'a']);
    }

    #[test]
    fn introsort_handles_every_small_size() {
        for len in 0..=40 {
            let mut keys = scrambled(len, len as u64);
            let expected = sorted_copy(&keys);
            let mut items: Vec<usize> = (0..len).collect();
            let original = keys.clone();

            sort_pairs_by(&mut keys, &mut items, Ord::cmp);

            assert_eq!(keys, expected, "len {len}");
            for (key, &item) in keys.iter().zip(&items) {
                assert_eq!(*key, original[item]);
            }
        }
    }

    #[test]
    fn introsort_handles_large_and_degenerate_inputs() {
        let inputs = [
            scrambled(5000, 7),
            (0..3000).collect(),
            (0..3000).rev().collect(),
            vec![42; 2000],
            (0..4000).map(|n| n % 3).collect(),
        ];

        for keys in inputs {
            let expected = sorted_copy(&keys);
            let mut keys = keys;
            let mut items = vec![(); keys.len()];

            sort_pairs_by(&mut keys, &mut items, Ord::cmp);
            assert_eq!(keys, expected);
        }
    }

    #[test]
    fn heapsort_fallback_sorts() {
        let mut keys = scrambled(300, 99);
        let expected = sorted_copy(&keys);
        let mut items = vec![0_u8; keys.len()];

        let len = keys.len();
        heapsort(&mut Paired { keys: &mut keys, items: &mut items, compare: u64::cmp }, 0, len - 1);

        assert_eq!(keys, expected);
    }

    #[test]
    fn comparer_is_honored() {
        let mut keys = ["pear", "fig", "banana", "kiwi"];
        let mut items = [1, 2, 3, 4];

        sort_pairs_by(&mut keys, &mut items, |a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        assert_eq!(keys, ["fig", "kiwi", "pear", "banana"]);
        assert_eq!(items, [2, 4, 1, 3]);

        let mut values = [3, 1, 2];
        sort_by(&mut values, |a, b| b.cmp(a));
        assert_eq!(values, [3, 2, 1]);
    }

    #[test]
    fn partial_keys_sort_when_totally_ordered() {
        let mut keys = [2.5, -1.0, 0.0, 9.75, 3.0];
        let mut items = ["c", "a", "b", "e", "d"];

        try_sort_pairs(&mut keys, &mut items).unwrap();

        assert_eq!(keys, [-1.0, 0.0, 2.5, 3.0, 9.75]);
        assert_eq!(items, ["a", "b", "c", "d", "e"]);

        let mut many: Vec<f64> = scrambled(500, 3).into_iter().map(|n| n as f64 / 7.0).collect();
        try_sort(&mut many).unwrap();
        assert!(many.is_sorted());
    }

    #[test]
    fn unordered_keys_fail_without_moving_anything() {
        let mut keys = [3.0, f64::NAN, 1.0, 2.0];
        let mut items = [0, 1, 2, 3];

        let error = try_sort_pairs(&mut keys, &mut items).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Unsupported);
        assert_eq!(keys[0].to_bits(), 3.0_f64.to_bits());
        assert!(keys[1].is_nan());
        assert_eq!(&keys[2..], &[1.0, 2.0]);
        assert_eq!(items, [0, 1, 2, 3]);
    }

    #[test]
    fn permutation_is_applied_by_cycles() {
        let mut data = ['w', 'x', 'y', 'z'];
        let mut order = [2, 0, 3, 1];

        apply_permutation(&mut order, |a, b| data.swap(a, b));

        assert_eq!(data, ['y', 'w', 'z', 'x']);
        assert_eq!(order, [0, 1, 2, 3]);
    }
}
