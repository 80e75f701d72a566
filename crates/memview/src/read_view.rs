// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::cmp::Ordering;

use crate::algorithms::{compare, mutate, search, subsequence};
use crate::offset;
use crate::{Error, Nullable, ReadOnlyView, Result, SearchElement, SearchValues, View};

/// The read-only algorithms shared by [`ReadOnlyView`] and [`View`].
///
/// Implementors only supply [`as_read_only`](Self::as_read_only); every other method is provided.
/// Search methods return `Some(index)` of the match or `None` if there is none.
///
/// Methods that take another sequence accept anything that converts into a [`ReadOnlyView`]: a
/// view, a `&View`, a slice, an array reference or a `&Vec<T>`.
///
/// # Examples
///
/// ```
/// use memview::{ReadOnlyView, ReadView};
///
/// let text = ReadOnlyView::new(b"abracadabra");
///
/// assert_eq!(text.index_of_seq(b"cad"), Some(4));
/// assert_eq!(text.last_index_of(&b'a'), Some(10));
/// assert_eq!(text.index_of_any_except(b"ab"), Some(2));
/// assert!(text.starts_with(b"abra"));
/// ```
pub trait ReadView<T> {
    /// Borrows the elements as a [`ReadOnlyView`].
    fn as_read_only(&self) -> ReadOnlyView<'_, T>;

    /// Index of the first element equal to `value`.
    fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        search::index_of(elements(self), value)
    }

    /// Index of the last element equal to `value`.
    fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        search::last_index_of(elements(self), value)
    }

    /// Index of the first element equal to `a` or `b`.
    fn index_of_any2(&self, a: &T, b: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        search::index_of_any2(elements(self), a, b)
    }

    /// Index of the last element equal to `a` or `b`.
    fn last_index_of_any2(&self, a: &T, b: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        search::last_index_of_any2(elements(self), a, b)
    }

    /// Index of the first element equal to `a`, `b` or `c`.
    fn index_of_any3(&self, a: &T, b: &T, c: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        search::index_of_any3(elements(self), a, b, c)
    }

    /// Index of the last element equal to `a`, `b` or `c`.
    fn last_index_of_any3(&self, a: &T, b: &T, c: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        search::last_index_of_any3(elements(self), a, b, c)
    }

    /// Index of the first element equal to any of `values`. An empty set never matches.
    fn index_of_any<'b>(&self, values: impl Into<ReadOnlyView<'b, T>>) -> Option<usize>
    where
        T: PartialEq + 'b,
    {
        search::index_of_any(elements(self), values.into().as_slice())
    }

    /// Index of the last element equal to any of `values`. An empty set never matches.
    fn last_index_of_any<'b>(&self, values: impl Into<ReadOnlyView<'b, T>>) -> Option<usize>
    where
        T: PartialEq + 'b,
    {
        search::last_index_of_any(elements(self), values.into().as_slice())
    }

    /// Index of the first element not equal to `value`.
    fn index_of_except(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        search::index_of_except(elements(self), value)
    }

    /// Index of the last element not equal to `value`.
    fn last_index_of_except(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        search::last_index_of_except(elements(self), value)
    }

    /// Index of the first element equal to neither `a` nor `b`.
    fn index_of_any_except2(&self, a: &T, b: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        search::index_of_any_except2(elements(self), a, b)
    }

    /// Index of the last element equal to neither `a` nor `b`.
    fn last_index_of_any_except2(&self, a: &T, b: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        search::last_index_of_any_except2(elements(self), a, b)
    }

    /// Index of the first element equal to none of `a`, `b` and `c`.
    fn index_of_any_except3(&self, a: &T, b: &T, c: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        search::index_of_any_except3(elements(self), a, b, c)
    }

    /// Index of the last element equal to none of `a`, `b` and `c`.
    fn last_index_of_any_except3(&self, a: &T, b: &T, c: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        search::last_index_of_any_except3(elements(self), a, b, c)
    }

    /// Index of the first element not in `values`.
    ///
    /// With an empty set every element qualifies, so the result is `Some(0)` for any non-empty view.
    fn index_of_any_except<'b>(&self, values: impl Into<ReadOnlyView<'b, T>>) -> Option<usize>
    where
        T: PartialEq + 'b,
    {
        search::index_of_any_except(elements(self), values.into().as_slice())
    }

    /// Index of the last element not in `values`.
    ///
    /// With an empty set every element qualifies, so the result is the last index of any non-empty
    /// view.
    fn last_index_of_any_except<'b>(&self, values: impl Into<ReadOnlyView<'b, T>>) -> Option<usize>
    where
        T: PartialEq + 'b,
    {
        search::last_index_of_any_except(elements(self), values.into().as_slice())
    }

    /// Index of the first element within `[low_inclusive, high_inclusive]`.
    fn index_of_any_in_range(&self, low_inclusive: &T, high_inclusive: &T) -> Option<usize>
    where
        T: PartialOrd,
    {
        search::index_of_in_range(elements(self), low_inclusive, high_inclusive, true)
    }

    /// Index of the last element within `[low_inclusive, high_inclusive]`.
    fn last_index_of_any_in_range(&self, low_inclusive: &T, high_inclusive: &T) -> Option<usize>
    where
        T: PartialOrd,
    {
        search::last_index_of_in_range(elements(self), low_inclusive, high_inclusive, true)
    }

    /// Index of the first element outside `[low_inclusive, high_inclusive]`.
    fn index_of_any_except_in_range(&self, low_inclusive: &T, high_inclusive: &T) -> Option<usize>
    where
        T: PartialOrd,
    {
        search::index_of_in_range(elements(self), low_inclusive, high_inclusive, false)
    }

    /// Index of the last element outside `[low_inclusive, high_inclusive]`.
    fn last_index_of_any_except_in_range(&self, low_inclusive: &T, high_inclusive: &T) -> Option<usize>
    where
        T: PartialOrd,
    {
        search::last_index_of_in_range(elements(self), low_inclusive, high_inclusive, false)
    }

    /// Like [`index_of_any_in_range`](Self::index_of_any_in_range), rejecting null bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullBound`] naming the first bound that is null.
    fn try_index_of_any_in_range(&self, low_inclusive: &T, high_inclusive: &T) -> Result<Option<usize>>
    where
        T: PartialOrd + Nullable,
    {
        check_bounds(low_inclusive, high_inclusive)?;
        Ok(self.index_of_any_in_range(low_inclusive, high_inclusive))
    }

    /// Like [`last_index_of_any_in_range`](Self::last_index_of_any_in_range), rejecting null bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullBound`] naming the first bound that is null.
    fn try_last_index_of_any_in_range(&self, low_inclusive: &T, high_inclusive: &T) -> Result<Option<usize>>
    where
        T: PartialOrd + Nullable,
    {
        check_bounds(low_inclusive, high_inclusive)?;
        Ok(self.last_index_of_any_in_range(low_inclusive, high_inclusive))
    }

    /// Like [`index_of_any_except_in_range`](Self::index_of_any_except_in_range), rejecting null
    /// bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullBound`] naming the first bound that is null.
    fn try_index_of_any_except_in_range(&self, low_inclusive: &T, high_inclusive: &T) -> Result<Option<usize>>
    where
        T: PartialOrd + Nullable,
    {
        check_bounds(low_inclusive, high_inclusive)?;
        Ok(self.index_of_any_except_in_range(low_inclusive, high_inclusive))
    }

    /// Like [`last_index_of_any_except_in_range`](Self::last_index_of_any_except_in_range),
    /// rejecting null bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullBound`] naming the first bound that is null.
    fn try_last_index_of_any_except_in_range(&self, low_inclusive: &T, high_inclusive: &T) -> Result<Option<usize>>
    where
        T: PartialOrd + Nullable,
    {
        check_bounds(low_inclusive, high_inclusive)?;
        Ok(self.last_index_of_any_except_in_range(low_inclusive, high_inclusive))
    }

    /// Index of the first element in a precomputed set.
    fn index_of_any_values(&self, values: &SearchValues<T>) -> Option<usize>
    where
        T: SearchElement,
    {
        values.index_of_any(elements(self))
    }

    /// Index of the last element in a precomputed set.
    fn last_index_of_any_values(&self, values: &SearchValues<T>) -> Option<usize>
    where
        T: SearchElement,
    {
        values.last_index_of_any(elements(self))
    }

    /// Index of the first element not in a precomputed set.
    fn index_of_any_except_values(&self, values: &SearchValues<T>) -> Option<usize>
    where
        T: SearchElement,
    {
        values.index_of_any_except(elements(self))
    }

    /// Index of the last element not in a precomputed set.
    fn last_index_of_any_except_values(&self, values: &SearchValues<T>) -> Option<usize>
    where
        T: SearchElement,
    {
        values.last_index_of_any_except(elements(self))
    }

    /// Start index of the first occurrence of `needle`. An empty needle matches at 0.
    fn index_of_seq<'b>(&self, needle: impl Into<ReadOnlyView<'b, T>>) -> Option<usize>
    where
        T: PartialEq + 'b,
    {
        subsequence::index_of_seq(elements(self), needle.into().as_slice())
    }

    /// Start index of the last occurrence of `needle`. An empty needle matches at the length.
    fn last_index_of_seq<'b>(&self, needle: impl Into<ReadOnlyView<'b, T>>) -> Option<usize>
    where
        T: PartialEq + 'b,
    {
        subsequence::last_index_of_seq(elements(self), needle.into().as_slice())
    }

    /// Whether any element equals `value`.
    fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    /// Whether any element equals any of `values`.
    fn contains_any<'b>(&self, values: impl Into<ReadOnlyView<'b, T>>) -> bool
    where
        T: PartialEq + 'b,
    {
        self.index_of_any(values).is_some()
    }

    /// Number of elements equal to `value`.
    fn count(&self, value: &T) -> usize
    where
        T: PartialEq,
    {
        search::count(elements(self), value)
    }

    /// Whether both sequences have the same length and equal elements.
    fn sequence_equal<'b>(&self, other: impl Into<ReadOnlyView<'b, T>>) -> bool
    where
        T: PartialEq + 'b,
    {
        compare::sequence_equal(elements(self), other.into().as_slice())
    }

    /// Whether both sequences have the same length and `eq` accepts every pair of elements.
    fn sequence_equal_by<'b>(&self, other: impl Into<ReadOnlyView<'b, T>>, eq: impl FnMut(&T, &T) -> bool) -> bool
    where
        T: 'b,
    {
        compare::sequence_equal_by(elements(self), other.into().as_slice(), eq)
    }

    /// Lexicographic order of the two sequences. A strict prefix orders first.
    fn sequence_compare_to<'b>(&self, other: impl Into<ReadOnlyView<'b, T>>) -> Ordering
    where
        T: Ord + 'b,
    {
        compare::sequence_compare_to(elements(self), other.into().as_slice())
    }

    /// Lexicographic order of the two sequences under `compare`.
    fn sequence_compare_to_by<'b>(
        &self,
        other: impl Into<ReadOnlyView<'b, T>>,
        compare: impl FnMut(&T, &T) -> Ordering,
    ) -> Ordering
    where
        T: 'b,
    {
        compare::sequence_compare_to_by(elements(self), other.into().as_slice(), compare)
    }

    /// Number of leading elements the two sequences have in common.
    fn common_prefix_length<'b>(&self, other: impl Into<ReadOnlyView<'b, T>>) -> usize
    where
        T: PartialEq + 'b,
    {
        compare::common_prefix_length(elements(self), other.into().as_slice())
    }

    /// Number of leading pairs of elements that `eq` accepts.
    fn common_prefix_length_by<'b>(
        &self,
        other: impl Into<ReadOnlyView<'b, T>>,
        eq: impl FnMut(&T, &T) -> bool,
    ) -> usize
    where
        T: 'b,
    {
        compare::common_prefix_length_by(elements(self), other.into().as_slice(), eq)
    }

    /// Whether the view begins with `prefix`.
    fn starts_with<'b>(&self, prefix: impl Into<ReadOnlyView<'b, T>>) -> bool
    where
        T: PartialEq + 'b,
    {
        compare::starts_with(elements(self), prefix.into().as_slice())
    }

    /// Whether the view begins with `prefix` under `eq`.
    fn starts_with_by<'b>(&self, prefix: impl Into<ReadOnlyView<'b, T>>, eq: impl FnMut(&T, &T) -> bool) -> bool
    where
        T: 'b,
    {
        compare::starts_with_by(elements(self), prefix.into().as_slice(), eq)
    }

    /// Whether the view ends with `suffix`.
    fn ends_with<'b>(&self, suffix: impl Into<ReadOnlyView<'b, T>>) -> bool
    where
        T: PartialEq + 'b,
    {
        compare::ends_with(elements(self), suffix.into().as_slice())
    }

    /// Whether the view ends with `suffix` under `eq`.
    fn ends_with_by<'b>(&self, suffix: impl Into<ReadOnlyView<'b, T>>, eq: impl FnMut(&T, &T) -> bool) -> bool
    where
        T: 'b,
    {
        compare::ends_with_by(elements(self), suffix.into().as_slice(), eq)
    }

    /// Whether the first element equals `value`.
    fn starts_with_value(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        elements(self).first() == Some(value)
    }

    /// Whether the last element equals `value`.
    fn ends_with_value(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        elements(self).last() == Some(value)
    }

    /// Binary search in a sorted view, with the same contract as [`slice::binary_search`].
    ///
    /// # Errors
    ///
    /// Returns `Err(index)` with the insertion point if `value` is not present.
    fn binary_search(&self, value: &T) -> std::result::Result<usize, usize>
    where
        T: Ord,
    {
        elements(self).binary_search(value)
    }

    /// Binary search with a probe function, with the same contract as [`slice::binary_search_by`].
    ///
    /// # Errors
    ///
    /// Returns `Err(index)` with the insertion point if no element probes as equal.
    fn binary_search_by(&self, probe: impl FnMut(&T) -> Ordering) -> std::result::Result<usize, usize> {
        elements(self).binary_search_by(probe)
    }

    /// Copies every element into the start of `destination`.
    ///
    /// If the two views share memory, the result is as if the source had first been copied into a
    /// temporary buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DestinationTooShort`] without writing anything if `destination` has fewer
    /// elements than this view.
    fn copy_to(&self, destination: &mut View<'_, T>) -> Result<()>
    where
        T: Clone,
    {
        let source = self.as_read_only();

        if destination.len() < source.len() {
            return Err(Error::destination_too_short(source.len(), destination.len()));
        }

        // SAFETY: Both views are valid for `source.len()` elements and `copy_overlapping` handles
        // any overlap between them.
        unsafe { mutate::copy_overlapping(source.non_null(), destination.non_null(), source.len()) };

        Ok(())
    }

    /// Like [`copy_to`](Self::copy_to), returning whether the copy happened.
    fn try_copy_to(&self, destination: &mut View<'_, T>) -> bool
    where
        T: Clone,
    {
        let source = self.as_read_only();

        if destination.len() < source.len() {
            return false;
        }

        // SAFETY: As in `copy_to`.
        unsafe { mutate::copy_overlapping(source.non_null(), destination.non_null(), source.len()) };

        true
    }

    /// Copies every element into the start of `destination`, writing `new` in place of each `old`.
    ///
    /// The destination may be the same memory as this view, which makes this an in-place
    /// replacement.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DestinationTooShort`] if `destination` has fewer elements than this view,
    /// and [`Error::OverlappingViews`] if the two views share memory but start at different
    /// addresses. Nothing is written in either case.
    fn replace_into(&self, destination: &mut View<'_, T>, old: &T, new: &T) -> Result<()>
    where
        T: PartialEq + Clone,
    {
        let source = self.as_read_only();
        let len = source.len();

        if destination.len() < len {
            return Err(Error::destination_too_short(len, destination.len()));
        }

        let (src, dst) = (source.non_null(), destination.non_null());

        if src != dst && offset::ranges_overlap(src.as_ptr().cast_const(), len, dst.as_ptr().cast_const(), len) {
            return Err(Error::overlapping());
        }

        // SAFETY: Both views are valid for `len` elements, and they either do not overlap or start at
        // the same address.
        unsafe { mutate::replace_into(src, dst, len, old, new) };

        Ok(())
    }

    /// Copies the elements into a new vector.
    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        elements(self).to_vec()
    }

    /// If the two views share memory, the element offset from this view's start to the other's.
    ///
    /// The offset is negative when the other view starts earlier. Views of zero-sized elements
    /// never overlap.
    fn overlaps<'b>(&self, other: impl Into<ReadOnlyView<'b, T>>) -> Option<isize>
    where
        T: 'b,
    {
        let this = self.as_read_only();
        let other = other.into();

        offset::ranges_overlap(this.as_ptr(), this.len(), other.as_ptr(), other.len())
            .then(|| offset::element_offset(this.as_ptr(), other.as_ptr()))
    }
}

fn elements<T, V: ReadView<T> + ?Sized>(view: &V) -> &[T] {
    view.as_read_only().as_slice()
}

fn check_bounds<T: Nullable>(low_inclusive: &T, high_inclusive: &T) -> Result<()> {
    if low_inclusive.is_null() {
        return Err(Error::null_bound("low_inclusive"));
    }

    if high_inclusive.is_null() {
        return Err(Error::null_bound("high_inclusive"));
    }

    Ok(())
}
