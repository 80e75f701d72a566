// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::ptr::NonNull;
use std::slice;

use crate::algorithms::{mutate, sort};
use crate::offset::{self, element_ptr};
use crate::position::check_slice;
use crate::{Error, Position, PositionRange, ReadOnlyView, ReadView, Result, SegmentMut};

/// A mutable view over a contiguous run of `T` that someone else owns.
///
/// A view is a pointer and a length with exclusive access to the elements for `'a`. It never
/// allocates and never frees or outlives the storage it was created from. Slicing consumes the
/// view and produces a narrower one; use [`reborrow`](Self::reborrow) to slice without giving up
/// the original.
///
/// Read-only algorithms come from the [`ReadView`] trait. Mutation algorithms are inherent.
///
/// # Examples
///
/// ```
/// use memview::{ReadView, View};
///
/// let mut keys = [5, 3, 1, 4, 2];
/// let mut items = ['a', 'b', 'c', 'd', 'e'];
///
/// View::new(&mut keys).sort_with_items(&mut items)?;
///
/// assert_eq!(keys, [1, 2, 3, 4, 5]);
/// assert_eq!(items, ['c', 'e', 'b', 'd', 'a']);
/// # Ok::<(), memview::Error>(())
/// ```
///
/// # Thread safety
///
/// This type is `Send` when `T` is `Send` and `Sync` when `T` is `Sync`.
pub struct View<'a, T> {
    ptr: NonNull<T>,
    len: usize,
    _storage: PhantomData<&'a mut [T]>,
}

// SAFETY: A view is equivalent to an exclusive slice, which is Send when T is Send.
unsafe impl<T: Send> Send for View<'_, T> {}

// SAFETY: Shared access to a view only hands out shared access to the elements.
unsafe impl<T: Sync> Sync for View<'_, T> {}

impl<'a, T> View<'a, T> {
    /// The empty view.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            _storage: PhantomData,
        }
    }

    /// A view over all of `elements`.
    #[must_use]
    pub fn new(elements: &'a mut [T]) -> Self {
        Self {
            len: elements.len(),
            ptr: NonNull::from(elements).cast(),
            _storage: PhantomData,
        }
    }

    /// A view over all of `array`, or the empty view if there is no array.
    #[must_use]
    pub fn from_array(array: Option<&'a mut [T]>) -> Self {
        array.map_or_else(Self::empty, Self::new)
    }

    /// A view over `length` elements of `array` starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentOutOfRange`] if the range does not lie within the array. Absent
    /// storage only accepts `start == 0` and `length == 0`.
    pub fn from_array_range(array: Option<&'a mut [T]>, start: usize, length: usize) -> Result<Self> {
        let Some(array) = array else {
            check_slice(0, start, length)?;
            return Ok(Self::empty());
        };

        Self::new(array).slice_len(start, length)
    }

    /// A view over `length` elements starting at `ptr`.
    ///
    /// A null `ptr` with a zero `length` produces the empty view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentOutOfRange`] if `length` elements of `T` would span more than
    /// [`offset::MAX_BYTE_LEN`] bytes, or if `ptr` is null and `length` is not zero.
    ///
    /// # Safety
    ///
    /// Unless `length` is zero, `ptr` must be aligned and valid for reads and writes of `length`
    /// elements for the whole of `'a`. Other views over the same elements may exist only if they
    /// were also created with this function, and the caller must not use them concurrently.
    pub unsafe fn from_raw_parts(ptr: *mut T, length: usize) -> Result<Self> {
        if offset::byte_len::<T>(length).is_none() {
            return Err(Error::out_of_range("length"));
        }

        match NonNull::new(ptr) {
            Some(ptr) => Ok(Self {
                ptr,
                len: length,
                _storage: PhantomData,
            }),
            None if length == 0 => Ok(Self::empty()),
            None => Err(Error::out_of_range("length")),
        }
    }

    /// A view over the elements a segment describes.
    #[must_use]
    pub fn from_segment(segment: SegmentMut<'a, T>) -> Self {
        Self::new(segment.into_slice())
    }

    /// A view over `length` elements starting at `start` of type-erased storage.
    ///
    /// The storage must be a `Vec<T>` or a `Box<[T]>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the storage holds anything else, even when `start` and
    /// `length` would be valid. Otherwise fails like [`from_array_range`](Self::from_array_range).
    pub fn from_any(storage: &'a mut (dyn Any + 'static), start: usize, length: usize) -> Result<Self>
    where
        T: 'static,
    {
        let elements: &'a mut [T] = if storage.is::<Vec<T>>() {
            storage.downcast_mut::<Vec<T>>().ok_or_else(Error::type_mismatch::<T>)?
        } else {
            storage.downcast_mut::<Box<[T]>>().ok_or_else(Error::type_mismatch::<T>)?
        };

        Self::new(elements).slice_len(start, length)
    }

    /// Number of elements in the view.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the view has no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pointer to the first element.
    #[must_use]
    pub const fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Mutable pointer to the first element.
    #[must_use]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// The elements as a shared standard slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: Every constructor guarantees the pointer is valid for `len` elements for `'a`,
        // which outlives the borrow of `self`.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// The elements as an exclusive standard slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: As above, and the exclusive borrow of `self` stands in for the view's exclusive
        // access to the elements.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// The elements as an exclusive standard slice for the full lifetime of the view.
    #[must_use]
    pub fn into_slice(self) -> &'a mut [T] {
        // SAFETY: The view is consumed, so the returned slice is the only access path left.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// A shorter-lived view over the same elements, leaving this one usable afterwards.
    #[must_use]
    pub fn reborrow(&mut self) -> View<'_, T> {
        View {
            ptr: self.ptr,
            len: self.len,
            _storage: PhantomData,
        }
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterates mutably over the elements.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// The view from `start` to the end.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentOutOfRange`] if `start` exceeds the length.
    pub fn slice(self, start: usize) -> Result<Self> {
        let length = self.len.checked_sub(start).ok_or_else(|| Error::out_of_range("start"))?;

        // SAFETY: `start + length == self.len`.
        Ok(unsafe { self.sub(start, length) })
    }

    /// The view of `length` elements from `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentOutOfRange`] if the range does not lie within the view.
    pub fn slice_len(self, start: usize, length: usize) -> Result<Self> {
        check_slice(self.len, start, length)?;

        // SAFETY: Just checked.
        Ok(unsafe { self.sub(start, length) })
    }

    /// The view of a range whose bounds may count from either end.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentOutOfRange`] if either bound falls outside the view or if the range
    /// is inverted.
    pub fn slice_range(self, range: impl Into<PositionRange>) -> Result<Self> {
        let (start, length) = range.into().resolve(self.len)?;

        // SAFETY: `resolve` only returns ranges within `[0, self.len]`.
        Ok(unsafe { self.sub(start, length) })
    }

    /// Splits the view into two disjoint views at `mid`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentOutOfRange`] if `mid` exceeds the length.
    pub fn split_at(self, mid: usize) -> Result<(Self, Self)> {
        let tail = self.len.checked_sub(mid).ok_or_else(|| Error::out_of_range("mid"))?;
        let (ptr, len) = (self.ptr, self.len);

        // SAFETY: `mid <= len`. The two halves do not share any element.
        let head = unsafe { Self::from_parts(ptr, len).sub(0, mid) };

        // SAFETY: `mid + tail == len`.
        let tail = unsafe { self.sub(mid, tail) };

        Ok((head, tail))
    }

    /// The element at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if the position does not resolve to an element.
    pub fn get(&self, position: impl Into<Position>) -> Result<&T> {
        let index = position.into().resolve_index(self.len)?;

        Ok(&self.as_slice()[index])
    }

    /// The element at `position`, mutably.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if the position does not resolve to an element.
    pub fn get_mut(&mut self, position: impl Into<Position>) -> Result<&mut T> {
        let index = position.into().resolve_index(self.len)?;

        Ok(&mut self.as_mut_slice()[index])
    }

    /// Sets every element to `T::default()`.
    ///
    /// Bitwise elements are zeroed in one pass. Anything else is assigned a default value, which
    /// drops the previous one; memory holding references is never zero-filled.
    pub fn clear(&mut self)
    where
        T: Default,
    {
        mutate::clear(self.as_mut_slice());
    }

    /// Sets every element to a clone of `value`.
    pub fn fill(&mut self, value: &T)
    where
        T: Clone,
    {
        mutate::fill(self.as_mut_slice(), value);
    }

    /// Reverses the order of the elements in place.
    pub fn reverse(&mut self) {
        self.as_mut_slice().reverse();
    }

    /// Replaces every element equal to `old` with a clone of `new`.
    pub fn replace(&mut self, old: &T, new: &T)
    where
        T: PartialEq + Clone,
    {
        mutate::replace(self.as_mut_slice(), old, new);
    }

    /// Sorts the elements in ascending order. The sort is not stable.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        sort::sort_by(self.as_mut_slice(), T::cmp);
    }

    /// Sorts the elements with a comparator. The sort is not stable.
    pub fn sort_by(&mut self, compare: impl FnMut(&T, &T) -> Ordering) {
        sort::sort_by(self.as_mut_slice(), compare);
    }

    /// Sorts partially ordered elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] if two elements turn out to have no order, such as a NaN
    /// against any float. Nothing is moved in that case.
    pub fn try_sort(&mut self) -> Result<()>
    where
        T: PartialOrd,
    {
        sort::try_sort(self.as_mut_slice())
    }

    /// Sorts the elements and applies the same permutation to `items`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if `items` has a different length than this view.
    pub fn sort_with_items<'b, U: 'b>(&mut self, items: impl Into<View<'b, U>>) -> Result<()>
    where
        T: Ord,
    {
        self.sort_by_with_items(items, T::cmp)
    }

    /// Sorts the elements with a comparator and applies the same permutation to `items`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if `items` has a different length than this view.
    pub fn sort_by_with_items<'b, U: 'b>(
        &mut self,
        items: impl Into<View<'b, U>>,
        compare: impl FnMut(&T, &T) -> Ordering,
    ) -> Result<()> {
        let mut items = self.paired(items)?;

        sort::sort_pairs_by(self.as_mut_slice(), items.as_mut_slice(), compare);
        Ok(())
    }

    /// Sorts partially ordered elements and applies the same permutation to `items`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if `items` has a different length than this view, and
    /// [`Error::Unsupported`] if two elements have no order. Neither view is modified on error.
    pub fn try_sort_with_items<'b, U: 'b>(&mut self, items: impl Into<View<'b, U>>) -> Result<()>
    where
        T: PartialOrd,
    {
        let mut items = self.paired(items)?;

        sort::try_sort_pairs(self.as_mut_slice(), items.as_mut_slice())
    }

    fn paired<'b, U: 'b>(&self, items: impl Into<View<'b, U>>) -> Result<View<'b, U>> {
        let items = items.into();

        if items.len() != self.len {
            return Err(Error::length_mismatch(self.len, items.len()));
        }

        Ok(items)
    }

    pub(crate) const fn non_null(&self) -> NonNull<T> {
        self.ptr
    }

    const fn from_parts(ptr: NonNull<T>, len: usize) -> Self {
        Self {
            ptr,
            len,
            _storage: PhantomData,
        }
    }

    /// # Safety
    ///
    /// `start + length` must not exceed `self.len`.
    unsafe fn sub(self, start: usize, length: usize) -> Self {
        debug_assert!(start.checked_add(length).is_some_and(|end| end <= self.len));

        // SAFETY: Forwarding the caller's guarantee that `start` is within the view.
        let ptr = unsafe { element_ptr(self.ptr, start) };

        Self::from_parts(ptr, length)
    }
}

impl<T> Default for View<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> PartialEq for View<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr && self.len == other.len
    }
}

impl<T> Eq for View<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for View<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Index<usize> for View<'_, T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index` is not less than the length.
    fn index(&self, index: usize) -> &T {
        self.index(Position::FromStart(index))
    }
}

impl<T> Index<Position> for View<'_, T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `position` does not resolve to an element.
    #[expect(clippy::panic, reason = "indexing panics on a miss, like slice indexing")]
    fn index(&self, index: Position) -> &T {
        match self.get(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T> IndexMut<usize> for View<'_, T> {
    /// # Panics
    ///
    /// Panics if `index` is not less than the length.
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.index_mut(Position::FromStart(index))
    }
}

impl<T> IndexMut<Position> for View<'_, T> {
    /// # Panics
    ///
    /// Panics if `position` does not resolve to an element.
    #[expect(clippy::panic, reason = "indexing panics on a miss, like slice indexing")]
    fn index_mut(&mut self, index: Position) -> &mut T {
        match self.get_mut(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<'a, T> IntoIterator for View<'a, T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_slice().iter_mut()
    }
}

impl<'b, T> IntoIterator for &'b View<'_, T> {
    type Item = &'b T;
    type IntoIter = slice::Iter<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'b, T> IntoIterator for &'b mut View<'_, T> {
    type Item = &'b mut T;
    type IntoIter = slice::IterMut<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<'a, T> From<&'a mut [T]> for View<'a, T> {
    fn from(value: &'a mut [T]) -> Self {
        Self::new(value)
    }
}

impl<'a, T, const N: usize> From<&'a mut [T; N]> for View<'a, T> {
    fn from(value: &'a mut [T; N]) -> Self {
        Self::new(value)
    }
}

impl<'a, T> From<&'a mut Vec<T>> for View<'a, T> {
    fn from(value: &'a mut Vec<T>) -> Self {
        Self::new(value)
    }
}

impl<'a, T> From<SegmentMut<'a, T>> for View<'a, T> {
    fn from(value: SegmentMut<'a, T>) -> Self {
        Self::from_segment(value)
    }
}

impl<'b, 'a: 'b, T> From<&'b mut View<'a, T>> for View<'b, T> {
    fn from(value: &'b mut View<'a, T>) -> Self {
        value.reborrow()
    }
}

impl<'a, T> From<View<'a, T>> for ReadOnlyView<'a, T> {
    fn from(value: View<'a, T>) -> Self {
        Self::new(value.into_slice())
    }
}

impl<'b, T> From<&'b View<'_, T>> for ReadOnlyView<'b, T> {
    fn from(value: &'b View<'_, T>) -> Self {
        value.as_read_only()
    }
}

impl<T> ReadView<T> for View<'_, T> {
    fn as_read_only(&self) -> ReadOnlyView<'_, T> {
        ReadOnlyView::from_parts(self.ptr, self.len)
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use testing_aids::assert_panic;

    use super::*;
    use crate::ErrorKind;

    static_assertions::assert_impl_all!(View<'static, u8>: Send, Sync, Default);
    static_assertions::assert_impl_all!(View<'static, Cell<u8>>: Send);
    static_assertions::assert_not_impl_any!(View<'static, Cell<u8>>: Sync);
    static_assertions::assert_not_impl_any!(View<'static, Rc<u8>>: Send, Sync);
    static_assertions::assert_not_impl_any!(View<'static, u8>: Copy, Clone);

    #[test]
    fn clear_releases_owned_values() {
        let mut names = [Some("a".to_string()), Some("b".to_string()), Some("c".to_string())];

        View::new(&mut names).clear();

        assert_eq!(names, [None, None, None]);
    }

    #[test]
    fn clear_drops_previous_values() {
        let shared = Rc::new(5);
        let mut slots = vec![Some(Rc::clone(&shared)), Some(Rc::clone(&shared))];
        assert_eq!(Rc::strong_count(&shared), 3);

        View::from(&mut slots).clear();

        assert_eq!(Rc::strong_count(&shared), 1);
        assert!(slots.iter().all(Option::is_none));
    }

    #[test]
    fn fill_and_replace() {
        let mut data = [1, 2, 1, 3];
        let mut view = View::new(&mut data);

        view.replace(&1, &9);
        assert_eq!(view.as_slice(), &[9, 2, 9, 3]);

        view.reborrow().slice(2).unwrap().fill(&0);
        assert_eq!(data, [9, 2, 0, 0]);
    }

    #[test]
    fn replace_matches_default_old_value() {
        let mut data = [None, Some(1), None];

        View::new(&mut data).replace(&None, &Some(7));

        assert_eq!(data, [Some(7), Some(1), Some(7)]);
    }

    #[test]
    fn reverse_twice_restores_order() {
        let mut data: Vec<u16> = (0..17).collect();
        let original = data.clone();
        let mut view = View::from(&mut data);

        view.reverse();
        assert_eq!(view[0], 16);
        view.reverse();
        assert_eq!(data, original);

        let mut single = [42];
        View::new(&mut single).reverse();
        assert_eq!(single, [42]);
    }

    #[test]
    fn paired_sort_permutes_items() {
        let mut keys = [5, 3, 1, 4, 2];
        let mut items = ["a", "b", "c", "d", "e"];

        View::new(&mut keys).sort_with_items(&mut items).unwrap();

        assert_eq!(keys, [1, 2, 3, 4, 5]);
        assert_eq!(items, ["c", "e", "b", "d", "a"]);
    }

    #[test]
    fn paired_sort_rejects_mismatched_lengths() {
        let mut keys = [2, 1];
        let mut items = [1, 2, 3];

        let error = View::new(&mut keys).sort_with_items(&mut items).unwrap_err();

        assert_eq!(error, Error::LengthMismatch { keys: 2, items: 3 });
        assert_eq!(error.kind(), ErrorKind::Argument);
        assert_eq!(keys, [2, 1]);
    }

    #[test]
    fn descending_sort_by_comparator() {
        let mut keys = [1, 3, 2];
        let mut items = ['x', 'z', 'y'];

        View::new(&mut keys)
            .sort_by_with_items(&mut items, |a, b| b.cmp(a))
            .unwrap();

        assert_eq!(keys, [3, 2, 1]);
        assert_eq!(items, ['z', 'y', 'x']);

        let mut words = ["pear", "fig", "banana"];
        View::new(&mut words).sort_by(|a, b| a.len().cmp(&b.len()));
        assert_eq!(words, ["fig", "pear", "banana"]);
    }

    #[test]
    fn partial_order_sort_refuses_nan() {
        let mut keys = [2.0, f64::NAN, 1.0];
        let mut items = [1, 2, 3];

        let error = View::new(&mut keys).try_sort_with_items(&mut items).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unsupported);
        assert_eq!(items, [1, 2, 3]);
        assert_eq!(keys[0].to_bits(), 2.0_f64.to_bits());

        let mut keys = [2.5, -1.0, 0.0];
        View::new(&mut keys).try_sort().unwrap();
        assert!(keys.is_sorted());
    }

    #[test]
    fn split_at_gives_disjoint_views() {
        let mut data = [1, 2, 3, 4, 5];
        let (mut head, mut tail) = View::new(&mut data).split_at(2).unwrap();

        head.fill(&0);
        tail.reverse();
        assert_eq!(data, [0, 0, 5, 4, 3]);

        assert_eq!(
            View::new(&mut data).split_at(6).unwrap_err(),
            Error::ArgumentOutOfRange { param: "mid" }
        );
    }

    #[test]
    fn element_access() {
        let mut data = [10, 20, 30];
        let mut view = View::new(&mut data);

        *view.get_mut(Position::FromEnd(1)).unwrap() += 1;
        view[0] = 11;
        view[Position::FromStart(1)] = 21;

        assert_eq!(view.get(2), Ok(&31));
        assert_eq!(view.get(3).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
        assert_panic!(view[3] = 0);
        assert_eq!(data, [11, 21, 31]);
    }

    #[test]
    fn type_erased_storage() {
        let mut numbers: Vec<u8> = vec![1, 2, 3];
        let mut view = View::<u8>::from_any(&mut numbers, 1, 2).unwrap();
        view.fill(&7);
        assert_eq!(numbers, [1, 7, 7]);

        let mut boxed: Box<[u8]> = vec![0; 4].into_boxed_slice();
        assert_eq!(View::<u8>::from_any(&mut boxed, 0, 4).unwrap().len(), 4);

        let mut strings = vec!["x".to_string()];
        assert_eq!(
            View::<u8>::from_any(&mut strings, 0, 0).unwrap_err().kind(),
            ErrorKind::TypeMismatch
        );
        assert_eq!(
            View::<u8>::from_any(&mut numbers, 2, 2).unwrap_err(),
            Error::ArgumentOutOfRange { param: "length" }
        );
    }

    #[test]
    fn absent_storage_and_segments() {
        assert_eq!(View::<u8>::from_array(None), View::default());
        assert!(View::<u8>::from_array_range(None, 0, 0).unwrap().is_empty());
        assert!(View::<u8>::from_array_range(None, 0, 1).is_err());

        let mut data = [1, 2, 3, 4];
        let view = View::from(SegmentMut::new(&mut data, 1, 2).unwrap());
        assert_eq!(view.as_slice(), &[2, 3]);
        assert_eq!(View::from_segment(SegmentMut::<u8>::empty()), View::default());
    }

    #[test]
    fn views_convert_to_read_only() {
        let mut data = [1, 2, 3];
        let mut view = View::new(&mut data);
        let ptr = view.as_ptr();

        assert_eq!(view.as_read_only().as_ptr(), ptr);
        assert_eq!(ReadOnlyView::from(&view).len(), 3);
        assert_eq!(view.reborrow().slice_range(1..).unwrap().len(), 2);

        let read_only = ReadOnlyView::from(view);
        assert_eq!(read_only.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn iteration_and_debug() {
        let mut data = [1, 2, 3];
        let mut view = View::new(&mut data);

        for element in &mut view {
            *element *= 2;
        }

        assert_eq!((&view).into_iter().sum::<i32>(), 12);
        assert_eq!(format!("{view:?}"), "[2, 4, 6]");
        assert_eq!(view.into_iter().count(), 3);
    }

    #[test]
    fn raw_parts_validation() {
        // SAFETY: A zero-length view from a null pointer never dereferences it.
        let empty = unsafe { View::<u32>::from_raw_parts(std::ptr::null_mut(), 0) }.unwrap();
        assert!(empty.is_empty());

        // SAFETY: Rejected before the pointer is used.
        let null = unsafe { View::<u32>::from_raw_parts(std::ptr::null_mut(), 2) };
        assert!(null.is_err());
    }
}
