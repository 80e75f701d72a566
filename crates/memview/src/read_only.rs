// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;
use std::ptr::NonNull;
use std::slice;

use crate::offset::{self, element_ptr};
use crate::position::check_slice;
use crate::{Error, Position, PositionRange, ReadView, Result, Segment};

/// A read-only view over a contiguous run of `T` that someone else owns.
///
/// A view is a pointer and a length. It is `Copy`, never allocates, and never frees or outlives the
/// storage it was created from. Slicing produces a new view; the original is unaffected.
///
/// All searching and comparison is provided by the [`ReadView`] trait, which must be in scope.
///
/// # Equality
///
/// `==` on views compares location, not content: two views are equal if they start at the same
/// address and have the same length. Use [`ReadView::sequence_equal`] to compare content.
///
/// # Examples
///
/// ```
/// use memview::{ReadOnlyView, ReadView};
///
/// let data = [91, 92, -93, 94];
/// let view = ReadOnlyView::new(&data);
///
/// assert_eq!(view.index_of(&-93), Some(2));
/// assert_eq!(view.index_of(&999), None);
/// assert_eq!(view.slice(1)?.len(), 3);
/// # Ok::<(), memview::Error>(())
/// ```
///
/// # Thread safety
///
/// This type is `Send` and `Sync` when `T` is `Sync`.
pub struct ReadOnlyView<'a, T> {
    ptr: NonNull<T>,
    len: usize,
    _storage: PhantomData<&'a [T]>,
}

// SAFETY: A read-only view is equivalent to a shared slice, which is Send and Sync when T is Sync.
unsafe impl<T: Sync> Send for ReadOnlyView<'_, T> {}

// SAFETY: As above.
unsafe impl<T: Sync> Sync for ReadOnlyView<'_, T> {}

impl<'a, T> ReadOnlyView<'a, T> {
    /// The empty view. Every empty view built from absent storage equals this one.
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
    pub fn new(elements: &'a [T]) -> Self {
        Self {
            ptr: NonNull::from(elements).cast(),
            len: elements.len(),
            _storage: PhantomData,
        }
    }

    /// A view over all of `array`, or the empty view if there is no array.
    #[must_use]
    pub fn from_array(array: Option<&'a [T]>) -> Self {
        array.map_or_else(Self::empty, Self::new)
    }

    /// A view over `length` elements of `array` starting at `start`.
    ///
    /// Absent storage behaves like an empty array: only `start == 0` and `length == 0` are accepted,
    /// and they produce the empty view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentOutOfRange`] if `start` exceeds the array length or if `length`
    /// exceeds the number of elements remaining after `start`.
    pub fn from_array_range(array: Option<&'a [T]>, start: usize, length: usize) -> Result<Self> {
        let Some(array) = array else {
            check_slice(0, start, length)?;
            return Ok(Self::empty());
        };

        check_slice(array.len(), start, length)?;

        // SAFETY: The range was just checked to lie within `array`.
        Ok(unsafe { Self::new(array).sub(start, length) })
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
    /// Unless `length` is zero, `ptr` must be aligned and valid for reads of `length` elements for
    /// the whole of `'a`, and nothing may write to those elements during `'a` except through other
    /// views created with this function.
    pub unsafe fn from_raw_parts(ptr: *const T, length: usize) -> Result<Self> {
        if offset::byte_len::<T>(length).is_none() {
            return Err(Error::out_of_range("length"));
        }

        match NonNull::new(ptr.cast_mut()) {
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
    pub fn from_segment(segment: Segment<'a, T>) -> Self {
        match segment.array() {
            // SAFETY: Segments validate their range on creation.
            Some(array) => unsafe { Self::new(array).sub(segment.offset(), segment.count()) },
            None => Self::empty(),
        }
    }

    /// A view over `length` elements starting at `start` of type-erased storage.
    ///
    /// The storage must be a `Vec<T>` or a `Box<[T]>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the storage holds anything else, even when `start` and
    /// `length` would be valid. Otherwise fails like [`from_array_range`](Self::from_array_range).
    pub fn from_any(storage: &'a (dyn Any + 'static), start: usize, length: usize) -> Result<Self>
    where
        T: 'static,
    {
        let elements: &'a [T] = if let Some(vec) = storage.downcast_ref::<Vec<T>>() {
            vec
        } else if let Some(boxed) = storage.downcast_ref::<Box<[T]>>() {
            boxed
        } else {
            return Err(Error::type_mismatch::<T>());
        };

        Self::from_array_range(Some(elements), start, length)
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

    /// Pointer to the first element. Dangling (but aligned and non-null) for some empty views.
    #[must_use]
    pub const fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// The elements as a standard slice.
    #[must_use]
    pub fn as_slice(&self) -> &'a [T] {
        // SAFETY: Every constructor guarantees the pointer is valid for reads of `len` elements
        // for `'a`, and that `len` elements fit in `isize::MAX` bytes.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
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

    /// Splits the view in two at `mid`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentOutOfRange`] if `mid` exceeds the length.
    pub fn split_at(self, mid: usize) -> Result<(Self, Self)> {
        let tail = self.len.checked_sub(mid).ok_or_else(|| Error::out_of_range("mid"))?;

        // SAFETY: `mid <= self.len`.
        let head = unsafe { self.sub(0, mid) };

        // SAFETY: `mid + tail == self.len`.
        let tail = unsafe { self.sub(mid, tail) };

        Ok((head, tail))
    }

    /// The element at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if the position does not resolve to an element.
    pub fn get(&self, position: impl Into<Position>) -> Result<&'a T> {
        let index = position.into().resolve_index(self.len)?;

        // SAFETY: `resolve_index` guarantees `index < self.len`.
        let element = unsafe { element_ptr(self.ptr, index) };

        // SAFETY: The element is in bounds and the storage is borrowed for `'a`.
        Ok(unsafe { element.as_ref() })
    }

    /// Wraps a pointer taken from another view without going through a reference, so that the
    /// result may alias a mutable view created from raw parts.
    pub(crate) const fn from_parts(ptr: NonNull<T>, len: usize) -> Self {
        Self {
            ptr,
            len,
            _storage: PhantomData,
        }
    }

    pub(crate) const fn non_null(&self) -> NonNull<T> {
        self.ptr
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

impl<T> Clone for ReadOnlyView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ReadOnlyView<'_, T> {}

impl<T> Default for ReadOnlyView<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> PartialEq for ReadOnlyView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr && self.len == other.len
    }
}

impl<T> Eq for ReadOnlyView<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for ReadOnlyView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Index<usize> for ReadOnlyView<'_, T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index` is not less than the length.
    fn index(&self, index: usize) -> &T {
        self.index(Position::FromStart(index))
    }
}

impl<T> Index<Position> for ReadOnlyView<'_, T> {
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

impl<'a, T> IntoIterator for ReadOnlyView<'a, T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &ReadOnlyView<'a, T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> From<&'a [T]> for ReadOnlyView<'a, T> {
    fn from(value: &'a [T]) -> Self {
        Self::new(value)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for ReadOnlyView<'a, T> {
    fn from(value: &'a [T; N]) -> Self {
        Self::new(value)
    }
}

impl<'a, T> From<&'a Vec<T>> for ReadOnlyView<'a, T> {
    fn from(value: &'a Vec<T>) -> Self {
        Self::new(value)
    }
}

impl<'a, T> From<Segment<'a, T>> for ReadOnlyView<'a, T> {
    fn from(value: Segment<'a, T>) -> Self {
        Self::from_segment(value)
    }
}

impl<T> ReadView<T> for ReadOnlyView<'_, T> {
    fn as_read_only(&self) -> ReadOnlyView<'_, T> {
        *self
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use testing_aids::assert_panic;

    use super::*;
    use crate::ErrorKind;

    static_assertions::assert_impl_all!(ReadOnlyView<'static, u8>: Send, Sync, Copy, Default);
    static_assertions::assert_impl_all!(ReadOnlyView<'static, std::sync::Arc<u8>>: Send, Sync);
    static_assertions::assert_not_impl_any!(ReadOnlyView<'static, std::cell::Cell<u8>>: Send, Sync);

    #[test]
    fn absent_storage_yields_the_empty_view() {
        assert_eq!(ReadOnlyView::<u8>::from_array(None), ReadOnlyView::default());
        assert_eq!(ReadOnlyView::<u8>::from_array_range(None, 0, 0), Ok(ReadOnlyView::default()));

        assert_eq!(
            ReadOnlyView::<u8>::from_array_range(None, 1, 0),
            Err(Error::ArgumentOutOfRange { param: "start" })
        );
        assert_eq!(
            ReadOnlyView::<u8>::from_array_range(None, 0, 1),
            Err(Error::ArgumentOutOfRange { param: "length" })
        );
    }

    #[test]
    fn array_range_is_validated() {
        let data = [1, 2, 3, 4, 5];

        let view = ReadOnlyView::from_array_range(Some(&data[..]), 1, 3).unwrap();
        assert_eq!(view.as_slice(), &[2, 3, 4]);

        let end = ReadOnlyView::from_array_range(Some(&data[..]), 5, 0).unwrap();
        assert!(end.is_empty());

        assert_eq!(
            ReadOnlyView::from_array_range(Some(&data[..]), 6, 0).unwrap_err().kind(),
            ErrorKind::Argument
        );
        assert_eq!(
            ReadOnlyView::from_array_range(Some(&data[..]), 2, 4),
            Err(Error::ArgumentOutOfRange { param: "length" })
        );
    }

    #[test]
    fn full_slice_is_the_same_view() {
        let data = [7_u16; 9];
        let view = ReadOnlyView::new(&data);

        assert_eq!(view.slice_len(0, view.len()), Ok(view));
        assert_eq!(view.slice(0), Ok(view));
        assert_eq!(view.slice_range(..), Ok(view));
        assert_ne!(view.slice(1).unwrap(), view);
    }

    #[test]
    fn slicing_composes() {
        let data: Vec<u32> = (0..10).collect();
        let view = ReadOnlyView::from(&data);

        let inner = view.slice_len(2, 6).unwrap().slice(3).unwrap();
        assert_eq!(inner.as_slice(), &[5, 6, 7]);

        let tail = view.slice_range(Position::FromEnd(2)..).unwrap();
        assert_eq!(tail.as_slice(), &[8, 9]);

        assert!(view.slice(11).is_err());
        assert!(view.slice_len(10, 1).is_err());
        assert!(view.slice_range(3..2).is_err());
    }

    #[test]
    fn positions_resolve_from_either_end() {
        let data = ['a', 'b', 'c'];
        let view = ReadOnlyView::new(&data);

        assert_eq!(view.get(0), Ok(&'a'));
        assert_eq!(view.get(Position::FromEnd(1)), Ok(&'c'));
        assert_eq!(view[Position::FromEnd(3)], 'a');
        assert_eq!(view[1], 'b');
        assert_eq!(
            view.get(3),
            Err(Error::IndexOutOfRange {
                position: Position::FromStart(3),
                len: 3
            })
        );
        assert_eq!(view.get(Position::END).unwrap_err().kind(), ErrorKind::IndexOutOfRange);

        assert_panic!(_ = view[3]);
        assert_panic!(_ = view[Position::FromEnd(4)]);
    }

    #[test]
    fn type_erased_storage_is_checked_first() {
        let numbers: Vec<u32> = vec![1, 2, 3];
        let boxed: Box<[u32]> = vec![4, 5].into_boxed_slice();
        let other: Vec<i64> = vec![1, 2, 3];

        let view = ReadOnlyView::<u32>::from_any(&numbers, 1, 2).unwrap();
        assert_eq!(view.as_slice(), &[2, 3]);

        let view = ReadOnlyView::<u32>::from_any(&boxed, 0, 2).unwrap();
        assert_eq!(view.as_slice(), &[4, 5]);

        let error = ReadOnlyView::<u32>::from_any(&other, 0, 0).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::TypeMismatch);
        assert_eq!(error, Error::TypeMismatch { expected: "u32" });

        assert_eq!(
            ReadOnlyView::<u32>::from_any(&numbers, 0, 4).unwrap_err().kind(),
            ErrorKind::Argument
        );
    }

    #[test]
    fn raw_parts_are_checked_for_overflow_and_null() {
        // SAFETY: A zero-length view from a null pointer never dereferences it.
        let empty = unsafe { ReadOnlyView::<u64>::from_raw_parts(std::ptr::null(), 0) };
        assert_eq!(empty, Ok(ReadOnlyView::default()));

        // SAFETY: Rejected before the pointer is used.
        let null = unsafe { ReadOnlyView::<u64>::from_raw_parts(std::ptr::null(), 1) };
        assert!(null.is_err());

        let data = [1_u64];
        // SAFETY: Rejected before the pointer is used.
        let huge = unsafe { ReadOnlyView::from_raw_parts(data.as_ptr(), usize::MAX / 4) };
        assert_eq!(huge, Err(Error::ArgumentOutOfRange { param: "length" }));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn zero_sized_views_may_exceed_32_bit_lengths() {
        let len = (1_usize << 31) + 9;

        // SAFETY: Zero-sized elements occupy no memory, so any aligned non-null pointer is valid.
        let view = unsafe { ReadOnlyView::<()>::from_raw_parts(NonNull::dangling().as_ptr(), len) }.unwrap();

        assert_eq!(view.len(), len);
        assert_eq!(view.get(len - 1), Ok(&()));
        assert_eq!(view.slice(len - 3).unwrap().len(), 3);
        assert!(view.get(len).is_err());
    }

    #[test]
    fn split_at_covers_the_whole_view() {
        let data = [1, 2, 3, 4];
        let (head, tail) = ReadOnlyView::new(&data).split_at(1).unwrap();

        assert_eq!(head.as_slice(), &[1]);
        assert_eq!(tail.as_slice(), &[2, 3, 4]);
        assert!(ReadOnlyView::new(&data).split_at(5).is_err());
    }

    #[test]
    fn segments_convert_to_views() {
        let data = [1, 2, 3, 4];
        let view = ReadOnlyView::from(Segment::new(&data, 1, 2).unwrap());

        assert_eq!(view.as_slice(), &[2, 3]);
        assert_eq!(ReadOnlyView::from(Segment::<u8>::empty()), ReadOnlyView::default());
    }

    #[test]
    fn debug_lists_elements_and_iteration_visits_them() {
        let data = [3, 1, 4];
        let view = ReadOnlyView::new(&data);

        assert_eq!(format!("{view:?}"), "[3, 1, 4]");
        assert_eq!(view.iter().copied().sum::<i32>(), 8);
        assert_eq!(view.into_iter().count(), 3);
        assert_eq!((&view).into_iter().max(), Some(&4));
    }
}
