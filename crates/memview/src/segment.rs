// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use crate::Result;
use crate::position::check_slice;

/// A validated `(array, offset, count)` descriptor over shared storage.
///
/// A segment without an array is the empty segment. Converting a segment into a
/// [`ReadOnlyView`](crate::ReadOnlyView) never fails, because the bounds were checked when the
/// segment was created.
pub struct Segment<'a, T> {
    array: Option<&'a [T]>,
    offset: usize,
    count: usize,
}

impl<'a, T> Segment<'a, T> {
    /// Describes `count` elements of `array` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentOutOfRange`](crate::Error::ArgumentOutOfRange) if the range does
    /// not lie within `array`.
    pub fn new(array: &'a [T], offset: usize, count: usize) -> Result<Self> {
        check_slice(array.len(), offset, count)?;

        Ok(Self {
            array: Some(array),
            offset,
            count,
        })
    }

    /// Describes all of `array`.
    #[must_use]
    pub const fn whole(array: &'a [T]) -> Self {
        Self {
            array: Some(array),
            offset: 0,
            count: array.len(),
        }
    }

    /// The empty segment, which has no array.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            array: None,
            offset: 0,
            count: 0,
        }
    }

    /// The underlying array, if any.
    #[must_use]
    pub const fn array(&self) -> Option<&'a [T]> {
        self.array
    }

    /// Index of the first described element within the array.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Number of described elements.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// The described elements.
    #[must_use]
    pub fn as_slice(&self) -> &'a [T] {
        self.array
            .and_then(|array| array.get(self.offset..self.offset + self.count))
            .unwrap_or_default()
    }
}

impl<T> Clone for Segment<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Segment<'_, T> {}

impl<T> Default for Segment<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for Segment<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segment")
            .field("offset", &self.offset)
            .field("count", &self.count)
            .field("elements", &self.as_slice())
            .finish()
    }
}

/// A validated `(array, offset, count)` descriptor over exclusively borrowed storage.
///
/// The mutable counterpart of [`Segment`], convertible into a [`View`](crate::View).
pub struct SegmentMut<'a, T> {
    array: Option<&'a mut [T]>,
    offset: usize,
    count: usize,
}

impl<'a, T> SegmentMut<'a, T> {
    /// Describes `count` elements of `array` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentOutOfRange`](crate::Error::ArgumentOutOfRange) if the range does
    /// not lie within `array`.
    pub fn new(array: &'a mut [T], offset: usize, count: usize) -> Result<Self> {
        check_slice(array.len(), offset, count)?;

        Ok(Self {
            array: Some(array),
            offset,
            count,
        })
    }

    /// Describes all of `array`.
    #[must_use]
    pub fn whole(array: &'a mut [T]) -> Self {
        let count = array.len();

        Self {
            array: Some(array),
            offset: 0,
            count,
        }
    }

    /// The empty segment, which has no array.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            array: None,
            offset: 0,
            count: 0,
        }
    }

    /// Index of the first described element within the array.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Number of described elements.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// The described elements, consuming the segment.
    #[must_use]
    pub fn into_slice(self) -> &'a mut [T] {
        let (offset, count) = (self.offset, self.count);

        self.array
            .and_then(|array| array.get_mut(offset..offset + count))
            .unwrap_or_default()
    }
}

impl<T> Default for SegmentMut<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> fmt::Debug for SegmentMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentMut")
            .field("has_array", &self.array.is_some())
            .field("offset", &self.offset)
            .field("count", &self.count)
            .finish()
    }
}
