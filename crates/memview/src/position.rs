// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::{Error, Result};

/// An element position counted either from the start or from the end of a view.
///
/// `FromEnd(1)` denotes the last element and `FromEnd(0)` denotes the position one past it,
/// matching the `^n` notation some languages use for ranges.
///
/// # Examples
///
/// ```
/// use memview::Position;
///
/// assert_eq!(Position::FromStart(2).resolve(5), Ok(2));
/// assert_eq!(Position::FromEnd(1).resolve(5), Ok(4));
/// assert!(Position::FromEnd(6).resolve(5).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    /// The given number of elements past the start.
    FromStart(usize),
    /// The given number of elements before the end.
    FromEnd(usize),
}

impl Position {
    /// The position of the first element.
    pub const START: Self = Self::FromStart(0);

    /// The position one past the last element.
    pub const END: Self = Self::FromEnd(0);

    /// Resolves the position to a from-start offset within a view of length `len`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentOutOfRange`] if the resolved offset falls outside `[0, len]`.
    pub fn resolve(self, len: usize) -> Result<usize> {
        self.try_resolve(len).ok_or_else(|| Error::out_of_range("position"))
    }

    pub(crate) fn try_resolve(self, len: usize) -> Option<usize> {
        match self {
            Self::FromStart(offset) => (offset <= len).then_some(offset),
            Self::FromEnd(offset) => len.checked_sub(offset),
        }
    }

    /// Resolves the position to the index of an existing element in a view of length `len`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] unless the resolved offset is strictly less than `len`.
    pub fn resolve_index(self, len: usize) -> Result<usize> {
        match self.try_resolve(len) {
            Some(index) if index < len => Ok(index),
            _ => Err(Error::index_out_of_range(self, len)),
        }
    }
}

/// Formats from-start positions as the bare offset and from-end positions as `^n`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FromStart(offset) => write!(f, "{offset}"),
            Self::FromEnd(offset) => write!(f, "^{offset}"),
        }
    }
}

impl From<usize> for Position {
    fn from(value: usize) -> Self {
        Self::FromStart(value)
    }
}

/// A half-open range `[start, end)` of positions, each of which may count from either end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PositionRange {
    /// Inclusive start.
    pub start: Position,
    /// Exclusive end.
    pub end: Position,
}

impl PositionRange {
    /// The range covering every element.
    pub const ALL: Self = Self {
        start: Position::START,
        end: Position::END,
    };

    /// Creates a range from its two bounds.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// The range from `start` to the end of the view.
    #[must_use]
    pub const fn starting_at(start: Position) -> Self {
        Self { start, end: Position::END }
    }

    /// The range from the start of the view to `end`.
    #[must_use]
    pub const fn ending_at(end: Position) -> Self {
        Self { start: Position::START, end }
    }

    /// Resolves the range to a `(start, length)` pair within a view of length `len`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentOutOfRange`] if either bound falls outside `[0, len]` or if the
    /// end precedes the start.
    pub fn resolve(self, len: usize) -> Result<(usize, usize)> {
        let start = self.start.try_resolve(len).ok_or_else(|| Error::out_of_range("start"))?;
        let end = self.end.try_resolve(len).ok_or_else(|| Error::out_of_range("end"))?;
        let count = end.checked_sub(start).ok_or_else(|| Error::out_of_range("end"))?;

        Ok((start, count))
    }
}

impl From<Range<usize>> for PositionRange {
    fn from(value: Range<usize>) -> Self {
        Self::new(Position::FromStart(value.start), Position::FromStart(value.end))
    }
}

impl From<RangeFrom<usize>> for PositionRange {
    fn from(value: RangeFrom<usize>) -> Self {
        Self::starting_at(Position::FromStart(value.start))
    }
}

impl From<RangeTo<usize>> for PositionRange {
    fn from(value: RangeTo<usize>) -> Self {
        Self::ending_at(Position::FromStart(value.end))
    }
}

impl From<Range<Position>> for PositionRange {
    fn from(value: Range<Position>) -> Self {
        Self::new(value.start, value.end)
    }
}

impl From<RangeFrom<Position>> for PositionRange {
    fn from(value: RangeFrom<Position>) -> Self {
        Self::starting_at(value.start)
    }
}

impl From<RangeTo<Position>> for PositionRange {
    fn from(value: RangeTo<Position>) -> Self {
        Self::ending_at(value.end)
    }
}

impl From<RangeFull> for PositionRange {
    fn from(_: RangeFull) -> Self {
        Self::ALL
    }
}

/// Checks that `[start, start + length)` lies within `[0, total]`.
///
/// The start is checked first, so a bad start is reported even when the length is also bad.
pub(crate) fn check_slice(total: usize, start: usize, length: usize) -> Result<()> {
    if start > total {
        return Err(Error::out_of_range("start"));
    }

    if length > total - start {
        return Err(Error::out_of_range("length"));
    }

    Ok(())
}
