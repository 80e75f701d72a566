// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use thiserror::Error;

use crate::Position;

/// Any error that may arise when constructing a view or running an algorithm over one.
///
/// Every operation validates its arguments fully before it touches any element, so an error
/// always means that no observable mutation took place.
///
/// # Thread safety
///
/// This type is thread-safe.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A start offset or length argument falls outside the bounds of the storage or view.
    #[error("argument `{param}` is out of range")]
    ArgumentOutOfRange {
        /// The name of the offending parameter.
        param: &'static str,
    },

    /// The destination view is shorter than the source.
    #[error("destination is too short: {required} elements required, {available} available")]
    DestinationTooShort {
        /// The number of elements the operation needs to write.
        required: usize,
        /// The number of elements the destination can hold.
        available: usize,
    },

    /// The items view of a paired sort does not have the same length as the keys view.
    #[error("items length {items} does not match keys length {keys}")]
    LengthMismatch {
        /// Length of the keys view.
        keys: usize,
        /// Length of the items view.
        items: usize,
    },

    /// The source and destination views share memory at a non-zero offset.
    #[error("source and destination views overlap")]
    OverlappingViews,

    /// An element was accessed at a position outside the view.
    #[error("position {position} is out of range for a view of length {len}")]
    IndexOutOfRange {
        /// The position that was requested, as the caller gave it.
        position: Position,
        /// The length of the view at the time of the access.
        len: usize,
    },

    /// Type-erased storage holds elements of a different type than the requested view.
    #[error("storage does not hold elements of type `{expected}`")]
    TypeMismatch {
        /// The element type the view was requested for.
        expected: &'static str,
    },

    /// A range bound was null.
    #[error("range bound `{param}` must not be null")]
    NullBound {
        /// The name of the offending parameter.
        param: &'static str,
    },

    /// The operation cannot be carried out for this element type, e.g. sorting elements that
    /// have no total order.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

/// The category of an [`Error`], for matching without destructuring the variant fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Bad start/length, short destination, mismatched paired length or overlapping views.
    Argument,
    /// Element access outside the view.
    IndexOutOfRange,
    /// Type-erased storage of the wrong element type.
    TypeMismatch,
    /// Null range bound.
    NullBound,
    /// No order available for the element type.
    Unsupported,
}

impl ErrorKind {
    /// A short, stable name for the kind, as used in log events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Argument => "argument",
            Self::IndexOutOfRange => "index_out_of_range",
            Self::TypeMismatch => "type_mismatch",
            Self::NullBound => "null_bound",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// The category this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ArgumentOutOfRange { .. } | Self::DestinationTooShort { .. } | Self::LengthMismatch { .. } | Self::OverlappingViews => {
                ErrorKind::Argument
            }
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::NullBound { .. } => ErrorKind::NullBound,
            Self::Unsupported(_) => ErrorKind::Unsupported,
        }
    }

    pub(crate) fn out_of_range(param: &'static str) -> Self {
        Self::ArgumentOutOfRange { param }.reported()
    }

    pub(crate) fn destination_too_short(required: usize, available: usize) -> Self {
        Self::DestinationTooShort { required, available }.reported()
    }

    pub(crate) fn length_mismatch(keys: usize, items: usize) -> Self {
        Self::LengthMismatch { keys, items }.reported()
    }

    pub(crate) fn overlapping() -> Self {
        Self::OverlappingViews.reported()
    }

    pub(crate) fn index_out_of_range(position: Position, len: usize) -> Self {
        Self::IndexOutOfRange { position, len }.reported()
    }

    pub(crate) fn type_mismatch<T: ?Sized>() -> Self {
        Self::TypeMismatch {
            expected: std::any::type_name::<T>(),
        }
        .reported()
    }

    pub(crate) fn null_bound(param: &'static str) -> Self {
        Self::NullBound { param }.reported()
    }

    pub(crate) fn unsupported(what: &'static str) -> Self {
        Self::Unsupported(what).reported()
    }

    /// Emits the rejection event. Only ever called on the failure path.
    #[cfg_attr(test, mutants::skip)] // Logging only, no functional effect.
    fn reported(self) -> Self {
        #[cfg(any(feature = "logs", test))]
        tracing::event!(
            name: "memview.argument_rejected",
            tracing::Level::DEBUG,
            error.kind = %self.kind(),
            error.message = %self,
            "view argument rejected",
        );

        self
    }
}

/// A specialized `Result` for view construction and view algorithms.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use testing_aids::LogCapture;

    use super::*;

    #[test]
    fn kinds_are_distinct_per_category() {
        assert_eq!(Error::out_of_range("start").kind(), ErrorKind::Argument);
        assert_eq!(Error::destination_too_short(3, 2).kind(), ErrorKind::Argument);
        assert_eq!(Error::length_mismatch(3, 2).kind(), ErrorKind::Argument);
        assert_eq!(Error::overlapping().kind(), ErrorKind::Argument);
        assert_eq!(Error::index_out_of_range(Position::FromStart(5), 5).kind(), ErrorKind::IndexOutOfRange);
        assert_eq!(Error::type_mismatch::<u32>().kind(), ErrorKind::TypeMismatch);
        assert_eq!(Error::null_bound("low_inclusive").kind(), ErrorKind::NullBound);
        assert_eq!(Error::unsupported("no order").kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn messages_name_the_parameter() {
        assert_eq!(Error::out_of_range("length").to_string(), "argument `length` is out of range");
        assert_eq!(
            Error::null_bound("high_inclusive").to_string(),
            "range bound `high_inclusive` must not be null"
        );
        assert_eq!(
            Error::type_mismatch::<u32>().to_string(),
            "storage does not hold elements of type `u32`"
        );
    }

    #[test]
    fn rejection_is_logged() {
        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        _ = Error::destination_too_short(8, 6);

        capture.assert_contains("view argument rejected");
        capture.assert_contains("error.kind=argument");
    }

    #[test]
    fn kind_display_matches_as_str() {
        assert_eq!(ErrorKind::NullBound.to_string(), "null_bound");
        assert_eq!(ErrorKind::Unsupported.as_str(), "unsupported");
    }
}
