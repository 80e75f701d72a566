// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// An element type with a distinguished null value.
///
/// Range searches over such elements reject a null bound up front, because "between null and
/// something" has no useful meaning. Null elements inside the searched view are fine: under
/// `PartialOrd` they order before every non-null value, so they never fall within a non-null range.
///
/// # Examples
///
/// ```
/// use memview::Nullable;
///
/// assert!(None::<u8>.is_null());
/// assert!(!Some(3).is_null());
/// assert!(std::ptr::null::<u8>().is_null());
/// ```
pub trait Nullable {
    /// Whether this value is the null value.
    fn is_null(&self) -> bool;
}

impl<T> Nullable for Option<T> {
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl<T: ?Sized> Nullable for *const T {
    fn is_null(&self) -> bool {
        <*const T>::is_null(*self)
    }
}

impl<T: ?Sized> Nullable for *mut T {
    fn is_null(&self) -> bool {
        <*mut T>::is_null(*self)
    }
}
