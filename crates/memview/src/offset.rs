// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Overflow-safe address arithmetic.
//!
//! Every element address in this crate is computed as `base + index * size_of::<T>()`. The
//! multiplication is checked at the full pointer width and the product is then checked against
//! `isize::MAX`, the largest byte extent a single Rust allocation may have. No step ever passes
//! through a 32-bit integer, so views with more than 2³¹ elements resolve to the correct address.

use std::ptr::NonNull;

/// The largest number of bytes that a single view may span.
pub const MAX_BYTE_LEN: usize = isize::MAX.unsigned_abs();

/// Computes `count * size_of::<T>()` without any possibility of wrap-around.
///
/// Returns `None` if the product exceeds [`MAX_BYTE_LEN`].
///
/// # Examples
///
/// ```
/// use memview::offset::byte_len;
///
/// assert_eq!(byte_len::<u64>(3), Some(24));
/// assert_eq!(byte_len::<u64>(usize::MAX), None);
/// assert_eq!(byte_len::<()>(usize::MAX), Some(0));
/// ```
#[must_use]
pub const fn byte_len<T>(count: usize) -> Option<usize> {
    match count.checked_mul(size_of::<T>()) {
        Some(bytes) if bytes <= MAX_BYTE_LEN => Some(bytes),
        _ => None,
    }
}

/// The byte offset of the element at `index`, relative to the start of a view.
///
/// This is the same computation as [`byte_len`]; the separate name documents intent at call sites.
#[must_use]
pub const fn byte_offset<T>(index: usize) -> Option<usize> {
    byte_len::<T>(index)
}

/// The largest element count a view of `T` may have.
///
/// For zero-sized types every count is addressable, so this is `usize::MAX`.
#[must_use]
pub const fn max_len<T>() -> usize {
    match size_of::<T>() {
        0 => usize::MAX,
        size => MAX_BYTE_LEN / size,
    }
}

/// Returns a pointer to the element at `index` elements past `base`.
///
/// # Safety
///
/// `index` must be within (or one past the end of) the allocation that `base` points into, which
/// in particular means [`byte_offset`] succeeds for it.
#[inline]
pub(crate) unsafe fn element_ptr<T>(base: NonNull<T>, index: usize) -> NonNull<T> {
    let Some(bytes) = byte_offset::<T>(index) else {
        // The caller guarantees the index lies within a live allocation, whose byte size is
        // never above MAX_BYTE_LEN.
        unreachable!("element offset exceeds the maximum allocation size");
    };

    // SAFETY: Forwarding the caller's guarantee that the target address is within the allocation.
    unsafe { base.byte_add(bytes) }
}

/// Returns the signed element offset from `from` to `to`, rounded towards negative infinity
/// when the two addresses are not a whole number of elements apart.
///
/// Zero-sized types have offset zero between any two addresses.
#[must_use]
pub(crate) fn element_offset<T>(from: *const T, to: *const T) -> isize {
    let size = size_of::<T>();

    if size == 0 {
        return 0;
    }

    // Addresses within one allocation are at most isize::MAX apart, so the wrapped difference
    // reinterpreted as signed is the exact signed distance.
    let delta = to.addr().wrapping_sub(from.addr()).cast_signed();

    delta.div_euclid(size.cast_signed())
}

/// Returns whether the byte ranges `[a, a + a_len)` and `[b, b + b_len)` elements share memory.
#[must_use]
pub(crate) fn ranges_overlap<T>(a: *const T, a_len: usize, b: *const T, b_len: usize) -> bool {
    let (Some(a_bytes), Some(b_bytes)) = (byte_len::<T>(a_len), byte_len::<T>(b_len)) else {
        return false;
    };

    if a_bytes == 0 || b_bytes == 0 {
        return false;
    }

    let a = a.addr();
    let b = b.addr();

    a < b.saturating_add(b_bytes) && b < a.saturating_add(a_bytes)
}
