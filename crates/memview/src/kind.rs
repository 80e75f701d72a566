// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::mem::needs_drop;

/// How the algorithms in this crate treat elements of a given type.
///
/// The kind is derived from the type alone and never stored in a view. The algorithms branch on
/// [`is_bitwise`](Self::is_bitwise) only: bitwise elements take the batched word path, every other
/// element goes through `Clone`, `PartialEq` and `PartialOrd` one at a time.
///
/// `ReferenceContaining` and `Plain` share that per-element path. Assigning to a slot in Rust
/// runs the previous value's destructor, so writes through the shared path already release what
/// a reference-containing element owns, and for a plain element the same assignment has no
/// destructor to run. The distinction is reported for callers that size or audit work by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Equality of two values is equality of their bytes. Such elements are compared in
    /// hardware-width batches and cleared by zeroing their bytes.
    Bitwise,

    /// The type owns resources that are released when a slot is overwritten. Clearing assigns
    /// `T::default()` to every slot, which drops the previous value.
    ReferenceContaining,

    /// Any other type. Comparisons go through `PartialEq`/`PartialOrd` or a user comparer.
    Plain,
}

/// Primitive types whose `PartialEq` is exactly byte equality.
///
/// Floating point types are deliberately absent: `NaN != NaN` and `0.0 == -0.0`.
const BITWISE_TYPE_IDS: [typeid::ConstTypeId; 15] = [
    typeid::ConstTypeId::of::<u8>(),
    typeid::ConstTypeId::of::<i8>(),
    typeid::ConstTypeId::of::<bool>(),
    typeid::ConstTypeId::of::<u16>(),
    typeid::ConstTypeId::of::<i16>(),
    typeid::ConstTypeId::of::<u32>(),
    typeid::ConstTypeId::of::<i32>(),
    typeid::ConstTypeId::of::<char>(),
    typeid::ConstTypeId::of::<u64>(),
    typeid::ConstTypeId::of::<i64>(),
    typeid::ConstTypeId::of::<u128>(),
    typeid::ConstTypeId::of::<i128>(),
    typeid::ConstTypeId::of::<usize>(),
    typeid::ConstTypeId::of::<isize>(),
    typeid::ConstTypeId::of::<()>(),
];

impl ElementKind {
    /// Classifies `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use memview::ElementKind;
    ///
    /// assert_eq!(ElementKind::of::<i32>(), ElementKind::Bitwise);
    /// assert_eq!(ElementKind::of::<String>(), ElementKind::ReferenceContaining);
    /// assert_eq!(ElementKind::of::<f64>(), ElementKind::Plain);
    /// ```
    #[must_use]
    pub fn of<T>() -> Self {
        if is_bitwise::<T>() {
            Self::Bitwise
        } else if needs_drop::<T>() {
            Self::ReferenceContaining
        } else {
            Self::Plain
        }
    }

    /// Whether elements of this kind may be compared by their bytes.
    #[must_use]
    pub const fn is_bitwise(self) -> bool {
        matches!(self, Self::Bitwise)
    }

    /// Whether overwriting an element of this kind must drop the previous value.
    #[must_use]
    pub const fn is_reference_containing(self) -> bool {
        matches!(self, Self::ReferenceContaining)
    }
}

fn is_bitwise<T>() -> bool {
    let typeid_of_t = typeid::of::<T>();
    BITWISE_TYPE_IDS.iter().any(|&id| id == typeid_of_t)
}

/// The unsigned word a bitwise element is reinterpreted as in batched loops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Word {
    Zero,
    W8,
    W16,
    W32,
    W64,
    W128,
}

impl Word {
    /// The word matching `T`, if `T` is bitwise and its layout equals that word's layout.
    pub(crate) fn of<T>() -> Option<Self> {
        if !is_bitwise::<T>() {
            return None;
        }

        let word = match size_of::<T>() {
            0 => return Some(Self::Zero),
            1 if align_of::<T>() == align_of::<u8>() => Self::W8,
            2 if align_of::<T>() == align_of::<u16>() => Self::W16,
            4 if align_of::<T>() == align_of::<u32>() => Self::W32,
            8 if align_of::<T>() == align_of::<u64>() => Self::W64,
            16 if align_of::<T>() == align_of::<u128>() => Self::W128,
            _ => return None,
        };

        Some(word)
    }
}
