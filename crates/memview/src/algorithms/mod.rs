// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Slice-level algorithm kernels behind the view methods.
//!
//! Views validate arguments and resolve positions; everything in here takes already-validated
//! slices or pointer ranges.

pub(crate) mod bitwise;
pub(crate) mod compare;
pub(crate) mod mutate;
pub(crate) mod search;
pub(crate) mod sort;
pub(crate) mod subsequence;
