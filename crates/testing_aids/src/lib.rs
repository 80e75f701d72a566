// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! An unpublished crate containing testing utilities for use within this repo.
//!
//! * [`LogCapture`] records the formatted output of `tracing` events so tests can assert on it.
//! * [`assert_panic!`] checks that a statement panics without aborting the test.

mod log;
mod macros;

pub use log::*;
