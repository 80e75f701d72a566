// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Non-owning views over contiguous memory, with search, comparison, sort and mutation algorithms.
//!
//! A view is a pointer and a length over storage that somebody else owns: a slice, an array, a
//! `Vec`, a [`Segment`] or a raw buffer. Views never allocate and never free. There are two kinds:
//!
//! * [`ReadOnlyView`] hands out shared access and is `Copy`.
//! * [`View`] hands out exclusive access and carries the mutation algorithms.
//!
//! Every `View` converts into a `ReadOnlyView`. Both implement [`ReadView`], which provides the
//! read-only algorithms:
//!
//! * Search for one value, two or three values, a set of values, a value range or a subsequence,
//!   from either end, and the inverse "any except" forms.
//! * Structural comparison: [`sequence_equal`], [`sequence_compare_to`], [`common_prefix_length`],
//!   [`starts_with`] and [`ends_with`].
//! * Copying into a [`View`], correct even when source and destination share memory.
//!
//! ```
//! use memview::{ReadOnlyView, ReadView, View};
//!
//! let mut buffer = [91, 92, -93, 94];
//!
//! let view = ReadOnlyView::new(&buffer);
//! assert_eq!(view.index_of(&-93), Some(2));
//! assert_eq!(view.index_of(&999), None);
//!
//! let mut view = View::new(&mut buffer);
//! view.sort();
//! assert_eq!(view.as_slice(), &[-93, 91, 92, 94]);
//! ```
//!
//! # Element kinds
//!
//! Algorithms pick their strategy from the [`ElementKind`] of `T`. Primitive integers, `bool` and
//! `char` are compared as raw machine words in batches (bytes through [`memchr`]), types that own
//! resources are cleared by assigning `T::default()`, and everything else goes through its
//! `PartialEq` and `PartialOrd` implementations one element at a time.
//!
//! # Addressing
//!
//! Element addresses are computed with the overflow-safe arithmetic in [`offset`], so views with
//! more than 2³¹ elements index correctly and lengths that could not describe a real allocation
//! are rejected when a view is created from raw parts.
//!
//! # Errors
//!
//! Fallible operations return [`Result`] with an [`Error`] describing the rejected argument. Every
//! check runs before anything is written, so a failed operation leaves its views untouched.
//!
//! # Features
//!
//! * `logs` emits [`tracing`] events when arguments are rejected and when a [`SearchValues`] is
//!   built.
//! * `test-util` exposes the `testing` module with instrumented element types that count or
//!   forbid comparisons.
//!
//! [`sequence_equal`]: ReadView::sequence_equal
//! [`sequence_compare_to`]: ReadView::sequence_compare_to
//! [`common_prefix_length`]: ReadView::common_prefix_length
//! [`starts_with`]: ReadView::starts_with
//! [`ends_with`]: ReadView::ends_with
//! [`memchr`]: https://docs.rs/memchr
//! [`tracing`]: https://docs.rs/tracing

mod algorithms;
mod error;
mod kind;
mod nullable;
pub mod offset;
mod position;
mod read_only;
mod read_view;
mod search_values;
mod segment;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;
mod view;

pub use error::{Error, ErrorKind, Result};
pub use kind::ElementKind;
pub use nullable::Nullable;
pub use position::{Position, PositionRange};
pub use read_only::ReadOnlyView;
pub use read_view::ReadView;
pub use search_values::{SearchElement, SearchValues};
pub use segment::{Segment, SegmentMut};
pub use view::View;
