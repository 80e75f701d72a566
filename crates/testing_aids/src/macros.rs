// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Asserts that the statement panics.
///
/// Unwind safety is asserted because a test that observes the panic does not go on to use any
/// state the statement may have left half-updated. Use it in statement position.
///
/// ```
/// let values = vec![1, 2, 3];
/// testing_aids::assert_panic!(_ = values[3]);
/// ```
#[macro_export]
macro_rules! assert_panic {
    ($stmt:stmt$(,)?) => {
        #[allow(clippy::multi_assignments, reason = "macro untidiness")]
        #[expect(clippy::allow_attributes, reason = "macro untidiness")]
        ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| -> () { _ = { $stmt } }))
            .expect_err("assert_panic! argument did not panic")
    };
}
