// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Instrumented element types for verifying the work an algorithm performs.
//!
//! [`Counted`] tallies every comparison it takes part in, which makes "each element is compared at
//! most once" directly observable. [`Guarded`] panics when compared after being poisoned, which
//! turns an over-read past a match into a test failure.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{self, AtomicUsize};

/// A shared tally of comparisons performed on [`Counted`] elements.
///
/// Clones share the same tally.
#[derive(Clone, Debug, Default)]
pub struct CompareCounter {
    count: Arc<AtomicUsize>,
}

impl CompareCounter {
    /// Creates a counter starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of comparisons recorded so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.load(atomic::Ordering::Relaxed)
    }

    /// Resets the tally to zero.
    pub fn reset(&self) {
        self.count.store(0, atomic::Ordering::Relaxed);
    }

    fn record(&self) {
        self.count.fetch_add(1, atomic::Ordering::Relaxed);
    }
}

/// An element that records each `PartialEq` and `Ord` call on a [`CompareCounter`].
///
/// A comparison between two counted elements is recorded once, on the counter of the left-hand side.
#[derive(Clone)]
pub struct Counted<T> {
    value: T,
    counter: CompareCounter,
}

impl<T> Counted<T> {
    /// Wraps `value`, recording comparisons on `counter`.
    #[must_use]
    pub fn new(value: T, counter: &CompareCounter) -> Self {
        Self {
            value,
            counter: counter.clone(),
        }
    }

    /// The wrapped value.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Counted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<T: PartialEq> PartialEq for Counted<T> {
    fn eq(&self, other: &Self) -> bool {
        self.counter.record();
        self.value == other.value
    }
}

impl<T: Eq> Eq for Counted<T> {}

impl<T: Ord> PartialOrd for Counted<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for Counted<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.counter.record();
        self.value.cmp(&other.value)
    }
}

/// An element that panics if it takes part in a comparison after [`poison`](Self::poison).
#[derive(Clone)]
pub struct Guarded<T> {
    value: T,
    poisoned: bool,
}

impl<T> Guarded<T> {
    /// Wraps `value`, initially safe to compare.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self { value, poisoned: false }
    }

    /// Makes every later comparison involving this element panic.
    pub fn poison(&mut self) {
        self.poisoned = true;
    }

    /// Whether the element is poisoned.
    #[must_use]
    pub const fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    fn check(&self, other: &Self) {
        assert!(!(self.poisoned || other.poisoned), "a poisoned element was compared");
    }
}

impl<T: fmt::Debug> fmt::Debug for Guarded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guarded")
            .field("value", &self.value)
            .field("poisoned", &self.poisoned)
            .finish()
    }
}

impl<T: PartialEq> PartialEq for Guarded<T> {
    fn eq(&self, other: &Self) -> bool {
        self.check(other);
        self.value == other.value
    }
}

impl<T: PartialOrd> PartialOrd for Guarded<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.check(other);
        self.value.partial_cmp(&other.value)
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use testing_aids::assert_panic;

    use super::*;

    #[test]
    fn counter_tallies_every_comparison() {
        let counter = CompareCounter::new();
        let a = Counted::new(1, &counter);
        let b = Counted::new(2, &counter);

        assert_ne!(a, b);
        assert!(a < b);
        assert_eq!(a.cmp(&b), Ordering::Less);
        assert_eq!(counter.count(), 3);

        counter.reset();
        assert_eq!(counter.count(), 0);
        assert_eq!(*a.value(), 1);
        assert_eq!(format!("{b:?}"), "2");
    }

    #[test]
    fn guarded_panics_only_when_poisoned() {
        let a = Guarded::new("a");
        let mut b = Guarded::new("b");

        assert_ne!(a, b);
        assert!(a < b);

        b.poison();
        assert!(b.is_poisoned());

        assert_panic!(_ = a == b);
        assert_panic!(_ = b.partial_cmp(&a));
    }
}
