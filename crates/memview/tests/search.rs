// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(missing_docs, reason = "test code")]

//! Tests for the search algorithms of `ReadView`.

use memview::{Error, ReadOnlyView, ReadView, SearchValues};

#[test]
fn finds_a_value_or_reports_none() {
    let data = [91, 92, -93, 94];
    let view = ReadOnlyView::new(&data);

    assert_eq!(view.index_of(&-93), Some(2));
    assert_eq!(view.index_of(&999), None);
    assert_eq!(view.last_index_of(&91), Some(0));
}

#[test]
fn batched_and_scalar_paths_agree() {
    // Lengths straddle the batch width so that every remainder size is exercised.
    for len in 0..70_usize {
        let data: Vec<u32> = (0..len).map(|n| u32::try_from(n % 7).unwrap()).collect();
        let view = ReadOnlyView::new(&data);

        for needle in 0..8 {
            assert_eq!(view.index_of(&needle), data.iter().position(|x| *x == needle));
            assert_eq!(view.last_index_of(&needle), data.iter().rposition(|x| *x == needle));
            assert_eq!(view.count(&needle), data.iter().filter(|x| **x == needle).count());
        }

        assert_eq!(view.index_of_any_except2(&0, &1), data.iter().position(|x| *x > 1));
    }
}

#[test]
fn zero_length_needle_matches_at_both_ends() {
    let data = b"haystack";
    let view = ReadOnlyView::new(data);

    assert_eq!(view.index_of_seq(b""), Some(0));
    assert_eq!(view.last_index_of_seq(b""), Some(data.len()));
    assert_eq!(ReadOnlyView::<u8>::empty().last_index_of_seq(b""), Some(0));
}

#[test]
fn needle_longer_than_the_remainder_never_matches() {
    let data = [1, 2, 3, 1, 2];
    let view = ReadOnlyView::new(&data);

    assert_eq!(view.index_of_seq(&[1, 2, 3]), Some(0));
    assert_eq!(view.last_index_of_seq(&[1, 2]), Some(3));
    assert_eq!(view.index_of_seq(&[1, 2, 3, 4]), None);
    assert_eq!(view.slice(3).unwrap().index_of_seq(&[1, 2, 3]), None);
}

#[test]
fn null_range_bounds_fail_fast() {
    let data = [Some('m'), None, Some('x')];
    let view = ReadOnlyView::new(&data);

    assert_eq!(
        view.try_index_of_any_in_range(&None, &Some('z')),
        Err(Error::NullBound { param: "low_inclusive" })
    );
    assert_eq!(
        view.try_index_of_any_except_in_range(&Some('a'), &None),
        Err(Error::NullBound { param: "high_inclusive" })
    );
    assert_eq!(view.try_last_index_of_any_in_range(&Some('a'), &Some('z')), Ok(Some(2)));
}

#[test]
fn search_values_do_not_alias_high_bytes() {
    let ascii = SearchValues::<u16>::new(&[u16::from(b'A'), u16::from(b'B')]);
    let text: Vec<u16> = vec![0x0141, 0x0242, 0x0041, 0x0042];
    let view = ReadOnlyView::new(&text);

    assert_eq!(view.index_of_any_values(&ascii), Some(2));
    assert_eq!(view.last_index_of_any_except_values(&ascii), Some(1));
}

#[test]
fn search_values_handle_an_explicit_zero() {
    let with_zero = SearchValues::<u8>::new(&[0, b'z']);
    let data = [b'a', 0, b'z'];
    let view = ReadOnlyView::new(&data);

    assert_eq!(view.index_of_any_values(&with_zero), Some(1));
    assert_eq!(view.index_of_any_except_values(&with_zero), Some(0));
    assert_eq!(view.last_index_of_any_values(&with_zero), Some(2));
}

#[test]
fn large_sets_match_small_ones() {
    let data: Vec<u8> = (0..200).map(|n| n % 50).collect();
    let view = ReadOnlyView::new(&data);
    let values: Vec<u8> = (40..50).collect();

    assert_eq!(view.index_of_any(&values), Some(40));
    assert_eq!(view.last_index_of_any(&values), Some(199));
    assert_eq!(view.index_of_any_except(&values), Some(0));
    assert_eq!(view.slice_len(40, 10).unwrap().index_of_any_except(&values), None);
    assert_eq!(
        view.index_of_any_values(&SearchValues::new(&values)),
        view.index_of_any(&values)
    );
}
