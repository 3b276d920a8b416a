// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    empty = { 0, 5, 0 },
    exact = { 10, 5, 2 },
    remainder = { 23, 5, 5 },
    single_item_batches = { 23, 1, 23 },
    batch_larger_than_manifest = { 3, 10, 1 },
    zero_batch_size = { 10, 0, 0 },
)]
fn batch_count_rounds_up(items: usize, batch_size: usize, expected: usize) {
    let manifest = Manifest::from((0..items).collect::<Vec<_>>());
    assert_eq!(manifest.batch_count(batch_size), expected);
    assert_eq!(manifest.batches(batch_size).count(), expected);
}

#[test]
fn batches_are_contiguous_and_last_may_be_short() {
    let manifest = Manifest::from((0..12).collect::<Vec<_>>());
    let batches: Vec<_> = manifest.batches(5).collect();

    assert_eq!(batches[0].range, 0..5);
    assert_eq!(batches[1].range, 5..10);
    assert_eq!(batches[2].range, 10..12);
    assert_eq!(batches[2].len(), 2);
    assert!(batches[2].is_last());
    assert!(!batches[0].is_last());
    assert_eq!(batches.iter().map(|b| b.number).collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn clones_share_items() {
    let manifest = Manifest::from(vec!["a".to_string(), "b".to_string()]);
    let other = manifest.clone();
    assert_eq!(other.item(1).map(String::as_str), Some("b"));
    assert_eq!(manifest.items().len(), 2);
    assert!(other.item(2).is_none());
}
