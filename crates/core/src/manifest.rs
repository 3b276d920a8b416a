// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered, immutable list of work items and its batch partitioning

use std::ops::Range;
use std::sync::Arc;

/// An ordered, immutable sequence of work items.
///
/// Cloning is cheap; workers receive a clone plus an index rather than a
/// copy of the item.
#[derive(Debug)]
pub struct Manifest<I> {
    items: Arc<[I]>,
}

impl<I> Clone for Manifest<I> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<I> Manifest<I> {
    pub fn new(items: impl Into<Arc<[I]>>) -> Self {
        Self {
            items: items.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&I> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Number of batches of `batch_size` (the last may be shorter)
    pub fn batch_count(&self, batch_size: usize) -> usize {
        if batch_size == 0 {
            return 0;
        }
        self.items.len().div_ceil(batch_size)
    }

    /// Contiguous batches in manifest order. Yields nothing for `batch_size == 0`.
    pub fn batches(&self, batch_size: usize) -> impl Iterator<Item = Batch> + '_ {
        let total = self.batch_count(batch_size);
        let len = self.items.len();
        (0..total).map(move |i| {
            let start = i * batch_size;
            Batch {
                number: i + 1,
                total,
                range: start..(start + batch_size).min(len),
            }
        })
    }
}

impl<I> From<Vec<I>> for Manifest<I> {
    fn from(items: Vec<I>) -> Self {
        Self::new(items)
    }
}

/// One contiguous slice of the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// 1-based batch number
    pub number: usize,
    /// Total batches in the run
    pub total: usize,
    /// Item indices covered by this batch
    pub range: Range<usize>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.number == self.total
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
