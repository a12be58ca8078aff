//! Iterator over occupied slots
//!
//! Yields entries in storage order, not insertion order. The borrow on the
//! table keeps it from being mutated while an iterator is alive.

use std::iter::{Enumerate, FusedIterator};
use std::slice;

use super::slot::Slot;
use super::EntryView;

/// Iterator over the entries of a [`HashTable`](super::HashTable)
pub struct Iter<'a> {
    inner: Enumerate<slice::Iter<'a, Slot>>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(slots: &'a [Slot]) -> Self {
        Self {
            inner: slots.iter().enumerate(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = EntryView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|(index, slot)| match slot {
            Slot::Occupied(entry) => Some(EntryView::new(index, entry)),
            _ => None,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl FusedIterator for Iter<'_> {}
