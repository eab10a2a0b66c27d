use std::collections::{HashMap, HashSet};
use std::iter::FusedIterator;
use std::slice;

use crate::segments::GenomicRecord;

/// Side tables modifying the logical record view of a segment.
///
/// Primary records are identified by their position. Hidden records stay in
/// the backing sequence and are only skipped by views. Records in the after
/// map are owned here, so they can never themselves be keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordOverlay {
    hidden: HashSet<u32>,
    after: HashMap<u32, Vec<GenomicRecord>>,
}

impl RecordOverlay {
    /// Create an empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn hide(&mut self, position: u32) {
        self.hidden.insert(position);
    }

    pub(crate) fn insert_after(&mut self, position: u32, records: Vec<GenomicRecord>) {
        self.after.entry(position).or_default().extend(records);
    }

    /// Whether the primary record at `position` is excluded from views.
    pub fn is_hidden(&self, position: u32) -> bool {
        self.hidden.contains(&position)
    }

    /// Records spliced immediately after the primary record at `position`.
    pub fn after(&self, position: u32) -> &[GenomicRecord] {
        self.after.get(&position).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of hidden primary records.
    pub fn hidden_len(&self) -> usize {
        self.hidden.len()
    }

    /// Total number of spliced records.
    pub fn after_len(&self) -> usize {
        self.after.values().map(Vec::len).sum()
    }

    /// Whether the overlay leaves the backing sequence unchanged.
    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty() && self.after.values().all(Vec::is_empty)
    }
}

/// Lazy, overlay-aware iterator over a run of primary records.
///
/// Each visible primary record is yielded, followed by its spliced records.
/// Spliced records are yielded even when the primary record they follow is
/// hidden.
#[derive(Debug, Clone)]
pub struct RecordView<'a> {
    primary: slice::Iter<'a, GenomicRecord>,
    spliced: slice::Iter<'a, GenomicRecord>,
    overlay: &'a RecordOverlay,
}

impl<'a> RecordView<'a> {
    pub(crate) fn new(primary: &'a [GenomicRecord], overlay: &'a RecordOverlay) -> Self {
        let empty: &'a [GenomicRecord] = &[];
        Self {
            primary: primary.iter(),
            spliced: empty.iter(),
            overlay,
        }
    }
}

impl<'a> Iterator for RecordView<'a> {
    type Item = &'a GenomicRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.spliced.next() {
                return Some(record);
            }
            let record = self.primary.next()?;
            self.spliced = self.overlay.after(record.position).iter();
            if !self.overlay.is_hidden(record.position) {
                return Some(record);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Hidden records may shrink the view; spliced records make the upper bound unknown.
        (self.spliced.len(), None)
    }
}

impl FusedIterator for RecordView<'_> {}
