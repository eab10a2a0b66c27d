use std::iter::Fuse;
use std::mem;

use tracing::warn;

use crate::segments::{GenomicRecord, ParentSegment, ParentSegmentBuilder};

/// Groups a position-ordered record stream into parent segments.
///
/// A new segment starts when the reference changes or when the distance to
/// the previous position exceeds `gap`. A record repeating the previous
/// position is spliced after it as an insertion. Records going backwards are
/// logged and dropped.
#[derive(Debug)]
pub struct SegmentAssembler<I: Iterator> {
    records: Fuse<I>,
    gap: u32,
    builder: ParentSegmentBuilder,
}

impl<I> SegmentAssembler<I>
where
    I: Iterator<Item = GenomicRecord>,
{
    /// Wrap a record stream.
    pub fn new(records: impl IntoIterator<IntoIter = I>, gap: u32) -> Self {
        Self {
            records: records.into_iter().fuse(),
            gap,
            builder: ParentSegmentBuilder::new(),
        }
    }

    /// Largest position distance allowed inside one segment.
    pub fn gap(&self) -> u32 {
        self.gap
    }

    fn starts_new_segment(&self, record: &GenomicRecord) -> bool {
        let Some(reference_id) = self.builder.reference_id() else {
            return false;
        };
        if *reference_id != record.reference_id {
            return true;
        }
        self.builder
            .last_position()
            .is_some_and(|last| record.position > last && record.position - last > self.gap)
    }

    fn add(&mut self, record: GenomicRecord) {
        let position = record.position;
        let result = match self.builder.last_position() {
            Some(last) if last == position => self.builder.insert_after(last, vec![record]),
            _ => self.builder.push(record),
        };
        if let Err(err) = result {
            warn!(position, error = %err, "skipping record during segment assembly");
        }
    }

    fn flush(&mut self) -> Option<ParentSegment> {
        mem::take(&mut self.builder).build().ok()
    }
}

impl<I> Iterator for SegmentAssembler<I>
where
    I: Iterator<Item = GenomicRecord>,
{
    type Item = ParentSegment;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(record) = self.records.next() {
            if self.starts_new_segment(&record) {
                let completed = self.flush();
                self.add(record);
                if completed.is_some() {
                    return completed;
                }
            } else {
                self.add(record);
            }
        }
        self.flush()
    }
}
