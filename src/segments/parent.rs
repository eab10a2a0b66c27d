use std::sync::Arc;

use thiserror::Error;

use crate::segments::{GenomicRecord, RecordOverlay, RecordView};

/// Errors raised while assembling a parent segment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SegmentError {
    /// No primary record was supplied.
    #[error("segment contains no records")]
    EmptySegment,

    /// Record belongs to a different reference sequence than the segment.
    #[error("record on {found} cannot join segment on {expected}")]
    ReferenceMismatch {
        /// Reference id of the segment.
        expected: Arc<str>,
        /// Reference id of the rejected record.
        found: Arc<str>,
    },

    /// Primary positions must be strictly increasing.
    #[error("position {position} does not follow previous position {previous}")]
    PositionOutOfOrder {
        /// Last accepted primary position.
        previous: u32,
        /// Rejected position.
        position: u32,
    },

    /// Overlay edit names a position with no primary record.
    #[error("no primary record at position {0}")]
    UnknownPosition(u32),
}

/// Contiguous, position-ordered run of records on one reference sequence.
///
/// The segment owns its backing sequence and overlay. Sub-segments borrow it
/// read-only and never modify either.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentSegment {
    reference_id: Arc<str>,
    records: Vec<GenomicRecord>,
    overlay: RecordOverlay,
}

impl ParentSegment {
    /// Start building a segment.
    pub fn builder() -> ParentSegmentBuilder {
        ParentSegmentBuilder::new()
    }

    /// Build an overlay-free segment from position-ordered records.
    pub fn from_records<I>(records: I) -> Result<Self, SegmentError>
    where
        I: IntoIterator<Item = GenomicRecord>,
    {
        let mut builder = ParentSegmentBuilder::new();
        for record in records {
            builder.push(record)?;
        }
        builder.build()
    }

    /// Reference sequence shared by every record of the segment.
    pub fn reference_id(&self) -> &Arc<str> {
        &self.reference_id
    }

    /// Position of the first primary record.
    pub fn first_position(&self) -> u32 {
        // Builder guarantees at least one record.
        self.records[0].position
    }

    /// Position of the last primary record.
    pub fn last_position(&self) -> u32 {
        self.records[self.records.len() - 1].position
    }

    /// Number of primary records, hidden ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a built segment.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Backing sequence, ignoring the overlay.
    pub fn records(&self) -> &[GenomicRecord] {
        &self.records
    }

    /// Hidden records and spliced insertions.
    pub fn overlay(&self) -> &RecordOverlay {
        &self.overlay
    }

    /// Primary record at `position`, hidden or not.
    pub fn record_at(&self, position: u32) -> Option<&GenomicRecord> {
        self.records
            .binary_search_by_key(&position, |record| record.position)
            .ok()
            .map(|idx| &self.records[idx])
    }

    /// Overlay-aware view of the whole segment.
    pub fn all_records(&self) -> RecordView<'_> {
        self.all_records_in(self.first_position(), self.last_position())
    }

    /// Overlay-aware view of primary records within `[start, end]`.
    ///
    /// Every call returns an independent iterator.
    pub fn all_records_in(&self, start: u32, end: u32) -> RecordView<'_> {
        RecordView::new(self.primary_range(start, end), &self.overlay)
    }

    /// Number of records the view over `[start, end]` yields.
    pub fn actual_length(&self, start: u32, end: u32) -> usize {
        self.primary_range(start, end)
            .iter()
            .map(|record| {
                let visible = usize::from(!self.overlay.is_hidden(record.position));
                visible + self.overlay.after(record.position).len()
            })
            .sum()
    }

    /// Position of the first primary record within `[start, end]`.
    pub fn first_position_in(&self, start: u32, end: u32) -> Option<u32> {
        self.primary_range(start, end).first().map(|record| record.position)
    }

    fn primary_range(&self, start: u32, end: u32) -> &[GenomicRecord] {
        if start > end {
            return &[];
        }
        let lower = self.records.partition_point(|record| record.position < start);
        let upper = self.records.partition_point(|record| record.position <= end);
        &self.records[lower..upper]
    }
}

/// Incremental constructor validating segment invariants.
#[derive(Debug, Default)]
pub struct ParentSegmentBuilder {
    records: Vec<GenomicRecord>,
    overlay: RecordOverlay,
}

impl ParentSegmentBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of primary records pushed so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no primary record was pushed yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of the last primary record pushed.
    pub fn last_position(&self) -> Option<u32> {
        self.records.last().map(|record| record.position)
    }

    /// Reference id fixed by the first record.
    pub fn reference_id(&self) -> Option<&Arc<str>> {
        self.records.first().map(|record| &record.reference_id)
    }

    /// Append a primary record.
    pub fn push(&mut self, record: GenomicRecord) -> Result<&mut Self, SegmentError> {
        self.check_reference(&record)?;
        if let Some(previous) = self.last_position() {
            if record.position <= previous {
                return Err(SegmentError::PositionOutOfOrder {
                    previous,
                    position: record.position,
                });
            }
        }
        self.records.push(record);
        Ok(self)
    }

    /// Exclude the primary record at `position` from every view.
    pub fn hide(&mut self, position: u32) -> Result<&mut Self, SegmentError> {
        self.check_known(position)?;
        self.overlay.hide(position);
        Ok(self)
    }

    /// Splice `records` immediately after the primary record at `position`.
    ///
    /// Repeated calls for the same position append in call order.
    pub fn insert_after(
        &mut self,
        position: u32,
        records: Vec<GenomicRecord>,
    ) -> Result<&mut Self, SegmentError> {
        self.check_known(position)?;
        for record in &records {
            self.check_reference(record)?;
        }
        self.overlay.insert_after(position, records);
        Ok(self)
    }

    /// Finish the segment.
    pub fn build(self) -> Result<ParentSegment, SegmentError> {
        let reference_id = match self.records.first() {
            Some(record) => Arc::clone(&record.reference_id),
            None => return Err(SegmentError::EmptySegment),
        };
        Ok(ParentSegment {
            reference_id,
            records: self.records,
            overlay: self.overlay,
        })
    }

    fn check_reference(&self, record: &GenomicRecord) -> Result<(), SegmentError> {
        match self.reference_id() {
            Some(expected) if *expected != record.reference_id => {
                Err(SegmentError::ReferenceMismatch {
                    expected: Arc::clone(expected),
                    found: Arc::clone(&record.reference_id),
                })
            }
            _ => Ok(()),
        }
    }

    fn check_known(&self, position: u32) -> Result<(), SegmentError> {
        self.records
            .binary_search_by_key(&position, |record| record.position)
            .map(|_| ())
            .map_err(|_| SegmentError::UnknownPosition(position))
    }
}
