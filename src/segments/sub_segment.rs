use std::sync::Arc;

use tracing::warn;

use crate::segments::{GenomicRecord, ParentSegment, RecordView, SlidingPositionWindow};

/// Window of a parent segment anchored on a candidate indel.
///
/// The start is fixed at construction from the positions observed just before
/// the anchor. The end advances as accepted records are added. Records before
/// the anchor are accepted when strictly closer than `window_size`; records at
/// or after it when at most `window_size` away. Once closed, a sub-segment
/// ignores further records.
#[derive(Debug, Clone)]
pub struct SubSegment<'a> {
    parent: &'a ParentSegment,
    indel_reference_id: Arc<str>,
    indel_position: u32,
    start_position: u32,
    first_position: u32,
    end_position: u32,
    window_size: u32,
    closed: bool,
}

impl<'a> SubSegment<'a> {
    /// Open a window around `indel` using the positions in `before`.
    pub fn new(
        before: &SlidingPositionWindow,
        parent: &'a ParentSegment,
        indel: &GenomicRecord,
        window_size: u32,
    ) -> Self {
        let indel_position = indel.position;
        let start_position =
            Self::detect_start_position(before, parent, indel_position, window_size);

        // Records before the anchor must be strictly closer than the window.
        let closest_before = indel_position.saturating_sub(window_size.saturating_sub(1));
        let lower = start_position.max(closest_before);
        let first_position = parent
            .first_position_in(lower, indel_position)
            .unwrap_or(indel_position);

        let mut segment = Self {
            parent,
            indel_reference_id: Arc::clone(&indel.reference_id),
            indel_position,
            start_position,
            first_position,
            end_position: indel_position,
            window_size,
            closed: false,
        };
        segment.add(indel);

        if parent.record_at(start_position).is_none() {
            warn!(
                start = start_position,
                indel = indel_position,
                "no record at sub-segment start position"
            );
        }
        segment
    }

    /// Earliest position still within `window_size` of the anchor that is not
    /// before the parent's first position; the anchor itself otherwise.
    fn detect_start_position(
        before: &SlidingPositionWindow,
        parent: &ParentSegment,
        indel_position: u32,
        window_size: u32,
    ) -> u32 {
        before
            .iter()
            .find(|&position| {
                position <= indel_position
                    && indel_position - position <= window_size
                    && position >= parent.first_position()
            })
            .unwrap_or(indel_position)
    }

    /// Whether a record at `position` belongs to this window.
    pub fn accepts(&self, position: u32) -> bool {
        if position >= self.indel_position {
            position - self.indel_position <= self.window_size
        } else {
            self.indel_position - position < self.window_size
        }
    }

    /// Offer a record to the window; returns whether it was accepted.
    pub fn add(&mut self, record: &GenomicRecord) -> bool {
        if !self.is_open() || !self.accepts(record.position) {
            return false;
        }
        self.end_position = record.position;
        true
    }

    /// Whether the window may still grow.
    pub fn is_open(&self) -> bool {
        !self.closed && self.end_position.saturating_sub(self.indel_position) <= self.window_size
    }

    /// Close the window permanently.
    pub fn force_close(&mut self) {
        self.closed = true;
    }

    /// Whether `force_close` was called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Move the anchor to `position`, keeping start and end.
    pub fn new_indel(&mut self, position: u32) {
        self.indel_position = position;
    }

    /// Anchor position.
    pub fn indel_position(&self) -> u32 {
        self.indel_position
    }

    /// Reference sequence of the anchor record.
    pub fn indel_reference_id(&self) -> &Arc<str> {
        &self.indel_reference_id
    }

    /// Earliest in-window position seen before the anchor.
    pub fn start_position(&self) -> u32 {
        self.start_position
    }

    /// First position exposed by the view.
    pub fn first_position(&self) -> u32 {
        self.first_position
    }

    /// Position of the last accepted record.
    pub fn last_position(&self) -> u32 {
        self.end_position
    }

    /// Maximum distance from the anchor.
    pub fn window_size(&self) -> u32 {
        self.window_size
    }

    /// Segment this window reads from.
    pub fn parent(&self) -> &'a ParentSegment {
        self.parent
    }

    /// Primary record at the first position, if present.
    pub fn first_record(&self) -> Option<&'a GenomicRecord> {
        self.parent.record_at(self.first_position)
    }

    /// Primary record at the last position, if present.
    pub fn last_record(&self) -> Option<&'a GenomicRecord> {
        self.parent.record_at(self.end_position)
    }

    /// Overlay-aware records of the window.
    pub fn all_records(&self) -> RecordView<'a> {
        self.parent
            .all_records_in(self.first_position, self.end_position)
    }

    /// Overlay-aware records of the window within `[start, end]`.
    pub fn all_records_in(&self, start: u32, end: u32) -> RecordView<'a> {
        self.parent.all_records_in(
            start.max(self.first_position),
            end.min(self.end_position),
        )
    }

    /// Number of records `all_records` yields; an allocation hint.
    pub fn length(&self) -> usize {
        self.parent
            .actual_length(self.first_position, self.end_position)
    }

    /// Collect the window's records.
    pub fn to_vec(&self) -> Vec<&'a GenomicRecord> {
        let mut records = Vec::with_capacity(self.length());
        records.extend(self.all_records());
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent(range: std::ops::RangeInclusive<u32>) -> ParentSegment {
        ParentSegment::from_records(range.map(|pos| GenomicRecord::new("chr1", pos)))
            .expect("valid segment")
    }

    fn window_over(positions: impl IntoIterator<Item = u32>, size: u32) -> SlidingPositionWindow {
        let mut window = SlidingPositionWindow::new(size);
        for pos in positions {
            window.push(pos);
        }
        window
    }

    #[test]
    fn start_is_earliest_position_in_window() {
        let parent = parent(100..=110);
        let window = window_over(100..=104, 3);
        let indel = GenomicRecord::new("chr1", 104).with_indel_evidence(2);
        let sub = SubSegment::new(&window, &parent, &indel, 3);

        assert_eq!(sub.start_position(), 101);
        assert_eq!(sub.first_position(), 102);
        assert_eq!(sub.last_position(), 104);
        assert_eq!(sub.indel_position(), 104);
        assert_eq!(sub.indel_reference_id().as_ref(), "chr1");
    }

    #[test]
    fn start_ignores_positions_before_parent() {
        let parent = parent(103..=110);
        let window = window_over(101..=104, 3);
        let indel = GenomicRecord::new("chr1", 104);
        let sub = SubSegment::new(&window, &parent, &indel, 3);
        assert_eq!(sub.start_position(), 103);
    }

    #[test]
    fn start_defaults_to_anchor_without_history() {
        let parent = parent(100..=110);
        let window = SlidingPositionWindow::new(3);
        let indel = GenomicRecord::new("chr1", 105);
        let sub = SubSegment::new(&window, &parent, &indel, 3);
        assert_eq!(sub.start_position(), 105);
        assert_eq!(sub.first_position(), 105);
    }

    #[test]
    fn forced_close_freezes_end() {
        let parent = parent(100..=110);
        let window = window_over(100..=104, 3);
        let mut sub = SubSegment::new(&window, &parent, &GenomicRecord::new("chr1", 104), 3);
        assert!(sub.add(&GenomicRecord::new("chr1", 105)));
        sub.force_close();
        assert!(!sub.is_open());
        assert!(!sub.add(&GenomicRecord::new("chr1", 106)));
        assert_eq!(sub.last_position(), 105);
    }

    #[test]
    fn new_indel_keeps_bounds() {
        let parent = parent(100..=110);
        let window = window_over(100..=104, 3);
        let mut sub = SubSegment::new(&window, &parent, &GenomicRecord::new("chr1", 104), 3);
        sub.add(&GenomicRecord::new("chr1", 105));
        sub.new_indel(105);
        assert_eq!(sub.indel_position(), 105);
        assert_eq!(sub.start_position(), 101);
        assert_eq!(sub.last_position(), 105);
        assert!(sub.add(&GenomicRecord::new("chr1", 108)));
    }

    #[test]
    fn records_and_length_agree() {
        let parent = parent(100..=110);
        let window = window_over(100..=104, 3);
        let mut sub = SubSegment::new(&window, &parent, &GenomicRecord::new("chr1", 104), 3);
        for pos in 105..=110 {
            sub.add(&GenomicRecord::new("chr1", pos));
        }
        let positions: Vec<u32> = sub.all_records().map(|r| r.position).collect();
        assert_eq!(positions, vec![102, 103, 104, 105, 106, 107]);
        assert_eq!(sub.length(), positions.len());
        assert_eq!(sub.to_vec().len(), positions.len());
        assert_eq!(sub.first_record().map(|r| r.position), Some(102));
        assert_eq!(sub.last_record().map(|r| r.position), Some(107));

        let clipped: Vec<u32> = sub.all_records_in(0, 104).map(|r| r.position).collect();
        assert_eq!(clipped, vec![102, 103, 104]);
    }
}
