//! # Indel-centred segmentation of genomic record streams
//!
//! Downstream feature extraction and model inference only need the context
//! around insertion/deletion sites. This library cuts a position-ordered
//! stream of per-position records into bounded windows centred on candidate
//! indels.
//!
//! ## Pipeline
//!
//! 1. **Assembly**: group the stream into contiguous [`ParentSegment`]s
//!    (a new segment starts on a reference change or a position gap)
//! 2. **Splitting**: stream each segment once, tracking a sliding window of
//!    recent positions, and open a [`SubSegment`] at each candidate indel
//!    that does not directly follow the previous one
//! 3. **Viewing**: each sub-segment lazily exposes the parent's records in
//!    its bounds, honouring hidden records and spliced insertions
//!
//! ## Usage Example
//!
//! ```
//! use indel_segmenter::{GenomicRecord, Segmenter, SplitConfig};
//!
//! let records = (100..=110).map(|pos| {
//!     GenomicRecord::new("chr1", pos).with_indel_evidence(if pos == 104 { 2 } else { 0 })
//! });
//! let segmenter = Segmenter::new(SplitConfig::new(3, 2)?, 10)?;
//! let summary = segmenter.run(records, |_parent, subs| {
//!     assert_eq!(subs[0].indel_position(), 104);
//!     Ok(())
//! })?;
//! assert_eq!(summary.sub_segments, 1);
//! # Ok::<(), anyhow::Error>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod segments; // Segmentation engine

pub use segments::{
    ConfigError, GenomicRecord, ParentSegment, RecordOverlay, SegmentAssembler, SegmentError,
    SingleCandidateIndelSplitStrategy, SlidingPositionWindow, SplitConfig, SplitStrategy,
    SubSegment,
};

use anyhow::Context;

/// Counters reported by [`Segmenter::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentationSummary {
    /// Parent segments assembled from the stream.
    pub segments: usize,
    /// Sub-segments produced across all segments.
    pub sub_segments: usize,
    /// Segments in which no candidate indel was found.
    pub segments_without_indels: usize,
    /// Records visible through the segments' overlay-aware views.
    pub records: usize,
}

/// Assembles a record stream into segments and splits each of them.
#[derive(Debug, Clone)]
pub struct Segmenter {
    strategy: SingleCandidateIndelSplitStrategy,
    gap: u32,
}

impl Segmenter {
    /// Create a segmenter; `gap` is the largest position distance kept inside
    /// one parent segment.
    pub fn new(config: SplitConfig, gap: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            strategy: SingleCandidateIndelSplitStrategy::new(config)?,
            gap,
        })
    }

    /// Strategy applied to each segment.
    pub fn strategy(&self) -> &SingleCandidateIndelSplitStrategy {
        &self.strategy
    }

    /// Segment `records`, handing each parent and its windows to `visit`.
    ///
    /// Stops at the first visitor error.
    pub fn run<I, F>(&self, records: I, mut visit: F) -> anyhow::Result<SegmentationSummary>
    where
        I: IntoIterator<Item = GenomicRecord>,
        F: FnMut(&ParentSegment, &[SubSegment<'_>]) -> anyhow::Result<()>,
    {
        let mut summary = SegmentationSummary::default();

        for segment in SegmentAssembler::new(records, self.gap) {
            let sub_segments = self.strategy.apply(&segment);

            summary.segments += 1;
            summary.sub_segments += sub_segments.len();
            summary.records +=
                segment.actual_length(segment.first_position(), segment.last_position());
            if sub_segments.is_empty() {
                summary.segments_without_indels += 1;
            }

            visit(&segment, &sub_segments).with_context(|| {
                format!(
                    "failed to process segment {}:{}-{}",
                    segment.reference_id(),
                    segment.first_position(),
                    segment.last_position()
                )
            })?;
        }

        Ok(summary)
    }
}
