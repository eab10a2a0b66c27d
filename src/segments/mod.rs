//! Indel-centred segmentation of genomic record streams.
//!
//! A [`ParentSegment`] owns a contiguous run of [`GenomicRecord`]s plus a
//! [`RecordOverlay`] of hidden and spliced records. A [`SplitStrategy`]
//! streams the segment once and produces [`SubSegment`] windows, each a
//! borrowed view anchored on a candidate indel.

mod assembler;
mod config;
mod overlay;
mod parent;
mod record;
mod strategy;
mod sub_segment;
mod window;

pub use assembler::SegmentAssembler;
pub use config::{ConfigError, SplitConfig};
pub use overlay::{RecordOverlay, RecordView};
pub use parent::{ParentSegment, ParentSegmentBuilder, SegmentError};
pub use record::{AlleleCount, GenomicRecord, SampleEvidence};
pub use strategy::{SingleCandidateIndelSplitStrategy, SplitContext, SplitStrategy};
pub use sub_segment::SubSegment;
pub use window::SlidingPositionWindow;
