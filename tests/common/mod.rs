#![allow(dead_code)]

use indel_segmenter::{GenomicRecord, ParentSegment};

/// Indel annotation for one position of a synthetic stream.
#[derive(Debug, Clone, Copy)]
pub enum Mark {
    /// Indel evidence count at the position.
    Evidence(u32),
    /// Confirmed indel.
    TrueIndel,
}

/// Records for every position of `range` on `chrom`, annotated by `marks`.
pub fn annotated_records(
    chrom: &str,
    range: std::ops::RangeInclusive<u32>,
    marks: &[(u32, Mark)],
) -> Vec<GenomicRecord> {
    range
        .map(|pos| {
            let record = GenomicRecord::new(chrom, pos);
            match marks.iter().find(|(p, _)| *p == pos).map(|(_, mark)| *mark) {
                Some(Mark::Evidence(count)) => record.with_indel_evidence(count),
                Some(Mark::TrueIndel) => record.with_true_indel(true),
                None => record,
            }
        })
        .collect()
}

/// Overlay-free parent segment over `range` on chr1.
pub fn annotated_segment(
    range: std::ops::RangeInclusive<u32>,
    marks: &[(u32, Mark)],
) -> ParentSegment {
    ParentSegment::from_records(annotated_records("chr1", range, marks))
        .expect("synthetic records form a valid segment")
}

/// Install a test subscriber so verbose diagnostics show up with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}
