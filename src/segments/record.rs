use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Read support for one allele observed in a sample.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlleleCount {
    /// Allele sequence (a single base, or the inserted/deleted bases).
    pub allele: Arc<str>,
    /// Reads supporting the allele on the forward strand.
    pub forward: u32,
    /// Reads supporting the allele on the reverse strand.
    pub reverse: u32,
    /// Whether the allele describes an insertion or deletion.
    pub is_indel: bool,
}

impl AlleleCount {
    /// Construct a new allele count.
    pub fn new(allele: impl Into<Arc<str>>, forward: u32, reverse: u32, is_indel: bool) -> Self {
        Self {
            allele: allele.into(),
            forward,
            reverse,
            is_indel,
        }
    }

    /// Reads supporting the allele on both strands, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.forward.saturating_add(self.reverse)
    }
}

/// Evidence gathered for a single sample at one reference position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleEvidence {
    /// Whether the sample is the tumor in a somatic pair.
    pub is_tumor: bool,
    /// Observed alleles with their strand counts.
    pub counts: Vec<AlleleCount>,
}

impl SampleEvidence {
    /// Construct evidence for one sample.
    pub fn new(is_tumor: bool, counts: Vec<AlleleCount>) -> Self {
        Self { is_tumor, counts }
    }

    /// Total reads supporting indel alleles in this sample, saturating at
    /// `u32::MAX`.
    pub fn indel_support(&self) -> u32 {
        self.counts
            .iter()
            .filter(|count| count.is_indel)
            .map(AlleleCount::total)
            .fold(0, u32::saturating_add)
    }
}

/// Evidence observed at one reference position.
///
/// Records are ordered by `(reference_id, position)`. The `indel_evidence`
/// count and `true_indel` flag feed the candidate-indel predicate used by
/// the split strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenomicRecord {
    /// Reference contig/chromosome name.
    pub reference_id: Arc<str>,
    /// 0-based reference coordinate.
    pub position: u32,
    /// Per-sample evidence payload.
    pub samples: Vec<SampleEvidence>,
    /// Number of observations supporting an indel at this position.
    pub indel_evidence: u32,
    /// Whether the position is a confirmed (labelled) indel.
    pub true_indel: bool,
}

impl GenomicRecord {
    /// Construct a record without sample payload or indel evidence.
    pub fn new(reference_id: impl Into<Arc<str>>, position: u32) -> Self {
        Self {
            reference_id: reference_id.into(),
            position,
            samples: Vec::new(),
            indel_evidence: 0,
            true_indel: false,
        }
    }

    /// Set the indel evidence count.
    pub fn with_indel_evidence(mut self, count: u32) -> Self {
        self.indel_evidence = count;
        self
    }

    /// Mark the record as a confirmed indel.
    pub fn with_true_indel(mut self, true_indel: bool) -> Self {
        self.true_indel = true_indel;
        self
    }

    /// Attach the per-sample payload.
    pub fn with_samples(mut self, samples: Vec<SampleEvidence>) -> Self {
        self.samples = samples;
        self
    }

    /// Whether the evidence count reaches `threshold`.
    pub fn has_candidate_indel(&self, threshold: u32) -> bool {
        self.indel_evidence >= threshold
    }

    /// Candidate-indel predicate: enough evidence, or a confirmed indel.
    pub fn is_indel_site(&self, threshold: u32) -> bool {
        self.has_candidate_indel(threshold) || self.true_indel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indel_site_requires_threshold_or_flag() {
        let record = GenomicRecord::new("chr1", 10).with_indel_evidence(2);
        assert!(record.is_indel_site(2));
        assert!(!record.is_indel_site(3));

        let flagged = GenomicRecord::new("chr1", 11).with_true_indel(true);
        assert!(flagged.is_indel_site(100));
    }

    #[test]
    fn sample_indel_support_ignores_snvs() {
        let sample = SampleEvidence::new(
            false,
            vec![
                AlleleCount::new("A", 10, 8, false),
                AlleleCount::new("A--", 2, 1, true),
            ],
        );
        assert_eq!(sample.indel_support(), 3);
    }

    #[test]
    fn read_counts_saturate() {
        let count = AlleleCount::new("A-", u32::MAX, 1, true);
        assert_eq!(count.total(), u32::MAX);

        let sample = SampleEvidence::new(
            true,
            vec![count, AlleleCount::new("AT-", 5, 5, true)],
        );
        assert_eq!(sample.indel_support(), u32::MAX);
    }
}
