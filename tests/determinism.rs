#[path = "common/mod.rs"]
mod common;

use std::collections::HashSet;

use blake3::Hasher;
use common::{annotated_records, Mark};
use indel_segmenter::{Segmenter, SplitConfig};

#[test]
fn segmentation_is_deterministic() {
    let marks = [
        (104, Mark::Evidence(3)),
        (105, Mark::Evidence(4)),
        (140, Mark::TrueIndel),
        (171, Mark::Evidence(2)),
    ];
    let records = annotated_records("chrDeterministic", 100..=200, &marks);

    let mut fingerprints = HashSet::new();
    for _ in 0..5 {
        let segmenter = Segmenter::new(SplitConfig::new(8, 2).expect("valid config"), 10)
            .expect("segmenter initialises");
        let mut hasher = Hasher::new();
        segmenter
            .run(records.clone(), |_, subs| {
                for sub in subs {
                    hasher.update(&sub.indel_position().to_le_bytes());
                    for record in sub.all_records() {
                        hasher.update(&record.position.to_le_bytes());
                    }
                }
                Ok(())
            })
            .expect("segmentation succeeds");
        fingerprints.insert(hasher.finalize());
    }

    assert_eq!(fingerprints.len(), 1, "outputs diverged across runs");
}
