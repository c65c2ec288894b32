//! Stratified train/test splitting.
//!
//! A plain random split can leave the test set with a single class when
//! positives are rare, which breaks ranking metrics. Splitting each class
//! independently guarantees at least one example of each class in test
//! whenever both classes exist in the source data.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::error::{ChurnError, Result};
use crate::record::LabeledExample;

/// Seed used by the batch pipeline; fixed so repeated runs split
/// identically.
pub const DEFAULT_SPLIT_SEED: u64 = 1;

/// Disjoint train/test partition of labeled examples.
#[derive(Debug, Clone, Default)]
pub struct DatasetSplit {
    pub train: Vec<LabeledExample>,
    pub test: Vec<LabeledExample>,
}

/// Number of examples a class of size `n` contributes to the test set:
/// roughly 20%, at least one, never more than the class holds.
fn test_take(n: usize) -> usize {
    (n / 5).max(1).min(n)
}

/// Partition `examples` into train/test, stratified by label.
///
/// Fails with [`ChurnError::ClassImbalance`] when either class is absent;
/// a classifier cannot be evaluated without both. The shuffle is driven
/// by a seeded generator, so the same seed always yields the same split.
/// Train and test are disjoint by customer id.
pub fn stratified_split(examples: Vec<LabeledExample>, seed: u64) -> Result<DatasetSplit> {
    let (mut pos, mut neg): (Vec<LabeledExample>, Vec<LabeledExample>) =
        examples.iter().cloned().partition(|e| e.label);

    if pos.is_empty() || neg.is_empty() {
        return Err(ChurnError::ClassImbalance(format!(
            "need at least one positive and one negative example, got pos={} neg={}",
            pos.len(),
            neg.len()
        )));
    }

    let take_pos = test_take(pos.len());
    let take_neg = test_take(neg.len());

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    pos.shuffle(&mut rng);
    neg.shuffle(&mut rng);

    let mut test = Vec::with_capacity(take_pos + take_neg);
    test.extend(pos.into_iter().take(take_pos));
    test.extend(neg.into_iter().take(take_neg));

    // Train is everything not claimed by test, keyed by identifier so
    // duplicate ids never straddle the boundary.
    let train = {
        let test_ids: HashSet<&str> = test
            .iter()
            .map(|e| e.record.customer_id.as_str())
            .collect();
        examples
            .into_iter()
            .filter(|e| !test_ids.contains(e.record.customer_id.as_str()))
            .collect()
    };

    Ok(DatasetSplit { train, test })
}
