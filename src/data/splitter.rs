// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles samples with a fixed seed and splits them into a
// training set and a held-out test set.
//
// The held-out set is also the validation data watched by
// early stopping and learning-rate decay.
//
// Two strategies:
//   - Random:     one seeded shuffle, the first
//                 ceil(test_fraction * n) samples are held out.
//   - Stratified: each class is shuffled and split on its own
//                 with the same ceil rule, so every class with
//                 at least one sample shows up in the test set
//                 in proportion to its size.
//
// Same seed + same input order ⇒ same split.

use std::collections::BTreeMap;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitStrategy {
    Random,
    #[default]
    Stratified,
}

/// Number of held-out items for `n` samples.
fn test_count(n: usize, test_fraction: f64) -> usize {
    ((n as f64) * test_fraction).ceil().min(n as f64) as usize
}

/// Shuffle and split into (train, test).
///
/// `class_of` is only consulted by the stratified strategy.
pub fn split_train_test<T, F>(
    samples:       Vec<T>,
    test_fraction: f64,
    seed:          u64,
    strategy:      SplitStrategy,
    class_of:      F,
) -> (Vec<T>, Vec<T>)
where
    F: Fn(&T) -> usize,
{
    let mut rng   = StdRng::seed_from_u64(seed);
    let total     = samples.len();
    let fraction  = test_fraction.clamp(0.0, 1.0);

    let (train, test) = match strategy {
        SplitStrategy::Random => {
            let mut samples = samples;
            samples.shuffle(&mut rng);
            let test  = samples.drain(..test_count(total, fraction)).collect::<Vec<_>>();
            (samples, test)
        }
        SplitStrategy::Stratified => {
            // BTreeMap keeps class iteration order stable across runs
            let mut by_class: BTreeMap<usize, Vec<T>> = BTreeMap::new();
            for s in samples {
                by_class.entry(class_of(&s)).or_default().push(s);
            }

            let mut train = Vec::with_capacity(total);
            let mut test  = Vec::new();
            for (_, mut group) in by_class {
                group.shuffle(&mut rng);
                let n_test = test_count(group.len(), fraction);
                test.extend(group.drain(..n_test));
                train.extend(group);
            }

            // interleave classes so batches are not single-class
            train.shuffle(&mut rng);
            test.shuffle(&mut rng);
            (train, test)
        }
    };

    tracing::debug!(
        "Dataset split ({:?}): {} train, {} test",
        strategy,
        train.len(),
        test.len(),
    );

    (train, test)
}
