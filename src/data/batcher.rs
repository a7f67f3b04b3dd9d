// ============================================================
// Layer 4 — Category Batcher
// ============================================================
// Implements Burn's Batcher trait to stack EncodedSamples into
// the tensors the classifier consumes.
//
//   Input:  Vec of N samples, each with S token ids and a
//           one-hot target of C classes
//   Output: CategoryBatch with
//             input_ids [N, S]  (Int)
//             targets   [N, C]  (Float, one-hot)
//
// All sequences are pre-padded to the same length by the
// encoder, so batching is a flatten + reshape.

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::EncodedSample;

#[derive(Debug, Clone)]
pub struct CategoryBatch<B: Backend> {
    /// Token id sequences — shape: [batch_size, seq_len]
    pub input_ids: Tensor<B, 2, Int>,

    /// One-hot labels — shape: [batch_size, num_classes]
    pub targets: Tensor<B, 2>,
}

#[derive(Clone, Debug)]
pub struct CategoryBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> CategoryBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<EncodedSample, CategoryBatch<B>> for CategoryBatcher<B> {
    fn batch(&self, items: Vec<EncodedSample>) -> CategoryBatch<B> {
        let batch_size  = items.len();
        let seq_len     = items.first().map_or(0, |s| s.input_ids.len());
        let num_classes = items.first().map_or(0, |s| s.target.len());

        // Burn Int tensors are built from i32
        let input_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.input_ids.iter().map(|&x| x as i32))
            .collect();

        let target_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.target.iter().copied())
            .collect();

        let input_ids = Tensor::<B, 1, Int>::from_ints(
            input_flat.as_slice(), &self.device
        ).reshape([batch_size, seq_len]);

        let targets = Tensor::<B, 1>::from_floats(
            target_flat.as_slice(), &self.device
        ).reshape([batch_size, num_classes]);

        CategoryBatch { input_ids, targets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_batch_shapes_and_values() {
        let device = Default::default();
        let batcher = CategoryBatcher::<NdArray<f32>>::new(device);
        let items = vec![
            EncodedSample { input_ids: vec![0, 0, 3], target: vec![0.0, 1.0], label: 1 },
            EncodedSample { input_ids: vec![0, 5, 7], target: vec![1.0, 0.0], label: 0 },
        ];

        let batch = batcher.batch(items);
        assert_eq!(batch.input_ids.dims(), [2, 3]);
        assert_eq!(batch.targets.dims(), [2, 2]);

        let ids: Vec<i64> = batch.input_ids.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(ids, vec![0, 0, 3, 0, 5, 7]);
        let targets: Vec<f32> = batch.targets.into_data().to_vec().unwrap();
        assert_eq!(targets, vec![0.0, 1.0, 1.0, 0.0]);
    }
}
