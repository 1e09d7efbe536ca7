// ============================================================
// Layer 4 — Next-Word Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<NextWordSample>
// into tensors for one training step.
//
// Input:  Vec of N samples, each with input_ids of length S
// Output: NextWordBatch with an Int tensor of shape [N, S]
//         plus a target tensor of shape [N]
//
// All sequences were already left-padded to the same length by
// the vocabulary, so batching is a flatten-and-reshape with no
// dynamic padding.

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::dataset::NextWordSample;

// ─── NextWordBatch ────────────────────────────────────────────────────────────
/// A batch of samples ready for the model forward pass.
///
/// B is the Burn backend (e.g. Wgpu, NdArray) —
/// generic so the same batcher works on any device.
#[derive(Debug, Clone)]
pub struct NextWordBatch<B: Backend> {
    /// Token id sequences — shape: [batch_size, input_len]
    pub inputs: Tensor<B, 2, Int>,

    /// The id each sequence should predict — shape: [batch_size]
    pub targets: Tensor<B, 1, Int>,
}

// ─── NextWordBatcher ──────────────────────────────────────────────────────────
/// Holds the target device so tensors are created in the
/// right place.
#[derive(Clone, Debug)]
pub struct NextWordBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> NextWordBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<NextWordSample, NextWordBatch<B>> for NextWordBatcher<B> {
    fn batch(&self, items: Vec<NextWordSample>) -> NextWordBatch<B> {
        let batch_size = items.len();
        // All sequences have the same length (pre-padded)
        let input_len  = items[0].input_ids.len();

        // from_ints wants signed integers, so flatten Vec<Vec<u32>>
        // into one Vec<i32> sample by sample
        let input_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.input_ids.iter().map(|&x| x as i32))
            .collect();

        let target_flat: Vec<i32> = items
            .iter()
            .map(|s| s.target_id as i32)
            .collect();

        let inputs = Tensor::<B, 1, Int>::from_ints(input_flat.as_slice(), &self.device)
            .reshape([batch_size, input_len]);

        let targets = Tensor::<B, 1, Int>::from_ints(target_flat.as_slice(), &self.device);

        NextWordBatch { inputs, targets }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{ndarray::NdArrayDevice, NdArray};

    #[test]
    fn test_batch_shapes() {
        let batcher = NextWordBatcher::<NdArray>::new(NdArrayDevice::default());

        let items = vec![
            NextWordSample { input_ids: vec![0, 0, 1], target_id: 2 },
            NextWordSample { input_ids: vec![1, 2, 3], target_id: 4 },
        ];

        let batch = batcher.batch(items);
        assert_eq!(batch.inputs.dims(), [2, 3]);
        assert_eq!(batch.targets.dims(), [2]);
    }

    #[test]
    fn test_batch_preserves_row_order() {
        let batcher = NextWordBatcher::<NdArray>::new(NdArrayDevice::default());

        let items = vec![
            NextWordSample { input_ids: vec![5, 6], target_id: 7 },
            NextWordSample { input_ids: vec![8, 9], target_id: 1 },
        ];

        let batch = batcher.batch(items);
        let flat: Vec<i32> = batch.inputs.into_data().convert::<i32>().to_vec().unwrap();
        assert_eq!(flat, vec![5, 6, 8, 9]);

        let targets: Vec<i32> = batch.targets.into_data().convert::<i32>().to_vec().unwrap();
        assert_eq!(targets, vec![7, 1]);
    }
}
