use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::vocabulary::EncodedCorpus;

/// One padded training sample. The input ids are everything in
/// the window except the final id, which becomes the target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextWordSample {
    pub input_ids: Vec<u32>,
    pub target_id: u32,
}

pub struct NextWordDataset {
    samples: Vec<NextWordSample>,
}

impl NextWordDataset {
    pub fn new(samples: Vec<NextWordSample>) -> Self {
        Self { samples }
    }

    /// Split every padded sequence into (inputs, target).
    /// Left-padding guarantees the final slot is a real token,
    /// so the target is never the padding id.
    pub fn from_encoded(corpus: EncodedCorpus) -> Self {
        let samples = corpus
            .sequences
            .into_iter()
            .filter_map(|seq| {
                seq.split_last().and_then(|(&target_id, inputs)| {
                    if inputs.is_empty() {
                        None
                    } else {
                        Some(NextWordSample { input_ids: inputs.to_vec(), target_id })
                    }
                })
            })
            .collect();

        Self::new(samples)
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Dataset<NextWordSample> for NextWordDataset {
    fn get(&self, index: usize) -> Option<NextWordSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_inputs_and_target() {
        let corpus = EncodedCorpus {
            sequences:  vec![vec![0, 0, 3, 7], vec![1, 2, 3, 4]],
            padded_len: 4,
        };
        let ds = NextWordDataset::from_encoded(corpus);

        assert_eq!(ds.sample_count(), 2);
        let first = ds.get(0).unwrap();
        assert_eq!(first.input_ids, vec![0, 0, 3]);
        assert_eq!(first.target_id, 7);
    }

    #[test]
    fn test_single_id_sequences_are_dropped() {
        let corpus = EncodedCorpus {
            sequences:  vec![vec![5]],
            padded_len: 1,
        };
        let ds = NextWordDataset::from_encoded(corpus);
        assert_eq!(ds.sample_count(), 0);
    }
}
