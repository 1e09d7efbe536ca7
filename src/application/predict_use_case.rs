// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// Continues a piece of seed text with the model's most likely
// next words. The seed goes through the same normaliser as the
// training corpus, so casing, punctuation and sentence markers
// are treated identically on both sides.

use anyhow::Result;

use crate::data::{normalizer::Normalizer, vocabulary::Vocabulary};
use crate::domain::traits::{Suggestion, WordSuggester};
use crate::infra::{export::Exporter, vocab_store::VocabStore};
use crate::ml::predictor::Predictor;

pub struct PredictUseCase {
    vocab:      Vocabulary,
    predictor:  Predictor,
    normalizer: Normalizer,
    top_k:      usize,
}

impl PredictUseCase {
    /// Load the exported bundle from the artifacts directory.
    pub fn new(artifacts_dir: String, top_k: usize) -> Result<Self> {
        let store = VocabStore::new(&artifacts_dir);
        let vocab = store.load()?;

        let exporter  = Exporter::new(&artifacts_dir);
        let predictor = Predictor::from_bundle(&exporter)?;

        Ok(Self {
            vocab,
            predictor,
            normalizer: Normalizer::new(),
            top_k,
        })
    }
}

impl WordSuggester for PredictUseCase {
    fn suggest(&self, seed: &str) -> Result<Vec<Suggestion>> {
        let tokens = self.normalizer.normalize_text(seed);

        if tokens.is_empty() {
            tracing::warn!("Seed text normalised to nothing; predicting from padding only");
        }

        self.predictor.suggest(&tokens, &self.vocab, self.top_k)
    }
}
