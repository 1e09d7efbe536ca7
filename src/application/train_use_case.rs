// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the review corpus     (Layer 4 - data)
//   Step 2: Normalise into tokens      (Layer 4 - data)
//   Step 3: Cut training windows       (Layer 4 - data)
//   Step 4: Build / reload vocabulary  (Layer 4 + 6)
//   Step 5: Encode and left-pad        (Layer 4 - data)
//   Step 6: Build the Burn dataset     (Layer 4 - data)
//   Step 7: Save config                (Layer 6 - infra)
//   Step 8: Run training loop          (Layer 5 - ml)
//   Step 9: Export the device bundle   (Layer 6 - infra)

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::NextWordDataset,
    loader::CsvReviewLoader,
    normalizer::Normalizer,
    vocabulary::Vocabulary,
    windower::Windower,
};
use crate::domain::traits::ReviewSource;
use crate::infra::{
    checkpoint::CheckpointManager,
    export::{BundleManifest, Exporter},
    vocab_store::VocabStore,
};
use crate::ml::{model::NextWordModelConfig, trainer::run_training};

// ─── Training Configuration ──────────────────────────────────────────────────
// All knobs for a training run. Serialisable so the run can be
// saved to disk and reloaded for resume and prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub reviews:       String,
    pub text_column:   String,
    pub sample_frac:   f64,
    pub seed:          u64,
    pub artifacts_dir: String,
    pub window_len:    usize,
    pub batch_size:    usize,
    pub epochs:        usize,
    pub lr:            f64,
    pub d_embed:       usize,
    pub d_hidden:      usize,
    pub d_dense:       usize,
    pub resume:        bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            reviews:       "data/reviews.csv".to_string(),
            text_column:   "text".to_string(),
            sample_frac:   0.25,
            seed:          42,
            artifacts_dir: "artifacts".to_string(),
            window_len:    11,
            batch_size:    128,
            epochs:        50,
            lr:            1e-3,
            d_embed:       10,
            d_hidden:      50,
            d_dense:       50,
            resume:        false,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load the review corpus ────────────────────────────────────
        tracing::info!("Loading reviews from '{}'", cfg.reviews);
        let loader = CsvReviewLoader::new(
            cfg.reviews.clone(),
            cfg.text_column.clone(),
            cfg.sample_frac,
            cfg.seed,
        );
        let reviews = loader.load_all()?;
        ensure!(!reviews.is_empty(), "No reviews to train on");

        // ── Step 2: Normalise into the token stream ───────────────────────────
        let normalizer = Normalizer::new();
        let tokens = normalizer.normalize(&reviews);
        tracing::info!("Normalised corpus: {} tokens", tokens.len());

        // ── Step 3: Cut training windows ──────────────────────────────────────
        let windower = Windower::new(cfg.window_len);
        let windows = windower.windows(&tokens);
        ensure!(
            !windows.is_empty(),
            "Corpus produced no training windows: {} tokens is not enough \
             for windows of {}",
            tokens.len(),
            cfg.window_len,
        );
        tracing::info!("Cut {} training windows", windows.len());

        // ── Step 4: Build or reload the vocabulary ────────────────────────────
        // A resumed run must reuse the saved vocabulary: the saved
        // weights are sized by it, and a rebuild could reassign ids.
        let ckpt  = CheckpointManager::new(&cfg.artifacts_dir);
        let store = VocabStore::new(&cfg.artifacts_dir);

        let vocab = if cfg.resume {
            ensure!(
                ckpt.has_checkpoint(),
                "--resume was passed but '{}' holds no checkpoint",
                cfg.artifacts_dir,
            );

            // The checkpoint fixes the architecture; refuse to resume
            // with different dimensions.
            let saved = ckpt.load_config()?;
            ensure!(
                (saved.d_embed, saved.d_hidden, saved.d_dense, saved.window_len)
                    == (cfg.d_embed, cfg.d_hidden, cfg.d_dense, cfg.window_len),
                "--resume mismatch: the checkpoint was trained with \
                 embed={}, hidden={}, dense={}, window={}",
                saved.d_embed, saved.d_hidden, saved.d_dense, saved.window_len,
            );

            store.load()?
        } else {
            if store.exists() {
                tracing::warn!(
                    "Overwriting the vocabulary from a previous run in '{}'",
                    cfg.artifacts_dir,
                );
            }
            let vocab = Vocabulary::build(&windows);
            store.save(&vocab)?;
            vocab
        };
        tracing::info!("Vocabulary: {} distinct words", vocab.distinct());

        // ── Step 5: Encode and left-pad ───────────────────────────────────────
        let corpus = vocab.encode_windows(&windows);
        ensure!(
            corpus.padded_len >= 2,
            "Encoded windows are too short to hold an input and a target"
        );
        let input_len = corpus.padded_len - 1;

        // ── Step 6: Build the Burn dataset ────────────────────────────────────
        let dataset = NextWordDataset::from_encoded(corpus);
        ensure!(dataset.sample_count() > 0, "No training samples after encoding");
        tracing::info!(
            "Dataset ready: {} samples of {} input ids each",
            dataset.sample_count(),
            input_len,
        );

        // ── Step 7: Save config for the resume path ───────────────────────────
        ckpt.save_config(cfg)?;

        // ── Step 8: Run training loop (Layer 5) ───────────────────────────────
        let model_cfg = NextWordModelConfig::new(
            vocab.size(),
            cfg.d_embed,
            cfg.d_hidden,
            cfg.d_dense,
        );
        let model = run_training(cfg, &model_cfg, dataset, &ckpt)?;

        // ── Step 9: Export the device bundle (Layer 6) ────────────────────────
        let exporter = Exporter::new(&cfg.artifacts_dir);
        let manifest = BundleManifest::new(&model_cfg, input_len);
        let bundle   = exporter.export(&model, &manifest)?;

        tracing::info!(
            "Bundle ready to publish: '{}' + '{}'",
            bundle.model_path.display(),
            bundle.lookup_path.display(),
        );

        Ok(())
    }
}
