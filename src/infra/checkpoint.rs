// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model weights using Burn's CompactRecorder.
//
// What gets saved in the artifacts directory:
//   1. model.mpk.gz      — all learned parameters
//   2. train_config.json — the full training configuration
//
// The config is saved separately so a resumed run can verify it
// was launched with the same architecture (d_embed, d_hidden,
// ...) before loading weights into a freshly built model.
//
// There is exactly ONE checkpoint slot. Training writes it once
// when the run finishes, and a later run with --resume continues
// from it. A new run simply overwrites it.
//
// Burn's CompactRecorder:
//   - Serialises model parameters to MessagePack format
//   - Compresses with gzip for smaller file size
//   - Type-safe: loading fails if the architecture doesn't match

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use std::{fs, path::PathBuf};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::NextWordModel;

/// File stem of the single checkpoint slot (recorder adds .mpk.gz)
const MODEL_STEM: &str = "model";

const CONFIG_FILE: &str = "train_config.json";

/// Manages saving and loading of the training checkpoint.
/// All files are stored in the configured directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager.
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        // create_dir_all creates parent directories too, like `mkdir -p`
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// True once a trained checkpoint exists on disk
    pub fn has_checkpoint(&self) -> bool {
        self.dir.join(format!("{MODEL_STEM}.mpk.gz")).exists()
    }

    /// Save the model weights into the single checkpoint slot.
    pub fn save_model<B: Backend>(&self, model: &NextWordModel<B>) -> Result<()> {
        // Build the file path (without extension — recorder adds it)
        let path = self.dir.join(MODEL_STEM);

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save checkpoint to '{}'", path.display()))?;

        tracing::debug!("Saved checkpoint to '{}'", path.display());
        Ok(())
    }

    /// Load the checkpoint weights into a freshly built model.
    ///
    /// The model passed in must have the architecture the
    /// checkpoint was trained with, or loading will fail.
    pub fn load_model<B: Backend>(
        &self,
        model:  NextWordModel<B>,
        device: &B::Device,
    ) -> Result<NextWordModel<B>> {
        let path = self.dir.join(MODEL_STEM);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!(
                    "Cannot load checkpoint '{}'. Have you trained the model first?",
                    path.display()
                )
            })?;

        // load_record() returns a new model with the loaded weights
        Ok(model.load_record(record))
    }

    /// Save the training configuration to JSON.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join(CONFIG_FILE);

        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    /// Load the training configuration from JSON.
    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join(CONFIG_FILE);

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read config from '{}'. \
                     Make sure you have run 'train' first.",
                    path.display()
                )
            })?;

        Ok(serde_json::from_str(&json)?)
    }
}
