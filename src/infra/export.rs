// ============================================================
// Layer 6 — Bundle Exporter
// ============================================================
// Converts a trained model into the on-device bundle.
//
// The bundle is exactly two files:
//   1. NextWord.mpk.gz    — the model weights
//   2. word_lookup.json   — the id → word table (VocabStore)
//
// NextWord.json sits next to them and describes the model's
// interface for anything that consumes the weights: the named
// input and output tensors with shapes and human-readable
// descriptions, plus the architecture needed to rebuild the
// network. It is metadata about the bundle, not part of it, and
// the publisher sends it as an upload field rather than a file.

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::infra::vocab_store::LOOKUP_FILE;
use crate::ml::model::{NextWordModel, NextWordModelConfig};

/// File stem of the exported weights (recorder adds .mpk.gz)
pub const MODEL_FILE_STEM: &str = "NextWord";

pub const MANIFEST_FILE: &str = "NextWord.json";

/// Name of the model's input tensor as seen by consumers
pub const INPUT_TENSOR: &str = "tokenizedInputSeq";

/// Name of the model's output tensor as seen by consumers
pub const OUTPUT_TENSOR: &str = "tokenProbs";

const RECORD_FORMAT: &str = "burn-compact-record/1";

/// Shape and meaning of one model-facing tensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TensorSpec {
    pub name:        String,
    pub shape:       Vec<usize>,
    pub description: String,
}

/// Everything a consumer needs to drive the exported weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleManifest {
    /// Serialisation format of the weights file
    pub format: String,

    pub input:  TensorSpec,
    pub output: TensorSpec,

    /// Architecture, for rebuilding the network around the weights
    pub vocab_size: usize,
    pub input_len:  usize,
    pub d_embed:    usize,
    pub d_hidden:   usize,
    pub d_dense:    usize,
}

impl BundleManifest {
    pub fn new(cfg: &NextWordModelConfig, input_len: usize) -> Self {
        Self {
            format: RECORD_FORMAT.to_string(),
            input: TensorSpec {
                name:  INPUT_TENSOR.to_string(),
                shape: vec![1, input_len],
                description: format!(
                    "The most recent {input_len} token ids, left-padded with 0. \
                     Ids map to words via word_lookup.json."
                ),
            },
            output: TensorSpec {
                name:  OUTPUT_TENSOR.to_string(),
                shape: vec![1, cfg.vocab_size],
                description: "Softmax probability of each vocabulary id being the next word."
                    .to_string(),
            },
            vocab_size: cfg.vocab_size,
            input_len,
            d_embed:  cfg.d_embed,
            d_hidden: cfg.d_hidden,
            d_dense:  cfg.d_dense,
        }
    }
}

/// The on-disk locations of a finished export.
#[derive(Debug, Clone)]
pub struct ExportedBundle {
    pub model_path:    PathBuf,
    pub lookup_path:   PathBuf,
    pub manifest_path: PathBuf,
}

pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Weights path without extension, as the recorder wants it
    pub fn model_record_stem(&self) -> PathBuf {
        self.dir.join(MODEL_FILE_STEM)
    }

    /// The final file locations, whether or not they exist yet
    pub fn bundle_paths(&self) -> ExportedBundle {
        ExportedBundle {
            model_path:    self.dir.join(format!("{MODEL_FILE_STEM}.mpk.gz")),
            lookup_path:   self.dir.join(LOOKUP_FILE),
            manifest_path: self.dir.join(MANIFEST_FILE),
        }
    }

    /// Write the weights and the manifest into the bundle
    /// directory. The lookup half of the bundle is written by
    /// the VocabStore when the vocabulary is built.
    pub fn export<B: Backend>(
        &self,
        model:    &NextWordModel<B>,
        manifest: &BundleManifest,
    ) -> Result<ExportedBundle> {
        let stem = self.model_record_stem();

        CompactRecorder::new()
            .record(model.clone().into_record(), stem.clone())
            .with_context(|| format!("Failed to export weights to '{}'", stem.display()))?;

        let paths = self.bundle_paths();
        fs::write(&paths.manifest_path, serde_json::to_string_pretty(manifest)?)
            .with_context(|| {
                format!("Cannot write manifest to '{}'", paths.manifest_path.display())
            })?;

        tracing::info!(
            "Exported bundle: '{}' + '{}'",
            paths.model_path.display(),
            paths.lookup_path.display()
        );

        Ok(paths)
    }

    /// Read the manifest of a previous export.
    pub fn load_manifest(&self) -> Result<BundleManifest> {
        let path = self.dir.join(MANIFEST_FILE);

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read manifest from '{}'. \
                     Make sure you have run 'train' first.",
                    path.display()
                )
            })?;

        Ok(serde_json::from_str(&json)?)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_names_both_tensors() {
        let cfg = NextWordModelConfig::new(120, 10, 50, 50);
        let manifest = BundleManifest::new(&cfg, 10);

        assert_eq!(manifest.input.name, "tokenizedInputSeq");
        assert_eq!(manifest.output.name, "tokenProbs");
        assert_eq!(manifest.input.shape, vec![1, 10]);
        assert_eq!(manifest.output.shape, vec![1, 120]);
        assert!(!manifest.input.description.is_empty());
        assert!(!manifest.output.description.is_empty());
    }

    #[test]
    fn test_manifest_json_round_trip() {
        let cfg = NextWordModelConfig::new(80, 10, 50, 50);
        let manifest = BundleManifest::new(&cfg, 7);

        let json = serde_json::to_string(&manifest).unwrap();
        let back: BundleManifest = serde_json::from_str(&json).unwrap();

        assert_eq!(back.vocab_size, 80);
        assert_eq!(back.input_len, 7);
        assert_eq!(back.input.name, manifest.input.name);
    }

    #[test]
    fn test_bundle_paths_use_fixed_names() {
        let exporter = Exporter::new(std::env::temp_dir().join("rnw-export-paths"));
        let paths = exporter.bundle_paths();

        assert!(paths.model_path.ends_with("NextWord.mpk.gz"));
        assert!(paths.lookup_path.ends_with("word_lookup.json"));
        assert!(paths.manifest_path.ends_with("NextWord.json"));
    }
}
