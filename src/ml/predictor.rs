// ============================================================
// Layer 5 — Predictor
// ============================================================
use anyhow::{Context, Result};
use burn::prelude::*;
use burn::record::{CompactRecorder, Recorder};

use crate::data::vocabulary::{Vocabulary, PAD_ID};
use crate::domain::traits::Suggestion;
use crate::infra::export::Exporter;
use crate::ml::model::{NextWordModel, NextWordModelConfig};

type InferBackend = burn::backend::Wgpu;

pub struct Predictor {
    model:     NextWordModel<InferBackend>,
    input_len: usize,
    device:    burn::backend::wgpu::WgpuDevice,
}

impl Predictor {
    /// Load the exported bundle for local prediction, reading the
    /// same pair of files a device would consume.
    pub fn from_bundle(exporter: &Exporter) -> Result<Self> {
        let device   = burn::backend::wgpu::WgpuDevice::default();
        let manifest = exporter.load_manifest()?;

        let model_cfg = NextWordModelConfig::new(
            manifest.vocab_size,
            manifest.d_embed,
            manifest.d_hidden,
            manifest.d_dense,
        );
        let model: NextWordModel<InferBackend> = model_cfg.init(&device);

        let record = CompactRecorder::new()
            .load(exporter.model_record_stem(), &device)
            .context("Cannot load exported model weights. Run 'train' first.")?;
        let model = model.load_record(record);

        tracing::info!("Model loaded from exported bundle");
        Ok(Self { model, input_len: manifest.input_len, device })
    }

    /// Rank vocabulary words by their probability of following
    /// the seed tokens.
    pub fn suggest(
        &self,
        seed_tokens: &[String],
        vocab:       &Vocabulary,
        top_k:       usize,
    ) -> Result<Vec<Suggestion>> {
        // Encode the seed exactly like a training window: unknown
        // words are dropped, only the most recent input_len ids
        // are kept, and the front is left-padding.
        let ids  = vocab.encode(seed_tokens);
        let tail = if ids.len() > self.input_len {
            &ids[ids.len() - self.input_len..]
        } else {
            &ids[..]
        };

        let mut input_flat = vec![PAD_ID as i32; self.input_len - tail.len()];
        input_flat.extend(tail.iter().map(|&x| x as i32));

        let input = Tensor::<InferBackend, 1, Int>::from_ints(
            input_flat.as_slice(), &self.device,
        ).unsqueeze::<2>();

        let logits = self.model.forward(input); // [1, vocab_size]

        let probs: Vec<f32> = burn::tensor::activation::softmax(logits, 1)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Cannot read probability tensor: {e:?}"))?;

        // Rank ids by probability. The padding id maps to no word
        // and is filtered out here.
        let mut ranked: Vec<(usize, f32)> = probs.into_iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());

        Ok(ranked
            .into_iter()
            .filter_map(|(id, probability)| {
                vocab.token_of(id as u32).map(|token| Suggestion {
                    token: token.to_string(),
                    probability,
                })
            })
            .take(top_k)
            .collect())
    }
}
