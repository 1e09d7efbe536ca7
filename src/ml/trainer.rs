// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full training loop using Burn's DataLoader and Adam.
//
// There is no validation split and no early stopping: the run
// always executes exactly cfg.epochs passes over every window,
// one fit over the whole corpus. Loss and accuracy are measured
// on the training batches themselves, and a single checkpoint is
// written when the final epoch finishes.
//
// Key backend detail:
//   - Training uses MyBackend (Autodiff<Wgpu>) for gradients
//   - argmax(1) returns [batch,1] so we flatten before .equal()

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::NextWordBatcher, dataset::NextWordDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{NextWordModel, NextWordModelConfig};

type MyBackend = burn::backend::Autodiff<burn::backend::Wgpu>;

pub fn run_training(
    cfg:       &TrainConfig,
    model_cfg: &NextWordModelConfig,
    dataset:   NextWordDataset,
    ckpt:      &CheckpointManager,
) -> Result<NextWordModel<MyBackend>> {
    let device = burn::backend::wgpu::WgpuDevice::default();
    tracing::info!("Using WGPU device: {:?}", device);
    train_loop(cfg, model_cfg, dataset, ckpt, device)
}

fn train_loop(
    cfg:       &TrainConfig,
    model_cfg: &NextWordModelConfig,
    dataset:   NextWordDataset,
    ckpt:      &CheckpointManager,
    device:    burn::backend::wgpu::WgpuDevice,
) -> Result<NextWordModel<MyBackend>> {

    // ── Build model ───────────────────────────────────────────────────────────
    let mut model: NextWordModel<MyBackend> = model_cfg.init(&device);

    if cfg.resume {
        model = ckpt.load_model(model, &device)?;
        tracing::info!("Resumed weights from the existing checkpoint");
    }

    tracing::info!(
        "Model ready: vocab={}, embed={}, hidden={}, dense={}",
        model_cfg.vocab_size, model_cfg.d_embed, model_cfg.d_hidden, model_cfg.d_dense,
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Metrics log ───────────────────────────────────────────────────────────
    let metrics = MetricsLogger::new(&cfg.artifacts_dir)?;
    tracing::info!("Logging epoch metrics to '{}'", metrics.csv_path().display());

    // ── Data loader ───────────────────────────────────────────────────────────
    let batcher = NextWordBatcher::<MyBackend>::new(device.clone());
    let loader  = DataLoaderBuilder::new(batcher)
        .batch_size(cfg.batch_size)
        .shuffle(42)
        .num_workers(1)
        .build(dataset);

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;
        let mut correct  = 0usize;
        let mut samples  = 0usize;

        for batch in loader.iter() {
            let targets = batch.targets;
            samples += targets.dims()[0];

            let (loss, logits) = model.forward_loss(batch.inputs, targets.clone());

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            loss_sum += loss_val;
            batches  += 1;

            // argmax(1) returns shape [batch, 1] — flatten to [batch]
            // before comparing with the targets
            let predicted = logits.argmax(1).flatten::<1>(0, 1);
            let batch_correct: i64 = predicted
                .equal(targets)
                .int().sum().into_scalar().elem::<i64>();
            correct += batch_correct as usize;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_loss = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };
        let accuracy = if samples > 0 { correct as f64 / samples as f64 } else { 0.0 };

        println!(
            "Epoch {:>3}/{} | loss={:.4} | acc={:.1}%",
            epoch, cfg.epochs, avg_loss, accuracy * 100.0,
        );

        metrics.log(&EpochMetrics::new(epoch, avg_loss, accuracy))?;
    }

    // One checkpoint for the whole run, written after the final
    // epoch. A rerun with --resume continues from exactly here.
    ckpt.save_model(&model)?;
    tracing::info!("Training complete, checkpoint saved");

    Ok(model)
}
