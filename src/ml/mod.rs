// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains the Burn model and the training loop.
//
// What's in this layer:
//
//   model.rs     — The next-word architecture:
//                  • token embedding (padding id included)
//                  • single LSTM, final hidden state only
//                  • ReLU dense layer
//                  • linear head over the vocabulary
//
//   trainer.rs   — The training loop
//                  Handles forward pass, loss computation,
//                  backward pass, optimiser step, the metrics
//                  log, and the end-of-run checkpoint
//
//   predictor.rs — Loads the exported bundle and ranks
//                  next-word candidates for a seed text

/// LSTM next-word model architecture
pub mod model;

/// Full training loop with metrics and checkpointing
pub mod trainer;

/// Local prediction over the exported bundle
pub mod predictor;
