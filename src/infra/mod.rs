// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles all cross-cutting concerns that don't belong in
// any specific business layer:
//
//   checkpoint.rs  — Saving and loading model weights
//                    Uses Burn's CompactRecorder to serialise
//                    model parameters to disk. Also saves/loads
//                    TrainConfig as JSON so a resumed run can
//                    check it matches the original one.
//
//   vocab_store.rs — Vocabulary persistence
//                    Writes word_lookup.json, the id → word
//                    table that ships with the model, and
//                    reads it back for resume and prediction.
//
//   export.rs      — On-device bundle export
//                    Writes the NextWord weights file and the
//                    manifest that names the input and output
//                    tensors.
//
//   publisher.rs   — Delivery service client
//                    Uploads the two-file bundle and requests
//                    delivery to devices.
//
//   metrics.rs     — Training metrics logging
//                    Writes epoch-level metrics (loss,
//                    accuracy) to a CSV file for later
//                    analysis and plotting.

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Vocabulary saving and loading (word_lookup.json)
pub mod vocab_store;

/// Exported bundle writing and manifest handling
pub mod export;

/// Upload and delivery client for the model service
pub mod publisher;

/// Training metrics CSV logger
pub mod metrics;
