// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the raw review CSV all the
// way to tensor batches.
//
// The pipeline flows in this order:
//
//   review CSV (local file or URL)
//       │
//       ▼
//   CsvReviewLoader   → reads rows, keeps a sampled fraction
//       │
//       ▼
//   Normalizer        → cleans text, marks sentence boundaries
//       │
//       ▼
//   Windower          → cuts fixed windows, resolves boundaries
//       │
//       ▼
//   Vocabulary        → assigns ids, encodes and left-pads
//       │
//       ▼
//   NextWordDataset   → implements Burn's Dataset trait
//       │
//       ▼
//   NextWordBatcher   → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Each module is responsible for exactly one step.

/// Loads review text from a local or remote CSV
pub mod loader;

/// Cleans raw review text into the marked token stream
pub mod normalizer;

/// Cuts the token stream into fixed-length windows
pub mod windower;

/// Word ↔ id mapping, encoding and left-padding
pub mod vocabulary;

/// Implements Burn's Dataset trait for next-word samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
