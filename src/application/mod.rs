// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (training, predicting, or publishing).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No UI or printing here (that's Layer 1)
//   - No direct file or network access (Layers 4 and 6)
//   - Only workflow coordination

// The training + export workflow
pub mod train_use_case;

// The local next-word prediction workflow
pub mod predict_use_case;

// The upload + delivery workflow
pub mod publish_use_case;
