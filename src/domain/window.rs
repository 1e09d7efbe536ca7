// ============================================================
// Layer 3 — Window Domain Type
// ============================================================
// Represents one training window: a short run of consecutive
// tokens cut from the normalised review stream. The model sees
// every token except the last as input and must predict the
// last one.
//
// Windows are cut BEFORE sentence boundaries are resolved, so a
// freshly cut candidate may still contain the boundary marker.
// The windower trims or discards it; only marker-free windows
// ever reach the vocabulary or the trainer.
//
// Example (window length 5):
//   stream:    [great, food, <eos>, loved, it, terrible, ...]
//   candidate: [food, <eos>, loved, it, terrible]
//   kept:      [loved, it, terrible]   (back side of the marker)

use serde::{Deserialize, Serialize};

/// Marker inserted into the token stream wherever a sentence
/// ended in the original review text. Never enters the vocabulary.
pub const BOUNDARY_MARKER: &str = "<eos>";

/// A marker-free run of consecutive tokens, ready for encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// The surviving tokens, in corpus order
    pub tokens: Vec<String>,
}

impl Window {
    /// Create a new Window from an owned token list
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True if any token is the sentence boundary marker.
    /// Holds for raw candidates only; trimmed windows never do.
    pub fn contains_marker(&self) -> bool {
        self.tokens.iter().any(|t| t == BOUNDARY_MARKER)
    }
}

/// Result of trimming one window candidate.
///
/// Trimming is the ONLY recoverable failure in the pipeline:
/// a candidate that cannot be resolved to a single sentence
/// fragment is skipped, and the run carries on with the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrimOutcome {
    /// The candidate survived (possibly shortened)
    Keep(Window),

    /// The candidate straddled too many sentence boundaries
    /// and was discarded
    Skip,
}
