// ============================================================
// Layer 3 — Review Domain Type
// ============================================================
// Represents a single customer review pulled from the corpus.
// This is a plain data struct with no behaviour — just the raw
// review text as it appeared in the source column.

use serde::{Deserialize, Serialize};

/// A raw review record loaded from the corpus.
/// By the time a Review is created, the text has already been
/// extracted from its CSV cell but NOT yet cleaned or tokenised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// The full review text before any normalisation
    pub text: String,
}

impl Review {
    /// Create a new Review. Uses impl Into<String> so callers
    /// can pass &str or String.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
