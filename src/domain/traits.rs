// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits instead
// of concrete types, so implementations can be swapped without
// touching the orchestration code:
//   - CsvReviewLoader implements ReviewSource
//   - (future) JsonReviewLoader could also implement ReviewSource
//   - PredictUseCase implements WordSuggester

use crate::domain::review::Review;
use anyhow::Result;

// ─── ReviewSource ─────────────────────────────────────────────────────────────
/// Any component that can load reviews from a source.
///
/// Implementations:
///   - CsvReviewLoader → loads a column from a local or remote CSV
pub trait ReviewSource {
    /// Load all available reviews from this source.
    fn load_all(&self) -> Result<Vec<Review>>;
}

// ─── WordSuggester ────────────────────────────────────────────────────────────
/// Any component that can continue a piece of text one word
/// at a time.
pub trait WordSuggester {
    /// Given some seed text, return the most likely next words
    /// ranked by probability.
    fn suggest(&self, seed: &str) -> Result<Vec<Suggestion>>;
}

/// One ranked candidate for the next word.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// The suggested vocabulary word
    pub token: String,

    /// Softmax probability assigned by the model (0.0 to 1.0)
    pub probability: f32,
}
