// ============================================================
// Layer 4 — Text Normalizer
// ============================================================
// Turns raw review text into the flat token stream the windower
// consumes. Review prose is messy: line breaks inside cells,
// apostrophes in contractions, punctuation stuck to words, and
// tokens that are not words at all (numbers, emoji, star counts).
//
// Normalisation steps (applied in order):
//   1. Remove newline characters and apostrophes outright
//      ("don't" becomes "dont", never "don t")
//   2. Replace every full stop with the padded sentence marker
//      " <eos> " so it always splits off as its own token
//   3. Split on whitespace
//   4. For each piece: the marker passes through verbatim;
//      anything else is stripped of punctuation and kept only
//      if what remains is entirely alphabetic
//   5. Lowercase every surviving word
//
// The marker check happens BEFORE punctuation stripping —
// otherwise the angle brackets of "<eos>" would be stripped
// and the marker lost.

use crate::domain::review::Review;
use crate::domain::window::BOUNDARY_MARKER;

pub struct Normalizer;

impl Normalizer {
    /// Create a new Normalizer instance
    pub fn new() -> Self {
        Self
    }

    /// Normalise a batch of reviews into one flat token stream.
    /// Records are joined with a space, so windows may span
    /// review boundaries just like they span sentence boundaries.
    pub fn normalize(&self, reviews: &[Review]) -> Vec<String> {
        let joined = reviews
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        self.normalize_text(&joined)
    }

    /// Normalise a single piece of text into tokens.
    /// Also used on the seed text at prediction time, so the
    /// seed goes through exactly the same cleaning as the corpus.
    pub fn normalize_text(&self, text: &str) -> Vec<String> {

        // ── Step 1: Drop newlines and apostrophes ─────────────────────────────
        // Carriage returns ride along with newlines in CSV cells,
        // so they are removed here as well.
        let stripped = text.replace(['\n', '\r', '\''], "");

        // ── Step 2: Mark sentence boundaries ──────────────────────────────────
        // Every full stop becomes a free-standing marker token.
        // Abbreviation dots produce spurious markers, but those
        // fragments rarely survive the alphabetic filter anyway.
        let spaced_marker = format!(" {} ", BOUNDARY_MARKER);
        let marked = stripped.replace('.', &spaced_marker);

        // ── Step 3: Tokenise and filter ───────────────────────────────────────
        marked
            .split_whitespace()
            .filter_map(|piece| self.clean_piece(piece))
            .collect()
    }

    /// Clean one whitespace-separated piece.
    /// Returns None for pieces that do not survive filtering.
    fn clean_piece(&self, piece: &str) -> Option<String> {
        // The marker is exempt from punctuation stripping
        if piece == BOUNDARY_MARKER {
            return Some(piece.to_string());
        }

        let bare: String = piece
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();

        // Keep only pieces that are pure words after stripping
        if !bare.is_empty() && bare.chars().all(|c| c.is_alphabetic()) {
            Some(bare.to_lowercase())
        } else {
            None
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn reviews(texts: &[&str]) -> Vec<Review> {
        texts.iter().map(|t| Review::new(*t)).collect()
    }

    #[test]
    fn test_marks_sentence_boundaries() {
        let n = Normalizer::new();
        let out = n.normalize(&reviews(&["Great food. Loved it", "Terrible service."]));
        assert_eq!(
            out,
            vec!["great", "food", "<eos>", "loved", "it", "terrible", "service", "<eos>"]
        );
    }

    #[test]
    fn test_removes_apostrophes_without_splitting() {
        let n = Normalizer::new();
        assert_eq!(n.normalize_text("don't stop"), vec!["dont", "stop"]);
    }

    #[test]
    fn test_removes_newlines() {
        let n = Normalizer::new();
        // The newline glues the two halves into one token
        assert_eq!(n.normalize_text("deli\ncious food"), vec!["delicious", "food"]);
    }

    #[test]
    fn test_strips_punctuation_inside_words() {
        let n = Normalizer::new();
        assert_eq!(n.normalize_text("well-done!"), vec!["welldone"]);
    }

    #[test]
    fn test_drops_non_alphabetic_pieces() {
        let n = Normalizer::new();
        // "3.5" becomes "3 <eos> 5"; the digit halves are dropped
        assert_eq!(n.normalize_text("3.5 stars"), vec!["<eos>", "stars"]);
    }

    #[test]
    fn test_lowercases_words() {
        let n = Normalizer::new();
        assert_eq!(n.normalize_text("AMAZING Pizza"), vec!["amazing", "pizza"]);
    }

    #[test]
    fn test_empty_input() {
        let n = Normalizer::new();
        assert!(n.normalize_text("").is_empty());
        assert!(n.normalize(&[]).is_empty());
    }
}
