// ============================================================
// Layer 4 — Sequence Windower
// ============================================================
// Slides a fixed-length window over the normalised token stream
// and resolves sentence boundaries inside each candidate.
//
// Candidate generation:
//   For a stream of N tokens and window length W, one candidate
//   ends at every position from W up to N-1. Each candidate is
//   the W tokens immediately before that position, so adjacent
//   candidates overlap by W-1 tokens. Streams of W tokens or
//   fewer produce no candidates at all.
//
// Boundary resolution for one candidate:
//   - no marker             → keep as-is
//   - marker in last slot   → drop the marker, keep the front
//   - marker in first slot  → drop the marker, keep the back
//   - marker in the middle  → keep the LONGER side, measured in
//     characters of the space-joined text; on a tie the back
//     (most recent) side wins
//   - two or more markers   → skip the candidate entirely
//
// Example with window length 5:
//   candidate: [food, was, <eos>, amazing, totally]
//   front "food was" (8 chars) vs back "amazing totally" (15)
//   kept: [amazing, totally]

use crate::domain::window::{TrimOutcome, Window, BOUNDARY_MARKER};
use tracing::debug;

pub struct Windower {
    /// Number of tokens per window candidate
    window_len: usize,
}

impl Windower {
    /// Create a new Windower.
    ///
    /// # Panics
    /// Panics if window_len < 2, because every training window
    /// must hold at least one input token plus the target.
    pub fn new(window_len: usize) -> Self {
        assert!(
            window_len >= 2,
            "window_len ({}) must be at least 2",
            window_len
        );
        Self { window_len }
    }

    /// Cut all candidates from the token stream and resolve
    /// their sentence boundaries. Skipped candidates are counted
    /// but do not interrupt the run.
    pub fn windows(&self, tokens: &[String]) -> Vec<Window> {
        let mut kept    = Vec::new();
        let mut skipped = 0usize;

        for end in self.window_len..tokens.len() {
            let candidate = &tokens[end - self.window_len..end];

            match self.trim(candidate) {
                TrimOutcome::Keep(window) => {
                    debug_assert!(!window.contains_marker() && !window.is_empty());
                    kept.push(window);
                }
                TrimOutcome::Skip => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!("Skipped {} window candidates with multiple sentence breaks", skipped);
        }

        kept
    }

    /// Resolve the sentence boundaries inside one candidate.
    pub fn trim(&self, candidate: &[String]) -> TrimOutcome {
        let marker_slots: Vec<usize> = candidate
            .iter()
            .enumerate()
            .filter(|(_, t)| *t == BOUNDARY_MARKER)
            .map(|(i, _)| i)
            .collect();

        match marker_slots.as_slice() {
            // Clean window, nothing to do
            [] => TrimOutcome::Keep(Window::new(candidate.to_vec())),

            [slot] => {
                let last = candidate.len() - 1;

                if *slot == last {
                    // Sentence ends exactly at the window edge
                    TrimOutcome::Keep(Window::new(candidate[..last].to_vec()))
                } else if *slot == 0 {
                    // Window starts right on a sentence break
                    TrimOutcome::Keep(Window::new(candidate[1..].to_vec()))
                } else {
                    // Break in the middle: keep the longer side
                    let front = &candidate[..*slot];
                    let back  = &candidate[*slot + 1..];

                    let side = if joined_len(front) > joined_len(back) {
                        front
                    } else {
                        back
                    };

                    TrimOutcome::Keep(Window::new(side.to_vec()))
                }
            }

            // Two or more sentence breaks: no single fragment
            // dominates, so the candidate is discarded
            _ => TrimOutcome::Skip,
        }
    }
}

/// Character length of the tokens joined with single spaces.
/// [ab, c] measures 4: "ab c"
fn joined_len(tokens: &[String]) -> usize {
    let chars: usize = tokens.iter().map(|t| t.len()).sum();
    chars + tokens.len().saturating_sub(1)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn toks(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    fn kept(outcome: TrimOutcome) -> Vec<String> {
        match outcome {
            TrimOutcome::Keep(w) => w.tokens,
            TrimOutcome::Skip    => panic!("expected Keep, got Skip"),
        }
    }

    #[test]
    fn test_clean_candidate_passes_through() {
        let w = Windower::new(3);
        let c = toks(&["a", "b", "c"]);
        assert_eq!(kept(w.trim(&c)), c);
    }

    #[test]
    fn test_trailing_marker_is_dropped() {
        let w = Windower::new(3);
        let c = toks(&["a", "b", "<eos>"]);
        assert_eq!(kept(w.trim(&c)), toks(&["a", "b"]));
    }

    #[test]
    fn test_leading_marker_is_dropped() {
        let w = Windower::new(3);
        let c = toks(&["<eos>", "b", "c"]);
        assert_eq!(kept(w.trim(&c)), toks(&["b", "c"]));
    }

    #[test]
    fn test_interior_marker_keeps_longer_front() {
        let w = Windower::new(11);
        let c = toks(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "<eos>", "k"]);
        assert_eq!(
            kept(w.trim(&c)),
            toks(&["a", "b", "c", "d", "e", "f", "g", "h", "i"])
        );
    }

    #[test]
    fn test_interior_marker_keeps_longer_back() {
        let w = Windower::new(5);
        let c = toks(&["food", "was", "<eos>", "amazing", "totally"]);
        assert_eq!(kept(w.trim(&c)), toks(&["amazing", "totally"]));
    }

    #[test]
    fn test_tie_keeps_back_side() {
        let w = Windower::new(3);
        // "ab" vs "cd": both 2 characters, back side wins
        let c = toks(&["ab", "<eos>", "cd"]);
        assert_eq!(kept(w.trim(&c)), toks(&["cd"]));
    }

    #[test]
    fn test_two_markers_skip_candidate() {
        let w = Windower::new(4);
        let c = toks(&["a", "<eos>", "b", "<eos>"]);
        assert_eq!(w.trim(&c), TrimOutcome::Skip);
    }

    #[test]
    fn test_window_count_over_stream() {
        let w = Windower::new(3);
        let stream = toks(&["a", "b", "c", "d", "e"]);
        // Candidates end at positions 3 and 4: [a b c] and [b c d].
        // The final token only ever appears as a trailing context
        // token, never as the end of a candidate.
        let windows = w.windows(&stream);
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].tokens, toks(&["a", "b", "c"]));
        assert_eq!(windows[1].tokens, toks(&["b", "c", "d"]));
    }

    #[test]
    fn test_short_stream_gives_no_windows() {
        let w = Windower::new(5);
        assert!(w.windows(&toks(&["a", "b", "c", "d", "e"])).is_empty());
    }

    #[test]
    fn test_trimmed_windows_never_contain_marker() {
        let w = Windower::new(4);
        let stream = toks(&["a", "b", "<eos>", "c", "d", "e", "<eos>", "f", "g"]);
        for window in w.windows(&stream) {
            assert!(!window.contains_marker());
            assert!(!window.is_empty());
        }
    }

    #[test]
    #[should_panic]
    fn test_window_len_must_hold_input_and_target() {
        let _ = Windower::new(1);
    }
}
