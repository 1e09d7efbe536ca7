// ============================================================
// Layer 4 — Vocabulary
// ============================================================
// Bidirectional mapping between surface words and the integer
// ids the model trains on.
//
// Id assignment rules:
//   - ids start at 1 and are dense (1, 2, 3, ...)
//   - more frequent words get smaller ids
//   - equal frequency is broken by first appearance in the
//     window stream, so a rebuild over the same windows gives
//     byte-identical ids
//   - id 0 is reserved for left-padding and never maps to a word
//
// The vocabulary is built once per training run and is immutable
// afterwards; everything downstream borrows it.

use crate::domain::window::Window;
use anyhow::{bail, Result};
use std::collections::HashMap;
use tracing::debug;

/// Reserved padding id. Rows of the embedding table start here,
/// so the table always has distinct_words + 1 rows.
pub const PAD_ID: u32 = 0;

/// All windows encoded and left-padded to a common length.
#[derive(Debug, Clone)]
pub struct EncodedCorpus {
    /// One id sequence per surviving window, each padded_len long
    pub sequences: Vec<Vec<u32>>,

    /// Length every sequence was padded to (the longest window)
    pub padded_len: usize,
}

pub struct Vocabulary {
    /// word → id lookup used while encoding
    token_to_id: HashMap<String, u32>,

    /// id → word lookup; slot i holds the word for id i + 1
    id_to_token: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from trimmed windows.
    pub fn build(windows: &[Window]) -> Self {

        // ── Step 1: Count word frequencies ────────────────────────────────────
        // first_seen records insertion order so that the sort
        // below has a deterministic tie-break.
        let mut freq:       HashMap<String, usize> = HashMap::new();
        let mut first_seen: Vec<String>            = Vec::new();

        for window in windows {
            for token in &window.tokens {
                match freq.get_mut(token) {
                    Some(count) => *count += 1,
                    None => {
                        freq.insert(token.clone(), 1);
                        first_seen.push(token.clone());
                    }
                }
            }
        }

        // ── Step 2: Assign ids by descending frequency ────────────────────────
        // sort_by_key is stable, so words with equal counts stay
        // in first-seen order.
        let mut ranked = first_seen;
        ranked.sort_by_key(|token| std::cmp::Reverse(freq[token.as_str()]));

        let token_to_id = ranked
            .iter()
            .enumerate()
            .map(|(i, token)| (token.clone(), (i + 1) as u32))
            .collect();

        debug!("Vocabulary built with {} distinct words", ranked.len());

        Self { token_to_id, id_to_token: ranked }
    }

    /// Rebuild a vocabulary from saved (id, word) entries.
    /// Fails if the ids are not exactly 1..=n.
    pub fn from_entries(mut entries: Vec<(u32, String)>) -> Result<Self> {
        entries.sort_by_key(|(id, _)| *id);

        let mut id_to_token = Vec::with_capacity(entries.len());
        let mut token_to_id = HashMap::with_capacity(entries.len());

        for (slot, (id, token)) in entries.into_iter().enumerate() {
            if id != (slot + 1) as u32 {
                bail!("Vocabulary ids must be dense starting at 1, found id {id} in slot {slot}");
            }
            if token_to_id.insert(token.clone(), id).is_some() {
                bail!("Vocabulary word '{token}' appears twice");
            }
            id_to_token.push(token);
        }

        Ok(Self { token_to_id, id_to_token })
    }

    /// Number of distinct words (padding excluded)
    pub fn distinct(&self) -> usize {
        self.id_to_token.len()
    }

    /// Embedding table size: distinct words plus the padding row
    pub fn size(&self) -> usize {
        self.id_to_token.len() + 1
    }

    /// Id for a word, or None if the word is out of vocabulary
    pub fn id_of(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    /// Word for an id. Returns None for the padding id and for
    /// ids beyond the vocabulary.
    pub fn token_of(&self, id: u32) -> Option<&str> {
        if id == PAD_ID {
            return None;
        }
        self.id_to_token.get((id - 1) as usize).map(String::as_str)
    }

    /// Encode a token run into ids. Out-of-vocabulary tokens are
    /// dropped, matching how the seed text is treated at
    /// prediction time.
    pub fn encode(&self, tokens: &[String]) -> Vec<u32> {
        tokens
            .iter()
            .filter_map(|t| self.id_of(t))
            .collect()
    }

    /// Encode every window and left-pad all sequences to the
    /// longest one. Windows that encode to nothing are dropped.
    pub fn encode_windows(&self, windows: &[Window]) -> EncodedCorpus {
        let mut sequences: Vec<Vec<u32>> = Vec::with_capacity(windows.len());
        let mut empty = 0usize;

        for window in windows {
            let ids = self.encode(&window.tokens);
            if ids.is_empty() {
                empty += 1;
            } else {
                sequences.push(ids);
            }
        }

        if empty > 0 {
            debug!("Dropped {} windows with no in-vocabulary tokens", empty);
        }

        let padded_len = sequences.iter().map(Vec::len).max().unwrap_or(0);

        for seq in &mut sequences {
            if seq.len() < padded_len {
                let mut padded = vec![PAD_ID; padded_len - seq.len()];
                padded.extend_from_slice(seq);
                *seq = padded;
            }
        }

        EncodedCorpus { sequences, padded_len }
    }

    /// Iterate (id, word) pairs in id order, for persistence
    pub fn entries(&self) -> impl Iterator<Item = (u32, &str)> {
        self.id_to_token
            .iter()
            .enumerate()
            .map(|(i, token)| ((i + 1) as u32, token.as_str()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn windows(raw: &[&[&str]]) -> Vec<Window> {
        raw.iter()
            .map(|w| Window::new(w.iter().map(|t| t.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_most_frequent_word_gets_smallest_id() {
        let v = Vocabulary::build(&windows(&[
            &["food", "great", "food"],
            &["food", "great", "service"],
        ]));
        assert_eq!(v.id_of("food"), Some(1));
        assert_eq!(v.id_of("great"), Some(2));
        assert_eq!(v.id_of("service"), Some(3));
    }

    #[test]
    fn test_equal_frequency_breaks_by_first_appearance() {
        let v = Vocabulary::build(&windows(&[&["zebra", "apple"]]));
        // Both appear once; zebra was seen first
        assert_eq!(v.id_of("zebra"), Some(1));
        assert_eq!(v.id_of("apple"), Some(2));
    }

    #[test]
    fn test_ids_are_dense_from_one() {
        let v = Vocabulary::build(&windows(&[&["a", "b", "c", "b"]]));
        let ids: Vec<u32> = v.entries().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(v.distinct(), 3);
        assert_eq!(v.size(), 4);
    }

    #[test]
    fn test_round_trip_between_word_and_id() {
        let v = Vocabulary::build(&windows(&[&["loved", "it"]]));
        for (id, token) in v.entries() {
            assert_eq!(v.id_of(token), Some(id));
            assert_eq!(v.token_of(id), Some(token));
        }
    }

    #[test]
    fn test_encode_then_decode_returns_original_sequence() {
        let ws = windows(&[&["loved", "the", "food", "loved", "it"]]);
        let v = Vocabulary::build(&ws);

        let ids = v.encode(&ws[0].tokens);
        let decoded: Vec<&str> = ids.iter().filter_map(|&id| v.token_of(id)).collect();
        assert_eq!(decoded, vec!["loved", "the", "food", "loved", "it"]);
    }

    #[test]
    fn test_padding_id_maps_to_no_word() {
        let v = Vocabulary::build(&windows(&[&["a"]]));
        assert_eq!(v.token_of(PAD_ID), None);
        assert_eq!(v.token_of(99), None);
    }

    #[test]
    fn test_encode_drops_unknown_words() {
        let v = Vocabulary::build(&windows(&[&["a", "b"]]));
        let run: Vec<String> = ["a", "mystery", "b"].iter().map(|t| t.to_string()).collect();
        assert_eq!(v.encode(&run), vec![1, 2]);
    }

    #[test]
    fn test_encode_windows_left_pads_to_longest() {
        let ws = windows(&[&["a", "b", "c"], &["b", "c"]]);
        let v = Vocabulary::build(&ws);
        let corpus = v.encode_windows(&ws);

        assert_eq!(corpus.padded_len, 3);
        assert_eq!(corpus.sequences.len(), 2);
        // Short sequence is padded at the FRONT
        assert_eq!(corpus.sequences[1][0], PAD_ID);
        assert_eq!(corpus.sequences[1].len(), 3);
        // Last slot always holds a real token
        assert_ne!(corpus.sequences[1][2], PAD_ID);
    }

    #[test]
    fn test_from_entries_round_trip() {
        let v = Vocabulary::build(&windows(&[&["x", "y", "x"]]));
        let saved: Vec<(u32, String)> =
            v.entries().map(|(id, t)| (id, t.to_string())).collect();

        let restored = Vocabulary::from_entries(saved).unwrap();
        assert_eq!(restored.id_of("x"), Some(1));
        assert_eq!(restored.id_of("y"), Some(2));
    }

    #[test]
    fn test_from_entries_rejects_gappy_ids() {
        let entries = vec![(1, "a".to_string()), (3, "b".to_string())];
        assert!(Vocabulary::from_entries(entries).is_err());
    }
}
