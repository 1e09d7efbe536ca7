// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Persists the vocabulary as word_lookup.json, a flat JSON
// object mapping id strings to words:
//
//   {
//     "1": "the",
//     "2": "food",
//     ...
//   }
//
// This file is one half of the published bundle: the device
// runtime uses it to turn the model's output ids back into
// words. The padding id 0 is deliberately absent, so a consumer
// looking up "0" finds nothing and skips it.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::{fs, path::PathBuf};

use crate::data::vocabulary::Vocabulary;

pub const LOOKUP_FILE: &str = "word_lookup.json";

pub struct VocabStore {
    dir: PathBuf,
}

impl VocabStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    pub fn lookup_path(&self) -> PathBuf {
        self.dir.join(LOOKUP_FILE)
    }

    pub fn exists(&self) -> bool {
        self.lookup_path().exists()
    }

    /// Write the id → word lookup to disk.
    pub fn save(&self, vocab: &Vocabulary) -> Result<()> {
        let lookup: BTreeMap<String, &str> = vocab
            .entries()
            .map(|(id, token)| (id.to_string(), token))
            .collect();

        let path = self.lookup_path();
        fs::write(&path, serde_json::to_string_pretty(&lookup)?)
            .with_context(|| format!("Cannot write vocabulary to '{}'", path.display()))?;

        tracing::info!(
            "Vocabulary saved: {} words in '{}'",
            lookup.len(),
            path.display()
        );
        Ok(())
    }

    /// Read word_lookup.json back into a Vocabulary.
    pub fn load(&self) -> Result<Vocabulary> {
        let path = self.lookup_path();

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read vocabulary from '{}'. \
                     Make sure you have run 'train' first.",
                    path.display()
                )
            })?;

        let lookup: BTreeMap<String, String> = serde_json::from_str(&json)
            .with_context(|| format!("'{}' is not a valid vocabulary file", path.display()))?;

        let entries = lookup
            .into_iter()
            .map(|(id, token)| {
                let id: u32 = id
                    .parse()
                    .with_context(|| format!("Vocabulary id '{id}' is not a number"))?;
                Ok((id, token))
            })
            .collect::<Result<Vec<_>>>()?;

        Vocabulary::from_entries(entries)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::window::Window;

    fn sample_vocab() -> Vocabulary {
        let windows = vec![Window::new(
            ["food", "was", "great", "food"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
        )];
        Vocabulary::build(&windows)
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("rnw-vocab-{}", std::process::id()));
        fs::remove_dir_all(&dir).ok();

        let store = VocabStore::new(&dir);
        let vocab = sample_vocab();
        store.save(&vocab).unwrap();
        assert!(store.exists());

        let restored = store.load().unwrap();
        assert_eq!(restored.distinct(), vocab.distinct());
        assert_eq!(restored.id_of("food"), Some(1));
        assert_eq!(restored.token_of(2), vocab.token_of(2));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = std::env::temp_dir().join(format!("rnw-vocab-missing-{}", std::process::id()));
        fs::remove_dir_all(&dir).ok();

        let store = VocabStore::new(&dir);
        assert!(!store.exists());
        assert!(store.load().is_err());

        fs::remove_dir_all(&dir).ok();
    }
}
