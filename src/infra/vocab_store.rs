// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Persists the word → id vocabulary as tokenizer.json so the
// inference side encodes text with exactly the ids the model
// was trained on.
//
// Format: a flat JSON object in id order,
//   {"com": 1, "www": 2, "https": 3, ...}
// Id 0 never appears; it is implied as padding/unknown.

use anyhow::{Context, Result};
use std::{collections::HashMap, fs, path::PathBuf};

use crate::data::vocabulary::Vocabulary;

pub const VOCABULARY_FILE: &str = "tokenizer.json";

pub struct VocabularyStore {
    dir: PathBuf,
}

impl VocabularyStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(VOCABULARY_FILE)
    }

    pub fn save(&self, vocabulary: &Vocabulary) -> Result<()> {
        let path = self.path();
        fs::write(&path, serde_json::to_string(vocabulary)?)
            .with_context(|| format!("Cannot write vocabulary to '{}'", path.display()))?;

        tracing::info!("Vocabulary with {} tokens saved to '{}'", vocabulary.len(), path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<Vocabulary> {
        let path = self.path();
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read vocabulary from '{}'", path.display()))?;
        let index: HashMap<String, u32> = serde_json::from_str(&json)
            .with_context(|| format!("Malformed vocabulary file '{}'", path.display()))?;

        Vocabulary::from_index(index).with_context(|| {
            format!("Vocabulary ids in '{}' are not a contiguous 1..=n range", path.display())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = VocabularyStore::new(tmp.path());
        let vocab = Vocabulary::fit(["www youtube com", "www bbc com"], 10_000);

        store.save(&vocab).unwrap();
        assert_eq!(store.load().unwrap(), vocab);
    }

    #[test]
    fn test_rejects_bad_ids() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = VocabularyStore::new(tmp.path());
        fs::write(store.path(), r#"{"www": 0}"#).unwrap();
        assert!(store.load().is_err());
    }
}
