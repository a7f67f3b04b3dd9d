// ============================================================
// Layer 4 — Vocabulary and Sequence Encoder
// ============================================================
// Maps normalized words to integer ids and turns a normalized
// string into the fixed-length id sequence the model reads.
//
// Building the vocabulary (fit):
//   1. Split every corpus string on whitespace
//   2. Count each token across the whole corpus
//   3. Order tokens by descending count; equal counts keep
//      the order in which the tokens were first seen
//   4. Give the first `max_size` tokens ids 1, 2, 3, ...
//      Everything past the cap is dropped.
//
// Id 0 is never assigned to a token. It is the padding value
// and also what unknown tokens encode to.
//
// Encoding (encode):
//   tokens → ids (0 if unknown) → keep the LAST max_length ids
//   → left-pad with 0 up to max_length
//
//   max_length = 5, text = "a b c"    → [0, 0, a, b, c]
//   max_length = 2, text = "a b c"    → [b, c]
//
// The same corpus always produces the same vocabulary.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

/// Padding / unknown id.
pub const PAD_ID: u32 = 0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    /// tokens[i] has id i + 1
    tokens: Vec<String>,
    index:  HashMap<String, u32>,
}

impl Vocabulary {
    /// Build a vocabulary from normalized strings.
    pub fn fit<I, S>(corpus: I, max_size: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut first_seen: Vec<String> = Vec::new();

        for text in corpus {
            for token in text.as_ref().split_whitespace() {
                let count = counts.entry(token.to_string()).or_insert_with(|| {
                    first_seen.push(token.to_string());
                    0
                });
                *count += 1;
            }
        }

        // sort_by is stable, so ties stay in first-seen order
        let mut ranked = first_seen;
        ranked.sort_by(|a, b| counts[b].cmp(&counts[a]));
        ranked.truncate(max_size);

        tracing::debug!(
            "Vocabulary fitted: {} distinct tokens, {} kept (cap {})",
            counts.len(),
            ranked.len(),
            max_size
        );

        Self::from_ranked(ranked)
    }

    /// Rebuild from a persisted token → id map.
    /// Returns None if the ids are not exactly 1..=len.
    pub fn from_index(index: HashMap<String, u32>) -> Option<Self> {
        let mut tokens = vec![String::new(); index.len()];
        for (token, &id) in &index {
            let slot = tokens.get_mut((id as usize).checked_sub(1)?)?;
            if !slot.is_empty() {
                return None;
            }
            *slot = token.clone();
        }
        if tokens.iter().any(|t| t.is_empty()) {
            return None;
        }
        Some(Self { tokens, index })
    }

    fn from_ranked(tokens: Vec<String>) -> Self {
        let index = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as u32 + 1))
            .collect();
        Self { tokens, index }
    }

    pub fn id_of(&self, token: &str) -> Option<u32> {
        self.index.get(token).copied()
    }

    /// Number of real tokens (excludes the padding id).
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Embedding table size: every id plus the padding slot.
    pub fn input_dim(&self) -> usize {
        self.tokens.len() + 1
    }

    /// Encode a normalized string to exactly `max_length` ids.
    pub fn encode(&self, text: &str, max_length: usize) -> Vec<u32> {
        let ids: Vec<u32> = text
            .split_whitespace()
            .map(|t| self.id_of(t).unwrap_or(PAD_ID))
            .collect();

        let kept = &ids[ids.len().saturating_sub(max_length)..];
        let mut sequence = vec![PAD_ID; max_length - kept.len()];
        sequence.extend_from_slice(kept);
        sequence
    }
}

/// Serialized as a JSON object in id order: {"com": 1, "www": 2, ...}
impl Serialize for Vocabulary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.tokens
                .iter()
                .enumerate()
                .map(|(i, t)| (t.as_str(), i as u32 + 1)),
        )
    }
}
