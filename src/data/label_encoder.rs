// ============================================================
// Layer 4 — Label Encoder
// ============================================================
// Maps category labels to class indices and one-hot vectors.
//
// The index of a category is its position in the sorted label
// list. Sorting happens exactly once, when the encoder is built
// from the taxonomy for training. The sorted list is what gets
// persisted as categories.json, and inference rebuilds the
// encoder from that list as-is (from_persisted) so the two
// sides can never disagree on an index.

use std::collections::HashMap;

use crate::domain::category::Taxonomy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    labels: Vec<String>,
    index:  HashMap<String, usize>,
}

impl LabelEncoder {
    /// Build from the taxonomy; labels are sorted lexicographically.
    pub fn from_taxonomy(taxonomy: &Taxonomy) -> Self {
        Self::from_persisted(taxonomy.sorted_labels())
    }

    /// Build from a persisted, already-ordered label list.
    pub fn from_persisted(labels: Vec<String>) -> Self {
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();
        Self { labels, index }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn num_classes(&self) -> usize {
        self.labels.len()
    }

    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.index.get(category).copied()
    }

    pub fn label_of(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// One-hot vector for a category, or None if it is unknown.
    pub fn to_one_hot(&self, category: &str) -> Option<Vec<f32>> {
        let i = self.index_of(category)?;
        let mut v = vec![0.0; self.labels.len()];
        v[i] = 1.0;
        Some(v)
    }
}
