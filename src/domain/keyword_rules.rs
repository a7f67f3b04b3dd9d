// ============================================================
// Layer 3 — Keyword Fallback Classifier
// ============================================================
// A rule-based classifier over the taxonomy keywords.
//
// Used by `classify` when the trained artifacts are missing or
// fail to load. The first category (in taxonomy declaration
// order) with a keyword that occurs as a substring of the
// lowercased "title url" text wins; no match means "other".

use anyhow::Result;

use crate::domain::category::{Taxonomy, OTHER};
use crate::domain::traits::{CategoryPredictor, Prediction};

pub struct KeywordClassifier<'a> {
    taxonomy: &'a Taxonomy,
}

impl<'a> KeywordClassifier<'a> {
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// Return the matching category label, or `OTHER`.
    pub fn classify(&self, title: &str, url: &str) -> &str {
        let text = format!("{title} {url}").to_lowercase();
        self.taxonomy
            .categories()
            .iter()
            .find(|c| c.keywords.iter().any(|k| text.contains(k.as_str())))
            .map(|c| c.label.as_str())
            .unwrap_or(OTHER)
    }
}

impl CategoryPredictor for KeywordClassifier<'_> {
    fn predict(&self, title: &str, url: &str) -> Result<Prediction> {
        let category = self.classify(title, url);
        // Rules are all-or-nothing; a miss is a low-confidence "other".
        let confidence = if category == OTHER { 0.0 } else { 1.0 };
        Ok(Prediction { category: category.to_string(), confidence })
    }
}
