// ============================================================
// Layer 3 — Site Seed and Training Example
// ============================================================
// A SiteSeed is one hand-curated website: its real page title,
// its URL and the category a human assigned to it.
//
// A TrainingExample is what the model actually learns from.
// The synthesizer expands every seed into several examples
// that share the URL and category but vary the title.
//
// Both are plain data with no behaviour beyond construction.

use serde::{Deserialize, Serialize};

/// One curated website used to generate training examples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSeed {
    pub title:    String,
    pub url:      String,
    pub category: String,
}

impl SiteSeed {
    pub fn new(
        title:    impl Into<String>,
        url:      impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title:    title.into(),
            url:      url.into(),
            category: category.into(),
        }
    }
}

/// A labelled (title, url) pair.
/// Immutable once created by the synthesizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub title:    String,
    pub url:      String,
    pub category: String,
}

impl TrainingExample {
    pub fn new(
        title:    impl Into<String>,
        url:      impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title:    title.into(),
            url:      url.into(),
            category: category.into(),
        }
    }
}
