// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer talks to these traits rather than to
// concrete types, so the trained network and the keyword
// rules are interchangeable behind `classify`.
//
//   - Inferencer        → trained BiLSTM loaded from artifacts
//   - KeywordClassifier → taxonomy keyword rules
//   - SeedCatalog       → curated list of sites

use anyhow::Result;
use crate::domain::example::SiteSeed;

// ─── SeedSource ───────────────────────────────────────────────────────────────
/// Any component that can supply curated website seeds.
pub trait SeedSource {
    /// Return every seed in a stable order.
    fn seeds(&self) -> Vec<SiteSeed>;
}

// ─── CategoryPredictor ────────────────────────────────────────────────────────
/// A single category prediction with its confidence in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub category:   String,
    pub confidence: f32,
}

/// Any component that can assign a category to a page.
pub trait CategoryPredictor {
    fn predict(&self, title: &str, url: &str) -> Result<Prediction>;
}
