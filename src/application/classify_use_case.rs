// ============================================================
// Layer 2 — ClassifyUseCase
// ============================================================
// Predicts the category of a single page:
//
//   Step 1: Try to load the trained artifacts from model_dir
//   Step 2a: Loaded   → BiLSTM prediction with softmax confidence
//   Step 2b: Missing  → keyword rules over the taxonomy, with a
//                       warning so the user knows why
//
// Both paths sit behind the CategoryPredictor trait.

use std::fmt;

use anyhow::Result;

use crate::domain::{
    category::Taxonomy,
    keyword_rules::KeywordClassifier,
    traits::{CategoryPredictor, Prediction},
};
use crate::ml::inferencer::Inferencer;

/// Which predictor produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionSource {
    Model,
    KeywordRules,
}

impl fmt::Display for PredictionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionSource::Model        => f.write_str("trained model"),
            PredictionSource::KeywordRules => f.write_str("keyword rules"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub prediction: Prediction,
    pub source:     PredictionSource,
}

pub struct ClassifyUseCase {
    model:    Option<Inferencer>,
    taxonomy: Taxonomy,
}

impl ClassifyUseCase {
    /// Load the model from `model_dir`. A load failure is not fatal;
    /// classification then falls back to the keyword rules.
    pub fn new(model_dir: &str) -> Self {
        let model = match Inferencer::from_artifacts(model_dir) {
            Ok(inferencer) => Some(inferencer),
            Err(e) => {
                tracing::warn!("Falling back to keyword rules: {e:#}");
                None
            }
        };
        Self { model, taxonomy: Taxonomy::default() }
    }

    pub fn source(&self) -> PredictionSource {
        if self.model.is_some() { PredictionSource::Model } else { PredictionSource::KeywordRules }
    }

    pub fn classify(&self, title: &str, url: &str) -> Result<Classification> {
        let prediction = match &self.model {
            Some(inferencer) => inferencer.predict(title, url)?,
            None => KeywordClassifier::new(&self.taxonomy).predict(title, url)?,
        };
        Ok(Classification { prediction, source: self.source() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_falls_back_to_keywords() {
        let tmp = tempfile::tempdir().unwrap();
        let use_case = ClassifyUseCase::new(&tmp.path().to_string_lossy());
        assert_eq!(use_case.source(), PredictionSource::KeywordRules);

        let c = use_case.classify("npm", "https://www.npmjs.com").unwrap();
        assert_eq!(c.source, PredictionSource::KeywordRules);
        assert_eq!(c.prediction.category, "development");
    }

    #[test]
    fn test_fallback_unknown_page_is_other() {
        let tmp = tempfile::tempdir().unwrap();
        let c = ClassifyUseCase::new(&tmp.path().to_string_lossy())
            .classify("Untitled", "https://qqqq.zz")
            .unwrap();
        assert_eq!(c.prediction.category, "other");
    }
}
