// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Runs the trained classifier on (title, url) pairs using the
// exact preprocessing the model was trained with:
//
//   normalize → encode (pre-pad/truncate) → forward → softmax
//
// It can wrap the in-memory model straight out of the trainer
// or rebuild everything from the artifact directory; the two
// must agree to within floating-point tolerance.

use anyhow::{Context, Result};
use burn::prelude::*;

use crate::data::{
    label_encoder::LabelEncoder,
    normalizer::{CharRule, Normalizer},
    vocabulary::Vocabulary,
};
use crate::domain::traits::{CategoryPredictor, Prediction};
use crate::infra::{artifacts::ArtifactStore, vocab_store::VocabularyStore};
use crate::ml::model::{SiteClassifier, SiteClassifierConfig};
use crate::ml::InferBackend;

pub struct Inferencer {
    model:      SiteClassifier<InferBackend>,
    vocabulary: Vocabulary,
    labels:     LabelEncoder,
    normalizer: Normalizer,
    max_length: usize,
    device:     <InferBackend as Backend>::Device,
}

impl Inferencer {
    pub fn new(
        model:      SiteClassifier<InferBackend>,
        config:     &SiteClassifierConfig,
        vocabulary: Vocabulary,
        labels:     LabelEncoder,
    ) -> Self {
        let rule = if config.unicode_tokens { CharRule::Unicode } else { CharRule::Ascii };
        Self {
            model,
            vocabulary,
            labels,
            normalizer: Normalizer::new(rule),
            max_length: config.max_length,
            device:     Default::default(),
        }
    }

    /// Load model, vocabulary and categories from an artifact directory.
    pub fn from_artifacts(dir: &str) -> Result<Self> {
        let device     = <InferBackend as Backend>::Device::default();
        let store      = ArtifactStore::new(dir);
        let (model, config) = store.load_model::<InferBackend>(&device)?;
        if config.max_length == 0 {
            anyhow::bail!(
                "Model config in '{}' has max_length 0; sequences need at least one token",
                dir
            );
        }
        let vocabulary = VocabularyStore::new(dir).load()?;
        let labels     = LabelEncoder::from_persisted(store.load_categories()?);

        if labels.num_classes() != config.num_classes {
            anyhow::bail!(
                "categories.json lists {} categories but the model has {} outputs",
                labels.num_classes(),
                config.num_classes
            );
        }

        tracing::info!(
            "Model loaded from '{}' ({} tokens, {} categories)",
            dir, vocabulary.len(), labels.num_classes(),
        );
        Ok(Self::new(model, &config, vocabulary, labels))
    }

    /// Class probabilities for each (title, url), in category order.
    pub fn probabilities(&self, pages: &[(&str, &str)]) -> Result<Vec<Vec<f32>>> {
        if pages.is_empty() {
            return Ok(Vec::new());
        }

        let flat: Vec<i32> = pages
            .iter()
            .flat_map(|(title, url)| {
                let text = self.normalizer.normalize(title, url);
                self.vocabulary.encode(&text, self.max_length)
            })
            .map(|id| id as i32)
            .collect();

        let input = Tensor::<InferBackend, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([pages.len(), self.max_length]);

        let probs: Vec<f32> = self
            .model
            .predict(input)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Reading prediction tensor: {e:?}"))?;

        Ok(probs
            .chunks(self.labels.num_classes())
            .map(<[f32]>::to_vec)
            .collect())
    }
}

impl CategoryPredictor for Inferencer {
    fn predict(&self, title: &str, url: &str) -> Result<Prediction> {
        let probs = self
            .probabilities(&[(title, url)])?
            .pop()
            .context("Model returned no prediction")?;

        let (index, confidence) = probs
            .iter()
            .copied()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |best, (i, p)| if p > best.1 { (i, p) } else { best });

        let category = self
            .labels
            .label_of(index)
            .context("Predicted index outside the category list")?
            .to_string();

        tracing::debug!("'{}' '{}' → {} ({:.4})", title, url, category, confidence);
        Ok(Prediction { category, confidence })
    }
}
