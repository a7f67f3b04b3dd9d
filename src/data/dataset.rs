use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{label_encoder::LabelEncoder, normalizer::Normalizer, vocabulary::Vocabulary};
use crate::domain::example::TrainingExample;

/// One encoded, padded training sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedSample {
    pub input_ids: Vec<u32>,
    /// One-hot label vector.
    pub target:    Vec<f32>,
    /// Class index of `target`, kept for stratified splitting.
    pub label:     usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("example '{title}' has category '{category}' which the label encoder does not know")]
    UnknownCategory { title: String, category: String },
}

/// Normalize, encode and one-hot every example.
/// Fails on the first example whose category has no label index.
pub fn encode_examples(
    examples:   &[TrainingExample],
    normalizer: &Normalizer,
    vocabulary: &Vocabulary,
    labels:     &LabelEncoder,
    max_length: usize,
) -> Result<Vec<EncodedSample>, EncodeError> {
    examples
        .iter()
        .map(|ex| {
            let unknown = || EncodeError::UnknownCategory {
                title:    ex.title.clone(),
                category: ex.category.clone(),
            };
            let label  = labels.index_of(&ex.category).ok_or_else(unknown)?;
            let target = labels.to_one_hot(&ex.category).ok_or_else(unknown)?;
            let text   = normalizer.normalize(&ex.title, &ex.url);
            Ok(EncodedSample {
                input_ids: vocabulary.encode(&text, max_length),
                target,
                label,
            })
        })
        .collect()
}

pub struct CategoryDataset {
    samples: Vec<EncodedSample>,
}

impl CategoryDataset {
    pub fn new(samples: Vec<EncodedSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<EncodedSample> for CategoryDataset {
    fn get(&self, index: usize) -> Option<EncodedSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
