// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Saves and restores the trained model and the category list.
//
// What gets written to the output directory:
//   1. model.mpk.gz        — all learned parameters
//   2. model_config.json   — architecture + input contract
//   3. categories.json     — sorted category labels
//
// Why save the config separately?
//   Burn records only hold parameters. To load them we first
//   rebuild the exact same architecture (vocab size, number of
//   classes, layer widths) from the config, then pour the
//   record into it. The two files are always written together.
//
// Burn's DefaultFileRecorder with FullPrecisionSettings:
//   - Named MessagePack, gzip-compressed
//   - f32 weights kept as f32, so a reloaded model reproduces
//     the in-memory predictions
//   - Type-safe: loading fails if the architecture differs
//
// Every write is a plain create-write-close. There is no
// temp-file-and-rename step, so a failure mid-write leaves a
// truncated file behind and the run aborts.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{DefaultFileRecorder, FullPrecisionSettings},
};

use crate::ml::model::{SiteClassifier, SiteClassifierConfig};

pub const MODEL_FILE:        &str = "model";
pub const MODEL_CONFIG_FILE: &str = "model_config.json";
pub const CATEGORIES_FILE:   &str = "categories.json";
pub const HISTORY_PLOT_FILE: &str = "training_history.png";

/// Owns the layout of the artifact directory.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Point the store at a directory. Nothing is created until
    /// `ensure_dir` is called.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the directory (and parents) if absent. Idempotent.
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create output directory '{}'", self.dir.display()))
    }

    /// Path of the weights file, including the recorder's extension.
    pub fn model_path(&self) -> PathBuf {
        self.dir.join(format!("{MODEL_FILE}.mpk.gz"))
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(MODEL_CONFIG_FILE)
    }

    pub fn categories_path(&self) -> PathBuf {
        self.dir.join(CATEGORIES_FILE)
    }

    pub fn plot_path(&self) -> PathBuf {
        self.dir.join(HISTORY_PLOT_FILE)
    }

    /// Save weights and the architecture config they belong to.
    pub fn save_model<B: Backend>(
        &self,
        model:  &SiteClassifier<B>,
        config: &SiteClassifierConfig,
    ) -> Result<()> {
        let config_path = self.config_path();
        config
            .save(&config_path)
            .with_context(|| format!("Cannot write model config to '{}'", config_path.display()))?;

        // The recorder appends ".mpk.gz" itself
        let path = self.dir.join(MODEL_FILE);
        model
            .clone()
            .save_file(path.clone(), &DefaultFileRecorder::<FullPrecisionSettings>::new())
            .with_context(|| format!("Failed to save model to '{}'", path.display()))?;

        tracing::debug!("Saved model to '{}'", self.model_path().display());
        Ok(())
    }

    /// Rebuild the architecture from its config and load the weights into it.
    pub fn load_model<B: Backend>(
        &self,
        device: &B::Device,
    ) -> Result<(SiteClassifier<B>, SiteClassifierConfig)> {
        let config_path = self.config_path();
        let config = SiteClassifierConfig::load(&config_path).map_err(|e| {
            anyhow::anyhow!(
                "Cannot read model config from '{}': {e}. Have you run 'train' first?",
                config_path.display()
            )
        })?;

        let path  = self.dir.join(MODEL_FILE);
        let model = config
            .init::<B>(device)
            .load_file(path.clone(), &DefaultFileRecorder::<FullPrecisionSettings>::new(), device)
            .with_context(|| {
                format!("Cannot load model '{}'. Have you run 'train' first?", path.display())
            })?;

        Ok((model, config))
    }

    /// Write the category list exactly as given; position = class index.
    pub fn save_categories(&self, labels: &[String]) -> Result<()> {
        let path = self.categories_path();
        let json = serde_json::to_string(labels)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write categories to '{}'", path.display()))?;

        tracing::debug!("Saved {} categories to '{}'", labels.len(), path.display());
        Ok(())
    }

    pub fn load_categories(&self) -> Result<Vec<String>> {
        let path = self.categories_path();
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read categories from '{}'", path.display()))?;
        let labels: Vec<String> = serde_json::from_str(&json)
            .with_context(|| format!("Malformed categories file '{}'", path.display()))?;
        if labels.is_empty() {
            anyhow::bail!("Category list in '{}' is empty", path.display());
        }
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::InferBackend;

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let tmp   = tempfile::tempdir().unwrap();
        let dir   = tmp.path().join("a/b/model");
        let store = ArtifactStore::new(&dir);
        store.ensure_dir().unwrap();
        store.ensure_dir().unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_categories_file_is_byte_identical() {
        let tmp    = tempfile::tempdir().unwrap();
        let store  = ArtifactStore::new(tmp.path());
        let labels = vec!["development".to_string(), "news".to_string(), "学习".to_string()];

        store.save_categories(&labels).unwrap();
        let bytes = fs::read(store.categories_path()).unwrap();
        assert_eq!(bytes, serde_json::to_vec(&labels).unwrap());
        assert_eq!(store.load_categories().unwrap(), labels);
    }

    #[test]
    fn test_model_round_trip() {
        let tmp    = tempfile::tempdir().unwrap();
        let store  = ArtifactStore::new(tmp.path());
        let device = Default::default();
        let config = SiteClassifierConfig::new(12, 3)
            .with_max_length(5)
            .with_embedding_dim(4)
            .with_encoder_hidden(3)
            .with_summary_hidden(2)
            .with_dense_hidden(4)
            .with_dense_out(3);
        let model: SiteClassifier<InferBackend> = config.init(&device);
        store.save_model(&model, &config).unwrap();
        assert!(store.model_path().is_file());

        let (loaded, loaded_cfg) = store.load_model::<InferBackend>(&device).unwrap();
        assert_eq!(loaded_cfg.vocab_size, 12);
        assert_eq!(loaded_cfg.max_length, 5);

        let ids = Tensor::<InferBackend, 1, Int>::from_ints([0, 1, 2, 3, 4, 5, 6, 7, 8, 9].as_slice(), &device)
            .reshape([2, 5]);
        let a: Vec<f32> = model.predict(ids.clone()).into_data().to_vec().unwrap();
        let b: Vec<f32> = loaded.predict(ids).into_data().to_vec().unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_missing_artifacts_are_errors() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(tmp.path());
        assert!(store.load_categories().is_err());
        assert!(store.load_model::<InferBackend>(&Default::default()).is_err());
    }
}
