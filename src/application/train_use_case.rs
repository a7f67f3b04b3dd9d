// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Expand curated sites into examples (Layer 4 - data)
//   Step 2: Normalize text, fit vocabulary     (Layer 4 - data)
//   Step 3: Encode labels from the taxonomy    (Layer 4 - data)
//   Step 4: Encode every example               (Layer 4 - data)
//   Step 5: Split train / held-out             (Layer 4 - data)
//   Step 6: Build the model config             (Layer 5 - ml)
//   Step 7: Run the training loop              (Layer 5 - ml)
//   Step 8: Persist artifacts                  (Layer 6 - infra)
//   Step 9: Render training curves             (Layer 6 - infra)
//
// Pipeline stages, logged as they are entered:
//
//   Uninitialized → DataPrepared → Compiled → Training(epoch=k)
//     → {EarlyStopped | Exhausted} → Evaluated → Persisted
//
// Training(epoch=k) is entered once per epoch, k = 1, 2, ...
//
// Any failure aborts the run; there is no partial recovery.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::{encode_examples, CategoryDataset},
    label_encoder::LabelEncoder,
    normalizer::{CharRule, Normalizer},
    splitter::{split_train_test, SplitStrategy},
    synthesizer::ExampleSynthesizer,
    seeds::SeedCatalog,
    vocabulary::Vocabulary,
};
use crate::domain::{category::Taxonomy, traits::SeedSource};
use crate::infra::{artifacts::ArtifactStore, plot::render_history, vocab_store::VocabularyStore};
use crate::ml::{
    inferencer::Inferencer,
    model::SiteClassifierConfig,
    trainer::{run_training, StopReason},
};

// ─── Training Configuration ──────────────────────────────────────────────────
// Every knob of a training run. The network's layer widths live
// in SiteClassifierConfig; this struct covers data preparation,
// optimisation and output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub output_dir:              String,
    pub max_vocab_size:          usize,
    pub max_length:              usize,
    pub batch_size:              usize,
    pub epochs:                  usize,
    pub learning_rate:           f64,
    pub min_learning_rate:       f64,
    pub lr_decay_factor:         f64,
    pub lr_patience:             usize,
    pub early_stopping_patience: usize,
    pub test_fraction:           f64,
    pub seed:                    u64,
    pub split:                   SplitStrategy,
    pub char_rule:               CharRule,
    pub render_plot:             bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            output_dir:              "model".to_string(),
            max_vocab_size:          10_000,
            max_length:              100,
            batch_size:              32,
            epochs:                  100,
            learning_rate:           1e-3,
            min_learning_rate:       1e-4,
            lr_decay_factor:         0.5,
            lr_patience:             3,
            early_stopping_patience: 5,
            test_fraction:           0.2,
            seed:                    42,
            split:                   SplitStrategy::default(),
            char_rule:               CharRule::default(),
            render_plot:             true,
        }
    }
}

impl TrainConfig {
    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            anyhow::bail!("max_length must be at least 1");
        }
        if self.max_vocab_size == 0 {
            anyhow::bail!("max_vocab_size must be at least 1");
        }
        if self.batch_size == 0 {
            anyhow::bail!("batch_size must be at least 1");
        }
        if self.epochs == 0 {
            anyhow::bail!("epochs must be at least 1");
        }
        if !(self.learning_rate > 0.0) {
            anyhow::bail!("learning_rate must be positive, got {}", self.learning_rate);
        }
        if !(self.lr_decay_factor > 0.0 && self.lr_decay_factor < 1.0) {
            anyhow::bail!("lr_decay_factor must be in (0, 1), got {}", self.lr_decay_factor);
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            anyhow::bail!("test_fraction must be in (0, 1), got {}", self.test_fraction);
        }
        Ok(())
    }
}

// ─── Pipeline Stages ─────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Uninitialized,
    DataPrepared,
    Compiled,
    Training { epoch: usize },
    EarlyStopped,
    Exhausted,
    Evaluated,
    Persisted,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Uninitialized     => "uninitialized",
            PipelineStage::DataPrepared      => "data prepared",
            PipelineStage::Compiled          => "compiled",
            PipelineStage::Training { epoch } => return write!(f, "training (epoch {epoch})"),
            PipelineStage::EarlyStopped      => "early stopped",
            PipelineStage::Exhausted         => "epochs exhausted",
            PipelineStage::Evaluated         => "evaluated",
            PipelineStage::Persisted         => "persisted",
        };
        f.write_str(name)
    }
}

impl From<StopReason> for PipelineStage {
    fn from(stop: StopReason) -> Self {
        match stop {
            StopReason::EarlyStopped { .. } => PipelineStage::EarlyStopped,
            StopReason::Exhausted { .. }    => PipelineStage::Exhausted,
        }
    }
}

fn enter(stage: PipelineStage) {
    tracing::info!("Pipeline stage: {}", stage);
}

// ─── Result of a run ─────────────────────────────────────────────────────────
pub struct TrainReport {
    pub test_loss:     f64,
    pub test_accuracy: f64,
    pub stop:          StopReason,
    /// Sorted category list, identical to categories.json.
    pub categories:    Vec<String>,
    /// The trained model wrapped with its preprocessing.
    pub classifier:    Inferencer,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config:   TrainConfig,
    taxonomy: Taxonomy,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config, taxonomy: Taxonomy::default() }
    }

    /// Execute the full training pipeline end to end.
    pub fn execute(&self) -> Result<TrainReport> {
        let cfg = &self.config;
        cfg.validate()?;
        enter(PipelineStage::Uninitialized);

        // ── Step 1: Curated sites → training examples ────────────────────────
        let seeds    = SeedCatalog.seeds();
        let examples = ExampleSynthesizer::new(&self.taxonomy)
            .synthesize(&seeds)
            .context("Invalid seed list")?;
        tracing::info!(
            "Synthesized {} examples from {} sites across {} categories",
            examples.len(), seeds.len(), self.taxonomy.len(),
        );

        // ── Step 2: Normalize and fit the vocabulary ─────────────────────────
        let normalizer = Normalizer::new(cfg.char_rule);
        let texts: Vec<String> = examples
            .iter()
            .map(|ex| normalizer.normalize(&ex.title, &ex.url))
            .collect();
        let vocabulary = Vocabulary::fit(&texts, cfg.max_vocab_size);
        if vocabulary.is_empty() {
            anyhow::bail!("Normalized seed texts contain no tokens");
        }
        tracing::info!("Vocabulary holds {} tokens", vocabulary.len());

        // ── Step 3: Labels ───────────────────────────────────────────────────
        let labels = LabelEncoder::from_taxonomy(&self.taxonomy);

        // ── Step 4: Encode ───────────────────────────────────────────────────
        let samples = encode_examples(&examples, &normalizer, &vocabulary, &labels, cfg.max_length)
            .context("Examples do not match the category list")?;

        // ── Step 5: Train / held-out split ───────────────────────────────────
        let (train, test) = split_train_test(
            samples,
            cfg.test_fraction,
            cfg.seed,
            cfg.split,
            |s| s.label,
        );
        tracing::info!("Split ({:?}): {} train, {} held out", cfg.split, train.len(), test.len());
        enter(PipelineStage::DataPrepared);

        // ── Step 6: Model config ─────────────────────────────────────────────
        let store = ArtifactStore::new(&cfg.output_dir);
        store.ensure_dir()?;

        let model_cfg = SiteClassifierConfig::new(vocabulary.input_dim(), labels.num_classes())
            .with_max_length(cfg.max_length)
            .with_unicode_tokens(cfg.char_rule == CharRule::Unicode);
        enter(PipelineStage::Compiled);

        // ── Step 7: Training loop (Layer 5) ──────────────────────────────────
        let outcome = run_training(
            cfg,
            &model_cfg,
            CategoryDataset::new(train),
            CategoryDataset::new(test),
            |epoch| enter(PipelineStage::Training { epoch }),
        )?;
        enter(outcome.stop.into());
        if let Some(best) = outcome.history.best_epoch() {
            tracing::info!(
                "Best epoch {}: val_loss={:.4}, val_acc={:.4}",
                best.epoch, best.val_loss, best.val_accuracy,
            );
        }
        if let Some(lr) = outcome.history.learning_rates().last() {
            tracing::info!("Final learning rate {:.6}", lr);
        }
        enter(PipelineStage::Evaluated);
        tracing::info!(
            "Test loss {:.4}, test accuracy {:.4}",
            outcome.test_loss, outcome.test_accuracy,
        );

        // ── Step 8: Persist artifacts ────────────────────────────────────────
        VocabularyStore::new(&cfg.output_dir).save(&vocabulary)?;
        store.save_model(&outcome.model, &model_cfg)?;
        store.save_categories(labels.labels())?;
        enter(PipelineStage::Persisted);

        // ── Step 9: Training curves ──────────────────────────────────────────
        if cfg.render_plot {
            render_history(&outcome.history, &store.plot_path())
                .context("Failed to render training history")?;
        }

        Ok(TrainReport {
            test_loss:     outcome.test_loss,
            test_accuracy: outcome.test_accuracy,
            stop:          outcome.stop,
            categories:    labels.labels().to_vec(),
            classifier:    Inferencer::new(outcome.model, &model_cfg, vocabulary, labels),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::artifacts::CATEGORIES_FILE;
    use crate::infra::vocab_store::VOCABULARY_FILE;

    fn quick_config(dir: &std::path::Path) -> TrainConfig {
        TrainConfig {
            output_dir:  dir.to_string_lossy().into_owned(),
            max_length:  12,
            epochs:      2,
            render_plot: false,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(TrainConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            TrainConfig { max_length: 0, ..TrainConfig::default() },
            TrainConfig { batch_size: 0, ..TrainConfig::default() },
            TrainConfig { test_fraction: 0.0, ..TrainConfig::default() },
            TrainConfig { test_fraction: 1.0, ..TrainConfig::default() },
            TrainConfig { learning_rate: f64::NAN, ..TrainConfig::default() },
        ];
        for cfg in bad {
            assert!(cfg.validate().is_err(), "{cfg:?}");
        }
    }

    #[test]
    fn test_stage_from_stop_reason() {
        let early = StopReason::EarlyStopped { epoch: 9, best_epoch: 4 };
        assert_eq!(PipelineStage::from(early), PipelineStage::EarlyStopped);
        assert_eq!(
            PipelineStage::from(StopReason::Exhausted { epochs: 3 }),
            PipelineStage::Exhausted
        );
    }

    #[test]
    fn test_training_stage_carries_epoch() {
        assert_eq!(PipelineStage::Training { epoch: 3 }.to_string(), "training (epoch 3)");
        assert_ne!(PipelineStage::Training { epoch: 1 }, PipelineStage::Training { epoch: 2 });
    }

    #[test]
    fn test_short_run_writes_reloadable_artifacts() {
        let tmp    = tempfile::tempdir().unwrap();
        let report = TrainUseCase::new(quick_config(tmp.path())).execute().unwrap();
        let store  = ArtifactStore::new(tmp.path());

        assert!(store.model_path().is_file());
        assert!(store.config_path().is_file());
        assert!(tmp.path().join(VOCABULARY_FILE).is_file());
        assert!(!store.plot_path().exists());

        // sorted labels, persisted byte for byte
        let sorted = Taxonomy::default().sorted_labels();
        assert_eq!(report.categories, sorted);
        let bytes = std::fs::read(tmp.path().join(CATEGORIES_FILE)).unwrap();
        assert_eq!(bytes, serde_json::to_vec(&sorted).unwrap());

        assert!(report.stop.epochs_run() <= 2);
        assert!((0.0..=1.0).contains(&report.test_accuracy));

        // reloaded model agrees with the in-memory one
        let reloaded = Inferencer::from_artifacts(&tmp.path().to_string_lossy()).unwrap();
        let pages = [
            ("YouTube", "https://www.youtube.com"),
            ("Amazon.com", "https://www.amazon.com"),
            ("Unseen page", "https://example.org/path"),
        ];
        let a = report.classifier.probabilities(&pages).unwrap();
        let b = reloaded.probabilities(&pages).unwrap();
        for (row_a, row_b) in a.iter().zip(&b) {
            for (x, y) in row_a.iter().zip(row_b) {
                assert!((x - y).abs() < 1e-5, "{x} vs {y}");
            }
        }
    }

    #[test]
    #[ignore = "full-length training run, several minutes on CPU"]
    fn test_full_run_beats_chance() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = TrainConfig {
            output_dir: tmp.path().to_string_lossy().into_owned(),
            ..TrainConfig::default()
        };
        let report = TrainUseCase::new(cfg).execute().unwrap();
        assert!(report.test_accuracy > 0.5, "accuracy {}", report.test_accuracy);
        assert!(tmp.path().join("training_history.png").is_file());
    }
}
