// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Train + validation loop using Burn's DataLoader and Adam,
// with early stopping and learning-rate decay on val_loss.
//
//   - Training uses TrainBackend (Autodiff<NdArray>) for gradients
//   - model.valid() returns the model on InferBackend (NdArray),
//     which also switches dropout off
//   - Validation batcher must therefore use InferBackend
//   - The learning rate is passed to optim.step every batch,
//     so the scheduler just changes the number we pass
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use std::sync::Arc;

use anyhow::Result;
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{
    batcher::{CategoryBatch, CategoryBatcher},
    dataset::CategoryDataset,
};
use crate::infra::metrics::{EpochMetrics, TrainingHistory};
use crate::ml::callbacks::{EarlyStopping, PlateauScheduler, Verdict};
use crate::ml::model::{categorical_cross_entropy, count_correct, SiteClassifier, SiteClassifierConfig};
use crate::ml::{InferBackend, TrainBackend};

/// Why the epoch loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Early stopping fired; weights were restored from `best_epoch`.
    EarlyStopped { epoch: usize, best_epoch: usize },
    /// Every configured epoch ran.
    Exhausted { epochs: usize },
}

impl StopReason {
    pub fn epochs_run(&self) -> usize {
        match *self {
            StopReason::EarlyStopped { epoch, .. } => epoch,
            StopReason::Exhausted { epochs } => epochs,
        }
    }
}

/// Everything a finished run hands back to the use case.
pub struct TrainingOutcome {
    /// Final weights (best epoch if early stopping fired), dropout off.
    pub model:         SiteClassifier<InferBackend>,
    pub history:       TrainingHistory,
    pub stop:          StopReason,
    pub test_loss:     f64,
    pub test_accuracy: f64,
}

/// Running totals for one pass over a loader.
#[derive(Default)]
struct PassStats {
    loss_sum: f64,
    examples: usize,
    correct:  usize,
}

impl PassStats {
    fn record(&mut self, batch_loss: f64, batch_size: usize, correct: usize) {
        // weight by batch size so a short final batch counts less
        self.loss_sum += batch_loss * batch_size as f64;
        self.examples += batch_size;
        self.correct  += correct;
    }

    fn avg_loss(&self) -> f64 {
        if self.examples == 0 { f64::NAN } else { self.loss_sum / self.examples as f64 }
    }

    fn accuracy(&self) -> f64 {
        if self.examples == 0 { 0.0 } else { self.correct as f64 / self.examples as f64 }
    }
}

/// Train until early stopping fires or the epochs run out.
/// `on_epoch` is called with the 1-based epoch number before each epoch.
pub fn run_training(
    cfg:           &TrainConfig,
    model_cfg:     &SiteClassifierConfig,
    train_dataset: CategoryDataset,
    test_dataset:  CategoryDataset,
    mut on_epoch:  impl FnMut(usize),
) -> Result<TrainingOutcome> {
    if train_dataset.sample_count() == 0 {
        anyhow::bail!("Training split is empty; check the seed list and test fraction");
    }
    if test_dataset.sample_count() == 0 {
        anyhow::bail!("Held-out split is empty; early stopping needs validation data");
    }

    let device = <TrainBackend as Backend>::Device::default();
    tracing::info!("Using NdArray device: {:?}", device);

    // Weight init and dropout masks both draw from the backend RNG
    TrainBackend::seed(cfg.seed);

    // ── Build model ───────────────────────────────────────────────────────────
    let mut model: SiteClassifier<TrainBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: vocab={}, classes={}, embedding={}",
        model_cfg.vocab_size, model_cfg.num_classes, model_cfg.embedding_dim,
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    let mut optim = AdamConfig::new().with_epsilon(1e-7).init();

    // ── Data loaders ──────────────────────────────────────────────────────────
    let train_batcher = CategoryBatcher::<TrainBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    let test_batcher = CategoryBatcher::<InferBackend>::new(device.clone());
    let test_loader  = DataLoaderBuilder::new(test_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(test_dataset);

    // ── Training controls ─────────────────────────────────────────────────────
    let mut stopper   = EarlyStopping::new(cfg.early_stopping_patience);
    let mut scheduler = PlateauScheduler::new(
        cfg.learning_rate,
        cfg.lr_decay_factor,
        cfg.lr_patience,
        cfg.min_learning_rate,
    );
    let mut best_model: Option<SiteClassifier<TrainBackend>> = None;
    let mut history = TrainingHistory::new();
    let mut stop    = StopReason::Exhausted { epochs: cfg.epochs };

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        on_epoch(epoch);
        let lr = scheduler.lr();

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_stats = PassStats::default();
        for batch in train_loader.iter() {
            let batch_size = batch.targets.dims()[0];
            let (loss, logits) = model.forward_loss(batch.input_ids, batch.targets.clone());

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            let correct = count_correct(logits, batch.targets);
            train_stats.record(loss_val, batch_size, correct);

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(lr, model, grads);
        }

        // ── Validation phase ──────────────────────────────────────────────────
        let val_stats = evaluate(&model.valid(), &test_loader);

        let metrics = EpochMetrics {
            epoch,
            loss:          train_stats.avg_loss(),
            accuracy:      train_stats.accuracy(),
            val_loss:      val_stats.avg_loss(),
            val_accuracy:  val_stats.accuracy(),
            learning_rate: lr,
        };

        println!(
            "Epoch {:>3}/{} | loss={:.4} | acc={:.1}% | val_loss={:.4} | val_acc={:.1}% | lr={:.6}",
            epoch, cfg.epochs, metrics.loss, metrics.accuracy * 100.0,
            metrics.val_loss, metrics.val_accuracy * 100.0, lr,
        );

        let val_loss = metrics.val_loss;
        history.record(metrics);

        // ── Callbacks: early stopping first, then LR decay ────────────────────
        let verdict = stopper.observe(epoch, val_loss);
        scheduler.observe(val_loss);

        match verdict {
            Verdict::Improved => best_model = Some(model.clone()),
            Verdict::Waiting  => {}
            Verdict::Stop     => {
                let best_epoch = stopper.best_epoch().unwrap_or(epoch);
                tracing::info!(
                    "Early stopping at epoch {} (best epoch {}, val_loss={:.4})",
                    epoch, best_epoch, stopper.best_loss(),
                );
                if let Some(best) = best_model.take() {
                    model = best;
                }
                stop = StopReason::EarlyStopped { epoch, best_epoch };
                break;
            }
        }
    }

    // ── Final evaluation on the held-out split ────────────────────────────────
    let final_model = model.valid();
    let test_stats  = evaluate(&final_model, &test_loader);
    tracing::info!(
        "Training finished after {} epochs: test_loss={:.4}, test_acc={:.4}",
        stop.epochs_run(), test_stats.avg_loss(), test_stats.accuracy(),
    );

    Ok(TrainingOutcome {
        model:         final_model,
        history,
        stop,
        test_loss:     test_stats.avg_loss(),
        test_accuracy: test_stats.accuracy(),
    })
}

fn evaluate(
    model:  &SiteClassifier<InferBackend>,
    loader: &Arc<dyn DataLoader<CategoryBatch<InferBackend>>>,
) -> PassStats {
    let mut stats = PassStats::default();

    for batch in loader.iter() {
        let batch_size = batch.targets.dims()[0];
        let logits = model.forward(batch.input_ids);
        let loss: f64 = categorical_cross_entropy(logits.clone(), batch.targets.clone())
            .into_scalar()
            .elem::<f64>();
        let correct = count_correct(logits, batch.targets);
        stats.record(loss, batch_size, correct);
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::EncodedSample;

    #[test]
    fn test_pass_stats_weighting() {
        let mut s = PassStats::default();
        s.record(1.0, 3, 3);
        s.record(4.0, 1, 0);
        assert!((s.avg_loss() - 1.75).abs() < 1e-12);
        assert!((s.accuracy() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_empty_pass_stats() {
        let s = PassStats::default();
        assert!(s.avg_loss().is_nan());
        assert_eq!(s.accuracy(), 0.0);
    }

    fn tiny_model_config() -> SiteClassifierConfig {
        SiteClassifierConfig::new(10, 2)
            .with_max_length(4)
            .with_embedding_dim(8)
            .with_encoder_hidden(4)
            .with_summary_hidden(4)
            .with_dense_hidden(8)
            .with_dense_out(4)
    }

    fn sample(ids: [u32; 4], label: usize) -> EncodedSample {
        let mut target = vec![0.0; 2];
        target[label] = 1.0;
        EncodedSample { input_ids: ids.to_vec(), target, label }
    }

    /// Held-out labels are the swapped training labels, so every
    /// step that fits the training split makes validation loss worse.
    fn contradicting_splits() -> (CategoryDataset, CategoryDataset) {
        let a = [1, 2, 3, 4];
        let b = [5, 6, 7, 8];
        let train = (0..8).flat_map(|_| [sample(a, 0), sample(b, 1)]).collect();
        let test  = vec![sample(a, 1), sample(b, 0)];
        (CategoryDataset::new(train), CategoryDataset::new(test))
    }

    #[test]
    fn test_early_stop_restores_best_weights_and_decays_lr() {
        let cfg = TrainConfig {
            batch_size:              4,
            epochs:                  30,
            learning_rate:           1e-2,
            lr_patience:             1,
            early_stopping_patience: 2,
            ..TrainConfig::default()
        };
        let (train, test) = contradicting_splits();
        let mut started = Vec::new();

        let outcome = run_training(&cfg, &tiny_model_config(), train, test, |e| started.push(e)).unwrap();

        let StopReason::EarlyStopped { epoch, best_epoch } = outcome.stop else {
            panic!("expected early stopping, got {:?}", outcome.stop);
        };
        assert_eq!(started, (1..=epoch).collect::<Vec<_>>());
        assert_eq!(outcome.history.val_loss().len(), epoch);

        // final evaluation runs on the restored best-epoch weights
        let best_val = outcome.history.val_loss()[best_epoch - 1];
        assert!(
            (outcome.test_loss - best_val).abs() < 1e-6,
            "test_loss {} vs best val_loss {}", outcome.test_loss, best_val,
        );

        // the first epoch that misses the plateau threshold halves the
        // rate used by the next one
        let rates = outcome.history.learning_rates();
        let vals  = outcome.history.val_loss();
        let mut best = f64::INFINITY;
        let plateau = vals
            .iter()
            .position(|&v| {
                let improved = v < best - PlateauScheduler::DEFAULT_MIN_DELTA;
                if improved { best = v; }
                !improved
            })
            .unwrap();
        assert!(plateau + 1 < rates.len());
        assert!(rates[..=plateau].iter().all(|&r| r == 1e-2));
        assert_eq!(rates[plateau + 1], 1e-2 * 0.5);
    }

    #[test]
    fn test_stop_reason_epochs_run() {
        assert_eq!(StopReason::EarlyStopped { epoch: 12, best_epoch: 7 }.epochs_run(), 12);
        assert_eq!(StopReason::Exhausted { epochs: 100 }.epochs_run(), 100);
    }
}
