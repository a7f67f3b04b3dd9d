// ============================================================
// Layer 6 — Training History
// ============================================================
// Per-epoch metrics collected by the trainer.
//
// The history lives only for the duration of a run: it is
// logged as it grows, rendered once to training_history.png,
// and then dropped. It is never written out as data.
//
// Metrics recorded per epoch:
//   - loss / accuracy          : training batches (dropout on)
//   - val_loss / val_accuracy  : held-out split (dropout off)
//   - learning_rate            : rate used during the epoch
//
// How to read the metrics:
//   - If val_loss increases while loss decreases → overfitting
//   - Flat val_loss for a few epochs → the scheduler lowers
//     the learning rate, and eventually early stopping fires

use serde::{Deserialize, Serialize};

/// One row of metrics for a single training epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Mean categorical cross-entropy over training samples
    pub loss: f64,

    /// Fraction of training samples classified correctly
    pub accuracy: f64,

    /// Mean categorical cross-entropy on the held-out split
    pub val_loss: f64,

    /// Fraction of held-out samples classified correctly
    pub val_accuracy: f64,

    /// Learning rate in effect during this epoch
    pub learning_rate: f64,
}

impl EpochMetrics {
    /// Returns true if this epoch improved over the previous best val_loss
    pub fn is_improvement(&self, best_val_loss: f64) -> bool {
        self.val_loss < best_val_loss
    }
}

/// Ordered per-epoch records of one training run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    epochs: Vec<EpochMetrics>,
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, m: EpochMetrics) {
        tracing::debug!(
            "Recorded epoch {}: loss={:.4}, val_loss={:.4}",
            m.epoch,
            m.loss,
            m.val_loss,
        );
        self.epochs.push(m);
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    pub fn loss(&self) -> Vec<f64> {
        self.epochs.iter().map(|m| m.loss).collect()
    }

    pub fn val_loss(&self) -> Vec<f64> {
        self.epochs.iter().map(|m| m.val_loss).collect()
    }

    pub fn accuracy(&self) -> Vec<f64> {
        self.epochs.iter().map(|m| m.accuracy).collect()
    }

    pub fn val_accuracy(&self) -> Vec<f64> {
        self.epochs.iter().map(|m| m.val_accuracy).collect()
    }

    pub fn learning_rates(&self) -> Vec<f64> {
        self.epochs.iter().map(|m| m.learning_rate).collect()
    }

    /// Epoch with the lowest validation loss.
    pub fn best_epoch(&self) -> Option<&EpochMetrics> {
        let mut best: Option<&EpochMetrics> = None;
        for m in &self.epochs {
            if best.map_or(true, |b| m.is_improvement(b.val_loss)) {
                best = Some(m);
            }
        }
        best
    }
}
