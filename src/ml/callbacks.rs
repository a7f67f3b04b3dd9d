// ============================================================
// Layer 5 — Training Controls
// ============================================================
// Two epoch-level policies, both watching validation loss:
//
//   EarlyStopping     — no improvement for `patience` epochs in a
//                       row → stop and go back to the best weights.
//                       Any strictly lower loss is an improvement.
//
//   PlateauScheduler  — no improvement for `patience` epochs in a
//                       row → lr = max(lr * factor, min_lr).
//                       Improvement must beat the best loss by more
//                       than `min_delta` (1e-4). The counter resets
//                       only when the rate was actually lowered.
//
// Both are plain state machines; the trainer owns the weights.

/// Outcome of one early-stopping observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// New best loss: keep a copy of the current weights.
    Improved,
    /// No improvement yet, but patience is not exhausted.
    Waiting,
    /// Patience exhausted: stop training.
    Stop,
}

#[derive(Debug, Clone)]
pub struct EarlyStopping {
    patience:   usize,
    best:       f64,
    best_epoch: Option<usize>,
    wait:       usize,
}

impl EarlyStopping {
    pub fn new(patience: usize) -> Self {
        Self { patience, best: f64::INFINITY, best_epoch: None, wait: 0 }
    }

    pub fn observe(&mut self, epoch: usize, val_loss: f64) -> Verdict {
        if val_loss < self.best {
            self.best       = val_loss;
            self.best_epoch = Some(epoch);
            self.wait       = 0;
            return Verdict::Improved;
        }
        self.wait += 1;
        if self.wait >= self.patience { Verdict::Stop } else { Verdict::Waiting }
    }

    pub fn best_loss(&self) -> f64 {
        self.best
    }

    pub fn best_epoch(&self) -> Option<usize> {
        self.best_epoch
    }
}

#[derive(Debug, Clone)]
pub struct PlateauScheduler {
    lr:        f64,
    factor:    f64,
    patience:  usize,
    min_lr:    f64,
    min_delta: f64,
    best:      f64,
    wait:      usize,
}

impl PlateauScheduler {
    pub const DEFAULT_MIN_DELTA: f64 = 1e-4;

    pub fn new(initial_lr: f64, factor: f64, patience: usize, min_lr: f64) -> Self {
        Self {
            lr: initial_lr,
            factor,
            patience,
            min_lr,
            min_delta: Self::DEFAULT_MIN_DELTA,
            best: f64::INFINITY,
            wait: 0,
        }
    }

    /// Current learning rate.
    pub fn lr(&self) -> f64 {
        self.lr
    }

    /// Record an epoch's validation loss; returns the rate for the next epoch.
    pub fn observe(&mut self, val_loss: f64) -> f64 {
        if val_loss < self.best - self.min_delta {
            self.best = val_loss;
            self.wait = 0;
            return self.lr;
        }

        self.wait += 1;
        if self.wait >= self.patience && self.lr > self.min_lr {
            let reduced = (self.lr * self.factor).max(self.min_lr);
            tracing::info!("Reducing learning rate {:.6} → {:.6}", self.lr, reduced);
            self.lr   = reduced;
            self.wait = 0;
        }
        self.lr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_early_stopping_after_patience() {
        let mut es = EarlyStopping::new(2);
        assert_eq!(es.observe(1, 1.0), Verdict::Improved);
        assert_eq!(es.observe(2, 1.0), Verdict::Waiting);
        assert_eq!(es.observe(3, 1.5), Verdict::Stop);
        assert_eq!(es.best_epoch(), Some(1));
        assert_eq!(es.best_loss(), 1.0);
    }

    #[test]
    fn test_early_stopping_resets_on_improvement() {
        let mut es = EarlyStopping::new(2);
        es.observe(1, 1.0);
        assert_eq!(es.observe(2, 1.1), Verdict::Waiting);
        assert_eq!(es.observe(3, 0.9), Verdict::Improved);
        assert_eq!(es.observe(4, 0.95), Verdict::Waiting);
        assert_eq!(es.best_epoch(), Some(3));
    }

    #[test]
    fn test_nan_loss_never_improves() {
        let mut es = EarlyStopping::new(1);
        assert_eq!(es.observe(1, f64::NAN), Verdict::Stop);
        assert_eq!(es.best_epoch(), None);
    }

    #[test]
    fn test_plateau_halves_after_patience() {
        let mut s = PlateauScheduler::new(0.001, 0.5, 3, 0.0001);
        assert_eq!(s.observe(1.0), 0.001);
        assert_eq!(s.observe(1.0), 0.001);
        assert_eq!(s.observe(1.0), 0.001);
        assert_eq!(s.observe(1.0), 0.0005);
        // counter restarted after the reduction
        assert_eq!(s.observe(1.0), 0.0005);
    }

    #[test]
    fn test_plateau_ignores_tiny_improvements() {
        let mut s = PlateauScheduler::new(0.001, 0.5, 2, 0.0001);
        s.observe(1.0);
        s.observe(0.99995);
        assert_eq!(s.observe(0.99991), 0.0005);
    }

    #[test]
    fn test_plateau_respects_floor() {
        let mut s = PlateauScheduler::new(0.001, 0.5, 1, 0.0001);
        s.observe(1.0);
        let mut lr = s.lr();
        for _ in 0..10 {
            lr = s.observe(2.0);
        }
        assert_eq!(lr, 0.0001);
    }
}
