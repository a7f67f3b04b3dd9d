// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn model, training and inference
// code. The data layer only touches Burn for its Dataset and
// Batcher traits.
//
// What's in this layer:
//
//   model.rs      — The BiLSTM site classifier
//                   • Token embedding
//                   • Two stacked bidirectional LSTMs
//                   • Dense + ReLU + dropout head
//                   • Softmax over categories
//
//   callbacks.rs  — Early stopping and plateau LR decay
//
//   trainer.rs    — The training loop
//                   forward pass, categorical cross-entropy,
//                   backward pass, Adam step, validation,
//                   callbacks, final test evaluation
//
//   inferencer.rs — Rebuilds the classifier from artifacts
//                   and predicts categories for (title, url)
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)
//            Hochreiter & Schmidhuber (1997) LSTM

use burn::backend::{Autodiff, NdArray};

/// CPU backend for inference and evaluation.
pub type InferBackend = NdArray<f32>;

/// Autodiff wrapper used while training.
pub type TrainBackend = Autodiff<InferBackend>;

/// BiLSTM classifier architecture
pub mod model;

/// Early stopping and learning-rate decay
pub mod callbacks;

/// Full training loop with validation and test evaluation
pub mod trainer;

/// Inference engine — loads artifacts and predicts categories
pub mod inferencer;
