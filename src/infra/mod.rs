// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the artifact directory, plus the
// in-memory training history it is rendered from:
//
//   artifacts.rs   — model weights + architecture config and
//                    the sorted category list
//
//   vocab_store.rs — tokenizer.json, the word → id mapping
//                    the model was trained with
//
//   metrics.rs     — per-epoch loss / accuracy / lr history
//
//   plot.rs        — training_history.png (accuracy and loss
//                    curves, train vs validation)
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Records)

/// Model, config and category persistence
pub mod artifacts;

/// Vocabulary persistence
pub mod vocab_store;

/// Per-epoch training history
pub mod metrics;

/// Training curve rendering
pub mod plot;
