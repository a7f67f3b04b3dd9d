// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// one goal each: train a classifier, or classify a page.
//
// Rules for this layer:
//   - No ML math or model code here
//   - No printing here (that's Layer 1); logging is fine
//   - No direct file access (that's Layer 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training workflow
pub mod train_use_case;

// Single-page classification with keyword fallback
pub mod classify_use_case;
