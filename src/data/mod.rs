// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the curated site list and tensor batches.
//
//   SeedCatalog         → curated (title, url, category) sites
//       │
//       ▼
//   ExampleSynthesizer  → 4 title variants per site
//       │
//       ▼
//   Normalizer          → "title url" → clean lowercase words
//       │
//       ▼
//   Vocabulary          → words → ids, fixed-length sequences
//   LabelEncoder        → category → one-hot vector
//       │
//       ▼
//   split_train_test    → seeded 80/20 split
//       │
//       ▼
//   CategoryDataset     → Burn Dataset
//       │
//       ▼
//   CategoryBatcher     → [batch, seq] ids + [batch, classes] targets
//
// Each module is responsible for exactly one step.

/// Built-in list of curated websites
pub mod seeds;

/// Expands each site into title variants
pub mod synthesizer;

/// Joins and cleans title + url text
pub mod normalizer;

/// Word vocabulary and fixed-length sequence encoding
pub mod vocabulary;

/// Category ↔ index ↔ one-hot mapping
pub mod label_encoder;

/// Encoded samples and Burn's Dataset implementation
pub mod dataset;

/// Burn Batcher producing tensor batches
pub mod batcher;

/// Seeded train/test split, optionally stratified
pub mod splitter;
