// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs and traits that define the core concepts
// of the system: categories, curated sites, training examples
// and the prediction abstraction.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits

// The fixed category taxonomy with its keyword lists
pub mod category;

// Curated site seeds and the examples derived from them
pub mod example;

// Rule-based fallback classifier over taxonomy keywords
pub mod keyword_rules;

// Core abstractions (traits) that other layers implement
pub mod traits;
