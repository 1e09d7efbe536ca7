// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs and traits that define the core concepts
// of the system.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - NO ML-specific code
//   - Only plain Rust structs, enums, and traits

// A raw review record from the corpus
pub mod review;

// A training window plus the sentence boundary marker
pub mod window;

// Core abstractions (traits) that other layers implement
pub mod traits;
