// Word synthesis for the Glyphloom constructed script.
//
// Provides everything the corpus pipeline needs to produce candidate
// words: phoneme tables, synthetic word builders, the grammar-engine
// capability trait with a built-in root-lexicon implementation, and the
// mode-weighted `WordSynthesizer`.
//
// Architecture:
// - `tables.rs`: phoneme inventories and grammar constraint tables
// - `types.rs`: constraint types (`WordConstraints`, `Case`, ...) and the
//   `Candidate`/`SynthMode` pair
// - `engine.rs`: `WordEngine` trait, `InvalidCombination`, `RootLexicon`
//   (embedded JSON lexicon, loaded via `default_roots()`)
// - `synth.rs`: phonotactic/tiny/letter-salad builders
// - `synthesizer.rs`: weighted mode selection, acceptance biases, bounded
//   retries with a constant fallback
//
// Determinism constraint: this crate feeds the corpus pipeline and must
// not introduce any non-deterministic behavior. All randomness goes
// through `glyphloom_prng::StreamRng`, threaded as `&mut` from the caller.

pub mod engine;
pub mod synth;
pub mod synthesizer;
pub mod tables;
pub mod types;

// Re-export key types at crate root for convenience.
pub use engine::{InvalidCombination, RootLexicon, WordEngine, default_roots};
pub use synthesizer::{FALLBACK_WORD, SynthProfile, WordSynthesizer};
pub use types::{AffixSlot, Candidate, Case, FormativeType, Specification, SynthMode, WordConstraints};
