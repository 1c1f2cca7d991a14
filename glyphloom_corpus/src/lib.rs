// Deterministic glyph corpus generation and curation.
//
// The pipeline, leaf to root: a seeded stream (`glyphloom_prng`) feeds
// word synthesis (`glyphloom_lang`) and phrase assembly; the render
// adapter drives a script engine (`glyphloom_script`); geometry
// normalization, signature filters, and content-hash dedup gate every
// candidate; accumulation continues until width-class quotas are met;
// tight-window sampling picks homogeneous per-class subsets; the writers
// equalize heights and emit sprites or slices plus a manifest.
//
// Architecture:
// - `error.rs`: the fatal error taxonomy (`BuildError`)
// - `seed.rs`: seed resolution (numeric, textual, or fresh)
// - `hash.rs`: FNV-1a content hashing and the run-local registry
// - `geometry.rs`: canonical transforms and paint sanitization
// - `filters.rs`: literal path-signature rejection
// - `classify.rs`: width classes and pool derivation
// - `sampler.rs`: tight-window selection with shuffle fallback
// - `phrase.rs`: phrase assembly against exact glyph-count targets
// - `render.rs`: the quiet adapter over a `ScriptEngine`
// - `svg.rs`: symbol/sprite assembly and the scale wrapper
// - `collector.rs`: explicit accumulation state
// - `options.rs` / `manifest.rs`: validated parameters and output schemas
// - `pools.rs` / `slices.rs`: the two builders
//
// One run is one strictly sequential pass; both engines are injected as
// traits, so the whole pipeline runs against deterministic substitutes in
// tests. Identical seed and flags reproduce every output byte for byte
// (timestamps pinned).

pub mod classify;
pub mod collector;
pub mod error;
pub mod filters;
pub mod geometry;
pub mod hash;
pub mod manifest;
pub mod options;
pub mod phrase;
pub mod pools;
pub mod render;
pub mod sampler;
pub mod seed;
pub mod slices;
pub mod svg;

// Re-export key types at crate root for convenience.
pub use error::BuildError;
pub use options::{PoolOptions, SliceOptions};
pub use pools::{PoolReport, build_pools};
pub use seed::{ResolvedSeed, resolve_seed};
pub use slices::{SliceReport, build_slices};
