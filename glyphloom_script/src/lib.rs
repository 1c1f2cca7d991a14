// Script-rendering capability for Glyphloom.
//
// The corpus pipeline consumes the constructed script through one narrow
// seam: a `ScriptEngine` turns text into ordered glyph shapes (or a
// structured failure), and `compose_row` lays shapes out with a tight
// bounding box. `StrokeScript` is the built-in engine behind that seam;
// any other implementation can replace it without touching the pipeline.
//
// Architecture:
// - `types.rs`: `GlyphShape`, `GlyphPath`, `Bounds`, `RenderFailure`, and
//   the `ScriptEngine` trait
// - `layout.rs`: row composition and bounding-box fitting
// - `builtin.rs`: the deterministic stroke engine
//
// Determinism constraint: rendering is pure. Same text and flags in, same
// markup and geometry out, on every platform.

pub mod builtin;
pub mod layout;
pub mod types;

// Re-export key types at crate root for convenience.
pub use builtin::StrokeScript;
pub use layout::{GLYPH_SPACING, RowRender, compose_row};
pub use types::{Bounds, GlyphPath, GlyphShape, RenderFailure, ScriptEngine};
