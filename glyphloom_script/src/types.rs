// Glyph shape types shared by every script engine implementation.
//
// A `GlyphShape` is an ordered set of positioned paths in the glyph's own
// local frame, plus an advance width for row layout. Path data strings are
// carried verbatim from the engine's stroke tables — downstream signature
// filters match on them literally, so nothing in the pipeline may rewrite
// `d` attributes.

use serde::Serialize;
use thiserror::Error;

/// Structured rendering failure. Expected during exploratory generation;
/// the pipeline retries silently rather than logging these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderFailure {
    #[error("empty text")]
    EmptyText,
    #[error("unsupported character {0:?}")]
    UnsupportedCharacter(char),
    #[error("no vowel nucleus in {0:?}")]
    MissingNucleus(String),
}

/// Tight extents of a path or glyph in its local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Shift by an offset.
    pub fn translated(&self, dx: f64, dy: f64) -> Bounds {
        Bounds {
            x_min: self.x_min + dx,
            x_max: self.x_max + dx,
            y_min: self.y_min + dy,
            y_max: self.y_max + dy,
        }
    }

    /// Smallest bounds containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Expand symmetrically by a margin.
    pub fn expanded(&self, margin: f64) -> Bounds {
        Bounds {
            x_min: self.x_min - margin,
            x_max: self.x_max + margin,
            y_min: self.y_min - margin,
            y_max: self.y_max + margin,
        }
    }
}

/// One positioned path within a glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphPath {
    /// Path data, verbatim from the stroke tables.
    pub d: String,
    /// Offset within the glyph frame.
    pub dx: f64,
    pub dy: f64,
    /// Tight extents of the path data in its own frame.
    pub bounds: Bounds,
    /// Explicit paint carried by the source stroke, if any.
    pub fill: Option<&'static str>,
}

impl GlyphPath {
    /// Extents of this path after positioning.
    pub fn placed_bounds(&self) -> Bounds {
        self.bounds.translated(self.dx, self.dy)
    }
}

/// One rendered glyph: the romanized unit it encodes, its paths, and the
/// advance width consumed on the row.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphShape {
    pub unit: String,
    pub paths: Vec<GlyphPath>,
    pub advance: f64,
}

impl GlyphShape {
    /// Union of the placed path extents.
    pub fn bounds(&self) -> Bounds {
        let mut iter = self.paths.iter().map(GlyphPath::placed_bounds);
        let first = iter.next().unwrap_or(Bounds {
            x_min: 0.0,
            x_max: 0.0,
            y_min: 0.0,
            y_max: 0.0,
        });
        iter.fold(first, |acc, b| acc.union(&b))
    }
}

/// The script-rendering capability: text in, ordered glyph shapes out, or
/// a structured failure.
pub trait ScriptEngine {
    fn parse(&self, text: &str, handwritten: bool) -> Result<Vec<GlyphShape>, RenderFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_union_and_translate() {
        let a = Bounds {
            x_min: 0.0,
            x_max: 10.0,
            y_min: -5.0,
            y_max: 5.0,
        };
        let b = a.translated(20.0, 0.0);
        let u = a.union(&b);
        assert_eq!(u.x_min, 0.0);
        assert_eq!(u.x_max, 30.0);
        assert_eq!(u.width(), 30.0);
        assert_eq!(u.height(), 10.0);
    }

    #[test]
    fn bounds_expand() {
        let a = Bounds {
            x_min: 0.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 4.0,
        };
        let e = a.expanded(3.0);
        assert_eq!(e.x_min, -3.0);
        assert_eq!(e.height(), 10.0);
    }
}
