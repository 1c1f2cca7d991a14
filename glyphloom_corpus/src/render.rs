// Render adapter: the pipeline's only door to the script engine.
//
// Generation loops probe candidate text expecting failure most of the
// time; `probe` returns those failures as plain structured results so
// routine rejection noise never reaches user-visible diagnostics. There
// is no logging sink to mute anywhere.

use crate::geometry::ViewBox;
use glyphloom_script::{GlyphShape, RenderFailure, RowRender, ScriptEngine, compose_row};

/// A laid-out row plus its validated viewbox.
#[derive(Debug, Clone)]
pub struct RowGeometry {
    pub content: String,
    pub view_box: ViewBox,
}

pub struct RenderAdapter<'a, E: ScriptEngine + ?Sized> {
    engine: &'a E,
}

impl<'a, E: ScriptEngine + ?Sized> RenderAdapter<'a, E> {
    pub fn new(engine: &'a E) -> Self {
        RenderAdapter { engine }
    }

    /// Quiet parse for exploratory generation. Failures are expected and
    /// returned as values; the caller retries.
    pub fn probe(
        &self,
        text: &str,
        handwritten: bool,
    ) -> Result<Vec<GlyphShape>, RenderFailure> {
        self.engine.parse(text, handwritten)
    }

    /// Parse and lay out a row in one step, with the given bbox margin.
    pub fn render_row(
        &self,
        text: &str,
        handwritten: bool,
        margin: f64,
    ) -> Result<(Vec<GlyphShape>, RowGeometry), RenderFailure> {
        let glyphs = self.engine.parse(text, handwritten)?;
        let row = compose_row(&glyphs, margin)?;
        Ok((glyphs, row_geometry(row)?))
    }

    /// Lay out already-parsed shapes (used for per-glyph slices).
    pub fn layout_shapes(
        &self,
        shapes: &[GlyphShape],
        margin: f64,
    ) -> Result<RowGeometry, RenderFailure> {
        row_geometry(compose_row(shapes, margin)?)
    }
}

fn row_geometry(row: RowRender) -> Result<RowGeometry, RenderFailure> {
    // A composed row with nonpositive extent cannot be laid out; treat it
    // as a structural failure like any other unrenderable text.
    match ViewBox::from_bounds(&row.bounds) {
        Ok(view_box) => Ok(RowGeometry {
            content: row.content,
            view_box,
        }),
        Err(_) => Err(RenderFailure::EmptyText),
    }
}
