// Row layout: compose glyph shapes into one horizontal row and compute the
// tight bounding box, expanded by a padding margin.
//
// The emitted markup positions every path with a `transform` attribute and
// leaves `d` strings untouched, so literal path signatures survive into
// the normalized output.

use crate::types::{Bounds, GlyphShape, RenderFailure};

/// Horizontal gap between consecutive glyphs on a row.
pub const GLYPH_SPACING: f64 = 14.0;

/// A composed row: inner SVG markup plus its bounding box (margin
/// included).
#[derive(Debug, Clone, PartialEq)]
pub struct RowRender {
    pub content: String,
    pub bounds: Bounds,
}

/// Minimal stable decimal rendering: six places, trailing zeros trimmed.
fn fmt_coord(value: f64) -> String {
    let mut s = format!("{value:.6}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Lay the glyphs out left to right and return the combined markup with
/// its tight bounding box expanded by `margin`.
pub fn compose_row(glyphs: &[GlyphShape], margin: f64) -> Result<RowRender, RenderFailure> {
    if glyphs.is_empty() {
        return Err(RenderFailure::EmptyText);
    }

    let mut content = String::from("<g>");
    let mut bounds: Option<Bounds> = None;
    let mut cursor = 0.0;

    for glyph in glyphs {
        for path in &glyph.paths {
            let x = cursor + path.dx;
            let y = path.dy;
            content.push_str("<path");
            if x != 0.0 || y != 0.0 {
                content.push_str(&format!(
                    " transform=\"translate({} {})\"",
                    fmt_coord(x),
                    fmt_coord(y)
                ));
            }
            if let Some(fill) = path.fill {
                content.push_str(&format!(" fill=\"{fill}\""));
            }
            content.push_str(&format!(" d=\"{}\"/>", path.d));

            let placed = path.bounds.translated(x, y);
            bounds = Some(match bounds {
                Some(b) => b.union(&placed),
                None => placed,
            });
        }
        cursor += glyph.advance + GLYPH_SPACING;
    }
    content.push_str("</g>");

    let bounds = bounds.ok_or(RenderFailure::EmptyText)?;
    Ok(RowRender {
        content,
        bounds: bounds.expanded(margin),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GlyphPath;

    fn glyph(unit: &str, width: f64, height: f64) -> GlyphShape {
        GlyphShape {
            unit: unit.to_string(),
            paths: vec![GlyphPath {
                d: format!("m 0 0 l {width} 0"),
                dx: 0.0,
                dy: 0.0,
                bounds: Bounds {
                    x_min: 0.0,
                    x_max: width,
                    y_min: -height / 2.0,
                    y_max: height / 2.0,
                },
                fill: None,
            }],
            advance: width,
        }
    }

    #[test]
    fn empty_row_is_a_failure() {
        assert_eq!(compose_row(&[], 0.0), Err(RenderFailure::EmptyText));
    }

    #[test]
    fn single_glyph_row_has_glyph_bounds_plus_margin() {
        let row = compose_row(&[glyph("ka", 40.0, 60.0)], 20.0).unwrap();
        assert_eq!(row.bounds.x_min, -20.0);
        assert_eq!(row.bounds.width(), 80.0);
        assert_eq!(row.bounds.height(), 100.0);
    }

    #[test]
    fn glyphs_advance_with_spacing() {
        let row = compose_row(&[glyph("ka", 40.0, 60.0), glyph("to", 30.0, 60.0)], 0.0).unwrap();
        // Second glyph starts at 40 + GLYPH_SPACING.
        assert!(row.content.contains("translate(54 0)"));
        assert_eq!(row.bounds.width(), 84.0);
    }

    #[test]
    fn path_fill_attributes_survive() {
        let mut g = glyph("ka", 40.0, 60.0);
        g.paths[0].fill = Some("#0b2a6f");
        let row = compose_row(&[g], 0.0).unwrap();
        assert!(row.content.contains(" fill=\"#0b2a6f\""));
    }

    #[test]
    fn coordinates_are_trimmed() {
        assert_eq!(fmt_coord(1.5), "1.5");
        assert_eq!(fmt_coord(2.0), "2");
        assert_eq!(fmt_coord(-0.0000001), "0");
        assert_eq!(fmt_coord(0.1234567), "0.123457");
    }
}
