// Geometry normalization: the three canonical transforms and paint
// sanitization.
//
// Every number that reaches output text goes through `format_number`
// (six decimal places, trailing zeros trimmed), so output is byte-stable
// across runs and platforms. Identity translates and identity scales are
// no-ops and are never serialized.

use crate::error::BuildError;
use glyphloom_script::Bounds;
use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;

/// SVG namespace on every emitted document.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Tolerance below which a translate or scale counts as identity.
pub const EPSILON: f64 = 0.000_001;

/// The canonical symbol frame all pool symbols are fitted into.
pub const CANONICAL_FRAME: ViewBox = ViewBox {
    min_x: -120.0,
    min_y: -90.0,
    width: 240.0,
    height: 180.0,
};

/// Fraction of the canonical frame reserved as padding on each side.
pub const FRAME_PADDING_RATIO: f64 = 0.07;

/// A viewbox rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Build from layout bounds, validating that the box is drawable.
    pub fn from_bounds(bounds: &Bounds) -> Result<ViewBox, BuildError> {
        let vb = ViewBox {
            min_x: bounds.x_min,
            min_y: bounds.y_min,
            width: bounds.width(),
            height: bounds.height(),
        };
        if !vb.width.is_finite() || !vb.height.is_finite() || vb.width <= 0.0 || vb.height <= 0.0 {
            return Err(BuildError::InvariantViolation(format!(
                "degenerate viewbox: {} {} {} {}",
                vb.min_x, vb.min_y, vb.width, vb.height
            )));
        }
        Ok(vb)
    }

    /// Attribute rendering: "minX minY width height".
    pub fn formatted(&self) -> String {
        format!(
            "{} {} {} {}",
            format_number(self.min_x),
            format_number(self.min_y),
            format_number(self.width),
            format_number(self.height)
        )
    }
}

/// Render a number with at most six decimal places, trimmed.
pub fn format_number(value: f64) -> String {
    let mut s = format!("{value:.6}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

/// A self-contained SVG document plus its final dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDoc {
    pub text: String,
    pub width: f64,
    pub height: f64,
    pub view_box: String,
}

fn svg_document(inner: &str, width: &str, height: &str) -> String {
    format!(
        "<svg xmlns=\"{SVG_NS}\" viewBox=\"0 0 {width} {height}\" width=\"{width}\" \
         height=\"{height}\" fill=\"currentColor\" stroke=\"none\">\n{inner}\n</svg>\n"
    )
}

/// Zero-origin rescale: translate the viewbox origin to (0, 0), apply an
/// optional uniform scale, and emit a self-contained document.
pub fn zero_origin_svg(content: &str, view_box: ViewBox, scale: f64) -> SvgDoc {
    let applied = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
    let scaled_width = view_box.width * applied;
    let scaled_height = view_box.height * applied;
    let width = format_number(scaled_width);
    let height = format_number(scaled_height);

    let zeroed = if view_box.min_x.abs() < EPSILON && view_box.min_y.abs() < EPSILON {
        content.to_string()
    } else {
        format!(
            "<g transform=\"translate({} {})\">{content}</g>",
            format_number(-view_box.min_x),
            format_number(-view_box.min_y)
        )
    };
    let transformed = if (applied - 1.0).abs() < EPSILON {
        zeroed
    } else {
        format!(
            "<g transform=\"scale({})\">{zeroed}</g>",
            format_number(applied)
        )
    };

    SvgDoc {
        text: svg_document(&transformed, &width, &height),
        width: scaled_width,
        height: scaled_height,
        view_box: format!("0 0 {width} {height}"),
    }
}

/// Fixed-height pad: center the content vertically on a taller canvas.
/// Pad-only — a target below the natural height leaves the height alone.
/// Width is always the natural width.
pub fn fixed_height_svg(content: &str, view_box: ViewBox, target_height: f64) -> SvgDoc {
    let canvas_height = if target_height.is_finite() && target_height >= view_box.height {
        target_height
    } else {
        view_box.height
    };
    let y_pad = (canvas_height - view_box.height) / 2.0;
    let tx = -view_box.min_x;
    let ty = -view_box.min_y + y_pad;
    let width = format_number(view_box.width);
    let height = format_number(canvas_height);

    let transformed = if tx.abs() < EPSILON && ty.abs() < EPSILON {
        content.to_string()
    } else {
        format!(
            "<g transform=\"translate({} {})\">{content}</g>",
            format_number(tx),
            format_number(ty)
        )
    };

    SvgDoc {
        text: svg_document(&transformed, &width, &height),
        width: view_box.width,
        height: canvas_height,
        view_box: format!("0 0 {width} {height}"),
    }
}

/// A symbol fitted into the canonical frame.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSymbol {
    pub content: String,
    pub view_box: String,
    pub scale: f64,
    /// Width and height as fractions of the frame.
    pub width: f64,
    pub height: f64,
    pub aspect: f64,
}

/// Canonical-frame fit: uniform scale-to-fit into the padded frame, then
/// centering. Reports the resulting scale and the frame-relative
/// dimensions used by the samplers.
pub fn normalize_to_frame(content: &str, src: ViewBox) -> NormalizedSymbol {
    let dst = CANONICAL_FRAME;
    let usable_width = dst.width * (1.0 - FRAME_PADDING_RATIO * 2.0);
    let usable_height = dst.height * (1.0 - FRAME_PADDING_RATIO * 2.0);

    let scale = (usable_width / src.width).min(usable_height / src.height);
    let src_center_x = src.min_x + src.width / 2.0;
    let src_center_y = src.min_y + src.height / 2.0;
    let dst_center_x = dst.min_x + dst.width / 2.0;
    let dst_center_y = dst.min_y + dst.height / 2.0;
    let translate_x = dst_center_x - src_center_x * scale;
    let translate_y = dst_center_y - src_center_y * scale;

    let transform = format!(
        "translate({} {}) scale({})",
        format_number(translate_x),
        format_number(translate_y),
        format_number(scale)
    );
    let sanitized = sanitize_paint(content);
    let width = src.width * scale / dst.width;
    let height = src.height * scale / dst.height;

    NormalizedSymbol {
        content: format!("<g fill=\"currentColor\" transform=\"{transform}\">{sanitized}</g>"),
        view_box: dst.formatted(),
        scale,
        width,
        height,
        aspect: if height > 0.0 { width / height } else { 1.0 },
    }
}

static FILL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\sfill="([^"]+)""#).expect("fill regex"));
static STROKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\sstroke="([^"]+)""#).expect("stroke regex"));

fn paint_passes_through(value: &str) -> bool {
    let normalized = value.trim().to_lowercase();
    normalized == "none"
        || normalized == "currentcolor"
        || normalized == "inherit"
        || normalized.starts_with("url(")
}

/// Rewrite explicit fill/stroke colors to `currentColor` so consumers can
/// recolor uniformly. `none`, `currentColor`, `inherit`, and `url(...)`
/// references pass through untouched.
pub fn sanitize_paint(content: &str) -> String {
    let filled = FILL_RE.replace_all(content, |caps: &Captures| {
        if paint_passes_through(&caps[1]) {
            caps[0].to_string()
        } else {
            " fill=\"currentColor\"".to_string()
        }
    });
    STROKE_RE
        .replace_all(&filled, |caps: &Captures| {
            if paint_passes_through(&caps[1]) {
                caps[0].to_string()
            } else {
                " stroke=\"currentColor\"".to_string()
            }
        })
        .into_owned()
}
