// Sprite assembly: symbol markup, sprite documents, and the
// content-preserving scale wrapper.

use crate::geometry::{EPSILON, SVG_NS, format_number};
use regex::Regex;
use std::sync::LazyLock;

/// Wrap normalized content as a `<symbol>`.
pub fn build_symbol(id: &str, view_box: &str, content: &str) -> String {
    format!("<symbol id=\"{id}\" viewBox=\"{view_box}\">{content}</symbol>")
}

/// Assemble a hidden sprite document from symbols, with a header comment.
pub fn build_sprite(symbols: &[String], header_comment: &str) -> String {
    let mut lines = vec![
        header_comment.to_string(),
        format!(
            "<svg xmlns=\"{SVG_NS}\" aria-hidden=\"true\" \
             style=\"position:absolute;width:0;height:0;overflow:hidden\">"
        ),
        "  <defs>".to_string(),
    ];
    lines.extend(symbols.iter().map(|symbol| format!("    {symbol}")));
    lines.push("  </defs>".to_string());
    lines.push("</svg>".to_string());
    lines.push(String::new());
    lines.join("\n")
}

/// Wrap a symbol's content in one uniform-scale group. Identity scales
/// (and junk factors) are no-ops — the symbol text is returned unchanged,
/// not re-serialized.
pub fn apply_scale(symbol_text: &str, factor: f64) -> String {
    if !factor.is_finite() || factor <= 0.0 || (factor - 1.0).abs() < EPSILON {
        return symbol_text.to_string();
    }

    let Some(open_end) = symbol_text.find('>') else {
        return symbol_text.to_string();
    };
    let Some(close_start) = symbol_text.rfind("</symbol>") else {
        return symbol_text.to_string();
    };
    if close_start <= open_end {
        return symbol_text.to_string();
    }

    let head = &symbol_text[..=open_end];
    let body = &symbol_text[open_end + 1..close_start];
    let tail = &symbol_text[close_start..];
    format!(
        "{head}<g transform=\"scale({})\">{body}</g>{tail}",
        format_number(factor)
    )
}

static SYMBOL_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(<symbol\b[^>]*?\bid=")[^"]*(")"#).expect("symbol id regex"));

/// Rewrite the id attribute of a symbol's opening tag.
pub fn with_symbol_id(symbol_text: &str, id: &str) -> String {
    SYMBOL_ID_RE
        .replace(symbol_text, |caps: &regex::Captures| {
            format!("{}{id}{}", &caps[1], &caps[2])
        })
        .into_owned()
}
