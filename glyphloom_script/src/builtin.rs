// Built-in deterministic script engine.
//
// `StrokeScript` maps romanized text onto the constructed script: each
// word is segmented into syllable units (onset / nucleus / coda), and each
// unit becomes one glyph assembled from stroke tables — a base stroke
// keyed by the onset, a tail stroke for the coda, and a diacritic mark for
// the nucleus. Digit nuclei take the register mark, so register-prefixed
// words like "Q2mare" render as an ordinary leading glyph.
//
// The mapping is pure: same text + flag in, same shapes out. Texts the
// script cannot express fail structurally (`RenderFailure`) — characters
// outside ASCII letters/digits/apostrophe, or vowel-less words longer
// than two letters.
//
// Diacritic path data is load-bearing downstream: the curved diphthong
// marks and the dot mark carry the exact literal signatures the corpus
// signature filters match on. Do not reformat the `d` strings.

use crate::types::{Bounds, GlyphPath, GlyphShape, RenderFailure, ScriptEngine};

/// Gap between a base stroke and its coda tail.
const TAIL_GAP: f64 = 6.0;

/// Vertical clearance between a base stroke's top and its diacritic.
const DIACRITIC_RISE: f64 = 16.0;

/// Paint applied to diacritic marks by the stroke tables. Downstream
/// normalization rewrites this to `currentColor`.
const DIACRITIC_FILL: &str = "#0b2a6f";

/// One table stroke: path data plus its exact extents.
struct Stroke {
    d: &'static str,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Stroke {
    fn bounds(&self) -> Bounds {
        Bounds {
            x_min: self.x_min,
            x_max: self.x_max,
            y_min: self.y_min,
            y_max: self.y_max,
        }
    }

    fn width(&self) -> f64 {
        self.x_max - self.x_min
    }
}

/// Base strokes, keyed by onset hash. Heights vary deliberately — the
/// corpus samplers and the minimum-glyph-height gate depend on a spread.
static BASE_STROKES: [Stroke; 14] = [
    Stroke { d: "m 0 0 l 0 -62 l 34 0 l 0 62", x_min: 0.0, x_max: 34.0, y_min: -62.0, y_max: 0.0 },
    Stroke { d: "m 0 -58 l 30 0 l 0 58 l -30 0 z", x_min: 0.0, x_max: 30.0, y_min: -58.0, y_max: 0.0 },
    Stroke { d: "m 0 0 l 14 -66 l 14 66", x_min: 0.0, x_max: 28.0, y_min: -66.0, y_max: 0.0 },
    Stroke { d: "m 0 -50 l 16 -14 l 16 14 l 0 50", x_min: 0.0, x_max: 32.0, y_min: -64.0, y_max: 0.0 },
    Stroke { d: "m 0 0 l 0 -44 l 26 0", x_min: 0.0, x_max: 26.0, y_min: -44.0, y_max: 0.0 },
    Stroke { d: "m 0 -30 l 22 0 l 0 30", x_min: 0.0, x_max: 22.0, y_min: -30.0, y_max: 0.0 },
    Stroke { d: "m 0 0 l 36 0 l -8 -52 l -20 0 z", x_min: 0.0, x_max: 36.0, y_min: -52.0, y_max: 0.0 },
    Stroke { d: "m 0 -26 l 24 26 l -24 0 z", x_min: 0.0, x_max: 24.0, y_min: -26.0, y_max: 0.0 },
    Stroke { d: "m 0 0 l 0 -70 l 26 14 l 0 56", x_min: 0.0, x_max: 26.0, y_min: -70.0, y_max: 0.0 },
    Stroke { d: "m 0 -48 l 28 0 m -28 24 l 28 0 m -28 24 l 28 0", x_min: 0.0, x_max: 28.0, y_min: -48.0, y_max: 0.0 },
    Stroke { d: "m 0 0 l 10 -76 l 10 40 l 10 -40", x_min: 0.0, x_max: 30.0, y_min: -76.0, y_max: 0.0 },
    Stroke { d: "m 0 -40 l 12 -14 l 12 14 l 0 40", x_min: 0.0, x_max: 24.0, y_min: -54.0, y_max: 0.0 },
    Stroke { d: "m 0 0 l 0 -36 l 18 0 l 0 36 z", x_min: 0.0, x_max: 18.0, y_min: -36.0, y_max: 0.0 },
    Stroke { d: "m 0 -64 l 20 0 l 0 32 l -20 0 l 0 32 l 20 0", x_min: 0.0, x_max: 20.0, y_min: -64.0, y_max: 0.0 },
];

/// Coda tails, keyed by coda hash.
static TAIL_STROKES: [Stroke; 7] = [
    Stroke { d: "m 0 0 l 0 -28 l 12 0", x_min: 0.0, x_max: 12.0, y_min: -28.0, y_max: 0.0 },
    Stroke { d: "m 0 -24 l 14 0 l 0 24", x_min: 0.0, x_max: 14.0, y_min: -24.0, y_max: 0.0 },
    Stroke { d: "m 0 0 l 8 -30 l 8 30", x_min: 0.0, x_max: 16.0, y_min: -30.0, y_max: 0.0 },
    Stroke { d: "m 0 -18 l 12 18 l -12 0 z", x_min: 0.0, x_max: 12.0, y_min: -18.0, y_max: 0.0 },
    Stroke { d: "m 0 0 l 0 -26 m 0 10 l 10 0", x_min: 0.0, x_max: 10.0, y_min: -26.0, y_max: 0.0 },
    Stroke { d: "m 0 -22 l 16 0 l 0 22", x_min: 0.0, x_max: 16.0, y_min: -22.0, y_max: 0.0 },
    Stroke { d: "m 0 0 l 14 -14 l -14 -14", x_min: 0.0, x_max: 14.0, y_min: -28.0, y_max: 0.0 },
];

/// Diacritic marks keyed by nucleus. Multiple keys may share one mark.
/// The diphthong marks embed the curved-diacritic signature curves; the
/// `u` mark embeds the dot-diacritic diamond.
struct Diacritic {
    keys: &'static [&'static str],
    stroke: Stroke,
}

static DIACRITICS: [Diacritic; 11] = [
    Diacritic {
        keys: &["a"],
        stroke: Stroke { d: "m -9 0 l 18 0", x_min: -9.0, x_max: 9.0, y_min: 0.0, y_max: 0.0 },
    },
    Diacritic {
        keys: &["e"],
        stroke: Stroke { d: "m -9 0 l 18 0 m -18 7 l 18 0", x_min: -9.0, x_max: 9.0, y_min: 0.0, y_max: 7.0 },
    },
    Diacritic {
        keys: &["i"],
        stroke: Stroke { d: "m 0 0 l 0 10", x_min: 0.0, x_max: 0.0, y_min: 0.0, y_max: 10.0 },
    },
    Diacritic {
        keys: &["o"],
        stroke: Stroke { d: "m -6 0 l 6 -8 l 6 8 l -6 8 z", x_min: -6.0, x_max: 6.0, y_min: -8.0, y_max: 8.0 },
    },
    Diacritic {
        keys: &["u"],
        stroke: Stroke {
            d: "m -7.5 0 l 7.5 7.5 l 7.5 -7.5 l -7.5 -7.5 l -7.5 7.5 z",
            x_min: -7.5,
            x_max: 7.5,
            y_min: -7.5,
            y_max: 7.5,
        },
    },
    Diacritic {
        keys: &["ai"],
        stroke: Stroke {
            d: "m 7.2 0 q -6.55 11.7 -14.4 12.25",
            x_min: -7.2,
            x_max: 7.2,
            y_min: 0.0,
            y_max: 12.3,
        },
    },
    Diacritic {
        keys: &["ei", "ue"],
        stroke: Stroke {
            d: "m -7.2 12.25 q 6.55 -11.7 14.4 -12.25",
            x_min: -7.2,
            x_max: 7.2,
            y_min: 0.0,
            y_max: 12.3,
        },
    },
    Diacritic {
        keys: &["ia", "ae"],
        stroke: Stroke {
            d: "m 2.7 8.4 q -0.75 -5.3 -5.4 -8.4",
            x_min: -2.7,
            x_max: 2.7,
            y_min: 0.0,
            y_max: 8.4,
        },
    },
    Diacritic {
        keys: &["io", "ui"],
        stroke: Stroke {
            d: "m -2.7 -8.4 q 0.75 5.3 5.4 8.4",
            x_min: -2.7,
            x_max: 2.7,
            y_min: -8.4,
            y_max: 0.0,
        },
    },
    Diacritic {
        keys: &["oa", "eo"],
        stroke: Stroke {
            d: "m 1.35 -5.55 q -3.3 5.85 -2.55 11.1",
            x_min: -1.8,
            x_max: 1.35,
            y_min: -5.55,
            y_max: 5.55,
        },
    },
    Diacritic {
        keys: &["ou"],
        stroke: Stroke {
            d: "m 7.2 0 q -6.55 11.7 -14.4 12.25 q 6.55 -11.7 14.4 -12.25",
            x_min: -7.2,
            x_max: 7.2,
            y_min: 0.0,
            y_max: 12.3,
        },
    },
];

/// Mark for digit (register) nuclei.
static REGISTER_MARK: Stroke = Stroke {
    d: "m -8 0 l 8 -9 l 8 9 m -16 6 l 16 0",
    x_min: -8.0,
    x_max: 8.0,
    y_min: -9.0,
    y_max: 6.0,
};

/// 32-bit FNV-1a over the unit's bytes; stroke table indexing only.
fn fnv1a_32(text: &str) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in text.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

/// One syllable unit of a word.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Unit {
    onset: String,
    nucleus: String,
    coda: String,
}

impl Unit {
    fn text(&self) -> String {
        format!("{}{}{}", self.onset, self.nucleus, self.coda)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Run {
    Consonants(String),
    Nucleus(String),
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Tokenize a subword (no apostrophes) into maximal consonant and nucleus
/// runs. Vowel runs and digit runs are both nuclei, but never merge.
fn tokenize(subword: &str) -> Result<Vec<Run>, RenderFailure> {
    let mut runs: Vec<Run> = Vec::new();
    for c in subword.chars() {
        if !c.is_ascii_alphanumeric() {
            return Err(RenderFailure::UnsupportedCharacter(c));
        }
        let class = if c.is_ascii_digit() {
            2u8
        } else if is_vowel(c) {
            1
        } else {
            0
        };
        let extend = match (runs.last_mut(), class) {
            (Some(Run::Consonants(run)), 0) => {
                run.push(c);
                true
            }
            (Some(Run::Nucleus(run)), 1) if run.chars().all(is_vowel) => {
                run.push(c);
                true
            }
            (Some(Run::Nucleus(run)), 2) if run.chars().all(|d| d.is_ascii_digit()) => {
                run.push(c);
                true
            }
            _ => false,
        };
        if !extend {
            runs.push(match class {
                0 => Run::Consonants(c.to_string()),
                _ => Run::Nucleus(c.to_string()),
            });
        }
    }
    Ok(runs)
}

/// Segment a subword into syllable units.
///
/// Each nucleus anchors one unit. The consonant run before the first
/// nucleus is its onset; an inner consonant run donates its last letter to
/// the next onset and the remainder to the previous coda; the final run is
/// wholly the last coda. A vowel-less subword of at most two letters is a
/// single bare unit; longer ones are unrenderable.
fn syllabify(subword: &str) -> Result<Vec<Unit>, RenderFailure> {
    let runs = tokenize(subword)?;
    let nuclei: Vec<usize> = runs
        .iter()
        .enumerate()
        .filter_map(|(i, run)| matches!(run, Run::Nucleus(_)).then_some(i))
        .collect();

    if nuclei.is_empty() {
        if subword.chars().count() <= 2 {
            return Ok(vec![Unit {
                onset: subword.to_string(),
                nucleus: String::new(),
                coda: String::new(),
            }]);
        }
        return Err(RenderFailure::MissingNucleus(subword.to_string()));
    }

    let mut units = Vec::with_capacity(nuclei.len());
    for (n, &ti) in nuclei.iter().enumerate() {
        let onset = if ti == 0 {
            String::new()
        } else {
            let run = consonant_run(&runs, ti - 1);
            if n == 0 {
                run.to_string()
            } else {
                run.chars().last().map(String::from).unwrap_or_default()
            }
        };
        let coda = if ti + 1 < runs.len() {
            let run = consonant_run(&runs, ti + 1);
            if n + 1 == nuclei.len() {
                run.to_string()
            } else {
                let mut chars: Vec<char> = run.chars().collect();
                chars.pop();
                chars.into_iter().collect()
            }
        } else {
            String::new()
        };
        let nucleus = match &runs[ti] {
            Run::Nucleus(run) => run.clone(),
            Run::Consonants(_) => unreachable!("nucleus index points at a consonant run"),
        };
        units.push(Unit {
            onset,
            nucleus,
            coda,
        });
    }
    Ok(units)
}

fn consonant_run(runs: &[Run], idx: usize) -> &str {
    match &runs[idx] {
        Run::Consonants(run) => run,
        Run::Nucleus(_) => "",
    }
}

/// Nucleus → diacritic mark: exact key match, then the first two letters,
/// then the first letter.
fn diacritic_for(nucleus: &str) -> Option<&'static Stroke> {
    let lookup = |key: &str| {
        DIACRITICS
            .iter()
            .find(|d| d.keys.contains(&key))
            .map(|d| &d.stroke)
    };
    if let Some(stroke) = lookup(nucleus) {
        return Some(stroke);
    }
    let prefix2: String = nucleus.chars().take(2).collect();
    if let Some(stroke) = lookup(&prefix2) {
        return Some(stroke);
    }
    let prefix1: String = nucleus.chars().take(1).collect();
    lookup(&prefix1)
}

fn glyph_for_unit(unit: &Unit, handwritten: bool) -> GlyphShape {
    let key = if unit.onset.is_empty() {
        unit.nucleus.as_str()
    } else {
        unit.onset.as_str()
    };
    let style_offset = if handwritten { 5 } else { 0 };
    let base_idx = (fnv1a_32(key) as usize + style_offset) % BASE_STROKES.len();
    let base = &BASE_STROKES[base_idx];

    let mut paths = vec![GlyphPath {
        d: base.d.to_string(),
        dx: 0.0,
        dy: 0.0,
        bounds: base.bounds(),
        fill: None,
    }];
    let mut advance = base.width();

    if !unit.coda.is_empty() {
        let tail = &TAIL_STROKES[fnv1a_32(&unit.coda) as usize % TAIL_STROKES.len()];
        let dx = base.width() + TAIL_GAP;
        paths.push(GlyphPath {
            d: tail.d.to_string(),
            dx,
            dy: 0.0,
            bounds: tail.bounds(),
            fill: None,
        });
        advance = dx + tail.width();
    }

    if !unit.nucleus.is_empty() {
        let mark = if unit.nucleus.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            &REGISTER_MARK
        } else {
            // A nucleus always resolves: every single vowel has a mark.
            diacritic_for(&unit.nucleus).unwrap_or(&REGISTER_MARK)
        };
        paths.push(GlyphPath {
            d: mark.d.to_string(),
            dx: base.width() / 2.0,
            dy: base.y_min - DIACRITIC_RISE,
            bounds: mark.bounds(),
            fill: Some(DIACRITIC_FILL),
        });
    }

    GlyphShape {
        unit: unit.text(),
        paths,
        advance,
    }
}

/// The built-in engine. Stateless; construct freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrokeScript;

impl StrokeScript {
    pub fn new() -> Self {
        StrokeScript
    }
}

impl ScriptEngine for StrokeScript {
    fn parse(&self, text: &str, handwritten: bool) -> Result<Vec<GlyphShape>, RenderFailure> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(RenderFailure::EmptyText);
        }

        let mut glyphs = Vec::new();
        for word in trimmed.split_whitespace() {
            let mut folded = String::with_capacity(word.len());
            for c in word.chars() {
                if !c.is_ascii() {
                    return Err(RenderFailure::UnsupportedCharacter(c));
                }
                folded.push(c.to_ascii_lowercase());
            }
            // Apostrophes are pure syllable separators and render nothing.
            for subword in folded.split('\'') {
                if subword.is_empty() {
                    continue;
                }
                for unit in syllabify(subword)? {
                    glyphs.push(glyph_for_unit(&unit, handwritten));
                }
            }
        }

        if glyphs.is_empty() {
            return Err(RenderFailure::EmptyText);
        }
        Ok(glyphs)
    }
}
