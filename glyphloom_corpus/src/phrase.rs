// Phrase assembly: compose words into a phrase sized to hit an exact
// glyph-count target.
//
// The word-count ceiling is a step function of the target; the actual
// count is uniform in [1, ceiling]. A phrase is accepted only when the
// renderer reports a glyph count exactly equal to the target — no
// approximate matches. Anything else discards the whole phrase.

use crate::render::RenderAdapter;
use glyphloom_lang::{WordEngine, WordSynthesizer};
use glyphloom_prng::StreamRng;
use glyphloom_script::{GlyphShape, ScriptEngine};

/// Word-count ceiling for a glyph-count target.
pub fn max_words_for_target(target_glyph_count: usize) -> usize {
    if target_glyph_count <= 2 {
        1
    } else if target_glyph_count <= 4 {
        2
    } else if target_glyph_count <= 7 {
        3
    } else {
        4
    }
}

/// Draw a word count and join that many synthesized words with spaces.
pub fn assemble_phrase<E: WordEngine + ?Sized>(
    rng: &mut StreamRng,
    synthesizer: &WordSynthesizer<'_, E>,
    target_glyph_count: usize,
) -> String {
    let word_count = rng.range_usize_inclusive(1, max_words_for_target(target_glyph_count));
    let words: Vec<String> = (0..word_count)
        .map(|_| synthesizer.next(rng).text)
        .collect();
    words.join(" ")
}

/// A phrase that rendered to exactly the requested glyph count.
#[derive(Debug, Clone)]
pub struct PhraseCandidate {
    pub text: String,
    pub glyphs: Vec<GlyphShape>,
}

/// Assemble one phrase and accept it only on an exact glyph-count match.
pub fn select_phrase<W: WordEngine + ?Sized, S: ScriptEngine + ?Sized>(
    rng: &mut StreamRng,
    synthesizer: &WordSynthesizer<'_, W>,
    adapter: &RenderAdapter<'_, S>,
    target_glyph_count: usize,
) -> Option<PhraseCandidate> {
    let text = assemble_phrase(rng, synthesizer, target_glyph_count);
    let glyphs = adapter.probe(&text, false).ok()?;
    if glyphs.len() != target_glyph_count {
        return None;
    }
    Some(PhraseCandidate { text, glyphs })
}
