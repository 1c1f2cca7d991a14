// Mode-weighted candidate word generation with bounded retries.
//
// Each call to `next` rolls a synthesis mode from the active profile's
// weight table, builds a candidate, and applies the post-generation
// acceptance biases. The loop is bounded by the profile's attempt ceiling;
// on exhaustion the constant fallback word is returned so callers never
// block. The biases are tuned aesthetic preferences, not correctness
// rules — they live here as named constants so they can be adjusted
// without touching the pipeline.

use crate::engine::WordEngine;
use crate::synth::{letter_salad_word, synthetic_word, tiny_word};
use crate::tables;
use crate::types::{
    AffixSlot, Candidate, Case, FormativeType, Specification, SynthMode, WordConstraints,
};
use glyphloom_prng::StreamRng;

/// Returned when a profile's attempt ceiling is exhausted.
pub const FALLBACK_WORD: &str = "Q2mare";

/// Register prefix applied to register-synthetic words.
pub const REGISTER_PREFIX: &str = "Q2";

/// Probability of discarding a candidate that contains non-ASCII
/// characters. The stream is only consulted when non-ASCII is present.
pub const NON_ASCII_REJECT_P: f64 = 0.9;

/// Pool profile: probability of discarding a candidate starting with "aw".
pub const POOL_LEADING_AW_REJECT_P: f64 = 0.95;

/// Pool profile: probability of discarding a candidate starting with "a".
pub const POOL_LEADING_A_REJECT_P: f64 = 0.8;

/// Slice profile: leading "aw"/"a" candidates are always discarded.
pub const SLICE_LEADING_AW_REJECT_P: f64 = 1.0;
pub const SLICE_LEADING_A_REJECT_P: f64 = 1.0;

/// Attempt ceilings per profile.
const POOL_ATTEMPT_CEILING: usize = 160;
const SLICE_ATTEMPT_CEILING: usize = 220;

/// Which mode-weight table and bias set to use.
///
/// The pool profile favors phonotactic synthetics (single words for sprite
/// pools); the slice profile favors affix-dense grammatical words and
/// letter salads (longer phrases for glyph slicing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthProfile {
    Pool,
    Slice,
}

impl SynthProfile {
    fn attempt_ceiling(self) -> usize {
        match self {
            SynthProfile::Pool => POOL_ATTEMPT_CEILING,
            SynthProfile::Slice => SLICE_ATTEMPT_CEILING,
        }
    }

    fn leading_aw_reject_p(self) -> f64 {
        match self {
            SynthProfile::Pool => POOL_LEADING_AW_REJECT_P,
            SynthProfile::Slice => SLICE_LEADING_AW_REJECT_P,
        }
    }

    fn leading_a_reject_p(self) -> f64 {
        match self {
            SynthProfile::Pool => POOL_LEADING_A_REJECT_P,
            SynthProfile::Slice => SLICE_LEADING_A_REJECT_P,
        }
    }
}

/// Grammatical word via the engine: uniform type/root/specification, 50%
/// shortcut, a case only on unframed carriers. Up to 50 constraint draws;
/// `InvalidCombination` rejections are retried silently.
pub fn formative_word<E: WordEngine + ?Sized>(
    rng: &mut StreamRng,
    roots: &[String],
    engine: &E,
) -> Option<String> {
    if roots.is_empty() {
        return None;
    }
    for _ in 0..50 {
        let word_type = *rng.pick(FormativeType::ALL);
        let constraints = WordConstraints {
            word_type,
            root: rng.pick(roots).clone(),
            shortcut: rng.random_bool(0.5),
            specification: *rng.pick(Specification::ALL),
            case: match word_type {
                FormativeType::UnframedCarrier => Some(*rng.pick(Case::ALL)),
                FormativeType::Framed => None,
            },
            vn: None,
            slot_v_affixes: Vec::new(),
        };
        if let Ok(word) = engine.generate(&constraints) {
            if !word.is_empty() {
                return Some(word);
            }
        }
    }
    None
}

/// Affix-dense grammatical word: 75% one slot-V affix, 70% a valence code,
/// otherwise as `formative_word`. Up to 80 constraint draws.
pub fn dense_formative_word<E: WordEngine + ?Sized>(
    rng: &mut StreamRng,
    roots: &[String],
    engine: &E,
) -> Option<String> {
    if roots.is_empty() {
        return None;
    }
    for _ in 0..80 {
        let word_type = *rng.pick(FormativeType::ALL);
        let slot_v_affixes = if rng.random_bool(0.75) {
            vec![AffixSlot {
                kind: *rng.pick(tables::AFFIX_KINDS),
                degree: *rng.pick(tables::AFFIX_DEGREES),
                cs: rng.pick(tables::SLOT_V_CS).to_string(),
            }]
        } else {
            Vec::new()
        };
        let constraints = WordConstraints {
            word_type,
            root: rng.pick(roots).clone(),
            shortcut: rng.random_bool(0.5),
            specification: *rng.pick(Specification::ALL),
            case: match word_type {
                FormativeType::UnframedCarrier => Some(*rng.pick(Case::ALL)),
                FormativeType::Framed => None,
            },
            vn: if rng.random_bool(0.7) {
                Some(rng.pick(tables::VN_CODES).to_string())
            } else {
                None
            },
            slot_v_affixes,
        };
        if let Ok(word) = engine.generate(&constraints) {
            if !word.is_empty() {
                return Some(word);
            }
        }
    }
    None
}

/// Mode-weighted candidate word generator over an injected grammar engine.
pub struct WordSynthesizer<'a, E: WordEngine + ?Sized> {
    engine: &'a E,
    roots: Vec<String>,
    profile: SynthProfile,
}

impl<'a, E: WordEngine + ?Sized> WordSynthesizer<'a, E> {
    /// Build a synthesizer over the engine's usable roots: placeholder
    /// entries (containing `[`) and empty roots are excluded.
    pub fn new(engine: &'a E, profile: SynthProfile) -> Self {
        let roots = engine
            .root_inventory()
            .into_iter()
            .filter(|root| !root.is_empty() && !root.contains('['))
            .collect();
        WordSynthesizer {
            engine,
            roots,
            profile,
        }
    }

    /// Usable (filtered) roots. Empty means the engine cannot back
    /// grammatical modes; callers treat that as a missing dependency.
    pub fn usable_roots(&self) -> &[String] {
        &self.roots
    }

    /// Generate the next candidate word.
    ///
    /// Rolls a mode, builds a candidate, applies the acceptance biases;
    /// retries up to the profile's ceiling, then yields the fallback.
    pub fn next(&self, rng: &mut StreamRng) -> Candidate {
        for _ in 0..self.profile.attempt_ceiling() {
            let roll = rng.next_f64();
            let (candidate, mode) = match self.profile {
                SynthProfile::Pool => {
                    if roll < 0.08 {
                        (
                            formative_word(rng, &self.roots, self.engine),
                            SynthMode::Formative,
                        )
                    } else if roll < 0.28 {
                        (Some(tiny_word(rng)), SynthMode::Tiny)
                    } else if roll < 0.92 {
                        (Some(synthetic_word(rng)), SynthMode::Synthetic)
                    } else {
                        (
                            Some(format!("{REGISTER_PREFIX}{}", synthetic_word(rng))),
                            SynthMode::RegisterSynthetic,
                        )
                    }
                }
                SynthProfile::Slice => {
                    if roll < 0.58 {
                        (
                            dense_formative_word(rng, &self.roots, self.engine),
                            SynthMode::DenseFormative,
                        )
                    } else if roll < 0.82 {
                        (Some(letter_salad_word(rng)), SynthMode::LetterSalad)
                    } else if roll < 0.90 {
                        (Some(synthetic_word(rng)), SynthMode::Synthetic)
                    } else if roll < 0.96 {
                        (Some(tiny_word(rng)), SynthMode::Tiny)
                    } else {
                        (
                            formative_word(rng, &self.roots, self.engine),
                            SynthMode::Formative,
                        )
                    }
                }
            };

            let Some(text) = candidate else {
                continue;
            };

            if self.reject_leading_a(&text, rng) {
                continue;
            }

            if !text.is_ascii() && rng.random_bool(NON_ASCII_REJECT_P) {
                continue;
            }

            return Candidate { text, mode };
        }

        Candidate {
            text: FALLBACK_WORD.to_string(),
            mode: SynthMode::Fallback,
        }
    }

    /// Leading-"a" bias. A probability of 1.0 rejects without consuming a
    /// stream draw, so hard-reject profiles don't perturb the sequence.
    fn reject_leading_a(&self, word: &str, rng: &mut StreamRng) -> bool {
        let lower = word.to_lowercase();
        if lower.starts_with("aw") {
            biased_reject(rng, self.profile.leading_aw_reject_p())
        } else if lower.starts_with('a') {
            biased_reject(rng, self.profile.leading_a_reject_p())
        } else {
            false
        }
    }
}

fn biased_reject(rng: &mut StreamRng, p: f64) -> bool {
    if p >= 1.0 {
        return true;
    }
    rng.random_bool(p)
}
