// Synthetic word builders: phonotactic, tiny, and letter-salad words.
//
// These produce plausible-looking but non-grammatical words directly from
// the phoneme tables, independent of the external grammar engine. Each
// builder takes `&mut StreamRng` for deterministic output.

use crate::tables;
use glyphloom_prng::StreamRng;

/// Truncate to at most `max` characters.
fn truncate_chars(word: String, max: usize) -> String {
    if word.chars().count() <= max {
        word
    } else {
        word.chars().take(max).collect()
    }
}

/// Phonotactic synthetic word: 2-4 syllables of onset + vowel, with a 50%
/// coda at each inner boundary and a 72% final coda. Truncated to 12 chars.
pub fn synthetic_word(rng: &mut StreamRng) -> String {
    let syllables = rng.range_usize_inclusive(2, 4);
    let mut word = String::new();
    word.push_str(*rng.pick(tables::START_ONSETS));
    word.push_str(*rng.pick(tables::VOWELS));

    for _ in 1..syllables {
        if rng.random_bool(0.5) {
            word.push_str(*rng.pick(tables::CODAS));
        }
        word.push_str(*rng.pick(tables::MID_ONSETS));
        word.push_str(*rng.pick(tables::VOWELS));
    }

    if rng.random_bool(0.72) {
        word.push_str(*rng.pick(tables::CODAS));
    }

    truncate_chars(word, 12)
}

/// Tiny word: onset + simple vowel, 35% simple coda. Truncated to 5 chars.
pub fn tiny_word(rng: &mut StreamRng) -> String {
    let mut word = String::new();
    word.push_str(*rng.pick(tables::START_ONSETS));
    word.push_str(*rng.pick(tables::SIMPLE_VOWELS));

    if rng.random_bool(0.35) {
        word.push_str(*rng.pick(tables::TINY_CODAS));
    }

    truncate_chars(word, 5)
}

/// Letter-salad word: an opener followed by random fragments until a
/// uniformly drawn target length in 3..=12 is reached, then truncated to
/// exactly that length.
pub fn letter_salad_word(rng: &mut StreamRng) -> String {
    let target_length = rng.range_usize_inclusive(3, 12);
    let mut word = String::new();
    word.push_str(*rng.pick(tables::LETTER_STARTS));

    while word.chars().count() < target_length {
        word.push_str(*rng.pick(tables::LETTER_PARTS));
    }

    truncate_chars(word, target_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_words_are_bounded_and_deterministic() {
        let mut a = StreamRng::new(42);
        let mut b = StreamRng::new(42);
        for _ in 0..200 {
            let wa = synthetic_word(&mut a);
            let wb = synthetic_word(&mut b);
            assert_eq!(wa, wb);
            assert!(!wa.is_empty());
            assert!(wa.chars().count() <= 12, "too long: {wa}");
        }
    }

    #[test]
    fn tiny_words_are_tiny() {
        let mut rng = StreamRng::new(7);
        for _ in 0..200 {
            let w = tiny_word(&mut rng);
            assert!((2..=5).contains(&w.chars().count()), "bad length: {w}");
        }
    }

    #[test]
    fn letter_salad_hits_its_target_length() {
        let mut rng = StreamRng::new(9);
        for _ in 0..200 {
            let w = letter_salad_word(&mut rng);
            assert!((3..=12).contains(&w.chars().count()), "bad length: {w}");
        }
    }

    #[test]
    fn builders_produce_variety() {
        let mut rng = StreamRng::new(11);
        let words: std::collections::BTreeSet<String> =
            (0..100).map(|_| synthetic_word(&mut rng)).collect();
        assert!(words.len() > 80, "expected variety, got {} unique", words.len());
    }
}
