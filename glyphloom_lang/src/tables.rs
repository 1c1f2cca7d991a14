// Phoneme and grammar-constraint tables for word synthesis.
//
// The phonotactic inventories drive the synthetic word builders in
// `synth.rs`; the grammar tables parameterize constraint randomization for
// the external word engine in `synthesizer.rs`. Duplicated empty entries in
// the coda table are intentional: a plain uniform pick over the table gives
// codas a built-in drop rate without a separate probability roll.

/// Onsets allowed at the start of a synthetic word.
pub const START_ONSETS: &[&str] = &[
    "m", "k", "b", "t", "d", "n", "r", "s", "l", "v", "g", "p", "f", "h", "z", "sh", "ch", "th",
    "dr", "kr", "gr", "br", "tr", "kl", "bl", "st", "sk", "sp", "sn", "sm", "pl", "pr",
];

/// Onsets allowed at syllable boundaries inside a word.
pub const MID_ONSETS: &[&str] = &[
    "m", "k", "b", "t", "d", "n", "r", "s", "l", "v", "g", "p", "f", "h", "z", "sh", "ch", "th",
    "dr", "kr", "gr", "br", "tr", "kl", "bl", "st", "sk", "sp", "sn", "sm", "pl", "pr", "y", "w",
    "nj",
];

/// Vowel nuclei, including the six diphthongs.
pub const VOWELS: &[&str] = &["e", "i", "o", "u", "a", "ai", "ei", "ia", "io", "oa", "ou"];

/// Codas. The three empty entries make a bare syllable three times as
/// likely as any single consonant coda under a uniform pick.
pub const CODAS: &[&str] = &[
    "", "", "", "n", "r", "l", "s", "m", "k", "t", "d", "g", "sh", "ch", "j", "nj", "nd", "rk",
    "rt",
];

/// Simple vowels for tiny words (no diphthongs).
pub const SIMPLE_VOWELS: &[&str] = &["e", "i", "o", "u", "a"];

/// Codas for tiny words.
pub const TINY_CODAS: &[&str] = &["", "n", "r", "l", "s", "k", "t"];

/// Openers for letter-salad words: single letters plus common digraphs.
pub const LETTER_STARTS: &[&str] = &[
    "e", "i", "o", "u", "b", "c", "d", "f", "g", "h", "j", "k", "l", "m", "n", "p", "q", "r", "s",
    "t", "v", "w", "x", "y", "z", "ch", "sh", "th", "kh", "ph", "ts", "tr", "kr", "gr", "pl", "br",
    "dr", "st", "sk", "sp", "sn", "sm", "hl", "hr", "hm", "hn",
];

/// Continuation fragments for letter-salad words.
pub const LETTER_PARTS: &[&str] = &[
    "a", "e", "i", "o", "u", "w", "y", "h", "r", "l", "m", "n", "p", "t", "k", "s", "f", "v", "z",
    "ch", "sh", "th", "kh", "ts", "tr", "kr", "gr", "pl", "br", "dr", "st", "sk", "sp", "sn", "sm",
    "ae", "ai", "ei", "io", "ou", "oa", "ui", "ia", "eo", "ue", "'",
];

/// Valence/aspect codes the dense formative builder may request.
pub const VN_CODES: &[&str] = &[
    "RTR", "PRG", "REP", "PCL", "CNT", "ATP", "DUP", "MNO", "1:BEN", "3:DET",
];

/// Slot-V affix consonants the dense formative builder may request.
pub const SLOT_V_CS: &[&str] = &["k", "t", "r", "s", "c", "kl", "kr"];

/// Affix degrees are 1..=9; used for uniform degree picks.
pub const AFFIX_DEGREES: &[u8] = &[1, 2, 3, 4, 5, 6, 7, 8, 9];

/// Affix slot kinds (type-1 and type-2 affixes).
pub const AFFIX_KINDS: &[u8] = &[1, 2];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mid_onsets_extend_start_onsets() {
        for onset in START_ONSETS {
            assert!(MID_ONSETS.contains(onset), "missing mid onset {onset:?}");
        }
        assert_eq!(MID_ONSETS.len(), START_ONSETS.len() + 3);
    }

    #[test]
    fn coda_table_has_empty_slots() {
        assert_eq!(CODAS.iter().filter(|c| c.is_empty()).count(), 3);
    }

    #[test]
    fn simple_vowels_exclude_diphthongs() {
        for v in SIMPLE_VOWELS {
            assert_eq!(v.chars().count(), 1);
        }
    }

    #[test]
    fn letter_tables_nonempty_fragments() {
        assert!(LETTER_STARTS.iter().all(|s| !s.is_empty()));
        assert!(LETTER_PARTS.iter().all(|s| !s.is_empty()));
    }
}
