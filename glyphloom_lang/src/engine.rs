// Word-generation capability: the grammar/morphology engine seam.
//
// The corpus pipeline never constructs grammatical words itself — it asks a
// `WordEngine` and treats `InvalidCombination` as an expected, retryable
// outcome. `RootLexicon` is the built-in engine: a root inventory embedded
// at compile time plus a compact agglutinative morphology. It exists so the
// builder binaries and the test suite run end-to-end without an external
// linguistic stack; anything implementing the trait can replace it.

use crate::types::{Case, FormativeType, Specification, WordConstraints};
use thiserror::Error;

/// Rejection reasons for constraint combinations the grammar disallows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidCombination {
    #[error("empty root")]
    EmptyRoot,
    #[error("shortcut stems cannot carry slot V affixes")]
    ShortcutWithAffixes,
    #[error("case marking is not available on framed words")]
    CaseOnFramed,
    #[error("root {0:?} does not permit a shortcut stem")]
    ShortcutRoot(String),
    #[error("unknown valence/aspect code {0:?}")]
    UnknownVn(String),
    #[error("unknown slot V affix consonant {0:?}")]
    UnknownAffix(String),
    #[error("affix degree {0} out of range 1..=9")]
    DegreeOutOfRange(u8),
}

/// The word-generation capability.
pub trait WordEngine {
    /// Every root the engine knows, in lexicon order. Callers typically
    /// filter this (placeholder entries contain `[`).
    fn root_inventory(&self) -> Vec<String>;

    /// Build a word from a constraint set, or reject the combination.
    fn generate(&self, constraints: &WordConstraints) -> Result<String, InvalidCombination>;
}

/// One root lexicon entry.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RootEntry {
    pub root: String,
    pub gloss: String,
}

#[derive(Debug, serde::Deserialize)]
struct RootLexiconFile {
    roots: Vec<RootEntry>,
}

/// Built-in grammar engine over an embedded root lexicon.
///
/// Morphology: `root + stem vowel (+ affixes) (+ valence) (+ case
/// ending)`, with framed words carrying the `a-` register prefix instead
/// of a case ending. Shortcut stems replace the plain stem vowel with a
/// diphthong and are only available on one- or two-letter roots. The
/// vowel tables deliberately include a few non-ASCII values, and the
/// framed prefix yields `a`-initial (and, with `w`-roots, `aw`-initial)
/// words — downstream acceptance biases depend on such words actually
/// occurring.
#[derive(Debug, Clone)]
pub struct RootLexicon {
    entries: Vec<RootEntry>,
}

/// Stem vowels by specification, plain and shortcut variants.
fn stem_vowel(spec: Specification, shortcut: bool) -> &'static str {
    match (spec, shortcut) {
        (Specification::Basic, false) => "a",
        (Specification::Contential, false) => "e",
        (Specification::Constitutive, false) => "i",
        (Specification::Objective, false) => "o",
        (Specification::Basic, true) => "ai",
        (Specification::Contential, true) => "ei",
        (Specification::Constitutive, true) => "io",
        (Specification::Objective, true) => "oa",
    }
}

/// Degree vowels for slot-V affixes, degrees 1..=9.
const DEGREE_VOWELS: [&str; 9] = ["a", "ä", "e", "i", "ëi", "ö", "o", "ü", "u"];

/// Valence/aspect suffixes, keyed by code.
const VN_SUFFIXES: [(&str, &str); 10] = [
    ("RTR", "at"),
    ("PRG", "et"),
    ("REP", "it"),
    ("PCL", "ot"),
    ("CNT", "ut"),
    ("ATP", "ât"),
    ("DUP", "ôt"),
    ("MNO", "êt"),
    ("1:BEN", "ia"),
    ("3:DET", "ao"),
];

/// Case endings for unframed carrier words. Thematic is unmarked.
fn case_ending(case: Case) -> &'static str {
    match case {
        Case::Thematic => "",
        Case::Absolutive => "l",
        Case::Ergative => "r",
        Case::Affective => "s",
        Case::Stimulative => "t",
        Case::Instrumental => "v",
    }
}

impl RootLexicon {
    /// Parse a root lexicon from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: RootLexiconFile = serde_json::from_str(json)?;
        Ok(RootLexicon {
            entries: file.roots,
        })
    }

    /// All lexicon entries, in file order.
    pub fn entries(&self) -> &[RootEntry] {
        &self.entries
    }
}

impl WordEngine for RootLexicon {
    fn root_inventory(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.root.clone()).collect()
    }

    fn generate(&self, c: &WordConstraints) -> Result<String, InvalidCombination> {
        if c.root.is_empty() {
            return Err(InvalidCombination::EmptyRoot);
        }
        if c.shortcut && !c.slot_v_affixes.is_empty() {
            return Err(InvalidCombination::ShortcutWithAffixes);
        }
        if c.word_type == FormativeType::Framed && c.case.is_some() {
            return Err(InvalidCombination::CaseOnFramed);
        }
        if c.shortcut && c.root.chars().count() > 2 {
            return Err(InvalidCombination::ShortcutRoot(c.root.clone()));
        }

        let mut word = String::new();
        word.push_str(&c.root);
        word.push_str(stem_vowel(c.specification, c.shortcut));

        for affix in &c.slot_v_affixes {
            if !crate::tables::SLOT_V_CS.contains(&affix.cs.as_str()) {
                return Err(InvalidCombination::UnknownAffix(affix.cs.clone()));
            }
            if !(1..=9).contains(&affix.degree) {
                return Err(InvalidCombination::DegreeOutOfRange(affix.degree));
            }
            word.push_str(&affix.cs);
            word.push_str(DEGREE_VOWELS[(affix.degree - 1) as usize]);
        }

        if let Some(vn) = &c.vn {
            let suffix = VN_SUFFIXES
                .iter()
                .find(|(code, _)| code == vn)
                .map(|(_, suffix)| *suffix)
                .ok_or_else(|| InvalidCombination::UnknownVn(vn.clone()))?;
            word.push_str(suffix);
        }

        match c.word_type {
            FormativeType::UnframedCarrier => {
                if let Some(case) = c.case {
                    word.push_str(case_ending(case));
                }
            }
            FormativeType::Framed => word.insert(0, 'a'),
        }

        Ok(word)
    }
}

/// Load the default root lexicon embedded at compile time.
///
/// Panics if the embedded JSON is malformed (cannot happen in a released
/// build; the test suite loads it).
pub fn default_roots() -> RootLexicon {
    let json = include_str!("../../data/root_lexicon.json");
    RootLexicon::from_json(json).expect("embedded root_lexicon.json is malformed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AffixSlot;

    fn constraints(root: &str) -> WordConstraints {
        WordConstraints {
            word_type: FormativeType::UnframedCarrier,
            root: root.to_string(),
            shortcut: false,
            specification: Specification::Basic,
            case: Some(Case::Thematic),
            vn: None,
            slot_v_affixes: Vec::new(),
        }
    }

    #[test]
    fn default_roots_load() {
        let lexicon = default_roots();
        assert!(
            lexicon.entries().len() >= 40,
            "expected >= 40 roots, got {}",
            lexicon.entries().len()
        );
    }

    #[test]
    fn inventory_contains_placeholder_roots() {
        // The distribution lexicon carries placeholder variants (with `[`)
        // that callers are expected to filter out.
        let lexicon = default_roots();
        assert!(lexicon.root_inventory().iter().any(|r| r.contains('[')));
    }

    #[test]
    fn basic_word_is_root_plus_stem_vowel() {
        let lexicon = default_roots();
        let word = lexicon.generate(&constraints("kr")).unwrap();
        assert_eq!(word, "kra");
    }

    #[test]
    fn case_endings_applied() {
        let lexicon = default_roots();
        let mut c = constraints("st");
        c.case = Some(Case::Ergative);
        assert_eq!(lexicon.generate(&c).unwrap(), "star");
    }

    #[test]
    fn framed_words_take_the_register_prefix() {
        let lexicon = default_roots();
        let mut c = constraints("dr");
        c.word_type = FormativeType::Framed;
        c.case = None;
        assert_eq!(lexicon.generate(&c).unwrap(), "adra");

        // w-roots give the aw- opening the acceptance biases target.
        let mut c = constraints("wr");
        c.word_type = FormativeType::Framed;
        c.case = None;
        assert_eq!(lexicon.generate(&c).unwrap(), "awra");
    }

    #[test]
    fn framed_with_case_is_invalid() {
        let lexicon = default_roots();
        let mut c = constraints("dr");
        c.word_type = FormativeType::Framed;
        assert_eq!(
            lexicon.generate(&c),
            Err(InvalidCombination::CaseOnFramed)
        );
    }

    #[test]
    fn shortcut_requires_short_root() {
        let lexicon = default_roots();
        let mut c = constraints("mal");
        c.shortcut = true;
        assert!(matches!(
            lexicon.generate(&c),
            Err(InvalidCombination::ShortcutRoot(_))
        ));

        let mut c = constraints("kr");
        c.shortcut = true;
        assert_eq!(lexicon.generate(&c).unwrap(), "krai");
    }

    #[test]
    fn shortcut_rejects_affixes() {
        let lexicon = default_roots();
        let mut c = constraints("kr");
        c.shortcut = true;
        c.slot_v_affixes = vec![AffixSlot {
            kind: 1,
            degree: 3,
            cs: "k".to_string(),
        }];
        assert_eq!(
            lexicon.generate(&c),
            Err(InvalidCombination::ShortcutWithAffixes)
        );
    }

    #[test]
    fn affixes_and_valence_are_appended() {
        let lexicon = default_roots();
        let mut c = constraints("kr");
        c.slot_v_affixes = vec![AffixSlot {
            kind: 2,
            degree: 3,
            cs: "kl".to_string(),
        }];
        c.vn = Some("RTR".to_string());
        assert_eq!(lexicon.generate(&c).unwrap(), "krakleat");
    }

    #[test]
    fn unknown_affix_and_vn_rejected() {
        let lexicon = default_roots();
        let mut c = constraints("kr");
        c.slot_v_affixes = vec![AffixSlot {
            kind: 1,
            degree: 2,
            cs: "zz".to_string(),
        }];
        assert!(matches!(
            lexicon.generate(&c),
            Err(InvalidCombination::UnknownAffix(_))
        ));

        let mut c = constraints("kr");
        c.vn = Some("XYZ".to_string());
        assert!(matches!(
            lexicon.generate(&c),
            Err(InvalidCombination::UnknownVn(_))
        ));
    }

    #[test]
    fn degree_range_enforced() {
        let lexicon = default_roots();
        let mut c = constraints("kr");
        c.slot_v_affixes = vec![AffixSlot {
            kind: 1,
            degree: 0,
            cs: "k".to_string(),
        }];
        assert_eq!(
            lexicon.generate(&c),
            Err(InvalidCombination::DegreeOutOfRange(0))
        );
    }

    #[test]
    fn some_degree_vowels_are_non_ascii() {
        // The acceptance-bias path for non-ASCII candidates depends on the
        // engine actually producing such words.
        let lexicon = default_roots();
        let mut c = constraints("kr");
        c.slot_v_affixes = vec![AffixSlot {
            kind: 1,
            degree: 2,
            cs: "t".to_string(),
        }];
        let word = lexicon.generate(&c).unwrap();
        assert!(!word.is_ascii(), "degree 2 vowel should be non-ASCII: {word}");
    }
}
