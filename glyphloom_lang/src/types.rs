// Core types for word synthesis: grammar constraint parameters and the
// synthesis mode tag carried by every generated candidate.

use serde::{Deserialize, Serialize};

/// Word type requested from the grammar engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormativeType {
    /// Unframed formative (carries a case ending).
    UnframedCarrier,
    /// Framed formative (no case ending; framed register marker instead).
    Framed,
}

impl FormativeType {
    /// All types, for uniform constraint picks.
    pub const ALL: &'static [FormativeType] =
        &[FormativeType::UnframedCarrier, FormativeType::Framed];

    /// Canonical code, as recorded in manifests and diagnostics.
    pub fn code(self) -> &'static str {
        match self {
            FormativeType::UnframedCarrier => "UNF/C",
            FormativeType::Framed => "FRM",
        }
    }
}

/// Stem specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Specification {
    Basic,
    Contential,
    Constitutive,
    Objective,
}

impl Specification {
    pub const ALL: &'static [Specification] = &[
        Specification::Basic,
        Specification::Contential,
        Specification::Constitutive,
        Specification::Objective,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Specification::Basic => "BSC",
            Specification::Contential => "CTE",
            Specification::Constitutive => "CSV",
            Specification::Objective => "OBJ",
        }
    }
}

/// Case ending for unframed carrier words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Case {
    Thematic,
    Absolutive,
    Ergative,
    Affective,
    Stimulative,
    Instrumental,
}

impl Case {
    pub const ALL: &'static [Case] = &[
        Case::Thematic,
        Case::Absolutive,
        Case::Ergative,
        Case::Affective,
        Case::Stimulative,
        Case::Instrumental,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Case::Thematic => "THM",
            Case::Absolutive => "ABS",
            Case::Ergative => "ERG",
            Case::Affective => "AFF",
            Case::Stimulative => "STM",
            Case::Instrumental => "INS",
        }
    }
}

/// One slot-V affix request: kind (type-1 or type-2), degree 1..=9, and the
/// affix consonant form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffixSlot {
    pub kind: u8,
    pub degree: u8,
    pub cs: String,
}

/// Full constraint set passed to a `WordEngine`.
///
/// Not every combination is linguistically valid; the engine rejects
/// invalid ones with `InvalidCombination` and the caller retries with a
/// fresh draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordConstraints {
    pub word_type: FormativeType,
    pub root: String,
    pub shortcut: bool,
    pub specification: Specification,
    pub case: Option<Case>,
    pub vn: Option<String>,
    pub slot_v_affixes: Vec<AffixSlot>,
}

/// How a candidate word was synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SynthMode {
    /// Grammatical word from the external engine.
    Formative,
    /// Affix-dense grammatical word from the external engine.
    DenseFormative,
    /// Phonotactic synthetic word (onset/vowel/coda tables).
    Synthetic,
    /// Register-prefixed synthetic word.
    RegisterSynthetic,
    /// Short CV(C) word.
    Tiny,
    /// Unconstrained letter salad.
    LetterSalad,
    /// Constant fallback after attempt-ceiling exhaustion.
    Fallback,
}

/// A generated candidate word or phrase with its synthesis mode tag.
/// Ephemeral: discarded wholesale when any downstream gate rejects it.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub text: String,
    pub mode: SynthMode,
}
