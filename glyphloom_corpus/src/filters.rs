// Signature filters: literal path-signature rejection of unwanted shapes.
//
// Deliberately simple: a filter is a named, ordered list of literal string
// signatures matched against whitespace-collapsed content. No semantic
// shape classification. Adding or revising a signature never touches
// sampling or I/O logic.

/// The five quadratic-curve fragments that identify curved diacritics.
pub const CURLY_DIACRITIC_SIGNATURES: &[&str] = &[
    "q -6.55 11.7 -14.4 12.25",
    "q 6.55 -11.7 14.4 -12.25",
    "q -0.75 -5.3 -5.4 -8.4",
    "q 0.75 5.3 5.4 8.4",
    "q -3.3 5.85 -2.55 11.1",
];

/// The closed diamond that identifies the lone dot diacritic.
pub const DOT_DIACRITIC_SIGNATURES: &[&str] = &["l 7.5 7.5 l 7.5 -7.5 l -7.5 -7.5 l -7.5 7.5 z"];

/// A named signature predicate.
#[derive(Debug, Clone, Copy)]
pub struct SignatureFilter {
    pub name: &'static str,
    pub signatures: &'static [&'static str],
}

pub const CURLY_DIACRITIC_FILTER: SignatureFilter = SignatureFilter {
    name: "curly-diacritic",
    signatures: CURLY_DIACRITIC_SIGNATURES,
};

pub const DOT_DIACRITIC_FILTER: SignatureFilter = SignatureFilter {
    name: "dot-diacritic",
    signatures: DOT_DIACRITIC_SIGNATURES,
};

impl SignatureFilter {
    /// Does any signature occur in the whitespace-collapsed content?
    pub fn matches(&self, content: &str) -> bool {
        let normalized = collapse_whitespace(content);
        self.signatures.iter().any(|s| normalized.contains(s))
    }
}

fn collapse_whitespace(content: &str) -> String {
    content.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The active, ordered set of filters for a run.
#[derive(Debug, Default, Clone)]
pub struct FilterSet {
    filters: Vec<SignatureFilter>,
}

impl FilterSet {
    pub fn new() -> Self {
        FilterSet::default()
    }

    pub fn with(mut self, filter: SignatureFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Name of the first filter that rejects this content, if any.
    pub fn rejects(&self, content: &str) -> Option<&'static str> {
        self.filters
            .iter()
            .find(|f| f.matches(content))
            .map(|f| f.name)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_ignore_whitespace_runs() {
        let content = "<path d=\"m 7.2 0  q -6.55   11.7 -14.4\n12.25\"/>";
        assert!(CURLY_DIACRITIC_FILTER.matches(content));
    }

    #[test]
    fn non_matching_content_passes() {
        assert!(!CURLY_DIACRITIC_FILTER.matches("<path d=\"m 0 0 l 10 0\"/>"));
        assert!(!DOT_DIACRITIC_FILTER.matches("<path d=\"l 7.5 7.5 l 7.5 7.5\"/>"));
    }

    #[test]
    fn dot_filter_matches_the_diamond() {
        let content = "<path d=\"m -7.5 0 l 7.5 7.5 l 7.5 -7.5 l -7.5 -7.5 l -7.5 7.5 z\"/>";
        assert!(DOT_DIACRITIC_FILTER.matches(content));
    }

    #[test]
    fn filter_set_reports_the_first_match_in_order() {
        let set = FilterSet::new()
            .with(CURLY_DIACRITIC_FILTER)
            .with(DOT_DIACRITIC_FILTER);
        assert_eq!(set.rejects("q -3.3 5.85 -2.55 11.1"), Some("curly-diacritic"));
        assert_eq!(
            set.rejects("l 7.5 7.5 l 7.5 -7.5 l -7.5 -7.5 l -7.5 7.5 z"),
            Some("dot-diacritic")
        );
        assert_eq!(set.rejects("plain"), None);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn empty_set_rejects_nothing() {
        let set = FilterSet::new();
        assert!(set.is_empty());
        assert_eq!(set.rejects("q -6.55 11.7 -14.4 12.25"), None);
    }
}
