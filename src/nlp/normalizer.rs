//! Input text normalization

/// Text normalizer: lowercases, collapses whitespace, expands contractions.
///
/// Contractions are expanded by literal substring replacement in table
/// order, so a later replacement may act on text already rewritten by an
/// earlier one. The table order is fixed at construction.
pub struct TextNormalizer {
    contractions: Vec<(&'static str, &'static str)>,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            contractions: vec![
                ("don't", "do not"),
                ("won't", "will not"),
                ("can't", "cannot"),
                ("i'm", "i am"),
                ("you're", "you are"),
                ("it's", "it is"),
                ("we're", "we are"),
                ("they're", "they are"),
                ("isn't", "is not"),
                ("aren't", "are not"),
                ("wasn't", "was not"),
                ("weren't", "were not"),
                ("haven't", "have not"),
                ("hasn't", "has not"),
                ("hadn't", "had not"),
                ("doesn't", "does not"),
                ("didn't", "did not"),
            ],
        }
    }

    /// Normalize raw input: lowercase, single-space whitespace runs, trim,
    /// then expand contractions. Empty input yields empty output.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let mut collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");

        for (contraction, expansion) in &self.contractions {
            if collapsed.contains(contraction) {
                collapsed = collapsed.replace(contraction, expansion);
            }
        }

        collapsed
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
