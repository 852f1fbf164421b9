use caseless::default_case_fold_str;

/// How the phrase set combines into a per-line predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Every phrase must be contained in the line (logical AND)
    All,
    /// At least one phrase must be contained in the line (logical OR)
    Any,
}

/// Evaluates the phrase predicate against individual lines.
///
/// Phrases are prepared once at construction: when `ignore_case` is set,
/// each phrase is run through full Unicode case folding (not ASCII
/// lowercasing), so `"STRASSE"` matches a line containing `"straße"`.
/// Matching is plain substring containment; there is no regex or glob
/// interpretation of any kind.
///
/// An empty phrase is trivially contained in every line. The constructor
/// does not reject it; callers that consider it meaningless should filter
/// before constructing.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    phrases: Vec<String>,
    mode: MatchMode,
    ignore_case: bool,
}

impl PhraseMatcher {
    /// Creates a matcher with phrases prepared for the given case mode
    pub fn new(phrases: Vec<String>, ignore_case: bool, mode: MatchMode) -> Self {
        let phrases = if ignore_case {
            phrases.iter().map(|p| default_case_fold_str(p)).collect()
        } else {
            phrases
        };

        Self {
            phrases,
            mode,
            ignore_case,
        }
    }

    /// Number of prepared phrases
    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    /// Tests one line against the phrase predicate.
    ///
    /// `line` should already have its trailing newline stripped; everything
    /// else (leading spaces, embedded control characters) participates in
    /// the comparison verbatim.
    pub fn is_match(&self, line: &str) -> bool {
        if self.ignore_case {
            let folded = default_case_fold_str(line);
            self.evaluate(&folded)
        } else {
            self.evaluate(line)
        }
    }

    fn evaluate(&self, haystack: &str) -> bool {
        match self.mode {
            MatchMode::All => self.phrases.iter().all(|p| haystack.contains(p.as_str())),
            MatchMode::Any => self.phrases.iter().any(|p| haystack.contains(p.as_str())),
        }
    }
}
