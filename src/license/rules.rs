use regex::Regex;

/// "Free unless the license mentions `phrase`" heuristic.
///
/// The phrase must appear as whole words; case is ignored.
#[derive(Debug, Clone)]
pub struct ExclusionRule {
    pattern: Regex,
}

impl ExclusionRule {
    /// Panics if `phrase` cannot form a valid pattern; rules are built from
    /// static tables only.
    pub fn new(phrase: &'static str) -> Self {
        let source = format!(r"(?i)\b{}\b", regex::escape(phrase));
        let pattern = Regex::new(&source)
            .unwrap_or_else(|e| panic!("invalid exclusion pattern for {phrase:?}: {e}"));
        Self { pattern }
    }

    pub fn is_free(&self, license: &str) -> bool {
        !self.pattern.is_match(license)
    }
}
