//! Per-repository license evaluators.
//!
//! - [`rules`]: "free unless it says X" heuristics.
//! - [`gentoo`]: tokenizer and recursive-descent evaluator for Gentoo `LICENSE` expressions.
//! - [`groups`]: the Gentoo free-license identifier set and its cache.

pub mod gentoo;
pub mod groups;
pub mod rules;

use groups::FreeLicenseCache;
use rules::ExclusionRule;

use crate::models::Verdict;

/// License check used by a reference repository that inspects license strings.
#[derive(Debug, Clone)]
pub enum Evaluator {
    Exclusion(ExclusionRule),
    Gentoo,
}

impl Evaluator {
    /// Evaluate one license string.
    ///
    /// Returns [`Verdict::Unknown`] only when the evaluator's supporting data
    /// is unavailable (the repository abstains). A blank license is never free.
    pub fn evaluate(&self, license: &str, free_licenses: &FreeLicenseCache) -> Verdict {
        match self {
            Evaluator::Exclusion(rule) => {
                Verdict::from(!license.trim().is_empty() && rule.is_free(license))
            }
            Evaluator::Gentoo => match free_licenses.get() {
                Some(free) => Verdict::from(gentoo::is_free(license, free)),
                None => Verdict::Unknown,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusion_rule_rejects_blank_license() {
        let evaluator = Evaluator::Exclusion(ExclusionRule::new("custom"));
        let cache = FreeLicenseCache::unavailable("unused");

        assert_eq!(evaluator.evaluate("GPL", &cache), Verdict::Free);
        assert_eq!(evaluator.evaluate("custom", &cache), Verdict::NonFree);
        assert_eq!(evaluator.evaluate("  ", &cache), Verdict::NonFree);
    }

    #[test]
    fn gentoo_abstains_without_identifiers() {
        let cache = FreeLicenseCache::unavailable("offline");
        assert_eq!(Evaluator::Gentoo.evaluate("MIT", &cache), Verdict::Unknown);
        // Abstention wins over the blank-license rule.
        assert_eq!(Evaluator::Gentoo.evaluate("", &cache), Verdict::Unknown);
    }

    #[test]
    fn gentoo_uses_injected_identifiers() {
        let cache = FreeLicenseCache::preloaded(["MIT"].into_iter().collect());
        assert_eq!(Evaluator::Gentoo.evaluate("MIT", &cache), Verdict::Free);
        assert_eq!(Evaluator::Gentoo.evaluate("EULA", &cache), Verdict::NonFree);
        assert_eq!(Evaluator::Gentoo.evaluate("", &cache), Verdict::NonFree);
    }
}
