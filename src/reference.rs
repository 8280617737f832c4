//! Reference repositories: trusted sources of license information.
//!
//! Lookup walks the table in order and returns the first entry whose patterns
//! match, so entry order encodes priority.

use std::sync::LazyLock;

use regex::Regex;

use crate::license::rules::ExclusionRule;
use crate::license::Evaluator;

/// How a reference repository pronounces on a package.
#[derive(Debug, Clone)]
pub enum RepositoryRule {
    /// Every package in the repository gets this verdict (`true` = free).
    Fixed(bool),
    /// Each license string of the package is inspected.
    Evaluator(Evaluator),
}

#[derive(Debug, Clone)]
pub struct ReferenceRepository {
    pub name: &'static str,
    repo: Regex,
    subrepo: Option<Regex>,
    pub rule: RepositoryRule,
}

impl ReferenceRepository {
    /// Panics on an invalid pattern: the table is static, so a bad entry is a
    /// programming error that must not be mistaken for an abstention.
    pub fn new(
        name: &'static str,
        repo: &str,
        subrepo: Option<&str>,
        rule: RepositoryRule,
    ) -> Self {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .unwrap_or_else(|e| panic!("invalid pattern {pattern:?} for {name}: {e}"))
        };
        Self {
            name,
            repo: compile(repo),
            subrepo: subrepo.map(compile),
            rule,
        }
    }

    pub fn matches(&self, repo: &str, subrepo: Option<&str>) -> bool {
        if !self.repo.is_match(repo) {
            return false;
        }
        match (&self.subrepo, subrepo) {
            (None, _) => true,
            (Some(pattern), Some(subrepo)) => pattern.is_match(subrepo),
            (Some(_), None) => false,
        }
    }
}

/// Ordered list of reference repositories.
#[derive(Debug, Clone)]
pub struct ReferenceRegistry {
    repositories: Vec<ReferenceRepository>,
}

static BUILTIN: LazyLock<ReferenceRegistry> = LazyLock::new(|| {
    ReferenceRegistry::new(vec![
        ReferenceRepository::new(
            "arch",
            "^arch$",
            None,
            RepositoryRule::Evaluator(Evaluator::Exclusion(ExclusionRule::new("custom"))),
        ),
        ReferenceRepository::new(
            "debian-main",
            "^debian_",
            Some("^main$"),
            RepositoryRule::Fixed(true),
        ),
        ReferenceRepository::new(
            "debian-contrib",
            "^debian_",
            Some("^contrib$"),
            RepositoryRule::Fixed(true),
        ),
        ReferenceRepository::new(
            "debian-non-free",
            "^debian_",
            Some("^non-free"),
            RepositoryRule::Fixed(false),
        ),
        ReferenceRepository::new(
            "fedora",
            "^fedora_",
            None,
            RepositoryRule::Evaluator(Evaluator::Exclusion(ExclusionRule::new(
                "no modification permitted",
            ))),
        ),
        ReferenceRepository::new(
            "gentoo",
            "^gentoo$",
            None,
            RepositoryRule::Evaluator(Evaluator::Gentoo),
        ),
        ReferenceRepository::new("gnuguix", "^gnuguix$", None, RepositoryRule::Fixed(true)),
    ])
});

impl ReferenceRegistry {
    pub fn new(repositories: Vec<ReferenceRepository>) -> Self {
        Self { repositories }
    }

    /// The built-in reference table.
    pub fn builtin() -> &'static ReferenceRegistry {
        &BUILTIN
    }

    /// First repository matching `repo` and `subrepo`, with its position in
    /// the table. The position identifies the entry within this registry.
    pub fn find(&self, repo: &str, subrepo: Option<&str>) -> Option<(usize, &ReferenceRepository)> {
        self.repositories
            .iter()
            .enumerate()
            .find(|(_, r)| r.matches(repo, subrepo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("arch", None, Some("arch"))]
    #[case("arch", Some("extra"), Some("arch"))]
    #[case("archlinux", None, None)]
    #[case("debian_12", Some("main"), Some("debian-main"))]
    #[case("debian_unstable", Some("contrib"), Some("debian-contrib"))]
    #[case("debian_12", Some("non-free"), Some("debian-non-free"))]
    #[case("debian_12", Some("non-free-firmware"), Some("debian-non-free"))]
    #[case("debian_12", Some("mainline"), None)]
    #[case("debian_12", None, None)]
    #[case("fedora_40", None, Some("fedora"))]
    #[case("gentoo", None, Some("gentoo"))]
    #[case("gnuguix", None, Some("gnuguix"))]
    #[case("freebsd", None, None)]
    fn finds_builtin_repositories(
        #[case] repo: &str,
        #[case] subrepo: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let found = ReferenceRegistry::builtin()
            .find(repo, subrepo)
            .map(|(_, r)| r.name);
        assert_eq!(found, expected);
    }

    #[test]
    fn first_match_wins() {
        let registry = ReferenceRegistry::new(vec![
            ReferenceRepository::new("specific", "^foo$", Some("^bar$"), RepositoryRule::Fixed(false)),
            ReferenceRepository::new("catch-all", "^foo", None, RepositoryRule::Fixed(true)),
            ReferenceRepository::new("shadowed", "^foo$", None, RepositoryRule::Fixed(false)),
        ]);

        assert_eq!(registry.find("foo", Some("bar")).map(|(i, _)| i), Some(0));
        assert_eq!(registry.find("foo", Some("baz")).map(|(i, _)| i), Some(1));
        assert_eq!(registry.find("foo", None).map(|(i, _)| i), Some(1));
    }

    #[test]
    #[should_panic(expected = "invalid pattern")]
    fn invalid_static_pattern_aborts() {
        ReferenceRepository::new("broken", "(", None, RepositoryRule::Fixed(true));
    }
}
