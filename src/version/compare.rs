use std::cmp::Ordering;

use crate::version::tokenizer::{tokenize, Component, ComponentValue};

static PADDING: Component = Component::ZERO;

/// Compare two version strings.
///
/// Components are compared pairwise; the shorter version is padded with
/// [`Component::ZERO`], so `1.0` and `1.0.0` are equal. Alphabetic components
/// of equal rank compare by their first letter only, ignoring case.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    compare_components(&tokenize(a), &tokenize(b))
}

/// `true` when `a` is strictly older than `b`.
pub fn is_less(a: &str, b: &str) -> bool {
    compare_versions(a, b) == Ordering::Less
}

pub fn compare_components(a: &[Component], b: &[Component]) -> Ordering {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let left = a.get(i).unwrap_or(&PADDING);
            let right = b.get(i).unwrap_or(&PADDING);
            compare_component(left, right)
        })
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

fn compare_component(a: &Component, b: &Component) -> Ordering {
    a.rank.cmp(&b.rank).then_with(|| match (&a.value, &b.value) {
        (ComponentValue::Number(x), ComponentValue::Number(y)) => x.cmp(y),
        (ComponentValue::Letters(x), ComponentValue::Letters(y)) => {
            first_letter(x).cmp(&first_letter(y))
        }
        // Equal ranks always carry the same kind of value.
        _ => Ordering::Equal,
    })
}

fn first_letter(s: &str) -> Option<char> {
    s.chars().next().map(|c| c.to_ascii_lowercase())
}

/// A version string paired with its components, ordered by [`compare_components`].
///
/// Equality follows the ordering, not the text: `Version::new("1.0") == Version::new("1")`.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    components: Vec<Component>,
}

impl Version {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let components = tokenize(&raw);
        Self { raw, components }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<&str> for Version {
    fn from(raw: &str) -> Self {
        Version::new(raw)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_components(&self.components, &other.components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLES: &[&str] = &[
        "",
        "0",
        "1",
        "1.0",
        "1.0.0",
        "1.0.1",
        "1.0alpha",
        "1.0alpha1",
        "1.0beta2",
        "1.0rc1",
        "1.0patch1",
        "1.0pl2",
        "1.0a",
        "1.1",
        "1.1a",
        "1.1b",
        "1.1b2",
        "1.2a1",
        "1.1.1",
        "2.0-pre",
        "2.0",
        "10",
        "1.0ALPHA",
        "foo",
        "20240101",
    ];

    #[rstest]
    #[case("1.0", "1.0.1", true)]
    #[case("1.0.0", "1.0", false)]
    #[case("1.0", "1.0.0", false)]
    #[case("1.0alpha", "1.0", true)]
    #[case("1.0", "1.0patch1", true)]
    #[case("1.0a", "1.0.1", true)]
    #[case("1.1a", "1.1.1", false)]
    #[case("1.1.1", "1.1a", true)]
    #[case("1.2b3", "1.2", true)]
    #[case("1.2a1", "1.2", true)]
    #[case("1.2", "1.2b3", false)]
    #[case("1.2a1", "1.2b1", true)]
    #[case("1.0alpha1", "1.0beta1", true)]
    #[case("1.0beta1", "1.0rc1", true)]
    #[case("1.0rc1", "1.0", true)]
    #[case("1.2", "1.10", true)]
    #[case("1.0patch1", "1.0.1", true)]
    #[case("1.0alpha", "1.0ALPHA", false)]
    #[case("1.0ALPHA", "1.0alpha", false)]
    #[case("", "0.0.1", true)]
    fn is_less_matches_rank_table(#[case] a: &str, #[case] b: &str, #[case] expected: bool) {
        assert_eq!(is_less(a, b), expected, "is_less({a:?}, {b:?})");
    }

    #[rstest]
    #[case("1.0", "1.0.0")]
    #[case("1", "1.0.0.0")]
    #[case("", "0")]
    #[case("1.0-alpha", "1.0.ALPHA")]
    #[case("1.0alpha", "1.0another")]
    fn equal_versions(#[case] a: &str, #[case] b: &str) {
        assert_eq!(compare_versions(a, b), Ordering::Equal);
        assert_eq!(Version::new(a), Version::new(b));
    }

    #[test]
    fn ordering_is_irreflexive_and_asymmetric() {
        for a in SAMPLES {
            assert!(!is_less(a, a), "{a:?} < itself");
            for b in SAMPLES {
                assert!(
                    !(is_less(a, b) && is_less(b, a)),
                    "{a:?} and {b:?} are both less than each other"
                );
            }
        }
    }

    #[test]
    fn ordering_is_transitive() {
        for a in SAMPLES {
            for b in SAMPLES {
                for c in SAMPLES {
                    if is_less(a, b) && is_less(b, c) {
                        assert!(is_less(a, c), "{a:?} < {b:?} < {c:?} but not {a:?} < {c:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn sorting_versions() {
        let mut versions: Vec<Version> = ["1.1", "1.0patch1", "1.0", "1.0rc1", "0.9"]
            .into_iter()
            .map(Version::from)
            .collect();
        versions.sort();

        let sorted: Vec<&str> = versions.iter().map(Version::as_str).collect();
        assert_eq!(sorted, vec!["0.9", "1.0rc1", "1.0", "1.0patch1", "1.1"]);
    }
}
