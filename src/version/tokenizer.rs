/// Keywords that mark a pre-release; they sort before the release itself.
pub const PRE_RELEASE_KEYWORDS: &[&str] = &["alpha", "beta", "rc", "pre"];

/// Keywords that mark a post-release; they sort after the release itself.
pub const POST_RELEASE_KEYWORDS: &[&str] = &["patch", "post", "pl", "errata"];

/// Precedence class of a version component. Ranks compare before values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    PreRelease = 0,
    Zero = 1,
    PostRelease = 2,
    Number = 3,
    LetterSuffix = 4,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentValue {
    Number(u64),
    Letters(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub rank: Rank,
    pub value: ComponentValue,
}

impl Component {
    /// Stand-in for a missing component when two versions differ in length.
    pub const ZERO: Component = Component {
        rank: Rank::Zero,
        value: ComponentValue::Number(0),
    };

    fn number(value: u64) -> Self {
        if value == 0 {
            Self::ZERO
        } else {
            Component {
                rank: Rank::Number,
                value: ComponentValue::Number(value),
            }
        }
    }

    fn letters(run: &str, suffix_eligible: bool) -> Self {
        let lower = run.to_ascii_lowercase();
        let rank = if PRE_RELEASE_KEYWORDS.contains(&lower.as_str()) {
            Rank::PreRelease
        } else if POST_RELEASE_KEYWORDS.contains(&lower.as_str()) {
            Rank::PostRelease
        } else if suffix_eligible {
            Rank::LetterSuffix
        } else {
            Rank::PreRelease
        };

        Component {
            rank,
            value: ComponentValue::Letters(run.to_string()),
        }
    }
}

/// Split a version string into ranked components.
///
/// Maximal runs of ASCII alphanumerics form tokens; everything else separates
/// them. Each token is cut into alternating digit and letter runs. A letter run
/// that ends its token and directly follows a non-zero number (`1.1a`) is a
/// letter suffix unless it is a pre/post-release keyword. Inside a token
/// (`1.2b3`) it stays a pre-release marker.
pub fn tokenize(version: &str) -> Vec<Component> {
    let mut components = Vec::new();

    for token in version
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        let runs = runs(token);
        let last = runs.len().saturating_sub(1);
        let mut after_nonzero_number = false;
        for (idx, run) in runs.into_iter().enumerate() {
            if run.starts_with(|c: char| c.is_ascii_digit()) {
                let value = parse_number(run);
                after_nonzero_number = value != 0;
                components.push(Component::number(value));
            } else {
                components.push(Component::letters(run, after_nonzero_number && idx == last));
                after_nonzero_number = false;
            }
        }
    }

    components
}

/// Maximal digit / letter runs of an ASCII alphanumeric token.
fn runs(token: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut chars = token.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        let digit = c.is_ascii_digit();
        match chars.peek() {
            Some(&(next_idx, next)) if next.is_ascii_digit() != digit => {
                runs.push(&token[start..next_idx]);
                start = next_idx;
            }
            Some(_) => {}
            None => runs.push(&token[start..]),
        }
    }

    runs
}

/// Digit runs too long for `u64` saturate; ordering among them is lost.
fn parse_number(run: &str) -> u64 {
    run.parse().unwrap_or(u64::MAX)
}
