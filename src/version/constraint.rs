use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::ConstraintError;
use crate::version::compare::Version;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Less,
    LessOrEqual,
    Equal,
    GreaterOrEqual,
    Greater,
}

impl Operator {
    // Two-character operators first so "<=" is not read as "<".
    const PREFIXES: [(&'static str, Operator); 5] = [
        ("<=", Operator::LessOrEqual),
        (">=", Operator::GreaterOrEqual),
        ("<", Operator::Less),
        (">", Operator::Greater),
        ("=", Operator::Equal),
    ];

    fn accepts(self, ord: Ordering) -> bool {
        match self {
            Operator::Less => ord == Ordering::Less,
            Operator::LessOrEqual => ord != Ordering::Greater,
            Operator::Equal => ord == Ordering::Equal,
            Operator::GreaterOrEqual => ord != Ordering::Less,
            Operator::Greater => ord == Ordering::Greater,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Operator::Less => "<",
            Operator::LessOrEqual => "<=",
            Operator::Equal => "=",
            Operator::GreaterOrEqual => ">=",
            Operator::Greater => ">",
        }
    }
}

/// A version bound such as `<=1.2` or `>2.0rc1`.
///
/// The operator prefix is mandatory; a bare version is rejected rather than
/// guessed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    pub operator: Operator,
    pub version: Version,
}

impl VersionConstraint {
    pub fn matches(&self, candidate: &str) -> bool {
        let ord = Version::new(candidate).cmp(&self.version);
        self.operator.accepts(ord)
    }
}

impl FromStr for VersionConstraint {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (operator, rest) = Operator::PREFIXES
            .iter()
            .find_map(|(prefix, op)| trimmed.strip_prefix(prefix).map(|rest| (*op, rest)))
            .ok_or_else(|| ConstraintError::MissingOperator(s.to_string()))?;

        let version = rest.trim();
        if version.is_empty() {
            return Err(ConstraintError::EmptyVersion(s.to_string()));
        }

        Ok(VersionConstraint {
            operator,
            version: Version::new(version),
        })
    }
}

impl std::fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.operator.symbol(), self.version)
    }
}
