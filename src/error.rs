use thiserror::Error;

/// Errors raised while turning caller input into something the voting engine accepts.
#[derive(Debug, Error)]
pub enum FreedomError {
    #[error("Invalid subject: {0}")]
    InvalidSubject(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to obtain the Gentoo free-license identifier set.
///
/// Never fatal: the Gentoo reference repository abstains instead.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("License groups unavailable: {0}")]
    Unavailable(String),

    #[error("No identifiers found in free groups {0:?}")]
    EmptyFreeSet(Vec<String>),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConstraintError {
    #[error("Missing comparison operator in '{0}' (expected one of <, <=, =, >=, >)")]
    MissingOperator(String),

    #[error("Missing version after operator in '{0}'")]
    EmptyVersion(String),
}
