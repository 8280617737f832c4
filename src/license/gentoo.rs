//! Gentoo `LICENSE` expressions.
//!
//! Grammar, with whitespace between tokens:
//! ```text
//! expr   := item*
//! item   := "(" expr ")"            all items must be free
//!         | "||" "(" expr ")"       at least one item must be free
//!         | "!"? flag "?" "(" expr ")"
//!         | identifier
//! ```
//! USE-conditional groups are evaluated as if the flag were set; a license
//! that only applies under some build configuration still counts.

use thiserror::Error;
use tracing::debug;

use crate::license::groups::FreeLicenses;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Identifier(&'a str),
    Param { negated: bool, flag: &'a str },
    Open,
    Close,
    Or,
}

/// Split an expression into tokens. Parentheses need not be surrounded by
/// whitespace.
pub fn tokenize(expr: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = expr;

    loop {
        rest = rest.trim_start();
        let Some(c) = rest.chars().next() else {
            break;
        };

        match c {
            '(' => {
                tokens.push(Token::Open);
                rest = &rest[1..];
            }
            ')' => {
                tokens.push(Token::Close);
                rest = &rest[1..];
            }
            _ => {
                let end = rest
                    .find(|c: char| c.is_whitespace() || c == '(' || c == ')')
                    .unwrap_or(rest.len());
                tokens.push(classify_word(&rest[..end]));
                rest = &rest[end..];
            }
        }
    }

    tokens
}

fn classify_word(word: &str) -> Token<'_> {
    if let Some(param) = word.strip_suffix('?') {
        let (negated, flag) = match param.strip_prefix('!') {
            Some(flag) => (true, flag),
            None => (false, param),
        };
        if !flag.is_empty() {
            return Token::Param { negated, flag };
        }
    }

    if word == "||" {
        Token::Or
    } else {
        Token::Identifier(word)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseExpr {
    License(String),
    All(Vec<LicenseExpr>),
    Any(Vec<LicenseExpr>),
    Conditional {
        negated: bool,
        flag: String,
        body: Vec<LicenseExpr>,
    },
}

impl LicenseExpr {
    pub fn is_free(&self, free: &FreeLicenses) -> bool {
        match self {
            LicenseExpr::License(id) => free.contains(id),
            LicenseExpr::All(items) => items.iter().all(|e| e.is_free(free)),
            LicenseExpr::Any(items) => items.iter().any(|e| e.is_free(free)),
            // The condition is always taken to hold.
            LicenseExpr::Conditional { body, .. } => body.iter().all(|e| e.is_free(free)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("unclosed group")]
    UnclosedGroup,
    #[error("unexpected ')'")]
    UnexpectedClose,
    #[error("'{0}' must be followed by a group")]
    ExpectedGroup(String),
}

struct ExprParser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> ExprParser<'a> {
    fn consume(&mut self) -> Option<Token<'a>> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn expect_group(&mut self, after: &str) -> Result<Vec<LicenseExpr>, GrammarError> {
        match self.consume() {
            Some(Token::Open) => self.parse_items(true),
            _ => Err(GrammarError::ExpectedGroup(after.to_string())),
        }
    }

    /// Parse items until the matching `)` (nested) or end of input (top level).
    fn parse_items(&mut self, nested: bool) -> Result<Vec<LicenseExpr>, GrammarError> {
        let mut items = Vec::new();
        loop {
            match self.consume() {
                None if nested => return Err(GrammarError::UnclosedGroup),
                None => return Ok(items),
                Some(Token::Close) if nested => return Ok(items),
                Some(Token::Close) => return Err(GrammarError::UnexpectedClose),
                Some(Token::Open) => items.push(LicenseExpr::All(self.parse_items(true)?)),
                Some(Token::Or) => items.push(LicenseExpr::Any(self.expect_group("||")?)),
                Some(Token::Param { negated, flag }) => {
                    let body = self.expect_group(flag)?;
                    items.push(LicenseExpr::Conditional {
                        negated,
                        flag: flag.to_string(),
                        body,
                    });
                }
                Some(Token::Identifier(id)) => items.push(LicenseExpr::License(id.to_string())),
            }
        }
    }
}

/// Parse a whole `LICENSE` value. The top level is an implicit AND group.
pub fn parse(expr: &str) -> Result<LicenseExpr, GrammarError> {
    let mut parser = ExprParser {
        tokens: tokenize(expr),
        pos: 0,
    };
    parser.parse_items(false).map(LicenseExpr::All)
}

/// Whether a `LICENSE` value is free under `free`.
///
/// Blank and malformed expressions are not free.
pub fn is_free(license: &str, free: &FreeLicenses) -> bool {
    if license.trim().is_empty() {
        return false;
    }

    match parse(license) {
        Ok(expr) => expr.is_free(free),
        Err(e) => {
            debug!("Malformed Gentoo license {:?}: {}", license, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn free_set() -> FreeLicenses {
        ["GPL-2", "LGPL-2.1", "MIT", "BSD"].into_iter().collect()
    }

    #[test]
    fn tokenizes_all_shapes() {
        assert_eq!(
            tokenize("GPL-2 || ( MIT BSD ) !doc? ( FDL-1.3 ) ssl? (openssl)"),
            vec![
                Token::Identifier("GPL-2"),
                Token::Or,
                Token::Open,
                Token::Identifier("MIT"),
                Token::Identifier("BSD"),
                Token::Close,
                Token::Param { negated: true, flag: "doc" },
                Token::Open,
                Token::Identifier("FDL-1.3"),
                Token::Close,
                Token::Param { negated: false, flag: "ssl" },
                Token::Open,
                Token::Identifier("openssl"),
                Token::Close,
            ]
        );
    }

    #[test]
    fn lone_question_mark_is_an_identifier() {
        assert_eq!(tokenize("?"), vec![Token::Identifier("?")]);
        assert_eq!(tokenize("!?"), vec![Token::Identifier("!?")]);
    }

    #[test]
    fn parses_nested_structure() {
        assert_eq!(
            parse("MIT || ( GPL-2 ( BSD foo ) )").unwrap(),
            LicenseExpr::All(vec![
                LicenseExpr::License("MIT".to_string()),
                LicenseExpr::Any(vec![
                    LicenseExpr::License("GPL-2".to_string()),
                    LicenseExpr::All(vec![
                        LicenseExpr::License("BSD".to_string()),
                        LicenseExpr::License("foo".to_string()),
                    ]),
                ]),
            ])
        );
    }

    #[rstest]
    #[case("( MIT BSD )", true)]
    #[case("( MIT Proprietary )", false)]
    #[case("|| ( MIT Proprietary )", true)]
    #[case("|| ( Proprietary EULA )", false)]
    #[case("MIT", true)]
    #[case("mit", true)]
    #[case("MIT GPL-2", true)]
    #[case("MIT Proprietary", false)]
    #[case("|| ( Proprietary ( MIT BSD ) )", true)]
    #[case("|| ( Proprietary ( MIT EULA ) )", false)]
    #[case("( MIT || ( EULA GPL-2 ) )", true)]
    #[case("doc? ( Proprietary )", false)]
    #[case("!doc? ( MIT )", true)]
    #[case("MIT ssl? ( || ( EULA BSD ) )", true)]
    #[case("( )", true)]
    #[case("|| ( )", false)]
    #[case("", false)]
    #[case("   ", false)]
    fn evaluates_expressions(#[case] license: &str, #[case] expected: bool) {
        assert_eq!(is_free(license, &free_set()), expected, "{license:?}");
    }

    #[rstest]
    #[case("( MIT", GrammarError::UnclosedGroup)]
    #[case("MIT )", GrammarError::UnexpectedClose)]
    #[case("|| MIT", GrammarError::ExpectedGroup("||".to_string()))]
    #[case("doc? MIT", GrammarError::ExpectedGroup("doc".to_string()))]
    #[case("ssl?", GrammarError::ExpectedGroup("ssl".to_string()))]
    fn rejects_malformed_expressions(#[case] license: &str, #[case] error: GrammarError) {
        assert_eq!(parse(license), Err(error));
        assert!(!is_free(license, &free_set()));
    }
}
