use anyhow::Result;
use serde::Serialize;

use crate::models::{Verdict, VoteReport};

#[derive(Debug, Serialize)]
struct Report<'a> {
    subject: &'a str,
    verdict: Verdict,
    votes: &'a [VoteReport],
}

pub fn render(subject: &str, reports: &[VoteReport], verdict: Verdict) -> Result<String> {
    let report = Report {
        subject,
        verdict,
        votes: reports,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn renders_votes_and_verdict() {
        let reports = vec![VoteReport {
            repository: "gentoo".to_string(),
            package: "app-shells/zsh".to_string(),
            licenses: vec!["ZSH".to_string()],
            verdict: Verdict::Unknown,
        }];

        let rendered = render("zsh", &reports, Verdict::NonFree).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(
            value,
            json!({
                "subject": "zsh",
                "verdict": "non-free",
                "votes": [{
                    "repository": "gentoo",
                    "package": "app-shells/zsh",
                    "licenses": ["ZSH"],
                    "verdict": "unknown"
                }]
            })
        );
    }
}
