//! Previous auto-update pull requests and issues.
//!
//! Before opening a new pull request or issue, the workflow lists the open
//! ones carrying the auto-update label so the new one can link to them.

use crate::error::{Result, UpdateError};
use serde::Deserialize;
use std::process::Command;

/// A pull-request host able to list open items by label
pub trait IssueHost: Send + Sync {
    fn open_pull_requests(&self, label: &str) -> Result<Vec<u64>>;
    fn open_issues(&self, label: &str) -> Result<Vec<u64>>;
}

#[derive(Debug, Deserialize)]
struct Numbered {
    number: u64,
}

/// Parse `gh ... --json number` output
pub fn parse_numbers(json: &str) -> Result<Vec<u64>> {
    let items: Vec<Numbered> = serde_json::from_str(json)?;
    Ok(items.into_iter().map(|item| item.number).collect())
}

/// The GitHub CLI
pub struct GhCli {
    program: String,
}

impl GhCli {
    pub fn new(program: impl Into<String>) -> Self {
        GhCli {
            program: program.into(),
        }
    }

    fn list(&self, kind: &str, label: &str) -> Result<Vec<u64>> {
        let output = Command::new(&self.program)
            .args([kind, "list", "--label", label, "--state", "open", "--json", "number"])
            .output()
            .map_err(|e| UpdateError::tool(format!("Failed to execute {}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(UpdateError::tool(format!(
                "{} {} list failed with exit code {}\nStderr: {}",
                self.program,
                kind,
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        parse_numbers(&String::from_utf8_lossy(&output.stdout))
    }
}

impl IssueHost for GhCli {
    fn open_pull_requests(&self, label: &str) -> Result<Vec<u64>> {
        self.list("pr", label)
    }

    fn open_issues(&self, label: &str) -> Result<Vec<u64>> {
        self.list("issue", label)
    }
}

/// Mock host for testing
#[derive(Debug, Default, Clone)]
pub struct MockIssueHost {
    pub pull_requests: Vec<u64>,
    pub issues: Vec<u64>,
}

impl IssueHost for MockIssueHost {
    fn open_pull_requests(&self, _label: &str) -> Result<Vec<u64>> {
        Ok(self.pull_requests.clone())
    }

    fn open_issues(&self, _label: &str) -> Result<Vec<u64>> {
        Ok(self.issues.clone())
    }
}

/// Turn issue numbers into a bulleted list: `* #1\n* #37`.
///
/// The result has no leading or trailing line breaks.
pub fn format_issue_list(numbers: &[u64]) -> String {
    numbers
        .iter()
        .map(|n| format!("* #{}", n))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Open auto-update pull requests and issues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousWork {
    pub pull_requests: Vec<u64>,
    pub issues: Vec<u64>,
}

impl PreviousWork {
    pub fn collect<H: IssueHost + ?Sized>(host: &H, label: &str) -> Result<Self> {
        Ok(PreviousWork {
            pull_requests: host.open_pull_requests(label)?,
            issues: host.open_issues(label)?,
        })
    }

    /// Text appended to a new pull request or issue body
    pub fn summary_text(&self) -> String {
        let mut summary = String::new();
        if !self.pull_requests.is_empty() {
            summary.push_str(&format!(
                "\n\nPrevious unmerged auto-update PRs:\n{}",
                format_issue_list(&self.pull_requests)
            ));
        }
        if !self.issues.is_empty() {
            summary.push_str(&format!(
                "\n\nPrevious open auto-update issues:\n{}",
                format_issue_list(&self.issues)
            ));
        }
        summary
    }

    pub fn outputs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("previous-issues-exist", (!self.issues.is_empty()).to_string()),
            (
                "previous-prs-exist",
                (!self.pull_requests.is_empty()).to_string(),
            ),
            ("summary-text", self.summary_text()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_issue_list() {
        assert_eq!(format_issue_list(&[1, 37, 1234]), "* #1\n* #37\n* #1234");
        assert_eq!(format_issue_list(&[]), "");
    }

    #[test]
    fn test_parse_numbers() {
        let numbers = parse_numbers(r#"[{"number": 12}, {"number": 7}]"#).unwrap();
        assert_eq!(numbers, vec![12, 7]);
        assert!(parse_numbers("[]").unwrap().is_empty());
        assert!(parse_numbers("oops").is_err());
    }

    #[test]
    fn test_summary_with_both() {
        let host = MockIssueHost {
            pull_requests: vec![3],
            issues: vec![5, 8],
        };
        let previous = PreviousWork::collect(&host, "auto-update-lean").unwrap();
        assert_eq!(
            previous.summary_text(),
            "\n\nPrevious unmerged auto-update PRs:\n* #3\n\nPrevious open auto-update issues:\n* #5\n* #8"
        );
    }

    #[test]
    fn test_summary_empty() {
        let previous = PreviousWork::collect(&MockIssueHost::default(), "x").unwrap();
        assert_eq!(previous.summary_text(), "");
        assert_eq!(
            previous.outputs(),
            vec![
                ("previous-issues-exist", "false".to_string()),
                ("previous-prs-exist", "false".to_string()),
                ("summary-text", String::new()),
            ]
        );
    }

    #[test]
    fn test_missing_gh_is_tool_error() {
        let gh = GhCli::new("definitely-not-gh");
        assert!(matches!(
            gh.open_pull_requests("auto-update-lean"),
            Err(UpdateError::Tool(_))
        ));
    }
}
