use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Advisory condition that leaves a dataset unusable without aborting extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum ExtractionIssue {
    #[error("No value column in selected range.")]
    NoValueColumns,

    #[error("No rows in selected range.")]
    NoRows,
}

/// Per-extraction issue list; one is created fresh for every run.
#[derive(Debug, Default)]
pub(crate) struct ExtractionDiagnostics {
    issues: Vec<ExtractionIssue>,
}

impl ExtractionDiagnostics {
    pub(crate) fn add(&mut self, issue: ExtractionIssue) {
        warn!(issue = %issue, "chart extraction issue");
        self.issues.push(issue);
    }

    pub(crate) fn into_issues(self) -> Vec<ExtractionIssue> {
        self.issues
    }
}
