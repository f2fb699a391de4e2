use std::fmt;

use thiserror::Error;

/// One field that failed validation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldIssue {
    /// Dotted path to the field, e.g. `agent.email` or `floorPlans[0].bedrooms`.
    pub path: String,
    /// Human-readable reason, e.g. `not a valid email address`.
    pub reason: String,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.reason)
        } else {
            write!(f, "{}: {}", self.path, self.reason)
        }
    }
}

/// A payload that parsed as JSON but does not satisfy the listing contract.
///
/// Always carries at least one issue; every failing field is reported, not
/// just the first.
#[derive(Error, Clone, Debug, PartialEq)]
#[error("{} invalid field(s): {}", .issues.len(), summarize(.issues))]
pub struct ShapeError {
    issues: Vec<FieldIssue>,
}

impl ShapeError {
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        debug_assert!(!issues.is_empty(), "ShapeError needs at least one issue");
        Self { issues }
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<FieldIssue> {
        self.issues
    }

    /// Returns the issue reported for `path`, if any.
    pub fn field(&self, path: &str) -> Option<&FieldIssue> {
        self.issues.iter().find(|issue| issue.path == path)
    }

    pub fn has_field(&self, path: &str) -> bool {
        self.field(path).is_some()
    }
}

fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(FieldIssue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
