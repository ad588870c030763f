//! Error types shared across the crate
//!
//! None of these are fatal to rendering: every failure mode in the engine
//! degrades to a simpler visual. They exist so callers (the CLI, an upload
//! form) can surface what went wrong.

use thiserror::Error;

/// A single content validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentIssue {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be {max} characters or less (got {len})")]
    TooLong {
        field: &'static str,
        max: usize,
        len: usize,
    },

    #[error("publication link is not an http(s) URL: {value}")]
    InvalidLink { value: String },
}

/// Content validation failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid slide content: {}", format_issues(.issues))]
pub struct ContentError {
    pub issues: Vec<ContentIssue>,
}

fn format_issues(issues: &[ContentIssue]) -> String {
    issues
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_error_joins_issues() {
        let err = ContentError {
            issues: vec![
                ContentIssue::Missing { field: "headline" },
                ContentIssue::TooLong {
                    field: "caption",
                    max: 60,
                    len: 72,
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "invalid slide content: headline is required; caption must be 60 characters or less (got 72)"
        );
    }
}
