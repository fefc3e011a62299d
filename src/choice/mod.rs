//! Issue choices offered to the user
//!
//! Assigned issues are annotated with whether a local branch already exists
//! for them, rendered to display labels, and the issue key is recovered from
//! whichever label the user picks.

pub mod style;

use crate::git::Inventory;
use crate::issue::Issue;

/// Marker prefixed to the label of an issue that already has a local branch
pub const EXISTING_BRANCH_MARKER: &str = "*";

/// An assigned issue together with its local branch status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedChoice {
    /// The assigned issue
    pub issue: Issue,
    /// Whether a local branch carries the issue key
    pub has_local_branch: bool,
}

impl AnnotatedChoice {
    /// Plain display label, e.g. `*ABC-1 High (Bug): Fix login`
    ///
    /// The first whitespace-delimited token is the key, prefixed with
    /// [`EXISTING_BRANCH_MARKER`] when the issue has a local branch.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{}{} {} ({}): {}",
            self.marker(),
            self.issue.key,
            self.issue.priority_label(),
            self.issue.issue_type,
            self.issue.summary
        )
    }

    /// Marker text, empty when there is no local branch
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        if self.has_local_branch {
            EXISTING_BRANCH_MARKER
        } else {
            ""
        }
    }
}

/// Annotate issues with local branch status, keeping tracker order
#[must_use]
pub fn annotate(issues: &[Issue], inventory: &Inventory) -> Vec<AnnotatedChoice> {
    issues
        .iter()
        .map(|issue| AnnotatedChoice {
            issue: issue.clone(),
            has_local_branch: inventory.contains(&issue.key),
        })
        .collect()
}

/// Recover the issue key from a display label
#[must_use]
pub fn selected_key(label: &str) -> Option<&str> {
    let token = label.split_whitespace().next()?;
    let key = token
        .strip_prefix(EXISTING_BRANCH_MARKER)
        .unwrap_or(token);
    (!key.is_empty()).then_some(key)
}

/// Find the issue with the given key
#[must_use]
pub fn find_issue<'a>(issues: &'a [Issue], key: &str) -> Option<&'a Issue> {
    issues.iter().find(|issue| issue.key == key)
}
