//! Assigned issues and issue keys

mod key;

pub use key::KeyMatcher;

use std::fmt;

/// Priority of an issue as reported by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    /// Low priority
    Low,
    /// Medium priority
    Medium,
    /// High priority
    High,
    /// Critical priority
    Critical,
    /// Blocker priority
    Blocker,
    /// Any priority name the tool does not recognise, or none at all
    Unknown,
}

impl Priority {
    /// Parse a tracker priority name
    ///
    /// Matching is exact; anything unrecognised is [`Priority::Unknown`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Low" => Self::Low,
            "Medium" => Self::Medium,
            "High" => Self::High,
            "Critical" => Self::Critical,
            "Blocker" => Self::Blocker,
            _ => Self::Unknown,
        }
    }

    /// Canonical name of the priority
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
            Self::Blocker => "Blocker",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An issue assigned to the current user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Tracker key, e.g. `PROJ-123`
    pub key: String,
    /// One-line summary
    pub summary: String,
    /// Issue type name, e.g. "Bug" or "Story"
    pub issue_type: String,
    /// Parsed priority
    pub priority: Priority,
    /// Priority name exactly as the tracker reported it
    pub priority_name: String,
}

impl Issue {
    /// Create an issue, deriving [`Priority`] from the priority name
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        summary: impl Into<String>,
        issue_type: impl Into<String>,
        priority_name: impl Into<String>,
    ) -> Self {
        let priority_name = priority_name.into();
        Self {
            key: key.into(),
            summary: summary.into(),
            issue_type: issue_type.into(),
            priority: Priority::from_name(&priority_name),
            priority_name,
        }
    }

    /// Priority text shown to the user
    ///
    /// Falls back to the canonical name when the tracker sent none.
    #[must_use]
    pub fn priority_label(&self) -> &str {
        if self.priority_name.trim().is_empty() {
            self.priority.as_str()
        } else {
            &self.priority_name
        }
    }
}
