//! jira-branch - land on the git branch for a Jira issue
//!
//! Local branches whose names start with an issue key are matched against
//! the issues assigned to you in Jira. Picking an issue checks out its branch,
//! or creates one from the upstream baseline first.

pub mod choice;
pub mod config;
pub mod git;
pub mod issue;
pub mod jira;
pub mod prompt;
pub mod switch;

pub use config::Config;
pub use issue::{Issue, KeyMatcher, Priority};
pub use switch::Switched;
