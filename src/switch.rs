//! Pick an assigned issue and switch to its branch
//!
//! Local branches are scanned before Jira is queried. The chosen issue either
//! maps to an existing branch, which is checked out as is, or gets a new
//! branch created at the upstream baseline and then checked out.

use crate::choice::{self, style};
use crate::config::Config;
use crate::git::{self, BranchManager, Inventory};
use crate::issue::{Issue, KeyMatcher};
use crate::jira::Tracker;
use crate::prompt::Prompt;
use anyhow::{Context, Result, bail};
use git2::Repository;
use ratatui::text::Line;
use std::fmt;

/// Message shown when asking for an issue
pub const CHOOSE_ISSUE: &str = "Choose an issue:";
/// Message shown when asking for a new branch name
pub const ENTER_BRANCH_NAME: &str = "Enter a branch name:";

/// Branch the user ended up on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Switched {
    /// A local branch already carried the issue key
    Existing(String),
    /// A new branch was created at the upstream baseline
    Created(String),
}

impl Switched {
    /// Name of the checked-out branch
    #[must_use]
    pub fn branch(&self) -> &str {
        match self {
            Self::Existing(name) | Self::Created(name) => name,
        }
    }
}

impl fmt::Display for Switched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Existing(name) => write!(f, "Switched to branch '{name}'"),
            Self::Created(name) => write!(f, "Switched to a new branch '{name}'"),
        }
    }
}

/// Find the branch for `key`, creating it at `upstream` when there is none
///
/// Only the new-branch path prompts, for the branch name; an empty answer
/// falls back to the key itself.
///
/// # Errors
///
/// Returns an error if the prompt fails or the branch cannot be created
pub fn resolve_branch(
    repo: &Repository,
    inventory: &Inventory,
    key: &str,
    prompt: &mut dyn Prompt,
    upstream: &str,
) -> Result<Switched> {
    if let Some(branch) = inventory.branch_for(key) {
        tracing::info!(key = %key, branch = %branch, "Issue already has a local branch");
        return Ok(Switched::Existing(branch.to_string()));
    }

    let answer = prompt.input(ENTER_BRANCH_NAME, key)?;
    let name = match answer.trim() {
        "" => key,
        name => name,
    };

    BranchManager::new(repo).create_from_upstream(name, upstream)?;
    Ok(Switched::Created(name.to_string()))
}

/// Resolve the branch for `key` and check it out
///
/// # Errors
///
/// Returns an error if the branch cannot be resolved or created, or the
/// checkout is refused
pub fn switch_to_issue(
    repo: &Repository,
    inventory: &Inventory,
    key: &str,
    prompt: &mut dyn Prompt,
    upstream: &str,
) -> Result<Switched> {
    let switched = resolve_branch(repo, inventory, key, prompt, upstream)?;
    BranchManager::new(repo).checkout(switched.branch())?;
    Ok(switched)
}

/// Drop issues whose key could not be read back from a display label
fn keep_valid_keys(issues: Vec<Issue>, matcher: &KeyMatcher) -> Vec<Issue> {
    issues
        .into_iter()
        .filter(|issue| {
            let valid = matcher.is_key(&issue.key);
            if !valid {
                tracing::warn!(key = %issue.key, "Ignoring issue with unexpected key format");
            }
            valid
        })
        .collect()
}

/// Run the whole flow: scan, search, pick, switch
///
/// # Errors
///
/// Returns an error on the first failure; the working tree is only touched
/// by the final checkout
pub fn run(config: &Config, tracker: &dyn Tracker, prompt: &mut dyn Prompt) -> Result<Switched> {
    let repo = git::open_repository(&config.repo)?;
    let matcher = KeyMatcher::new()?;
    let inventory = Inventory::scan(&repo, &matcher)?;

    let issues = tracker
        .search(&config.jql)
        .context("Failed to search Jira")?;
    let issues = keep_valid_keys(issues, &matcher);
    if issues.is_empty() {
        bail!("No issues found for '{}'", config.jql);
    }

    let choices = choice::annotate(&issues, &inventory);
    let options: Vec<Line<'static>> = choices.iter().map(style::choice_line).collect();
    let picked = prompt.select(CHOOSE_ISSUE, &options)?;

    let key = choice::selected_key(&picked)
        .with_context(|| format!("Could not read an issue key from '{picked}'"))?;
    let issue = choice::find_issue(&issues, key)
        .with_context(|| format!("Issue {key} is not in the search results"))?;
    tracing::info!(key = %issue.key, summary = %issue.summary, "Selected issue");

    switch_to_issue(&repo, &inventory, &issue.key, prompt, &config.upstream_branch)
}
