//! Issue key extraction from branch names

use anyhow::{Context, Result};
use regex::Regex;

/// Pattern a branch name must start with to carry an issue key
const KEY_PATTERN: &str = r"^([A-Z]+-[0-9]+)";

/// Extracts tracker issue keys (`PROJECT-NUMBER`) from branch names
///
/// Matching is anchored at the start of the name and case-sensitive, so
/// `feature/ABC-1` and `abc-1` carry no key.
#[derive(Debug, Clone)]
pub struct KeyMatcher {
    prefix: Regex,
    exact: Regex,
}

impl KeyMatcher {
    /// Compile the key patterns
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile
    pub fn new() -> Result<Self> {
        let prefix = Regex::new(KEY_PATTERN).context("Failed to compile issue key pattern")?;
        let exact = Regex::new(&format!("{KEY_PATTERN}$"))
            .context("Failed to compile exact issue key pattern")?;
        Ok(Self { prefix, exact })
    }

    /// Return the issue key a branch name starts with, if any
    #[must_use]
    pub fn extract(&self, branch: &str) -> Option<String> {
        self.prefix
            .captures(branch)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Check whether `value` is exactly one issue key
    #[must_use]
    pub fn is_key(&self, value: &str) -> bool {
        self.exact.is_match(value)
    }
}
