//! Configuration for jira-branch
//!
//! Credentials and the Jira host only come from command-line flags. The
//! optional settings file tunes the rest; flags override it.

use crate::jira::ASSIGNED_TO_ME;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while assembling the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required flag was not given or was blank
    #[error("Please set a {what} with {flag}.")]
    MissingFlag {
        /// Flag name, e.g. `--jira-host`
        flag: &'static str,
        /// What the flag provides, e.g. "Jira host"
        what: &'static str,
    },
    /// The settings file exists but cannot be read
    #[error("Failed to read settings from {path}")]
    ReadFile {
        /// Settings file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The settings file is not valid
    #[error("Failed to parse settings from {path}")]
    ParseFile {
        /// Settings file path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Optional on-disk settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Remote-tracking branch new branches start from
    #[serde(default = "default_upstream_branch")]
    pub upstream_branch: String,

    /// Search listing the issues to pick from
    #[serde(default = "default_jql")]
    pub jql: String,

    /// Maximum number of issues requested from Jira
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Timeout for the Jira request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_upstream_branch() -> String {
    "origin/master".to_string()
}

fn default_jql() -> String {
    ASSIGNED_TO_ME.to_string()
}

const fn default_max_results() -> u32 {
    50
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            upstream_branch: default_upstream_branch(),
            jql: default_jql(),
            max_results: default_max_results(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from the default location
    ///
    /// An explicit path must exist. A missing file at the default location
    /// yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load settings from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the default settings file path
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jira-branch")
            .join("config.json")
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// `--repo`
    pub repo: Option<PathBuf>,
    /// `--jira-host`
    pub jira_host: Option<String>,
    /// `--jira-user`
    pub jira_user: Option<String>,
    /// `--jira-token`
    pub jira_token: Option<String>,
    /// `--upstream`
    pub upstream: Option<String>,
    /// `--jql`
    pub jql: Option<String>,
}

/// Everything one run needs
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Path inside the git repository to work on
    pub repo: PathBuf,
    /// Base URL of the Jira instance
    pub jira_host: String,
    /// Jira username
    pub jira_user: String,
    /// Jira API token
    pub jira_token: String,
    /// Remote-tracking branch new branches start from
    pub upstream_branch: String,
    /// Search listing the issues to pick from
    pub jql: String,
    /// Maximum number of issues requested from Jira
    pub max_results: u32,
    /// Timeout for the Jira request
    pub timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("repo", &self.repo)
            .field("jira_host", &self.jira_host)
            .field("jira_user", &self.jira_user)
            .field("jira_token", &"<redacted>")
            .field("upstream_branch", &self.upstream_branch)
            .field("jql", &self.jql)
            .field("max_results", &self.max_results)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn required(
    value: Option<String>,
    flag: &'static str,
    what: &'static str,
) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingFlag { flag, what })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Combine command-line flags with settings
    ///
    /// Required flags are checked in the order host, user, token. `cwd` is
    /// used when `--repo` is not given.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first required flag that is missing
    pub fn resolve(flags: Flags, settings: Settings, cwd: PathBuf) -> Result<Self, ConfigError> {
        let jira_host = required(flags.jira_host, "--jira-host", "Jira host")?;
        let jira_user = required(flags.jira_user, "--jira-user", "Jira username")?;
        let jira_token = required(flags.jira_token, "--jira-token", "Jira API token")?;

        Ok(Self {
            repo: flags.repo.unwrap_or(cwd),
            jira_host,
            jira_user,
            jira_token,
            upstream_branch: non_blank(flags.upstream).unwrap_or(settings.upstream_branch),
            jql: non_blank(flags.jql).unwrap_or(settings.jql),
            max_results: settings.max_results,
            timeout: Duration::from_secs(settings.timeout_secs),
        })
    }
}
