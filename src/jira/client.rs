//! Blocking Jira REST client

use super::{Tracker, TrackerError};
use crate::issue::Issue;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use std::time::Duration;
use ureq::Agent;

const SEARCH_PATH: &str = "/rest/api/2/search";
const SEARCH_FIELDS: &str = "summary,issuetype,priority";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<IssueRecord>,
}

#[derive(Debug, Deserialize)]
struct IssueRecord {
    key: String,
    fields: IssueFields,
}

#[derive(Debug, Deserialize)]
struct IssueFields {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    issuetype: Option<Named>,
    #[serde(default)]
    priority: Option<Named>,
}

#[derive(Debug, Deserialize)]
struct Named {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    #[serde(default)]
    error_messages: Vec<String>,
}

impl From<IssueRecord> for Issue {
    fn from(record: IssueRecord) -> Self {
        let name = |field: Option<Named>| field.map(|n| n.name).unwrap_or_default();
        Self::new(
            record.key,
            record.fields.summary,
            name(record.fields.issuetype),
            name(record.fields.priority),
        )
    }
}

/// Jira Cloud/Server client authenticated with basic auth
pub struct Client {
    agent: Agent,
    search_url: String,
    authorization: String,
    max_results: u32,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("search_url", &self.search_url)
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client for the Jira instance at `host`
    ///
    /// Username and token are trimmed before they are encoded.
    #[must_use]
    pub fn new(host: &str, username: &str, token: &str, timeout: Duration, max_results: u32) -> Self {
        let config = ureq::config::Config::builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        let credentials = format!("{}:{}", username.trim(), token.trim());

        Self {
            agent: config.new_agent(),
            search_url: format!("{}{SEARCH_PATH}", host.trim().trim_end_matches('/')),
            authorization: format!("Basic {}", STANDARD.encode(credentials)),
            max_results,
        }
    }
}

impl Tracker for Client {
    fn search(&self, jql: &str) -> Result<Vec<Issue>, TrackerError> {
        tracing::info!(url = %self.search_url, jql = %jql, "Searching Jira");

        let mut response = self
            .agent
            .get(&self.search_url)
            .query("jql", jql)
            .query("maxResults", self.max_results.to_string())
            .query("fields", SEARCH_FIELDS)
            .header("Authorization", &self.authorization)
            .header("Accept", "application/json")
            .header("User-Agent", concat!("jira-branch/", env!("CARGO_PKG_VERSION")))
            .call()
            .map_err(TrackerError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.body_mut().read_to_string().unwrap_or_default();
            return Err(TrackerError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body: SearchResponse = response
            .body_mut()
            .read_json()
            .map_err(TrackerError::Decode)?;

        tracing::info!(issues = body.issues.len(), "Jira search returned");
        Ok(body.issues.into_iter().map(Issue::from).collect())
    }
}

/// Best human-readable error text from a Jira error body
fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body)
        && !parsed.error_messages.is_empty()
    {
        return parsed.error_messages.join("; ");
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no response body".to_string()
    } else {
        trimmed.to_string()
    }
}
