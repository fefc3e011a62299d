//! Jira issue search
//!
//! The rest of the crate only sees the [`Tracker`] trait; [`Client`] is the
//! blocking HTTP implementation for the Jira REST API.

mod client;

pub use client::Client;

use crate::issue::Issue;
use thiserror::Error;

/// Query listing the issues assigned to the authenticated user
pub const ASSIGNED_TO_ME: &str = "assignee = currentUser()";

/// Errors reported by an issue tracker
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The tracker answered with a non-success status
    #[error("Jira search failed with status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error text reported by Jira, or the raw body
        message: String,
    },
    /// The request never produced a response
    #[error("Failed to reach Jira")]
    Transport(#[source] ureq::Error),
    /// The response body was not a search result
    #[error("Failed to decode Jira search response")]
    Decode(#[source] ureq::Error),
}

/// Source of the issues a user can pick from
pub trait Tracker {
    /// Run a search and return matching issues in tracker order
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker cannot be queried or its answer
    /// cannot be understood
    fn search(&self, jql: &str) -> Result<Vec<Issue>, TrackerError>;
}
