//! Git operations module

mod branch;
mod inventory;

pub use branch::Manager as BranchManager;
pub use inventory::{BranchRecord, Inventory};

use anyhow::{Context, Result};
use git2::Repository;
use std::path::Path;

/// Open the git repository containing the given path
///
/// # Errors
///
/// Returns an error if the path is not inside a git repository
pub fn open_repository(path: &Path) -> Result<Repository> {
    Repository::discover(path)
        .with_context(|| format!("Failed to open git repository at {}", path.display()))
}
