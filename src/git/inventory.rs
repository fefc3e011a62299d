//! Local branch inventory keyed by issue key

use crate::issue::KeyMatcher;
use anyhow::{Context, Result};
use git2::{BranchType, Repository};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

/// A local branch and the issue key its name starts with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRecord {
    /// Short branch name (without `refs/heads/`)
    pub name: String,
    /// Issue key recovered from the name, if any
    pub issue_key: Option<String>,
}

/// Association between issue keys and local branches
///
/// When several branches start with the same key, the lexicographically
/// smallest branch name owns the key, whatever order git lists them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    records: Vec<BranchRecord>,
    index: BTreeMap<String, String>,
    keys: HashSet<String>,
}

impl Inventory {
    /// Enumerate local branches once and index them by issue key
    ///
    /// # Errors
    ///
    /// Returns an error if branches cannot be listed or any branch name
    /// cannot be read. No partial inventory is returned.
    pub fn scan(repo: &Repository, matcher: &KeyMatcher) -> Result<Self> {
        let branches = repo
            .branches(Some(BranchType::Local))
            .context("Failed to list local branches")?;

        let mut names = Vec::new();
        for branch_result in branches {
            let (branch, _) = branch_result.context("Failed to read branch")?;
            let name = branch
                .name()
                .context("Failed to read branch name")?
                .context("Branch name is not valid UTF-8")?;
            names.push(name.to_string());
        }

        let inventory = Self::from_names(names, matcher);
        tracing::info!(
            branches = inventory.records.len(),
            keyed = inventory.index.len(),
            "Scanned local branches"
        );
        Ok(inventory)
    }

    /// Build an inventory from already-enumerated branch names
    #[must_use]
    pub fn from_names<I, S>(names: I, matcher: &KeyMatcher) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut inventory = Self::default();

        for name in names {
            let name = name.into();
            let issue_key = matcher.extract(&name);

            if let Some(key) = &issue_key {
                tracing::debug!(branch = %name, key = %key, "Branch carries issue key");
                inventory.insert(key, &name);
            }

            inventory.records.push(BranchRecord { name, issue_key });
        }

        inventory.records.sort_by(|a, b| a.name.cmp(&b.name));
        inventory
    }

    fn insert(&mut self, key: &str, name: &str) {
        self.keys.insert(key.to_string());
        match self.index.entry(key.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(name.to_string());
            }
            Entry::Occupied(mut slot) => {
                let (kept, shadowed) = if name < slot.get().as_str() {
                    let previous = slot.insert(name.to_string());
                    (name.to_string(), previous)
                } else {
                    (slot.get().clone(), name.to_string())
                };
                tracing::warn!(
                    key = %key,
                    kept = %kept,
                    shadowed = %shadowed,
                    "Several local branches carry the same issue key"
                );
            }
        }
    }

    /// Branch that owns the given issue key
    #[must_use]
    pub fn branch_for(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(String::as_str)
    }

    /// Check whether any local branch carries the issue key
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Issue keys that have a local branch
    #[must_use]
    pub const fn keys(&self) -> &HashSet<String> {
        &self.keys
    }

    /// Every scanned branch, sorted by name
    #[must_use]
    pub fn records(&self) -> &[BranchRecord] {
        &self.records
    }

    /// Number of scanned branches
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the repository has no local branches
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
