//! Git branch management

use anyhow::{Context, Result, bail};
use git2::build::CheckoutBuilder;
use git2::{Branch, BranchType, Oid, Repository};

/// Manager for git branch operations
pub struct Manager<'a> {
    repo: &'a Repository,
}

impl std::fmt::Debug for Manager<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager").finish_non_exhaustive()
    }
}

impl<'a> Manager<'a> {
    /// Create a new branch manager for the given repository
    #[must_use]
    pub const fn new(repo: &'a Repository) -> Self {
        Self { repo }
    }

    /// Create a local branch at the tip of a remote-tracking branch
    ///
    /// `upstream` is the short remote branch name, e.g. `origin/master`.
    /// Fails if a local branch called `name` already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid, the upstream branch or its
    /// commit cannot be found, or the branch cannot be created
    pub fn create_from_upstream(&self, name: &str, upstream: &str) -> Result<Oid> {
        if !Branch::name_is_valid(name).unwrap_or(false) {
            bail!("'{name}' is not a valid branch name");
        }

        let remote = self
            .repo
            .find_branch(upstream, BranchType::Remote)
            .with_context(|| format!("Upstream branch not found: {upstream}"))?;
        let commit = remote
            .get()
            .peel_to_commit()
            .with_context(|| format!("Upstream branch '{upstream}' does not point at a commit"))?;
        let target = commit.id();

        self.repo
            .branch(name, &commit, false)
            .with_context(|| format!("Failed to create branch '{name}'"))?;

        tracing::info!(branch = %name, upstream = %upstream, commit = %target, "Created branch");
        Ok(target)
    }

    /// Check if a local branch exists
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.repo.find_branch(name, BranchType::Local).is_ok()
    }

    /// Commit a local branch points at
    ///
    /// # Errors
    ///
    /// Returns an error if the branch does not exist or has no target
    pub fn tip(&self, name: &str) -> Result<Oid> {
        let branch = self
            .repo
            .find_branch(name, BranchType::Local)
            .with_context(|| format!("Branch not found: {name}"))?;
        branch
            .get()
            .target()
            .with_context(|| format!("Branch '{name}' has no target"))
    }

    /// Get the current branch name
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD is not a branch
    pub fn current(&self) -> Result<String> {
        let head = self.repo.head().context("Failed to get HEAD")?;

        if head.is_branch() {
            let name = head.shorthand().context("Branch name is not valid UTF-8")?;
            Ok(name.to_string())
        } else {
            bail!("HEAD is not a branch (detached HEAD state)")
        }
    }

    /// Checkout a local branch without discarding local changes
    ///
    /// The working tree is updated with a safe strategy, which refuses to
    /// overwrite uncommitted modifications. HEAD is only moved once the tree
    /// has been applied, and it points at the branch ref rather than the
    /// commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the branch, commit or tree cannot be resolved, or
    /// the checkout would overwrite local changes
    pub fn checkout(&self, name: &str) -> Result<()> {
        let branch = self
            .repo
            .find_branch(name, BranchType::Local)
            .with_context(|| format!("Branch not found: {name}"))?;
        let target = branch
            .get()
            .target()
            .with_context(|| format!("Branch '{name}' has no target"))?;
        let commit = self
            .repo
            .find_commit(target)
            .with_context(|| format!("Commit not found: {target}"))?;
        let tree = self
            .repo
            .find_tree(commit.tree_id())
            .with_context(|| format!("Tree not found for commit {target}"))?;

        let mut checkout = CheckoutBuilder::new();
        checkout.safe();
        self.repo
            .checkout_tree(tree.as_object(), Some(&mut checkout))
            .with_context(|| format!("Failed to checkout tree for branch '{name}'"))?;

        let refname = branch
            .get()
            .name()
            .context("Branch reference name is not valid UTF-8")?;
        self.repo
            .set_head(refname)
            .with_context(|| format!("Failed to set HEAD to branch '{name}'"))?;

        tracing::info!(branch = %name, commit = %target, "Checked out branch");
        Ok(())
    }
}
