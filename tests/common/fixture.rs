//! Test fixture for setting up temporary git repositories

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use git2::{Oid, Repository, RepositoryInitOptions, Signature};
use jira_branch::Config;
use tempfile::TempDir;

/// Test fixture that sets up a temporary git repository with an upstream
pub struct TestFixture {
    /// Temporary directory containing the git repo
    _temp_dir: TempDir,
    /// Path to the git repository
    pub repo_path: PathBuf,
    /// Commit `origin/master` points at
    pub upstream_tip: Oid,
}

impl TestFixture {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        // Canonicalize to handle symlinked temp dirs.
        let repo_path = temp_dir
            .path()
            .canonicalize()
            .unwrap_or_else(|_| temp_dir.path().to_path_buf());

        // Initialize git repo with a stable default branch name.
        let mut init_opts = RepositoryInitOptions::new();
        init_opts.initial_head("master");
        let repo = Repository::init_opts(&repo_path, &init_opts)?;
        repo.set_head("refs/heads/master")?;
        let sig = Signature::now("Test", "test@test.com")?;

        fs::write(repo_path.join("README.md"), "# Test Repository\n")?;

        let mut index = repo.index()?;
        index.add_path(Path::new("README.md"))?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let initial = {
            let tree = repo.find_tree(tree_id)?;
            repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])?
        };

        // Upstream moves one commit ahead of the local master.
        let upstream_tip = {
            let parent = repo.find_commit(initial)?;
            let blob = repo.blob(b"# Upstream README\n")?;
            let mut builder = repo.treebuilder(Some(&parent.tree()?))?;
            builder.insert("README.md", blob, 0o100_644)?;
            let tree = repo.find_tree(builder.write()?)?;
            repo.commit(None, &sig, &sig, "Upstream change", &tree, &[&parent])?
        };
        repo.reference(
            "refs/remotes/origin/master",
            upstream_tip,
            true,
            "fixture upstream",
        )?;

        Ok(Self {
            _temp_dir: temp_dir,
            repo_path,
            upstream_tip,
        })
    }

    pub fn repo(&self) -> Result<Repository, git2::Error> {
        Repository::open(&self.repo_path)
    }

    /// Create a local branch at the current HEAD commit
    pub fn create_branch(&self, name: &str) -> Result<Oid, Box<dyn std::error::Error>> {
        let repo = self.repo()?;
        let commit = repo.head()?.peel_to_commit()?;
        repo.branch(name, &commit, false)?;
        Ok(commit.id())
    }

    pub fn config(&self, jira_host: &str) -> Config {
        Config {
            repo: self.repo_path.clone(),
            jira_host: jira_host.to_string(),
            jira_user: "dev@example.com".to_string(),
            jira_token: "token".to_string(),
            upstream_branch: "origin/master".to_string(),
            jql: "assignee = currentUser()".to_string(),
            max_results: 50,
            timeout: Duration::from_secs(5),
        }
    }

    pub fn read_file(&self, name: &str) -> std::io::Result<String> {
        fs::read_to_string(self.repo_path.join(name))
    }

    pub fn write_file(&self, name: &str, contents: &str) -> std::io::Result<()> {
        fs::write(self.repo_path.join(name), contents)
    }
}
