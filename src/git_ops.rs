use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Result, VersionBumpError};

/// Thin wrapper around the `git` command line client, rooted at a workspace.
///
/// Every operation is a blocking subprocess invocation with no flag
/// customization. A non-zero exit code is surfaced as an error carrying the
/// command's captured output; there are no retries and no timeouts.
pub struct GitClient {
    root: PathBuf,
}

impl GitClient {
    /// Creates a client that runs git commands inside `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        GitClient { root: root.into() }
    }

    /// Stages a path relative to the workspace root.
    pub fn add(&self, path: &str) -> Result<()> {
        self.run(&["add", path])
    }

    /// Creates a commit with the given message.
    pub fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-m", message])
    }

    /// Pushes the current branch to its configured upstream.
    pub fn push(&self) -> Result<()> {
        self.run(&["push"])
    }

    /// Workspace the commands run in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn run(&self, args: &[&str]) -> Result<()> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| {
                VersionBumpError::git(format!(
                    "Failed to execute git {}: {}",
                    args.join(" "),
                    e
                ))
            })?;

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VersionBumpError::git(format!(
                "git {} exited with code {}\nStdout: {}\nStderr: {}",
                args.join(" "),
                output.status.code().unwrap_or(-1),
                stdout,
                stderr
            )));
        }

        Ok(())
    }
}
