//! Linear pipeline performing the whole version bump step
//!
//! Config -> manifest -> resolve -> bump -> save -> add/commit/push -> output.
//! Any error aborts the remaining steps; nothing is retried or rolled back.
//! A push failure after a successful commit leaves the local commit in place,
//! and a git failure after the manifest write leaves the file modified on
//! disk; workspace cleanup is the surrounding CI system's concern.

use std::env;
use std::path::PathBuf;

use crate::config;
use crate::error::{Result, VersionBumpError};
use crate::git_ops::GitClient;
use crate::manifest::Manifest;
use crate::output;
use crate::resolver;
use crate::version::bump_version;

/// Name of the manifest file inside the workspace.
pub const MANIFEST_FILE: &str = "package.json";

/// Environment variable pointing at the workspace root.
pub const WORKSPACE_ENV: &str = "GITHUB_WORKSPACE";

/// Inputs for a single run.
///
/// Mirrors the CLI arguments without depending on clap, so the pipeline can
/// be driven programmatically from tests.
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    /// Text scanned for bump keywords (e.g. a pull request title).
    pub search_target: String,

    /// Custom configuration file path.
    pub config_path: Option<String>,

    /// Workspace root override; falls back to `GITHUB_WORKSPACE`.
    pub workspace: Option<PathBuf>,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// Version found in the manifest before the bump.
    pub previous_version: String,

    /// Version written to the manifest and published as `bumped_version`.
    pub bumped_version: String,
}

/// Runs the full bump pipeline.
///
/// # Arguments
/// * `args` - Run inputs (search target, config path, workspace override)
///
/// # Returns
/// * `Ok(RunOutcome)` - Old and new version after commit and push succeeded
/// * `Err` - First error encountered; later steps are not attempted
pub fn run(args: RunArgs) -> Result<RunOutcome> {
    // parse our action configuration
    let config = config::load_config(args.config_path.as_deref())?;
    let workspace = workspace_root(&args)?;

    // load the package.json
    let mut manifest = Manifest::load(workspace.join(MANIFEST_FILE))?;
    let current_version = manifest.version()?.to_string();

    // get the bumped version
    let bump_type = resolver::resolve_bump_type(&config, &args.search_target);
    let bumped_version = bump_version(&current_version, bump_type)?;

    // update and save the package.json
    manifest.set_version(&bumped_version.to_string())?;
    manifest.save()?;

    // commit and push the version bump changes
    let git = GitClient::new(&workspace);
    git.add(MANIFEST_FILE)?;
    git.commit(&config.commit_message_for(&bumped_version))?;
    git.push()?;

    // publish the newly bumped version
    output::set_output("bumped_version", &bumped_version.to_string())?;

    Ok(RunOutcome {
        previous_version: current_version,
        bumped_version: bumped_version.to_string(),
    })
}

fn workspace_root(args: &RunArgs) -> Result<PathBuf> {
    if let Some(workspace) = &args.workspace {
        return Ok(workspace.clone());
    }

    env::var(WORKSPACE_ENV)
        .map(PathBuf::from)
        .map_err(|_| VersionBumpError::env(WORKSPACE_ENV))
}
