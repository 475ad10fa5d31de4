// tests/integration_test.rs
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use serial_test::serial;
use tempfile::{NamedTempFile, TempDir};
use version_bump::runner::{self, RunArgs, WORKSPACE_ENV};

const MANIFEST: &str = r#"{
  "name": "widget",
  "version": "1.2.3",
  "scripts": {
    "test": "echo ok"
  }
}
"#;

const RULES: &str = r#"
default_bump_type = "patch"
commit_message = "chore: release {version}"

[[bump_types]]
type = "minor"
keywords = ["feat"]

[[bump_types]]
type = "patch"
keywords = ["fix"]
"#;

#[test]
fn test_version_bump_help() {
    let output = Command::new("cargo")
        .args(["run", "--bin", "version-bump", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("version-bump"));
    assert!(stdout.contains("bump keywords"));
}

struct FixtureRepo {
    // TempDirs clean up on drop
    _root: TempDir,
    workdir: PathBuf,
    remote_dir: PathBuf,
    branch: String,
}

// Workspace repo with package.json committed, plus a local bare upstream so
// a plain `git push` has somewhere to go.
fn setup_test_repo(with_remote: bool) -> FixtureRepo {
    let root = TempDir::new().expect("Could not create temp dir");
    let workdir = root.path().join("work");
    let remote_dir = root.path().join("remote.git");
    fs::create_dir(&workdir).expect("Could not create workdir");

    let repo = git2::Repository::init(&workdir).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    fs::write(workdir.join("package.json"), MANIFEST).expect("Could not write manifest");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new("package.json"))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");

    repo.commit(
        Some("HEAD"),
        &repo.signature().expect("Could not get sig"),
        &repo.signature().expect("Could not get sig"),
        "Initial commit",
        &tree,
        &[],
    )
    .expect("Could not create commit");

    let branch = repo
        .head()
        .expect("Could not read HEAD")
        .shorthand()
        .expect("HEAD has no shorthand")
        .to_string();

    if with_remote {
        git2::Repository::init_bare(&remote_dir).expect("Could not init bare remote");
        repo.remote("origin", remote_dir.to_str().unwrap())
            .expect("Could not add remote");

        // set the upstream so a later bare `git push` works
        let push = Command::new("git")
            .args(["push", "-u", "origin", &branch])
            .current_dir(&workdir)
            .output()
            .expect("Failed to run git push");
        assert!(
            push.status.success(),
            "initial push failed: {}",
            String::from_utf8_lossy(&push.stderr)
        );
    }

    FixtureRepo {
        _root: root,
        workdir,
        remote_dir,
        branch,
    }
}

fn rules_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(RULES.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
#[serial]
fn test_full_pipeline_bumps_commits_and_pushes() {
    let fixture = setup_test_repo(true);
    let config_file = rules_file();

    let output_file = NamedTempFile::new().unwrap();
    env::set_var("GITHUB_OUTPUT", output_file.path());

    let outcome = runner::run(RunArgs {
        search_target: "feat: add widget".to_string(),
        config_path: Some(config_file.path().to_str().unwrap().to_string()),
        workspace: Some(fixture.workdir.clone()),
    })
    .expect("pipeline should succeed");

    env::remove_var("GITHUB_OUTPUT");

    assert_eq!(outcome.previous_version, "1.2.3");
    assert_eq!(outcome.bumped_version, "1.3.0");

    // manifest rewritten in place
    let manifest = fs::read_to_string(fixture.workdir.join("package.json")).unwrap();
    assert!(manifest.contains("\"1.3.0\""));
    assert!(manifest.contains("\"scripts\""));

    // commit carries the formatted message
    let repo = git2::Repository::open(&fixture.workdir).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message().unwrap().trim_end(), "chore: release 1.3.0");

    // and the bare upstream received it
    let remote = git2::Repository::open_bare(&fixture.remote_dir).unwrap();
    let remote_head = remote
        .find_reference(&format!("refs/heads/{}", fixture.branch))
        .unwrap()
        .peel_to_commit()
        .unwrap();
    assert_eq!(remote_head.id(), head.id());

    // structured output was appended
    let outputs = fs::read_to_string(output_file.path()).unwrap();
    assert!(outputs.contains("bumped_version=1.3.0"));
}

#[test]
#[serial]
fn test_unmatched_target_uses_default_bump_type() {
    let fixture = setup_test_repo(true);
    let config_file = rules_file();

    let output_file = NamedTempFile::new().unwrap();
    env::set_var("GITHUB_OUTPUT", output_file.path());

    let outcome = runner::run(RunArgs {
        search_target: "chore: cleanup".to_string(),
        config_path: Some(config_file.path().to_str().unwrap().to_string()),
        workspace: Some(fixture.workdir.clone()),
    })
    .expect("pipeline should succeed");

    env::remove_var("GITHUB_OUTPUT");

    assert_eq!(outcome.bumped_version, "1.2.4");
}

#[test]
#[serial]
fn test_workspace_comes_from_environment() {
    let fixture = setup_test_repo(true);
    let config_file = rules_file();

    let output_file = NamedTempFile::new().unwrap();
    env::set_var("GITHUB_OUTPUT", output_file.path());
    env::set_var(WORKSPACE_ENV, &fixture.workdir);

    let outcome = runner::run(RunArgs {
        search_target: "fix: close the hatch".to_string(),
        config_path: Some(config_file.path().to_str().unwrap().to_string()),
        workspace: None,
    })
    .expect("pipeline should succeed");

    env::remove_var(WORKSPACE_ENV);
    env::remove_var("GITHUB_OUTPUT");

    assert_eq!(outcome.bumped_version, "1.2.4");
}

#[test]
#[serial]
fn test_push_failure_leaves_local_commit_and_manifest() {
    // no remote configured, so the push step fails after the commit
    let fixture = setup_test_repo(false);
    let config_file = rules_file();

    let result = runner::run(RunArgs {
        search_target: "feat: add widget".to_string(),
        config_path: Some(config_file.path().to_str().unwrap().to_string()),
        workspace: Some(fixture.workdir.clone()),
    });

    let err = result.unwrap_err();
    assert!(err.to_string().contains("git push"));

    // no rollback: the manifest stays bumped and the commit stays in history
    let manifest = fs::read_to_string(fixture.workdir.join("package.json")).unwrap();
    assert!(manifest.contains("\"1.3.0\""));

    let repo = git2::Repository::open(&fixture.workdir).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message().unwrap().trim_end(), "chore: release 1.3.0");
}

#[test]
#[serial]
fn test_missing_manifest_fails_before_any_mutation() {
    let fixture = setup_test_repo(true);
    let config_file = rules_file();

    fs::remove_file(fixture.workdir.join("package.json")).unwrap();

    let result = runner::run(RunArgs {
        search_target: "feat: add widget".to_string(),
        config_path: Some(config_file.path().to_str().unwrap().to_string()),
        workspace: Some(fixture.workdir.clone()),
    });

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Cannot read"));

    // nothing was committed
    let repo = git2::Repository::open(&fixture.workdir).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message().unwrap(), "Initial commit");
}

#[test]
#[serial]
fn test_invalid_manifest_version_fails_before_file_write() {
    let fixture = setup_test_repo(true);
    let config_file = rules_file();

    let broken = MANIFEST.replace("1.2.3", "not-a-version");
    fs::write(fixture.workdir.join("package.json"), &broken).unwrap();

    let result = runner::run(RunArgs {
        search_target: "feat: add widget".to_string(),
        config_path: Some(config_file.path().to_str().unwrap().to_string()),
        workspace: Some(fixture.workdir.clone()),
    });

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Invalid current version"));

    // manifest untouched on disk
    let manifest = fs::read_to_string(fixture.workdir.join("package.json")).unwrap();
    assert_eq!(manifest, broken);
}
