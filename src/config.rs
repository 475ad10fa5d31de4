use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use semver::Version;

use crate::error::{Result, VersionBumpError};
use crate::version::BumpType;

/// A keyword rule mapping trigger text to a bump type.
///
/// Rules are evaluated in the order they appear in the configuration; the
/// first rule with any matching keyword wins.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BumpRule {
    pub r#type: BumpType,
    pub keywords: Vec<String>,
}

/// Represents the complete configuration for a version bump run.
///
/// Contains the ordered keyword rules, the fallback bump type, and the commit
/// message template. Loaded once at start; read-only thereafter.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ActionConfig {
    #[serde(default = "default_bump_types")]
    pub bump_types: Vec<BumpRule>,

    #[serde(default = "default_bump_type")]
    pub default_bump_type: BumpType,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

/// Returns the default ordered keyword rules.
fn default_bump_types() -> Vec<BumpRule> {
    vec![
        BumpRule {
            r#type: BumpType::Major,
            keywords: vec!["major".to_string(), "breaking".to_string()],
        },
        BumpRule {
            r#type: BumpType::Minor,
            keywords: vec![
                "minor".to_string(),
                "feat".to_string(),
                "feature".to_string(),
            ],
        },
        BumpRule {
            r#type: BumpType::Patch,
            keywords: vec!["patch".to_string(), "fix".to_string()],
        },
    ]
}

/// Returns the bump type used when no rule matches.
fn default_bump_type() -> BumpType {
    BumpType::Patch
}

/// Returns the default commit message template.
fn default_commit_message() -> String {
    "chore: bump version to {version}".to_string()
}

impl Default for ActionConfig {
    fn default() -> Self {
        ActionConfig {
            bump_types: default_bump_types(),
            default_bump_type: default_bump_type(),
            commit_message: default_commit_message(),
        }
    }
}

impl ActionConfig {
    /// Formats the commit message for a bumped version.
    ///
    /// Replaces every literal occurrence of the `{version}` token; no other
    /// templating syntax is supported.
    pub fn commit_message_for(&self, version: &Version) -> String {
        self.commit_message
            .replace("{version}", &version.to_string())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `bumpversion.toml` in current directory
/// 3. `~/.config/.bumpversion.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(ActionConfig)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<ActionConfig> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./bumpversion.toml").exists() {
        fs::read_to_string("./bumpversion.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".bumpversion.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(ActionConfig::default());
        }
    } else {
        return Ok(ActionConfig::default());
    };

    let config: ActionConfig = toml::from_str(&config_str)
        .map_err(|e| VersionBumpError::config(format!("Invalid configuration: {}", e)))?;
    Ok(config)
}
