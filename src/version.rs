//! Semantic version increments
//!
//! Parsing, formatting and precedence are delegated to the `semver` crate;
//! this module only decides which components change for a given bump type.

use std::fmt;
use std::str::FromStr;

use semver::{BuildMetadata, Prerelease, Version};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VersionBumpError};

/// Semantic version increment category.
///
/// The `pre*` variants produce or advance a prerelease component; the plain
/// variants produce release versions and clear any prerelease suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    Major,
    Minor,
    Patch,
    Premajor,
    Preminor,
    Prepatch,
    Prerelease,
}

impl FromStr for BumpType {
    type Err = VersionBumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "major" => Ok(BumpType::Major),
            "minor" => Ok(BumpType::Minor),
            "patch" => Ok(BumpType::Patch),
            "premajor" => Ok(BumpType::Premajor),
            "preminor" => Ok(BumpType::Preminor),
            "prepatch" => Ok(BumpType::Prepatch),
            "prerelease" => Ok(BumpType::Prerelease),
            other => Err(VersionBumpError::version(format!(
                "Unknown bump type: '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpType::Major => "major",
            BumpType::Minor => "minor",
            BumpType::Patch => "patch",
            BumpType::Premajor => "premajor",
            BumpType::Preminor => "preminor",
            BumpType::Prepatch => "prepatch",
            BumpType::Prerelease => "prerelease",
        };
        write!(f, "{}", name)
    }
}

/// Bump a version string according to the given bump type.
///
/// Increment rules:
/// - **Major**: `X.Y.Z -> (X+1).0.0`; a prerelease of `X.0.0` collapses to `X.0.0`
/// - **Minor**: `X.Y.Z -> X.(Y+1).0`; a prerelease of `X.Y.0` collapses to `X.Y.0`
/// - **Patch**: `X.Y.Z -> X.Y.(Z+1)`; a prerelease of `X.Y.Z` collapses to `X.Y.Z`
/// - **Premajor/Preminor/Prepatch**: the corresponding bump with prerelease `0`
/// - **Prerelease**: advance the rightmost numeric prerelease identifier, or
///   append `.0` if none is numeric; on a release version acts like prepatch
///
/// Build metadata is always cleared.
///
/// # Arguments
/// * `current` - Current version string (must be valid semver)
/// * `bump_type` - Type of bump to apply
///
/// # Returns
/// * `Ok(Version)` - The bumped version, re-validated as well-formed semver
/// * `Err` - If the current version does not parse or the result is invalid
pub fn bump_version(current: &str, bump_type: BumpType) -> Result<Version> {
    let version = Version::parse(current).map_err(|e| {
        VersionBumpError::version(format!("Invalid current version '{}': {}", current, e))
    })?;

    let mut bumped = version.clone();
    bumped.build = BuildMetadata::EMPTY;

    match bump_type {
        BumpType::Major => {
            if !(version.minor == 0 && version.patch == 0 && !version.pre.is_empty()) {
                bumped.major += 1;
            }
            bumped.minor = 0;
            bumped.patch = 0;
            bumped.pre = Prerelease::EMPTY;
        }
        BumpType::Minor => {
            if !(version.patch == 0 && !version.pre.is_empty()) {
                bumped.minor += 1;
            }
            bumped.patch = 0;
            bumped.pre = Prerelease::EMPTY;
        }
        BumpType::Patch => {
            if version.pre.is_empty() {
                bumped.patch += 1;
            }
            bumped.pre = Prerelease::EMPTY;
        }
        BumpType::Premajor => {
            bumped.major += 1;
            bumped.minor = 0;
            bumped.patch = 0;
            bumped.pre = initial_prerelease()?;
        }
        BumpType::Preminor => {
            bumped.minor += 1;
            bumped.patch = 0;
            bumped.pre = initial_prerelease()?;
        }
        BumpType::Prepatch => {
            bumped.patch += 1;
            bumped.pre = initial_prerelease()?;
        }
        BumpType::Prerelease => {
            if version.pre.is_empty() {
                bumped.patch += 1;
                bumped.pre = initial_prerelease()?;
            } else {
                bumped.pre = next_prerelease(&version.pre)?;
            }
        }
    }

    // Verify the version post-bump
    Version::parse(&bumped.to_string()).map_err(|e| {
        VersionBumpError::version(format!(
            "Invalid post-bump version; bumped with type: {}: {}",
            bump_type, e
        ))
    })
}

/// The prerelease component used when a bump introduces one (`-0`).
fn initial_prerelease() -> Result<Prerelease> {
    Prerelease::new("0")
        .map_err(|e| VersionBumpError::version(format!("Invalid prerelease component: {}", e)))
}

/// Advance an existing prerelease component.
///
/// The rightmost numeric identifier is incremented; if no identifier is
/// numeric, `.0` is appended (`alpha` -> `alpha.0`, `alpha.1` -> `alpha.2`).
fn next_prerelease(pre: &Prerelease) -> Result<Prerelease> {
    let mut identifiers: Vec<String> = pre.as_str().split('.').map(str::to_string).collect();

    let mut incremented = false;
    for identifier in identifiers.iter_mut().rev() {
        if let Ok(n) = identifier.parse::<u64>() {
            *identifier = (n + 1).to_string();
            incremented = true;
            break;
        }
    }

    if !incremented {
        identifiers.push("0".to_string());
    }

    Prerelease::new(&identifiers.join(".")).map_err(|e| {
        VersionBumpError::version(format!("Invalid prerelease component '{}': {}", pre, e))
    })
}
