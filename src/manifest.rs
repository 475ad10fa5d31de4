//! package.json reading and rewriting

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Result, VersionBumpError};

/// In-memory view of a `package.json` manifest.
///
/// Only the top-level `version` field is interpreted; every other field is
/// carried through untouched when the file is rewritten. The document is read
/// once, mutated once, and written once.
#[derive(Debug)]
pub struct Manifest {
    path: PathBuf,
    document: Value,
}

impl Manifest {
    /// Loads and parses the manifest at `path`.
    ///
    /// # Returns
    /// * `Ok(Manifest)` - Parsed manifest, nothing written yet
    /// * `Err` - If the file cannot be read or is not valid JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let raw = fs::read_to_string(&path).map_err(|e| {
            VersionBumpError::manifest(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let document: Value = serde_json::from_str(&raw).map_err(|e| {
            VersionBumpError::manifest(format!("Cannot parse {}: {}", path.display(), e))
        })?;

        Ok(Manifest { path, document })
    }

    /// Returns the current `version` field.
    ///
    /// # Returns
    /// * `Ok(&str)` - The version string
    /// * `Err` - If the manifest has no string `version` field
    pub fn version(&self) -> Result<&str> {
        self.document
            .get("version")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                VersionBumpError::manifest(format!(
                    "No version field found in {}",
                    self.path.display()
                ))
            })
    }

    /// Overwrites the `version` field in memory.
    ///
    /// The document on disk is not touched until [`save`](Self::save).
    pub fn set_version(&mut self, version: &str) -> Result<()> {
        match self.document.as_object_mut() {
            Some(object) => {
                object.insert("version".to_string(), Value::String(version.to_string()));
                Ok(())
            }
            None => Err(VersionBumpError::manifest(format!(
                "{} is not a JSON object",
                self.path.display()
            ))),
        }
    }

    /// Rewrites the manifest file in place.
    ///
    /// Fields keep their original order; output uses two-space indentation
    /// with a trailing newline, matching npm's own formatting.
    pub fn save(&self) -> Result<()> {
        let mut rendered = serde_json::to_string_pretty(&self.document).map_err(|e| {
            VersionBumpError::manifest(format!("Cannot serialize {}: {}", self.path.display(), e))
        })?;
        rendered.push('\n');
        fs::write(&self.path, rendered)?;
        Ok(())
    }

    /// Path of the manifest on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
