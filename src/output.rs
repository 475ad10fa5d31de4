//! Structured outputs for the surrounding workflow

use std::env;
use std::fs::OpenOptions;
use std::io::Write;

use crate::error::Result;

/// Environment variable naming the workflow output file.
pub const OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Publishes a key-value output for the surrounding workflow.
///
/// When `GITHUB_OUTPUT` names a file, `key=value` is appended to it;
/// otherwise the legacy `::set-output` workflow command goes to stdout.
///
/// # Arguments
/// * `key` - Output name (e.g. `bumped_version`)
/// * `value` - Output value
pub fn set_output(key: &str, value: &str) -> Result<()> {
    match env::var(OUTPUT_ENV) {
        Ok(path) if !path.is_empty() => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{}={}", key, value)?;
        }
        _ => {
            println!("::set-output name={}::{}", key, value);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_output_is_appended_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output");
        env::set_var(OUTPUT_ENV, &path);

        set_output("bumped_version", "1.3.0").unwrap();
        set_output("bumped_version", "1.4.0").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "bumped_version=1.3.0\nbumped_version=1.4.0\n");

        env::remove_var(OUTPUT_ENV);
    }

    #[test]
    #[serial]
    fn test_output_without_file_falls_back_to_stdout() {
        env::remove_var(OUTPUT_ENV);
        // stdout path; just verify it does not error
        set_output("bumped_version", "2.0.0").unwrap();
    }
}
