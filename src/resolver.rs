//! Keyword to bump type resolution

use crate::config::ActionConfig;
use crate::ui;
use crate::version::BumpType;

/// Resolves the bump type for a trigger string.
///
/// Rules are scanned first-to-last; within a rule any keyword with a raw,
/// case-sensitive substring hit wins, and the first matching rule
/// short-circuits the scan. When no rule matches, the configured default
/// applies. Always produces a bump type.
///
/// Matching is intentionally a plain substring test, so a keyword like
/// `"fix"` also matches inside `"prefix"`.
///
/// # Arguments
/// * `config` - Action configuration holding the ordered rules and default
/// * `target` - Text to scan (e.g. a pull request title)
pub fn resolve_bump_type(config: &ActionConfig, target: &str) -> BumpType {
    let mut resolved = None;

    for rule in &config.bump_types {
        // check the keywords
        let matched_keyword = rule
            .keywords
            .iter()
            .find(|word| target.contains(word.as_str()));

        if let Some(keyword) = matched_keyword {
            ui::display_success(&format!(
                "Found keyword match: {}; for bump type: {}",
                keyword, rule.r#type
            ));
            resolved = Some(rule.r#type);
            break;
        }
    }

    let bump_type = resolved.unwrap_or_else(|| {
        ui::display_warning(&format!(
            "No matches found; using default bump type: {}",
            config.default_bump_type
        ));
        config.default_bump_type
    });

    ui::display_status(&format!("Using bump type: {}", bump_type));
    bump_type
}
